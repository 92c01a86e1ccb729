//! Node types for the container tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of containers, outermost to innermost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Whole message, children are segments
    Message,

    /// One segment line, children are fields
    Segment,

    /// One field, children are component strings
    Field,

    /// One component, children are sub-component strings
    Component,
}

/// A node in the tree: either a raw leaf string or a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Raw text between two delimiters (possibly empty)
    Leaf(String),

    /// Ordered children joined by a separator
    Container(Container),
}

/// An ordered sequence of child nodes plus the separator that joins them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    node_type: NodeType,
    separator: char,
    children: Vec<Node>,
}

impl Container {
    /// Create a container from its children
    pub fn new(node_type: NodeType, separator: char, children: Vec<Node>) -> Self {
        Self {
            node_type,
            separator,
            children,
        }
    }

    /// Container kind
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Separator used between children
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Children in original order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the container has no children at all
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child at a zero-based index
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Iterate over children
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Child container at a zero-based index (None for leaves or out of range)
    pub fn container(&self, index: usize) -> Option<&Container> {
        self.children.get(index).and_then(Node::as_container)
    }

    /// Child leaf text at a zero-based index (None for containers or out of range)
    pub fn leaf(&self, index: usize) -> Option<&str> {
        self.children.get(index).and_then(Node::as_leaf)
    }

    /// Text of the first leaf reached by always descending into the first child
    pub fn first_leaf(&self) -> Option<&str> {
        self.children.first().and_then(Node::first_leaf)
    }

    /// Segment code, i.e. the first leaf of the first field
    pub fn code(&self) -> Option<&str> {
        self.first_leaf()
    }

    /// True for no children, or a single empty leaf
    pub fn is_blank(&self) -> bool {
        match self.children.as_slice() {
            [] => true,
            [Node::Leaf(text)] => text.is_empty(),
            _ => false,
        }
    }

    /// Render back to delimited text
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl Node {
    /// Create a leaf node
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(text.into())
    }

    /// Leaf text, if this is a leaf
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Container(_) => None,
        }
    }

    /// Container, if this is not a leaf
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Leaf(_) => None,
            Node::Container(container) => Some(container),
        }
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Container kind (None for leaves)
    pub fn node_type(&self) -> Option<NodeType> {
        self.as_container().map(Container::node_type)
    }

    /// First leaf text in depth-first order along first children
    pub fn first_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Container(container) => container.first_leaf(),
        }
    }

    /// Render back to delimited text
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.separator)?;
            }
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(text) => f.write_str(text),
            Node::Container(container) => fmt::Display::fmt(container, f),
        }
    }
}
