//! Segment lookup, cursor paths and visitor traversal

use crate::Error;
use crate::Result;
use crate::document::Document;
use crate::node::{Container, Node};
use tracing::trace;

/// A segment together with its position in the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRef<'a> {
    /// Zero-based position among all segments of the message
    pub position: usize,

    /// The segment container
    pub segment: &'a Container,
}

impl<'a> SegmentRef<'a> {
    /// Segment code (first leaf of the first field)
    pub fn code(&self) -> Option<&'a str> {
        self.segment.code()
    }
}

/// All segments whose code equals `code`, in message order
pub fn segments_of<'a>(document: &'a Document, code: &str) -> Vec<SegmentRef<'a>> {
    document
        .root
        .iter()
        .enumerate()
        .filter_map(|(position, node)| {
            let segment = node.as_container()?;
            (segment.code() == Some(code)).then_some(SegmentRef { position, segment })
        })
        .collect()
}

/// First segment whose code equals `code`
pub fn segment_of<'a>(document: &'a Document, code: &str) -> Result<SegmentRef<'a>> {
    segments_of(document, code)
        .into_iter()
        .next()
        .ok_or_else(|| Error::segment_not_found(code))
}

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Container(&'a Container),
    Leaf(&'a str),
}

/// A cursor for navigating the container tree by path
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    target: Target<'a>,

    /// Path to the current node (for error reporting)
    path: Vec<String>,
}

/// Trait for traversing the container tree
pub trait Traversal {
    /// Visit a child node; `path` holds child indexes from the root
    fn visit(&mut self, node: &Node, path: &[usize]);

    /// Called when entering a container
    fn enter(&mut self, _container: &Container, _path: &[usize]) {}

    /// Called when leaving a container
    fn leave(&mut self, _container: &Container, _path: &[usize]) {}

    /// Returns true if traversal should continue
    fn should_continue(&self) -> bool {
        true
    }
}

impl<'a> Cursor<'a> {
    /// Create a cursor at a message (or any) container
    pub fn new(container: &'a Container) -> Self {
        Self {
            target: Target::Container(container),
            path: Vec::new(),
        }
    }

    /// Create a cursor at the root of a document
    pub fn at_document(document: &'a Document) -> Self {
        Self::new(&document.root)
    }

    /// Current container, if the cursor is not on a leaf
    pub fn container(&self) -> Option<&'a Container> {
        match self.target {
            Target::Container(container) => Some(container),
            Target::Leaf(_) => None,
        }
    }

    /// Current leaf text, if the cursor is on a leaf
    pub fn text(&self) -> Option<&'a str> {
        match self.target {
            Target::Container(_) => None,
            Target::Leaf(text) => Some(text),
        }
    }

    /// Render whatever the cursor points at
    pub fn render(&self) -> String {
        match self.target {
            Target::Container(container) => container.render(),
            Target::Leaf(text) => text.to_string(),
        }
    }

    /// Get the current path
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Navigate to a child by index
    pub fn child_at(&self, index: usize) -> Result<Cursor<'a>> {
        let container = self
            .container()
            .ok_or_else(|| Error::invalid_path(self.path.join("/"), "leaf has no children"))?;
        let child = container
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(self.path.join("/"), index))?;

        let mut path = self.path.clone();
        path.push(index.to_string());
        Ok(Cursor {
            target: target_of(child),
            path,
        })
    }

    /// Navigate to the `nth` segment with the given code (zero-based)
    pub fn segment(&self, code: &str, nth: usize) -> Result<Cursor<'a>> {
        let container = self
            .container()
            .ok_or_else(|| Error::invalid_path(self.path.join("/"), "leaf has no segments"))?;
        let segment = container
            .iter()
            .filter_map(Node::as_container)
            .filter(|segment| segment.code() == Some(code))
            .nth(nth)
            .ok_or_else(|| Error::segment_not_found(format!("{code}[{nth}]")))?;

        let mut path = self.path.clone();
        path.push(format!("{code}[{nth}]"));
        Ok(Cursor {
            target: Target::Container(segment),
            path,
        })
    }

    /// Navigate using a path such as `OBX[1]/5/0`.
    ///
    /// A named step selects a segment by code (index defaults to 0); numeric
    /// steps select children by raw index, so field numbers match the
    /// segment's own numbering.
    pub fn navigate(&self, path: &str) -> Result<Cursor<'a>> {
        let mut cursor = self.clone();

        for step in path.split('/') {
            if step.is_empty() {
                continue;
            }

            if let Ok(index) = step.parse::<usize>() {
                cursor = cursor.child_at(index)?;
                continue;
            }

            let (code, nth) = match step.find('[') {
                Some(open) => {
                    let close = step[open..]
                        .find(']')
                        .map(|offset| open + offset)
                        .ok_or_else(|| Error::invalid_path(path, format!("unclosed bracket in {step}")))?;
                    if close + 1 != step.len() {
                        return Err(Error::invalid_path(
                            path,
                            format!("unexpected text after index in {step}"),
                        ));
                    }
                    let nth = step[open + 1..close]
                        .parse::<usize>()
                        .map_err(|_| Error::invalid_path(path, format!("invalid index in {step}")))?;
                    (&step[..open], nth)
                }
                None => (step, 0),
            };
            cursor = cursor.segment(code, nth)?;
        }

        trace!(path, resolved = %cursor.path.join("/"), "Cursor navigated");
        Ok(cursor)
    }
}

fn target_of(node: &Node) -> Target<'_> {
    match node {
        Node::Leaf(text) => Target::Leaf(text),
        Node::Container(container) => Target::Container(container),
    }
}

/// Walk the tree using a visitor
pub fn walk<T: Traversal>(container: &Container, visitor: &mut T) {
    walk_recursive(container, visitor, &mut Vec::new());
}

fn walk_recursive<T: Traversal>(container: &Container, visitor: &mut T, path: &mut Vec<usize>) {
    if !visitor.should_continue() {
        return;
    }

    visitor.enter(container, path);

    for (index, child) in container.iter().enumerate() {
        if !visitor.should_continue() {
            break;
        }
        path.push(index);
        visitor.visit(child, path);
        if let Node::Container(inner) = child {
            walk_recursive(inner, visitor, path);
        }
        path.pop();
    }

    visitor.leave(container, path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    fn field(parts: &[&str]) -> Node {
        Node::Container(Container::new(
            NodeType::Field,
            '^',
            parts.iter().map(|p| Node::leaf(*p)).collect(),
        ))
    }

    fn segment(fields: Vec<Node>) -> Node {
        Node::Container(Container::new(NodeType::Segment, '|', fields))
    }

    fn sample() -> Document {
        Document::new(Container::new(
            NodeType::Message,
            '\n',
            vec![
                segment(vec![field(&["OBX"]), field(&["1"]), field(&["NM"])]),
                segment(vec![field(&["NTE"]), field(&["1"])]),
                segment(vec![
                    field(&["OBX"]),
                    field(&["2"]),
                    field(&["CE"]),
                    field(&["1554-5", "GLUCOSE"]),
                ]),
            ],
        ))
    }

    #[test]
    fn test_segments_of_positions() {
        let doc = sample();
        let found = segments_of(&doc, "OBX");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].position, 0);
        assert_eq!(found[1].position, 2);
        assert_eq!(found[1].code(), Some("OBX"));
        assert!(segments_of(&doc, "PID").is_empty());
    }

    #[test]
    fn test_segment_of_missing() {
        let doc = sample();

        assert_eq!(segment_of(&doc, "NTE").unwrap().position, 1);
        assert_eq!(
            segment_of(&doc, "ORC"),
            Err(Error::SegmentNotFound {
                code: "ORC".to_string()
            })
        );
    }

    #[test]
    fn test_cursor_navigate() {
        let doc = sample();
        let cursor = Cursor::at_document(&doc);

        let glucose = cursor.navigate("OBX[1]/3/1").unwrap();
        assert_eq!(glucose.text(), Some("GLUCOSE"));
        assert_eq!(glucose.path(), &["OBX[1]", "3", "1"]);

        let first = cursor.navigate("OBX/2").unwrap();
        assert_eq!(first.render(), "NM");
        assert!(first.container().is_some());
    }

    #[test]
    fn test_cursor_navigate_errors() {
        let doc = sample();
        let cursor = Cursor::at_document(&doc);

        assert!(matches!(
            cursor.navigate("OBX[5]"),
            Err(Error::SegmentNotFound { .. })
        ));
        assert!(matches!(
            cursor.navigate("OBX[0"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            cursor.navigate("OBX[x]"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            cursor.navigate("OBX]0["),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            cursor.navigate("OBX[0]x"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            cursor.navigate("NTE/9"),
            Err(Error::IndexOutOfRange { index: 9, .. })
        ));
        assert!(matches!(
            cursor.navigate("NTE/1/0/0"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_cursor_navigate_skips_empty_steps() {
        let doc = sample();
        let cursor = Cursor::new(&doc.root);

        assert_eq!(cursor.navigate("//NTE//1/").unwrap().render(), "1");
    }

    struct LeafCollector {
        leaves: Vec<String>,
        entered: usize,
        left: usize,
        limit: usize,
    }

    impl Traversal for LeafCollector {
        fn visit(&mut self, node: &Node, _path: &[usize]) {
            if let Some(text) = node.as_leaf() {
                self.leaves.push(text.to_string());
            }
        }

        fn enter(&mut self, _container: &Container, _path: &[usize]) {
            self.entered += 1;
        }

        fn leave(&mut self, _container: &Container, _path: &[usize]) {
            self.left += 1;
        }

        fn should_continue(&self) -> bool {
            self.leaves.len() < self.limit
        }
    }

    #[test]
    fn test_walk_visits_leaves_in_order() {
        let doc = sample();
        let mut visitor = LeafCollector {
            leaves: Vec::new(),
            entered: 0,
            left: 0,
            limit: usize::MAX,
        };
        walk(&doc.root, &mut visitor);

        assert_eq!(
            visitor.leaves,
            vec!["OBX", "1", "NM", "NTE", "1", "OBX", "2", "CE", "1554-5", "GLUCOSE"]
        );
        // message + 3 segments + 9 fields
        assert_eq!(visitor.entered, 13);
        assert_eq!(visitor.left, visitor.entered);
    }

    #[test]
    fn test_walk_should_continue() {
        let doc = sample();
        let mut visitor = LeafCollector {
            leaves: Vec::new(),
            entered: 0,
            left: 0,
            limit: 2,
        };
        walk(&doc.root, &mut visitor);

        assert_eq!(visitor.leaves, vec!["OBX", "1"]);
    }
}
