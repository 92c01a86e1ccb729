//! # hl7-cli
//!
//! Command-line front end for parsing and inspecting HL7 v2 messages.
//!
//! Input files ending in `.xml` are read as message envelopes; anything else
//! is read as a single message.

mod config;
mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CliConfig;
use hl7_ir::{Document, SourceInfo};
use hl7_parser::{EnvelopeConfig, EnvelopeReader, Hl7Parser, ParserConfig};
use hl7_schema::{SchemaRegistry, Version};
use hl7_transform::Message;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const EXIT_FAILED: u8 = 1;
const EXIT_CONFIG: u8 = 3;

#[derive(Parser)]
#[command(name = "hl7")]
#[command(about = "HL7 v2 message parser and inspector")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse messages and print their trees as JSON
    Parse {
        /// Input file path
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print a header, patient, order and result report
    Dump {
        /// Input file path
        input: PathBuf,

        /// Bind every message to this version instead of the declared one
        #[arg(long = "hl7-version")]
        hl7_version: Option<Version>,
    },

    /// List the field table of a segment
    Fields {
        /// Segment code (e.g. OBX)
        segment: String,

        /// HL7 version (e.g. 2.3.1)
        #[arg(long = "hl7-version")]
        hl7_version: Option<Version>,
    },
}

/// One message read from the input, parsed or not
struct Loaded {
    label: String,
    document: hl7_parser::Result<Document>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fatal(&err),
    };
    let registry = match config.registry() {
        Ok(registry) => registry,
        Err(err) => return fatal(&err),
    };

    let outcome = match cli.command {
        Commands::Parse { input, pretty } => run_parse(&input, pretty, &config),
        Commands::Dump { input, hl7_version } => {
            run_dump(&input, hl7_version, &config, &registry)
        }
        Commands::Fields {
            segment,
            hl7_version,
        } => run_fields(&segment, hl7_version, &config, &registry),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(EXIT_FAILED)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fatal(err: &config::ConfigError) -> ExitCode {
    eprintln!("ERROR: {err}");
    ExitCode::from(EXIT_CONFIG)
}

fn load_input(path: &Path, config: &CliConfig) -> anyhow::Result<Vec<Loaded>> {
    let source = path.display().to_string();
    let is_envelope = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));

    if is_envelope {
        let mut envelope = EnvelopeConfig::default();
        if let Some(formats) = &config.envelope_formats {
            envelope.formats.clone_from(formats);
        }
        let messages = EnvelopeReader::with_config(envelope)
            .read_file(path)
            .with_context(|| format!("reading envelope {source}"))?;

        let parser = Hl7Parser::new();
        return Ok(messages
            .iter()
            .enumerate()
            .map(|(i, message)| Loaded {
                label: message
                    .id
                    .as_ref()
                    .map_or_else(|| format!("message {}", i + 1), |id| format!("MsgID {id}")),
                document: message.parse(&parser, &source),
            })
            .collect());
    }

    let text = std::fs::read_to_string(path).with_context(|| format!("reading {source}"))?;
    let parser = Hl7Parser::with_config(ParserConfig {
        normalize_line_endings: true,
        ..ParserConfig::default()
    });
    Ok(vec![Loaded {
        document: parser.parse_with_source(&text, SourceInfo::new(&source)),
        label: source,
    }])
}

fn run_parse(input: &Path, pretty: bool, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let loaded = load_input(input, config)?;
    let total = loaded.len();

    let mut documents = Vec::with_capacity(total);
    for item in loaded {
        match item.document {
            Ok(document) => documents.push(document),
            Err(err) => eprintln!("ERROR: {}: {err}", item.label),
        }
    }
    let failures = total - documents.len();

    let json = if pretty {
        serde_json::to_string_pretty(&documents)?
    } else {
        serde_json::to_string(&documents)?
    };
    println!("{json}");

    eprintln!("Parse summary: messages={total}, failures={failures}");
    Ok(exit_for(failures))
}

fn run_dump(
    input: &Path,
    hl7_version: Option<Version>,
    config: &CliConfig,
    registry: &SchemaRegistry,
) -> anyhow::Result<ExitCode> {
    let loaded = load_input(input, config)?;
    let fallback = config.default_version()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for item in &loaded {
        let bound = item
            .document
            .as_ref()
            .map_err(|err| anyhow::anyhow!("{err}"))
            .and_then(|document| bind(document, registry, hl7_version, fallback));
        match bound {
            Ok(message) => {
                debug!(label = %item.label, version = %message.version(), "Dumping message");
                report::write_report(&mut out, &message)?;
                writeln!(out)?;
            }
            Err(err) => {
                eprintln!("ERROR: {}: {err:#}", item.label);
                failures += 1;
            }
        }
    }

    Ok(exit_for(failures))
}

/// Bind a document to an explicit version, its declared one, or the
/// configured fallback, in that order
fn bind<'a>(
    document: &'a Document,
    registry: &'a SchemaRegistry,
    explicit: Option<Version>,
    fallback: Option<Version>,
) -> anyhow::Result<Message<'a>> {
    if let Some(version) = explicit {
        return Ok(Message::new(document, registry.get(version)?));
    }
    match (Message::from_document(document, registry), fallback) {
        (Ok(message), _) => Ok(message),
        (Err(err), Some(version)) => {
            warn!(%version, error = %err, "Falling back to default version");
            Ok(Message::new(document, registry.get(version)?))
        }
        (Err(err), None) => Err(err.into()),
    }
}

fn run_fields(
    segment: &str,
    hl7_version: Option<Version>,
    config: &CliConfig,
    registry: &SchemaRegistry,
) -> anyhow::Result<ExitCode> {
    let version = match hl7_version {
        Some(version) => version,
        None => config
            .default_version()?
            .context("no --hl7-version given and no default_version configured")?,
    };
    let table = registry.get(version)?.segment(&segment.to_ascii_uppercase())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} (HL7 v{version})", table.code())?;
    for field in table.fields() {
        let decoder = field
            .decoder
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        writeln!(out, "{:>3}  {:<40} {decoder}", field.index, field.name)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn exit_for(failures: usize) -> ExitCode {
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED)
    }
}
