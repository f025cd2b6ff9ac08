//! # Paraform CLI (`para`)
//!
//! Splits summaries and document text into a fixed number of display
//! paragraphs, renders summarizer responses, and serves the same logic
//! over HTTP.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `para split [INPUT]` | Paragraphs from a text, PDF, DOCX, or PPTX file (or stdin) |
//! | `para render <RESPONSE>` | Summary and raw text paragraphs from a summarizer JSON response |
//! | `para lengths` | Show the short/medium/long → paragraph count mapping |
//! | `para serve` | Start the HTTP server |
//! | `para completions <SHELL>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! para split notes.txt --length long
//! cat summary.txt | para split --count 2 --format json
//! para render response.json --length short
//! para serve --config ./config/para.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use paraform::config::{self, Config};
use paraform::extract::{read_document, read_input};
use paraform::render::{DocumentView, OutputFormat, ParagraphsOutput, SummaryResponse};
use paraform::server;
use paraform_core::SummaryLength;

#[derive(Parser)]
#[command(
    name = "para",
    about = "Paraform: turn summaries and document text into a fixed number of paragraphs",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Built-in defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a document into paragraphs.
    ///
    /// Existing line breaks are used when there are enough of them;
    /// otherwise sentences are grouped into near-equal paragraphs.
    Split {
        /// Input file (`.txt`, `.md`, `.pdf`, `.docx`, `.pptx`). Reads stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Length selector: short, medium, or long.
        #[arg(long)]
        length: Option<SummaryLength>,

        /// Exact paragraph count (overrides --length).
        #[arg(long)]
        count: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print which strategy produced the paragraphs.
        #[arg(long)]
        explain: bool,
    },

    /// Render a summarizer response (`{ "summary", "raw_text", "message" }`).
    ///
    /// Both the summary and the raw extracted text are cut to the same
    /// number of paragraphs.
    Render {
        /// JSON response file. Reads stdin when `-`.
        response: PathBuf,

        /// Length selector: short, medium, or long.
        #[arg(long)]
        length: Option<SummaryLength>,

        /// Exact paragraph count (overrides --length).
        #[arg(long)]
        count: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the length selector mapping in effect.
    Lengths {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "para", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Split {
            input,
            length,
            count,
            format,
            explain,
        } => {
            let count = cfg.paragraph_count(length, count)?;
            let text = read_document(input.as_deref(), cfg.extract.max_bytes)?;
            let out = ParagraphsOutput::from_text(&text, count);
            println!("{}", out.render(format, explain)?);
        }
        Commands::Render {
            response,
            length,
            count,
            format,
        } => {
            let count = cfg.paragraph_count(length, count)?;
            let response = read_response(&response, &cfg)?;
            let view = DocumentView::from_response(&response, count);
            println!("{}", view.render(format)?);
        }
        Commands::Lengths { format } => {
            print_lengths(&cfg, format)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

fn read_response(path: &Path, cfg: &Config) -> Result<SummaryResponse> {
    let raw = read_input(Some(path), cfg.extract.max_bytes)?;
    serde_json::from_slice(&raw).with_context(|| "Response is not a valid summarizer JSON object")
}

fn print_lengths(cfg: &Config, format: OutputFormat) -> Result<()> {
    let map = cfg.length_map()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&map)?),
        OutputFormat::Text => {
            for (length, count) in map.entries() {
                let marker = if length == cfg.paragraphs.default_length {
                    " (default)"
                } else {
                    ""
                };
                println!("{:<8}{}{}", length.as_str(), count, marker);
            }
        }
    }
    Ok(())
}
