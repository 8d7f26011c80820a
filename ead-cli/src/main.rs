//! ead2json - convert an EAD finding aid into a JSON element tree.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ead_convert::{LoadedDocument, OutputStyle, load_document, parse_markup_string};
use owo_colors::OwoColorize;

/// Convert archival markup (EAD) into a JSON element tree
#[derive(Parser, Debug)]
#[command(name = "ead2json")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Convert a finding aid, pretty-printed to stdout
    ead2json mss0042.xml

    # Single-line output written to a file
    ead2json --compact -o mss0042.json mss0042.xml

    # Convert inline markup
    ead2json --xml '<ead><eadid>mss0042</eadid></ead>'
")]
struct Cli {
    /// Path to the markup file to convert
    #[arg(value_name = "FILE", required_unless_present = "xml")]
    path: Option<PathBuf>,

    /// Convert a markup string directly instead of a file
    #[arg(long, value_name = "XML", conflicts_with = "path")]
    xml: Option<String>,

    /// Print the JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let doc = load_doc(cli)?;
    let style = if cli.compact {
        OutputStyle::Compact
    } else {
        OutputStyle::Pretty
    };

    if let Some(ref output_path) = cli.output {
        let file = File::create(output_path)
            .with_context(|| format!("failed to create '{}'", output_path.display()))?;
        doc.write_json(&mut BufWriter::new(file), style)
            .with_context(|| format!("failed to write '{}'", output_path.display()))?;
    } else {
        doc.write_json(&mut io::stdout().lock(), style)?;
    }
    Ok(())
}

/// Load document from CLI arguments
fn load_doc(cli: &Cli) -> Result<LoadedDocument> {
    if let Some(ref markup) = cli.xml {
        parse_markup_string(markup).context("failed to convert inline markup")
    } else if let Some(ref path) = cli.path {
        load_document(path).with_context(|| format!("failed to convert '{}'", path.display()))
    } else {
        anyhow::bail!("a file path or --xml is required")
    }
}
