//! campenc — the encoder CLI
//!
//! Reads a query AST (JSON, as produced by the upstream dialect parser)
//! from a file or stdin and prints the canonical S-expression encoding.
//!
//! # Usage
//!
//! ```bash
//! # Encode an AST file
//! campenc query.json
//!
//! # From stdin, with the date-name heuristic enabled
//! cat query.json | campenc --date-heuristic
//! ```

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::*;

use campenc::ast::Query;
use campenc::encoder::Encoder;

#[derive(Parser)]
#[command(name = "campenc")]
#[command(version)]
#[command(about = "Encode SQL++ query ASTs as CAMP S-expressions", long_about = None)]
struct Cli {
    /// File holding the query AST as JSON (stdin when omitted)
    file: Option<PathBuf>,

    /// Enable name-based date inference ("...date" suffixes)
    #[arg(long)]
    date_heuristic: bool,

    /// Write the encoding to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Echo the input before encoding
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    if cli.verbose {
        eprintln!("{} {}", "Input:".dimmed(), input.trim().yellow());
    }

    let query: Query = serde_json::from_str(&input).context("parsing query AST")?;
    let encoding = Encoder::new()
        .with_date_name_heuristic(cli.date_heuristic)
        .encode(&query)?;

    match &cli.output {
        Some(path) => fs::write(path, &encoding)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{encoding}"),
    }
    Ok(())
}
