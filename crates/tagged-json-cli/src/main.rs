//! `tjson` CLI: compact and inspect JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Compact JSON (stdin → stdout)
//! echo '{ "b": 1, "a": [1, 2] }' | tjson compact
//!
//! # Compact from file to file
//! tjson compact -i data.json -o data.min.json
//!
//! # Validate a document
//! tjson check -i data.json
//!
//! # Show size and node counts
//! tjson stats -i data.json
//! ```
//!
//! Object keys come out in lexicographic order, and strings are written back
//! without re-escaping.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use tagged_json::Value;

#[derive(Parser)]
#[command(name = "tjson", version, about = "Tagged JSON CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse JSON and write it back in compact form
    Compact {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse JSON and report whether it is valid
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show byte sizes and node counts
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compact { input, output } => {
            let value = read_value(input.as_deref())?;
            let mut compact = tagged_json::render(&value);
            if output.is_none() {
                compact.push('\n');
            }
            write_output(output.as_deref(), &compact)?;
        }
        Commands::Check { input } => {
            let text = read_joined(input.as_deref())?.0;
            let mut parser = tagged_json::Parser::new(&text);
            let value = parser.parse().context("Failed to parse JSON")?;
            let rest = text[parser.position()..]
                .trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));
            if !rest.is_empty() {
                bail!(
                    "Unexpected content after JSON value at byte {}",
                    text.len() - rest.len()
                );
            }
            println!("valid ({})", value.kind());
        }
        Commands::Stats { input } => {
            let (text, input_bytes) = read_joined(input.as_deref())?;
            let value = tagged_json::parse(&text).context("Failed to parse JSON")?;
            let rendered_bytes = tagged_json::render(&value).len();
            let counts = NodeCounts::of(&value);
            println!("Input size:     {} bytes", input_bytes);
            println!("Compact size:   {} bytes", rendered_bytes);
            println!("Max depth:      {}", counts.max_depth);
            println!("Objects:        {}", counts.objects);
            println!("Arrays:         {}", counts.arrays);
            println!("Scalars:        {}", counts.scalars);
        }
    }

    Ok(())
}

/// Node tallies for the `stats` subcommand.
#[derive(Debug, Default)]
struct NodeCounts {
    objects: usize,
    arrays: usize,
    scalars: usize,
    max_depth: usize,
}

impl NodeCounts {
    fn of(value: &Value) -> Self {
        let mut counts = NodeCounts::default();
        counts.visit(value, 1);
        counts
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        match value {
            Value::Array(items) => {
                self.arrays += 1;
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(map) => {
                self.objects += 1;
                for item in map.values() {
                    self.visit(item, depth + 1);
                }
            }
            _ => self.scalars += 1,
        }
    }
}

fn read_value(path: Option<&str>) -> Result<Value> {
    match path {
        Some(path) => tagged_json::parse_file(path)
            .with_context(|| format!("Failed to parse JSON file: {}", path)),
        None => tagged_json::parse_reader(BufReader::new(io::stdin()))
            .context("Failed to parse JSON from stdin"),
    }
}

/// Read the whole input and join its lines the way `parse_reader` does.
/// Returns the joined text and the number of bytes read.
fn read_joined(path: Option<&str>) -> Result<(String, usize)> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        None => io::read_to_string(io::stdin()).context("Failed to read from stdin")?,
    };
    Ok((text.lines().collect(), text.len()))
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
