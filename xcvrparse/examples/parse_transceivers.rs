//! Transceiver Parsing Example
//!
//! Parses captured NX-OS "show interface transceiver" output and prints the
//! result as JSON, followed by any diagnostics.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example parse_transceivers -- --file xcvr.txt
//! ssh switch1 'show interface transceiver' | cargo run --example parse_transceivers
//! ```

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use xcvrparse::{FieldTable, ShowInterfaceTransceiver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let raw = match &args.file {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let mut table = FieldTable::nxos_transceiver();
    for (name, label) in &args.extra_fields {
        table = table.with_field(name, label);
    }
    let parser = ShowInterfaceTransceiver::with_table(table)?;

    let outcome = parser.parse_bytes_checked(&raw)?;

    println!("{}", serde_json::to_string_pretty(&outcome.result)?);

    if !outcome.is_clean() {
        eprintln!("\n--- Diagnostics ---");
        for diagnostic in &outcome.diagnostics {
            eprintln!("  {}", diagnostic);
        }
        if args.strict {
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Simple argument parser
struct Args {
    file: Option<PathBuf>,
    extra_fields: Vec<(String, String)>,
    strict: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut file = None;
        let mut extra_fields = Vec::new();
        let mut strict = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--file" | "-f" => {
                    i += 1;
                    if i < args.len() {
                        file = Some(PathBuf::from(&args[i]));
                    }
                }
                "--field" => {
                    i += 1;
                    if i < args.len() {
                        if let Some((name, label)) = args[i].split_once('=') {
                            extra_fields.push((name.to_string(), label.to_string()));
                        }
                    }
                }
                "--strict" => strict = true,
                "--help" | "-h" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            file,
            extra_fields,
            strict,
        }
    }

    fn print_help() {
        println!(
            r#"xcvrparse transceiver parsing example

Parses captured NX-OS "show interface transceiver" output into JSON.

USAGE:
    cargo run --example parse_transceivers -- [OPTIONS]

OPTIONS:
    -f, --file <PATH>        Read output from a file [default: stdin]
    --field <NAME=LABEL>     Collect an extra field, e.g. revision="revision is"
    --strict                 Exit with status 2 when diagnostics are reported
    -h, --help               Print this help message

EXAMPLES:
    cargo run --example parse_transceivers -- --file xcvr.txt --field "revision=revision is"

    # With debug logging
    RUST_LOG=debug cargo run --example parse_transceivers -- --file xcvr.txt
"#
        );
    }
}
