//! Command-line interface for markup
//! This binary parses and inspects markup files.
//!
//! Usage:
//!   markup parse <path> [--tabwidth N] [--subdoc NAME]... [--format sexpr|json|yaml]
//!   markup check <path>                                    - Validate without printing

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};

use markup::{parse_bytes, MarkupOptions};

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("markup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and inspecting markup files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print the resulting element tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the markup file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("tabwidth")
                        .long("tabwidth")
                        .help("Number of spaces a tab expands to")
                        .default_value("8"),
                )
                .arg(
                    Arg::new("subdoc")
                        .long("subdoc")
                        .help("Tag name opened via \\name{...} that should parse as a nested document")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["sexpr", "json", "yaml"])
                        .default_value("sexpr"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a file without printing its tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the markup file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("check", sub)) => handle_check_command(sub),
        _ => unreachable!(),
    }
}

fn build_options(sub: &clap::ArgMatches) -> MarkupOptions {
    let tabwidth = sub
        .get_one::<String>("tabwidth")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(8);
    let subdocs: HashSet<String> = sub
        .get_many::<String>("subdoc")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    MarkupOptions { subdocs, tabwidth }
}

fn read_input(path: &str) -> Result<Vec<u8>, ExitCode> {
    let file_path = PathBuf::from(path);
    std::fs::read(&file_path).map_err(|e| {
        eprintln!("Error reading {}: {}", file_path.display(), e);
        ExitCode::FAILURE
    })
}

fn handle_parse_command(sub: &clap::ArgMatches) -> ExitCode {
    let path = sub.get_one::<String>("path").unwrap();
    let format = sub.get_one::<String>("format").unwrap();
    let options = build_options(sub);

    let input = match read_input(path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let doc = match parse_bytes(&input, &options) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let formatted = match format.as_str() {
        "sexpr" => doc.to_sexpr_string(),
        "json" => match serde_json::to_string_pretty(&doc) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error formatting JSON: {}", e);
                return ExitCode::FAILURE;
            }
        },
        "yaml" => match serde_yaml::to_string(&doc) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error formatting YAML: {}", e);
                return ExitCode::FAILURE;
            }
        },
        other => {
            eprintln!("Format '{}' not supported", other);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", formatted);
    ExitCode::SUCCESS
}

fn handle_check_command(sub: &clap::ArgMatches) -> ExitCode {
    let path = sub.get_one::<String>("path").unwrap();
    let input = match read_input(path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match parse_bytes(&input, &MarkupOptions::default()) {
        Ok(_) => {
            println!("{}: ok", path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", path, e);
            ExitCode::FAILURE
        }
    }
}
