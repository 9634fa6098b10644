//! cellgrid - load, edit, and print a sheet of formula cells

mod error;

use anyhow::Context;
use cellgrid_core::{Document, EditOutcome, LoadOutcome};
use cellgrid_engine::engine::BUILTIN_NAMES;
use error::CliError;
use log::debug;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet file to load (.json)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <ADDR=EXPR>     Set a cell expression (can be repeated)");
    eprintln!("  -d, --delete-row <N>      Delete every cell on row N");
    eprintln!("  --delete-column <COL>     Delete every cell in column COL");
    eprintln!("  -o, --output <FILE>       Save the sheet instead of printing it");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Functions: {}", BUILTIN_NAMES.join(", "));
    eprintln!("Set RUST_LOG=debug to trace recalculation.");
}

/// A change applied to the sheet, in command-line order.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Set { address: String, expression: String },
    DeleteRow(usize),
    DeleteColumn(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    file_path: Option<PathBuf>,
    actions: Vec<Action>,
    output_file: Option<PathBuf>,
}

/// Parse arguments (without the program name). `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, CliError> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| CliError::MissingValue(arg.to_string()))
        };
        match arg {
            "-h" | "--help" => return Ok(None),
            "-s" | "--set" => {
                let assignment = value()?;
                let (address, expression) = assignment
                    .split_once('=')
                    .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
                options.actions.push(Action::Set {
                    address: address.to_string(),
                    expression: expression.to_string(),
                });
            }
            "-d" | "--delete-row" => {
                let row = value()?;
                let row_number = row
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| CliError::InvalidRow(row.clone()))?;
                options.actions.push(Action::DeleteRow(row_number));
            }
            "--delete-column" => {
                options.actions.push(Action::DeleteColumn(value()?));
            }
            "-o" | "--output" => {
                options.output_file = Some(PathBuf::from(value()?));
            }
            other if other.starts_with('-') => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => {
                if options.file_path.is_some() {
                    return Err(CliError::UnexpectedArgument(other.to_string()));
                }
                options.file_path = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    Ok(Some(options))
}

fn run(options: Options) -> anyhow::Result<()> {
    let mut doc = Document::new();
    if let Some(path) = &options.file_path {
        let outcome = doc
            .load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        if let LoadOutcome::CyclesDetected(cells) = outcome {
            let names: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            eprintln!(
                "Warning: circular references in {}; sheet not recalculated",
                names.join(", ")
            );
        }
    }

    for action in options.actions {
        debug!("applying {:?}", action);
        match action {
            Action::Set {
                address,
                expression,
            } => {
                if let EditOutcome::CycleDetected(_) = doc.set_expression(&address, &expression)? {
                    eprintln!("Warning: circular reference at {}", address.trim());
                }
            }
            Action::DeleteRow(row_number) => {
                doc.on_row_deleted(row_number);
            }
            Action::DeleteColumn(column) => {
                doc.on_column_deleted(&column)?;
            }
        }
    }

    if let Some(output_path) = options.output_file {
        doc.save_to_file(&output_path)
            .with_context(|| format!("Failed to save {}", output_path.display()))?;
        println!("Saved to {}", output_path.display());
        return Ok(());
    }

    for cell_ref in doc.cell_refs() {
        let cell = doc.get_or_create(&cell_ref);
        if cell.is_empty() {
            continue;
        }
        println!(
            "{}\t{}\t{}",
            cell_ref,
            cell.expression,
            doc.get_cell_display(&cell_ref)
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
