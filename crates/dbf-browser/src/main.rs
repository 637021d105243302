use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dbf_kit::models::catalog::{build_catalog, render_catalog};
use dbf_kit::models::export::{ExportConfig, ExportFormat, export_directory, export_table};
use dbf_kit::models::table::{ReadConfig, read_table};

/// Browse, decode and export legacy DBF tables
#[derive(Parser)]
#[command(name = "dbf-browser", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize every table in a directory
    Catalog {
        dir: PathBuf,
        /// Emit JSON summaries instead of the text pane
        #[arg(long)]
        json: bool,
    },
    /// Print the full decoded grid of one table
    View {
        file: PathBuf,
        /// Maximum number of records to load
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Export one table next to its source file
    Export {
        file: PathBuf,
        #[arg(long, value_enum)]
        format: FormatArg,
    },
    /// Export every table in a directory, continuing past failures
    ExportAll {
        dir: PathBuf,
        #[arg(long, value_enum)]
        format: FormatArg,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog { dir, json } => {
            let entries = build_catalog(&dir)?;
            if json {
                let summaries: Vec<_> = entries
                    .iter()
                    .filter_map(|entry| entry.outcome.as_ref().ok())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", render_catalog(&entries));
            }
        }
        Command::View { file, limit } => {
            let data = read_table(&file, &ReadConfig { max_records: limit })?;
            let df = data.to_dataframe()?;
            println!("{df}");
        }
        Command::Export { file, format } => {
            let result = export_table(&file, format.into(), &ExportConfig::default())?;
            println!(
                "Exported {} records to {}",
                result.records_exported,
                result.output_path.display()
            );
        }
        Command::ExportAll { dir, format } => {
            let results = export_directory(&dir, format.into(), &ExportConfig::default())?;
            let mut failures = 0usize;
            for (name, outcome) in &results {
                match outcome {
                    Ok(result) => println!("{name} -> {}", result.output_path.display()),
                    Err(e) => {
                        failures += 1;
                        eprintln!("Error exporting {name}: {e}");
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} of {} exports failed", results.len());
            }
        }
    }

    Ok(())
}
