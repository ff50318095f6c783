use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rollbook::{Record, Store};
use tracing::instrument;

/// Command arguments for `roll list`.
#[derive(Debug, Parser, Default)]
#[command(about = "List every student record")]
pub struct List {
    /// Output format (default: table)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, file: PathBuf) -> anyhow::Result<()> {
        let store = Store::new(file);
        let records = store.read_all()?;

        if records.is_empty() {
            println!("No records found");
            return Ok(());
        }

        match self.output {
            OutputFormat::Table => {
                print_table(&records, self.quiet);
                if !self.quiet {
                    println!();
                    println!("Total students: {}", records.len());
                }
            }
            OutputFormat::Json => print_json(&records)?,
            OutputFormat::Csv => print_csv(&records, self.quiet),
        }

        Ok(())
    }
}

/// Renders records as an aligned table, or as tab-separated rows in quiet
/// mode.
pub(super) fn print_table(records: &[Record], quiet: bool) {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|record| {
            [
                record.id.clone(),
                record.name.clone(),
                record.age.to_string(),
                record.grade.to_string(),
                record.marks.to_string(),
            ]
        })
        .collect();

    if quiet {
        for row in &rows {
            println!("{}", row.join("\t"));
        }
        return;
    }

    let headers = ["ID", "NAME", "AGE", "GRADE", "MARKS"];

    // Determine column widths for alignment.
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    for (header, width) in headers.iter().zip(&widths) {
        print!("{header:<width$}  ");
    }
    println!();

    for width in &widths {
        print!("{:-<width$}  ", "");
    }
    println!();

    for row in &rows {
        for (value, width) in row.iter().zip(&widths) {
            print!("{value:<width$}  ");
        }
        println!();
    }
}

fn print_json(records: &[Record]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), records)
        .context("failed to render json output")?;
    println!();
    Ok(())
}

fn print_csv(records: &[Record], quiet: bool) {
    if !quiet {
        println!("id,name,age,grade,marks");
    }
    for record in records {
        println!("{record}");
    }
}
