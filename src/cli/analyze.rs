use std::path::PathBuf;

use clap::Parser;
use rollbook::{Stats, Store};
use tracing::instrument;

use super::terminal::Colorize;

/// Command arguments for `roll analyze`.
#[derive(Debug, Parser, Default)]
#[command(about = "Summarize marks across all records")]
pub struct Analyze {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Analyze {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, file: PathBuf) -> anyhow::Result<()> {
        let store = Store::new(file);

        let Some(stats) = store.analyze()? else {
            println!("No data to analyze");
            return Ok(());
        };

        match self.output {
            OutputFormat::Table => print_stats(&stats),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
        }

        Ok(())
    }
}

/// Renders the analysis block the way the menu and the CLI both show it.
pub(super) fn print_stats(stats: &Stats) {
    let top_names = stats
        .top
        .iter()
        .map(|record| record.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", "Data Analysis".dim());
    println!("Average Marks: {:.2}", stats.average);
    println!("Top Performer: {top_names} ({})", stats.highest);
    println!("Students Below Average: {}", stats.below_average);
    println!(
        "Highest Marks: {} | Lowest Marks: {}",
        stats.highest, stats.lowest
    );
    println!("Total Students: {}", stats.pass_count + stats.fail_count);
    println!("Pass: {} | Fail: {}", stats.pass_count, stats.fail_count);
}
