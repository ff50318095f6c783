//! The interactive menu front-end.
//!
//! A select-driven loop over the store operations. Validation failures are
//! printed and the loop continues; only I/O failures abort.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use rollbook::{Changes, Draft, Record, Store, StoreError};
use tracing::instrument;

use super::{analyze, terminal::Colorize};

/// Command arguments for `roll menu`.
#[derive(Debug, clap::Parser, Default)]
#[command(about = "Run the interactive menu")]
pub struct Menu {}

const ITEMS: &[&str] = &[
    "Add student",
    "View all students",
    "Search",
    "Update student",
    "Delete student",
    "Analyze data",
    "Exit",
];

impl Menu {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, file: PathBuf) -> anyhow::Result<()> {
        let store = Store::new(file);

        loop {
            println!();
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Student Records")
                .items(ITEMS)
                .default(0)
                .interact()?;

            match choice {
                0 => add(&store)?,
                1 => view(&store)?,
                2 => search(&store)?,
                3 => update(&store)?,
                4 => delete(&store)?,
                5 => analyze_data(&store)?,
                _ => break,
            }
        }

        Ok(())
    }
}

fn add(store: &Store) -> anyhow::Result<()> {
    let draft = Draft {
        id: prompt("Roll number")?,
        name: prompt("Name")?,
        age: prompt("Age")?,
        grade: prompt("Grade (A-F)")?,
        marks: prompt("Marks (0-100)")?,
    };

    match store.add(&draft) {
        Ok(record) => println!("{}", format!("Added student {}", record.id).success()),
        Err(StoreError::Io(e)) => return Err(e.into()),
        Err(e) => println!("{}", e.to_string().error()),
    }
    Ok(())
}

fn view(store: &Store) -> anyhow::Result<()> {
    let records = store.read_all()?;
    if records.is_empty() {
        println!("No records found");
        return Ok(());
    }

    for record in &records {
        show(record);
    }
    println!("Total students: {}", records.len());
    Ok(())
}

fn search(store: &Store) -> anyhow::Result<()> {
    let query = prompt("Roll number or name")?;

    let results = store.search(&query)?;
    if results.is_empty() {
        println!("{}", "No record found".error());
        return Ok(());
    }

    for record in &results {
        show(record);
    }
    Ok(())
}

fn update(store: &Store) -> anyhow::Result<()> {
    let id = prompt("Roll number to update")?;
    let id = id.trim();

    let records = store.read_all()?;
    let Some(current) = records.iter().find(|record| record.id == id) else {
        println!("{}", "ID not found".error());
        return Ok(());
    };

    println!("Current record:");
    show(current);

    let changes = Changes {
        name: optional(prompt_optional("New name (blank keeps current)")?),
        age: optional(prompt_optional("New age (blank keeps current)")?),
        grade: optional(prompt_optional("New grade (blank keeps current)")?),
        marks: optional(prompt_optional("New marks (blank keeps current)")?),
    };

    match store.update(id, &changes) {
        Ok(record) => println!("{}", format!("Updated student {}", record.id).success()),
        Err(StoreError::Io(e)) => return Err(e.into()),
        Err(e) => println!("{}", e.to_string().error()),
    }
    Ok(())
}

fn delete(store: &Store) -> anyhow::Result<()> {
    let id = prompt("Roll number to delete")?;
    let id = id.trim();

    let records = store.read_all()?;
    let Some(record) = records.iter().find(|record| record.id == id) else {
        println!("{}", "ID not found".error());
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {} ({})?", record.name, record.id))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Deletion cancelled");
        return Ok(());
    }

    match store.delete(id) {
        Ok(()) => println!("{}", format!("Deleted student {id}").success()),
        Err(StoreError::Io(e)) => return Err(e.into()),
        Err(e) => println!("{}", e.to_string().error()),
    }
    Ok(())
}

fn analyze_data(store: &Store) -> anyhow::Result<()> {
    match store.analyze()? {
        Some(stats) => analyze::print_stats(&stats),
        None => println!("No data to analyze"),
    }
    Ok(())
}

fn show(record: &Record) {
    println!(
        "ID: {} | Name: {} | Age: {} | Grade: {} | Marks: {}",
        record.id, record.name, record.age, record.grade, record.marks
    );
}

fn prompt(label: &str) -> Result<String, dialoguer::Error> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .interact_text()
}

fn prompt_optional(label: &str) -> Result<String, dialoguer::Error> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
}

/// Maps blank input to "keep the stored value".
fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
