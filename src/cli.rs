use std::path::{Path, PathBuf};

mod analyze;
mod list;
mod menu;
mod terminal;

use analyze::Analyze;
use clap::ArgAction;
use list::List;
use menu::Menu;
use rollbook::{Changes, Draft, Store};
use terminal::Colorize;
use tracing::instrument;

/// The configuration file looked up in the working directory.
const CONFIG_FILE: &str = "rollbook.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path of the backing record file (overrides the config file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let file = self
            .file
            .unwrap_or_else(|| load_config().data_file().to_path_buf());

        self.command
            .unwrap_or_else(|| Command::Menu(Menu::default()))
            .run(file)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the configuration from the working directory, falling back to the
/// defaults if the file is missing or unreadable.
fn load_config() -> rollbook::Config {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return rollbook::Config::default();
    }
    rollbook::Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        rollbook::Config::default()
    })
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu(Menu),

    /// Add a new student record
    Add(Add),

    /// List every student record
    List(List),

    /// Find students by roll number or name
    Search(Search),

    /// Update fields of an existing record
    ///
    /// Omitted fields keep their stored values.
    Update(Update),

    /// Delete a student record
    Delete(Delete),

    /// Summarize marks across all records
    Analyze(Analyze),

    /// Show or modify configuration settings
    Config(Config),
}

impl Command {
    fn run(self, file: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Menu(command) => command.run(file)?,
            Self::Add(command) => command.run(file)?,
            Self::List(command) => command.run(file)?,
            Self::Search(command) => command.run(file)?,
            Self::Update(command) => command.run(file)?,
            Self::Delete(command) => command.run(file)?,
            Self::Analyze(command) => command.run(file)?,
            Self::Config(command) => command.run()?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// Roll number of the new student
    id: String,

    /// Full name (letters and spaces)
    name: String,

    /// Age in years
    age: String,

    /// Letter grade, A-F (case-insensitive)
    grade: String,

    /// Marks out of 100
    marks: String,
}

impl Add {
    #[instrument]
    fn run(self, file: PathBuf) -> anyhow::Result<()> {
        let store = Store::new(file);
        let draft = Draft {
            id: self.id,
            name: self.name,
            age: self.age,
            grade: self.grade,
            marks: self.marks,
        };

        let record = store.add(&draft)?;

        println!(
            "{}",
            format!("Added student {} ({})", record.name, record.id).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Search {
    /// Roll number or name fragment to look for
    query: String,
}

impl Search {
    #[instrument]
    fn run(self, file: PathBuf) -> anyhow::Result<()> {
        let store = Store::new(file);
        let results = store.search(&self.query)?;

        if results.is_empty() {
            println!("No record found");
            return Ok(());
        }

        list::print_table(&results, false);
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Update {
    /// Roll number of the student to update
    id: String,

    /// New name
    #[clap(long, short)]
    name: Option<String>,

    /// New age
    #[clap(long, short)]
    age: Option<String>,

    /// New grade
    #[clap(long, short)]
    grade: Option<String>,

    /// New marks
    #[clap(long, short)]
    marks: Option<String>,
}

impl Update {
    #[instrument]
    fn run(self, file: PathBuf) -> anyhow::Result<()> {
        if self.name.is_none()
            && self.age.is_none()
            && self.grade.is_none()
            && self.marks.is_none()
        {
            anyhow::bail!("nothing to update: pass at least one of --name, --age, --grade, --marks");
        }

        let store = Store::new(file);
        let changes = Changes {
            name: self.name,
            age: self.age,
            grade: self.grade,
            marks: self.marks,
        };

        let record = store.update(&self.id, &changes)?;

        println!("{}", format!("Updated student {}", record.id).success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// Roll number of the student to delete
    id: String,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Delete {
    #[instrument]
    fn run(self, file: PathBuf) -> anyhow::Result<()> {
        let store = Store::new(file);

        let records = store.read_all()?;
        let Some(record) = records.iter().find(|record| record.id == self.id) else {
            anyhow::bail!("Student {} not found", self.id);
        };

        if !self.yes {
            eprint!("Delete {} ({})? (y/N) ", record.name, record.id);
            use std::io::{self, BufRead};
            let stdin = io::stdin();
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
            if !line.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled");
                std::process::exit(130);
            }
        }

        store.delete(&self.id)?;

        println!("{}", format!("Deleted student {}", self.id).success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Config {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let config_path = Path::new(CONFIG_FILE);

        match self.command {
            ConfigCommand::Show => {
                let config = if config_path.exists() {
                    rollbook::Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))?
                } else {
                    rollbook::Config::default()
                };

                println!("Configuration:");
                println!("  data_file: {}", config.data_file().display());
            }
            ConfigCommand::Set { key, value } => {
                let mut config = if config_path.exists() {
                    rollbook::Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))?
                } else {
                    rollbook::Config::default()
                };

                match key.as_str() {
                    "data_file" => {
                        config.set_data_file(PathBuf::from(value));
                        config
                            .save(config_path)
                            .map_err(|e| anyhow::anyhow!("{e}"))?;

                        println!(
                            "{}",
                            format!("data_file set to {}", config.data_file().display()).success()
                        );
                    }
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Unknown configuration key: '{key}'\nSupported keys: data_file",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
