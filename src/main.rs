mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use schedule_core::config::ScheduleConfig;
use schedule_core::dataset::Dataset;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schedule-builder")]
#[command(about = "Pick course sessions from a checklist and export them as an .ics calendar")]
struct Cli {
    /// Use this config file instead of ~/.config/schedule-builder/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Course session data (JSON), overrides `data_path` from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the course checklist
    Courses,
    /// Build a calendar from the selected courses
    Build {
        /// Select a course (repeatable)
        #[arg(short, long = "course")]
        courses: Vec<String>,

        /// Select every course in a checklist group (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<String>,

        /// Select every course
        #[arg(long)]
        all: bool,

        /// Tick courses in an interactive checklist
        #[arg(short, long)]
        interactive: bool,

        /// Output file (default: `output_path` from the config)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the calendar instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Show config and data paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.data)?;

    match cli.command {
        Commands::Courses => {
            let dataset = load_dataset(&config)?;
            commands::courses::run(&config, &dataset)
        }
        Commands::Build {
            courses,
            groups,
            all,
            interactive,
            output,
            stdout,
        } => {
            let dataset = load_dataset(&config)?;
            let args = commands::build::BuildArgs {
                courses,
                groups,
                all,
                interactive,
                output,
                stdout,
            };
            commands::build::run(&config, &dataset, args).await
        }
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}

/// Log to stderr. `RUST_LOG` applies unless -v is given.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&std::path::Path>, data: Option<PathBuf>) -> Result<ScheduleConfig> {
    let mut config = match path {
        Some(path) => ScheduleConfig::load_from(path)?,
        None => ScheduleConfig::load()?,
    };

    if let Some(data) = data {
        config.data_path = data;
    }

    Ok(config)
}

fn load_dataset(config: &ScheduleConfig) -> Result<Dataset> {
    let path = config.data_path();
    let dataset = Dataset::load(&path)?;

    if dataset.is_empty() {
        anyhow::bail!(
            "No course sessions found in {}.\n\n\
            Point schedule-builder at your data with:\n  \
            schedule-builder --data <file.json> courses",
            path.display()
        );
    }

    Ok(dataset)
}
