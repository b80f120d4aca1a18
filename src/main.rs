use clap::{Parser, Subcommand};
use class_roster::cli::{self, GenerateOptions};
use class_roster::config::MissingStartPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Turn a booking export into per-class instructor rosters")]
#[command(long_about = "Roster - Daily class roster generator

Reads the booking export for tomorrow's classes and writes one styled
roster spreadsheet per class (location + course + start time), bundled
in a single zip ready to upload.

COMMANDS:
  generate  - Booking export (.xlsx) to roster archive (.zip)
  groups    - Show the classes and file names without writing anything
  inspect   - List the rosters inside a generated archive
  config    - Print or write the default configuration

EXAMPLES:
  roster generate export.xlsx                   # writes Rosters.zip
  roster generate export.xlsx -o out/rosters.zip -c roster.yaml
  roster groups export.xlsx
  roster inspect Rosters.zip")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Generate one roster per class and bundle them as a zip.

Rows are grouped by location, course category and start time. The
category and location come from the 'Course Type' column, written as
'<category> (<location>)'. All First Aid & CPR/AED levels share a class.

REQUIRED COLUMNS (sheet 'Main'):
  Start, Course Type (or column M), First name (participant),
  Last name (participant), Course Level (or column BJ)

OPTIONAL COLUMNS:
  Textbook, First Aid Kit

ROWS WITHOUT A START TIME:
  --on-missing-start skip    leave the row out and warn (default)
  --on-missing-start abort   fail the whole run")]
    /// Generate rosters from a booking export
    Generate {
        /// Booking export (.xlsx)
        input: PathBuf,

        /// Output archive path
        #[arg(short, long, default_value = "Rosters.zip")]
        output: PathBuf,

        /// Configuration file (YAML)
        #[arg(short, long, env = "ROSTER_CONFIG")]
        config: Option<PathBuf>,

        /// Policy for rows whose start time is missing or unreadable (skip|abort)
        #[arg(long)]
        on_missing_start: Option<MissingStartPolicy>,

        /// Leave the instruction block off every roster
        #[arg(long)]
        no_static_block: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show classes and file names without generating
    Groups {
        /// Booking export (.xlsx)
        input: PathBuf,

        /// Configuration file (YAML)
        #[arg(short, long, env = "ROSTER_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List the rosters inside an archive
    Inspect {
        /// Roster archive (.zip)
        archive: PathBuf,
    },

    /// Print or write the default configuration
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "class_roster=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Generate { verbose: true, .. });
    init_tracing(verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            on_missing_start,
            no_static_block,
            verbose,
        } => cli::generate(
            input,
            output,
            GenerateOptions {
                config,
                on_missing_start,
                no_static_block,
                verbose,
            },
        ),

        Commands::Groups { input, config } => cli::groups(input, config),

        Commands::Inspect { archive } => cli::inspect(archive),

        Commands::Config { output } => cli::config(output),
    };

    Ok(result?)
}
