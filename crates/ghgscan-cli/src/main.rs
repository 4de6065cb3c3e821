mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ghgscan",
    version,
    about = "Extract greenhouse-gas emission metrics from sustainability report PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one or more reports (PDF or extracted text) for emission metrics
    Scan(commands::scan::ScanArgs),
    /// Print normalized lines with the section each one is read in
    Lines {
        /// Path to a PDF or a text file
        input_file: PathBuf,

        #[command(flatten)]
        profile: commands::ProfileArgs,

        /// Keep the physical layout when extracting PDF text
        #[arg(long)]
        layout: bool,
    },
    /// Inspect and validate scan profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Explain a profile and the rules it drives
    Explain {
        /// Preset name (e.g., "en-cs")
        preset: String,
    },
    /// Print the profile JSON schema with field descriptions and example
    Schema,
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Lines {
            input_file,
            profile,
            layout,
        } => commands::lines::run(&input_file, &profile, layout),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Explain { preset } => commands::profiles::explain(&preset),
            ProfilesAction::Schema => commands::profiles::schema(),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
