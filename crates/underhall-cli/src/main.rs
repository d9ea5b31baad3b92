mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "underhall",
    version,
    about = "Extract maintenance plans from OCR'd Swedish housing documents"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline over saved recognition responses
    Process {
        /// Saved response JSON file(s), one document per file
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Built-in keyword profile (default: sv)
        #[arg(short, long = "preset", value_name = "NAME")]
        preset: Option<String>,

        /// Custom JSON keyword profile (overrides --preset)
        #[arg(long = "profile", value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write text, tables and maintenance plan per input to this directory
        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Print the tables reconstructed from saved responses
    Tables {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print the normalized plain text of saved responses
    Text {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Repair Swedish OCR artifacts in a piece of text
    Fix {
        text: String,
    },
    /// Manage and inspect keyword profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List built-in profiles
    List,
    /// Print a built-in profile as JSON
    Show {
        /// Preset name (e.g., "sv")
        name: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Process {
            inputs,
            preset,
            profile,
            output,
            out_dir,
        } => commands::process::run(
            &inputs,
            preset.as_deref(),
            profile.as_deref(),
            &output,
            out_dir.as_deref(),
        ),
        Commands::Tables { inputs } => commands::inspect::tables(&inputs),
        Commands::Text { inputs } => commands::inspect::text(&inputs),
        Commands::Fix { text } => commands::inspect::fix(&text),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Show { name } => commands::profiles::show(&name),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
