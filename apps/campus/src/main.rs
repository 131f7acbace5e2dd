//! # Campus
//!
//! Command-line driver for the campus registrar.

use campus::cli::{cmd_grade, cmd_run, cmd_standing};
use campus::logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Campus registrar - enrollment and grading
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario and print every transcript
    Run {
        /// Path to the scenario file
        scenario: PathBuf,
    },

    /// Look up the letter grade for a percentage
    Grade {
        /// Percentage between 0 and 100
        #[arg(allow_hyphen_values = true)]
        percentage: i32,
    },

    /// Look up the academic standing for a GPA
    Standing {
        /// GPA between 0.00 and 4.00
        gpa: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let result = match &cli.command {
        Commands::Run { scenario } => cmd_run(scenario, cli.json),
        Commands::Grade { percentage } => cmd_grade(*percentage, cli.json),
        Commands::Standing { gpa } => cmd_standing(gpa, cli.json),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
