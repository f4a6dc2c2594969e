//! screener CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "screener",
    version,
    about = "Résumé ranking and timed screening interviews"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank résumés by seniority
    Rank {
        /// Résumé files (.pdf, .txt) or directories containing them
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: table, json, markdown, html
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a timed screening interview on the terminal
    Interview {
        /// Candidate tier: Junior, Mid-Level, Senior
        #[arg(long, conflicts_with = "resume")]
        tier: Option<String>,

        /// Derive the tier by ranking this résumé
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Candidate name shown in the report
        #[arg(long)]
        candidate: Option<String>,

        /// Question bank TOML file (default: built-in Python bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Seed for question selection (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the JSON report
        #[arg(long, default_value = "./screener-results")]
        output: PathBuf,
    },

    /// Render a saved interview report
    Render {
        /// Report JSON written by `screener interview`
        #[arg(long)]
        report: PathBuf,

        /// Output format: markdown, html
        #[arg(long, default_value = "markdown")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("screener=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rank {
            files,
            format,
            config,
        } => commands::rank::execute(files, format, config),
        Commands::Interview {
            tier,
            resume,
            candidate,
            bank,
            seed,
            config,
            output,
        } => commands::interview::execute(commands::interview::InterviewArgs {
            tier,
            resume,
            candidate,
            bank,
            seed,
            config,
            output,
        }),
        Commands::Render {
            report,
            format,
            output,
        } => commands::render::execute(report, format, output),
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
