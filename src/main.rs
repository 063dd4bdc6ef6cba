//! ads-audit: advertising account audit tool
//!
//! Scores account bundles against a fixed check catalog and writes JSON
//! reports with quick wins and a phased action plan.

#![allow(clippy::needless_pass_by_value)]

use std::io;
use std::path::PathBuf;

use ads_audit::{
    cli,
    config::{load_or_default, AuditConfig, OutputConfig},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ads-audit")]
#[command(version)]
#[command(about = "Advertising account audit tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Audit completed (and every account met --min-score)
    1  At least one account scored below --min-score
    3  Error occurred

EXAMPLES:
    # Audit one account, JSON to stdout
    ads-audit audit acme.json

    # Audit with a digest on stderr and a score gate for CI
    ads-audit audit acme.json -O acme-report.json --summary --min-score 60

    # Audit a folder of accounts into reports/<account>/<date>.json
    ads-audit batch bundles/*.json --out-dir reports")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `audit` subcommand
#[derive(Parser)]
struct AuditArgs {
    /// Path to the account bundle (JSON)
    bundle: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Write `<dir>/<account>/<date>.json` instead of stdout
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Run date recorded in the report (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Exit with code 1 if the health score is below this value
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    min_score: Option<u32>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Print a human-readable digest to stderr
    #[arg(long)]
    summary: bool,
}

/// Arguments for the `batch` subcommand
#[derive(Parser)]
struct BatchArgs {
    /// Account bundles to audit
    #[arg(required = true)]
    bundles: Vec<PathBuf>,

    /// Report directory (`<dir>/<account>/<date>.json`)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Run date recorded in the reports (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Exit with code 1 if any health score is below this value
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    min_score: Option<u32>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Print a human-readable digest per account to stderr
    #[arg(long)]
    summary: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single account bundle
    Audit(AuditArgs),

    /// Audit many account bundles in parallel
    Batch(BatchArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (defaults merged with the file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example config file
    Init {
        /// Target file (defaults to ./.ads-audit.yaml)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },
}

/// Load the config file and layer the CLI output options on top
fn effective_config(
    cli_config: Option<&std::path::Path>,
    out_dir: Option<PathBuf>,
    min_score: Option<u32>,
    compact: bool,
) -> AuditConfig {
    let (mut config, loaded_from) = load_or_default(cli_config);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    config.merge_output(&OutputConfig {
        out_dir,
        pretty: !compact,
        min_score,
    });
    config
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Audit(args) => {
            let config = effective_config(
                cli.config.as_deref(),
                args.out_dir,
                args.min_score,
                args.compact,
            );
            let command = cli::AuditCommand {
                bundle_path: args.bundle,
                output_file: args.output_file,
                date: args.date.unwrap_or_else(today),
                summary: args.summary,
                no_color: cli.no_color,
                quiet: cli.quiet,
            };
            let exit_code = cli::run_audit(&config, command)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Batch(args) => {
            let config = effective_config(
                cli.config.as_deref(),
                args.out_dir,
                args.min_score,
                args.compact,
            );
            let command = cli::BatchCommand {
                bundle_paths: args.bundles,
                date: args.date.unwrap_or_else(today),
                summary: args.summary,
                no_color: cli.no_color,
                quiet: cli.quiet,
            };
            let exit_code = cli::run_batch(&config, command)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "ads-audit", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            match cli::write_schema(output.as_deref())? {
                Some(schema) => println!("{schema}"),
                None => {
                    if let Some(path) = &output {
                        eprintln!("Schema written to {}", path.display());
                    }
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", cli::show_config(cli.config.as_deref())?);
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("{}", cli::describe_config_paths(cli.config.as_deref()));
                Ok(())
            }
            ConfigAction::Init { output } => {
                let target = match output {
                    Some(path) => path,
                    None => std::env::current_dir()
                        .context("cannot determine current directory")?
                        .join(".ads-audit.yaml"),
                };
                let written = cli::init_config(&target)?;
                eprintln!("Created {}", written.display());
                Ok(())
            }
        },
    }
}
