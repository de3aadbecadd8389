//! Catalog CLI
//!
//! Validates catalog resources.
//!
//! Usage:
//!   catalog validate ./task/maven/0.1 ./task/npm/0.1
//!   catalog validate ./task/maven --versioning git
//!   catalog validate --all ./catalog --verbose

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use catalog_validator::{discover, CatalogConfig, CatalogPath, CatalogValidator, VersioningPolicy};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Validate Tekton catalog resources")]
struct Cli {
    /// Configuration file (defaults: catalog.toml, .catalog.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more resource directories
    Validate {
        /// Resource directories (<kind>/<name>/<version> or <kind>/<name>)
        #[arg(required_unless_present = "all")]
        paths: Vec<PathBuf>,

        /// How resource versions are addressed
        #[arg(long, value_enum)]
        versioning: Option<VersioningPolicy>,

        /// Validate every resource found under this catalog root
        #[arg(long, value_name = "ROOT")]
        all: Option<PathBuf>,

        /// Print every finding, not just the first failing file
        #[arg(short, long)]
        verbose: bool,

        /// Report format; json prints the full report to stdout
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CatalogConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Validate {
            paths,
            versioning,
            all,
            verbose,
            output,
        } => {
            let mut inputs: Vec<CatalogPath> = paths.into_iter().map(CatalogPath::from).collect();
            if let Some(root) = all {
                inputs.extend(discover::resource_paths(&root)?.into_iter().map(CatalogPath::from));
            }

            let validator = CatalogValidator::from_config(&config, versioning);
            let report = validator.run(&inputs);

            if let OutputFormat::Json = output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if verbose {
                eprint!("{}", report.render_details());
            }

            match report.first_failure() {
                Some(failed) => Err(anyhow!("{} failed validation", failed.report_path().display())),
                None => Ok(()),
            }
        }
    }
}
