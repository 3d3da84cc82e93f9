//! Jobslot command-line interface
//!
//! Usage:
//!   jobslot title Senior Web Design          # Title or "nicht verfügbar"
//!   jobslot check Junior Web Analyse         # Exit code 1 when unavailable
//!   jobslot spin                             # Random selection and its title
//!   jobslot import regeln.xlsx --save        # Replace and persist the rules
//!   jobslot rules                            # List the active rules
//!
//! The rule file location comes from `JOBSLOT_RULES_FILE` unless `--rules`
//! is given. Set `RUST_LOG` for diagnostics.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobslot::{Config, Outcome, Selector, Wheels};

#[derive(Parser)]
#[command(name = "jobslot")]
#[command(about = "Compose job titles and manage unavailable combinations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rule file to use instead of the configured one
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the title of a selection, or the unavailability marker
    Title {
        level: String,
        leistung: String,
        disziplin: String,
    },

    /// Check whether a selection is available
    Check {
        level: String,
        leistung: String,
        disziplin: String,
    },

    /// Spin all wheels and show where they land
    Spin,

    /// Import rules from an .xlsx workbook
    Import {
        /// Workbook with a "Liste" and/or "Matrix" sheet
        file: PathBuf,

        /// Write the imported rules to the rule file
        #[arg(long)]
        save: bool,
    },

    /// List the active rules
    Rules,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.rules {
        config = config.with_rules_path(path);
    }
    let selector = Selector::bootstrap(&config);

    match run(cli.command, &selector, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(command: Commands, selector: &Selector, config: &Config) -> jobslot::Result<ExitCode> {
    match command {
        Commands::Title {
            level,
            leistung,
            disziplin,
        } => {
            println!("{}", selector.evaluate(&level, &leistung, &disziplin)?);
        },
        Commands::Check {
            level,
            leistung,
            disziplin,
        } => {
            if let Outcome::Title(title) = selector.evaluate(&level, &leistung, &disziplin)? {
                println!("verfügbar: {}", title);
            } else {
                println!("{}", jobslot::UNAVAILABLE_MARKER);
                return Ok(ExitCode::from(1));
            }
        },
        Commands::Spin => {
            let mut wheels = Wheels::new();
            wheels.spin(selector.catalog(), &mut rand::rng());
            let selection = wheels.selection(selector.catalog())?;
            println!(
                "{} / {} / {}: {}",
                selection.level,
                selection.leistung,
                selection.disziplin,
                selector.evaluate_wheels(&wheels)?
            );
        },
        Commands::Import { file, save } => {
            let bytes = std::fs::read(&file)?;
            let count = selector.import_spreadsheet(&bytes)?;
            println!("{} rules imported from {}", count, file.display());

            if save {
                let path = selector.save_to(config.rules_path())?;
                println!("Saved to {}", path.display());
            }
        },
        Commands::Rules => {
            let rules = selector.rules();
            if rules.is_empty() {
                println!("No rules in {}", config.rules_path().display());
            }
            for rule in rules.iter() {
                println!("{}", rule);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
