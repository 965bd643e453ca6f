mod interactive;
mod render;

pub use interactive::run_session;
pub use render::Renderer;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::application::{Action, LedgerReport, Session, handle, parse_amount};
use crate::io::{export_breakdown_csv, export_report_json};

/// Budget Visualizer - monthly subscription tracker
#[derive(Parser)]
#[command(name = "budget-visualizer")]
#[command(about = "Track monthly subscriptions and see where the budget goes")]
#[command(version)]
pub struct Cli {
    /// Currency symbol shown in front of amounts
    #[arg(
        long,
        global = true,
        env = "BUDGET_VISUALIZER_CURRENCY",
        default_value = "$"
    )]
    pub currency: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session reading commands from stdin
    Session,

    /// Show totals and the breakdown for a list of subscriptions
    Report {
        /// Subscription as NAME=COST (repeatable, e.g. -s Netflix=15.49)
        #[arg(short = 's', long = "sub", value_name = "NAME=COST")]
        subscriptions: Vec<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export the breakdown for charting
    Export {
        /// Subscription as NAME=COST (repeatable)
        #[arg(short = 's', long = "sub", value_name = "NAME=COST")]
        subscriptions: Vec<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let renderer = Renderer::new(self.currency.as_str());

        match self.command {
            Commands::Session => {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                let session = run_session(Session::new(), stdin.lock(), &mut stdout, &renderer)?;
                info!(entries = session.ledger().len(), "session ended");
            }

            Commands::Report {
                subscriptions,
                format,
            } => {
                let session = session_from_args(&subscriptions)?;
                let report = LedgerReport::build(session.ledger());
                let mut stdout = io::stdout().lock();

                match format.as_str() {
                    "json" => export_report_json(&report, &mut stdout)?,
                    "csv" => {
                        export_breakdown_csv(session.ledger(), &mut stdout)?;
                    }
                    "table" => renderer.write_report(&report, &mut stdout)?,
                    other => bail!("Unknown format '{}'. Use table, json or csv", other),
                }
            }

            Commands::Export {
                subscriptions,
                format,
                output,
            } => {
                let session = session_from_args(&subscriptions)?;

                let writer: Box<dyn Write> = match &output {
                    Some(path) => Box::new(BufWriter::new(
                        File::create(path)
                            .with_context(|| format!("Failed to create output file: {}", path))?,
                    )),
                    None => Box::new(io::stdout().lock()),
                };

                match format.as_str() {
                    "csv" => {
                        let count = export_breakdown_csv(session.ledger(), writer)?;
                        eprintln!("Exported {} subscriptions", count);
                    }
                    "json" => {
                        let report = LedgerReport::build(session.ledger());
                        export_report_json(&report, writer)?;
                        eprintln!("Exported report for {} subscriptions", report.count);
                    }
                    other => bail!("Unknown format '{}'. Use csv or json", other),
                }
            }
        }

        Ok(())
    }
}

/// Build a session by adding each `NAME=COST` argument in order.
pub fn session_from_args(args: &[String]) -> Result<Session> {
    let mut session = Session::new();
    for arg in args {
        let (name, cost) = arg
            .rsplit_once('=')
            .with_context(|| format!("Invalid subscription '{}'. Use NAME=COST", arg))?;
        let cost_cents = parse_amount(cost)?;

        let (next, outcome) = handle(
            session,
            Action::Add {
                name: name.to_string(),
                cost_cents,
            },
        );
        outcome.with_context(|| format!("Cannot add '{}'", arg))?;
        session = next;
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_session_from_args() {
        let session = session_from_args(&args(&["Netflix=15.49", "Spotify=$9.99"])).unwrap();
        assert_eq!(session.ledger().total(), 2548);
    }

    #[test]
    fn test_session_from_args_rejects_duplicates() {
        let err = session_from_args(&args(&["Netflix=15.49", "netflix=5"])).unwrap_err();
        assert!(format!("{:#}", err).contains("already exists"));
    }

    #[test]
    fn test_session_from_args_requires_separator() {
        assert!(session_from_args(&args(&["Netflix 15.49"])).is_err());
    }

    #[test]
    fn test_cli_parses_report_command() {
        let cli = Cli::try_parse_from([
            "budget-visualizer",
            "report",
            "-s",
            "Netflix=15.49",
            "--sub",
            "Spotify=9.99",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                subscriptions,
                format,
            } => {
                assert_eq!(subscriptions.len(), 2);
                assert_eq!(format, "json");
            }
            _ => panic!("expected report command"),
        }
    }
}
