use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod report;
mod state;
mod statements;
mod tui;

use statements::{open_session, StatementArgs};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GASTOS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "gastos",
    version,
    long_version = LONG_VERSION,
    about = "Credit-card statement dashboard (PicPay, Inter, Nubank)"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard as plain text
    Report {
        #[command(flatten)]
        statements: StatementArgs,

        /// Include the purchases tables
        #[arg(long)]
        show_tables: bool,

        /// Print the panels as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Interactive terminal dashboard
    Dashboard {
        #[command(flatten)]
        statements: StatementArgs,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.gastos/config.toml
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Report {
            statements,
            show_tables,
            json,
        } => {
            init_tracing(cli.verbose, "warn", false)?;
            let cfg = config::load_config()?;
            let (mut session, outcomes) = open_session(&statements, &cfg);
            for outcome in &outcomes {
                if outcome.is_ok() {
                    eprintln!("{}", outcome.describe());
                } else {
                    eprintln!("error: {}", outcome.describe());
                }
            }

            if show_tables {
                for issuer in session.loaded_issuers() {
                    session.toggle_table(issuer);
                }
            }

            let top = statements.top(&cfg);
            if json {
                let out = report::report_json(&session, top);
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", report::render_report(&session, top, show_tables));
            }
        }

        Command::Dashboard { statements } => {
            init_tracing(cli.verbose, "info", true)?;
            let cfg = config::load_config()?;
            let (session, outcomes) = open_session(&statements, &cfg);
            tui::run_dashboard(session, statements.top(&cfg), &outcomes)?;
        }

        Command::Config { command } => {
            init_tracing(cli.verbose, "warn", false)?;
            match command {
                ConfigCommand::Init => config::init_config()?,
                ConfigCommand::Show => {
                    let p = config::config_path()?;
                    let cfg = config::load_config_from(&p)?;
                    println!("# {}", p.display());
                    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                }
            }
        }
    }

    Ok(())
}

/// Priority: RUST_LOG env var > --verbose flag > `default_level`.
/// The dashboard logs to a file so the TUI screen stays intact.
fn init_tracing(verbose: bool, default_level: &str, to_file: bool) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(default_level)
    };

    let registry = tracing_subscriber::registry().with(filter);
    if to_file {
        let path = state::dashboard_log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
