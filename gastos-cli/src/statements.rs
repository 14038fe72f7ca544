//! Loading statement files into the session, shared by `report` and `dashboard`.

use clap::Args;
use gastos_core::Issuer;
use gastos_finance::Session;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::Config;

#[derive(Args, Debug, Clone, Default)]
pub struct StatementArgs {
    /// PicPay statement CSV
    #[arg(long)]
    pub picpay: Option<PathBuf>,

    /// Inter statement CSV
    #[arg(long)]
    pub inter: Option<PathBuf>,

    /// Nubank statement CSV
    #[arg(long)]
    pub nubank: Option<PathBuf>,

    /// Monthly income in R$ (default from config, else 5000)
    #[arg(long)]
    pub income: Option<f64>,

    /// Number of purchases in the ranking (default from config, else 10)
    #[arg(long)]
    pub top: Option<usize>,
}

impl StatementArgs {
    fn flag_path(&self, issuer: Issuer) -> Option<&Path> {
        match issuer {
            Issuer::PicPay => self.picpay.as_deref(),
            Issuer::Inter => self.inter.as_deref(),
            Issuer::Nubank => self.nubank.as_deref(),
        }
    }

    /// Statement to load per issuer: flag first, then config
    pub fn sources<'a>(&'a self, cfg: &'a Config) -> Vec<(Issuer, &'a Path)> {
        Issuer::ALL
            .into_iter()
            .filter_map(|issuer| {
                self.flag_path(issuer)
                    .or_else(|| cfg.statements.path(issuer))
                    .map(|p| (issuer, p))
            })
            .collect()
    }

    pub fn income(&self, cfg: &Config) -> f64 {
        self.income.unwrap_or(cfg.dashboard.income)
    }

    pub fn top(&self, cfg: &Config) -> usize {
        self.top.unwrap_or(cfg.dashboard.top)
    }
}

/// Result of one load, phrased for the user
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded {
        issuer: Issuer,
        rows: usize,
    },
    Failed {
        issuer: Issuer,
        message: String,
        hint: &'static str,
    },
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            LoadOutcome::Loaded { issuer, rows } => {
                format!("{} statement imported ({} purchases).", issuer, rows)
            }
            LoadOutcome::Failed {
                issuer,
                message,
                hint,
            } => format!("Error processing the {} statement: {}. {}", issuer, message, hint),
        }
    }
}

/// Load one statement file. A failure leaves the issuer's table as it was.
pub fn load_into(session: &mut Session, issuer: Issuer, path: &Path) -> LoadOutcome {
    match session.load_file(issuer, path) {
        Ok(table) => LoadOutcome::Loaded {
            issuer,
            rows: table.len(),
        },
        Err(err) => {
            warn!(issuer = issuer.code(), path = %path.display(), error = %err, "statement load failed");
            LoadOutcome::Failed {
                issuer,
                message: format!("{} ({})", err, path.display()),
                hint: err.hint(),
            }
        }
    }
}

/// Build a session from flags and config, loading every configured statement
pub fn open_session(args: &StatementArgs, cfg: &Config) -> (Session, Vec<LoadOutcome>) {
    let mut session = Session::new(args.income(cfg));
    let outcomes = args
        .sources(cfg)
        .into_iter()
        .map(|(issuer, path)| load_into(&mut session, issuer, path))
        .collect();
    (session, outcomes)
}
