use anyhow::{Context, Result};
use gastos_core::Issuer;
use gastos_finance::DEFAULT_INCOME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_gastos_home;

/// Purchases shown in the biggest-purchases ranking
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardSection,
    pub statements: StatementsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Monthly income used for the balance
    pub income: f64,
    /// Size of the biggest-purchases ranking
    pub top: usize,
}

/// Statement files loaded at startup when no flag overrides them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picpay: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inter: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nubank: Option<PathBuf>,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME,
            top: DEFAULT_TOP,
        }
    }
}

impl StatementsSection {
    pub fn path(&self, issuer: Issuer) -> Option<&Path> {
        match issuer {
            Issuer::PicPay => self.picpay.as_deref(),
            Issuer::Inter => self.inter.as_deref(),
            Issuer::Nubank => self.nubank.as_deref(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_gastos_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Read a config file, falling back to defaults when it doesn't exist
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
