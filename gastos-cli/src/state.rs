//! Per-user state directory (`~/.gastos`): config file and the dashboard log.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.gastos`; not created here
pub fn gastos_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".gastos"))
}

pub fn ensure_gastos_home() -> Result<PathBuf> {
    let dir = gastos_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Log file used while the TUI owns the terminal
pub fn dashboard_log_path() -> Result<PathBuf> {
    Ok(ensure_gastos_home()?.join("dashboard.log"))
}
