//! Club and config files from disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use touchline_core::config::SimConfig;
use touchline_core::models::Club;

pub fn load_club(path: &Path) -> Result<Club> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read club file: {}", path.display()))?;
    let club: Club =
        serde_json::from_str(&json).with_context(|| format!("Invalid club JSON in {}", path.display()))?;
    log::debug!("Loaded {} ({} players) from {}", club.name, club.squad.current_players.len(), path.display());
    Ok(club)
}

/// Explicit path first, then `TOUCHLINE_CONFIG_PATH`, then defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    if let Some(path) = path {
        return SimConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()));
    }
    let from_env = SimConfig::from_env().context("Failed to load config from environment")?;
    Ok(from_env.unwrap_or_default())
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
