//! Analyzer configuration.
//!
//! Optional TOML file holding the symbol table, substitution order, match mode
//! and report/worker settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::analyze::{LyricsAnalyzer, MatchMode};
use crate::normalize::{
    default_symbol_entries, Normalizer, SubstitutionOrder, SymbolEntry, SymbolTable,
};

/// Rows shown per report table unless overridden.
pub const DEFAULT_REPORT_LIMIT: usize = 10;

/// Analyzer configuration loaded from an optional TOML file.
/// All fields have defaults matching the built-in behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Symbol substitution table. Replaces the built-in table when present.
    pub symbols: Vec<SymbolEntry>,
    pub substitution_order: SubstitutionOrder,
    pub match_mode: MatchMode,
    /// Rows per report table.
    pub report_limit: usize,
    /// Number of rayon workers. 0 = rayon default (one per core).
    pub workers: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbol_entries(),
            substitution_order: SubstitutionOrder::default(),
            match_mode: MatchMode::default(),
            report_limit: DEFAULT_REPORT_LIMIT,
            workers: 0,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse analyzer config")
    }

    /// Load config. An explicit path must exist and parse.
    /// Without one, `~/.config/lyrics-stats/config.toml` is tried and
    /// any problem with it falls back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config = Self::from_toml_str(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            log::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        match Self::config_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::from_toml_str(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        Ok(config)
                    }
                    Err(e) => {
                        log::warn!("{:#} in {}. Using defaults.", e, path.display());
                        Ok(Self::default())
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    Ok(Self::default())
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate the symbol table and build an analyzer from this config.
    pub fn build_analyzer(&self) -> Result<LyricsAnalyzer> {
        let table = SymbolTable::new(self.symbols.clone(), self.substitution_order)?;
        log::debug!(
            "Symbol table: {} entries ({:?}), match mode {:?}",
            table.len(),
            self.substitution_order,
            self.match_mode
        );
        Ok(LyricsAnalyzer::new(Normalizer::new(table), self.match_mode))
    }

    /// Get the default config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
