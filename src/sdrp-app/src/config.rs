// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// File name looked up in every search directory.
pub const CONFIG_FILE_NAME: &str = "sdrparser.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),

    #[error("Config file {0} has no [{1}] section")]
    MissingSection(PathBuf, String),
}

/// Candidate locations, in priority order: working directory, the user
/// config directory, then `/etc/sdrparser`.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("sdrparser").join(CONFIG_FILE_NAME));
    }
    paths.push(Path::new("/etc/sdrparser").join(CONFIG_FILE_NAME));
    paths
}

fn parse_section<T: DeserializeOwned>(
    content: &str,
    key: &str,
    origin: &Path,
) -> Result<Option<T>, ConfigError> {
    let parse_err = |e: toml::de::Error| ConfigError::ParseError(origin.to_path_buf(), e.to_string());
    let mut table: toml::Table = toml::from_str(content).map_err(parse_err)?;
    match table.remove(key) {
        // Deserializing the section value directly keeps serde defaults.
        Some(section) => section.try_into::<T>().map(Some).map_err(parse_err),
        None => Ok(None),
    }
}

/// A configuration struct stored under its own `[section]` of `sdrparser.toml`.
pub trait ConfigFile: Sized + Default + DeserializeOwned {
    fn section_key() -> &'static str;

    /// Parse the section out of an in-memory TOML document.
    fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let origin = Path::new("<string>");
        parse_section(content, Self::section_key(), origin)?.ok_or_else(|| {
            ConfigError::MissingSection(origin.to_path_buf(), Self::section_key().to_string())
        })
    }

    /// Load from an explicit path; the section must be present.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        parse_section(&content, Self::section_key(), path)?.ok_or_else(|| {
            ConfigError::MissingSection(path.to_path_buf(), Self::section_key().to_string())
        })
    }

    /// Load the first file from `paths` that exists and carries the section.
    ///
    /// Falls back to `Default` with no path when none does.
    fn load_from_paths(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in paths.iter().filter(|p| p.is_file()) {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e.to_string()))?;
            if let Some(cfg) = parse_section(&content, Self::section_key(), path)? {
                return Ok((cfg, Some(path.clone())));
            }
        }
        Ok((Self::default(), None))
    }

    /// [`ConfigFile::load_from_paths`] over [`default_search_paths`].
    fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_from_paths(&default_search_paths())
    }
}
