use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ghn_core::{Error, Result};

/// Contents of `config.toml`: the account the feeds belong to and the
/// match lists the filter toggles refer to. A missing file is not an
/// error; every section defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub important: ImportantLists,
    #[serde(default)]
    pub blacklist: BlacklistLists,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportantLists {
    #[serde(default)]
    pub authors: Vec<String>,
    /// `project` or `owner/project` patterns.
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistLists {
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
}

impl FileConfig {
    /// Loads the config file, falling back to defaults when none exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ghn").join("config.toml"))
    }
}
