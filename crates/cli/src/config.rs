// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Agent configuration and on-disk layout.
//!
//! Everything lives under one home directory, `$BRACKER_HOME` or
//! `~/.bracker`:
//! - `config.json`: `apiUrl`, `apiKey`, optional `username` and `mode`
//! - `pending.jsonl`: writes waiting for the remote
//! - `builds.jsonl` / `stats.json`: the local ledger
//! - `agent.log`: tool server log

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::env;
use crate::error::{Error, Result};

const HOME_DIR_NAME: &str = ".bracker";
const CONFIG_FILE_NAME: &str = "config.json";
const PENDING_FILE_NAME: &str = "pending.jsonl";
const BUILDS_FILE_NAME: &str = "builds.jsonl";
const STATS_FILE_NAME: &str = "stats.json";
const LOG_FILE_NAME: &str = "agent.log";

/// Username used for stats lookups when none is configured.
pub const DEFAULT_USERNAME: &str = "me";

/// Where tool calls are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Forward to the remote scoring API.
    #[default]
    Remote,
    /// Score on this machine in `builds.jsonl` / `stats.json`.
    Local,
}

/// Agent configuration stored in `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the scoring API, e.g. `https://bracker.dev/api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Bearer credential for the scoring API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub mode: Mode,
}

/// Validated remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteSettings<'a> {
    pub api_url: &'a str,
    pub api_key: &'a str,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl Config {
    /// Loads and validates the config at `path`.
    pub fn load(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound {
                    path: path.display().to_string(),
                    dir: path
                        .parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let config: Config = serde_json::from_str(&content).map_err(|e| Error::ConfigInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(reason) = config.validate() {
            return Err(Error::ConfigInvalid {
                path: path.display().to_string(),
                reason,
            });
        }
        Ok(config)
    }

    /// Writes the config as pretty JSON, creating the directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content + "\n")?;
        Ok(())
    }

    /// Returns an error message if the config can't be used in its mode.
    pub fn validate(&self) -> Option<String> {
        if self.mode == Mode::Local {
            return None;
        }
        let Some(url) = non_blank(self.api_url.as_ref()) else {
            return Some("apiUrl is missing".to_string());
        };
        if non_blank(self.api_key.as_ref()).is_none() {
            return Some("apiKey is missing".to_string());
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Some(format!(
                "invalid apiUrl '{url}': must start with http:// or https://"
            ));
        }
        match reqwest::Url::parse(url) {
            Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => None,
            Ok(_) => Some(format!("invalid apiUrl '{url}': missing host")),
            Err(e) => Some(format!("invalid apiUrl '{url}': {e}")),
        }
    }

    /// The remote endpoint, if this config talks to one.
    pub fn remote(&self) -> Option<RemoteSettings<'_>> {
        if self.mode != Mode::Remote {
            return None;
        }
        Some(RemoteSettings {
            api_url: non_blank(self.api_url.as_ref())?,
            api_key: non_blank(self.api_key.as_ref())?,
        })
    }

    /// Username for stats lookups, falling back to [`DEFAULT_USERNAME`].
    pub fn username(&self) -> &str {
        non_blank(self.username.as_ref()).unwrap_or(DEFAULT_USERNAME)
    }
}

/// Files under the agent home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    home: PathBuf,
}

impl Paths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Paths { home: home.into() }
    }

    /// `$BRACKER_HOME`, else `~/.bracker`.
    pub fn from_env() -> Self {
        let home = env::bracker_home().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(HOME_DIR_NAME)
        });
        Paths { home }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config(&self) -> PathBuf {
        self.home.join(CONFIG_FILE_NAME)
    }

    pub fn pending(&self) -> PathBuf {
        self.home.join(PENDING_FILE_NAME)
    }

    pub fn builds(&self) -> PathBuf {
        self.home.join(BUILDS_FILE_NAME)
    }

    pub fn stats(&self) -> PathBuf {
        self.home.join(STATS_FILE_NAME)
    }

    pub fn log(&self) -> PathBuf {
        self.home.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
