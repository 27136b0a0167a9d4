use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{error::ConfigError, session::DEFAULT_PROMPT};

/// Names the JSON config file when `--config` is not given.
pub const CONFIG_VAR: &str = "MINESWEEPER_CONFIG";
pub const PROMPT_VAR: &str = "MINESWEEPER_PROMPT";
pub const BANNER_DIR_VAR: &str = "MINESWEEPER_BANNER_DIR";

/// Frontend settings. Every field is optional in the JSON file.
///
/// ```json
/// { "prompt": "ms> ", "banner_dir": "resources" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    /// Directory holding `welcome.txt`, `gamewon.txt` and `gameover.txt`.
    pub banner_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            banner_dir: None,
        }
    }
}

impl Config {
    /// Reads the config file (`path`, else `MINESWEEPER_CONFIG`, else
    /// defaults), then applies `MINESWEEPER_PROMPT` and
    /// `MINESWEEPER_BANNER_DIR` on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_VAR).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());

        debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prompt) = lookup(PROMPT_VAR) {
            self.prompt = prompt;
        }
        if let Some(dir) = lookup(BANNER_DIR_VAR).filter(|dir| !dir.is_empty()) {
            self.banner_dir = Some(PathBuf::from(dir));
        }
    }
}
