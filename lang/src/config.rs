//! Process-wide configuration, read once at startup from a TOML file.
//!
//! ```toml
//! [language]
//! keywords = ["def", "end"]
//! line_comments = ["#"]
//!
//! [service.cors]
//! "/lex" = ["*"]
//! "/validate" = ["https://editor.example"]
//! ```
//!
//! Every table and field is optional and falls back to its default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::toolchain::lexer::vocabulary::{LanguageConfig, Vocabulary, VocabularyError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid language vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub language: LanguageConfig,
    pub service: ServiceConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Config::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Compiles the `[language]` table.
    pub fn vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        Ok(Vocabulary::from_config(&self.language)?)
    }
}

/// Transport settings for the request handling layer. These never change how source is scanned
/// or validated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Allowed cross-origin callers per route. `"*"` allows any origin.
    pub cors: BTreeMap<String, Vec<String>>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let any = vec!["*".to_string()];
        let cors = BTreeMap::from([("/lex".to_string(), any.clone()), ("/validate".to_string(), any)]);
        ServiceConfig { cors }
    }
}

impl ServiceConfig {
    /// The `Access-Control-Allow-Origin` value for a request to `route` from `origin`, if the
    /// request is allowed.
    pub fn allowed_origin(&self, route: &str, origin: Option<&str>) -> Option<String> {
        let origins = self.cors.get(route)?;
        if origins.iter().any(|o| o == "*") {
            return Some("*".to_string());
        }
        let origin = origin?;
        origins.iter().find(|o| o.as_str() == origin).cloned()
    }
}
