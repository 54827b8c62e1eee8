// File: src/config.rs
use crate::bilingual::FieldPair;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Record fields searched by autocomplete and the dashboard filter.
    pub fields: Vec<String>,
    /// Field committed on select or snap.
    pub display_field: String,
    pub blur_grace_ms: u64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            fields: ["name", "nameTamil", "companyName", "city", "cityTamil"]
                .into_iter()
                .map(String::from)
                .collect(),
            display_field: "name".to_owned(),
            blur_grace_ms: 150,
        }
    }
}

impl SearchSection {
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilingualSection {
    pub pairs: Vec<FieldPair>,
}

impl Default for BilingualSection {
    fn default() -> Self {
        Self {
            pairs: vec![
                FieldPair::new("name", "nameTamil"),
                FieldPair::new("city", "cityTamil"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `search_core=debug`. `RUST_LOG` wins
    /// when set.
    pub level: String,
    /// Emit logs as JSON lines.
    pub json: bool,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub search: SearchSection,
    pub bilingual: BilingualSection,
    pub logging: LoggingConfig,
    /// Default candidate pool, JSON or snapshot.
    pub pool: Option<PathBuf>,
}

impl SearchConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `<config dir>/tanglish-search/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tanglish-search").join("config.toml"))
    }

    /// Loads the default config file if it exists, otherwise the defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Installs the global tracing subscriber. Only the first call has an effect.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let (file, open_error) = match config.file.as_deref().map(open_log_file) {
            Some(Ok(file)) => (Some(file), None),
            Some(Err(e)) => (None, Some(e)),
            None => (None, None),
        };
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = match (file, config.json) {
            (Some(file), true) => builder
                .json()
                .with_writer(Mutex::new(file))
                .try_init(),
            (Some(file), false) => builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            (None, true) => builder.json().with_writer(std::io::stderr).try_init(),
            (None, false) => builder.with_writer(std::io::stderr).try_init(),
        };
        // Another subscriber may already be installed (tests, host apps).
        let _ = result;
        if let Some(e) = open_error {
            warn!(error = %e, "could not open log file, logging to stderr");
        }
    });
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))
}
