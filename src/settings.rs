use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "TEXT_ANALYSIS";
const DEFAULT_FILE: &str = "text_analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Sqlite,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bucket: String,
    pub backend: Backend,
    /// Root directory for the local backend; each bucket is a subdirectory.
    pub root_dir: PathBuf,
    pub db_path: PathBuf,
    /// Base URL for the http backend, e.g. `http://localhost:9000`.
    pub endpoint: Option<String>,
    #[serde(default)]
    pub key_prefix: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bucket: "bucket-text-analysis".to_string(),
            backend: Backend::Local,
            root_dir: PathBuf::from("data/objects"),
            db_path: PathBuf::from("data/objects.sqlite"),
            endpoint: None,
            key_prefix: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Defaults, then `text_analysis.toml` (or `path`), then `TEXT_ANALYSIS_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let d = Settings::default();
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let settings = Config::builder()
            .set_default("bucket", d.bucket)?
            .set_default("backend", "local")?
            .set_default("root_dir", d.root_dir.to_string_lossy().to_string())?
            .set_default("db_path", d.db_path.to_string_lossy().to_string())?
            .set_default("key_prefix", d.key_prefix)?
            .set_default("timeout_secs", d.timeout_secs as i64)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to build settings")?;
        settings
            .try_deserialize()
            .context("Failed to parse settings")
    }
}
