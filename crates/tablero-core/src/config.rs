use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::TableroError;
use crate::layout::schema::CanvasLayout;
use crate::layout::{self, builtin};

const ENV_PREFIX: &str = "TABLERO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base of the canvas endpoint (`{base_url}/projects/canvas/{sheet}`).
    pub base_url: String,
    /// Full URL of the project list.
    pub projects_url: String,
    /// Base of the suggestion service (`{ai_base_url}/ai/canvas-improve`).
    pub ai_base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub preset: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json".
    pub format: String,
}

impl AppConfig {
    /// Defaults, then `config/default.*` and `config/local.*` relative to
    /// the working directory, then `TABLERO__SECTION__KEY` variables.
    pub fn load() -> Result<Self, TableroError> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new("config"), ENV_PREFIX)
    }

    /// Same layering with an explicit config directory and env prefix.
    pub fn load_from(dir: &Path, env_prefix: &str) -> Result<Self, TableroError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.projects_url", defaults.api.projects_url)?
            .set_default("api.ai_base_url", defaults.api.ai_base_url)?
            .set_default("api.timeout_seconds", defaults.api.timeout_seconds as i64)?
            .set_default("layout.preset", defaults.layout.preset)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join("local").to_string_lossy()).required(false))
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        tracing::debug!(preset = %app.layout.preset, "configuration loaded");
        Ok(app)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    /// The configured layout: the file when one is set, otherwise the preset.
    pub fn layout(&self) -> Result<CanvasLayout, TableroError> {
        match &self.layout.file {
            Some(path) => layout::load_layout(path),
            None => builtin::load_preset(&self.layout.preset),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                projects_url: "http://localhost:3000/projects".to_string(),
                ai_base_url: "http://localhost:3000".to_string(),
                timeout_seconds: 30,
            },
            layout: LayoutConfig {
                preset: builtin::DEFAULT_PRESET.to_string(),
                file: None,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
