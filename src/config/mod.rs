use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub mod s3;
pub mod validator;

pub use s3::S3Config;

use crate::brain::Pricing;
use crate::cli::Cli;

/// Config file read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "budget-squad.toml";

/// Prefix of environment overrides, e.g. `SQUAD_ENGINE__MODEL=llama3.2`
pub const ENV_PREFIX: &str = "SQUAD";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Generation engine connection
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EngineSettings {
    #[serde(default = "default_engine_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout; a timed out call fails like an unreachable engine
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: default_engine_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Blob store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// S3 or LocalStack
    #[default]
    S3,
    /// Local directory tree
    File,
    /// Process memory (lost on exit)
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Root directory for the `file` backend
    #[serde(default = "default_file_root")]
    pub file_root: PathBuf,
    #[serde(default)]
    pub s3: S3Config,
}

fn default_file_root() -> PathBuf {
    PathBuf::from("data/blobs")
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            file_root: default_file_root(),
            s3: S3Config::default(),
        }
    }
}

impl StorageSettings {
    /// Container the agents read from and write to
    pub fn container(&self) -> &str {
        &self.s3.bucket
    }
}

/// Blob keys used by each pipeline stage
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PipelineSettings {
    #[serde(default = "default_topic_key")]
    pub topic_key: String,
    #[serde(default = "default_notes_key")]
    pub notes_key: String,
    #[serde(default = "default_report_key")]
    pub report_key: String,
    #[serde(default = "default_hello_key")]
    pub hello_key: String,
}

fn default_topic_key() -> String {
    "research_topic.txt".to_string()
}

fn default_notes_key() -> String {
    "research_notes.txt".to_string()
}

fn default_report_key() -> String {
    "reports/executive_summary.txt".to_string()
}

fn default_hello_key() -> String {
    "hello_agent.txt".to_string()
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            topic_key: default_topic_key(),
            notes_key: default_notes_key(),
            report_key: default_report_key(),
            hello_key: default_hello_key(),
        }
    }
}

impl Settings {
    /// Load `budget-squad.toml` from the working directory plus `SQUAD_*` overrides
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::load(Path::new(DEFAULT_CONFIG_FILE), ENV_PREFIX)
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::read(&cli.config, ENV_PREFIX)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load from an explicit file path and environment prefix
    pub fn load(config_path: &Path, env_prefix: &str) -> Result<Self, anyhow::Error> {
        let settings = Self::read(config_path, env_prefix)?;
        settings.validate()?;
        Ok(settings)
    }

    fn read(config_path: &Path, env_prefix: &str) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Validate configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.engine.model = model.clone();
        }
        if let Some(url) = &cli.engine_url {
            self.engine.base_url = url.clone();
        }
        if let Some(backend) = cli.storage {
            self.storage.backend = backend;
        }
        if let Some(root) = &cli.file_root {
            self.storage.file_root = root.clone();
        }
        self.storage.s3.merge_cli(cli);
    }
}
