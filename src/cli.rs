use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StorageBackend;

/// Budget-aware agent squad: cost-simulating LLM gateway with researcher and writer agents
#[derive(Parser, Debug, Clone)]
#[command(name = "budget-squad", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "SQUAD_CONFIG", default_value = "budget-squad.toml")]
    pub config: PathBuf,

    /// Model identifier passed to the generation engine
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Generation engine endpoint (e.g. http://localhost:11434)
    #[arg(long, global = true)]
    pub engine_url: Option<String>,

    /// Blob store backend
    #[arg(long, value_enum, global = true)]
    pub storage: Option<StorageBackend>,

    /// Root directory for the file backend
    #[arg(long, global = true)]
    pub file_root: Option<PathBuf>,

    /// Bucket holding the pipeline artifacts
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// S3 endpoint URL (for LocalStack, MinIO, or other S3-compatible services)
    #[arg(long, global = true)]
    pub s3_endpoint: Option<String>,

    /// AWS region for S3
    #[arg(long, global = true)]
    pub s3_region: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Probe the generation engine
    Check,
    /// Estimate tokens and simulated cost for a text without calling the engine
    Estimate {
        /// Text to estimate
        text: String,
    },
    /// One-shot generation
    Ask {
        /// Prompt sent as the user message
        prompt: String,
        /// Optional system context
        #[arg(long)]
        system: Option<String>,
    },
    /// Generate a hello message and upload it to the bucket
    Bridge,
    /// Store a research topic for the researcher
    Seed {
        /// Research topic text
        topic: String,
    },
    /// Run the researcher stage
    Research,
    /// Run the writer stage
    Write,
    /// Run researcher then writer on one shared brain
    Pipeline,
}
