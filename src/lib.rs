//! # Budget Squad - cost-aware agent pipeline
//!
//! A researcher and a writer agent talk to a local language model through a
//! single gateway, the [`Brain`](brain::Brain), and pass their artifacts to
//! each other through a blob store (S3/LocalStack, a directory, or memory).
//!
//! Every generation call is priced before its result is handed back: tokens
//! are estimated at four characters each and multiplied by a fixed rate per
//! 1,000 tokens. The running totals live in the brain's fiscal ledger, ready
//! for a governor to read.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use budget_squad::brain::Brain;
//! use budget_squad::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let brain = Brain::from_settings(&settings)?;
//!
//!     let result = brain.generate("What is EC2?", Some("Be concise.")).await?;
//!     println!("{} (${:.6})", result.text, result.simulated_cost);
//!     println!("{}", brain.ledger_snapshot());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **brain**: estimation, ledger, generation wrapper
//! - **llm**: engine trait and the Ollama client
//! - **storage**: blob store trait and backends
//! - **agents**: researcher, writer, milestone, pipeline
//! - **config** / **cli**: settings layering and the command line

pub mod agents;
pub mod brain;
pub mod cli;
pub mod config;
pub mod llm;
pub mod storage;
