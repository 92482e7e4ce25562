//! Agent procedures
//!
//! Each agent is a one-shot sequence: fetch an input blob, render a prompt,
//! call the shared [`Brain`](crate::brain::Brain), write an output blob.
//! The brain's ledger is the only state that outlives a call.
//!
//! - `milestone` - hello-world upload proving engine and store are wired
//! - `researcher` - topic → 3-point technical summary
//! - `writer` - research notes → executive summary report
//! - `pipeline` - researcher then writer on one brain

mod error;
pub mod milestone;
mod persona;
pub mod pipeline;
pub mod researcher;
pub mod writer;

pub use error::{AgentError, AgentResult};
pub use milestone::{run_milestone, MilestoneReport};
pub use persona::{render, Persona};
pub use pipeline::{run_pipeline, seed_topic, PipelineReport};
pub use researcher::ResearcherAgent;
pub use writer::WriterAgent;

use crate::brain::GenerationResult;

/// Outcome of one agent stage
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// Generated text, without the report decoration written to the store
    pub text: String,
    /// Fiscal metadata of the generation call
    pub generation: GenerationResult,
    /// Where the input came from
    pub source: String,
    /// Where the decorated output was written
    pub output: String,
}
