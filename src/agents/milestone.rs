//! Milestone run: prove the engine and the store are wired together

use tracing::info;

use super::{AgentResult, Persona};
use crate::brain::{Brain, GenerationResult};
use crate::storage::BlobStore;

pub const GREETER: Persona = Persona {
    name: "Milestone Greeter",
    system_prompt: "You are a friendly AI assistant helping launch a budget-aware cloud \
                    governance system.",
};

const HELLO_PROMPT: &str = "Generate a one-sentence 'Hello World' message for a 2026 Cloud \
                            Governance project. Be creative and mention AI agents.";

/// What the milestone produced
#[derive(Debug, Clone)]
pub struct MilestoneReport {
    pub message: String,
    pub location: String,
    pub container_created: bool,
    pub generation: GenerationResult,
}

/// Generate a hello message, make sure the bucket exists and upload the message
pub async fn run_milestone(
    brain: &Brain,
    store: &dyn BlobStore,
    container: &str,
    key: &str,
) -> AgentResult<MilestoneReport> {
    info!("asking the brain for a hello world message");
    let generation = brain.generate(HELLO_PROMPT, Some(GREETER.system_prompt)).await?;
    info!(message = %generation.text, "message generated");

    let container_created = store.ensure_container(container).await?;

    let location = store.uri(container, key);
    store.put(container, key, &generation.text).await?;
    info!(location = %location, "message uploaded");

    Ok(MilestoneReport {
        message: generation.text.clone(),
        location,
        container_created,
        generation,
    })
}
