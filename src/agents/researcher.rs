//! Researcher agent: turns a raw topic into a 3-point technical summary

use std::sync::Arc;

use tera::Context;
use tracing::info;

use super::{render, AgentResult, Persona, StageOutcome};
use crate::brain::{Brain, FiscalSummary, GenerationResult};
use crate::storage::BlobStore;

pub const RESEARCHER: Persona = Persona {
    name: "Researcher Agent",
    system_prompt: "You are an expert Cloud Researcher. Your goal is to analyze raw topics \
                    and provide a 3-point technical summary. Be concise, accurate, and \
                    focus on actionable insights for cloud governance.",
};

const ANALYSIS_PROMPT: &str = "\
Analyze the following research topic and provide a 3-point technical summary.

RESEARCH TOPIC:
{{ topic }}

Provide your analysis as:
1. [First key insight]
2. [Second key insight]
3. [Third key insight]

Be concise and focus on cloud governance implications.";

const NOTES_TEMPLATE: &str = "\
RESEARCH NOTES
==============
Generated by: {{ agent }}
Source: {{ source }}
Tokens Used: {{ tokens }}
Simulated Cost: ${{ cost }}

ORIGINAL TOPIC:
{{ topic }}

ANALYSIS:
{{ analysis }}
";

/// Reads a topic, analyzes it and stores research notes
pub struct ResearcherAgent {
    brain: Arc<Brain>,
    store: Arc<dyn BlobStore>,
    container: String,
}

impl ResearcherAgent {
    pub fn new(brain: Arc<Brain>, store: Arc<dyn BlobStore>, container: impl Into<String>) -> Self {
        Self {
            brain,
            store,
            container: container.into(),
        }
    }

    /// Ask the brain for a 3-point summary of `topic`
    pub async fn analyze_topic(&self, topic: &str) -> AgentResult<GenerationResult> {
        let mut context = Context::new();
        context.insert("topic", topic);
        let prompt = render(ANALYSIS_PROMPT, &context)?;

        Ok(self
            .brain
            .generate(&prompt, Some(RESEARCHER.system_prompt))
            .await?)
    }

    /// Read the topic at `input_key`, analyze it and write notes to `output_key`
    pub async fn research_and_summarize(
        &self,
        input_key: &str,
        output_key: &str,
    ) -> AgentResult<StageOutcome> {
        let source = self.store.uri(&self.container, input_key);
        let output = self.store.uri(&self.container, output_key);

        info!(source = %source, "researcher reading topic");
        let topic = self.store.get(&self.container, input_key).await?;
        info!(chars = topic.chars().count(), "topic loaded");

        let generation = self.analyze_topic(&topic).await?;
        info!(
            tokens = generation.estimated_tokens,
            cost = %format!("{:.6}", generation.simulated_cost),
            "analysis complete"
        );

        let notes = format_notes(&source, &topic, &generation)?;
        info!(output = %output, "researcher saving notes");
        self.store.put(&self.container, output_key, &notes).await?;

        Ok(StageOutcome {
            text: generation.text.clone(),
            generation,
            source,
            output,
        })
    }

    /// Total simulated cost recorded by the shared brain so far
    pub fn session_cost(&self) -> f64 {
        self.brain.ledger_snapshot().total_cost_incurred
    }

    pub fn fiscal_summary(&self) -> FiscalSummary {
        self.brain.ledger_snapshot()
    }
}

/// Render the notes document stored for the writer
pub fn format_notes(source: &str, topic: &str, generation: &GenerationResult) -> AgentResult<String> {
    let mut context = Context::new();
    context.insert("agent", RESEARCHER.name);
    context.insert("source", source);
    context.insert("tokens", &generation.estimated_tokens);
    context.insert("cost", &format!("{:.6}", generation.simulated_cost));
    context.insert("topic", topic);
    context.insert("analysis", &generation.text);
    render(NOTES_TEMPLATE, &context)
}
