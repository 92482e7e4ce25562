//! Writer agent: polishes research notes into an executive summary

use std::sync::Arc;

use tera::Context;
use tracing::info;

use super::{render, AgentResult, Persona, StageOutcome};
use crate::brain::{Brain, FiscalSummary, GenerationResult};
use crate::storage::BlobStore;

pub const WRITER: Persona = Persona {
    name: "Writer Agent",
    system_prompt: "You are a Professional Technical Writer. Your job is to take raw \
                    research notes and transform them into a polished, executive summary \
                    with clear headings. Use professional language, be concise, and \
                    structure the content for C-level readability.",
};

const SUMMARY_PROMPT: &str = "\
Format this into a professional executive summary.

RAW RESEARCH NOTES:
{{ notes }}

Create an executive summary with:
- A clear title
- An executive overview paragraph
- Key findings with professional headings
- A brief conclusion with recommendations

Use professional business language suitable for C-level executives.";

const REPORT_TEMPLATE: &str = "\
{{ rule }}
EXECUTIVE SUMMARY
Generated by: {{ agent }} | Budget-Aware AI Squad
{{ rule }}

{{ summary }}

{{ rule }}
DOCUMENT METADATA
{{ rule }}
Source: {{ source }}
Output: {{ output }}
Tokens Used: {{ tokens }}
Generation Cost: ${{ cost }}
Cost Rate: ${{ rate }} per 1,000 tokens
{{ rule }}
";

const RULE_WIDTH: usize = 70;

/// Reads research notes, summarizes them and stores the report
pub struct WriterAgent {
    brain: Arc<Brain>,
    store: Arc<dyn BlobStore>,
    container: String,
}

impl WriterAgent {
    pub fn new(brain: Arc<Brain>, store: Arc<dyn BlobStore>, container: impl Into<String>) -> Self {
        Self {
            brain,
            store,
            container: container.into(),
        }
    }

    /// Ask the brain to turn raw notes into an executive summary
    pub async fn format_executive_summary(&self, raw_notes: &str) -> AgentResult<GenerationResult> {
        let mut context = Context::new();
        context.insert("notes", raw_notes);
        let prompt = render(SUMMARY_PROMPT, &context)?;

        Ok(self
            .brain
            .generate(&prompt, Some(WRITER.system_prompt))
            .await?)
    }

    /// Read notes at `input_key`, summarize them and write the report to `output_key`
    pub async fn polish_and_publish(
        &self,
        input_key: &str,
        output_key: &str,
    ) -> AgentResult<StageOutcome> {
        let source = self.store.uri(&self.container, input_key);
        let output = self.store.uri(&self.container, output_key);

        info!(source = %source, "writer reading notes");
        let raw_notes = self.store.get(&self.container, input_key).await?;
        info!(chars = raw_notes.chars().count(), "notes loaded");

        let generation = self.format_executive_summary(&raw_notes).await?;
        info!(
            tokens = generation.estimated_tokens,
            cost = %format!("{:.6}", generation.simulated_cost),
            "transformation complete"
        );

        let report = format_report(
            &source,
            &output,
            &generation,
            self.brain.pricing().cost_per_1k_tokens,
        )?;
        info!(output = %output, "writer saving report");
        self.store.put(&self.container, output_key, &report).await?;

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

/// Render the final report with its banner and metadata footer
pub fn format_report(
    source: &str,
    output: &str,
    generation: &GenerationResult,
    cost_per_1k_tokens: f64,
) -> AgentResult<String> {
    let mut context = Context::new();
    context.insert("rule", &"=".repeat(RULE_WIDTH));
    context.insert("agent", WRITER.name);
    context.insert("summary", &generation.text);
    context.insert("source", source);
    context.insert("output", output);
    context.insert("tokens", &generation.estimated_tokens);
    context.insert("cost", &format!("{:.6}", generation.simulated_cost));
    context.insert("rate", &cost_per_1k_tokens.to_string());
    render(REPORT_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Pricing;
    use crate::llm::testing::ScriptedEngine;
    use crate::storage::InMemoryBlobStore;

    fn generation(text: &str) -> GenerationResult {
        GenerationResult {
            text: text.to_string(),
            estimated_tokens: 250,
            simulated_cost: 0.00375,
            model: "llama3.1".to_string(),
        }
    }

    #[test]
    fn test_report_layout() {
        let report = format_report(
            "s3://milestone-bucket/research_notes.txt",
            "s3://milestone-bucket/reports/executive_summary.txt",
            &generation("# Title\nBody"),
            0.015,
        )
        .unwrap();

        let rule = "=".repeat(70);
        assert!(report.starts_with(&format!("{}\nEXECUTIVE SUMMARY\n", rule)));
        assert!(report.contains("Generated by: Writer Agent | Budget-Aware AI Squad"));
        assert!(report.contains("\n# Title\nBody\n"));
        assert!(report.contains("Output: s3://milestone-bucket/reports/executive_summary.txt"));
        assert!(report.contains("Tokens Used: 250"));
        assert!(report.contains("Generation Cost: $0.003750"));
        assert!(report.contains("Cost Rate: $0.015 per 1,000 tokens"));
        assert!(report.ends_with(&format!("{}\n", rule)));
    }

    #[tokio::test]
    async fn test_polish_and_publish() {
        let engine = Arc::new(ScriptedEngine::new("Executive Summary\n\nAll good."));
        let brain = Arc::new(Brain::new(engine.clone(), Pricing::default()));
        let store = InMemoryBlobStore::new();
        store.create_container("milestone-bucket").await.unwrap();
        store
            .put("milestone-bucket", "research_notes.txt", "RESEARCH NOTES\n...")
            .await
            .unwrap();

        let writer = WriterAgent::new(brain, Arc::new(store.clone()), "milestone-bucket");
        let outcome = writer
            .polish_and_publish("research_notes.txt", "reports/executive_summary.txt")
            .await
            .unwrap();

        assert_eq!(outcome.text, "Executive Summary\n\nAll good.");
        let report = store
            .get("milestone-bucket", "reports/executive_summary.txt")
            .await
            .unwrap();
        assert!(report.contains("Executive Summary\n\nAll good."));
        assert!(report.contains("Source: memory://milestone-bucket/research_notes.txt"));
        assert_eq!(writer.session_cost(), outcome.generation.simulated_cost);

        let calls = engine.calls();
        assert_eq!(calls[0][0].content, WRITER.system_prompt);
        assert!(calls[0][1].content.contains("RAW RESEARCH NOTES:\nRESEARCH NOTES\n..."));
    }

    #[tokio::test]
    async fn test_missing_notes_is_missing_input() {
        let engine = Arc::new(ScriptedEngine::new(""));
        let brain = Arc::new(Brain::new(engine, Pricing::default()));
        let store = InMemoryBlobStore::new();
        store.create_container("milestone-bucket").await.unwrap();

        let writer = WriterAgent::new(brain, Arc::new(store), "milestone-bucket");
        let err = writer
            .polish_and_publish("research_notes.txt", "reports/executive_summary.txt")
            .await
            .unwrap_err();
        assert!(err.is_missing_input());
        assert_eq!(writer.fiscal_summary().total_tokens_used, 0);
    }
}
