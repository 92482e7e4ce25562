//! Researcher → writer pipeline on one shared brain

use std::sync::Arc;

use tracing::info;

use super::{AgentResult, ResearcherAgent, StageOutcome, WriterAgent};
use crate::brain::{Brain, FiscalSummary};
use crate::config::PipelineSettings;
use crate::storage::BlobStore;

/// Results of both stages plus the ledger after the run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub research: StageOutcome,
    pub report: StageOutcome,
    pub fiscal: FiscalSummary,
}

/// Store a research topic so the researcher has something to read
pub async fn seed_topic(
    store: &dyn BlobStore,
    container: &str,
    key: &str,
    topic: &str,
) -> AgentResult<String> {
    store.ensure_container(container).await?;
    store.put(container, key, topic).await?;
    let location = store.uri(container, key);
    info!(location = %location, "research topic stored");
    Ok(location)
}

/// Run the researcher, then the writer on the researcher's notes
pub async fn run_pipeline(
    brain: Arc<Brain>,
    store: Arc<dyn BlobStore>,
    container: &str,
    keys: &PipelineSettings,
) -> AgentResult<PipelineReport> {
    let researcher = ResearcherAgent::new(brain.clone(), store.clone(), container);
    let research = researcher
        .research_and_summarize(&keys.topic_key, &keys.notes_key)
        .await?;

    let writer = WriterAgent::new(brain.clone(), store, container);
    let report = writer
        .polish_and_publish(&keys.notes_key, &keys.report_key)
        .await?;

    let fiscal = brain.ledger_snapshot();
    info!(
        tokens = fiscal.total_tokens_used,
        cost = %format!("{:.6}", fiscal.total_cost_incurred),
        "pipeline complete"
    );

    Ok(PipelineReport {
        research,
        report,
        fiscal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Pricing;
    use crate::llm::testing::ScriptedEngine;
    use crate::storage::InMemoryBlobStore;

    #[tokio::test]
    async fn test_pipeline_ledger_is_sum_of_stages() {
        let engine = Arc::new(
            ScriptedEngine::new("unused")
                .with_reply(Ok("1. one\n2. two\n3. three".to_string()))
                .with_reply(Ok("Executive summary body".to_string())),
        );
        let brain = Arc::new(Brain::new(engine.clone(), Pricing::default()));
        let store = InMemoryBlobStore::new();
        let keys = PipelineSettings::default();

        seed_topic(&store, "milestone-bucket", &keys.topic_key, "Tagging strategy for cost allocation")
            .await
            .unwrap();

        let report = run_pipeline(brain.clone(), Arc::new(store.clone()), "milestone-bucket", &keys)
            .await
            .unwrap();

        assert_eq!(report.research.text, "1. one\n2. two\n3. three");
        assert_eq!(report.report.text, "Executive summary body");
        assert_eq!(
            report.fiscal.total_tokens_used,
            report.research.generation.estimated_tokens + report.report.generation.estimated_tokens
        );
        let expected_cost =
            report.research.generation.simulated_cost + report.report.generation.simulated_cost;
        assert!((report.fiscal.total_cost_incurred - expected_cost).abs() < 1e-12);

        // The writer was fed the notes the researcher stored
        let notes = store.get("milestone-bucket", &keys.notes_key).await.unwrap();
        assert!(engine.calls()[1][1].content.contains(&notes));

        assert_eq!(
            store.keys("milestone-bucket").await,
            vec![
                "reports/executive_summary.txt".to_string(),
                "research_notes.txt".to_string(),
                "research_topic.txt".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_pipeline_without_topic_stops_before_engine() {
        let engine = Arc::new(ScriptedEngine::new(""));
        let brain = Arc::new(Brain::new(engine.clone(), Pricing::default()));
        let store = InMemoryBlobStore::new();
        store.create_container("milestone-bucket").await.unwrap();

        let err = run_pipeline(brain, Arc::new(store), "milestone-bucket", &PipelineSettings::default())
            .await
            .unwrap_err();
        assert!(err.is_missing_input());
        assert!(engine.calls().is_empty());
    }
}
