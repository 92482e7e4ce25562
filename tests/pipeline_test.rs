mod common;

use std::sync::Arc;

use budget_squad::agents::{run_milestone, run_pipeline, seed_topic};
use budget_squad::brain::{Brain, Pricing};
use budget_squad::config::{PipelineSettings, StorageBackend, StorageSettings};
use budget_squad::storage::{create_store, BlobStore};
use common::{unreachable_engine, ChatBehaviour, FakeOllama};
use tempfile::TempDir;

const BUCKET: &str = "milestone-bucket";

async fn file_store(dir: &TempDir) -> Arc<dyn BlobStore> {
    let settings = StorageSettings {
        backend: StorageBackend::File,
        file_root: dir.path().to_path_buf(),
        ..Default::default()
    };
    Arc::from(create_store(&settings).await.unwrap())
}

#[tokio::test]
async fn test_full_pipeline_over_file_store() {
    let server = FakeOllama::start(ChatBehaviour::Replies(vec![
        "1. Tag everything\n2. Alert on drift\n3. Review monthly".to_string(),
        "Cost Governance Brief\n\nTagging pays for itself.".to_string(),
    ]))
    .await;
    let brain = Arc::new(Brain::with_ollama(&server.engine_settings(), Pricing::default()).unwrap());
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir).await;
    let keys = PipelineSettings::default();

    seed_topic(store.as_ref(), BUCKET, &keys.topic_key, "FinOps tagging strategy")
        .await
        .unwrap();
    let report = run_pipeline(brain.clone(), store.clone(), BUCKET, &keys)
        .await
        .unwrap();

    let notes = std::fs::read_to_string(dir.path().join(BUCKET).join("research_notes.txt")).unwrap();
    assert!(notes.starts_with("RESEARCH NOTES"));
    assert!(notes.contains("ORIGINAL TOPIC:\nFinOps tagging strategy"));
    assert!(notes.contains("3. Review monthly"));

    let summary = std::fs::read_to_string(
        dir.path().join(BUCKET).join("reports").join("executive_summary.txt"),
    )
    .unwrap();
    assert!(summary.contains("EXECUTIVE SUMMARY"));
    assert!(summary.contains("Tagging pays for itself."));
    assert!(summary.contains(&format!("Tokens Used: {}", report.report.generation.estimated_tokens)));

    // The writer saw exactly what the researcher stored
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let writer_prompt = requests[1]["messages"][1]["content"].as_str().unwrap();
    assert!(writer_prompt.contains(&notes));

    assert_eq!(
        report.fiscal.total_tokens_used,
        report.research.generation.estimated_tokens + report.report.generation.estimated_tokens
    );
    assert_eq!(report.fiscal, brain.ledger_snapshot());
}

#[tokio::test]
async fn test_milestone_over_file_store() {
    let server = FakeOllama::replying("Hello, 2026! The agent squad is live.").await;
    let brain = Brain::with_ollama(&server.engine_settings(), Pricing::default()).unwrap();
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir).await;

    let first = run_milestone(&brain, store.as_ref(), BUCKET, "hello_agent.txt")
        .await
        .unwrap();
    assert!(first.container_created);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(BUCKET).join("hello_agent.txt")).unwrap(),
        "Hello, 2026! The agent squad is live."
    );

    let second = run_milestone(&brain, store.as_ref(), BUCKET, "hello_agent.txt")
        .await
        .unwrap();
    assert!(!second.container_created);
    assert_eq!(
        brain.ledger_snapshot().total_tokens_used,
        first.generation.estimated_tokens + second.generation.estimated_tokens
    );
}

#[tokio::test]
async fn test_pipeline_engine_down_leaves_store_and_ledger() {
    let brain = Arc::new(Brain::with_ollama(&unreachable_engine(), Pricing::default()).unwrap());
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir).await;
    let keys = PipelineSettings::default();

    seed_topic(store.as_ref(), BUCKET, &keys.topic_key, "anything")
        .await
        .unwrap();
    let err = run_pipeline(brain.clone(), store.clone(), BUCKET, &keys)
        .await
        .unwrap_err();

    assert!(!err.is_missing_input());
    assert!(store.get(BUCKET, &keys.notes_key).await.unwrap_err().is_not_found());
    assert_eq!(brain.ledger_snapshot().total_tokens_used, 0);
}
