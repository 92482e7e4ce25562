use std::sync::Arc;

use anyhow::Context as _;
use budget_squad::agents::{
    run_milestone, run_pipeline, seed_topic, AgentError, ResearcherAgent, StageOutcome, WriterAgent,
};
use budget_squad::brain::{Brain, BrainError, FiscalSummary};
use budget_squad::cli::{Cli, Command};
use budget_squad::config::Settings;
use budget_squad::storage::{create_store, BlobStore};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    info!(
        model = %settings.engine.model,
        engine = %settings.engine.base_url,
        storage = ?settings.storage.backend,
        "budget squad starting"
    );

    if let Err(err) = run(cli.command, &settings).await {
        hint(&err, &settings);
        return Err(err);
    }
    Ok(())
}

async fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    let container = settings.storage.container();
    let keys = &settings.pipeline;

    match command {
        Command::Check => {
            let brain = Brain::from_settings(settings)?;
            println!("Target: {}", brain.endpoint());
            println!("Model:  {}", brain.model());
            if !brain.check_connection().await {
                anyhow::bail!("generation engine at {} is not reachable", brain.endpoint());
            }
            println!("Connection successful");
        }
        Command::Estimate { text } => {
            let estimate = settings.pricing.estimate(&text);
            println!("Estimated tokens: {}", estimate.tokens);
            println!("Simulated cost:   ${:.6}", estimate.cost);
        }
        Command::Ask { prompt, system } => {
            let brain = Brain::from_settings(settings)?;
            let result = brain.generate(&prompt, system.as_deref()).await?;
            println!("{}", result.text);
            println!();
            println!("Tokens: {}  Cost: ${:.6}", result.estimated_tokens, result.simulated_cost);
            println!();
            print_summary(&brain.ledger_snapshot());
        }
        Command::Bridge => {
            let brain = Brain::from_settings(settings)?;
            let store = open_store(settings).await?;
            let report = run_milestone(&brain, store.as_ref(), container, &keys.hello_key).await?;
            println!("Uploaded content:\n  \"{}\"", report.message);
            println!("Location:\n  {}", report.location);
            print_summary(&brain.ledger_snapshot());
        }
        Command::Seed { topic } => {
            let store = open_store(settings).await?;
            let location = seed_topic(store.as_ref(), container, &keys.topic_key, &topic).await?;
            println!("Research topic stored at {}", location);
        }
        Command::Research => {
            let brain = Arc::new(Brain::from_settings(settings)?);
            let store = open_store(settings).await?;
            let researcher = ResearcherAgent::new(brain, store, container);
            let outcome = researcher
                .research_and_summarize(&keys.topic_key, &keys.notes_key)
                .await?;
            print_stage("RESEARCH SUMMARY", &outcome);
            print_summary(&researcher.fiscal_summary());
        }
        Command::Write => {
            let brain = Arc::new(Brain::from_settings(settings)?);
            let store = open_store(settings).await?;
            let writer = WriterAgent::new(brain, store, container);
            let outcome = writer
                .polish_and_publish(&keys.notes_key, &keys.report_key)
                .await?;
            print_stage("EXECUTIVE SUMMARY", &outcome);
            print_summary(&writer.fiscal_summary());
        }
        Command::Pipeline => {
            let brain = Arc::new(Brain::from_settings(settings)?);
            let store = open_store(settings).await?;
            let report = run_pipeline(brain, store, container, keys).await?;
            print_stage("RESEARCH SUMMARY", &report.research);
            print_stage("EXECUTIVE SUMMARY", &report.report);
            print_summary(&report.fiscal);
        }
    }

    Ok(())
}

async fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn BlobStore>> {
    let store = create_store(&settings.storage)
        .await
        .context("failed to open blob store")?;
    Ok(Arc::from(store))
}

fn print_stage(title: &str, outcome: &StageOutcome) {
    println!("{}", title);
    println!("{}", "-".repeat(60));
    println!("{}", outcome.text);
    println!("{}", "-".repeat(60));
    println!("Source: {}", outcome.source);
    println!("Output: {}", outcome.output);
    println!(
        "Tokens: {}  Cost: ${:.6}",
        outcome.generation.estimated_tokens, outcome.generation.simulated_cost
    );
    println!();
}

fn print_summary(summary: &FiscalSummary) {
    println!("FISCAL SUMMARY");
    println!("{}", "-".repeat(60));
    println!("{}", summary);
}

fn hint(err: &anyhow::Error, settings: &Settings) {
    if let Some(agent_err) = err.downcast_ref::<AgentError>() {
        if agent_err.is_missing_input() {
            error!("{}", agent_err);
            error!("the previous stage has not produced its artifact yet; run `budget-squad seed <TOPIC>` then `research` first");
            return;
        }
    }

    let engine_down = matches!(err.downcast_ref::<BrainError>(), Some(BrainError::EngineUnavailable(_)))
        || matches!(err.downcast_ref::<AgentError>(), Some(AgentError::Brain(_)));
    if engine_down {
        error!(
            "make sure Ollama is running at {} (`ollama serve`) and `{}` is pulled",
            settings.engine.base_url, settings.engine.model
        );
    }
}
