//! Cost-aware generation gateway
//!
//! Every agent talks to the generation engine through a [`Brain`]. Each call
//! is wrapped with a deterministic token estimate and simulated cost, and the
//! totals are accumulated into the brain's [`FiscalLedger`]:
//!
//! - input estimate over `system_context + prompt` (plain concatenation)
//! - output estimate over the returned text
//! - ledger updated only after the engine answered successfully

mod estimate;
mod ledger;
mod response;

pub use estimate::{CostEstimate, Pricing, DEFAULT_CHARS_PER_TOKEN, DEFAULT_COST_PER_1K_TOKENS};
pub use ledger::{FiscalLedger, FiscalSummary, LedgerTotals};
pub use response::GenerationResult;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{EngineSettings, Settings};
use crate::llm::{ChatEngine, LlmError, Message, OllamaEngine};

/// Errors raised by the brain
#[derive(Debug, Error)]
pub enum BrainError {
    /// The engine was unreachable, timed out, rejected the request or
    /// answered with something that could not be decoded
    #[error("Generation engine unavailable: {0}")]
    EngineUnavailable(#[from] LlmError),
}

/// Result type alias for brain operations
pub type BrainResult<T> = Result<T, BrainError>;

/// Single access point to the generation engine, owning the fiscal ledger
pub struct Brain {
    engine: Arc<dyn ChatEngine>,
    pricing: Pricing,
    ledger: FiscalLedger,
}

impl Brain {
    /// Create a brain around an engine. The ledger starts at zero.
    pub fn new(engine: Arc<dyn ChatEngine>, pricing: Pricing) -> Self {
        Self {
            engine,
            pricing,
            ledger: FiscalLedger::new(),
        }
    }

    /// Create a brain backed by Ollama
    pub fn with_ollama(engine: &EngineSettings, pricing: Pricing) -> BrainResult<Self> {
        let engine = OllamaEngine::new(engine)?;
        Ok(Self::new(Arc::new(engine), pricing))
    }

    /// Create a brain from loaded settings
    pub fn from_settings(settings: &Settings) -> BrainResult<Self> {
        Self::with_ollama(&settings.engine, settings.pricing)
    }

    /// Model identifier used for every call
    pub fn model(&self) -> &str {
        self.engine.model()
    }

    /// Endpoint of the underlying engine
    pub fn endpoint(&self) -> &str {
        self.engine.endpoint()
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Estimate tokens and simulated cost for `text` without calling the engine
    pub fn estimate(&self, text: &str) -> CostEstimate {
        self.pricing.estimate(text)
    }

    /// Generate a response and record its simulated cost.
    ///
    /// The system context, when present, is sent as a separate leading
    /// `system` message but is concatenated with the prompt for the input
    /// estimate. On failure the ledger is left untouched and no retry is made.
    pub async fn generate(
        &self,
        prompt: &str,
        system_context: Option<&str>,
    ) -> BrainResult<GenerationResult> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_context.filter(|s| !s.is_empty()) {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        let input_text = format!("{}{}", system_context.unwrap_or(""), prompt);
        let input = self.pricing.estimate(&input_text);

        debug!(
            model = %self.model(),
            input_tokens = input.tokens,
            "dispatching generation request"
        );

        let text = match self.engine.chat(&messages).await {
            Ok(text) => text,
            Err(e) => {
                warn!(model = %self.model(), error = %e, "generation failed, ledger unchanged");
                return Err(e.into());
            }
        };

        let output = self.pricing.estimate(&text);
        let call = input.combine(output);
        let totals = self.ledger.record(call);

        info!(
            model = %self.model(),
            tokens = call.tokens,
            cost = call.cost,
            total_tokens = totals.total_tokens_used,
            total_cost = totals.total_cost_incurred,
            "generation complete"
        );

        Ok(GenerationResult {
            text,
            estimated_tokens: call.tokens,
            simulated_cost: call.cost,
            model: self.model().to_string(),
        })
    }

    /// Current ledger totals plus the fixed pricing and model
    pub fn ledger_snapshot(&self) -> FiscalSummary {
        let totals = self.ledger.totals();
        FiscalSummary {
            total_tokens_used: totals.total_tokens_used,
            total_cost_incurred: totals.total_cost_incurred,
            cost_per_1k_tokens: self.pricing.cost_per_1k_tokens,
            model: self.model().to_string(),
        }
    }

    /// Probe the engine by listing its models. Never fails; any error is `false`.
    pub async fn check_connection(&self) -> bool {
        match self.engine.list_models().await {
            Ok(models) => {
                debug!(endpoint = %self.endpoint(), models = models.len(), "engine reachable");
                true
            }
            Err(e) => {
                debug!(endpoint = %self.endpoint(), error = %e, "engine probe failed");
                false
            }
        }
    }
}

/// One-shot generation on a fresh brain. Only the text is returned; the
/// throwaway ledger is dropped with the brain.
pub async fn ask(settings: &Settings, prompt: &str, system_context: Option<&str>) -> BrainResult<String> {
    let brain = Brain::from_settings(settings)?;
    Ok(brain.generate(prompt, system_context).await?.text)
}
