use serde::{Deserialize, Serialize};

/// Generated text with the fiscal metadata of the call that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Text returned by the engine
    pub text: String,
    /// Input plus output token estimate for this call only
    pub estimated_tokens: u64,
    /// Simulated cost of `estimated_tokens`
    pub simulated_cost: f64,
    /// Model that produced the text
    pub model: String,
}
