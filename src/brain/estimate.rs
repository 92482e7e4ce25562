//! Token estimation and cost simulation

use serde::{Deserialize, Serialize};

/// Default simulated price in dollars per 1,000 estimated tokens
pub const DEFAULT_COST_PER_1K_TOKENS: f64 = 0.015;

/// Default characters-per-token ratio
pub const DEFAULT_CHARS_PER_TOKEN: u32 = 4;

/// Pricing constants used for every estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Simulated price per 1,000 estimated tokens
    #[serde(default = "default_cost_per_1k_tokens")]
    pub cost_per_1k_tokens: f64,
    /// Approximate characters per token
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: u32,
}

fn default_cost_per_1k_tokens() -> f64 {
    DEFAULT_COST_PER_1K_TOKENS
}

fn default_chars_per_token() -> u32 {
    DEFAULT_CHARS_PER_TOKEN
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            cost_per_1k_tokens: DEFAULT_COST_PER_1K_TOKENS,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

/// Estimated token count and simulated cost for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostEstimate {
    pub tokens: u64,
    pub cost: f64,
}

impl CostEstimate {
    /// Sum of two estimates
    pub fn combine(self, other: CostEstimate) -> CostEstimate {
        CostEstimate {
            tokens: self.tokens + other.tokens,
            cost: self.cost + other.cost,
        }
    }
}

impl Pricing {
    /// Estimate tokens and cost for `text`.
    ///
    /// Tokens are `max(1, chars / chars_per_token)` with characters counted
    /// as Unicode scalar values. This is a deterministic proxy and does not
    /// try to match the engine's tokenizer.
    pub fn estimate(&self, text: &str) -> CostEstimate {
        let chars = text.chars().count() as u64;
        let ratio = u64::from(self.chars_per_token.max(1));
        let tokens = (chars / ratio).max(1);

        CostEstimate {
            tokens,
            cost: self.cost_of(tokens),
        }
    }

    /// Simulated cost of a token count
    pub fn cost_of(&self, tokens: u64) -> f64 {
        (tokens as f64 / 1000.0) * self.cost_per_1k_tokens
    }
}
