//! Cumulative fiscal ledger

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::estimate::CostEstimate;

/// Running totals held by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_tokens_used: u64,
    pub total_cost_incurred: f64,
}

/// Append-only ledger of estimated tokens and simulated cost.
///
/// Both counters sit behind one lock so an accumulation can never be
/// observed half-applied, even when the owning brain is shared.
#[derive(Debug, Default)]
pub struct FiscalLedger {
    totals: Mutex<LedgerTotals>,
}

impl FiscalLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerTotals> {
        // Totals are plain numbers, a poisoned guard still holds a valid state
        self.totals.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add one call's totals
    pub fn record(&self, call: CostEstimate) -> LedgerTotals {
        let mut totals = self.lock();
        totals.total_tokens_used += call.tokens;
        totals.total_cost_incurred += call.cost;
        *totals
    }

    /// Current totals
    pub fn totals(&self) -> LedgerTotals {
        *self.lock()
    }
}

/// Snapshot of a brain's fiscal state plus its fixed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalSummary {
    pub total_tokens_used: u64,
    pub total_cost_incurred: f64,
    pub cost_per_1k_tokens: f64,
    pub model: String,
}

impl std::fmt::Display for FiscalSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total tokens used:    {}", self.total_tokens_used)?;
        writeln!(f, "Total cost incurred:  ${:.6}", self.total_cost_incurred)?;
        writeln!(f, "Cost rate:            ${}/1k tokens", self.cost_per_1k_tokens)?;
        write!(f, "Model:                {}", self.model)
    }
}
