//! Calculation result model

use serde::{Deserialize, Serialize};

/// Snapshot of one calculation. Never mutated after it is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Resolved blood alcohol concentration in per-mille
    pub bac: f64,
    /// BAC multiplied by altitude
    pub promillemeter: f64,
    /// Altitude used, in meters above sea level
    pub altitude_m: f64,
}
