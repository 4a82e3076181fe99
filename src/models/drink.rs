//! Drink model
//!
//! A single drink entered by the user: volume and alcohol by volume.

use serde::{Deserialize, Serialize};

/// A consumed drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    /// Opaque identifier, unique within one `UserData` record
    pub id: String,
    /// Volume in milliliters
    pub volume_ml: f64,
    /// Alcohol by volume (0-100)
    pub alcohol_percentage: f64,
}

impl Drink {
    pub fn new(id: impl Into<String>, volume_ml: f64, alcohol_percentage: f64) -> Self {
        Self {
            id: id.into(),
            volume_ml,
            alcohol_percentage,
        }
    }

    /// Pure alcohol in this drink.
    ///
    /// Volume times alcohol fraction, with no ethanol density factor. The
    /// result is treated as grams by the estimator.
    pub fn alcohol_grams(&self) -> f64 {
        self.volume_ml * (self.alcohol_percentage / 100.0)
    }

    /// Whether this drink contributes any alcohol at all
    pub fn has_alcohol(&self) -> bool {
        self.volume_ml > 0.0 && self.alcohol_percentage > 0.0
    }
}
