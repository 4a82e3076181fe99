//! Calculation errors

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// An input field of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Weight,
    DrinkingDuration,
    Drinks,
    Altitude,
    BacInput,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Weight => "weight_kg",
            Field::DrinkingDuration => "drinking_duration_hours",
            Field::Drinks => "drinks",
            Field::Altitude => "altitude_m",
            Field::BacInput => "bac_input",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Field::Weight => "body weight",
            Field::DrinkingDuration => "drinking duration",
            Field::Drinks => "at least one alcoholic drink",
            Field::Altitude => "height above sea level",
            Field::BacInput => "blood alcohol concentration",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why a calculation could not run. All of these are user-correctable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Missing input: {0} is required")]
    MissingInput(Field),

    #[error("Body weight must be above zero to estimate BAC (got {weight_kg} kg)")]
    DivideByZeroRisk { weight_kg: f64 },

    #[error("Invalid {}: {reason}", .field.as_str())]
    InvalidInput { field: Field, reason: String },
}

impl CalcError {
    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// The field the user has to fix
    pub fn field(&self) -> Field {
        match self {
            CalcError::MissingInput(field) => *field,
            CalcError::DivideByZeroRisk { .. } => Field::Weight,
            CalcError::InvalidInput { field, .. } => *field,
        }
    }
}
