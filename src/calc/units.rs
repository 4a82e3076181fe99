//! Altitude units and result formatting
//!
//! Display helpers only. Stored altitudes are always meters; these functions
//! convert for entry and presentation.

use serde::{Deserialize, Serialize};

use crate::models::CalculationResult;

/// Meters per kilometer
pub const M_PER_KM: f64 = 1000.0;

/// Unit the user enters and reads altitude in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeUnit {
    #[default]
    Meters,
    Kilometers,
}

impl AltitudeUnit {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Some(AltitudeUnit::Meters),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Some(AltitudeUnit::Kilometers)
            }
            _ => None,
        }
    }

    /// Meters in one of this unit
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            AltitudeUnit::Meters => 1.0,
            AltitudeUnit::Kilometers => M_PER_KM,
        }
    }

    /// Unit label for a promillemeter value
    pub fn result_label(&self) -> &'static str {
        match self {
            AltitudeUnit::Meters => "‰m",
            AltitudeUnit::Kilometers => "‰km",
        }
    }

    /// Convert an altitude entered in this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Convert meters to this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }
}

/// Format a number for display.
///
/// Whole numbers get no decimals, anything else gets two. The integer part is
/// grouped in thousands with spaces, e.g. `4037815.13` becomes `4 037 815.13`.
pub fn format_number(value: f64) -> String {
    // no "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    let formatted = if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    };

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}

/// Promillemeter value in the given unit, e.g. `1 554 ‰m`
pub fn format_promillemeter(result: &CalculationResult, unit: AltitudeUnit) -> String {
    format!(
        "{} {}",
        format_number(unit.from_meters(result.promillemeter)),
        unit.result_label()
    )
}

/// Text for sharing a result
pub fn share_text(result: &CalculationResult, unit: AltitudeUnit) -> String {
    format!("My Promillemeter result: {}", format_promillemeter(result, unit))
}
