//! Blood alcohol estimation
//!
//! Widmark-style estimate from consumed drinks, body weight and time spent
//! drinking.
//!
//! Alcohol mass is taken as `volume_ml * percentage / 100` with no ethanol
//! density factor (0.789 g/ml). The numbers come out higher than a medically
//! accurate estimate and every expected value depends on that.

use crate::models::{Drink, Gender};
use super::error::{CalcError, Field};

/// Body water distribution ratio for men
pub const MALE_DISTRIBUTION_RATIO: f64 = 0.68;
/// Body water distribution ratio for women
pub const FEMALE_DISTRIBUTION_RATIO: f64 = 0.55;
/// Per-mille eliminated per hour of drinking
pub const ELIMINATION_RATE_PER_HOUR: f64 = 0.15;

/// Total pure alcohol over all drinks
pub fn total_alcohol_grams(drinks: &[Drink]) -> f64 {
    drinks.iter().map(Drink::alcohol_grams).sum()
}

/// Check that every drink has a non-negative volume and 0-100 percent alcohol
pub fn check_drinks(drinks: &[Drink]) -> Result<(), CalcError> {
    for drink in drinks {
        if !drink.volume_ml.is_finite() || drink.volume_ml < 0.0 {
            return Err(CalcError::invalid(
                Field::Drinks,
                format!("drink '{}' has a negative volume", drink.id),
            ));
        }
        if !(0.0..=100.0).contains(&drink.alcohol_percentage) {
            return Err(CalcError::invalid(
                Field::Drinks,
                format!("drink '{}' must be between 0 and 100 percent", drink.id),
            ));
        }
    }
    Ok(())
}

/// Check that a drinking duration is zero or more hours
pub fn check_duration(duration_hours: f64) -> Result<(), CalcError> {
    if !duration_hours.is_finite() || duration_hours < 0.0 {
        return Err(CalcError::invalid(
            Field::DrinkingDuration,
            "must be zero or more hours",
        ));
    }
    Ok(())
}

/// Check that a body weight can be divided by
pub fn check_weight(weight_kg: f64) -> Result<(), CalcError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(CalcError::DivideByZeroRisk { weight_kg });
    }
    Ok(())
}

/// Estimate BAC in per-mille. Never negative.
///
/// # Arguments
/// * `drinks` - Everything consumed
/// * `weight_kg` - Body weight, must be above zero
/// * `gender` - Selects the distribution ratio
/// * `duration_hours` - Time spent drinking, zero or more
pub fn estimate_bac(
    drinks: &[Drink],
    weight_kg: f64,
    gender: Gender,
    duration_hours: f64,
) -> Result<f64, CalcError> {
    check_weight(weight_kg)?;
    check_duration(duration_hours)?;
    check_drinks(drinks)?;

    Ok(widmark_bac(drinks, weight_kg, gender, duration_hours))
}

/// The formula itself. Inputs must already have passed the checks above.
pub(crate) fn widmark_bac(
    drinks: &[Drink],
    weight_kg: f64,
    gender: Gender,
    duration_hours: f64,
) -> f64 {
    let ratio = gender.distribution_ratio();
    let bac = total_alcohol_grams(drinks) / (weight_kg * ratio)
        - ELIMINATION_RATE_PER_HOUR * duration_hours;

    bac.max(0.0)
}
