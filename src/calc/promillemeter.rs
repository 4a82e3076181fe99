//! Promillemeter calculation
//!
//! BAC times altitude, and the assembly of a full result from user input.

use crate::models::{BacSource, CalculationResult, UserData};
use super::bac::{estimate_bac, widmark_bac};
use super::error::{CalcError, Field};

/// BAC times meters above sea level.
///
/// Linear and sign preserving: below sea level gives a negative value.
pub fn compute_promillemeter(bac: f64, altitude_m: f64) -> f64 {
    bac * altitude_m
}

/// Turn a BAC source into a per-mille value, checking computed inputs
pub fn resolve_bac(source: BacSource<'_>) -> Result<f64, CalcError> {
    match source {
        BacSource::Direct(bac) => Ok(bac),
        BacSource::Computed {
            drinks,
            weight_kg,
            gender,
            duration_hours,
        } => estimate_bac(drinks, weight_kg, gender, duration_hours),
    }
}

/// Run one calculation.
///
/// The BAC is resolved first (direct value or estimate from drinks), then the
/// altitude is required. Fails on the first missing or invalid input; no
/// partial result is ever produced.
pub fn assemble_result(data: &UserData) -> Result<CalculationResult, CalcError> {
    let source = data.bac_source()?;
    assemble_from_source(source, data.altitude_m)
}

/// Finish a calculation from a source returned by `UserData::bac_source`,
/// whose computed inputs are already checked.
pub(crate) fn assemble_from_source(
    source: BacSource<'_>,
    altitude_m: Option<f64>,
) -> Result<CalculationResult, CalcError> {
    let bac = match source {
        BacSource::Direct(bac) => bac,
        BacSource::Computed {
            drinks,
            weight_kg,
            gender,
            duration_hours,
        } => widmark_bac(drinks, weight_kg, gender, duration_hours),
    };

    let altitude_m = altitude_m.ok_or(CalcError::MissingInput(Field::Altitude))?;
    if !altitude_m.is_finite() {
        return Err(CalcError::invalid(Field::Altitude, "must be a finite number"));
    }

    let promillemeter = compute_promillemeter(bac, altitude_m);
    tracing::debug!(
        direct = matches!(source, BacSource::Direct(_)),
        bac,
        altitude_m,
        promillemeter,
        "calculated promillemeter"
    );

    Ok(CalculationResult {
        bac,
        promillemeter,
        altitude_m,
    })
}
