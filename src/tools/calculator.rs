//! Calculator MCP Tools
//!
//! Turns raw tool parameters into `UserData`, runs the calculation and shapes
//! the response for display.

use std::collections::HashSet;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::calc::promillemeter::assemble_from_source;
use crate::calc::{self, format_number, format_promillemeter, share_text, AltitudeUnit};
use crate::db::Database;
use crate::models::{BacSource, CalculationResult, Drink, Gender, SavedInput, UserData};
use super::error::{ToolError, ToolResult};

// ============================================================================
// Requests
// ============================================================================

/// One drink as entered
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct DrinkRequest {
    /// Optional id; generated when omitted
    pub id: Option<String>,
    /// Volume in milliliters
    pub volume_ml: f64,
    /// Alcohol by volume, 0-100
    pub alcohol_percentage: f64,
}

/// Raw calculator input
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CalculationRequest {
    /// Body weight in kg (needed when estimating from drinks)
    pub weight_kg: Option<f64>,
    /// "male" or "female" (default male)
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Height above sea level, in `altitude_unit`. May be negative.
    pub altitude: Option<f64>,
    /// "m" or "km" (default m)
    #[serde(default = "default_altitude_unit")]
    pub altitude_unit: String,
    /// Direct BAC in per-mille. When set, drinks are ignored.
    pub bac_input: Option<f64>,
    /// Drinks to estimate BAC from
    #[serde(default)]
    pub drinks: Vec<DrinkRequest>,
    /// Hours spent drinking
    pub drinking_duration_hours: Option<f64>,
}

fn default_gender() -> String { "male".to_string() }
fn default_altitude_unit() -> String { "m".to_string() }

/// Input for a bare BAC estimate
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct EstimateRequest {
    pub drinks: Vec<DrinkRequest>,
    pub weight_kg: f64,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub drinking_duration_hours: f64,
}

pub fn parse_gender(s: &str) -> ToolResult<Gender> {
    Gender::from_str(s).ok_or_else(|| {
        ToolError::InvalidParameter(format!("unknown gender '{}', use male or female", s))
    })
}

pub fn parse_altitude_unit(s: &str) -> ToolResult<AltitudeUnit> {
    AltitudeUnit::from_str(s).ok_or_else(|| {
        ToolError::InvalidParameter(format!("unknown altitude unit '{}', use m or km", s))
    })
}

/// Reject NaN and infinities before they reach storage or the calculation
fn finite(name: &str, value: Option<f64>) -> ToolResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(ToolError::InvalidParameter(format!(
            "{} must be a finite number",
            name
        ))),
        _ => Ok(value),
    }
}

/// Add requested drinks to `data`. Explicit ids must be unique; generated ids
/// skip every id the request reserves.
fn collect_drinks(data: &mut UserData, drinks: Vec<DrinkRequest>) -> ToolResult<()> {
    let mut reserved: HashSet<String> = data.drinks.iter().map(|d| d.id.clone()).collect();
    for id in drinks.iter().filter_map(|d| d.id.as_ref()) {
        if !reserved.insert(id.clone()) {
            return Err(ToolError::InvalidParameter(format!("duplicate drink id '{}'", id)));
        }
    }

    let mut n = data.drinks.len();
    for d in drinks {
        finite("volume_ml", Some(d.volume_ml))?;
        finite("alcohol_percentage", Some(d.alcohol_percentage))?;
        let id = match d.id {
            Some(id) => id,
            None => loop {
                n += 1;
                let candidate = format!("drink-{}", n);
                if reserved.insert(candidate.clone()) {
                    break candidate;
                }
            },
        };
        data.drinks.push(Drink::new(id, d.volume_ml, d.alcohol_percentage));
    }
    Ok(())
}

impl CalculationRequest {
    /// Build the stored form of this request. Altitude is converted to meters.
    pub fn into_user_data(self) -> ToolResult<(UserData, AltitudeUnit)> {
        let gender = parse_gender(&self.gender)?;
        let unit = parse_altitude_unit(&self.altitude_unit)?;

        let mut data = UserData {
            weight_kg: finite("weight_kg", self.weight_kg)?,
            gender,
            altitude_m: finite("altitude", self.altitude.map(|a| unit.to_meters(a)))?,
            bac_input: finite("bac_input", self.bac_input)?,
            drinks: Vec::with_capacity(self.drinks.len()),
            drinking_duration_hours: finite("drinking_duration_hours", self.drinking_duration_hours)?,
        };
        collect_drinks(&mut data, self.drinks)?;

        Ok((data, unit))
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Response for calculate
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: CalculationResult,
    /// "direct" or "drinks"
    pub bac_source: &'static str,
    /// Only set when estimated from drinks
    pub total_alcohol_grams: Option<f64>,
    pub altitude_display: String,
    pub promillemeter_display: String,
    pub share_text: String,
    pub saved: bool,
}

/// Response for estimate_bac
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub bac: f64,
    pub total_alcohol_grams: f64,
    pub distribution_ratio: f64,
}

/// Response for compute_promillemeter
#[derive(Debug, Serialize)]
pub struct PromillemeterResponse {
    pub bac: f64,
    pub altitude_m: f64,
    pub promillemeter: f64,
    pub promillemeter_display: String,
}

// ============================================================================
// Calculator Tools
// ============================================================================

/// Calculate from raw input; on success optionally remember the input
pub fn calculate(db: &Database, request: CalculationRequest, save: bool) -> ToolResult<CalculateResponse> {
    let (data, unit) = request.into_user_data()?;
    calculate_user_data(db, &data, unit, save)
}

/// Calculate an already built `UserData`.
///
/// Input is only saved after the calculation succeeded, so a failed attempt
/// never overwrites the last good input.
pub fn calculate_user_data(
    db: &Database,
    data: &UserData,
    unit: AltitudeUnit,
    save: bool,
) -> ToolResult<CalculateResponse> {
    let source = data.bac_source()?;
    let result = assemble_from_source(source, data.altitude_m)?;

    let (bac_source, total_alcohol_grams) = match source {
        BacSource::Direct(_) => ("direct", None),
        BacSource::Computed { drinks, .. } => ("drinks", Some(calc::total_alcohol_grams(drinks))),
    };

    if save {
        db.with_conn(|conn| SavedInput::save(conn, data))?;
    }

    tracing::info!(
        bac_source,
        promillemeter = result.promillemeter,
        saved = save,
        "calculation complete"
    );

    Ok(CalculateResponse {
        result,
        bac_source,
        total_alcohol_grams,
        altitude_display: format!("{} {}", format_number(unit.from_meters(result.altitude_m)), unit_suffix(unit)),
        promillemeter_display: format_promillemeter(&result, unit),
        share_text: share_text(&result, unit),
        saved: save,
    })
}

fn unit_suffix(unit: AltitudeUnit) -> &'static str {
    match unit {
        AltitudeUnit::Meters => "m",
        AltitudeUnit::Kilometers => "km",
    }
}

/// Estimate BAC from drinks alone
pub fn estimate(request: EstimateRequest) -> ToolResult<EstimateResponse> {
    let gender = parse_gender(&request.gender)?;
    let mut data = UserData {
        drinks: Vec::with_capacity(request.drinks.len()),
        ..UserData::default()
    };
    collect_drinks(&mut data, request.drinks)?;

    let bac = calc::estimate_bac(&data.drinks, request.weight_kg, gender, request.drinking_duration_hours)?;

    Ok(EstimateResponse {
        bac,
        total_alcohol_grams: calc::total_alcohol_grams(&data.drinks),
        distribution_ratio: gender.distribution_ratio(),
    })
}

/// Multiply a BAC by an altitude given in `unit`
pub fn promillemeter(bac: f64, altitude: f64, unit: &str) -> ToolResult<PromillemeterResponse> {
    let unit = parse_altitude_unit(unit)?;
    let altitude_m = unit.to_meters(altitude);
    finite("bac", Some(bac))?;
    finite("altitude", Some(altitude_m))?;
    let result = CalculationResult {
        bac,
        promillemeter: calc::compute_promillemeter(bac, altitude_m),
        altitude_m,
    };

    Ok(PromillemeterResponse {
        bac,
        altitude_m,
        promillemeter: result.promillemeter,
        promillemeter_display: format_promillemeter(&result, unit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{CalcError, Field};
    use crate::db::migrations::run_migrations;

    fn test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    fn direct_request(bac: f64, altitude: Option<f64>) -> CalculationRequest {
        CalculationRequest {
            weight_kg: None,
            gender: default_gender(),
            altitude,
            altitude_unit: default_altitude_unit(),
            bac_input: Some(bac),
            drinks: Vec::new(),
            drinking_duration_hours: None,
        }
    }

    #[test]
    fn test_request_defaults() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"bac_input": 1.0, "altitude": 10}"#).unwrap();
        assert_eq!(request.gender, "male");
        assert_eq!(request.altitude_unit, "m");
        assert!(request.drinks.is_empty());
    }

    #[test]
    fn test_kilometers_are_stored_as_meters() {
        let mut request = direct_request(1.0, Some(350.0));
        request.altitude_unit = "km".to_string();
        let (data, unit) = request.into_user_data().unwrap();
        assert_eq!(unit, AltitudeUnit::Kilometers);
        assert_eq!(data.altitude_m, Some(350_000.0));
    }

    #[test]
    fn test_unknown_gender() {
        let mut request = direct_request(1.0, Some(1.0));
        request.gender = "robot".to_string();
        assert!(matches!(
            request.into_user_data(),
            Err(ToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_calculate_direct_and_save() {
        let db = test_db();
        let response = calculate(&db, direct_request(14.8, Some(105.0)), true).unwrap();

        assert_eq!(response.bac_source, "direct");
        assert_eq!(response.total_alcohol_grams, None);
        assert_eq!(response.promillemeter_display, "1 554 ‰m");
        assert_eq!(response.altitude_display, "105 m");
        assert!(response.saved);

        let saved = db.with_conn(SavedInput::load).unwrap().unwrap();
        assert_eq!(saved.user_data.bac_input, Some(14.8));
        assert_eq!(saved.user_data.altitude_m, Some(105.0));
    }

    #[test]
    fn test_calculate_from_drinks() {
        let db = test_db();
        let request = CalculationRequest {
            weight_kg: Some(70.0),
            gender: "male".to_string(),
            altitude: Some(384_400.0),
            altitude_unit: "km".to_string(),
            bac_input: None,
            drinks: vec![DrinkRequest { id: None, volume_ml: 5.0, alcohol_percentage: 10.0 }],
            drinking_duration_hours: Some(0.0),
        };
        let response = calculate(&db, request, false).unwrap();

        assert_eq!(response.bac_source, "drinks");
        assert!((response.total_alcohol_grams.unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(response.result.altitude_m, 384_400_000.0);
        assert!(response.promillemeter_display.ends_with("‰km"));
        assert!(db.with_conn(SavedInput::load).unwrap().is_none());
    }

    #[test]
    fn test_failed_calculation_does_not_save() {
        let db = test_db();
        calculate(&db, direct_request(0.5, Some(10.0)), true).unwrap();

        let err = calculate(&db, direct_request(2.0, None), true).unwrap_err();
        assert!(err.is_user_error());
        assert!(matches!(
            err,
            ToolError::Calculation(CalcError::MissingInput(Field::Altitude))
        ));

        let saved = db.with_conn(SavedInput::load).unwrap().unwrap();
        assert_eq!(saved.user_data.bac_input, Some(0.5));
    }

    #[test]
    fn test_estimate() {
        let request = EstimateRequest {
            drinks: vec![DrinkRequest { id: None, volume_ml: 150.0, alcohol_percentage: 12.0 }],
            weight_kg: 60.0,
            gender: "female".to_string(),
            drinking_duration_hours: 1.0,
        };
        let response = estimate(request).unwrap();
        assert!((response.total_alcohol_grams - 18.0).abs() < 1e-12);
        assert_eq!(response.distribution_ratio, 0.55);
        assert!((response.bac - (18.0 / 33.0 - 0.15)).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_rejects_zero_weight() {
        let request = EstimateRequest {
            drinks: Vec::new(),
            weight_kg: 0.0,
            gender: "male".to_string(),
            drinking_duration_hours: 0.0,
        };
        assert!(matches!(
            estimate(request),
            Err(ToolError::Calculation(CalcError::DivideByZeroRisk { .. }))
        ));
    }

    #[test]
    fn test_estimate_rejects_negative_duration() {
        // no alcohol at all must not turn into a BAC through a negative duration
        let request = EstimateRequest {
            drinks: vec![DrinkRequest { id: None, volume_ml: 0.0, alcohol_percentage: 0.0 }],
            weight_kg: 70.0,
            gender: "male".to_string(),
            drinking_duration_hours: -10.0,
        };
        assert!(matches!(
            estimate(request),
            Err(ToolError::Calculation(CalcError::InvalidInput { field: Field::DrinkingDuration, .. }))
        ));
    }

    #[test]
    fn test_generated_drink_ids_skip_explicit_ones() {
        let mut request = direct_request(1.0, Some(1.0));
        request.drinks = vec![
            DrinkRequest { id: None, volume_ml: 330.0, alcohol_percentage: 4.5 },
            DrinkRequest { id: Some("drink-1".to_string()), volume_ml: 40.0, alcohol_percentage: 40.0 },
        ];
        let (data, _) = request.into_user_data().unwrap();
        let ids: Vec<&str> = data.drinks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["drink-2", "drink-1"]);
    }

    #[test]
    fn test_duplicate_drink_ids_are_rejected() {
        let mut request = direct_request(1.0, Some(1.0));
        request.drinks = vec![
            DrinkRequest { id: Some("x".to_string()), volume_ml: 330.0, alcohol_percentage: 4.5 },
            DrinkRequest { id: Some("x".to_string()), volume_ml: 40.0, alcohol_percentage: 40.0 },
        ];
        assert!(matches!(
            request.into_user_data(),
            Err(ToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_overflowing_altitude_is_rejected() {
        let mut request = direct_request(1.0, Some(1e306));
        request.altitude_unit = "km".to_string();
        assert!(matches!(
            request.into_user_data(),
            Err(ToolError::InvalidParameter(_))
        ));

        let request = direct_request(f64::NAN, Some(1.0));
        assert!(matches!(
            request.into_user_data(),
            Err(ToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_promillemeter_tool() {
        let response = promillemeter(1.0, 350.0, "km").unwrap();
        assert_eq!(response.altitude_m, 350_000.0);
        assert_eq!(response.promillemeter, 350_000.0);
        assert_eq!(response.promillemeter_display, "350 ‰km");
        assert!(promillemeter(1.0, 1.0, "furlong").is_err());
        assert!(promillemeter(1.0, 1e306, "km").is_err());
    }
}
