//! Example Scenario MCP Tools

use serde::Serialize;

use crate::calc::AltitudeUnit;
use crate::db::Database;
use crate::models::{Scenario, UserData};
use super::calculator::{calculate_user_data, CalculateResponse};
use super::error::{ToolError, ToolResult};

/// Scenario listing entry
#[derive(Debug, Serialize)]
pub struct ScenarioSummary {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub user_data: UserData,
}

/// Response for run_example_scenario
#[derive(Debug, Serialize)]
pub struct RunScenarioResponse {
    pub key: &'static str,
    pub name: &'static str,
    pub calculation: CalculateResponse,
}

pub fn list_scenarios() -> Vec<ScenarioSummary> {
    Scenario::all()
        .iter()
        .map(|s| ScenarioSummary {
            key: s.as_str(),
            name: s.display_name(),
            description: s.description(),
            user_data: s.user_data(),
        })
        .collect()
}

/// Load a scenario into the form and calculate it
pub fn run_scenario(db: &Database, name: &str, save: bool) -> ToolResult<RunScenarioResponse> {
    let scenario = Scenario::find(name)
        .ok_or_else(|| ToolError::InvalidParameter(format!("unknown scenario '{}'", name)))?;

    let mut data = UserData::default();
    data.apply_scenario(&scenario);
    let calculation = calculate_user_data(db, &data, AltitudeUnit::Meters, save)?;

    Ok(RunScenarioResponse {
        key: scenario.as_str(),
        name: scenario.display_name(),
        calculation,
    })
}
