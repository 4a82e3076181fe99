//! Promillemeter MCP Server Implementation
//!
//! Exposes the calculator, saved input and example scenarios as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::tools::calculator::{self, CalculationRequest, EstimateRequest};
use crate::tools::saved_input;
use crate::tools::scenarios;
use crate::tools::status::StatusTracker;
use crate::tools::ToolError;

/// Promillemeter MCP Service
#[derive(Clone)]
pub struct PromillemeterService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<PromillemeterService>,
}

impl PromillemeterService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateParams {
    #[serde(flatten)]
    pub input: CalculationRequest,
    /// Remember this input after a successful calculation (default true)
    #[serde(default = "default_save")]
    pub save: bool,
}

fn default_save() -> bool { true }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComputePromillemeterParams {
    /// BAC in per-mille
    pub bac: f64,
    /// Height above sea level, may be negative
    pub altitude: f64,
    /// "m" or "km" (default m)
    #[serde(default = "default_altitude_unit")]
    pub altitude_unit: String,
}

fn default_altitude_unit() -> String { "m".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RunScenarioParams {
    /// Scenario key or name, e.g. "communion_on_moon"
    pub name: String,
    /// Remember the scenario input (default false)
    #[serde(default)]
    pub save: bool,
}

// ============================================================================
// Helpers
// ============================================================================

/// User-correctable failures become invalid params, the rest internal errors
fn tool_error(e: ToolError) -> McpError {
    if let ToolError::Calculation(calc_error) = &e {
        let data = serde_json::json!({ "field": calc_error.field().as_str() });
        McpError::invalid_params(e.to_string(), Some(data))
    } else if e.is_user_error() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        tracing::error!("tool failed: {}", e);
        McpError::internal_error(e.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl PromillemeterService {
    // --- Status ---

    #[tool(description = "Get the current status of the Promillemeter service including build info, database status, and process information")]
    async fn promillemeter_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the calculator: input modes, the BAC formula, units and errors. Call this when unsure how to fill in calculate.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Calculate the promillemeter (BAC x meters above sea level). Use bac_input for a direct BAC, or weight_kg, gender, drinking_duration_hours and drinks to estimate it. The input is saved after a successful calculation unless save is false.")]
    fn calculate(&self, Parameters(p): Parameters<CalculateParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::calculate(&self.database, p.input, p.save).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Estimate BAC in per-mille from drinks, body weight, gender and drinking duration")]
    fn estimate_bac(&self, Parameters(p): Parameters<EstimateRequest>) -> Result<CallToolResult, McpError> {
        let result = calculator::estimate(p).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Multiply a BAC by a height above sea level. Negative heights give negative results.")]
    fn compute_promillemeter(&self, Parameters(p): Parameters<ComputePromillemeterParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::promillemeter(p.bac, p.altitude, &p.altitude_unit).map_err(tool_error)?;
        json_result(&result)
    }

    // --- Saved Input ---

    #[tool(description = "Load the last saved calculator input")]
    fn load_saved_input(&self) -> Result<CallToolResult, McpError> {
        let result = saved_input::load_saved_input(&self.database).map_err(tool_error)?;
        match result {
            Some(saved) => json_result(&saved),
            None => Ok(CallToolResult::success(vec![Content::text(r#"{"saved_input": null}"#)])),
        }
    }

    #[tool(description = "Save calculator input without calculating, replacing any previously saved input")]
    fn save_input(&self, Parameters(p): Parameters<CalculationRequest>) -> Result<CallToolResult, McpError> {
        let result = saved_input::save_input(&self.database, p).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Clear the saved calculator input")]
    fn clear_saved_input(&self) -> Result<CallToolResult, McpError> {
        let result = saved_input::clear_saved_input(&self.database).map_err(tool_error)?;
        json_result(&result)
    }

    // --- Scenarios ---

    #[tool(description = "List the example scenarios with their inputs")]
    fn list_example_scenarios(&self) -> Result<CallToolResult, McpError> {
        json_result(&scenarios::list_scenarios())
    }

    #[tool(description = "Load an example scenario and calculate it")]
    fn run_example_scenario(&self, Parameters(p): Parameters<RunScenarioParams>) -> Result<CallToolResult, McpError> {
        let result = scenarios::run_scenario(&self.database, &p.name, p.save).map_err(tool_error)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PromillemeterService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "promillemeter".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Promillemeter".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Promillemeter - blood alcohol concentration times height above sea level. \
                 Call calculator_instructions first if unsure. \
                 Calculate: calculate, estimate_bac, compute_promillemeter. \
                 Saved input: load_saved_input, save_input, clear_saved_input. \
                 Examples: list_example_scenarios, run_example_scenario. \
                 Status: promillemeter_status."
                    .into(),
            ),
        }
    }
}
