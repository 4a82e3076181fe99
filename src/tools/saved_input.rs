//! Saved Input MCP Tools
//!
//! Load, save and clear the last used calculator input.

use serde::Serialize;

use crate::db::Database;
use crate::models::{SavedInput, UserData};
use super::calculator::CalculationRequest;
use super::error::ToolResult;

/// Response for save_input
#[derive(Debug, Serialize)]
pub struct SaveInputResponse {
    pub success: bool,
    pub user_data: UserData,
}

/// Response for clear_saved_input
#[derive(Debug, Serialize)]
pub struct ClearSavedInputResponse {
    pub success: bool,
    pub cleared: bool,
}

/// Get the last saved input
pub fn load_saved_input(db: &Database) -> ToolResult<Option<SavedInput>> {
    Ok(db.with_conn(SavedInput::load)?)
}

/// Save input without calculating
pub fn save_input(db: &Database, request: CalculationRequest) -> ToolResult<SaveInputResponse> {
    let (user_data, _) = request.into_user_data()?;
    db.with_conn(|conn| SavedInput::save(conn, &user_data))?;
    Ok(SaveInputResponse {
        success: true,
        user_data,
    })
}

/// Forget the saved input
pub fn clear_saved_input(db: &Database) -> ToolResult<ClearSavedInputResponse> {
    let cleared = db.with_conn(SavedInput::clear)?;
    Ok(ClearSavedInputResponse {
        success: true,
        cleared,
    })
}
