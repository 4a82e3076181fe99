//! Tool errors

use thiserror::Error;

use crate::calc::CalcError;
use crate::db::DbError;

/// Failure of a tool call
#[derive(Debug, Error)]
pub enum ToolError {
    /// The input cannot be calculated; the user has to correct it
    #[error(transparent)]
    Calculation(#[from] CalcError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl ToolError {
    /// Whether the caller can fix this by changing the input
    pub fn is_user_error(&self) -> bool {
        matches!(self, ToolError::Calculation(_) | ToolError::InvalidParameter(_))
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
