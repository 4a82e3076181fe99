//! Data models
//!
//! Value types for the calculator and the persisted last input.

mod calculation;
mod drink;
mod saved_input;
mod scenario;
mod user_data;

pub use calculation::CalculationResult;
pub use drink::Drink;
pub use saved_input::{SavedInput, STORAGE_KEY};
pub use scenario::Scenario;
pub use user_data::{BacSource, Gender, UserData};
