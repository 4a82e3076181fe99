//! Calculation module
//!
//! BAC estimation, the promillemeter metric and result formatting.

pub mod bac;
pub mod error;
pub mod promillemeter;
pub mod units;

pub use bac::{
    estimate_bac, total_alcohol_grams, ELIMINATION_RATE_PER_HOUR, FEMALE_DISTRIBUTION_RATIO,
    MALE_DISTRIBUTION_RATIO,
};
pub use error::{CalcError, Field};
pub use promillemeter::{assemble_result, compute_promillemeter, resolve_bac};
pub use units::{format_number, format_promillemeter, share_text, AltitudeUnit};
