//! Promillemeter Library
//!
//! Blood alcohol concentration estimation and the promillemeter metric
//! (BAC times meters above sea level), with a local store for the last input.

pub mod build_info;
pub mod calc;
pub mod db;
pub mod mcp;
pub mod models;
pub mod tools;
