//! Promillemeter Status Tool
//!
//! Provides runtime status information about the service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Calculator usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# Promillemeter Calculator Instructions

The promillemeter is blood alcohol concentration (BAC, in per-mille) multiplied
by height above sea level (in meters).

## Two ways to get a BAC

1. **Direct entry** - pass `bac_input` (per-mille). Drinks are ignored even if given.
2. **From drinks** - leave `bac_input` out and pass:
   - `weight_kg` (above zero)
   - `gender` ("male" or "female")
   - `drinking_duration_hours` (zero or more)
   - `drinks`: at least one with `volume_ml` > 0 and `alcohol_percentage` > 0

## Height above sea level

- `altitude` is always required. It may be negative (below sea level) or zero.
- `altitude_unit` is "m" (default) or "km". It is stored as meters.

## The estimate

```
alcohol = sum(volume_ml * alcohol_percentage / 100)
bac     = alcohol / (weight_kg * r) - 0.15 * drinking_duration_hours
r       = 0.68 for men, 0.55 for women
```

The result is never below zero. There is no ethanol density correction, so
the numbers run higher than a medical estimate. This is a party calculator.

## Tools

- `calculate` - calculate and (by default) remember the input
- `estimate_bac` / `compute_promillemeter` - the two halves on their own
- `load_saved_input`, `save_input`, `clear_saved_input`
- `list_example_scenarios`, `run_example_scenario`

## Errors

Missing or invalid input is reported as an invalid parameter error naming the
field to fix. Nothing is saved when a calculation fails.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct PromillemeterStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> PromillemeterStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PromillemeterStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
