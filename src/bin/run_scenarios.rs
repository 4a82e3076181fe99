//! Print the result of every example scenario
//! Usage: cargo run --bin run_scenarios -- [m|km]

use promillemeter::calc::{assemble_result, format_number, format_promillemeter, AltitudeUnit};
use promillemeter::models::{Scenario, UserData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let unit_arg = args.get(1).map(|s| s.as_str()).unwrap_or("m");
    let unit = AltitudeUnit::from_str(unit_arg)
        .ok_or_else(|| format!("Unknown unit: {} (use m or km)", unit_arg))?;

    for scenario in Scenario::all() {
        let mut data = UserData::default();
        data.apply_scenario(scenario);

        println!("\n{}", scenario.display_name());
        println!("  {}", scenario.description());

        match assemble_result(&data) {
            Ok(result) => {
                println!("  BAC: {} ‰", format_number(result.bac));
                println!("  Altitude: {} m", format_number(result.altitude_m));
                println!("  Promillemeter: {}", format_promillemeter(&result, unit));
            }
            Err(e) => println!("  Error: {}", e),
        }
    }

    Ok(())
}
