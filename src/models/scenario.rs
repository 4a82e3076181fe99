//! Example scenarios
//!
//! Preconfigured inputs that show off the extremes of the metric.

use serde::Serialize;

use super::drink::Drink;
use super::user_data::{Gender, UserData};

/// A named example input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    CognacPartyOnMir,
    CommunionOnMoon,
    DrunkestManAlive,
}

impl Scenario {
    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::CognacPartyOnMir,
            Scenario::CommunionOnMoon,
            Scenario::DrunkestManAlive,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::CognacPartyOnMir => "cognac_party_on_mir",
            Scenario::CommunionOnMoon => "communion_on_moon",
            Scenario::DrunkestManAlive => "drunkest_man_alive",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Scenario::CognacPartyOnMir => "Cognac Party on Mir",
            Scenario::CommunionOnMoon => "Communion on Moon",
            Scenario::DrunkestManAlive => "Drunkest Man Alive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::CognacPartyOnMir => "Enjoying cognac on the Mir space station",
            Scenario::CommunionOnMoon => "A small sip on the lunar surface",
            Scenario::DrunkestManAlive => "Record-breaking BAC at sea level",
        }
    }

    /// Look up a scenario by key or display name, ignoring case
    pub fn find(name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase().replace([' ', '-'], "_");
        Self::all().iter().copied().find(|s| {
            s.as_str() == wanted || s.display_name().to_lowercase().replace(' ', "_") == wanted
        })
    }

    /// The input this scenario fills the form with
    pub fn user_data(&self) -> UserData {
        let base = UserData {
            weight_kg: Some(70.0),
            gender: Gender::Male,
            altitude_m: None,
            bac_input: None,
            drinks: Vec::new(),
            drinking_duration_hours: Some(0.0),
        };

        match self {
            Scenario::CognacPartyOnMir => UserData {
                bac_input: Some(1.0),
                altitude_m: Some(350_000.0),
                ..base
            },
            Scenario::CommunionOnMoon => UserData {
                altitude_m: Some(384_400_000.0),
                drinks: vec![Drink::new("moon-drink", 5.0, 10.0)],
                ..base
            },
            Scenario::DrunkestManAlive => UserData {
                bac_input: Some(14.8),
                altitude_m: Some(105.0),
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_key_and_display_name() {
        assert_eq!(Scenario::find("communion_on_moon"), Some(Scenario::CommunionOnMoon));
        assert_eq!(Scenario::find("Drunkest Man Alive"), Some(Scenario::DrunkestManAlive));
        assert_eq!(Scenario::find("cognac-party-on-mir"), Some(Scenario::CognacPartyOnMir));
        assert_eq!(Scenario::find("pub crawl"), None);
    }

    #[test]
    fn test_moon_scenario_estimates_from_drinks() {
        let data = Scenario::CommunionOnMoon.user_data();
        assert_eq!(data.bac_input, None);
        assert_eq!(data.drinks.len(), 1);
        assert_eq!(data.altitude_m, Some(384_400_000.0));
    }

    #[test]
    fn test_apply_scenario_replaces_form() {
        let mut data = UserData::default();
        data.add_drink(500.0, 4.7);
        data.apply_scenario(&Scenario::DrunkestManAlive);
        assert_eq!(data.bac_input, Some(14.8));
        assert_eq!(data.altitude_m, Some(105.0));
        assert!(data.drinks.is_empty());
    }
}
