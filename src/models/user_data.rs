//! User data model
//!
//! The full form state: body data, altitude, and either a direct BAC value or
//! the drinks it should be estimated from. This is also the record persisted
//! as the last used input.

use serde::{Deserialize, Serialize};

use crate::calc::{bac, CalcError, Field};
use super::drink::Drink;
use super::scenario::Scenario;

/// Gender, used only to select the body water distribution ratio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "mann" => Some(Gender::Male),
            "female" | "f" | "woman" | "kvinne" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Widmark distribution ratio for this gender
    pub fn distribution_ratio(&self) -> f64 {
        match self {
            Gender::Male => crate::calc::MALE_DISTRIBUTION_RATIO,
            Gender::Female => crate::calc::FEMALE_DISTRIBUTION_RATIO,
        }
    }
}

/// Where the BAC of a calculation comes from.
///
/// A direct value always wins over drink data, even when drinks are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BacSource<'a> {
    /// BAC entered directly, in per-mille
    Direct(f64),
    /// BAC estimated from drinks
    Computed {
        drinks: &'a [Drink],
        weight_kg: f64,
        gender: Gender,
        duration_hours: f64,
    },
}

/// Everything the user has entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    /// Body weight in kilograms, only needed when estimating from drinks
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub gender: Gender,
    /// Meters above sea level; negative below sea level
    pub altitude_m: Option<f64>,
    /// Directly entered BAC in per-mille; `None` means estimate from drinks
    pub bac_input: Option<f64>,
    #[serde(default)]
    pub drinks: Vec<Drink>,
    pub drinking_duration_hours: Option<f64>,
}

impl Default for UserData {
    /// Initial form values
    fn default() -> Self {
        Self {
            weight_kg: Some(70.0),
            gender: Gender::Male,
            altitude_m: Some(0.0),
            bac_input: None,
            drinks: Vec::new(),
            drinking_duration_hours: Some(0.0),
        }
    }
}

impl UserData {
    /// Resolve which BAC mode this record is in, checking the inputs that mode needs.
    pub fn bac_source(&self) -> Result<BacSource<'_>, CalcError> {
        if let Some(bac) = self.bac_input {
            if !bac.is_finite() {
                return Err(CalcError::invalid(Field::BacInput, "must be a finite number"));
            }
            return Ok(BacSource::Direct(bac));
        }

        let weight_kg = self.weight_kg.ok_or(CalcError::MissingInput(Field::Weight))?;
        let duration_hours = self
            .drinking_duration_hours
            .ok_or(CalcError::MissingInput(Field::DrinkingDuration))?;
        if self.drinks.is_empty() {
            return Err(CalcError::MissingInput(Field::Drinks));
        }

        bac::check_weight(weight_kg)?;
        bac::check_duration(duration_hours)?;
        bac::check_drinks(&self.drinks)?;
        if !self.drinks.iter().any(Drink::has_alcohol) {
            return Err(CalcError::MissingInput(Field::Drinks));
        }

        Ok(BacSource::Computed {
            drinks: &self.drinks,
            weight_kg,
            gender: self.gender,
            duration_hours,
        })
    }

    /// Switch to direct BAC entry
    pub fn use_direct_bac(&mut self, bac: f64) {
        self.bac_input = Some(bac);
    }

    /// Switch to estimating BAC from drinks. The drink list is kept.
    pub fn use_drinks(&mut self) {
        self.bac_input = None;
    }

    /// Add a drink and return its generated id
    pub fn add_drink(&mut self, volume_ml: f64, alcohol_percentage: f64) -> String {
        let mut n = self.drinks.len() + 1;
        let id = loop {
            let candidate = format!("drink-{}", n);
            if self.drink(&candidate).is_none() {
                break candidate;
            }
            n += 1;
        };
        self.drinks.push(Drink::new(id.clone(), volume_ml, alcohol_percentage));
        id
    }

    pub fn drink(&self, id: &str) -> Option<&Drink> {
        self.drinks.iter().find(|d| d.id == id)
    }

    /// Change a drink in place. Returns false if no drink has this id.
    pub fn update_drink(&mut self, id: &str, volume_ml: f64, alcohol_percentage: f64) -> bool {
        match self.drinks.iter_mut().find(|d| d.id == id) {
            Some(drink) => {
                drink.volume_ml = volume_ml;
                drink.alcohol_percentage = alcohol_percentage;
                true
            }
            None => false,
        }
    }

    /// Remove a drink. Returns false if no drink has this id.
    pub fn remove_drink(&mut self, id: &str) -> bool {
        let before = self.drinks.len();
        self.drinks.retain(|d| d.id != id);
        self.drinks.len() != before
    }

    /// Replace the form fields with an example scenario's values
    pub fn apply_scenario(&mut self, scenario: &Scenario) {
        *self = scenario.user_data();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed_input() -> UserData {
        UserData {
            weight_kg: Some(80.0),
            gender: Gender::Female,
            altitude_m: Some(10.0),
            bac_input: None,
            drinks: vec![Drink::new("wine", 150.0, 12.0)],
            drinking_duration_hours: Some(1.5),
        }
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!(Gender::from_str("Female"), Some(Gender::Female));
        assert_eq!(Gender::from_str("kvinne"), Some(Gender::Female));
        assert_eq!(Gender::from_str(" m "), Some(Gender::Male));
        assert_eq!(Gender::from_str("other"), None);
    }

    #[test]
    fn test_distribution_ratio() {
        assert_eq!(Gender::Male.distribution_ratio(), 0.68);
        assert_eq!(Gender::Female.distribution_ratio(), 0.55);
    }

    #[test]
    fn test_default_matches_initial_form() {
        let data = UserData::default();
        assert_eq!(data.weight_kg, Some(70.0));
        assert_eq!(data.gender, Gender::Male);
        assert_eq!(data.altitude_m, Some(0.0));
        assert_eq!(data.bac_input, None);
        assert!(data.drinks.is_empty());
        assert_eq!(data.drinking_duration_hours, Some(0.0));
    }

    #[test]
    fn test_direct_bac_ignores_drinks() {
        let mut data = computed_input();
        data.weight_kg = None;
        data.use_direct_bac(2.5);
        assert_eq!(data.bac_source().unwrap(), BacSource::Direct(2.5));
    }

    #[test]
    fn test_computed_source() {
        let data = computed_input();
        match data.bac_source().unwrap() {
            BacSource::Computed { drinks, weight_kg, gender, duration_hours } => {
                assert_eq!(drinks.len(), 1);
                assert_eq!(weight_kg, 80.0);
                assert_eq!(gender, Gender::Female);
                assert_eq!(duration_hours, 1.5);
            }
            other => panic!("expected computed source, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_for_computed_mode() {
        let mut data = computed_input();
        data.weight_kg = None;
        assert_eq!(data.bac_source(), Err(CalcError::MissingInput(Field::Weight)));

        let mut data = computed_input();
        data.drinking_duration_hours = None;
        assert_eq!(
            data.bac_source(),
            Err(CalcError::MissingInput(Field::DrinkingDuration))
        );

        let mut data = computed_input();
        data.drinks.clear();
        assert_eq!(data.bac_source(), Err(CalcError::MissingInput(Field::Drinks)));
    }

    #[test]
    fn test_drinks_without_alcohol_count_as_missing() {
        let mut data = computed_input();
        data.drinks = vec![Drink::new("water", 500.0, 0.0), Drink::new("empty", 0.0, 40.0)];
        assert_eq!(data.bac_source(), Err(CalcError::MissingInput(Field::Drinks)));
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let mut data = computed_input();
        data.weight_kg = Some(0.0);
        assert!(matches!(
            data.bac_source(),
            Err(CalcError::DivideByZeroRisk { .. })
        ));
    }

    #[test]
    fn test_invalid_drink_values() {
        let mut data = computed_input();
        data.drinks.push(Drink::new("bad", -1.0, 5.0));
        assert!(matches!(
            data.bac_source(),
            Err(CalcError::InvalidInput { field: Field::Drinks, .. })
        ));

        let mut data = computed_input();
        data.drinks.push(Drink::new("bad", 100.0, 120.0));
        assert!(matches!(
            data.bac_source(),
            Err(CalcError::InvalidInput { field: Field::Drinks, .. })
        ));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let mut data = computed_input();
        data.drinking_duration_hours = Some(-1.0);
        assert!(matches!(
            data.bac_source(),
            Err(CalcError::InvalidInput { field: Field::DrinkingDuration, .. })
        ));
    }

    #[test]
    fn test_drink_editing() {
        let mut data = UserData::default();
        let first = data.add_drink(330.0, 4.5);
        let second = data.add_drink(40.0, 40.0);
        assert_eq!(first, "drink-1");
        assert_eq!(second, "drink-2");

        assert!(data.update_drink(&first, 500.0, 4.7));
        assert_eq!(data.drink(&first).unwrap().volume_ml, 500.0);
        assert!(!data.update_drink("drink-99", 1.0, 1.0));

        assert!(data.remove_drink(&first));
        assert!(!data.remove_drink(&first));

        // ids stay unique after a removal
        let third = data.add_drink(100.0, 12.0);
        assert_ne!(third, second);
        assert_eq!(data.drinks.len(), 2);
    }

    #[test]
    fn test_mode_switch_keeps_drinks() {
        let mut data = computed_input();
        data.use_direct_bac(0.0);
        assert_eq!(data.bac_input, Some(0.0));
        data.use_drinks();
        assert_eq!(data.bac_input, None);
        assert_eq!(data.drinks.len(), 1);
    }

    #[test]
    fn test_json_keeps_optional_fields() {
        let data = UserData {
            weight_kg: None,
            gender: Gender::Female,
            altitude_m: Some(-28.0),
            bac_input: Some(0.8),
            drinks: vec![Drink::new("drink-1", 330.0, 4.5)],
            drinking_duration_hours: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"gender\":\"female\""));
        let back: UserData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
