use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::error::{check_distance, config_error, Result};
use crate::flightplan::Flightplan;

use super::WakeCategory;

/// Serialized form of a wake scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeSchemeDefinition {
    pub key: String,
    #[serde(default)]
    pub name: String,
    /// Category codes, in the order used to index `separation`
    pub categories: Vec<String>,
    /// Category assumed for aircraft whose type we can't resolve
    pub default_category: String,
    /// Applied to every pair that has no matrix entry
    pub minimum_separation: f64,
    /// ICAO type designator to category code
    #[serde(default)]
    pub aircraft_types: HashMap<String, String>,
    /// `separation[leader][follower]` in nm, `null` where the scheme minimum applies
    pub separation: Vec<Vec<Option<f64>>>,
}

/// A validated wake turbulence scheme.
#[derive(Debug, Clone)]
pub struct WakeScheme {
    pub key: String,
    pub name: String,
    categories: Vec<WakeCategory>,
    index: HashMap<WakeCategory, usize>,
    default_category: WakeCategory,
    minimum_separation: f64,
    aircraft_types: HashMap<String, WakeCategory>,
    separation: Vec<Vec<Option<f64>>>,
}

impl WakeScheme {
    pub fn new(def: WakeSchemeDefinition) -> Result<Self> {
        let key = def.key;
        let nb_categories = def.categories.len();

        if nb_categories == 0 {
            return Err(config_error!("wake scheme {key} has no categories"));
        }

        let categories: Vec<WakeCategory> = def.categories.iter().map(|c| WakeCategory::new(c)).collect();
        let mut index = HashMap::with_capacity(nb_categories);
        for (i, c) in categories.iter().enumerate() {
            if index.insert(c.clone(), i).is_some() {
                return Err(config_error!("wake scheme {key} lists category {c} twice"));
            }
        }

        let default_category = WakeCategory::new(&def.default_category);
        if !index.contains_key(&default_category) {
            return Err(config_error!("default category {default_category} of wake scheme {key} is not one of its categories"));
        }

        let minimum_separation = check_distance(&format!("minimum separation of wake scheme {key}"), def.minimum_separation)?;

        if def.separation.len() != nb_categories || def.separation.iter().any(|row| row.len() != nb_categories) {
            return Err(config_error!("separation matrix of wake scheme {key} must be {nb_categories}x{nb_categories}"));
        }
        for (i, row) in def.separation.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                if let Some(d) = cell {
                    check_distance(&format!("separation {}->{} of wake scheme {key}", categories[i], categories[j]), *d)?;
                }
            }
        }

        let mut aircraft_types = HashMap::with_capacity(def.aircraft_types.len());
        for (ac_type, code) in def.aircraft_types {
            let category = WakeCategory::new(&code);
            if !index.contains_key(&category) {
                return Err(config_error!("aircraft type {ac_type} maps to unknown category {category} in wake scheme {key}"));
            }
            aircraft_types.insert(ac_type.to_uppercase(), category);
        }

        let name = if def.name.is_empty() { key.clone() } else { def.name };

        Ok(WakeScheme {
            key,
            name,
            categories,
            index,
            default_category,
            minimum_separation,
            aircraft_types,
            separation: def.separation,
        })
    }

    pub fn categories(&self) -> &[WakeCategory] {
        &self.categories
    }

    pub fn default_category(&self) -> &WakeCategory {
        &self.default_category
    }

    pub fn minimum_separation(&self) -> f64 {
        self.minimum_separation
    }

    pub fn aircraft_types(&self) -> impl Iterator<Item = (&str, &WakeCategory)> {
        self.aircraft_types.iter().map(|(t, c)| (t.as_str(), c))
    }

    /// The category of an aircraft. Missing flightplans and unknown types get the default.
    pub fn category_for(&self, flightplan: Option<&Flightplan>) -> WakeCategory {
        let Some(fp) = flightplan else {
            return self.default_category.clone();
        };

        match self.aircraft_types.get(&fp.aircraft_type.trim().to_uppercase()) {
            Some(category) => category.clone(),
            None => {
                tracing::debug!(callsign = %fp.callsign, aircraft_type = %fp.aircraft_type, scheme = %self.key,
                    "unknown aircraft type, using default category {}", self.default_category);
                self.default_category.clone()
            }
        }
    }

    /// Required in-trail distance for `follower` behind `leader`.
    pub fn separation(&self, leader: &WakeCategory, follower: &WakeCategory) -> f64 {
        match (self.index.get(leader), self.index.get(follower)) {
            (Some(&l), Some(&f)) => self.separation[l][f].unwrap_or(self.minimum_separation),
            _ => self.minimum_separation,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// a reduced three category scheme
    pub(crate) fn definition() -> WakeSchemeDefinition {
        WakeSchemeDefinition {
            key: "TEST".into(),
            name: "Test scheme".into(),
            categories: vec!["H".into(), "M".into(), "L".into()],
            default_category: "M".into(),
            minimum_separation: 2.5,
            aircraft_types: HashMap::from([
                ("B744".to_string(), "H".to_string()),
                ("A320".to_string(), "M".to_string()),
                ("C172".to_string(), "L".to_string()),
            ]),
            separation: vec![
                vec![Some(4.0), Some(5.0), Some(6.0)],
                vec![None,      Some(3.0), Some(5.0)],
                vec![None,      None,      Some(2.0)],
            ],
        }
    }

    #[test]
    fn maps_types_to_categories() {
        let scheme = WakeScheme::new(definition()).unwrap();
        assert_eq!(scheme.category_for(Some(&Flightplan::new("BAW1", "B744"))), WakeCategory::new("H"));
        assert_eq!(scheme.category_for(Some(&Flightplan::new("CLUB1", "c172 "))), WakeCategory::new("L"));
    }

    #[test]
    fn unresolved_aircraft_get_default_category() {
        let scheme = WakeScheme::new(definition()).unwrap();
        assert_eq!(scheme.category_for(None), WakeCategory::new("M"));
        assert_eq!(scheme.category_for(Some(&Flightplan::new("XYZ1", "ZZZZ"))), WakeCategory::new("M"));
    }

    #[test]
    fn matrix_lookup_is_leader_then_follower() {
        let scheme = WakeScheme::new(definition()).unwrap();
        let (h, m) = (WakeCategory::new("H"), WakeCategory::new("M"));
        assert_eq!(scheme.separation(&h, &m), 5.0);
        assert_eq!(scheme.separation(&m, &h), 2.5);
    }

    #[test]
    fn unknown_categories_fall_back_to_scheme_minimum() {
        let scheme = WakeScheme::new(definition()).unwrap();
        assert_eq!(scheme.separation(&WakeCategory::new("J"), &WakeCategory::new("L")), 2.5);
    }

    #[test]
    fn rejects_ragged_matrix() {
        let mut def = definition();
        def.separation[1].pop();
        assert!(WakeScheme::new(def).is_err());
    }

    #[test]
    fn rejects_default_outside_categories() {
        let mut def = definition();
        def.default_category = "J".into();
        assert!(WakeScheme::new(def).is_err());
    }

    #[test]
    fn rejects_type_mapped_to_unknown_category() {
        let mut def = definition();
        def.aircraft_types.insert("A388".into(), "J".into());
        assert!(WakeScheme::new(def).is_err());
    }

    #[test]
    fn rejects_negative_matrix_entry() {
        let mut def = definition();
        def.separation[0][0] = Some(-4.0);
        assert!(WakeScheme::new(def).is_err());
    }
}
