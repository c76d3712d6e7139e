//! The airfields configured for approach sequencing.

use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::error::{check_distance, config_error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airfield {
    pub icao: String,
    /// The minimum approach separation for this airfield, if it overrides the global default
    #[serde(default)]
    pub minimum_separation: Option<f64>,
    /// The wake scheme this airfield separates by, if not the default one
    #[serde(default)]
    pub wake_scheme: Option<String>,
}

impl Airfield {
    pub fn new(icao: &str, minimum_separation: Option<f64>) -> Self {
        Airfield { icao: icao.to_uppercase(), minimum_separation, wake_scheme: None }
    }

    pub fn with_wake_scheme(mut self, scheme: &str) -> Self {
        self.wake_scheme = Some(scheme.to_string());
        self
    }
}

/// Result of looking up an airfield minimum. An airfield without an override is
/// a different thing than an airfield we don't know about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinimumSeparation {
    Configured(f64),
    NotConfigured,
    UnknownAirfield,
}

#[derive(Debug, Clone, Default)]
pub struct AirfieldCollection {
    airfields: HashMap<String, Airfield>,
}

impl AirfieldCollection {
    pub fn new(airfields: Vec<Airfield>) -> Result<Self> {
        let mut map = HashMap::with_capacity(airfields.len());

        for mut airfield in airfields {
            airfield.icao = airfield.icao.to_uppercase();
            if let Some(min) = airfield.minimum_separation {
                check_distance(&format!("minimum separation of {}", airfield.icao), min)?;
            }
            if map.contains_key(&airfield.icao) {
                return Err(config_error!("airfield {} configured twice", airfield.icao));
            }
            map.insert(airfield.icao.clone(), airfield);
        }

        Ok(AirfieldCollection { airfields: map })
    }

    pub fn fetch(&self, icao: &str) -> Option<&Airfield> {
        self.airfields.get(&icao.to_uppercase())
    }

    pub fn minimum_separation(&self, icao: &str) -> MinimumSeparation {
        match self.fetch(icao) {
            Some(Airfield { minimum_separation: Some(min), .. }) => MinimumSeparation::Configured(*min),
            Some(_) => MinimumSeparation::NotConfigured,
            None => MinimumSeparation::UnknownAirfield,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airfield> {
        self.airfields.values()
    }

    pub fn len(&self) -> usize {
        self.airfields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airfields.is_empty()
    }
}
