//! Wake turbulence categories and the schemes that separate them.
//!
//! Each scheme owns its own aircraft type table and its own leader/follower
//! matrix. Airfields pick the scheme they separate by, so the collection is
//! keyed by scheme rather than holding one global matrix.

use std::{collections::HashMap, fmt};

use serde::{Serialize, Deserialize};

use crate::error::{config_error, Result};
use crate::flightplan::Flightplan;

mod scheme;
pub use scheme::{WakeScheme, WakeSchemeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WakeCategory(String);

impl WakeCategory {
    pub fn new(code: &str) -> Self {
        WakeCategory(code.trim().to_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WakeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All configured wake schemes plus the one used when an airfield names none.
#[derive(Debug, Clone)]
pub struct WakeSchemeCollection {
    schemes: HashMap<String, WakeScheme>,
    default_scheme: String,
}

impl WakeSchemeCollection {
    pub fn new(schemes: Vec<WakeScheme>, default_scheme: &str) -> Result<Self> {
        let mut map = HashMap::with_capacity(schemes.len());
        for scheme in schemes {
            if map.contains_key(&scheme.key) {
                return Err(config_error!("wake scheme {} configured twice", scheme.key));
            }
            map.insert(scheme.key.clone(), scheme);
        }

        if !map.contains_key(default_scheme) {
            return Err(config_error!("default wake scheme {default_scheme} is not configured"));
        }

        Ok(WakeSchemeCollection { schemes: map, default_scheme: default_scheme.to_string() })
    }

    pub fn from_definitions(defs: Vec<WakeSchemeDefinition>, default_scheme: &str) -> Result<Self> {
        let schemes = defs.into_iter().map(WakeScheme::new).collect::<Result<Vec<_>>>()?;
        Self::new(schemes, default_scheme)
    }

    pub fn get(&self, key: &str) -> Option<&WakeScheme> {
        self.schemes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.schemes.contains_key(key)
    }

    pub fn default_scheme(&self) -> &WakeScheme {
        // presence checked in new()
        &self.schemes[&self.default_scheme]
    }

    /// The scheme to use for `key`. Absent or unknown keys resolve to the default scheme.
    pub fn resolve(&self, key: Option<&str>) -> &WakeScheme {
        match key {
            None => self.default_scheme(),
            Some(k) => match self.schemes.get(k) {
                Some(scheme) => scheme,
                None => {
                    tracing::warn!("wake scheme {k} not configured, using {}", self.default_scheme);
                    self.default_scheme()
                }
            },
        }
    }

    pub fn category_for(&self, scheme: Option<&str>, flightplan: Option<&Flightplan>) -> WakeCategory {
        self.resolve(scheme).category_for(flightplan)
    }

    pub fn separation(&self, scheme: Option<&str>, leader: &WakeCategory, follower: &WakeCategory) -> f64 {
        self.resolve(scheme).separation(leader, follower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::scheme::tests::definition;
    use pretty_assertions::assert_eq;

    fn collection() -> WakeSchemeCollection {
        let mut strict = definition();
        strict.key = "STRICT".into();
        strict.minimum_separation = 4.0;
        strict.separation[0][1] = Some(7.0);

        WakeSchemeCollection::from_definitions(vec![definition(), strict], "TEST").unwrap()
    }

    #[test]
    fn schemes_are_independent() {
        let wake = collection();
        let (h, m) = (WakeCategory::new("H"), WakeCategory::new("M"));
        assert_eq!(wake.separation(Some("TEST"), &h, &m), 5.0);
        assert_eq!(wake.separation(Some("STRICT"), &h, &m), 7.0);
        assert_eq!(wake.separation(Some("STRICT"), &m, &h), 4.0);
    }

    #[test]
    fn missing_scheme_resolves_to_default() {
        let wake = collection();
        assert_eq!(wake.resolve(None).key, "TEST");
        assert_eq!(wake.resolve(Some("RECAT")).key, "TEST");
    }

    #[test]
    fn category_lookup_goes_through_scheme() {
        let wake = collection();
        let fp = Flightplan::new("BAW1", "A320");
        assert_eq!(wake.category_for(Some("STRICT"), Some(&fp)), WakeCategory::new("M"));
    }

    #[test]
    fn rejects_unknown_default_scheme() {
        assert!(WakeSchemeCollection::from_definitions(vec![definition()], "UK").is_err());
    }

    #[test]
    fn rejects_duplicate_scheme() {
        assert!(WakeSchemeCollection::from_definitions(vec![definition(), definition()], "TEST").is_err());
    }

    #[test]
    fn category_codes_are_normalized() {
        assert_eq!(WakeCategory::new(" um").code(), "UM");
    }
}
