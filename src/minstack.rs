//! Minimum stack levels for airfields and TMAs, and their acknowledgement state.

use std::{collections::{BTreeMap, BTreeSet}, time::SystemTime};

use serde_json::Value;

const AIRFIELD: &str = "airfield";
const TMA: &str = "tma";

#[derive(Debug, Clone, PartialEq)]
pub struct MinStackLevel {
    pub kind: String,
    pub name: String,
    /// feet
    pub msl: u32,
    pub updated_at: SystemTime,
    pub acknowledged_at: Option<SystemTime>,
}

impl MinStackLevel {
    fn invalid() -> Self {
        MinStackLevel {
            kind: String::new(),
            name: String::new(),
            msl: 0,
            updated_at: SystemTime::UNIX_EPOCH,
            acknowledged_at: None,
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged_at.is_some()
    }

    pub fn is_valid(&self) -> bool {
        !self.kind.is_empty()
    }
}

pub fn msl_key_airfield(airfield: &str) -> String {
    format!("{AIRFIELD}.{airfield}")
}

pub fn msl_key_tma(tma: &str) -> String {
    format!("{TMA}.{tma}")
}

pub fn name_from_key(key: &str) -> &str {
    key.split_once('.').map(|(_, name)| name).unwrap_or(key)
}

#[derive(Debug)]
pub struct MinStackManager {
    levels: BTreeMap<String, MinStackLevel>,
    invalid: MinStackLevel,
}

impl Default for MinStackManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MinStackManager {
    pub fn new() -> Self {
        MinStackManager { levels: BTreeMap::new(), invalid: MinStackLevel::invalid() }
    }

    pub fn add(&mut self, key: &str, kind: &str, name: &str, msl: u32) {
        self.levels.insert(key.to_string(), MinStackLevel {
            kind: kind.to_string(),
            name: name.to_string(),
            msl,
            updated_at: SystemTime::now(),
            acknowledged_at: None,
        });
    }

    /// Updates a known level. Unchanged values keep their acknowledgement.
    pub fn set(&mut self, key: &str, msl: u32) {
        match self.levels.get_mut(key) {
            Some(level) if level.msl != msl => {
                tracing::info!("minimum stack level {key} changed {} -> {msl}", level.msl);
                level.msl = msl;
                level.updated_at = SystemTime::now();
                level.acknowledged_at = None;
            }
            Some(_) => {}
            None => tracing::debug!("ignoring level for unknown minimum stack {key}"),
        }
    }

    pub fn acknowledge(&mut self, key: &str) {
        if let Some(level) = self.levels.get_mut(key) {
            level.acknowledged_at = Some(SystemTime::now());
        }
    }

    /// The level for `key`, or an invalid level if there is none.
    pub fn get(&self, key: &str) -> &MinStackLevel {
        self.levels.get(key).unwrap_or(&self.invalid)
    }

    pub fn invalid(&self) -> &MinStackLevel {
        &self.invalid
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.levels.keys().cloned().collect()
    }

    /// Applies a `{ "airfield": { "EGLL": 7000 }, "tma": { "LTMA": 6000 } }` document.
    pub fn update_all(&mut self, data: &Value) {
        let Some(obj) = data.as_object() else {
            tracing::warn!("invalid minimum stack level data");
            return;
        };

        for kind in [AIRFIELD, TMA] {
            let Some(entries) = obj.get(kind).and_then(Value::as_object) else {
                continue;
            };

            for (name, value) in entries {
                let Some(msl) = value.as_u64().and_then(|v| u32::try_from(v).ok()) else {
                    tracing::warn!("invalid minimum stack level for {kind} {name}: {value}");
                    continue;
                };

                let key = format!("{kind}.{name}");
                if self.levels.contains_key(&key) {
                    self.set(&key, msl);
                } else {
                    self.add(&key, kind, name, msl);
                }
            }
        }
    }
}
