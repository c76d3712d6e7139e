use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Serialize, Deserialize};

use crate::error::{check_distance, Result};

pub const DEFAULT_MINIMUM_SEPARATION: f64 = 3.0;
pub const DEFAULT_TARGET_DISTANCE: f64 = 6.0;

/// Operator adjustable sequencer defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequencerSettings {
    /// Floor applied at airfields that have no minimum separation of their own
    #[serde(default = "default_minimum_separation")]
    pub default_minimum_separation: f64,
    /// Spacing used for minimum distance sequencing when an aircraft has no expected distance
    #[serde(default = "default_target_distance")]
    pub default_target_distance: f64,
}

fn default_minimum_separation() -> f64 { DEFAULT_MINIMUM_SEPARATION }
fn default_target_distance() -> f64 { DEFAULT_TARGET_DISTANCE }

impl Default for SequencerSettings {
    fn default() -> Self {
        SequencerSettings {
            default_minimum_separation: DEFAULT_MINIMUM_SEPARATION,
            default_target_distance: DEFAULT_TARGET_DISTANCE,
        }
    }
}

impl SequencerSettings {
    pub fn validate(&self) -> Result<()> {
        check_distance("default minimum separation", self.default_minimum_separation)?;
        check_distance("default target distance", self.default_target_distance)?;
        Ok(())
    }
}

/// Shared handle to the live sequencer settings.
///
/// Writers replace fields under the write lock and readers always take a full copy,
/// so a reader never sees half of an update.
#[derive(Debug, Clone, Default)]
pub struct SequencerOptions {
    settings: Arc<RwLock<SequencerSettings>>,
}

impl SequencerOptions {
    pub fn new(settings: SequencerSettings) -> Result<Self> {
        settings.validate()?;
        Ok(SequencerOptions { settings: Arc::new(RwLock::new(settings)) })
    }

    pub fn snapshot(&self) -> SequencerSettings {
        *self.settings.read()
    }

    pub fn default_minimum_separation(&self) -> f64 {
        self.settings.read().default_minimum_separation
    }

    pub fn set_default_minimum_separation(&self, distance: f64) -> Result<()> {
        let distance = check_distance("default minimum separation", distance)?;
        self.settings.write().default_minimum_separation = distance;
        tracing::info!("default minimum separation set to {distance}nm");
        Ok(())
    }

    pub fn set_default_target_distance(&self, distance: f64) -> Result<()> {
        let distance = check_distance("default target distance", distance)?;
        self.settings.write().default_target_distance = distance;
        tracing::info!("default target distance set to {distance}nm");
        Ok(())
    }

    /// replace all settings at once
    pub fn update(&self, settings: SequencerSettings) -> Result<()> {
        settings.validate()?;
        *self.settings.write() = settings;
        Ok(())
    }
}
