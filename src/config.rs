//! The configuration documents the engine is built from.

use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use serde::{Serialize, Deserialize};

use crate::airfield::{Airfield, AirfieldCollection};
use crate::error::{config_error, Result};
use crate::flightplan::{Flightplan, FlightplanStore};
use crate::handoff::{ActiveCallsigns, DefaultDepartureHandoffResolution, HandoffMappings};
use crate::sequencer::{ApproachSequence, ApproachSpacingCalculator, SequencerOptions, SequencerSettings};
use crate::snapshot::Shared;
use crate::wake::{WakeSchemeCollection, WakeSchemeDefinition};

/// The sample configuration shipped with the crate.
pub const DEFAULT_CONFIG: &str = include_str!("../data/default_config.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacingConfig {
    pub airfields: Vec<Airfield>,
    pub wake_schemes: Vec<WakeSchemeDefinition>,
    pub default_wake_scheme: String,
    #[serde(default)]
    pub sequencer: SequencerSettings,
    #[serde(default)]
    pub handoffs: HandoffMappings,
}

/// The shared tables built from a configuration. Clones share the same tables.
#[derive(Debug, Clone)]
pub struct SpacingTables {
    pub options: SequencerOptions,
    pub airfields: Shared<AirfieldCollection>,
    pub wake: Shared<WakeSchemeCollection>,
}

impl SpacingTables {
    pub fn calculator<L: crate::flightplan::FlightplanLookup>(&self, flightplans: L) -> ApproachSpacingCalculator<L> {
        ApproachSpacingCalculator::new(self.options.clone(), self.airfields.clone(), self.wake.clone(), flightplans)
    }
}

impl SpacingConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let config: SpacingConfig = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(config)
    }

    pub fn builtin() -> Result<Self> {
        Ok(serde_json::from_str(DEFAULT_CONFIG)?)
    }

    fn build_airfields(&self) -> Result<AirfieldCollection> {
        AirfieldCollection::new(self.airfields.clone())
    }

    fn build_wake(&self) -> Result<WakeSchemeCollection> {
        let wake = WakeSchemeCollection::from_definitions(self.wake_schemes.clone(), &self.default_wake_scheme)?;

        for airfield in &self.airfields {
            if let Some(scheme) = &airfield.wake_scheme {
                if !wake.contains(scheme) {
                    return Err(config_error!("airfield {} uses unknown wake scheme {scheme}", airfield.icao));
                }
            }
        }
        Ok(wake)
    }

    pub fn tables(&self) -> Result<SpacingTables> {
        let tables = SpacingTables {
            options: SequencerOptions::new(self.sequencer)?,
            airfields: Shared::new(self.build_airfields()?),
            wake: Shared::new(self.build_wake()?),
        };
        tracing::info!("loaded {} airfields and {} wake schemes", self.airfields.len(), self.wake_schemes.len());
        Ok(tables)
    }

    /// Swaps this configuration into already shared tables.
    ///
    /// Everything is built and validated first. On error the live tables are left alone.
    /// Only the airfield and wake tables are swapped: the live sequencer options keep any
    /// operator override, use [`SequencerOptions::update`] to reset them.
    pub fn reload_into(&self, tables: &SpacingTables) -> Result<()> {
        let airfields = self.build_airfields()?;
        let wake = self.build_wake()?;

        tables.airfields.replace(airfields);
        tables.wake.replace(wake);
        tracing::info!("reloaded spacing configuration");
        Ok(())
    }

    pub fn handoff_resolution(&self, active: Arc<ActiveCallsigns>) -> Result<DefaultDepartureHandoffResolution> {
        let (sids, airfields) = self.handoffs.build()?;
        Ok(DefaultDepartureHandoffResolution::new(sids, airfields, active))
    }
}

/// A configuration together with a snapshot of live traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub config: SpacingConfig,
    #[serde(default)]
    pub flightplans: Vec<Flightplan>,
    /// callsigns of the controller positions online
    #[serde(default)]
    pub active_controllers: Vec<String>,
    #[serde(default)]
    pub sequences: Vec<ApproachSequence>,
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let scenario: Scenario = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(scenario)
    }

    pub fn flightplan_store(&self) -> FlightplanStore {
        FlightplanStore::new(self.flightplans.iter().cloned())
    }

    pub fn active_callsigns(&self) -> Result<ActiveCallsigns> {
        let active = ActiveCallsigns::new();
        for callsign in &self.active_controllers {
            let position = self.config.handoffs.controllers.iter()
                .find(|c| &c.callsign == callsign)
                .ok_or_else(|| config_error!("active controller {callsign} is not a configured position"))?;
            active.add(position.clone());
        }
        Ok(active)
    }
}
