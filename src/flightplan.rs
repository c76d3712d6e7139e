//! Live flightplan data, as supplied by the host.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flightplan {
    pub callsign: String,
    /// ICAO aircraft type designator, e.g. B744
    pub aircraft_type: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub sid: Option<String>,
}

impl Flightplan {
    pub fn new(callsign: &str, aircraft_type: &str) -> Self {
        Flightplan {
            callsign: callsign.to_string(),
            aircraft_type: aircraft_type.to_string(),
            origin: String::new(),
            destination: String::new(),
            sid: None,
        }
    }

    pub fn departing(mut self, origin: &str, sid: Option<&str>) -> Self {
        self.origin = origin.to_string();
        self.sid = sid.map(str::to_string);
        self
    }
}

/// Resolves a callsign to its current flightplan.
pub trait FlightplanLookup {
    fn flightplan(&self, callsign: &str) -> Option<Flightplan>;
}

impl<T: FlightplanLookup + ?Sized> FlightplanLookup for Arc<T> {
    fn flightplan(&self, callsign: &str) -> Option<Flightplan> {
        (**self).flightplan(callsign)
    }
}

/// In-memory flightplans. Entries can be corrected while calculations are running.
#[derive(Debug, Default)]
pub struct FlightplanStore {
    flightplans: RwLock<HashMap<String, Flightplan>>,
}

impl FlightplanStore {
    pub fn new(flightplans: impl IntoIterator<Item = Flightplan>) -> Self {
        let map = flightplans.into_iter().map(|fp| (fp.callsign.clone(), fp)).collect();
        FlightplanStore { flightplans: RwLock::new(map) }
    }

    /// add or replace a flightplan, returning the one it replaced
    pub fn upsert(&self, flightplan: Flightplan) -> Option<Flightplan> {
        self.flightplans.write().insert(flightplan.callsign.clone(), flightplan)
    }

    pub fn remove(&self, callsign: &str) -> Option<Flightplan> {
        self.flightplans.write().remove(callsign)
    }

    pub fn all(&self) -> Vec<Flightplan> {
        let mut list: Vec<Flightplan> = self.flightplans.read().values().cloned().collect();
        list.sort_by(|a, b| a.callsign.cmp(&b.callsign));
        list
    }
}

impl FlightplanLookup for FlightplanStore {
    fn flightplan(&self, callsign: &str) -> Option<Flightplan> {
        self.flightplans.read().get(callsign).cloned()
    }
}
