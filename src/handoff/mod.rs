//! Resolution of the frequency a departing aircraft should be handed to.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use serde::{Serialize, Deserialize};

use crate::flightplan::Flightplan;

mod mapper;
mod resolution;

pub use mapper::{AirfieldHandoffMapper, HandoffMappings, SidHandoff, SidHandoffMapper};
pub use resolution::{DefaultDepartureHandoffResolution, UNICOM_CALLSIGN, UNICOM_FREQUENCY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerPosition {
    pub callsign: String,
    /// MHz
    pub frequency: f64,
    #[serde(default)]
    pub kind: String,
}

impl ControllerPosition {
    pub fn new(callsign: &str, frequency: f64, kind: &str) -> Self {
        ControllerPosition { callsign: callsign.to_string(), frequency, kind: kind.to_string() }
    }
}

/// An ordered list of positions, most preferred first.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffOrder {
    pub key: String,
    pub controllers: Vec<ControllerPosition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHandoff {
    pub callsign: String,
    pub controller: ControllerPosition,
    pub sid_handoff: Option<Arc<HandoffOrder>>,
    pub airfield_handoff: Option<Arc<HandoffOrder>>,
}

/// Given a departing flightplan, decides who it goes to next.
pub trait DepartureHandoffResolutionStrategy {
    fn resolve(&self, flightplan: &Flightplan) -> Arc<ResolvedHandoff>;
}

/// The controller positions currently online, keyed by position callsign.
#[derive(Debug, Default)]
pub struct ActiveCallsigns {
    active: RwLock<HashMap<String, ControllerPosition>>,
}

impl ActiveCallsigns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, position: ControllerPosition) {
        tracing::debug!("controller {} online", position.callsign);
        self.active.write().insert(position.callsign.clone(), position);
    }

    pub fn remove(&self, callsign: &str) -> Option<ControllerPosition> {
        tracing::debug!("controller {callsign} offline");
        self.active.write().remove(callsign)
    }

    pub fn is_active(&self, callsign: &str) -> bool {
        self.active.read().contains_key(callsign)
    }

    pub fn flush(&self) {
        self.active.write().clear();
    }

    pub fn len(&self) -> usize {
        self.active.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.read().is_empty()
    }
}
