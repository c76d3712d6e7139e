use std::{collections::HashMap, sync::Arc};

use serde::{Serialize, Deserialize};

use crate::error::{config_error, Result};
use crate::flightplan::Flightplan;

use super::{ControllerPosition, HandoffOrder};

/// Serialized handoff configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandoffMappings {
    #[serde(default)]
    pub controllers: Vec<ControllerPosition>,
    /// handoff key to controller callsigns, most preferred first
    #[serde(default)]
    pub orders: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub sids: Vec<SidHandoff>,
    #[serde(default)]
    pub airfields: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidHandoff {
    pub airfield: String,
    pub sid: String,
    pub handoff: String,
}

impl HandoffMappings {
    /// resolve controller callsigns and build both mappers
    pub fn build(&self) -> Result<(SidHandoffMapper, AirfieldHandoffMapper)> {
        let positions: HashMap<&str, &ControllerPosition> =
            self.controllers.iter().map(|c| (c.callsign.as_str(), c)).collect();

        let mut orders = HashMap::with_capacity(self.orders.len());
        for (key, callsigns) in &self.orders {
            let controllers = callsigns.iter()
                .map(|cs| positions.get(cs.as_str()).map(|p| (*p).clone())
                    .ok_or_else(|| config_error!("handoff {key} references unknown controller {cs}")))
                .collect::<Result<Vec<_>>>()?;
            orders.insert(key.clone(), Arc::new(HandoffOrder { key: key.clone(), controllers }));
        }

        let order = |key: &str| orders.get(key).cloned().ok_or_else(|| config_error!("unknown handoff {key}"));

        let mut sid_mapper = SidHandoffMapper::default();
        for s in &self.sids {
            sid_mapper.add(&s.airfield, &s.sid, order(&s.handoff)?);
        }

        let mut airfield_mapper = AirfieldHandoffMapper::default();
        for (airfield, key) in &self.airfields {
            airfield_mapper.add(airfield, order(key)?);
        }

        Ok((sid_mapper, airfield_mapper))
    }
}

/// Maps a departure airfield and SID to a handoff order.
#[derive(Debug, Clone, Default)]
pub struct SidHandoffMapper {
    handoffs: HashMap<(String, String), Arc<HandoffOrder>>,
}

impl SidHandoffMapper {
    pub fn add(&mut self, airfield: &str, sid: &str, order: Arc<HandoffOrder>) {
        self.handoffs.insert((airfield.to_uppercase(), sid.to_uppercase()), order);
    }

    pub fn map_for_flightplan(&self, flightplan: &Flightplan) -> Option<Arc<HandoffOrder>> {
        let sid = flightplan.sid.as_deref()?;
        self.handoffs.get(&(flightplan.origin.to_uppercase(), sid.to_uppercase())).cloned()
    }
}

/// Maps a departure airfield to its default handoff order.
#[derive(Debug, Clone, Default)]
pub struct AirfieldHandoffMapper {
    handoffs: HashMap<String, Arc<HandoffOrder>>,
}

impl AirfieldHandoffMapper {
    pub fn add(&mut self, airfield: &str, order: Arc<HandoffOrder>) {
        self.handoffs.insert(airfield.to_uppercase(), order);
    }

    pub fn map_for_flightplan(&self, flightplan: &Flightplan) -> Option<Arc<HandoffOrder>> {
        self.handoffs.get(&flightplan.origin.to_uppercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> HandoffMappings {
        serde_json::from_str(r#"{
            "controllers": [
                { "callsign": "LON_S_CTR", "frequency": 129.425, "kind": "CTR" },
                { "callsign": "LON_CTR", "frequency": 127.825, "kind": "CTR" }
            ],
            "orders": {
                "EGKK_SID_WEST": ["LON_S_CTR", "LON_CTR"],
                "EGKK_DEFAULT": ["LON_CTR"]
            },
            "sids": [ { "airfield": "EGKK", "sid": "LAM6M", "handoff": "EGKK_SID_WEST" } ],
            "airfields": { "EGKK": "EGKK_DEFAULT" }
        }"#).unwrap()
    }

    #[test]
    fn maps_by_sid_and_airfield() {
        let (sids, airfields) = mappings().build().unwrap();
        let fp = Flightplan::new("EZY1", "A319").departing("egkk", Some("lam6m"));

        assert_eq!(sids.map_for_flightplan(&fp).unwrap().key, "EGKK_SID_WEST");
        assert_eq!(airfields.map_for_flightplan(&fp).unwrap().key, "EGKK_DEFAULT");
    }

    #[test]
    fn no_sid_no_sid_mapping() {
        let (sids, _) = mappings().build().unwrap();
        let fp = Flightplan::new("EZY1", "A319").departing("EGKK", None);
        assert!(sids.map_for_flightplan(&fp).is_none());
    }

    #[test]
    fn orders_keep_controller_preference() {
        let (sids, _) = mappings().build().unwrap();
        let fp = Flightplan::new("EZY1", "A319").departing("EGKK", Some("LAM6M"));
        let order = sids.map_for_flightplan(&fp).unwrap();
        let callsigns: Vec<&str> = order.controllers.iter().map(|c| c.callsign.as_str()).collect();
        assert_eq!(callsigns, vec!["LON_S_CTR", "LON_CTR"]);
    }

    #[test]
    fn unknown_controller_is_config_error() {
        let mut m = mappings();
        m.orders.insert("BROKEN".into(), vec!["NOBODY".into()]);
        assert!(m.build().is_err());
    }

    #[test]
    fn unknown_handoff_key_is_config_error() {
        let mut m = mappings();
        m.airfields.insert("EGLL".into(), "MISSING".into());
        assert!(m.build().is_err());
    }
}
