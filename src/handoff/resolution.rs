use std::sync::Arc;

use crate::flightplan::Flightplan;

use super::{
    ActiveCallsigns, AirfieldHandoffMapper, ControllerPosition, DepartureHandoffResolutionStrategy,
    HandoffOrder, ResolvedHandoff, SidHandoffMapper,
};

pub const UNICOM_FREQUENCY: f64 = 122.800;
pub const UNICOM_CALLSIGN: &str = "UNICOM";

/// SID handoff first, then the departure airfield's handoff, then UNICOM.
pub struct DefaultDepartureHandoffResolution {
    sid_mapper: SidHandoffMapper,
    airfield_mapper: AirfieldHandoffMapper,
    active_callsigns: Arc<ActiveCallsigns>,
    unicom: ControllerPosition,
}

impl DefaultDepartureHandoffResolution {
    pub fn new(sid_mapper: SidHandoffMapper, airfield_mapper: AirfieldHandoffMapper, active_callsigns: Arc<ActiveCallsigns>) -> Self {
        DefaultDepartureHandoffResolution {
            sid_mapper,
            airfield_mapper,
            active_callsigns,
            unicom: ControllerPosition::new(UNICOM_CALLSIGN, UNICOM_FREQUENCY, "FSS"),
        }
    }

    fn resolve_controller(&self, order: &HandoffOrder) -> Option<ControllerPosition> {
        order.controllers.iter()
            .find(|c| self.active_callsigns.is_active(&c.callsign))
            .cloned()
    }
}

impl DepartureHandoffResolutionStrategy for DefaultDepartureHandoffResolution {
    fn resolve(&self, flightplan: &Flightplan) -> Arc<ResolvedHandoff> {
        let sid_handoff = self.sid_mapper.map_for_flightplan(flightplan);
        let airfield_handoff = self.airfield_mapper.map_for_flightplan(flightplan);

        let controller = sid_handoff.as_deref().and_then(|o| self.resolve_controller(o))
            .or_else(|| airfield_handoff.as_deref().and_then(|o| self.resolve_controller(o)))
            .unwrap_or_else(|| {
                tracing::debug!("no controller online for {}, handing to unicom", flightplan.callsign);
                self.unicom.clone()
            });

        Arc::new(ResolvedHandoff {
            callsign: flightplan.callsign.clone(),
            controller,
            sid_handoff,
            airfield_handoff,
        })
    }
}
