use std::sync::Arc;

use clap::Args;

use crate::config::Scenario;
use crate::error::Result;
use crate::handoff::{DepartureHandoffResolutionStrategy, ResolvedHandoff};

#[derive(Debug, Args)]
pub struct Handoff {
    /// The path to the scenario file
    #[clap(short, long)]
    pub scenario: String,
}

impl Handoff {
    pub fn resolve(&self) -> Result<()> {
        let scenario = Scenario::from_path(&self.scenario)?;

        for handoff in Self::resolve_departures(&scenario)? {
            println!("{:<10} {:<12} {:.3}", handoff.callsign, handoff.controller.callsign, handoff.controller.frequency);
        }
        Ok(())
    }

    /// Resolves every flightplan with a departure airfield.
    pub fn resolve_departures(scenario: &Scenario) -> Result<Vec<Arc<ResolvedHandoff>>> {
        let strategy = scenario.config.handoff_resolution(Arc::new(scenario.active_callsigns()?))?;

        Ok(scenario.flightplans.iter()
            .filter(|fp| !fp.origin.is_empty())
            .map(|fp| strategy.resolve(fp))
            .collect())
    }
}
