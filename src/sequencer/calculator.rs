use crate::airfield::{AirfieldCollection, MinimumSeparation};
use crate::error::{Result, SpacingError};
use crate::flightplan::FlightplanLookup;
use crate::snapshot::Shared;
use crate::spacing::{greater_of, Spacing};
use crate::wake::WakeSchemeCollection;

use super::options::{SequencerOptions, SequencerSettings};
use super::sequence::{ApproachSequence, ApproachSequencedAircraft, SequencingMode};

/// Calculates the required distance between an aircraft and the one ahead of it.
///
/// Holds nothing but handles to its collaborators. Settings and tables are read
/// fresh on every call.
pub struct ApproachSpacingCalculator<L> {
    options: SequencerOptions,
    airfields: Shared<AirfieldCollection>,
    wake: Shared<WakeSchemeCollection>,
    flightplans: L,
}

impl<L: FlightplanLookup> ApproachSpacingCalculator<L> {
    pub fn new(
        options: SequencerOptions,
        airfields: Shared<AirfieldCollection>,
        wake: Shared<WakeSchemeCollection>,
        flightplans: L,
    ) -> Self {
        ApproachSpacingCalculator { options, airfields, wake, flightplans }
    }

    pub fn no_spacing() -> Spacing {
        Spacing::NotApplicable
    }

    /// The spacing `aircraft` needs behind its predecessor at `airfield`.
    ///
    /// Aircraft leading their sequence get `Spacing::NotApplicable` whatever the airfield.
    /// Otherwise the airfield must be configured for sequencing.
    #[tracing::instrument(level = "debug", skip_all, fields(airfield = airfield, callsign = %aircraft.callsign))]
    pub fn calculate(&self, airfield: &str, aircraft: &ApproachSequencedAircraft) -> Result<Spacing> {
        let Some(previous) = aircraft.previous() else {
            return Ok(Self::no_spacing());
        };

        let airfields = self.airfields.load();
        let settings = self.options.snapshot();
        let floor = Self::floor(&airfields, airfield, &settings)?;

        let base = match aircraft.mode {
            SequencingMode::WakeTurbulence => self.wake_separation(&airfields, airfield, previous, &aircraft.callsign),
            SequencingMode::MinimumDistance => Self::expected_distance(aircraft, &settings),
        };

        let required = greater_of(base, floor);
        tracing::debug!(previous, base, floor, required, "calculated spacing");
        Ok(Spacing::Required(required))
    }

    /// The airfield's own minimum separation, or the global default if it has none.
    pub fn airfield_minimum_separation(&self, airfield: &str) -> Result<f64> {
        Self::floor(&self.airfields.load(), airfield, &self.options.snapshot())
    }

    /// Spacing for every aircraft of a sequence, in sequence order.
    pub fn calculate_sequence(&self, sequence: &ApproachSequence) -> Vec<(String, Result<Spacing>)> {
        sequence.iter()
            .map(|ac| (ac.callsign.clone(), self.calculate(sequence.airfield(), ac)))
            .collect()
    }

    fn floor(airfields: &AirfieldCollection, airfield: &str, settings: &SequencerSettings) -> Result<f64> {
        match airfields.minimum_separation(airfield) {
            MinimumSeparation::Configured(min) => Ok(min),
            MinimumSeparation::NotConfigured => Ok(settings.default_minimum_separation),
            MinimumSeparation::UnknownAirfield => Err(SpacingError::UnknownAirfield(airfield.to_string())),
        }
    }

    fn wake_separation(&self, airfields: &AirfieldCollection, airfield: &str, leader: &str, follower: &str) -> f64 {
        let scheme_key = airfields.fetch(airfield).and_then(|a| a.wake_scheme.as_deref());
        let wake = self.wake.load();
        let scheme = wake.resolve(scheme_key);

        let leader_category = scheme.category_for(self.flightplans.flightplan(leader).as_ref());
        let follower_category = scheme.category_for(self.flightplans.flightplan(follower).as_ref());
        let distance = scheme.separation(&leader_category, &follower_category);

        tracing::debug!(scheme = %scheme.key, %leader_category, %follower_category, distance, "wake separation");
        distance
    }

    fn expected_distance(aircraft: &ApproachSequencedAircraft, settings: &SequencerSettings) -> f64 {
        match aircraft.expected_distance {
            Some(d) if d.is_finite() && d >= 0.0 => d,
            Some(d) => {
                tracing::warn!("ignoring invalid expected distance {d} of {}", aircraft.callsign);
                settings.default_target_distance
            }
            None => settings.default_target_distance,
        }
    }
}
