//! Approach spacing and departure handoff decisions for air traffic controllers.
//!
//! The core is the [`ApproachSpacingCalculator`](sequencer::ApproachSpacingCalculator): for an
//! aircraft in an airfield's approach sequence it works out how far behind its predecessor it
//! has to be, taking the stricter of the wake turbulence separation and the airfield minimum.

pub mod error;
pub mod spacing;
pub mod snapshot;
pub mod airfield;
pub mod wake;
pub mod flightplan;
pub mod sequencer;
pub mod handoff;
pub mod minstack;
pub mod config;

pub mod generate;
pub mod calculate;
pub mod resolve;

pub use error::{Result, SpacingError};
pub use spacing::Spacing;
pub use sequencer::{ApproachSequence, ApproachSequencedAircraft, ApproachSpacingCalculator, SequencerOptions};
