//! Approach sequencing: operator options, the per-airfield sequence and the
//! spacing calculator that works over them.

mod calculator;
mod options;
mod sequence;

pub use calculator::ApproachSpacingCalculator;
pub use options::{SequencerOptions, SequencerSettings, DEFAULT_MINIMUM_SEPARATION, DEFAULT_TARGET_DISTANCE};
pub use sequence::{ApproachSequence, ApproachSequencedAircraft, SequencingMode};
