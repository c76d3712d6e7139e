//! Required in-trail spacing values, in nautical miles.

use std::fmt;

use serde::{Serialize, Deserialize};

/// The spacing an aircraft must keep behind its predecessor.
///
/// `NotApplicable` is returned when there is nothing to be spaced against (the
/// aircraft leads its sequence). Being its own variant it cannot be compared with
/// a real distance without first being matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "distance")]
pub enum Spacing {
    NotApplicable,
    Required(f64),
}

impl Spacing {
    pub fn distance(&self) -> Option<f64> {
        match self {
            Spacing::NotApplicable => None,
            Spacing::Required(d) => Some(*d),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Spacing::Required(_))
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spacing::NotApplicable => write!(f, "-"),
            Spacing::Required(d) => write!(f, "{d:.1}nm"),
        }
    }
}

/// The stricter of two distance constraints.
#[inline]
pub fn greater_of(a: f64, b: f64) -> f64 {
    if a >= b { a } else { b }
}
