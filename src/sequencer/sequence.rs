use serde::{Serialize, Deserialize};

/// How the spacing behind the previous aircraft is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencingMode {
    #[default]
    WakeTurbulence,
    MinimumDistance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachSequencedAircraft {
    pub callsign: String,
    #[serde(default)]
    pub mode: SequencingMode,
    /// Spacing requested for minimum distance sequencing
    #[serde(default)]
    pub expected_distance: Option<f64>,
    /// Callsign of the aircraft ahead, set by the owning sequence
    #[serde(skip)]
    previous: Option<String>,
}

impl ApproachSequencedAircraft {
    pub fn new(callsign: &str) -> Self {
        ApproachSequencedAircraft {
            callsign: callsign.to_string(),
            mode: SequencingMode::WakeTurbulence,
            expected_distance: None,
            previous: None,
        }
    }

    pub fn minimum_distance(callsign: &str, expected_distance: Option<f64>) -> Self {
        ApproachSequencedAircraft {
            mode: SequencingMode::MinimumDistance,
            expected_distance,
            ..Self::new(callsign)
        }
    }

    /// link this entry to the aircraft ahead of it
    pub fn behind(mut self, previous: &str) -> Self {
        self.previous = Some(previous.to_string());
        self
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

/// The ordered approach sequence for one airfield.
///
/// Entries refer to their predecessor by callsign. Rebuilding the sequence after a
/// reorder relinks everything, so nothing outside can hold on to a stale neighbour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SequenceDefinition", into = "SequenceDefinition")]
pub struct ApproachSequence {
    airfield: String,
    aircraft: Vec<ApproachSequencedAircraft>,
}

#[derive(Serialize, Deserialize)]
struct SequenceDefinition {
    airfield: String,
    aircraft: Vec<ApproachSequencedAircraft>,
}

impl From<SequenceDefinition> for ApproachSequence {
    fn from(def: SequenceDefinition) -> Self {
        ApproachSequence::new(&def.airfield, def.aircraft)
    }
}

impl From<ApproachSequence> for SequenceDefinition {
    fn from(seq: ApproachSequence) -> Self {
        SequenceDefinition { airfield: seq.airfield, aircraft: seq.aircraft }
    }
}

impl ApproachSequence {
    /// Builds a sequence in the given order. Later duplicates of a callsign are dropped.
    pub fn new(airfield: &str, aircraft: Vec<ApproachSequencedAircraft>) -> Self {
        let mut linked: Vec<ApproachSequencedAircraft> = Vec::with_capacity(aircraft.len());

        for mut ac in aircraft {
            if linked.iter().any(|a| a.callsign == ac.callsign) {
                tracing::warn!("{} sequenced twice for {airfield}, ignoring duplicate", ac.callsign);
                continue;
            }
            ac.previous = linked.last().map(|a| a.callsign.clone());
            linked.push(ac);
        }

        ApproachSequence { airfield: airfield.to_uppercase(), aircraft: linked }
    }

    pub fn airfield(&self) -> &str {
        &self.airfield
    }

    pub fn get(&self, callsign: &str) -> Option<&ApproachSequencedAircraft> {
        self.aircraft.iter().find(|a| a.callsign == callsign)
    }

    pub fn first(&self) -> Option<&ApproachSequencedAircraft> {
        self.aircraft.first()
    }

    pub fn previous_of(&self, callsign: &str) -> Option<&ApproachSequencedAircraft> {
        self.get(callsign).and_then(|a| a.previous()).and_then(|p| self.get(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApproachSequencedAircraft> {
        self.aircraft.iter()
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sequence() -> ApproachSequence {
        ApproachSequence::new("egll", vec![
            ApproachSequencedAircraft::new("BAW1"),
            ApproachSequencedAircraft::new("VIR2"),
            ApproachSequencedAircraft::minimum_distance("EZY3", Some(4.0)),
        ])
    }

    #[test]
    fn entries_are_linked_in_order() {
        let seq = sequence();
        assert_eq!(seq.airfield(), "EGLL");
        assert_eq!(seq.first().map(|a| a.callsign.as_str()), Some("BAW1"));
        assert_eq!(seq.get("BAW1").unwrap().previous(), None);
        assert_eq!(seq.get("VIR2").unwrap().previous(), Some("BAW1"));
        assert_eq!(seq.previous_of("EZY3").map(|a| a.callsign.as_str()), Some("VIR2"));
    }

    #[test]
    fn duplicates_are_dropped() {
        let seq = ApproachSequence::new("EGLL", vec![
            ApproachSequencedAircraft::new("BAW1"),
            ApproachSequencedAircraft::new("BAW1"),
            ApproachSequencedAircraft::new("VIR2"),
        ]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get("VIR2").unwrap().previous(), Some("BAW1"));
    }

    #[test]
    fn deserialized_sequence_is_linked() {
        let seq: ApproachSequence = serde_json::from_str(r#"{
            "airfield": "EGKK",
            "aircraft": [
                { "callsign": "EZY1" },
                { "callsign": "EZY2", "mode": "minimum_distance", "expected_distance": 5.0 }
            ]
        }"#).unwrap();

        let second = seq.get("EZY2").unwrap();
        assert_eq!(second.previous(), Some("EZY1"));
        assert_eq!(second.mode, SequencingMode::MinimumDistance);
        assert_eq!(second.expected_distance, Some(5.0));
    }

    #[test]
    fn reordering_relinks() {
        let seq = sequence();
        let mut order: Vec<ApproachSequencedAircraft> = seq.iter().cloned().collect();
        order.reverse();
        let seq = ApproachSequence::new("EGLL", order);

        assert_eq!(seq.get("EZY3").unwrap().previous(), None);
        assert_eq!(seq.get("BAW1").unwrap().previous(), Some("VIR2"));
    }
}
