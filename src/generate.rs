use std::{time::{SystemTime, UNIX_EPOCH}, fs::File, io::Write};

use clap::Args;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaChaRng;
use rand_distr::{Uniform, Normal, Bernoulli, Distribution};

use crate::config::{Scenario, SpacingConfig};
use crate::error::{config_error, Result};
use crate::flightplan::Flightplan;
use crate::sequencer::{ApproachSequence, ApproachSequencedAircraft};

const AIRLINES: [&str; 8] = ["BAW", "EZY", "VIR", "RYR", "DLH", "AFR", "KLM", "TOM"];

/// Aircraft types no wake scheme knows about
const UNKNOWN_TYPES: [&str; 3] = ["ZZZZ", "GLID", "UHEL"];

#[derive(Debug, Args)]
pub struct ScenarioGenerator {
    /// An optional seed to kickstart the scenario generation
    #[clap(short='s', long)]
    seed: Option<u128>,
    /// Configuration to draw airfields and aircraft types from (defaults to the built-in one)
    #[clap(short='c', long)]
    config: Option<String>,
    /// The number of sequenced airfields
    #[clap(short='a', long, default_value="2")]
    nb_airfields: usize,
    /// The number of aircraft in each sequence
    #[clap(short='n', long, default_value="8")]
    nb_aircraft: usize,
    /// Probability that an aircraft files a type no scheme knows
    #[clap(long, default_value="0.1")]
    unknown_type_ratio: f64,
    /// Probability that an aircraft is sequenced by minimum distance instead of wake
    #[clap(long, default_value="0.2")]
    minimum_distance_ratio: f64,
    /// The mean of the expected distance of minimum distance aircraft, in nm
    #[clap(long, default_value="5.0")]
    avg_expected_distance: f64,
    /// The std deviation of the expected distance, in nm
    #[clap(long, default_value="1.0")]
    expected_distance_std_dev: f64,
    /// The ratio of configured controller positions that are online
    #[clap(long, default_value="0.5")]
    online_ratio: f64,
    /// Name of the file where to generate the scenario
    #[clap(short, long)]
    output: Option<String>,
}

impl ScenarioGenerator {

    pub fn generate(&mut self) -> Result<()> {
        let mut rng = self.rng();

        let config = match &self.config {
            Some(path) => SpacingConfig::from_path(path)?,
            None => SpacingConfig::builtin()?,
        };
        // validates the configuration before we draw from it
        config.tables()?;

        let aircraft_types = self.known_types(&config);
        if aircraft_types.is_empty() {
            return Err(config_error!("no aircraft types configured to generate from"));
        }

        let mut flightplans = vec![];
        let mut sequences = vec![];
        let mut airfields: Vec<&str> = config.airfields.iter().map(|a| a.icao.as_str()).collect();
        airfields.shuffle(&mut rng);

        for airfield in airfields.into_iter().take(self.nb_airfields) {
            let mut aircraft = vec![];
            for _ in 0..self.nb_aircraft {
                let fp = self.generate_flightplan(&mut rng, &aircraft_types, airfield, flightplans.len())?;
                aircraft.push(self.generate_sequenced_aircraft(&mut rng, &fp.callsign)?);
                flightplans.push(fp);
            }
            sequences.push(ApproachSequence::new(airfield, aircraft));
        }

        flightplans.extend(self.generate_departures(&mut rng, &config, &aircraft_types, flightplans.len()));
        let active_controllers = self.generate_active_controllers(&mut rng, &config)?;

        let scenario = Scenario { config, flightplans, active_controllers, sequences };
        let scenario = serde_json::to_string_pretty(&scenario)?;

        if let Some(output) = self.output.as_ref() {
            File::create(output)?.write_all(scenario.as_bytes())?;
            tracing::info!("scenario written to {output}");
        } else {
            println!("{scenario}");
        }
        Ok(())
    }

    fn known_types(&self, config: &SpacingConfig) -> Vec<String> {
        let mut types: Vec<String> = config.wake_schemes.iter()
            .flat_map(|s| s.aircraft_types.keys().cloned())
            .collect();
        types.sort();
        types.dedup();
        types
    }

    fn callsign(&self, rng: &mut impl Rng, n: usize) -> String {
        let airline = AIRLINES[rng.gen_range(0..AIRLINES.len())];
        format!("{airline}{}", 100 + n)
    }

    fn aircraft_type(&self, rng: &mut impl Rng, types: &[String]) -> Result<String> {
        let unknown = Bernoulli::new(self.unknown_type_ratio).map_err(|e| config_error!("unknown type ratio: {e}"))?;
        let t = if unknown.sample(rng) {
            UNKNOWN_TYPES[rng.gen_range(0..UNKNOWN_TYPES.len())].to_string()
        } else {
            types[Uniform::new(0, types.len()).sample(rng)].clone()
        };
        Ok(t)
    }

    fn generate_flightplan(&self, rng: &mut impl Rng, types: &[String], destination: &str, n: usize) -> Result<Flightplan> {
        let mut fp = Flightplan::new(&self.callsign(rng, n), &self.aircraft_type(rng, types)?);
        fp.destination = destination.to_string();
        Ok(fp)
    }

    fn generate_sequenced_aircraft(&self, rng: &mut impl Rng, callsign: &str) -> Result<ApproachSequencedAircraft> {
        let by_distance = Bernoulli::new(self.minimum_distance_ratio).map_err(|e| config_error!("minimum distance ratio: {e}"))?;
        if !by_distance.sample(rng) {
            return Ok(ApproachSequencedAircraft::new(callsign));
        }

        let rand_distance = Normal::new(self.avg_expected_distance, self.expected_distance_std_dev)
            .map_err(|e| config_error!("expected distance distribution: {e}"))?;
        // half nautical mile steps, never negative
        let distance = (rand_distance.sample(rng) * 2.0).round().max(0.0) / 2.0;
        Ok(ApproachSequencedAircraft::minimum_distance(callsign, Some(distance)))
    }

    fn generate_departures(&self, rng: &mut impl Rng, config: &SpacingConfig, types: &[String], first: usize) -> Vec<Flightplan> {
        let handoffs = &config.handoffs;
        let mut departures = vec![];

        for (i, sid) in handoffs.sids.iter().enumerate() {
            let fp = Flightplan::new(&self.callsign(rng, first + i), &types[rng.gen_range(0..types.len())])
                .departing(&sid.airfield, Some(&sid.sid));
            departures.push(fp);
        }

        let mut airfields: Vec<&String> = handoffs.airfields.keys().collect();
        airfields.sort();
        for (i, airfield) in airfields.into_iter().enumerate() {
            let fp = Flightplan::new(&self.callsign(rng, first + departures.len() + i), &types[rng.gen_range(0..types.len())])
                .departing(airfield, None);
            departures.push(fp);
        }

        departures
    }

    fn generate_active_controllers(&self, rng: &mut impl Rng, config: &SpacingConfig) -> Result<Vec<String>> {
        let online = Bernoulli::new(self.online_ratio).map_err(|e| config_error!("online ratio: {e}"))?;
        Ok(config.handoffs.controllers.iter()
            .filter(|_| online.sample(rng))
            .map(|c| c.callsign.clone())
            .collect())
    }

    fn rng(&self) -> impl Rng {
        let init = self.seed.unwrap_or_else(|| SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default());
        let mut seed = [0_u8; 32];
        seed.iter_mut().zip(init.to_be_bytes()).for_each(|(s, i)| *s = i);
        seed.iter_mut().rev().zip(init.to_le_bytes()).for_each(|(s, i)| *s = i);
        ChaChaRng::from_seed(seed)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u128) -> ScenarioGenerator {
        ScenarioGenerator {
            seed: Some(seed),
            config: None,
            nb_airfields: 2,
            nb_aircraft: 5,
            unknown_type_ratio: 0.2,
            minimum_distance_ratio: 0.5,
            avg_expected_distance: 5.0,
            expected_distance_std_dev: 1.0,
            online_ratio: 0.5,
            output: None,
        }
    }

    #[test]
    fn same_seed_same_aircraft() {
        let g = generator(42);
        let types = g.known_types(&SpacingConfig::builtin().unwrap());

        let (mut a, mut b) = (g.rng(), g.rng());
        let first: Vec<Flightplan> = (0..5).map(|n| g.generate_flightplan(&mut a, &types, "EGLL", n).unwrap()).collect();
        let second: Vec<Flightplan> = (0..5).map(|n| g.generate_flightplan(&mut b, &types, "EGLL", n).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn expected_distances_are_non_negative_half_miles() {
        let mut g = generator(7);
        g.minimum_distance_ratio = 1.0;
        g.expected_distance_std_dev = 10.0;
        let mut rng = g.rng();

        for _ in 0..100 {
            let ac = g.generate_sequenced_aircraft(&mut rng, "BAW1").unwrap();
            let d = ac.expected_distance.unwrap();
            assert!(d >= 0.0);
            assert_eq!((d * 2.0).fract(), 0.0);
        }
    }

    #[test]
    fn departures_cover_every_handoff_mapping() {
        let g = generator(3);
        let config = SpacingConfig::builtin().unwrap();
        let types = g.known_types(&config);
        let departures = g.generate_departures(&mut g.rng(), &config, &types, 0);
        assert_eq!(departures.len(), config.handoffs.sids.len() + config.handoffs.airfields.len());
        assert!(departures.iter().all(|fp| !fp.origin.is_empty()));
    }

    #[test]
    fn invalid_ratio_is_an_error() {
        let mut g = generator(1);
        g.unknown_type_ratio = 1.5;
        let types = vec!["A320".to_string()];
        assert!(g.aircraft_type(&mut g.rng(), &types).is_err());
    }
}
