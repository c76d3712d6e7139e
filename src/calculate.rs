use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use crate::config::Scenario;
use crate::error::Result;
use crate::spacing::Spacing;

#[derive(Debug, Args)]
pub struct Calculate {
    /// The path to the scenario file
    #[clap(short, long)]
    pub scenario: String,
    /// Override the global default minimum separation, in nm
    #[clap(short, long)]
    pub default_minimum: Option<f64>,
    /// Print the result as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct SpacingReport {
    pub airfield: String,
    pub callsign: String,
    pub previous: Option<String>,
    pub spacing: Option<Spacing>,
    pub error: Option<String>,
}

impl Calculate {
    pub fn calculate(&self) -> Result<()> {
        let scenario = Scenario::from_path(&self.scenario)?;
        let reports = Self::reports(&scenario, self.default_minimum)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            println!("{:<6} {:<10} {:<10} {:>8}", "ICAO", "CALLSIGN", "BEHIND", "SPACING");
            for r in &reports {
                let spacing = match (&r.spacing, &r.error) {
                    (Some(s), _) => s.to_string(),
                    (None, Some(e)) => e.clone(),
                    (None, None) => String::new(),
                };
                println!("{:<6} {:<10} {:<10} {:>8}", r.airfield, r.callsign, r.previous.as_deref().unwrap_or("-"), spacing);
            }
        }
        Ok(())
    }

    /// Spacing for every sequenced aircraft of the scenario. Per-aircraft failures end up in
    /// the report, configuration errors abort.
    pub fn reports(scenario: &Scenario, default_minimum: Option<f64>) -> Result<Vec<SpacingReport>> {
        let tables = scenario.config.tables()?;
        if let Some(min) = default_minimum {
            tables.options.set_default_minimum_separation(min)?;
        }
        let calculator = tables.calculator(Arc::new(scenario.flightplan_store()));

        let mut reports = vec![];
        for sequence in &scenario.sequences {
            for (aircraft, (callsign, result)) in sequence.iter().zip(calculator.calculate_sequence(sequence)) {
                let (spacing, error) = match result {
                    Ok(s) => (Some(s), None),
                    Err(e) => {
                        tracing::warn!("no spacing for {callsign}: {e}");
                        (None, Some(e.to_string()))
                    }
                };
                reports.push(SpacingReport {
                    airfield: sequence.airfield().to_string(),
                    callsign,
                    previous: aircraft.previous().map(str::to_string),
                    spacing,
                    error,
                });
            }
        }
        Ok(reports)
    }
}
