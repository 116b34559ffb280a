//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator, tuning and numerical knobs
//! - [`ParametersConfig`] – physical constants and the baseline tick
//! - [`BodyConfig`]       – initial state for each extra body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every field is optional; omitted values fall back to the chosen tuning.
//!
//! ```yaml
//! engine:
//!   tuning: "fine"              # or "coarse"
//!   integrator: "kick_drift_kick" # or "semi_implicit_euler"
//!   substeps: 20
//!   tight_substeps: 100
//!   softening: 1.0e6            # metres
//!   collision_scale: 1.0e7      # metres per visual radius unit
//!   max_trail_length: 800
//!
//! parameters:
//!   G: 6.6743e-11
//!   time_step: 86400.0          # one simulated day per frame at time_scale 1
//!
//! preset: "Sun-Earth-Moon"
//!
//! bodies:
//!   - name: "Comet"
//!     x: [ 3.0e11, 0.0 ]
//!     v: [ 0.0, 8000.0 ]
//!     m: 1.0e14
//!     radius: 2.0
//! ```
//!
//! The engine then maps this configuration into its runtime [`Parameters`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::error::SimError;
use crate::simulation::params::{Parameters, SubstepPolicy};

/// Which integrator advances the bodies
/// integrator: "kick_drift_kick"` or `integrator: "semi_implicit_euler"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "kick_drift_kick", alias = "verlet")] // Symplectic leapfrog, bounded long-term energy error
    KickDriftKick,

    #[serde(rename = "semi_implicit_euler", alias = "euler")] // One force evaluation per step, cheaper and less accurate
    SemiImplicitEuler,
}

/// Named starting point for the numerical knobs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tuning {
    #[serde(rename = "coarse")]
    Coarse,
    #[default]
    #[serde(rename = "fine")]
    Fine,
}

/// Engine configuration
/// Controls how the simulation is integrated
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub tuning: Tuning, // base values that the fields below override
    pub integrator: Option<IntegratorConfig>,
    pub substeps: Option<u32>, // substeps per frame without a tight pair
    pub tight_substeps: Option<u32>, // substeps per frame while a tight pair exists
    pub tight_pair_distance: Option<f64>, // metres
    pub softening: Option<f64>, // epsilon, metres
    pub collision_scale: Option<f64>, // metres per visual radius unit
    pub max_trail_length: Option<usize>,
}

/// Physical constants for a scenario
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub G: Option<f64>, // gravitational constant
    pub time_step: Option<f64>, // baseline tick in seconds
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub x: [f64; 2], // initial position (m)
    pub v: [f64; 2], // initial velocity (m/s)
    pub m: f64, // mass (kg)
    #[serde(default = "default_radius")]
    pub radius: f64, // visual radius, also drives the collision threshold
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

fn default_radius() -> f64 {
    5.0
}

fn default_color() -> [u8; 3] {
    [255, 255, 255]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub preset: Option<String>, // built first when present
    pub bodies: Vec<BodyConfig>, // appended after the preset
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error(transparent)]
    Simulation(#[from] SimError),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

impl ScenarioConfig {
    /// Resolve the runtime parameters, starting from the selected tuning
    pub fn parameters(&self) -> Result<Parameters, ConfigError> {
        let e = &self.engine;
        let mut p = match e.tuning {
            Tuning::Coarse => Parameters::coarse(),
            Tuning::Fine => Parameters::fine(),
        };

        if let Some(integrator) = e.integrator {
            p.integrator = integrator;
        }
        let base = e.substeps.unwrap_or(p.substeps.base);
        // a fixed tuning stays fixed when only `substeps` is overridden
        let tight = match e.tight_substeps {
            Some(t) => t,
            None if p.substeps.base == p.substeps.tight => base,
            None => p.substeps.tight.max(base),
        };
        if base == 0 || tight == 0 {
            return Err(invalid("substeps", "must be at least 1"));
        }
        p.substeps = SubstepPolicy::adaptive(base, tight);

        if let Some(d) = e.tight_pair_distance {
            if !(d >= 0.0 && d.is_finite()) {
                return Err(invalid("tight_pair_distance", format!("{d} is not a finite distance")));
            }
            p.tight_pair_distance = d;
        }
        if let Some(eps) = e.softening {
            if !(eps >= 0.0 && eps.is_finite()) {
                return Err(invalid("softening", format!("{eps} is not a finite distance")));
            }
            p.softening = eps;
        }
        if let Some(k) = e.collision_scale {
            if !(k >= 0.0 && k.is_finite()) {
                return Err(invalid("collision_scale", format!("{k} is not a finite scale")));
            }
            p.collision_scale = k;
        }
        if let Some(len) = e.max_trail_length {
            p.max_trail_length = len;
        }

        if let Some(g) = self.parameters.G {
            if !(g > 0.0 && g.is_finite()) {
                return Err(invalid("G", format!("{g} must be positive")));
            }
            p.G = g;
        }
        if let Some(dt) = self.parameters.time_step {
            if !(dt > 0.0 && dt.is_finite()) {
                return Err(invalid("time_step", format!("{dt} must be positive")));
            }
            p.time_step = dt;
        }

        Ok(p)
    }
}

/// Parse a scenario from a YAML string
pub fn parse_scenario(yaml: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a scenario from a YAML file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_fine_tuning() {
        let cfg = parse_scenario("{}").unwrap();
        let p = cfg.parameters().unwrap();
        assert_eq!(p.softening, 1.0e6);
        assert_eq!(p.substeps, SubstepPolicy::adaptive(20, 100));
        assert_eq!(p.integrator, IntegratorConfig::KickDriftKick);
        assert!(cfg.preset.is_none());
        assert!(cfg.bodies.is_empty());
    }

    #[test]
    fn coarse_tuning_with_overrides() {
        let cfg = parse_scenario(
            "engine:\n  tuning: coarse\n  integrator: euler\n  max_trail_length: 5\nparameters:\n  time_step: 3600.0\n",
        )
        .unwrap();
        let p = cfg.parameters().unwrap();
        assert_eq!(p.softening, 1.0e4);
        assert_eq!(p.substeps, SubstepPolicy::fixed(20));
        assert_eq!(p.integrator, IntegratorConfig::SemiImplicitEuler);
        assert_eq!(p.max_trail_length, 5);
        assert_eq!(p.time_step, 3600.0);
    }

    #[test]
    fn coarse_substeps_override_stays_fixed() {
        let cfg = parse_scenario("engine:\n  tuning: coarse\n  substeps: 5\n").unwrap();
        assert_eq!(cfg.parameters().unwrap().substeps, SubstepPolicy::fixed(5));

        let cfg = parse_scenario("engine:\n  tuning: coarse\n  substeps: 5\n  tight_substeps: 40\n").unwrap();
        assert_eq!(cfg.parameters().unwrap().substeps, SubstepPolicy::adaptive(5, 40));

        let cfg = parse_scenario("engine:\n  substeps: 30\n").unwrap();
        assert_eq!(cfg.parameters().unwrap().substeps, SubstepPolicy::adaptive(30, 100));
    }

    #[test]
    fn zero_substeps_rejected() {
        let cfg = parse_scenario("engine:\n  substeps: 0\n").unwrap();
        assert!(matches!(cfg.parameters(), Err(ConfigError::Invalid { field: "substeps", .. })));
    }

    #[test]
    fn bodies_take_default_display_values() {
        let cfg = parse_scenario("bodies:\n  - name: Rock\n    x: [1.0, 2.0]\n    v: [0.0, 0.0]\n    m: 3.0\n").unwrap();
        assert_eq!(cfg.bodies.len(), 1);
        assert_eq!(cfg.bodies[0].radius, 5.0);
        assert_eq!(cfg.bodies[0].color, [255, 255, 255]);
    }
}
