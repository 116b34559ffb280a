//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings that are fixed once an engine is built:
//! - gravitational constant and softening (`G`, `softening`),
//! - the baseline tick and the substep policy,
//! - the collision scale and trail length,
//! - which integrator advances the bodies
//!
//! Two tunings ship: `coarse()` and `fine()`. Neither is a derived physical
//! constant, so both stay configurable.

use crate::configuration::config::IntegratorConfig;

/// Gravitational constant (N m^2 / kg^2)
pub const G_SI: f64 = 6.67430e-11;
/// Astronomical unit (m)
pub const AU: f64 = 1.496e11;
/// Baseline physics tick: one simulated day (s)
pub const DAY: f64 = 86_400.0;

/// Substep counts per physics frame.
/// `tight` applies while the system holds a tightly bound pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstepPolicy {
    pub base: u32,
    pub tight: u32,
}

impl SubstepPolicy {
    pub fn fixed(n: u32) -> Self {
        Self { base: n, tight: n }
    }

    pub fn adaptive(base: u32, tight: u32) -> Self {
        Self { base, tight }
    }

    pub fn select(&self, has_tight_pair: bool) -> u32 {
        if has_tight_pair { self.tight } else { self.base }
    }
}

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub time_step: f64, // baseline tick (s), scaled by time_scale
    pub softening: f64, // epsilon (m), added in quadrature to separation
    pub substeps: SubstepPolicy,
    pub tight_pair_distance: f64, // bound pairs closer than this use `substeps.tight`
    pub collision_scale: f64, // metres per unit of visual radius
    pub max_trail_length: usize,
    pub integrator: IntegratorConfig,
}

impl Parameters {
    /// Single-force-evaluation tuning: small softening, fixed 20 substeps
    pub fn coarse() -> Self {
        Self {
            softening: 1.0e4,
            substeps: SubstepPolicy::fixed(20),
            ..Self::fine()
        }
    }

    /// Close-encounter tuning: large softening, 100 substeps around tight pairs
    pub fn fine() -> Self {
        Self {
            G: G_SI,
            time_step: DAY,
            softening: 1.0e6,
            substeps: SubstepPolicy::adaptive(20, 100),
            tight_pair_distance: 0.05 * AU,
            collision_scale: 1.0e7,
            max_trail_length: 800,
            integrator: IntegratorConfig::KickDriftKick,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::fine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substep_policy_selects_tight_count() {
        let policy = SubstepPolicy::adaptive(20, 100);
        assert_eq!(policy.select(false), 20);
        assert_eq!(policy.select(true), 100);
        assert_eq!(SubstepPolicy::fixed(7).select(true), 7);
    }

    #[test]
    fn tunings_differ_only_in_softening_and_substeps() {
        let coarse = Parameters::coarse();
        let fine = Parameters::fine();
        assert_eq!(coarse.softening, 1.0e4);
        assert_eq!(fine.softening, 1.0e6);
        assert_eq!(coarse.time_step, fine.time_step);
        assert_eq!(coarse.collision_scale, fine.collision_scale);
    }
}
