//! Force contributors for the n-body engine
//!
//! Defines the force-term trait, the set that sums terms into one net
//! force per body, and softened Newtonian gravity

use crate::simulation::states::{Body, NVec2, System};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into a single net force per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute net forces at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(t, sys, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceTerm {
    fn force(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Newtonian gravity with Plummer-style softening
///
/// The softened distance `r_soft = sqrt(r^2 + eps^2)` divides both the
/// magnitude and the direction, so the force vector is
/// `G m_a m_b r_vec / r_soft^3`
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct SoftenedGravity {
    pub G: f64, // gravitational constant
    pub softening: f64, // epsilon (m)
}

impl SoftenedGravity {
    /// Force exerted on `a` by `b`
    pub fn force(&self, a: &Body, b: &Body) -> NVec2 {
        self.force_between(a.x, a.m, b.x, b.m)
    }

    /// Force on a mass `ma` at `xa` due to a mass `mb` at `xb`.
    /// Coincident positions give zero instead of NaN.
    pub fn force_between(&self, xa: NVec2, ma: f64, xb: NVec2, mb: f64) -> NVec2 {
        let r = xb - xa;
        let r2 = r.dot(&r);
        if r2 == 0.0 {
            return NVec2::zeros();
        }

        let r_soft = (r2 + self.softening * self.softening).sqrt();
        let magnitude = self.G * ma * mb / (r_soft * r_soft);
        r * (magnitude / r_soft)
    }
}

impl ForceTerm for SoftenedGravity {
    fn force(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n < 2 {
            return;
        }

        // Each unordered pair once; body j gets the exact negation
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                let f = self.force_between(bi.x, bi.m, bj.x, bj.m);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
