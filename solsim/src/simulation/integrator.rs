//! Fixed-step time integrators for the N-body system
//!
//! Provides the kick-drift-kick leapfrog (velocity-Verlet) and a
//! single-evaluation semi-implicit Euler step, both driven by `ForceSet`.
//! `advance` runs one physics frame as a fixed number of substeps and then
//! records one trail point per body.
//!
//! All forces in a substep come from one snapshot of positions taken before
//! any body moves.

use log::trace;

use super::forces::ForceSet;
use super::states::{NVec2, System};
use crate::configuration::config::IntegratorConfig;

/// Advance the system by one step using kick-drift-kick leapfrog
/// Uses two force evaluations per step and updates positions, velocities,
/// stored forces and `sys.t` in-place
pub fn kick_drift_kick(sys: &mut System, forces: &ForceSet, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let mut f_old = vec![NVec2::zeros(); n];
    forces.accumulate_forces(sys.t, &*sys, &mut f_old);
    kick_drift_kick_with(sys, forces, dt, &f_old);
}

/// Leapfrog step reusing forces already evaluated at the current positions.
/// The forces at the new positions end up in each body's `f`.
fn kick_drift_kick_with(sys: &mut System, forces: &ForceSet, dt: f64, f_old: &[NVec2]) {
    let n = sys.bodies.len();
    let half_dt = 0.5 * dt; // half step dt/2

    // Kick: v_n+1/2 = v_n + (dt/2) * F_n / m
    for (b, f) in sys.bodies.iter_mut().zip(f_old.iter()) {
        b.v += (half_dt / b.m) * *f;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    sys.t += dt;

    // F_n+1 from x_n+1
    let mut f_new = vec![NVec2::zeros(); n];
    forces.accumulate_forces(sys.t, &*sys, &mut f_new);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * F_n+1 / m
    for (b, f) in sys.bodies.iter_mut().zip(f_new.iter()) {
        b.v += (half_dt / b.m) * *f;
        b.f = *f;
    }
}

/// Advance the system by one step using semi-implicit Euler
/// One force evaluation: velocity first, then position with the new velocity
pub fn semi_implicit_euler(sys: &mut System, forces: &ForceSet, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // No bodies, return
        return;
    }

    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(sys.t, &*sys, &mut f);

    for (b, f) in sys.bodies.iter_mut().zip(f.iter()) {
        b.v += (dt / b.m) * *f;
        b.x += dt * b.v;
        b.f = *f;
    }

    sys.t += dt;
}

/// Run one physics frame: `substeps` steps of `frame_dt / substeps` each,
/// then one trail point per body
pub fn advance(sys: &mut System, forces: &ForceSet, scheme: IntegratorConfig, frame_dt: f64, substeps: u32) {
    if sys.bodies.is_empty() {
        return;
    }

    let substeps = substeps.max(1);
    let dt = frame_dt / substeps as f64;
    trace!("advance: {} bodies, {} substeps of {:.3} s", sys.bodies.len(), substeps, dt);

    match scheme {
        IntegratorConfig::KickDriftKick => {
            // Positions may have been edited since the last frame, so the
            // cached forces are only trusted within this loop
            let mut f = vec![NVec2::zeros(); sys.bodies.len()];
            forces.accumulate_forces(sys.t, &*sys, &mut f);
            for _ in 0..substeps {
                kick_drift_kick_with(sys, forces, dt, &f);
                for (slot, b) in f.iter_mut().zip(sys.bodies.iter()) {
                    *slot = b.f;
                }
            }
        }
        IntegratorConfig::SemiImplicitEuler => {
            for _ in 0..substeps {
                semi_implicit_euler(sys, forces, dt);
            }
        }
    }

    record_trails(sys);
}

/// Append the current position to every body's trail
pub fn record_trails(sys: &mut System) {
    for b in sys.bodies.iter_mut() {
        b.trail.push(b.x);
    }
}
