//! Wall-clock timing for the force loop and whole physics frames.
//!
//! Systems are laid out deterministically (no rand) on a ring around a
//! heavy central mass so every run sees the same geometry.

use std::time::Instant;

use log::info;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::forces::{ForceSet, SoftenedGravity};
use crate::simulation::integrator::advance;
use crate::simulation::params::{Parameters, AU};
use crate::simulation::states::{DisplayMeta, NVec2, System};

/// Timing for one body count
#[derive(Debug, Clone, Copy)]
pub struct BenchRow {
    pub n: usize,
    pub force_ms: f64, // one net-force evaluation
    pub kdk_frame_ms: f64, // one frame, kick-drift-kick
    pub euler_frame_ms: f64, // one frame, semi-implicit Euler
}

/// Helper to build a manual System of size `n`
pub fn make_system(n: usize, max_trail: usize) -> System {
    let mut sys = System::new();
    if n == 0 {
        return sys;
    }

    sys.insert(DisplayMeta::new("Center", 30.0, [255, 255, 0]), 1.989e30, NVec2::zeros(), NVec2::zeros(), max_trail);
    for i in 1..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let r = AU * (0.5 + (i_f * 0.37).sin().abs() * 4.5);
        let phi = i_f * 0.13 * std::f64::consts::TAU;
        let x = NVec2::new(r * phi.cos(), r * phi.sin());
        let speed = (6.67430e-11 * 1.989e30 / r).sqrt();
        let v = NVec2::new(-speed * phi.sin(), speed * phi.cos());
        sys.insert(DisplayMeta::new(format!("Body{i}"), 4.0, [200, 200, 200]), 1.0e24, x, v, max_trail);
    }
    sys
}

fn time_frames(template: &System, forces: &ForceSet, scheme: IntegratorConfig, p: &Parameters, frames: usize) -> f64 {
    let mut sys = template.clone();
    let substeps = p.substeps.base;

    // Warm up
    advance(&mut sys, forces, scheme, p.time_step, substeps);

    let t0 = Instant::now();
    for _ in 0..frames {
        advance(&mut sys, forces, scheme, p.time_step, substeps);
    }
    t0.elapsed().as_secs_f64() * 1000.0 / frames.max(1) as f64
}

/// Time force evaluation and full frames for each body count in `ns`
pub fn bench_frames(ns: &[usize], frames: usize, p: &Parameters) -> Vec<BenchRow> {
    let forces = ForceSet::new().with(SoftenedGravity {
        G: p.G,
        softening: p.softening,
    });

    let mut rows = Vec::with_capacity(ns.len());
    for &n in ns {
        let sys = make_system(n, p.max_trail_length);
        let mut out = vec![NVec2::zeros(); n];

        forces.accumulate_forces(0.0, &sys, &mut out);
        let t0 = Instant::now();
        forces.accumulate_forces(0.0, &sys, &mut out);
        let force_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let kdk_frame_ms = time_frames(&sys, &forces, IntegratorConfig::KickDriftKick, p, frames);
        let euler_frame_ms = time_frames(&sys, &forces, IntegratorConfig::SemiImplicitEuler, p, frames);

        info!(
            "N = {:4}, force = {:8.4} ms, kdk frame = {:8.4} ms, euler frame = {:8.4} ms",
            n, force_ms, kdk_frame_ms, euler_frame_ms
        );
        rows.push(BenchRow { n, force_ms, kdk_frame_ms, euler_frame_ms });
    }
    rows
}

/// Same sweep printed as CSV on stdout, ready to paste into a spreadsheet
pub fn bench_frame_curve(max_n: usize, p: &Parameters) {
    println!("N,force_ms,kdk_frame_ms,euler_frame_ms");
    let ns: Vec<usize> = (2..=max_n.max(2)).step_by(8).collect();
    for row in bench_frames(&ns, 3, p) {
        println!("{},{:.6},{:.6},{:.6}", row.n, row.force_ms, row.kdk_frame_ms, row.euler_frame_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_rows_cover_each_size() {
        let mut p = Parameters::coarse();
        p.substeps.base = 2;
        let rows = bench_frames(&[1, 4], 1, &p);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].n, 4);
        assert!(rows.iter().all(|r| r.force_ms >= 0.0 && r.kdk_frame_ms >= 0.0));
    }

    #[test]
    fn benchmark_system_has_requested_size() {
        assert_eq!(make_system(0, 10).len(), 0);
        assert_eq!(make_system(6, 10).len(), 6);
    }
}
