//! Collision detection and absorption
//!
//! Two bodies collide when their separation drops below the sum of their
//! visual radii times `collision_scale`. The lighter body is removed and the
//! heavier one is left untouched; no mass or momentum is transferred. On
//! equal masses the lower id survives.

use log::info;

use crate::simulation::states::{Body, BodyId, System};

/// One resolved collision, reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionEvent {
    pub removed_id: BodyId,
    pub removed_name: String,
    pub survivor_id: BodyId,
    pub survivor_name: String,
}

/// Whether `a` and `b` overlap under the given scale
pub fn overlapping(a: &Body, b: &Body, collision_scale: f64) -> bool {
    a.distance_to(b) < (a.radius + b.radius) * collision_scale
}

/// Index of the body that survives a collision between `i` and `j`
fn survivor(sys: &System, i: usize, j: usize) -> usize {
    let (a, b) = (&sys.bodies[i], &sys.bodies[j]);
    if a.m > b.m || (a.m == b.m && a.id < b.id) { i } else { j }
}

/// First colliding pair in scan order, if any
fn find_collision(sys: &System, collision_scale: f64) -> Option<(usize, usize)> {
    let n = sys.bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if overlapping(&sys.bodies[i], &sys.bodies[j], collision_scale) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Remove the lighter member of every colliding pair.
///
/// The pairwise scan restarts after each removal, so indices never refer to
/// a body that has already gone.
pub fn resolve(sys: &mut System, collision_scale: f64) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    while let Some((i, j)) = find_collision(sys, collision_scale) {
        let keep = survivor(sys, i, j);
        let drop = if keep == i { j } else { i };

        let removed = sys.bodies.remove(drop);
        // `keep` shifts down by one if it sat after the removed slot
        let kept = &sys.bodies[if keep > drop { keep - 1 } else { keep }];

        info!(
            "collision: {} ({}) absorbed by {} ({})",
            removed.name, removed.id, kept.name, kept.id
        );
        events.push(CollisionEvent {
            removed_id: removed.id,
            removed_name: removed.name,
            survivor_id: kept.id,
            survivor_name: kept.name.clone(),
        });
    }

    events
}
