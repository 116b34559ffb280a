//! Core state types for the N-body simulation.
//!
//! Defines the 2D body/system structs:
//! - `Body` / `System` using `NVec2`
//! - `Trail`, the bounded position history each body owns
//! - `BodySnapshot`, the read-only copy handed to renderers
//!
//! The system exclusively owns its bodies. Outside code refers to a body by
//! its `BodyId`, never by index, because collisions and deletions shift
//! indices around.

use std::collections::VecDeque;
use std::fmt;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Stable handle for a body. Ids are handed out in increasing order and are
/// never reused within one `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation data that travels with a body. The engine only reads
/// `radius`, for the collision threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMeta {
    pub name: String,
    pub radius: f64, // visual radius (renderer units)
    pub color: [u8; 3],
}

impl DisplayMeta {
    pub fn new(name: impl Into<String>, radius: f64, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            radius,
            color,
        }
    }
}

/// FIFO history of past positions, capped at `max_len`.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<NVec2>,
    max_len: usize,
}

impl Trail {
    pub fn new(max_len: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len.min(1024)),
            max_len,
        }
    }

    /// Append a point, evicting the oldest ones once the cap is exceeded
    pub fn push(&mut self, p: NVec2) {
        if self.max_len == 0 {
            return;
        }
        self.points.push_back(p);
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn oldest(&self) -> Option<NVec2> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<NVec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NVec2> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<NVec2> {
        self.points.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    pub m: f64, // mass (kg)
    pub f: NVec2, // last net force (N), read-only outside the engine
    pub radius: f64, // visual radius, scaled by `collision_scale` for collisions
    pub color: [u8; 3],
    pub trail: Trail,
}

impl Body {
    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.x - self.x).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.m.is_finite()
            && self.x.iter().all(|c| c.is_finite())
            && self.v.iter().all(|c| c.is_finite())
            && self.f.iter().all(|c| c.is_finite())
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            name: self.name.clone(),
            mass: self.m,
            radius: self.radius,
            color: self.color,
            position: self.x,
            velocity: self.v,
            force: self.f,
            trail: self.trail.to_vec(),
        }
    }
}

/// Detached copy of one body, safe to hold across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    pub color: [u8; 3],
    pub position: NVec2,
    pub velocity: NVec2,
    pub force: NVec2,
    pub trail: Vec<NVec2>,
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // 2d collection of bodies
    pub t: f64, // simulated time (s)
    next_id: u64,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a body and hand back its fresh id. Inputs are not validated
    /// here; the engine checks them at its mutation boundary.
    pub fn insert(&mut self, meta: DisplayMeta, m: f64, x: NVec2, v: NVec2, max_trail: usize) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            name: meta.name,
            x,
            v,
            m,
            f: NVec2::zeros(),
            radius: meta.radius,
            color: meta.color,
            trail: Trail::new(max_trail),
        });
        id
    }

    /// Move every body of `other` into this system under new ids.
    /// Trails are rebuilt with the given cap.
    pub fn absorb(&mut self, other: System, max_trail: usize) -> Vec<BodyId> {
        other
            .bodies
            .into_iter()
            .map(|b| {
                let meta = DisplayMeta {
                    name: b.name,
                    radius: b.radius,
                    color: b.color,
                };
                self.insert(meta, b.m, b.x, b.v, max_trail)
            })
            .collect()
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let i = self.index_of(id)?;
        Some(self.bodies.remove(i))
    }

    /// Drop every body. The id counter keeps running.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted mean position; origin for an empty system
    pub fn center_of_mass(&self) -> NVec2 {
        let m_tot = self.total_mass();
        if m_tot <= 0.0 {
            return NVec2::zeros();
        }
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.x * b.m) / m_tot
    }

    /// Mass-weighted mean velocity; zero for an empty system
    pub fn center_of_mass_velocity(&self) -> NVec2 {
        let m_tot = self.total_mass();
        if m_tot <= 0.0 {
            return NVec2::zeros();
        }
        self.total_momentum() / m_tot
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Pairwise potential matching the softened force law:
    /// U = -G m_a m_b / sqrt(r^2 + eps^2)
    #[allow(non_snake_case)]
    pub fn potential_energy(&self, G: f64, softening: f64) -> f64 {
        let eps2 = softening * softening;
        let n = self.bodies.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let bi = &self.bodies[i];
                let bj = &self.bodies[j];
                let r_soft2 = (bj.x - bi.x).norm_squared() + eps2;
                // only unsoftened coincident pairs are singular
                if r_soft2 == 0.0 {
                    continue;
                }
                u -= G * bi.m * bj.m / r_soft2.sqrt();
            }
        }
        u
    }

    #[allow(non_snake_case)]
    pub fn total_energy(&self, G: f64, softening: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(G, softening)
    }

    pub fn is_finite(&self) -> bool {
        self.bodies.iter().all(Body::is_finite)
    }
}
