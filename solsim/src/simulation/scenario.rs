//! Build initial body sets from the fixed preset table
//!
//! Every preset is a recipe producing a fresh `System`:
//! - "Solar System": a hand-placed ten-body table
//! - "Perihelion Planets": eight planets generated from (a, e)
//! - "Sun-Earth": the two-body closed-orbit check
//! - "Sun-Earth-Moon": a hierarchical system with a tight inner pair
//! - "Empty": no bodies
//!
//! Generated orbits start at perihelion on the +x axis with velocity along
//! +y. Satellites are placed relative to their parent and inherit the
//! parent's velocity. Every non-empty preset ends with `normalize_drift`.

use log::info;
use rand::Rng;

use crate::simulation::error::{SimError, SimResult};
use crate::simulation::params::{Parameters, AU};
use crate::simulation::states::{DisplayMeta, NVec2, System};

pub const SOLAR_SYSTEM: &str = "Solar System";
pub const PERIHELION_PLANETS: &str = "Perihelion Planets";
pub const SUN_EARTH: &str = "Sun-Earth";
pub const SUN_EARTH_MOON: &str = "Sun-Earth-Moon";
pub const EMPTY: &str = "Empty";

const SUN_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;
const MOON_MASS: f64 = 7.342e22;

type Recipe = fn(&Parameters) -> System;

const PRESETS: [(&str, Recipe); 5] = [
    (SOLAR_SYSTEM, solar_system),
    (PERIHELION_PLANETS, perihelion_planets),
    (SUN_EARTH, sun_earth),
    (SUN_EARTH_MOON, sun_earth_moon),
    (EMPTY, empty),
];

/// Preset names in table order
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}

/// Build the named preset. Fails with `UnknownPreset` for names outside the table.
pub fn build(name: &str, params: &Parameters) -> SimResult<System> {
    let (_, recipe) = PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .ok_or_else(|| SimError::UnknownPreset(name.to_string()))?;

    let mut sys = recipe(params);
    normalize_drift(&mut sys);
    info!("built preset `{}` with {} bodies", name, sys.len());
    Ok(sys)
}

/// Shift positions and velocities so the centre of mass sits at the origin
/// and total momentum is zero
pub fn normalize_drift(sys: &mut System) {
    if sys.total_mass() <= 0.0 {
        return;
    }
    let com = sys.center_of_mass();
    let vcom = sys.center_of_mass_velocity();
    for b in sys.bodies.iter_mut() {
        b.x -= com;
        b.v -= vcom;
    }
}

/// Orbit shape for a generated body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub a: f64, // semi-major axis (m)
    pub e: f64, // eccentricity, 0 <= e < 1
}

impl OrbitalElements {
    pub fn new(a: f64, e: f64) -> Self {
        Self { a, e }
    }

    pub fn perihelion_distance(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Vis-viva speed at perihelion around a dominant mass `central_mass`
    #[allow(non_snake_case)]
    pub fn perihelion_speed(&self, G: f64, central_mass: f64) -> f64 {
        (G * central_mass * (1.0 + self.e) / self.perihelion_distance()).sqrt()
    }

    /// Position and velocity relative to the central body, at perihelion
    #[allow(non_snake_case)]
    pub fn perihelion_state(&self, G: f64, central_mass: f64) -> (NVec2, NVec2) {
        (
            NVec2::new(self.perihelion_distance(), 0.0),
            NVec2::new(0.0, self.perihelion_speed(G, central_mass)),
        )
    }
}

/// Absolute state of a body orbiting a parent at (`parent_x`, `parent_v`)
#[allow(non_snake_case)]
pub fn satellite_state(
    G: f64,
    parent_x: NVec2,
    parent_v: NVec2,
    parent_mass: f64,
    elements: OrbitalElements,
) -> (NVec2, NVec2) {
    let (dx, dv) = elements.perihelion_state(G, parent_mass);
    (parent_x + dx, parent_v + dv)
}

struct PlacedBody {
    name: &'static str,
    mass: f64,
    x_au: [f64; 2],
    v: [f64; 2],
    radius: f64,
    color: [u8; 3],
}

const SOLAR_TABLE: [PlacedBody; 10] = [
    PlacedBody { name: "Sun", mass: SUN_MASS, x_au: [0.0, 0.0], v: [0.0, 0.0], radius: 30.0, color: [255, 255, 0] },
    PlacedBody { name: "Mercury", mass: 3.301e23, x_au: [0.467, 0.0], v: [0.0, 38860.0], radius: 4.0, color: [180, 180, 180] },
    PlacedBody { name: "Venus", mass: 4.867e24, x_au: [0.0, 0.723], v: [-35020.0, 0.0], radius: 6.0, color: [255, 200, 100] },
    PlacedBody { name: "Earth", mass: EARTH_MASS, x_au: [-1.017, 0.0], v: [0.0, -29290.0], radius: 7.0, color: [100, 100, 255] },
    PlacedBody { name: "Mars", mass: 6.417e23, x_au: [0.0, -1.666], v: [21970.0, 0.0], radius: 5.0, color: [255, 100, 100] },
    PlacedBody { name: "Jupiter", mass: 1.898e27, x_au: [5.455, 0.0], v: [0.0, 12440.0], radius: 15.0, color: [255, 165, 100] },
    PlacedBody { name: "Saturn", mass: 5.683e26, x_au: [0.0, -10.123], v: [9680.0, 0.0], radius: 13.0, color: [255, 215, 150] },
    PlacedBody { name: "Uranus", mass: 8.681e25, x_au: [-20.11, 0.0], v: [0.0, -6800.0], radius: 10.0, color: [170, 220, 255] },
    PlacedBody { name: "Neptune", mass: 1.024e26, x_au: [0.0, 30.33], v: [-5430.0, 0.0], radius: 10.0, color: [70, 130, 255] },
    PlacedBody { name: "Pluto", mass: 1.309e22, x_au: [29.66, 0.0], v: [0.0, 3710.0], radius: 2.0, color: [200, 180, 160] },
];

fn empty(_params: &Parameters) -> System {
    System::new()
}

fn solar_system(params: &Parameters) -> System {
    let mut sys = System::new();
    for row in SOLAR_TABLE.iter() {
        sys.insert(
            DisplayMeta::new(row.name, row.radius, row.color),
            row.mass,
            NVec2::new(row.x_au[0] * AU, row.x_au[1] * AU),
            NVec2::new(row.v[0], row.v[1]),
            params.max_trail_length,
        );
    }
    sys
}

struct OrbitingBody {
    name: &'static str,
    mass: f64,
    a_au: f64,
    e: f64,
    radius: f64,
    color: [u8; 3],
}

const PLANET_ELEMENTS: [OrbitingBody; 8] = [
    OrbitingBody { name: "Mercury", mass: 3.301e23, a_au: 0.387, e: 0.2056, radius: 4.0, color: [180, 180, 180] },
    OrbitingBody { name: "Venus", mass: 4.867e24, a_au: 0.723, e: 0.0068, radius: 6.0, color: [255, 200, 100] },
    OrbitingBody { name: "Earth", mass: EARTH_MASS, a_au: 1.0, e: 0.0167, radius: 7.0, color: [100, 100, 255] },
    OrbitingBody { name: "Mars", mass: 6.417e23, a_au: 1.524, e: 0.0934, radius: 5.0, color: [255, 100, 100] },
    OrbitingBody { name: "Jupiter", mass: 1.898e27, a_au: 5.203, e: 0.0489, radius: 15.0, color: [255, 165, 100] },
    OrbitingBody { name: "Saturn", mass: 5.683e26, a_au: 9.537, e: 0.0565, radius: 13.0, color: [255, 215, 150] },
    OrbitingBody { name: "Uranus", mass: 8.681e25, a_au: 19.19, e: 0.0457, radius: 10.0, color: [170, 220, 255] },
    OrbitingBody { name: "Neptune", mass: 1.024e26, a_au: 30.07, e: 0.0113, radius: 10.0, color: [70, 130, 255] },
];

fn perihelion_planets(params: &Parameters) -> System {
    let mut sys = System::new();
    let sun_x = NVec2::zeros();
    let sun_v = NVec2::zeros();
    sys.insert(DisplayMeta::new("Sun", 30.0, [255, 255, 0]), SUN_MASS, sun_x, sun_v, params.max_trail_length);

    for p in PLANET_ELEMENTS.iter() {
        let elements = OrbitalElements::new(p.a_au * AU, p.e);
        let (x, v) = satellite_state(params.G, sun_x, sun_v, SUN_MASS, elements);
        sys.insert(DisplayMeta::new(p.name, p.radius, p.color), p.mass, x, v, params.max_trail_length);
    }
    sys
}

fn sun_earth(params: &Parameters) -> System {
    let mut sys = System::new();
    sys.insert(
        DisplayMeta::new("Sun", 30.0, [255, 255, 0]),
        SUN_MASS,
        NVec2::zeros(),
        NVec2::zeros(),
        params.max_trail_length,
    );
    sys.insert(
        DisplayMeta::new("Earth", 7.0, [100, 100, 255]),
        EARTH_MASS,
        NVec2::new(AU, 0.0),
        NVec2::new(0.0, 29780.0),
        params.max_trail_length,
    );
    sys
}

fn sun_earth_moon(params: &Parameters) -> System {
    let mut sys = System::new();
    let sun_x = NVec2::zeros();
    let sun_v = NVec2::zeros();
    sys.insert(DisplayMeta::new("Sun", 30.0, [255, 255, 0]), SUN_MASS, sun_x, sun_v, params.max_trail_length);

    let (earth_x, earth_v) = satellite_state(params.G, sun_x, sun_v, SUN_MASS, OrbitalElements::new(AU, 0.0167));
    sys.insert(DisplayMeta::new("Earth", 7.0, [100, 100, 255]), EARTH_MASS, earth_x, earth_v, params.max_trail_length);

    let (moon_x, moon_v) = satellite_state(params.G, earth_x, earth_v, EARTH_MASS, OrbitalElements::new(3.844e8, 0.0549));
    sys.insert(DisplayMeta::new("Moon", 3.0, [200, 200, 200]), MOON_MASS, moon_x, moon_v, params.max_trail_length);
    sys
}

const RANDOM_COLORS: [[u8; 3]; 6] = [
    [255, 100, 100],
    [100, 255, 100],
    [100, 100, 255],
    [255, 255, 100],
    [255, 100, 255],
    [100, 255, 255],
];

/// Parameters for a randomly generated body
#[derive(Debug, Clone, PartialEq)]
pub struct RandomBody {
    pub meta: DisplayMeta,
    pub mass: f64,
    pub position: NVec2,
    pub velocity: NVec2,
}

/// Draw a body somewhere within 2 AU of the origin.
/// `ordinal` numbers the generated name ("Body{ordinal}").
pub fn random_body<R: Rng>(rng: &mut R, ordinal: usize) -> RandomBody {
    let mass: f64 = rng.gen_range(1.0e22..1.0e25);
    let position = NVec2::new(rng.gen_range(-2.0 * AU..2.0 * AU), rng.gen_range(-2.0 * AU..2.0 * AU));
    let velocity = NVec2::new(rng.gen_range(-10_000.0..10_000.0), rng.gen_range(-10_000.0..10_000.0));
    let color = RANDOM_COLORS[rng.gen_range(0..RANDOM_COLORS.len())];
    let radius = (mass / 1.0e24).floor().clamp(4.0, 12.0);

    RandomBody {
        meta: DisplayMeta::new(format!("Body{}", ordinal), radius, color),
        mass,
        position,
        velocity,
    }
}
