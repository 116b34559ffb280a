//! High-level runtime engine
//!
//! `Engine` owns the body set, the numerical parameters and the active force
//! set. Renderers and editors drive it from their own loop:
//! - `advance_frame` once per tick (collisions first, then integration)
//! - `bodies` for a detached snapshot to draw
//! - `add_body`, `remove_body`, `set_*`, `rename` between frames
//!
//! Every mutation either succeeds completely or leaves the state untouched.

use log::{debug, info, warn};
use rand::Rng;

use crate::configuration::config::{BodyConfig, ConfigError, ScenarioConfig};
use crate::simulation::collisions::{self, CollisionEvent};
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::forces::{ForceSet, SoftenedGravity};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::{self, EMPTY};
use crate::simulation::states::{BodyId, BodySnapshot, DisplayMeta, NVec2, System};

pub struct Engine {
    parameters: Parameters,
    system: System,
    forces: ForceSet,
    substeps: u32, // active count, refreshed when the body set changes
    preset: String,
    extra_bodies: Vec<BodyConfig>, // scenario bodies that `reset` adds back after the preset
    frame_count: u64,
}

impl Engine {
    /// Build the named preset with the default (fine) parameters
    pub fn create(preset: &str) -> SimResult<Self> {
        Self::with_parameters(preset, Parameters::default())
    }

    pub fn with_parameters(preset: &str, parameters: Parameters) -> SimResult<Self> {
        let system = scenario::build(preset, &parameters)?;
        Ok(Self::from_system(system, parameters, preset))
    }

    /// Wrap an already assembled system. `preset` is what `reset` rebuilds.
    pub fn from_system(system: System, parameters: Parameters, preset: &str) -> Self {
        let forces = ForceSet::new().with(SoftenedGravity {
            G: parameters.G,
            softening: parameters.softening,
        });

        let mut engine = Self {
            parameters,
            system,
            forces,
            substeps: 1,
            preset: preset.to_string(),
            extra_bodies: Vec::new(),
            frame_count: 0,
        };
        engine.refresh_substeps();
        engine
    }

    /// Build from a scenario file: the preset (if any), then the listed bodies.
    /// `reset` rebuilds both until another preset is loaded or the engine is cleared.
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let parameters = cfg.parameters()?;
        let preset = cfg.preset.as_deref().unwrap_or(EMPTY);
        let mut engine = Self::with_parameters(preset, parameters)?;

        for bc in &cfg.bodies {
            engine.add_config_body(bc)?;
        }
        engine.extra_bodies = cfg.bodies.clone();
        Ok(engine)
    }

    // frame loop ==============================================================

    /// Advance one physics frame of `frame_dt * time_scale` simulated seconds.
    ///
    /// Collisions are resolved first; the returned events name every body
    /// removed during this call. An empty system is left alone.
    pub fn advance_frame(&mut self, frame_dt: f64, time_scale: f64) -> SimResult<Vec<CollisionEvent>> {
        let dt = frame_dt * time_scale;
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SimError::InvalidTimeStep(dt));
        }
        if self.system.is_empty() {
            return Ok(Vec::new());
        }

        let events = collisions::resolve(&mut self.system, self.parameters.collision_scale);
        if !events.is_empty() {
            self.refresh_substeps();
        }

        integrator::advance(&mut self.system, &self.forces, self.parameters.integrator, dt, self.substeps);
        self.frame_count += 1;

        debug_assert!(
            self.system.is_finite(),
            "non-finite body state after frame {}",
            self.frame_count
        );
        Ok(events)
    }

    /// One baseline tick (`Parameters::time_step`) scaled by `time_scale`
    pub fn step(&mut self, time_scale: f64) -> SimResult<Vec<CollisionEvent>> {
        self.advance_frame(self.parameters.time_step, time_scale)
    }

    // reads ===================================================================

    pub fn bodies(&self) -> Vec<BodySnapshot> {
        self.system.bodies.iter().map(|b| b.snapshot()).collect()
    }

    pub fn body(&self, id: BodyId) -> SimResult<BodySnapshot> {
        self.system.get(id).map(|b| b.snapshot()).ok_or(SimError::NotFound(id))
    }

    pub fn ids(&self) -> Vec<BodyId> {
        self.system.bodies.iter().map(|b| b.id).collect()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.system.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.system.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty()
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn center_of_mass(&self) -> NVec2 {
        self.system.center_of_mass()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.system.total_momentum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.system.kinetic_energy()
    }

    pub fn potential_energy(&self) -> f64 {
        self.system.potential_energy(self.parameters.G, self.parameters.softening)
    }

    pub fn total_energy(&self) -> f64 {
        self.system.total_energy(self.parameters.G, self.parameters.softening)
    }

    /// Substeps the next frame will use
    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    pub fn current_preset(&self) -> &str {
        &self.preset
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated seconds since the last build or reset
    pub fn elapsed(&self) -> f64 {
        self.system.t
    }

    // mutations ===============================================================

    pub fn add_body(&mut self, mass: f64, position: NVec2, velocity: NVec2, meta: DisplayMeta) -> SimResult<BodyId> {
        check_mass(mass)?;
        check_vector(position)?;
        check_vector(velocity)?;
        check_radius(meta.radius)?;

        let name = meta.name.clone();
        let id = self.system.insert(meta, mass, position, velocity, self.parameters.max_trail_length);
        info!("added body {} ({})", name, id);
        self.refresh_substeps();
        Ok(id)
    }

    /// Add a random body within 2 AU of the origin
    pub fn add_random_body<R: Rng>(&mut self, rng: &mut R) -> BodyId {
        let b = scenario::random_body(rng, self.system.len() + 1);
        let name = b.meta.name.clone();
        let id = self.system.insert(b.meta, b.mass, b.position, b.velocity, self.parameters.max_trail_length);
        info!("added random body {} ({}), mass {:.3e} kg", name, id, b.mass);
        self.refresh_substeps();
        id
    }

    pub fn remove_body(&mut self, id: BodyId) -> SimResult<()> {
        let removed = self.system.remove(id).ok_or(SimError::NotFound(id))?;
        info!("removed body {} ({})", removed.name, id);
        self.refresh_substeps();
        Ok(())
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: NVec2) -> SimResult<()> {
        check_vector(velocity)?;
        let body = self.system.get_mut(id).ok_or(SimError::NotFound(id))?;
        body.v = velocity;
        Ok(())
    }

    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> SimResult<()> {
        let body = self.system.get_mut(id).ok_or(SimError::NotFound(id))?;
        check_mass(mass)?;
        body.m = mass;
        Ok(())
    }

    /// Teleport a body. Its trail is dropped so the old path does not
    /// connect across the jump.
    pub fn set_position(&mut self, id: BodyId, position: NVec2) -> SimResult<()> {
        check_vector(position)?;
        let body = self.system.get_mut(id).ok_or(SimError::NotFound(id))?;
        if body.x != position {
            body.trail.clear();
        }
        body.x = position;
        Ok(())
    }

    pub fn rename(&mut self, id: BodyId, name: impl Into<String>) -> SimResult<()> {
        let body = self.system.get_mut(id).ok_or(SimError::NotFound(id))?;
        body.name = name.into();
        Ok(())
    }

    /// Remove every body. The current preset becomes "Empty".
    pub fn clear(&mut self) {
        info!("cleared {} bodies", self.system.len());
        self.system.clear();
        self.preset = EMPTY.to_string();
        self.extra_bodies.clear();
        self.refresh_substeps();
    }

    /// Rebuild the current preset, plus the scenario bodies when the engine
    /// came from `from_config`. Rebuilt bodies get fresh ids.
    pub fn reset(&mut self) -> SimResult<()> {
        let preset = self.preset.clone();
        let extra = self.extra_bodies.clone();
        self.rebuild(&preset)?;
        for bc in &extra {
            self.add_config_body(bc)?;
        }
        if !extra.is_empty() {
            info!("reset `{}` with {} scenario bodies", preset, extra.len());
        }
        Ok(())
    }

    /// Replace the body set with a freshly built preset. Scenario bodies
    /// from `from_config` are dropped.
    /// An unknown name leaves the engine unchanged.
    pub fn load_preset(&mut self, preset: &str) -> SimResult<()> {
        self.rebuild(preset)?;
        self.extra_bodies.clear();
        Ok(())
    }

    fn add_config_body(&mut self, bc: &BodyConfig) -> SimResult<BodyId> {
        let meta = DisplayMeta::new(bc.name.clone(), bc.radius, bc.color);
        self.add_body(bc.m, NVec2::new(bc.x[0], bc.x[1]), NVec2::new(bc.v[0], bc.v[1]), meta)
    }

    fn rebuild(&mut self, preset: &str) -> SimResult<()> {
        let fresh = scenario::build(preset, &self.parameters)?;
        self.system.clear();
        self.system.absorb(fresh, self.parameters.max_trail_length);
        self.system.t = 0.0;
        self.frame_count = 0;
        self.preset = preset.to_string();
        self.refresh_substeps();
        Ok(())
    }

    fn refresh_substeps(&mut self) {
        let tight = has_tight_pair(&self.system, &self.parameters);
        let substeps = self.parameters.substeps.select(tight);
        if substeps != self.substeps {
            debug!("substeps {} -> {} (tight pair: {})", self.substeps, substeps, tight);
        }
        self.substeps = substeps.max(1);
    }
}

/// Whether any pair is both gravitationally bound and closer than
/// `tight_pair_distance`
pub fn has_tight_pair(sys: &System, params: &Parameters) -> bool {
    let n = sys.bodies.len();
    for i in 0..n {
        let bi = &sys.bodies[i];
        for j in (i + 1)..n {
            let bj = &sys.bodies[j];
            let r = bi.distance_to(bj);
            if r == 0.0 || r >= params.tight_pair_distance {
                continue;
            }
            let v_rel = (bj.v - bi.v).norm_squared();
            let specific_energy = 0.5 * v_rel - params.G * (bi.m + bj.m) / r;
            if specific_energy < 0.0 {
                return true;
            }
        }
    }
    false
}

fn check_mass(mass: f64) -> SimResult<()> {
    if mass > 0.0 && mass.is_finite() {
        Ok(())
    } else {
        warn!("rejected mass {}", mass);
        Err(SimError::InvalidMass(mass))
    }
}

// radius feeds the collision threshold
fn check_radius(radius: f64) -> SimResult<()> {
    if radius >= 0.0 && radius.is_finite() {
        Ok(())
    } else {
        warn!("rejected radius {}", radius);
        Err(SimError::InvalidRadius(radius))
    }
}

fn check_vector(v: NVec2) -> SimResult<()> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SimError::InvalidVector)
    }
}
