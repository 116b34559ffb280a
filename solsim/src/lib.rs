pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, BodyId, BodySnapshot, DisplayMeta, NVec2, System, Trail};
pub use simulation::params::{Parameters, SubstepPolicy, AU, DAY, G_SI};
pub use simulation::error::{SimError, SimResult};
pub use simulation::forces::{ForceSet, ForceTerm, SoftenedGravity};
pub use simulation::integrator::{advance, kick_drift_kick, semi_implicit_euler};
pub use simulation::collisions::{resolve, CollisionEvent};
pub use simulation::scenario::{build, normalize_drift, preset_names, OrbitalElements};
pub use simulation::engine::{has_tight_pair, Engine};

pub use configuration::config::{
    load_scenario, parse_scenario, BodyConfig, ConfigError, EngineConfig, IntegratorConfig, ParametersConfig,
    ScenarioConfig, Tuning,
};

pub use benchmark::benchmark::{bench_frame_curve, bench_frames};
