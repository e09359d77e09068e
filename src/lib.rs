pub mod benchmark;
pub mod configuration;
pub mod error;
pub mod simulation;

pub use error::SimError;

pub use simulation::constants::AdamsTables;
pub use simulation::forces::{NewtonianGravity, G, MIN_SEPARATION};
pub use simulation::history::{DerivativeSample, History};
pub use simulation::integrator::{factory, Integrator, Method};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;
pub use simulation::states::{Body, NVec3, Universe};

pub use configuration::config::{BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_methods};
