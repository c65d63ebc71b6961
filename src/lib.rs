pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod faer_add;
pub mod mesh;
pub mod method;
pub mod methods;
pub mod problem;
pub mod sim;

pub type Float = f64;

pub use config::{Config, ConfigError, RESOLUTIONS};
pub use driver::{Csff1Writer, Driver, Logger, ObsCtx, Observer, SimError, Solution};
pub use mesh::{Grid, Mesh};
pub use method::{Ctx, Method};
pub use methods::Scheme;
pub use problem::{InitialCondition, Shape};
pub use sim::{run_all, Simulation};
