use std::{collections::BTreeMap, fmt};

use faer_core::{Mat, MatRef};

use crate::{
    config::{Config, ConfigError},
    driver::{Driver, Logger, SimError, Solution},
    mesh::Mesh,
    methods::Scheme,
    problem::InitialCondition,
    Float,
};

/// A validated configuration turned into a mesh and a sampled initial field.
///
/// The initial field is shared read-only by every scheme run; each run integrates its own copy.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) mesh: Mesh,
    pub(crate) ic: InitialCondition,
    pub(crate) u0: Mat<Float>,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mesh = Mesh::from_courant(
            config.length,
            config.velocity,
            config.t_max,
            config.nx,
            config.courant,
        )?;
        let ic = InitialCondition::new(config.shape, config.sigma, config.center());
        let u0 = ic.sample(&mesh.space);

        Ok(Self { mesh, ic, u0 })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn initial_condition(&self) -> &InitialCondition {
        &self.ic
    }

    pub fn initial_field(&self) -> MatRef<'_, Float> {
        self.u0.as_ref()
    }

    /// Grid positions `i·dx`, `i = 0..Nx`.
    pub fn points(&self) -> Mat<Float> {
        self.mesh.space.periodic_points()
    }

    pub fn run(&self, scheme: Scheme) -> Result<Solution, SimError> {
        Driver::new(self, scheme.method())
            .with_observer(Logger)
            .run()
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "advection of a {} (σ={}, x0={}) at v={}:\n\t- C = {}\n\t- Δx = {:e} ({} points)\n\t- Δt = {:e} ({} steps)",
            self.ic.shape,
            self.ic.sigma,
            self.ic.x0,
            self.mesh.velocity,
            self.mesh.courant,
            self.mesh.dx(),
            self.mesh.nx(),
            self.mesh.dt(),
            self.mesh.nt(),
        )
    }
}

/// Runs every enabled scheme of `config`, one after the other, from the same initial field.
///
/// The configuration is validated before any scheme runs.
pub fn run_all(config: &Config) -> Result<BTreeMap<Scheme, Solution>, SimError> {
    let sim = Simulation::new(config)?;
    tracing::info!("{sim}");

    config
        .schemes
        .iter()
        .map(|&scheme| -> Result<_, SimError> {
            let solution = sim.run(scheme)?;
            Ok((scheme, solution))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Shape;

    #[test]
    fn invalid_configuration_runs_nothing() {
        let config = Config::default().with_courant(-0.5);
        assert!(matches!(
            run_all(&config),
            Err(SimError::Config(ConfigError::NonPositive {
                name: "courant",
                ..
            }))
        ));
    }

    #[test]
    fn only_enabled_schemes_run() {
        let config = Config::default().with_schemes([Scheme::Upwind, Scheme::LaxWendroff]);
        let solutions = run_all(&config).unwrap();
        assert_eq!(
            solutions.keys().copied().collect::<Vec<_>>(),
            vec![Scheme::Upwind, Scheme::LaxWendroff]
        );

        let config = Config::default().with_schemes(std::iter::empty::<Scheme>());
        assert!(run_all(&config).unwrap().is_empty());
    }

    #[test]
    fn initial_field_matches_shape() {
        let config = Config::default()
            .with_resolution(4)
            .with_shape(Shape::Square, 0.3, 0.5);
        let sim = Simulation::new(&config).unwrap();
        assert_eq!(sim.initial_field().nrows(), 4);
        assert_eq!(sim.initial_field()[(0, 0)], 0.0);
        assert_eq!(sim.initial_field()[(2, 0)], 1.0);
        assert_eq!(sim.points()[(3, 0)], 0.75);
        assert!(sim.to_string().contains("Square Pulse"));
    }

    #[test]
    fn default_centre_scales_with_the_domain() {
        let sim = Simulation::new(&Config::default().with_length(8.0)).unwrap();
        assert_eq!(sim.initial_condition().x0, 2.0);
    }

    #[test]
    fn unstorable_runs_are_rejected_before_running() {
        let config = Config::default().with_velocity(1e300);
        assert_eq!(config.validate(), Ok(()));
        assert!(matches!(
            Simulation::new(&config),
            Err(ConfigError::TooManySteps { nx: 100, .. })
        ));
        assert!(matches!(
            run_all(&config),
            Err(SimError::Config(ConfigError::TooManySteps { .. }))
        ));
    }
}
