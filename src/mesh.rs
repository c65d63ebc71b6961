use crate::{config::ConfigError, faer_add::linspace, Float};
use faer_core::Mat;

// grid[0] <-> lower
// grid[i] <-> lower + i * delta forall i
// grid[steps] <-> upper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub(crate) lower: Float,
    pub(crate) upper: Float,
    pub(crate) delta: Float,
    pub(crate) steps: usize,
}

impl Grid {
    pub fn from_steps(lower: Float, upper: Float, steps: usize) -> Self {
        let delta = if steps == 0 {
            0.0
        } else {
            (upper - lower) / steps as Float
        };
        Self {
            lower,
            upper,
            delta,
            steps,
        }
    }

    pub fn lower(&self) -> Float {
        self.lower
    }

    pub fn upper(&self) -> Float {
        self.upper
    }

    pub fn delta(&self) -> Float {
        self.delta
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The `steps + 1` nodes of the closed interval `[lower, upper]`.
    pub fn iter(self) -> impl Iterator<Item = Float> {
        (0..(self.steps + 1)).map(move |i| self.lower + self.delta * i as Float)
    }

    /// The `steps` nodes of the half-open interval `[lower, upper)`; `upper` is identified with
    /// `lower`.
    pub fn iter_periodic(self) -> impl Iterator<Item = Float> {
        self.iter().take(self.steps)
    }

    pub fn periodic_points(&self) -> Mat<Float> {
        linspace(self.lower, self.steps, self.delta)
    }
}

/// Space-time discretisation of the periodic advection problem.
///
/// `space` is periodic over `[0, L)` with `Nx` points; `time` spans `[0, T_max]` with `Nt`
/// steps and is only used to label snapshots. The integrators advance with `courant`, the
/// actual time step being `dt = C·dx/v`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) time: Grid,
    pub(crate) space: Grid,
    pub(crate) velocity: Float,
    pub(crate) courant: Float,
    pub(crate) dt: Float,
}

impl Mesh {
    // Given a Courant number `courant`, pick `dt` such that
    // `velocity * dt / dx == courant`, then fit as many steps as
    // round to `t_max`. The whole history, `nx * (nt + 1)` values,
    // must stay addressable.
    pub fn from_courant(
        length: Float,
        velocity: Float,
        t_max: Float,
        nx: usize,
        courant: Float,
    ) -> Result<Self, ConfigError> {
        let space = Grid::from_steps(0.0, length, nx);
        let dt = courant * space.delta / velocity;

        let steps = (t_max / dt).round_ties_even();
        if !steps.is_finite() || steps >= usize::MAX as Float {
            return Err(ConfigError::TooManySteps { steps, nx });
        }
        let nt = steps as usize;
        if nt
            .checked_add(1)
            .and_then(|levels| levels.checked_mul(nx))
            .is_none()
        {
            return Err(ConfigError::TooManySteps { steps, nx });
        }

        Ok(Self {
            time: Grid::from_steps(0.0, t_max, nt),
            space,
            velocity,
            courant,
            dt,
        })
    }

    pub fn time(&self) -> Grid {
        self.time
    }

    pub fn space(&self) -> Grid {
        self.space
    }

    pub fn dx(&self) -> Float {
        self.space.delta
    }

    pub fn dt(&self) -> Float {
        self.dt
    }

    pub fn velocity(&self) -> Float {
        self.velocity
    }

    pub fn courant(&self) -> Float {
        self.courant
    }

    pub fn nx(&self) -> usize {
        self.space.steps
    }

    pub fn nt(&self) -> usize {
        self.time.steps
    }

    /// Snapshot times `t_k = k·T_max/Nt`, `k = 0..=Nt`.
    pub fn time_axis(&self) -> Vec<Float> {
        self.time.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_grid_excludes_upper_bound() {
        let grid = Grid::from_steps(0.0, 1.0, 4);
        let points: Vec<_> = grid.iter_periodic().collect();
        assert_eq!(points, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(grid.iter().count(), 5);
        assert_eq!(grid.periodic_points().nrows(), 4);
    }

    #[test]
    fn derived_parameters() {
        let mesh = Mesh::from_courant(1.0, 1.0, 1.0, 100, 0.8).unwrap();
        assert!((mesh.dx() - 0.01).abs() < 1e-15);
        assert!((mesh.dt() - 0.008).abs() < 1e-15);
        assert_eq!(mesh.nt(), 125);
        assert_eq!(mesh.nx(), 100);

        let axis = mesh.time_axis();
        assert_eq!(axis.len(), 126);
        assert_eq!(axis[0], 0.0);
        assert!((axis[125] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rounds_to_nearest_step_count() {
        // T_max / dt = 2.4 and 2.6
        assert_eq!(Mesh::from_courant(1.0, 1.0, 0.024, 100, 1.0).unwrap().nt(), 2);
        assert_eq!(Mesh::from_courant(1.0, 1.0, 0.026, 100, 1.0).unwrap().nt(), 3);
    }

    #[test]
    fn short_runs_have_no_steps() {
        let mesh = Mesh::from_courant(1.0, 1.0, 0.001, 100, 0.8).unwrap();
        assert_eq!(mesh.nt(), 0);
        assert_eq!(mesh.time_axis(), vec![0.0]);
    }

    #[test]
    fn rejects_unaddressable_histories() {
        // dt underflows to zero
        assert!(matches!(
            Mesh::from_courant(1.0, 1e300, 1.0, 100, 0.8),
            Err(ConfigError::TooManySteps { nx: 100, .. })
        ));
        // nt fits, nx * (nt + 1) does not
        assert!(matches!(
            Mesh::from_courant(1.0, 1.0, 1e6, 1 << 24, 1.0),
            Err(ConfigError::TooManySteps { .. })
        ));
    }
}
