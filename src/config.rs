use std::collections::BTreeSet;

use thiserror::Error;

use crate::{methods::Scheme, problem::Shape, Float};

/// Spatial resolutions offered by interactive front ends.
pub const RESOLUTIONS: [usize; 5] = [50, 100, 200, 400, 800];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{name}` must be strictly positive (got {value})")]
    NonPositive { name: &'static str, value: Float },
    #[error("`{name}` must be finite (got {value})")]
    NonFinite { name: &'static str, value: Float },
    #[error("spatial resolution must be at least one point")]
    EmptyGrid,
    #[error("{steps} time steps of {nx} points cannot be stored")]
    TooManySteps { steps: Float, nx: usize },
}

/// Every input of a comparison run.
///
/// A `Config` is a plain value: changing a parameter means building a new one and running the
/// whole batch again.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// domain length `L`
    pub length: Float,
    /// advection speed `v`
    pub velocity: Float,
    /// simulated time `T_max`
    pub t_max: Float,
    /// number of grid points `Nx`
    pub nx: usize,
    /// target Courant number `C = v dt / dx`
    pub courant: Float,
    pub shape: Shape,
    pub sigma: Float,
    /// pulse centre; `None` places it at `L/4`
    pub x0: Option<Float>,
    pub schemes: BTreeSet<Scheme>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length: 1.0,
            velocity: 1.0,
            t_max: 1.0,
            nx: 100,
            courant: 0.8,
            shape: Shape::Bell,
            sigma: 0.05,
            x0: None,
            schemes: Scheme::ALL.into_iter().collect(),
        }
    }
}

impl Config {
    pub fn with_length(mut self, length: Float) -> Self {
        self.length = length;
        self
    }

    pub fn with_velocity(mut self, velocity: Float) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_t_max(mut self, t_max: Float) -> Self {
        self.t_max = t_max;
        self
    }

    pub fn with_resolution(mut self, nx: usize) -> Self {
        self.nx = nx;
        self
    }

    pub fn with_courant(mut self, courant: Float) -> Self {
        self.courant = courant;
        self
    }

    pub fn with_shape(mut self, shape: Shape, sigma: Float, x0: Float) -> Self {
        self.shape = shape;
        self.sigma = sigma;
        self.x0 = Some(x0);
        self
    }

    /// Pulse centre, `L/4` unless set explicitly.
    pub fn center(&self) -> Float {
        self.x0.unwrap_or(self.length / 4.0)
    }

    pub fn with_schemes(mut self, schemes: impl IntoIterator<Item = Scheme>) -> Self {
        self.schemes = schemes.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("length", self.length),
            ("velocity", self.velocity),
            ("t_max", self.t_max),
            ("courant", self.courant),
            ("sigma", self.sigma),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let x0 = self.center();
        if !x0.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "x0",
                value: x0,
            });
        }

        if self.nx == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        Ok(())
    }
}
