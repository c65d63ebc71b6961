use core::fmt;
use std::f64::consts::PI;

use faer_core::Mat;

use crate::{mesh::Grid, Float};

/// Closed-form profiles available as initial conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    #[default]
    Bell,
    Square,
    Triangle,
    CosineHat,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Bell, Shape::Square, Shape::Triangle, Shape::CosineHat];
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Bell => "Gaussian Bell",
            Shape::Square => "Square Pulse",
            Shape::Triangle => "Triangle Wave",
            Shape::CosineHat => "Cosine Hat",
        })
    }
}

/// A profile of width `sigma` centred on `x0`.
///
/// The centre is not wrapped across the periodic boundary: a pulse centred close to `0` or `L`
/// is cut on one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialCondition {
    pub shape: Shape,
    pub sigma: Float,
    pub x0: Float,
}

impl InitialCondition {
    pub fn new(shape: Shape, sigma: Float, x0: Float) -> Self {
        Self { shape, sigma, x0 }
    }

    pub fn eval(&self, x: Float) -> Float {
        let r = (x - self.x0).abs();
        let inside = r < self.sigma;
        match self.shape {
            Shape::Bell => (-0.5 * ((x - self.x0) / self.sigma).powi(2)).exp(),
            Shape::Square if inside => 1.0,
            Shape::Triangle if inside => 1.0 - r / self.sigma,
            Shape::CosineHat if inside => (PI * r / (2.0 * self.sigma)).cos().powi(2),
            _ => 0.0,
        }
    }

    /// Samples the profile on the periodic nodes of `grid`.
    pub fn sample(&self, grid: &Grid) -> Mat<Float> {
        let x = grid.periodic_points();
        Mat::from_fn(x.nrows(), 1, |i, _| self.eval(x[(i, 0)]))
    }
}
