use faer_core::MatRef;

use crate::{faer_add::sum, Float};

/// Discrete integral `dx * sum(u)`.
pub fn mass(u: MatRef<'_, Float>, dx: Float) -> Float {
    dx * sum(u)
}

pub fn max_abs(u: MatRef<'_, Float>) -> Float {
    (0..u.nrows()).fold(0.0, |acc: Float, i| acc.max(u[(i, 0)].abs()))
}

/// `(m_end - m_0) / |m_0|` for a mass trace, or the absolute drift if the initial mass is zero.
pub fn relative_drift(mass: &[Float]) -> Float {
    match (mass.first(), mass.last()) {
        (Some(&m0), Some(&m1)) if m0 != 0.0 => (m1 - m0) / m0.abs(),
        (Some(&m0), Some(&m1)) => m1 - m0,
        _ => 0.0,
    }
}

/// Stride between animation frames, about 50 frames per run.
pub fn frame_stride(nt: usize) -> usize {
    (nt / 50).max(1)
}

pub fn frame_indices(nt: usize) -> impl Iterator<Item = usize> {
    (0..=nt).step_by(frame_stride(nt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer_core::Mat;

    #[test]
    fn mass_is_scaled_sum() {
        let u = Mat::from_fn(4, 1, |i, _| i as Float);
        assert_eq!(mass(u.as_ref(), 0.25), 1.5);
        assert_eq!(max_abs(u.as_ref()), 3.0);

        let v = Mat::from_fn(3, 1, |i, _| -(i as Float) * 2.0);
        assert_eq!(max_abs(v.as_ref()), 4.0);
    }

    #[test]
    fn drift() {
        assert!((relative_drift(&[2.0, 2.0, 2.1]) - 0.05).abs() < 1e-12);
        assert!((relative_drift(&[-2.0, -2.1]) + 0.05).abs() < 1e-12);
        assert_eq!(relative_drift(&[0.0, 0.5]), 0.5);
        assert_eq!(relative_drift(&[]), 0.0);
    }

    #[test]
    fn frames() {
        assert_eq!(frame_stride(0), 1);
        assert_eq!(frame_stride(125), 2);
        assert_eq!(frame_indices(3).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(frame_indices(125).count(), 63);
        assert_eq!(frame_indices(0).collect::<Vec<_>>(), vec![0]);
    }
}
