use crate::Float;
use faer_core::{Mat, MatRef};

/// Column vector `[a, a + h, a + 2h, ...]` of length `size`.
pub fn linspace(a: Float, size: usize, h: Float) -> Mat<Float> {
    Mat::<Float>::from_fn(size, 1, |i, _| a + h * i as Float)
}

pub fn apply_func(m: MatRef<'_, Float>, f: impl Fn(Float) -> Float) -> Mat<Float> {
    Mat::from_fn(m.nrows(), m.ncols(), |i, j| f(m[(i, j)]))
}

/// Cyclic rotation of a column vector: `out[i] = u[(i - k) mod n]`.
///
/// A positive `k` moves values towards higher indices, wrapping the tail around to the front.
pub fn roll(u: MatRef<'_, Float>, k: isize) -> Mat<Float> {
    let n = u.nrows();
    Mat::from_fn(n, 1, |i, _| {
        let j = (i as isize - k).rem_euclid(n as isize) as usize;
        u[(j, 0)]
    })
}

/// `out[i] = u[i - 1]`, wrapping `out[0]` to the last element.
pub fn left(u: MatRef<'_, Float>) -> Mat<Float> {
    roll(u, 1)
}

/// `out[i] = u[i + 1]`, wrapping the last element to `u[0]`.
pub fn right(u: MatRef<'_, Float>) -> Mat<Float> {
    roll(u, -1)
}

/// Sum of a column vector, accumulated in index order.
pub fn sum(u: MatRef<'_, Float>) -> Float {
    (0..u.nrows()).fold(0.0, |acc, i| acc + u[(i, 0)])
}

pub fn to_vec(u: MatRef<'_, Float>) -> Vec<Float> {
    (0..u.nrows()).map(|i| u[(i, 0)]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[Float]) -> Mat<Float> {
        Mat::from_fn(values.len(), 1, |i, _| values[i])
    }

    #[test]
    fn neighbours_wrap_around() {
        let u = column(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(to_vec(left(u.as_ref()).as_ref()), vec![4.0, 1.0, 2.0, 3.0]);
        assert_eq!(to_vec(right(u.as_ref()).as_ref()), vec![2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn left_and_right_cancel() {
        for n in 1..8 {
            let u = Mat::from_fn(n, 1, |i, _| (i as Float).sin() + 0.5);
            let lr = right(left(u.as_ref()).as_ref());
            let rl = left(right(u.as_ref()).as_ref());
            assert_eq!(to_vec(lr.as_ref()), to_vec(u.as_ref()));
            assert_eq!(to_vec(rl.as_ref()), to_vec(u.as_ref()));
        }
    }

    #[test]
    fn single_point_is_fixed() {
        let u = column(&[7.5]);
        for k in -3..=3 {
            assert_eq!(to_vec(roll(u.as_ref(), k).as_ref()), vec![7.5]);
        }
    }

    #[test]
    fn roll_by_length_is_identity() {
        let u = column(&[0.0, 1.0, 2.0]);
        assert_eq!(to_vec(roll(u.as_ref(), 3).as_ref()), to_vec(u.as_ref()));
        assert_eq!(to_vec(roll(u.as_ref(), -6).as_ref()), to_vec(u.as_ref()));
        assert_eq!(to_vec(roll(u.as_ref(), 4).as_ref()), vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn linspace_and_sum() {
        let x = linspace(0.0, 4, 0.25);
        assert_eq!(to_vec(x.as_ref()), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(sum(x.as_ref()), 1.5);
        assert_eq!(to_vec(apply_func(x.as_ref(), |x| 2.0 * x).as_ref()), vec![0.0, 0.5, 1.0, 1.5]);
    }
}
