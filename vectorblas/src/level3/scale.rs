//! Beta pre-pass: `C := beta * C`.

use vectorblas_core::{Element, MatrixViewMut, SimdVector};

/// Scale every element of `c` by `beta` in place.
///
/// A zero beta (either sign) overwrites C with `+0.0` instead of
/// multiplying, so stale NaN / Inf in C are erased.
pub(crate) fn scale<T: Element>(beta: T, c: &mut MatrixViewMut<'_, T>) {
    if beta.is_zero() {
        for j in 0..c.cols() {
            c.column_mut(j).fill(T::ZERO);
        }
        return;
    }

    let beta_v = T::Vector::broadcast(beta);
    for j in 0..c.cols() {
        let column = c.column_mut(j);
        let mut chunks = column.chunks_exact_mut(T::LANES);
        for chunk in &mut chunks {
            T::Vector::load(chunk).mul(beta_v).store(chunk);
        }
        // Scalar tail
        for x in chunks.into_remainder() {
            *x = *x * beta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_multiplies_block_only() {
        // 11x2 block inside a 12-row buffer: exercises the vector body and
        // the scalar tail, and leaves the padding row alone.
        let mut data: Vec<f32> = (0..24).map(|i| i as f32).collect();
        let mut c = MatrixViewMut::new(&mut data, 0, 11, 2, 12);
        scale(2.0, &mut c);
        for j in 0..2 {
            for i in 0..12 {
                let orig = (i + j * 12) as f32;
                let expected = if i < 11 { orig * 2.0 } else { orig };
                assert_eq!(data[i + j * 12], expected);
            }
        }
    }

    #[test]
    fn test_scale_zero_erases_nan() {
        let mut data = vec![f64::NAN, f64::INFINITY, -3.0, f64::NAN, 7.0];
        let mut c = MatrixViewMut::new(&mut data, 1, 2, 2, 2);
        scale(-0.0, &mut c);
        assert!(data[0].is_nan());
        for x in &data[1..] {
            assert_eq!(*x, 0.0);
            assert!(x.is_sign_positive());
        }
    }

    #[test]
    fn test_scale_nan_beta_propagates() {
        let mut data = vec![1.0f64; 9];
        let mut c = MatrixViewMut::new(&mut data, 0, 9, 1, 9);
        scale(f64::NAN, &mut c);
        assert!(data.iter().all(|x| x.is_nan()));
    }
}
