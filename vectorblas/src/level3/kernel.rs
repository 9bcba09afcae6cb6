//! Micro-kernel: `C[block] += alpha * left_panel * right_panel`.
//!
//! Column tiles are walked outermost (cascade `4, 1`), row tiles inside them
//! (cascade `4W, 2W, W, 1`), and the reduction innermost. A `MV × NU` tile
//! keeps `MV * NU` vector accumulators live; per reduction step it loads `MV`
//! vectors of the left panel and broadcasts `NU` values of the right panel.
//! Single-row tiles fall back to scalar accumulators.

use vectorblas_core::blocking::GEMM_UNROLL_N;
use vectorblas_core::{Element, MatrixViewMut, SimdVector, TileCascade};

/// Accumulate the product of two packed panels into the `rows × cols` block
/// of `c` whose top-left element is `(row0, col0)`.
///
/// `left` holds `rows * depth` elements packed with the row cascade, `right`
/// holds `cols * depth` elements packed with the column cascade.
pub(crate) fn kernel<T: Element>(
    alpha: T,
    left: &[T],
    right: &[T],
    rows: usize,
    cols: usize,
    depth: usize,
    c: &mut MatrixViewMut<'_, T>,
    row0: usize,
    col0: usize,
) {
    let row_cascade = T::row_cascade();
    let ldc = c.ld();
    for col_tile in TileCascade::cols().tiles(cols) {
        let b = &right[col_tile.start * depth..(col_tile.start + col_tile.width) * depth];
        for row_tile in row_cascade.tiles(rows) {
            let a = &left[row_tile.start * depth..(row_tile.start + row_tile.width) * depth];
            let base = c.index(row0 + row_tile.start, col0 + col_tile.start);
            let cdata = c.data_mut();
            let vectors = row_tile.width / T::LANES;
            match (vectors, col_tile.width) {
                (4, GEMM_UNROLL_N) => tile::<T, 4, GEMM_UNROLL_N>(alpha, a, b, cdata, base, ldc),
                (4, _) => tile::<T, 4, 1>(alpha, a, b, cdata, base, ldc),
                (2, GEMM_UNROLL_N) => tile::<T, 2, GEMM_UNROLL_N>(alpha, a, b, cdata, base, ldc),
                (2, _) => tile::<T, 2, 1>(alpha, a, b, cdata, base, ldc),
                (1, GEMM_UNROLL_N) => tile::<T, 1, GEMM_UNROLL_N>(alpha, a, b, cdata, base, ldc),
                (1, _) => tile::<T, 1, 1>(alpha, a, b, cdata, base, ldc),
                (_, GEMM_UNROLL_N) => tile_scalar::<T, GEMM_UNROLL_N>(alpha, a, b, cdata, base, ldc),
                (_, _) => tile_scalar::<T, 1>(alpha, a, b, cdata, base, ldc),
            }
        }
    }
}

/// `MV` vectors of rows by `NU` columns.
#[inline(always)]
fn tile<T: Element, const MV: usize, const NU: usize>(
    alpha: T,
    a: &[T],
    b: &[T],
    c: &mut [T],
    base: usize,
    ldc: usize,
) {
    let lanes = T::LANES;
    let mut acc = [[T::Vector::zero(); MV]; NU];

    for (a_k, b_k) in a.chunks_exact(MV * lanes).zip(b.chunks_exact(NU)) {
        let mut av = [T::Vector::zero(); MV];
        for (v, slot) in av.iter_mut().enumerate() {
            *slot = T::Vector::load(&a_k[v * lanes..]);
        }
        for (col, &b_val) in acc.iter_mut().zip(b_k) {
            let bv = T::Vector::broadcast(b_val);
            for (acc_v, &a_v) in col.iter_mut().zip(&av) {
                *acc_v = a_v.fma(bv, *acc_v);
            }
        }
    }

    let alpha_v = T::Vector::broadcast(alpha);
    for (j, col) in acc.iter().enumerate() {
        for (v, &acc_v) in col.iter().enumerate() {
            let at = base + j * ldc + v * lanes;
            let dst = &mut c[at..at + lanes];
            alpha_v.fma(acc_v, T::Vector::load(dst)).store(dst);
        }
    }
}

/// One row by `NU` columns.
#[inline(always)]
fn tile_scalar<T: Element, const NU: usize>(
    alpha: T,
    a: &[T],
    b: &[T],
    c: &mut [T],
    base: usize,
    ldc: usize,
) {
    let mut acc = [T::ZERO; NU];
    for (&a_val, b_k) in a.iter().zip(b.chunks_exact(NU)) {
        for (acc_j, &b_val) in acc.iter_mut().zip(b_k) {
            *acc_j = *acc_j + a_val * b_val;
        }
    }
    for (j, &acc_j) in acc.iter().enumerate() {
        let at = base + j * ldc;
        c[at] = c[at] + alpha * acc_j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level3::pack::PackSource;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use vectorblas_core::{MatrixView, Transpose};

    /// Pack both operands whole and run the kernel once over them.
    fn run_kernel<T: Element>(alpha: T, a: &MatrixView<'_, T>, b: &MatrixView<'_, T>, c: &mut [T], ldc: usize) {
        let (m, k, n) = (a.rows(), a.cols(), b.cols());
        let mut left = vec![T::ZERO; m * k];
        let mut right = vec![T::ZERO; k * n];
        a.pack_left(0, m, 0, k, &mut left);
        b.pack_right(0, k, 0, n, &mut right);
        let mut cv = MatrixViewMut::new(c, 0, m, n, ldc);
        kernel(alpha, &left, &right, m, n, k, &mut cv, 0, 0);
    }

    #[test]
    fn test_kernel_small_exact() {
        // A = [[1,2,3],[4,5,6]], B = [[7,8],[9,10],[11,12]]
        let a = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let b = [7.0f64, 9.0, 11.0, 8.0, 10.0, 12.0];
        let av = MatrixView::new(&a, 0, 2, 3, 2, Transpose::NoTrans);
        let bv = MatrixView::new(&b, 0, 3, 2, 3, Transpose::NoTrans);
        let mut c = vec![1.0f64; 4];
        run_kernel(2.0, &av, &bv, &mut c, 2);
        assert_eq!(c, vec![117.0, 279.0, 129.0, 309.0]);
    }

    #[test]
    fn test_kernel_covers_every_tile_shape() {
        // m = 32 + 16 + 8 + 3 hits every f32 row tile; n = 4 + 3 hits both
        // column tiles. Integer-valued data keeps the sums exact.
        let (m, n, k) = (59usize, 7usize, 5usize);
        let mut rng = StdRng::seed_from_u64(42);
        let a: Vec<f32> = (0..m * k).map(|_| rng.gen_range(-4..=4) as f32).collect();
        let b: Vec<f32> = (0..k * n).map(|_| rng.gen_range(-4..=4) as f32).collect();
        let c0: Vec<f32> = (0..m * n).map(|_| rng.gen_range(-4..=4) as f32).collect();

        let av = MatrixView::new(&a, 0, m, k, m, Transpose::NoTrans);
        let bv = MatrixView::new(&b, 0, k, n, k, Transpose::NoTrans);
        let mut c = c0.clone();
        run_kernel(3.0, &av, &bv, &mut c, m);

        for j in 0..n {
            for i in 0..m {
                let dot: f32 = (0..k).map(|p| a[i + p * m] * b[p + j * k]).sum();
                assert_eq!(c[i + j * m], c0[i + j * m] + 3.0 * dot, "C[{i},{j}]");
            }
        }
    }

    #[test]
    fn test_kernel_writes_inside_block_only() {
        // 9x5 block at (2, 1) of a 12x7 C: everything else stays put.
        let (m, n, k, ldc) = (9usize, 5usize, 4usize, 12usize);
        let a = vec![1.0f64; m * k];
        let b = vec![1.0f64; k * n];
        let mut left = vec![0.0; m * k];
        let mut right = vec![0.0; k * n];
        MatrixView::new(&a, 0, m, k, m, Transpose::NoTrans).pack_left(0, m, 0, k, &mut left);
        MatrixView::new(&b, 0, k, n, k, Transpose::NoTrans).pack_right(0, k, 0, n, &mut right);

        let mut c = vec![0.0f64; ldc * 7];
        let mut cv = MatrixViewMut::new(&mut c, 0, 12, 7, ldc);
        kernel(1.0, &left, &right, m, n, k, &mut cv, 2, 1);
        for j in 0..7 {
            for i in 0..12 {
                let inside = (2..11).contains(&i) && (1..6).contains(&j);
                assert_eq!(c[i + j * ldc], if inside { 4.0 } else { 0.0 });
            }
        }
    }
}
