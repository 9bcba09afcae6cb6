//! CBLAS-style entry points with a leading [`Layout`] argument.
//!
//! The engine is column-major. A row-major matrix is the column-major
//! storage of its transpose, so a row-major call is rewritten as
//! `Ct = op(B)t * op(A)t` (GEMM) or as the mirrored side and triangle
//! (SYMM) and forwarded unchanged otherwise. Argument errors are reported
//! with CBLAS positions, where `layout` is parameter 1.

use vectorblas_core::{Element, Error, Layout, Result, Side, Transpose, Uplo};

use crate::level3;

/// Renumber an argument error raised by the column-major engine.
fn renumber(err: Error, position: fn(usize) -> usize, swap_operands: bool) -> Error {
    match err {
        Error::IllegalArgument { routine, position: p } => Error::IllegalArgument {
            routine,
            position: position(p),
        },
        Error::OutOfBounds { array, index, len } if swap_operands => Error::OutOfBounds {
            array: match array {
                "a" => "b",
                "b" => "a",
                other => other,
            },
            index,
            len,
        },
        other => other,
    }
}

fn col_major_position(p: usize) -> usize {
    p + 1
}

/// Engine call is `gemm(trans_b, trans_a, n, m, k, b, ldb, a, lda, c, ldc)`.
fn gemm_row_major_position(p: usize) -> usize {
    match p {
        1 => 3,
        2 => 2,
        3 => 5,
        4 => 4,
        5 => 6,
        8 => 11,
        10 => 9,
        13 => 14,
        other => other + 1,
    }
}

/// Engine call is `symm(side', uplo', n, m, a, lda, b, ldb, c, ldc)`.
fn symm_row_major_position(p: usize) -> usize {
    match p {
        1 => 2,
        2 => 3,
        3 => 5,
        4 => 4,
        7 => 8,
        9 => 10,
        12 => 13,
        other => other + 1,
    }
}

/// `C := alpha * op(A) * op(B) + beta * C` for either layout.
pub fn gemm<T: Element>(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
) -> Result<()> {
    match layout {
        Layout::ColMajor => level3::gemm(
            trans_a, trans_b, m, n, k, alpha, a, 0, lda, b, 0, ldb, beta, c, 0, ldc,
        )
        .map_err(|e| renumber(e, col_major_position, false)),
        Layout::RowMajor => level3::gemm(
            trans_b, trans_a, n, m, k, alpha, b, 0, ldb, a, 0, lda, beta, c, 0, ldc,
        )
        .map_err(|e| renumber(e, gemm_row_major_position, true)),
    }
}

/// `C := alpha * A * B + beta * C` (Left) or `C := alpha * B * A + beta * C`
/// (Right) with symmetric `A`, for either layout.
pub fn symm<T: Element>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
) -> Result<()> {
    match layout {
        Layout::ColMajor => level3::symm(
            side, uplo, m, n, alpha, a, 0, lda, b, 0, ldb, beta, c, 0, ldc,
        )
        .map_err(|e| renumber(e, col_major_position, false)),
        Layout::RowMajor => level3::symm(
            side.flip(),
            uplo.flip(),
            n,
            m,
            alpha,
            a,
            0,
            lda,
            b,
            0,
            ldb,
            beta,
            c,
            0,
            ldc,
        )
        .map_err(|e| renumber(e, symm_row_major_position, false)),
    }
}

/// Single-precision [`gemm`].
pub fn sgemm(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f32,
    a: &[f32],
    lda: usize,
    b: &[f32],
    ldb: usize,
    beta: f32,
    c: &mut [f32],
    ldc: usize,
) -> Result<()> {
    gemm(layout, trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
}

/// Double-precision [`gemm`].
pub fn dgemm(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &mut [f64],
    ldc: usize,
) -> Result<()> {
    gemm(layout, trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
}

/// Single-precision [`symm`].
pub fn ssymm(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: f32,
    a: &[f32],
    lda: usize,
    b: &[f32],
    ldb: usize,
    beta: f32,
    c: &mut [f32],
    ldc: usize,
) -> Result<()> {
    symm(layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc)
}

/// Double-precision [`symm`].
pub fn dsymm(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &mut [f64],
    ldc: usize,
) -> Result<()> {
    symm(layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_sgemm_row_major_identity() {
        // A = I(2), B = [[1,2],[3,4]], C should be [[1,2],[3,4]]
        let a = vec![1.0f32, 0.0, 0.0, 1.0];
        let b = vec![1.0f32, 2.0, 3.0, 4.0];
        let mut c = vec![0.0f32; 4];
        sgemm(
            Layout::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            2,
            1.0,
            &a,
            2,
            &b,
            2,
            0.0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sgemm_row_major_multiply() {
        // A = [[1,2],[3,4]], B = [[5,6],[7,8]]
        // C = A*B = [[19,22],[43,50]]
        let a = vec![1.0f32, 2.0, 3.0, 4.0];
        let b = vec![5.0f32, 6.0, 7.0, 8.0];
        let mut c = vec![0.0f32; 4];
        sgemm(
            Layout::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            2,
            1.0,
            &a,
            2,
            &b,
            2,
            0.0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_dgemm_row_major_rectangular_transposed() {
        // Row-major A is 3x2 stored transposed as 2x3 (lda 3):
        // At = [[1,2,3],[4,5,6]] so A = [[1,4],[2,5],[3,6]].
        // B is 2x4 row-major with lda 5 (one padding column).
        let at = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        #[rustfmt::skip]
        let b = [
            1.0, 0.0, 2.0, -1.0, 99.0,
            0.0, 1.0, 1.0, 3.0, 99.0,
        ];
        let mut c = [0.0f64; 12];
        dgemm(
            Layout::RowMajor,
            Transpose::Trans,
            Transpose::NoTrans,
            3,
            4,
            2,
            1.0,
            &at,
            3,
            &b,
            5,
            0.0,
            &mut c,
            4,
        )
        .unwrap();
        #[rustfmt::skip]
        let want = [
            1.0, 4.0, 6.0, 11.0,
            2.0, 5.0, 9.0, 13.0,
            3.0, 6.0, 12.0, 15.0,
        ];
        assert_eq!(c, want);
    }

    #[test]
    fn test_row_major_equals_col_major_of_transpose() {
        let (m, n, k) = (17usize, 11usize, 9usize);
        let mut rng = StdRng::seed_from_u64(1);
        let a: Vec<f64> = (0..m * k).map(|_| rng.gen_range(-5..=5) as f64).collect();
        let b: Vec<f64> = (0..k * n).map(|_| rng.gen_range(-5..=5) as f64).collect();

        // Row-major A (m x k, lda k) is column-major At; likewise B.
        let mut row = vec![0.0; m * n];
        dgemm(Layout::RowMajor, Transpose::NoTrans, Transpose::NoTrans, m, n, k, 1.0, &a, k, &b, n, 0.0, &mut row, n)
            .unwrap();
        let mut col = vec![0.0; m * n];
        dgemm(Layout::ColMajor, Transpose::Trans, Transpose::Trans, m, n, k, 1.0, &a, k, &b, n, 0.0, &mut col, m)
            .unwrap();
        for i in 0..m {
            for j in 0..n {
                assert_eq!(
                    row[Layout::RowMajor.index(i, j, n)],
                    col[Layout::ColMajor.index(i, j, m)]
                );
            }
        }
    }

    #[test]
    fn test_dsymm_row_major_upper() {
        // S = [[1,2,3],[2,4,5],[3,5,6]] row-major, upper triangle only.
        let nan = f64::NAN;
        #[rustfmt::skip]
        let s = [
            1.0, 2.0, 3.0,
            nan, 4.0, 5.0,
            nan, nan, 6.0,
        ];
        // B = [[1,0],[0,1],[1,1]] row-major.
        let b = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let mut c = [1.0f64; 6];
        dsymm(Layout::RowMajor, Side::Left, Uplo::Upper, 3, 2, 1.0, &s, 3, &b, 2, 1.0, &mut c, 2).unwrap();
        // S*B = [[4,5],[7,9],[9,11]], plus C = 1.
        assert_eq!(c, [5.0, 6.0, 8.0, 10.0, 10.0, 12.0]);

        // B * S with B 2x3 row-major.
        let b = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        let mut c = [0.0f64; 6];
        dsymm(Layout::RowMajor, Side::Right, Uplo::Upper, 2, 3, 1.0, &s, 3, &b, 3, 0.0, &mut c, 3).unwrap();
        assert_eq!(c, [4.0, 7.0, 9.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_cblas_error_positions() {
        let a = [0.0f64; 16];
        let b = [0.0f64; 16];
        let mut c = [0.0f64; 16];
        // Row-major NoTrans A (m x k) needs lda >= k: CBLAS position 9.
        let err = dgemm(Layout::RowMajor, Transpose::NoTrans, Transpose::NoTrans, 2, 3, 4, 1.0, &a, 3, &b, 3, 0.0, &mut c, 3)
            .unwrap_err();
        assert_eq!(
            err,
            Error::IllegalArgument {
                routine: "DGEMM",
                position: 9
            }
        );
        // Row-major ldc must cover n: position 14.
        let err = dgemm(Layout::RowMajor, Transpose::NoTrans, Transpose::NoTrans, 2, 3, 4, 1.0, &a, 4, &b, 3, 0.0, &mut c, 2)
            .unwrap_err();
        assert_eq!(
            err,
            Error::IllegalArgument {
                routine: "DGEMM",
                position: 14
            }
        );
        // Column-major lda: position 9 as well (8 + layout).
        let err = dgemm(Layout::ColMajor, Transpose::NoTrans, Transpose::NoTrans, 3, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 3)
            .unwrap_err();
        assert_eq!(
            err,
            Error::IllegalArgument {
                routine: "DGEMM",
                position: 9
            }
        );
        // Row-major SYMM Left: lda must cover m, position 8.
        let err = dsymm(Layout::RowMajor, Side::Left, Uplo::Upper, 3, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2)
            .unwrap_err();
        assert_eq!(
            err,
            Error::IllegalArgument {
                routine: "DSYMM",
                position: 8
            }
        );
    }

    #[test]
    fn test_row_major_bounds_error_names_caller_operand() {
        let a = [1.0f32; 5]; // 2x3 row-major needs 6
        let b = [1.0f32; 6];
        let mut c = [0.0f32; 4];
        let err = sgemm(Layout::RowMajor, Transpose::NoTrans, Transpose::NoTrans, 2, 2, 3, 1.0, &a, 3, &b, 2, 0.0, &mut c, 2)
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { array: "a", len: 5, .. }));
    }
}
