//! Netlib-style entry points.
//!
//! Same argument list as the reference Fortran BLAS (plus explicit buffer
//! offsets): single-character string flags, signed 32-bit dimensions. Flags
//! and signs are validated here with their reference positions, then the
//! call is forwarded to [`crate::level3`].

use vectorblas_core::{Element, Error, Result, Side, Transpose, Uplo};

use crate::level3;

fn flag<F>(parsed: Option<F>, routine: &'static str, position: usize) -> Result<F> {
    parsed.ok_or(Error::IllegalArgument { routine, position })
}

fn dim(value: i32, routine: &'static str, position: usize) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::IllegalArgument { routine, position })
}

/// Negative leading dimensions fail the `ld >= max(1, ..)` check.
fn leading(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// A negative offset is an out-of-bounds index, but only for a buffer the
/// call actually touches.
fn offset(value: i32, array: &'static str, len: usize, touched: bool) -> Result<usize> {
    match usize::try_from(value) {
        Ok(offset) => Ok(offset),
        Err(_) if touched => Err(Error::OutOfBounds {
            array,
            index: i64::from(value),
            len,
        }),
        Err(_) => Ok(0),
    }
}

fn gemm<T: Element>(
    transa: &str,
    transb: &str,
    m: i32,
    n: i32,
    k: i32,
    alpha: T,
    a: &[T],
    a_offset: i32,
    lda: i32,
    b: &[T],
    b_offset: i32,
    ldb: i32,
    beta: T,
    c: &mut [T],
    c_offset: i32,
    ldc: i32,
) -> Result<()> {
    let routine = T::GEMM_NAME;
    let trans_a = flag(Transpose::from_flag(transa), routine, 1)?;
    let trans_b = flag(Transpose::from_flag(transb), routine, 2)?;
    let m = dim(m, routine, 3)?;
    let n = dim(n, routine, 4)?;
    let k = dim(k, routine, 5)?;
    let (lda, ldb, ldc) = (leading(lda), leading(ldb), leading(ldc));
    level3::check_gemm_leading_dims(routine, trans_a, trans_b, m, n, k, lda, ldb, ldc)?;

    let product = m > 0 && n > 0 && k > 0 && !alpha.is_zero();
    let touches_c = m > 0 && n > 0 && (product || !beta.is_one());
    let a_offset = offset(a_offset, "a", a.len(), product)?;
    let b_offset = offset(b_offset, "b", b.len(), product)?;
    let c_offset = offset(c_offset, "c", c.len(), touches_c)?;

    level3::gemm(
        trans_a, trans_b, m, n, k, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset,
        ldc,
    )
}

fn symm<T: Element>(
    side: &str,
    uplo: &str,
    m: i32,
    n: i32,
    alpha: T,
    a: &[T],
    a_offset: i32,
    lda: i32,
    b: &[T],
    b_offset: i32,
    ldb: i32,
    beta: T,
    c: &mut [T],
    c_offset: i32,
    ldc: i32,
) -> Result<()> {
    let routine = T::SYMM_NAME;
    let side = flag(Side::from_flag(side), routine, 1)?;
    let uplo = flag(Uplo::from_flag(uplo), routine, 2)?;
    let m = dim(m, routine, 3)?;
    let n = dim(n, routine, 4)?;
    let (lda, ldb, ldc) = (leading(lda), leading(ldb), leading(ldc));
    level3::check_symm_leading_dims(routine, side, m, n, lda, ldb, ldc)?;

    let product = m > 0 && n > 0 && !alpha.is_zero();
    let touches_c = m > 0 && n > 0 && (product || !beta.is_one());
    let a_offset = offset(a_offset, "a", a.len(), product)?;
    let b_offset = offset(b_offset, "b", b.len(), product)?;
    let c_offset = offset(c_offset, "c", c.len(), touches_c)?;

    level3::symm(
        side, uplo, m, n, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}

/// `C := alpha * op(A) * op(B) + beta * C` in single precision.
pub fn sgemm(
    transa: &str,
    transb: &str,
    m: i32,
    n: i32,
    k: i32,
    alpha: f32,
    a: &[f32],
    a_offset: i32,
    lda: i32,
    b: &[f32],
    b_offset: i32,
    ldb: i32,
    beta: f32,
    c: &mut [f32],
    c_offset: i32,
    ldc: i32,
) -> Result<()> {
    gemm(
        transa, transb, m, n, k, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}

/// `C := alpha * op(A) * op(B) + beta * C` in double precision.
pub fn dgemm(
    transa: &str,
    transb: &str,
    m: i32,
    n: i32,
    k: i32,
    alpha: f64,
    a: &[f64],
    a_offset: i32,
    lda: i32,
    b: &[f64],
    b_offset: i32,
    ldb: i32,
    beta: f64,
    c: &mut [f64],
    c_offset: i32,
    ldc: i32,
) -> Result<()> {
    gemm(
        transa, transb, m, n, k, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}

/// `C := alpha * A * B + beta * C` or `C := alpha * B * A + beta * C` with
/// symmetric `A`, single precision.
pub fn ssymm(
    side: &str,
    uplo: &str,
    m: i32,
    n: i32,
    alpha: f32,
    a: &[f32],
    a_offset: i32,
    lda: i32,
    b: &[f32],
    b_offset: i32,
    ldb: i32,
    beta: f32,
    c: &mut [f32],
    c_offset: i32,
    ldc: i32,
) -> Result<()> {
    symm(
        side, uplo, m, n, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}

/// `C := alpha * A * B + beta * C` or `C := alpha * B * A + beta * C` with
/// symmetric `A`, double precision.
pub fn dsymm(
    side: &str,
    uplo: &str,
    m: i32,
    n: i32,
    alpha: f64,
    a: &[f64],
    a_offset: i32,
    lda: i32,
    b: &[f64],
    b_offset: i32,
    ldb: i32,
    beta: f64,
    c: &mut [f64],
    c_offset: i32,
    ldc: i32,
) -> Result<()> {
    symm(
        side, uplo, m, n, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}
