// ============================================================================
// SYMM: Symmetric Matrix Multiply
// C := alpha * A * B + beta * C   (side = Left)
// C := alpha * B * A + beta * C   (side = Right)
// ============================================================================

use tracing::{debug, debug_span};
use vectorblas_core::error::check_parameter;
use vectorblas_core::{
    BlockSizes, Element, MatrixView, MatrixViewMut, Result, Side, SymmetricView, Transpose, Uplo,
};

use super::driver::multiply;

/// Symmetric matrix multiply on column-major buffers.
///
/// `A` is symmetric of order `m` (Left) or `n` (Right); only its `uplo`
/// triangle is read, the other one is rebuilt by symmetry while packing.
/// `B` and `C` are `m × n`.
///
/// Errors carry the reference BLAS parameter position (7 = `lda`,
/// 9 = `ldb`, 12 = `ldc`).
pub fn symm<T: Element>(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_offset: usize,
    lda: usize,
    b: &[T],
    b_offset: usize,
    ldb: usize,
    beta: T,
    c: &mut [T],
    c_offset: usize,
    ldc: usize,
) -> Result<()> {
    symm_blocked(
        side,
        uplo,
        m,
        n,
        alpha,
        a,
        a_offset,
        lda,
        b,
        b_offset,
        ldb,
        beta,
        c,
        c_offset,
        ldc,
        T::BLOCKING,
    )
}

/// Order of the symmetric operand.
#[inline]
fn order(side: Side, m: usize, n: usize) -> usize {
    match side {
        Side::Left => m,
        Side::Right => n,
    }
}

/// Leading-dimension checks, in reference BLAS order.
pub(crate) fn check_leading_dims(
    routine: &'static str,
    side: Side,
    m: usize,
    n: usize,
    lda: usize,
    ldb: usize,
    ldc: usize,
) -> Result<()> {
    check_parameter(routine, 7, lda >= order(side, m, n).max(1))?;
    check_parameter(routine, 9, ldb >= m.max(1))?;
    check_parameter(routine, 12, ldc >= m.max(1))
}

/// [`symm`] with explicit cache block sizes.
pub(crate) fn symm_blocked<T: Element>(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_offset: usize,
    lda: usize,
    b: &[T],
    b_offset: usize,
    ldb: usize,
    beta: T,
    c: &mut [T],
    c_offset: usize,
    ldc: usize,
    blocks: BlockSizes,
) -> Result<()> {
    let routine = T::SYMM_NAME;
    let _span = debug_span!("symm", routine, ?side, ?uplo, m, n).entered();
    check_leading_dims(routine, side, m, n, lda, ldb, ldc)?;

    if m == 0 || n == 0 {
        debug!("empty C, nothing to do");
        return Ok(());
    }

    let ka = order(side, m, n);
    let a = SymmetricView::new(a, a_offset, ka, lda, uplo);
    let b = MatrixView::new(b, b_offset, m, n, ldb, Transpose::NoTrans);
    let mut c = MatrixViewMut::new(c, c_offset, m, n, ldc);

    let product = !alpha.is_zero();
    if product {
        a.check_bounds("a")?;
        b.check_bounds("b")?;
    }
    if product || !beta.is_one() {
        c.check_bounds("c")?;
    }

    match side {
        Side::Left => multiply(alpha, &a, &b, ka, beta, &mut c, blocks),
        Side::Right => multiply(alpha, &b, &a, ka, beta, &mut c, blocks),
    }
    Ok(())
}

/// Single-precision [`symm`].
pub fn ssymm(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: f32,
    a: &[f32],
    a_offset: usize,
    lda: usize,
    b: &[f32],
    b_offset: usize,
    ldb: usize,
    beta: f32,
    c: &mut [f32],
    c_offset: usize,
    ldc: usize,
) -> Result<()> {
    symm(
        side, uplo, m, n, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}

/// Double-precision [`symm`].
pub fn dsymm(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: f64,
    a: &[f64],
    a_offset: usize,
    lda: usize,
    b: &[f64],
    b_offset: usize,
    ldb: usize,
    beta: f64,
    c: &mut [f64],
    c_offset: usize,
    ldc: usize,
) -> Result<()> {
    symm(
        side, uplo, m, n, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset, ldc,
    )
}
