// ============================================================================
// GEMM: General Matrix Multiply
// C := alpha * op(A) * op(B) + beta * C
// ============================================================================

use tracing::{debug, debug_span};
use vectorblas_core::error::check_parameter;
use vectorblas_core::{BlockSizes, Element, MatrixView, MatrixViewMut, Result, Transpose};

use super::driver::multiply;

/// General matrix multiply on column-major buffers.
///
/// `C := alpha * op(A) * op(B) + beta * C`, with `op(A)` `m × k`, `op(B)`
/// `k × n` and `C` `m × n`. Each matrix starts at its `*_offset` in the
/// buffer and has leading dimension `ld*`.
///
/// Errors carry the reference BLAS parameter position (8 = `lda`,
/// 10 = `ldb`, 13 = `ldc`). Buffers are bounds-checked before C is
/// modified; A and B are only checked (and read) when the product term is
/// needed, i.e. `alpha != 0` and `k > 0`.
pub fn gemm<T: Element>(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
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
    gemm_blocked(
        trans_a,
        trans_b,
        m,
        n,
        k,
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

/// Leading-dimension checks, in reference BLAS order.
pub(crate) fn check_leading_dims(
    routine: &'static str,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    lda: usize,
    ldb: usize,
    ldc: usize,
) -> Result<()> {
    let a_rows = if trans_a.is_trans() { k } else { m };
    let b_rows = if trans_b.is_trans() { n } else { k };
    check_parameter(routine, 8, lda >= a_rows.max(1))?;
    check_parameter(routine, 10, ldb >= b_rows.max(1))?;
    check_parameter(routine, 13, ldc >= m.max(1))
}

/// [`gemm`] with explicit cache block sizes.
pub(crate) fn gemm_blocked<T: Element>(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
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
    let routine = T::GEMM_NAME;
    let _span = debug_span!("gemm", routine, ?trans_a, ?trans_b, m, n, k).entered();
    check_leading_dims(routine, trans_a, trans_b, m, n, k, lda, ldb, ldc)?;

    if m == 0 || n == 0 {
        debug!("empty C, nothing to do");
        return Ok(());
    }

    let a = MatrixView::new(a, a_offset, m, k, lda, trans_a);
    let b = MatrixView::new(b, b_offset, k, n, ldb, trans_b);
    let mut c = MatrixViewMut::new(c, c_offset, m, n, ldc);

    let product = !alpha.is_zero() && k > 0;
    if product {
        a.check_bounds("a")?;
        b.check_bounds("b")?;
    }
    if product || !beta.is_one() {
        c.check_bounds("c")?;
    }

    multiply(alpha, &a, &b, k, beta, &mut c, blocks);
    Ok(())
}

/// Single-precision [`gemm`].
pub fn sgemm(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
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
    gemm(
        trans_a, trans_b, m, n, k, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset,
        ldc,
    )
}

/// Double-precision [`gemm`].
pub fn dgemm(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
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
    gemm(
        trans_a, trans_b, m, n, k, alpha, a, a_offset, lda, b, b_offset, ldb, beta, c, c_offset,
        ldc,
    )
}
