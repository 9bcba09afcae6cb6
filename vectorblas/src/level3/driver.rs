//! Blocking controller (Goto BLAS loop order).
//!
//! Memory hierarchy:
//! - Outer loop over N (blocks of `nc` columns)
//! - Middle loop over K (blocks of `kc` depth); the right panel is packed
//!   once here and reused by every M block
//! - Inner loop over M (blocks of `mc` rows); the left panel is packed per
//!   block, then the micro-kernel runs over both panels

use tracing::{debug, trace};
use vectorblas_core::{BlockSizes, Element, MatrixViewMut};

use super::kernel::kernel;
use super::pack::PackSource;
use super::scale::scale;

/// Packed panel scratch, allocated once per call and sized for the largest
/// block.
pub(crate) struct Workspace<T> {
    left: Vec<T>,
    right: Vec<T>,
}

impl<T: Element> Workspace<T> {
    pub(crate) fn new(blocks: BlockSizes) -> Self {
        Self {
            left: vec![T::ZERO; blocks.kc * blocks.mc],
            right: vec![T::ZERO; blocks.kc * blocks.nc],
        }
    }
}

/// `C := alpha * left * right + beta * C` where `left` is `C.rows × depth`
/// and `right` is `depth × C.cols`.
///
/// Arguments are already validated; this only applies the beta pass and
/// the early exits before handing over to the blocked product.
pub(crate) fn multiply<T, L, R>(
    alpha: T,
    left: &L,
    right: &R,
    depth: usize,
    beta: T,
    c: &mut MatrixViewMut<'_, T>,
    blocks: BlockSizes,
) where
    T: Element,
    L: PackSource<T>,
    R: PackSource<T>,
{
    if !beta.is_one() {
        scale(beta, c);
    }
    if alpha.is_zero() || depth == 0 {
        debug!("alpha or depth is zero, product skipped");
        return;
    }
    run(alpha, left, right, depth, c, blocks);
}

/// Blocked product `C += alpha * left * right`.
pub(crate) fn run<T, L, R>(
    alpha: T,
    left: &L,
    right: &R,
    depth: usize,
    c: &mut MatrixViewMut<'_, T>,
    blocks: BlockSizes,
) where
    T: Element,
    L: PackSource<T>,
    R: PackSource<T>,
{
    let (m, n) = (c.rows(), c.cols());
    let blocks = blocks.clamp_to(m, n, depth);
    let mut ws = Workspace::<T>::new(blocks);
    trace!(mc = blocks.mc, kc = blocks.kc, nc = blocks.nc, "blocked product");

    for ns in (0..n).step_by(blocks.nc) {
        let nc = blocks.nc.min(n - ns);
        for ks in (0..depth).step_by(blocks.kc) {
            let kc = blocks.kc.min(depth - ks);
            let packed_right = &mut ws.right[..kc * nc];
            right.pack_right(ks, kc, ns, nc, packed_right);
            trace!(ns, ks, nc, kc, "packed right panel");

            for ms in (0..m).step_by(blocks.mc) {
                let mc = blocks.mc.min(m - ms);
                let packed_left = &mut ws.left[..kc * mc];
                left.pack_left(ms, mc, ks, kc, packed_left);
                kernel(
                    alpha,
                    &ws.left[..kc * mc],
                    &ws.right[..kc * nc],
                    mc,
                    nc,
                    kc,
                    c,
                    ms,
                    ns,
                );
            }
        }
    }
}
