//! Panel packing.
//!
//! Both panels share one layout: the tile dimension (rows of the left
//! operand, columns of the right operand) is cut by a [`TileCascade`], and
//! each tile of width `w` occupies `w * depth` consecutive elements starting
//! at `tile.start * depth`, stored reduction step by reduction step:
//!
//! ```text
//! tile 0: [x0..x0+w @ y0] [x0..x0+w @ y0+1] ... [x0..x0+w @ y0+depth-1]
//! tile 1: ...
//! ```
//!
//! The left panel uses the row cascade `4W, 2W, W, 1`, the right panel the
//! column cascade `4, 1`. The micro-kernel walks the same cascades, so it
//! finds every tile where packing put it.

use smallvec::SmallVec;
use vectorblas_core::{Element, MatrixView, SymmetricView, TileCascade, Transpose, Uplo};

/// A matrix operand that can be packed as either panel of the product.
pub(crate) trait PackSource<T: Element> {
    /// Pack rows `row0..row0 + rows` by reduction `k0..k0 + depth` as a left
    /// panel. `dst` must hold exactly `rows * depth` elements.
    fn pack_left(&self, row0: usize, rows: usize, k0: usize, depth: usize, dst: &mut [T]);

    /// Pack reduction `k0..k0 + depth` by columns `col0..col0 + cols` as a
    /// right panel. `dst` must hold exactly `cols * depth` elements.
    fn pack_right(&self, k0: usize, depth: usize, col0: usize, cols: usize, dst: &mut [T]);
}

impl<T: Element> PackSource<T> for MatrixView<'_, T> {
    fn pack_left(&self, row0: usize, rows: usize, k0: usize, depth: usize, dst: &mut [T]) {
        // NoTrans: a tile of rows is a contiguous run of one stored column.
        let stride = match self.trans() {
            Transpose::NoTrans => 1,
            Transpose::Trans => self.ld(),
        };
        pack_strided(
            self.data(),
            &T::row_cascade(),
            rows,
            depth,
            stride,
            |x, y| self.index(row0 + x, k0 + y),
            dst,
        );
    }

    fn pack_right(&self, k0: usize, depth: usize, col0: usize, cols: usize, dst: &mut [T]) {
        // Trans: a tile of columns is a contiguous run of one stored column.
        let stride = match self.trans() {
            Transpose::NoTrans => self.ld(),
            Transpose::Trans => 1,
        };
        pack_strided(
            self.data(),
            &TileCascade::cols(),
            cols,
            depth,
            stride,
            |x, y| self.index(k0 + y, col0 + x),
            dst,
        );
    }
}

impl<T: Element> PackSource<T> for SymmetricView<'_, T> {
    fn pack_left(&self, row0: usize, rows: usize, k0: usize, depth: usize, dst: &mut [T]) {
        pack_mirror(self, &T::row_cascade(), row0, rows, k0, depth, dst);
    }

    // S(k, j) == S(j, k): the right panel reads the same cells as a left
    // panel would, only cut by the column cascade.
    fn pack_right(&self, k0: usize, depth: usize, col0: usize, cols: usize, dst: &mut [T]) {
        pack_mirror(self, &TileCascade::cols(), col0, cols, k0, depth, dst);
    }
}

/// Pack a plain operand. `start(x, y)` is the buffer index of tile-dimension
/// offset `x`, reduction offset `y`; consecutive `x` are `stride` apart.
#[inline]
fn pack_strided<T: Copy>(
    data: &[T],
    cascade: &TileCascade,
    extent: usize,
    depth: usize,
    stride: usize,
    start: impl Fn(usize, usize) -> usize,
    dst: &mut [T],
) {
    debug_assert_eq!(dst.len(), extent * depth);
    for tile in cascade.tiles(extent) {
        let w = tile.width;
        let panel = &mut dst[tile.start * depth..(tile.start + w) * depth];
        for (y, out) in panel.chunks_exact_mut(w).enumerate() {
            let base = start(tile.start, y);
            if stride == 1 {
                out.copy_from_slice(&data[base..base + w]);
            } else {
                for (lane, o) in out.iter_mut().enumerate() {
                    *o = data[base + lane * stride];
                }
            }
        }
    }
}

/// Pack logical `S(x, y)` of a symmetric operand, `x` in
/// `x0..x0 + extent` (tile dimension), `y` in `y0..y0 + depth` (reduction).
///
/// Each lane keeps its own buffer offset. Lane `idx` of a tile starting at
/// `x` is above the diagonal while `delta > -idx`, with `delta = x - y`
/// tracking the current reduction step. On that side an upper-stored matrix
/// is read along the stored column (step 1) and a lower-stored one along
/// the stored row (step `ld`); past the diagonal the steps swap. Both
/// addressings meet on the diagonal, so the switch needs no recomputation
/// and the unreferenced triangle is never touched.
fn pack_mirror<T: Element>(
    s: &SymmetricView<'_, T>,
    cascade: &TileCascade,
    x0: usize,
    extent: usize,
    y0: usize,
    depth: usize,
    dst: &mut [T],
) {
    debug_assert_eq!(dst.len(), extent * depth);
    let data = s.data();
    let (step_mirror, step_direct) = match s.uplo() {
        Uplo::Upper => (1, s.ld()),
        Uplo::Lower => (s.ld(), 1),
    };

    let mut offsets: SmallVec<[usize; 32]> = SmallVec::new();
    for tile in cascade.tiles(extent) {
        let w = tile.width;
        let x = x0 + tile.start;
        offsets.clear();
        offsets.extend((0..w).map(|idx| s.index(x + idx, y0)));

        let mut delta = x as isize - y0 as isize;
        let panel = &mut dst[tile.start * depth..(tile.start + w) * depth];
        for out in panel.chunks_exact_mut(w) {
            for (idx, (o, off)) in out.iter_mut().zip(offsets.iter_mut()).enumerate() {
                *o = data[*off];
                *off += if delta > -(idx as isize) {
                    step_mirror
                } else {
                    step_direct
                };
            }
            delta -= 1;
        }
    }
}
