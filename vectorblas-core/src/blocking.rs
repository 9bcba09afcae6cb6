//! Cache blocking parameters and register-tile cascades.
//!
//! Block sizes partition M/N/K so that a packed left panel (`kc × mc`) stays
//! in L2 and a packed right panel (`kc × nc`) streams from L3. Tile cascades
//! describe how a panel dimension is cut into register tiles: full tiles
//! first, then successively narrower ones down to single elements. Packing
//! and the micro-kernel walk the same cascade, so the panel layout and the
//! way it is consumed cannot drift apart.

use crate::simd::{F32_LANES, F64_LANES};

// ============================================================================
// Cache blocking parameters
// ============================================================================

/// Block size for M dimension in SGEMM (fits in L2).
pub const SGEMM_MC: usize = 256;
/// Block size for K dimension in SGEMM.
pub const SGEMM_KC: usize = 256;
/// Block size for N dimension in SGEMM (fits in L3).
pub const SGEMM_NC: usize = 8192;

/// Block size for M dimension in DGEMM.
pub const DGEMM_MC: usize = 256;
/// Block size for K dimension in DGEMM.
pub const DGEMM_KC: usize = 240;
/// Block size for N dimension in DGEMM.
pub const DGEMM_NC: usize = 8192;

// ============================================================================
// Micro-kernel tile sizes
// ============================================================================

/// Columns of C produced per full micro-kernel tile.
pub const GEMM_UNROLL_N: usize = 4;

/// Vector registers (stacked along M) per full micro-kernel tile.
pub const GEMM_UNROLL_M_VECTORS: usize = 4;

/// Rows of C per full SGEMM tile: 4 × f32 lanes.
pub const SGEMM_UNROLL_M: usize = GEMM_UNROLL_M_VECTORS * F32_LANES;
/// Rows of C per full DGEMM tile: 4 × f64 lanes.
pub const DGEMM_UNROLL_M: usize = GEMM_UNROLL_M_VECTORS * F64_LANES;

/// Cache block sizes for the three GEMM dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSizes {
    /// Rows of A / C per block.
    pub mc: usize,
    /// Reduction depth per block.
    pub kc: usize,
    /// Columns of B / C per block.
    pub nc: usize,
}

impl BlockSizes {
    pub const SGEMM: BlockSizes = BlockSizes {
        mc: SGEMM_MC,
        kc: SGEMM_KC,
        nc: SGEMM_NC,
    };

    pub const DGEMM: BlockSizes = BlockSizes {
        mc: DGEMM_MC,
        kc: DGEMM_KC,
        nc: DGEMM_NC,
    };

    /// Block sizes clamped to the problem size, never below one.
    #[inline]
    pub fn clamp_to(self, m: usize, n: usize, k: usize) -> BlockSizes {
        BlockSizes {
            mc: self.mc.min(m).max(1),
            kc: self.kc.min(k).max(1),
            nc: self.nc.min(n).max(1),
        }
    }
}

/// One register tile of a panel: `width` consecutive rows (or columns)
/// starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub start: usize,
    pub width: usize,
}

/// Ordered list of decreasing tile widths, ending in 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCascade {
    widths: [usize; 4],
    len: usize,
}

impl TileCascade {
    /// Row cascade for a vector of `lanes` elements: `4W, 2W, W, 1`.
    pub const fn rows(lanes: usize) -> Self {
        TileCascade {
            widths: [GEMM_UNROLL_M_VECTORS * lanes, 2 * lanes, lanes, 1],
            len: 4,
        }
    }

    /// Column cascade: `GEMM_UNROLL_N, 1`.
    pub const fn cols() -> Self {
        TileCascade {
            widths: [GEMM_UNROLL_N, 1, 0, 0],
            len: 2,
        }
    }

    /// Tile widths, widest first.
    #[inline]
    pub fn widths(&self) -> &[usize] {
        &self.widths[..self.len]
    }

    /// Widest tile width.
    #[inline]
    pub fn unroll(&self) -> usize {
        self.widths[0]
    }

    /// Cut `[0, extent)` into tiles, greedily taking the widest width that
    /// still fits. Tiles are contiguous and cover the range exactly.
    #[inline]
    pub fn tiles(&self, extent: usize) -> Tiles<'_> {
        Tiles {
            cascade: self,
            extent,
            pos: 0,
            level: 0,
        }
    }
}

/// Iterator over the tiles of one panel dimension.
#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    cascade: &'a TileCascade,
    extent: usize,
    pos: usize,
    level: usize,
}

impl Iterator for Tiles<'_> {
    type Item = Tile;

    #[inline]
    fn next(&mut self) -> Option<Tile> {
        let widths = self.cascade.widths();
        while let Some(&width) = widths.get(self.level) {
            if self.pos + width <= self.extent {
                let tile = Tile {
                    start: self.pos,
                    width,
                };
                self.pos += width;
                return Some(tile);
            }
            self.level += 1;
        }
        None
    }
}
