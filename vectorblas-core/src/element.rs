//! Floating-point element types supported by the Level-3 routines.
//!
//! Single and double precision share one generic implementation; everything
//! that differs between them (lane type, blocking constants, routine names
//! used in diagnostics) hangs off this trait.

use crate::blocking::{BlockSizes, TileCascade};
use crate::simd::{F32Vector, F64Vector, SimdVector};
use std::fmt::Debug;
use std::ops::{Add, Mul};

/// A BLAS element type (`f32` or `f64`).
pub trait Element:
    Copy + Debug + PartialEq + Send + Sync + Add<Output = Self> + Mul<Output = Self> + 'static
{
    /// Vector register holding `LANES` elements.
    type Vector: SimdVector<Elem = Self>;

    /// SIMD lane count.
    const LANES: usize = <Self::Vector as SimdVector>::LANES;

    const ZERO: Self;
    const ONE: Self;

    /// Cache blocking constants for this precision.
    const BLOCKING: BlockSizes;

    /// Routine names used in argument diagnostics.
    const GEMM_NAME: &'static str;
    const SYMM_NAME: &'static str;

    /// Row cascade `4W, 2W, W, 1` for this element's lane width.
    #[inline]
    fn row_cascade() -> TileCascade {
        TileCascade::rows(Self::LANES)
    }

    /// `true` for both `+0.0` and `-0.0`.
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// `true` only for exactly one (NaN is never one).
    #[inline]
    fn is_one(self) -> bool {
        self == Self::ONE
    }
}

impl Element for f32 {
    type Vector = F32Vector;

    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const BLOCKING: BlockSizes = BlockSizes::SGEMM;
    const GEMM_NAME: &'static str = "SGEMM";
    const SYMM_NAME: &'static str = "SSYMM";
}

impl Element for f64 {
    type Vector = F64Vector;

    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const BLOCKING: BlockSizes = BlockSizes::DGEMM;
    const GEMM_NAME: &'static str = "DGEMM";
    const SYMM_NAME: &'static str = "DSYMM";
}
