// BLAS functions match reference signatures — many parameters are inherent to the API.
#![allow(clippy::too_many_arguments)]
#![cfg_attr(feature = "nightly", feature(portable_simd))]

//! # vectorblas
//!
//! Pure Rust Level-3 BLAS (GEMM, SYMM) in single and double precision, built
//! on explicit SIMD and cache blocking.
//!
//! No FFI, no C dependencies. Both routines pack their operands into
//! contiguous panels and run register-tiled micro-kernels whose tile sizes
//! step down through a cascade (`4W, 2W, W, 1` rows by `4, 1` columns, with
//! `W` the SIMD lane count) so ragged edges need no padding.
//!
//! ## Entry points
//!
//! - [`level3`]: typed API over column-major buffers with explicit offsets.
//! - [`netlib`]: reference-BLAS argument list with string flags and `i32`
//!   dimensions.
//! - [`cblas`]: row-major or column-major via a leading [`Layout`].
//!
//! ## Example
//!
//! ```
//! use vectorblas::level3;
//! use vectorblas::Transpose;
//!
//! // A = [[1,2,3],[4,5,6]], B = [[7,8],[9,10],[11,12]], column-major.
//! let a = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
//! let b = [7.0, 9.0, 11.0, 8.0, 10.0, 12.0];
//! let mut c = [1.0f64; 4];
//!
//! // C := 2 * A * B + C
//! level3::dgemm(Transpose::NoTrans, Transpose::NoTrans, 2, 2, 3,
//!               2.0, &a, 0, 2, &b, 0, 3, 1.0, &mut c, 0, 2).unwrap();
//! assert_eq!(c, [117.0, 279.0, 129.0, 309.0]);
//! ```

pub mod cblas;
pub mod level3;
pub mod netlib;

// Re-export flag and error types for convenience
pub use vectorblas_core::{Error, Layout, Result, Side, Transpose, Uplo};
