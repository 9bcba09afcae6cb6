//! BLAS Level 3: Matrix-matrix operations.
//!
//! GEMM and SYMM share one engine built on the Goto BLAS algorithm: pack
//! panels of both operands into contiguous cache-friendly buffers, then run
//! register-tiled micro-kernels over them. Everything is generic over
//! [`Element`](vectorblas_core::Element) and instantiated for `f32` and
//! `f64`.
//!
//! All matrices are column-major with an explicit offset and leading
//! dimension. Row-major callers go through [`crate::cblas`].

mod driver;
mod gemm;
mod kernel;
mod pack;
mod scale;
mod symm;

pub use gemm::{dgemm, gemm, sgemm};
pub use symm::{dsymm, ssymm, symm};

pub(crate) use gemm::check_leading_dims as check_gemm_leading_dims;
pub(crate) use symm::check_leading_dims as check_symm_leading_dims;
