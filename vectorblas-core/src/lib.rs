//! # Vectorblas Core
//!
//! Shared primitives for the vectorblas Level-3 routines.
//!
//! This crate provides:
//! - **Element types**: `f32` / `f64` behind one [`Element`] trait, so each
//!   routine is written once and instantiated per precision.
//! - **SIMD lanes**: a thin [`SimdVector`] abstraction over `wide` (stable) or
//!   `std::simd` (`nightly` feature).
//! - **Blocking**: cache block sizes and the register-tile cascades shared by
//!   packing and the micro-kernel.
//! - **Matrix views**: column-major views with offset, leading dimension and
//!   transpose over caller-owned buffers.
//! - **Flags and errors**: BLAS flag enums and the argument / bounds errors.

#![cfg_attr(feature = "nightly", feature(portable_simd))]

pub mod blocking;
pub mod element;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod simd;

pub use blocking::{BlockSizes, Tile, TileCascade};
pub use element::Element;
pub use error::{Error, Result};
pub use layout::{Layout, Side, Transpose, Uplo};
pub use matrix::{MatrixView, MatrixViewMut, SymmetricView};
pub use simd::SimdVector;
