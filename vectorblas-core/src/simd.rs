//! SIMD lane abstraction shared by the packing and micro-kernel code.
//!
//! The lane types are selected at compile time — no runtime branching:
//! - default: `wide::f32x8` / `wide::f64x4` (stable toolchain)
//! - `nightly`: `std::simd::f32x8` / `std::simd::f64x4` (`portable_simd`)
//!
//! Both backends expose the same lane counts, so packed panel layouts do not
//! depend on the backend.

use std::fmt::Debug;

/// A fixed-width vector of floating-point lanes.
pub trait SimdVector: Copy + Debug + Send + Sync + 'static {
    /// Scalar lane type.
    type Elem: Copy;

    /// Number of lanes.
    const LANES: usize;

    /// All lanes set to `value`.
    fn broadcast(value: Self::Elem) -> Self;

    /// All lanes zero.
    fn zero() -> Self;

    /// Load the first `LANES` elements of `src`.
    ///
    /// Panics if `src` is shorter than `LANES`.
    fn load(src: &[Self::Elem]) -> Self;

    /// Store into the first `LANES` elements of `dst`.
    fn store(self, dst: &mut [Self::Elem]);

    /// Lane-wise product.
    fn mul(self, rhs: Self) -> Self;

    /// Lane-wise `self * b + acc`.
    fn fma(self, b: Self, acc: Self) -> Self;
}

/// f32 lanes per vector register.
pub const F32_LANES: usize = 8;
/// f64 lanes per vector register.
pub const F64_LANES: usize = 4;

#[cfg(not(feature = "nightly"))]
pub type F32Vector = wide::f32x8;
#[cfg(not(feature = "nightly"))]
pub type F64Vector = wide::f64x4;

#[cfg(feature = "nightly")]
pub type F32Vector = std::simd::f32x8;
#[cfg(feature = "nightly")]
pub type F64Vector = std::simd::f64x4;

macro_rules! impl_wide_vector {
    ($vec:ty, $elem:ty, $lanes:expr) => {
        impl SimdVector for $vec {
            type Elem = $elem;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn broadcast(value: $elem) -> Self {
                <$vec>::splat(value)
            }

            #[inline(always)]
            fn zero() -> Self {
                <$vec>::splat(0.0)
            }

            #[inline(always)]
            fn load(src: &[$elem]) -> Self {
                let mut lanes = [0.0; $lanes];
                lanes.copy_from_slice(&src[..$lanes]);
                <$vec>::from(lanes)
            }

            #[inline(always)]
            fn store(self, dst: &mut [$elem]) {
                dst[..$lanes].copy_from_slice(&self.to_array());
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[cfg(target_feature = "fma")]
            #[inline(always)]
            fn fma(self, b: Self, acc: Self) -> Self {
                self.mul_add(b, acc)
            }

            // Without hardware FMA, `wide` splits mul_add into two roundings.
            #[cfg(not(target_feature = "fma"))]
            #[inline(always)]
            fn fma(self, b: Self, acc: Self) -> Self {
                let (x, y, z) = (self.to_array(), b.to_array(), acc.to_array());
                let mut lanes = [0.0; $lanes];
                for (i, lane) in lanes.iter_mut().enumerate() {
                    *lane = <$elem>::mul_add(x[i], y[i], z[i]);
                }
                <$vec>::from(lanes)
            }
        }
    };
}

impl_wide_vector!(wide::f32x8, f32, F32_LANES);
impl_wide_vector!(wide::f64x4, f64, F64_LANES);

#[cfg(feature = "nightly")]
mod portable {
    use super::{SimdVector, F32_LANES, F64_LANES};
    use std::simd::{f32x8, f64x4, StdFloat};

    macro_rules! impl_portable_vector {
        ($vec:ty, $elem:ty, $lanes:expr) => {
            impl SimdVector for $vec {
                type Elem = $elem;
                const LANES: usize = $lanes;

                #[inline(always)]
                fn broadcast(value: $elem) -> Self {
                    <$vec>::splat(value)
                }

                #[inline(always)]
                fn zero() -> Self {
                    <$vec>::splat(0.0)
                }

                #[inline(always)]
                fn load(src: &[$elem]) -> Self {
                    <$vec>::from_slice(&src[..$lanes])
                }

                #[inline(always)]
                fn store(self, dst: &mut [$elem]) {
                    self.copy_to_slice(&mut dst[..$lanes]);
                }

                #[inline(always)]
                fn mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline(always)]
                fn fma(self, b: Self, acc: Self) -> Self {
                    StdFloat::mul_add(self, b, acc)
                }
            }
        };
    }

    impl_portable_vector!(f32x8, f32, F32_LANES);
    impl_portable_vector!(f64x4, f64, F64_LANES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_f32() {
        let src: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let v = F32Vector::load(&src[1..]);
        let mut dst = vec![-1.0f32; 10];
        v.store(&mut dst[2..]);
        assert_eq!(&dst[2..10], &src[1..9]);
        assert_eq!(dst[0], -1.0);
        assert_eq!(dst[1], -1.0);
    }

    #[test]
    fn test_fma_f64() {
        let a = F64Vector::load(&[1.0, 2.0, 3.0, 4.0]);
        let b = F64Vector::broadcast(2.0);
        let acc = F64Vector::broadcast(0.5);
        let mut out = [0.0f64; F64_LANES];
        a.fma(b, acc).store(&mut out);
        assert_eq!(out, [2.5, 4.5, 6.5, 8.5]);
    }

    #[test]
    fn test_fma_is_single_rounding() {
        // x*x = 1 + 2^-29 + 2^-60; the 2^-60 term survives only when fused.
        let x = 1.0 + 2f64.powi(-30);
        let c = -(1.0 + 2f64.powi(-29));
        let mut out = [0.0f64; F64_LANES];
        F64Vector::broadcast(x)
            .fma(F64Vector::broadcast(x), F64Vector::broadcast(c))
            .store(&mut out);
        assert!(out.iter().all(|&v| v == 2f64.powi(-60)));

        let y = 1.0f32 + 2f32.powi(-12);
        let d = -(1.0f32 + 2f32.powi(-11));
        let mut out = [0.0f32; F32_LANES];
        F32Vector::broadcast(y)
            .fma(F32Vector::broadcast(y), F32Vector::broadcast(d))
            .store(&mut out);
        assert!(out.iter().all(|&v| v == 2f32.powi(-24)));
    }

    #[test]
    fn test_mul_and_zero() {
        let a = F32Vector::broadcast(3.0);
        let mut out = [1.0f32; F32_LANES];
        a.mul(F32Vector::zero()).store(&mut out);
        assert!(out.iter().all(|&x| x == 0.0));
        assert_eq!(F32Vector::LANES, F32_LANES);
        assert_eq!(F64Vector::LANES, F64_LANES);
    }

    #[test]
    #[should_panic]
    fn test_load_short_slice_panics() {
        let _ = F64Vector::load(&[1.0, 2.0]);
    }
}
