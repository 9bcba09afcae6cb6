//! Error types for vectorblas.
//!
//! Both kinds are programmer errors detected before any computation: an
//! argument outside its legal range, or a buffer too short for the matrix
//! it is supposed to hold. Numerical trouble (overflow, NaN) is not an error
//! and propagates through the arithmetic.

use thiserror::Error;

/// Result type alias using vectorblas' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the Level-3 routines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter had an illegal value (reference BLAS `xerbla` diagnostic)
    #[error("** On entry to {routine} parameter number {position} had an illegal value")]
    IllegalArgument {
        /// Routine name, e.g. `DGEMM`
        routine: &'static str,
        /// 1-based position of the offending parameter
        position: usize,
    },

    /// A computed buffer index falls outside the buffer
    #[error("Index {index} of array {array} out of bounds for length: {len}")]
    OutOfBounds {
        /// Array name (`a`, `b` or `c`)
        array: &'static str,
        /// Offending index
        index: i64,
        /// Buffer length
        len: usize,
    },
}

/// Parameter validator: fail with the BLAS position of the first violated
/// precondition.
#[inline]
pub fn check_parameter(routine: &'static str, position: usize, is_valid: bool) -> Result<()> {
    if is_valid {
        Ok(())
    } else {
        Err(Error::IllegalArgument { routine, position })
    }
}

/// Bounds checker: `offset` and `offset + extent` must both lie in `[0, len)`.
///
/// `extent` is the relative index of the last element the routine will touch.
#[inline]
pub fn check_array(array: &'static str, offset: usize, extent: usize, len: usize) -> Result<()> {
    let last = offset.checked_add(extent).ok_or(Error::OutOfBounds {
        array,
        index: i64::MAX,
        len,
    })?;
    if offset >= len || last >= len {
        return Err(Error::OutOfBounds {
            array,
            index: i64::try_from(last).unwrap_or(i64::MAX),
            len,
        });
    }
    Ok(())
}

/// Bounds check for a column-major block of `rows × cols` (both non-zero)
/// with leading dimension `ld`. An extent that overflows `usize` is out of
/// bounds.
#[inline]
pub fn check_block(
    array: &'static str,
    offset: usize,
    rows: usize,
    cols: usize,
    ld: usize,
    len: usize,
) -> Result<()> {
    let extent = (cols - 1)
        .checked_mul(ld)
        .and_then(|x| x.checked_add(rows - 1))
        .ok_or(Error::OutOfBounds {
            array,
            index: i64::MAX,
            len,
        })?;
    check_array(array, offset, extent, len)
}
