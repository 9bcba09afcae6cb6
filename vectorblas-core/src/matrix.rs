//! Column-major matrix views over caller-owned flat buffers.
//!
//! A view never owns or reallocates its buffer. Element (i, j) of a
//! column-major matrix with leading dimension `ld` lives at
//! `offset + i + j * ld`; a transposed view swaps the roles of i and j.

use crate::error::{check_block, Result};
use crate::layout::{Layout, Transpose, Uplo};

/// Read-only view of `op(X)`, an `rows × cols` matrix.
///
/// `rows` and `cols` are the dimensions after the transpose is applied.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    offset: usize,
    rows: usize,
    cols: usize,
    ld: usize,
    trans: Transpose,
}

impl<'a, T: Copy> MatrixView<'a, T> {
    pub fn new(
        data: &'a [T],
        offset: usize,
        rows: usize,
        cols: usize,
        ld: usize,
        trans: Transpose,
    ) -> Self {
        Self {
            data,
            offset,
            rows,
            cols,
            ld,
            trans,
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn trans(&self) -> Transpose {
        self.trans
    }

    #[inline(always)]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Rows of the stored (untransposed) matrix.
    #[inline]
    pub fn physical_rows(&self) -> usize {
        match self.trans {
            Transpose::NoTrans => self.rows,
            Transpose::Trans => self.cols,
        }
    }

    /// Columns of the stored (untransposed) matrix.
    #[inline]
    pub fn physical_cols(&self) -> usize {
        match self.trans {
            Transpose::NoTrans => self.cols,
            Transpose::Trans => self.rows,
        }
    }

    /// Buffer index of logical element (i, j).
    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        // Transposed column-major storage reads as row-major.
        let layout = match self.trans {
            Transpose::NoTrans => Layout::ColMajor,
            Transpose::Trans => Layout::RowMajor,
        };
        self.offset + layout.index(i, j, self.ld)
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.index(i, j)]
    }

    /// Fail unless every stored element lies inside the buffer.
    ///
    /// An empty view touches nothing and always passes.
    pub fn check_bounds(&self, array: &'static str) -> Result<()> {
        let (pr, pc) = (self.physical_rows(), self.physical_cols());
        if pr == 0 || pc == 0 {
            return Ok(());
        }
        check_block(array, self.offset, pr, pc, self.ld, self.data.len())
    }
}

/// Mutable view of the output matrix C (`rows × cols`, never transposed).
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    offset: usize,
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a, T: Copy> MatrixViewMut<'a, T> {
    pub fn new(data: &'a mut [T], offset: usize, rows: usize, cols: usize, ld: usize) -> Self {
        Self {
            data,
            offset,
            rows,
            cols,
            ld,
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Buffer index of element (i, j).
    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        self.offset + Layout::ColMajor.index(i, j, self.ld)
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.index(i, j)]
    }

    /// Column `j`, `rows` elements long.
    #[inline]
    pub fn column_mut(&mut self, j: usize) -> &mut [T] {
        let start = self.offset + j * self.ld;
        &mut self.data[start..start + self.rows]
    }

    /// The whole backing buffer, for kernels that address C themselves.
    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }

    pub fn check_bounds(&self, array: &'static str) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Ok(());
        }
        check_block(
            array,
            self.offset,
            self.rows,
            self.cols,
            self.ld,
            self.data.len(),
        )
    }
}

/// Read-only view of a symmetric matrix of which only one triangle is
/// stored. The other triangle is never read.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricView<'a, T> {
    data: &'a [T],
    offset: usize,
    order: usize,
    ld: usize,
    uplo: Uplo,
}

impl<'a, T: Copy> SymmetricView<'a, T> {
    pub fn new(data: &'a [T], offset: usize, order: usize, ld: usize, uplo: Uplo) -> Self {
        Self {
            data,
            offset,
            order,
            ld,
            uplo,
        }
    }

    #[inline(always)]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline(always)]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn uplo(&self) -> Uplo {
        self.uplo
    }

    #[inline(always)]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Buffer index of logical element (i, j), resolved into the stored
    /// triangle.
    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        let layout = match self.uplo {
            Uplo::Upper => Layout::ColMajor,
            Uplo::Lower => Layout::RowMajor,
        };
        self.offset + layout.index(lo, hi, self.ld)
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.index(i, j)]
    }

    pub fn check_bounds(&self, array: &'static str) -> Result<()> {
        if self.order == 0 {
            return Ok(());
        }
        check_block(
            array,
            self.offset,
            self.order,
            self.order,
            self.ld,
            self.data.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_matrix_view_indexing() {
        // 2x3 column-major: [[1,3,5],[2,4,6]]
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let a = MatrixView::new(&data, 1, 2, 3, 2, Transpose::NoTrans);
        assert_eq!(a.get(0, 0), 1.0);
        assert_eq!(a.get(1, 2), 6.0);
        assert!(a.check_bounds("a").is_ok());

        // Same storage seen as its 3x2 transpose.
        let at = MatrixView::new(&data, 1, 3, 2, 2, Transpose::Trans);
        assert_eq!(at.physical_rows(), 2);
        assert_eq!(at.get(2, 1), 6.0);
        assert_eq!(at.get(1, 0), 3.0);
        assert!(at.check_bounds("a").is_ok());
    }

    #[test]
    fn test_matrix_view_out_of_bounds() {
        let data = [1.0f32; 6];
        let a = MatrixView::new(&data, 1, 2, 3, 2, Transpose::NoTrans);
        assert_eq!(
            a.check_bounds("a"),
            Err(Error::OutOfBounds {
                array: "a",
                index: 6,
                len: 6
            })
        );
        let empty = MatrixView::new(&data, 100, 0, 3, 2, Transpose::NoTrans);
        assert!(empty.check_bounds("a").is_ok());
    }

    #[test]
    fn test_check_bounds_huge_ld_is_an_error() {
        let huge = usize::MAX / 2 + 1;
        let data = [0.0f64; 8];
        let a = MatrixView::new(&data, 0, 1, 3, huge, Transpose::NoTrans);
        assert!(matches!(a.check_bounds("a"), Err(Error::OutOfBounds { array: "a", .. })));
        let s = SymmetricView::new(&data, 0, 3, huge, Uplo::Lower);
        assert!(s.check_bounds("a").is_err());
        let mut out = [0.0f64; 8];
        let c = MatrixViewMut::new(&mut out, 0, 1, 3, huge);
        assert!(c.check_bounds("c").is_err());
    }

    #[test]
    fn test_matrix_view_mut_columns() {
        let mut data = vec![0.0f64; 9];
        let mut c = MatrixViewMut::new(&mut data, 1, 2, 2, 4);
        c.column_mut(1).copy_from_slice(&[7.0, 8.0]);
        assert_eq!(c.get(0, 1), 7.0);
        assert!(c.check_bounds("c").is_ok());
        assert_eq!(data[5], 7.0);
        assert_eq!(data[6], 8.0);
    }

    #[test]
    fn test_symmetric_view_reads_stored_triangle_only() {
        // 3x3, ld = 3. Upper triangle holds the values; lower is poison.
        let nan = f64::NAN;
        let upper = [1.0, nan, nan, 2.0, 4.0, nan, 3.0, 5.0, 6.0];
        let s = SymmetricView::new(&upper, 0, 3, 3, Uplo::Upper);
        // Same matrix stored in the lower triangle.
        let lower = [1.0, 2.0, 3.0, nan, 4.0, 5.0, nan, nan, 6.0];
        let t = SymmetricView::new(&lower, 0, 3, 3, Uplo::Lower);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(s.get(i, j), t.get(i, j));
                assert_eq!(s.get(i, j), s.get(j, i));
            }
        }
        assert_eq!(s.get(2, 1), 5.0);
        assert!(s.check_bounds("a").is_ok());
    }
}
