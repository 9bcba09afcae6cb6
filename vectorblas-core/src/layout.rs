//! BLAS flag enumerations: layout, transpose, side and triangle.
//!
//! The engine itself is column-major. Flags arrive either as typed values or
//! as netlib-style single-character strings, which are decoded once at the
//! entry point and threaded through as enums.

/// Memory layout for matrices (CBLAS convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    RowMajor = 101,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    #[default]
    ColMajor = 102,
}

/// Transpose operation for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Transpose {
    /// No transpose.
    #[default]
    NoTrans = 111,
    /// Transpose.
    Trans = 112,
}

/// BLAS triangle specifier (upper/lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Uplo {
    #[default]
    Upper = 121,
    Lower = 122,
}

/// BLAS side specifier (left/right multiplication).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Side {
    #[default]
    Left = 141,
    Right = 142,
}

/// First character of a flag string, upper-cased. BLAS only looks at the
/// first character, so `"n"`, `"N"` and `"NoTrans"` are all the same flag.
#[inline]
fn flag_char(flag: &str) -> Option<char> {
    flag.chars().next().map(|c| c.to_ascii_uppercase())
}

impl Layout {
    /// Linear index into a flat array for element (i, j).
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }
}

impl Transpose {
    /// Decode a `'N'` / `'T'` flag.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag_char(flag)? {
            'N' => Some(Transpose::NoTrans),
            'T' => Some(Transpose::Trans),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_trans(self) -> bool {
        self == Transpose::Trans
    }

    /// The opposite operation.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Transpose::NoTrans => Transpose::Trans,
            Transpose::Trans => Transpose::NoTrans,
        }
    }
}

impl Uplo {
    /// Decode a `'U'` / `'L'` flag.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag_char(flag)? {
            'U' => Some(Uplo::Upper),
            'L' => Some(Uplo::Lower),
            _ => None,
        }
    }

    /// Upper storage of a matrix is lower storage of its transpose.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
        }
    }
}

impl Side {
    /// Decode a `'L'` / `'R'` flag.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag_char(flag)? {
            'L' => Some(Side::Left),
            'R' => Some(Side::Right),
            _ => None,
        }
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
