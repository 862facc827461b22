//! Grid-variable element types and typed buffer views.

use std::fmt;

/// A complex number stored as a `(re, im)` component pair.
///
/// Component precision follows the variable's element type:
/// [`ElemType::Complex32`] variables store `Complex<f32>`,
/// [`ElemType::Complex64`] variables store `Complex<f64>`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T> {
    /// Real component.
    pub re: T,
    /// Imaginary component.
    pub im: T,
}

impl<T> Complex<T> {
    /// Construct from components.
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Storage type of one grid-variable element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElemType {
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// 32-bit float.
    Real32,
    /// 64-bit float.
    Real64,
    /// Complex with 32-bit float components.
    Complex32,
    /// Complex with 64-bit float components.
    Complex64,
}

impl ElemType {
    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Int32 | Self::Real32 => 4,
            Self::Int64 | Self::Real64 | Self::Complex32 => 8,
            Self::Complex64 => 16,
        }
    }

    /// Returns `true` for the real floating-point types.
    pub fn is_real(self) -> bool {
        matches!(self, Self::Real32 | Self::Real64)
    }
}

impl fmt::Display for ElemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => write!(f, "byte"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Real32 => write!(f, "real32"),
            Self::Real64 => write!(f, "real64"),
            Self::Complex32 => write!(f, "complex32"),
            Self::Complex64 => write!(f, "complex64"),
        }
    }
}

/// A read-only view of one (variable, time level) buffer, one variant per
/// element type.
#[derive(Clone, Copy, Debug)]
pub enum VarSlice<'a> {
    /// Bytes.
    Byte(&'a [u8]),
    /// 32-bit integers.
    Int32(&'a [i32]),
    /// 64-bit integers.
    Int64(&'a [i64]),
    /// 32-bit floats.
    Real32(&'a [f32]),
    /// 64-bit floats.
    Real64(&'a [f64]),
    /// Complex numbers with 32-bit components.
    Complex32(&'a [Complex<f32>]),
    /// Complex numbers with 64-bit components.
    Complex64(&'a [Complex<f64>]),
}

impl VarSlice<'_> {
    /// The element type of the underlying buffer.
    pub fn elem_type(&self) -> ElemType {
        match self {
            Self::Byte(_) => ElemType::Byte,
            Self::Int32(_) => ElemType::Int32,
            Self::Int64(_) => ElemType::Int64,
            Self::Real32(_) => ElemType::Real32,
            Self::Real64(_) => ElemType::Real64,
            Self::Complex32(_) => ElemType::Complex32,
            Self::Complex64(_) => ElemType::Complex64,
        }
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(s) => s.len(),
            Self::Int32(s) => s.len(),
            Self::Int64(s) => s.len(),
            Self::Real32(s) => s.len(),
            Self::Real64(s) => s.len(),
            Self::Complex32(s) => s.len(),
            Self::Complex64(s) => s.len(),
        }
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A mutable view of one (variable, time level) buffer, one variant per
/// element type.
#[derive(Debug)]
pub enum VarSliceMut<'a> {
    /// Bytes.
    Byte(&'a mut [u8]),
    /// 32-bit integers.
    Int32(&'a mut [i32]),
    /// 64-bit integers.
    Int64(&'a mut [i64]),
    /// 32-bit floats.
    Real32(&'a mut [f32]),
    /// 64-bit floats.
    Real64(&'a mut [f64]),
    /// Complex numbers with 32-bit components.
    Complex32(&'a mut [Complex<f32>]),
    /// Complex numbers with 64-bit components.
    Complex64(&'a mut [Complex<f64>]),
}

impl VarSliceMut<'_> {
    /// The element type of the underlying buffer.
    pub fn elem_type(&self) -> ElemType {
        match self {
            Self::Byte(_) => ElemType::Byte,
            Self::Int32(_) => ElemType::Int32,
            Self::Int64(_) => ElemType::Int64,
            Self::Real32(_) => ElemType::Real32,
            Self::Real64(_) => ElemType::Real64,
            Self::Complex32(_) => ElemType::Complex32,
            Self::Complex64(_) => ElemType::Complex64,
        }
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(s) => s.len(),
            Self::Int32(s) => s.len(),
            Self::Int64(s) => s.len(),
            Self::Real32(s) => s.len(),
            Self::Real64(s) => s.len(),
            Self::Complex32(s) => s.len(),
            Self::Complex64(s) => s.len(),
        }
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
