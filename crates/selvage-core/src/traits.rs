//! Host capability traits for grid geometry, variable metadata, storage,
//! and extra-argument tables.
//!
//! The boundary system owns no grid state. Everything it needs from the
//! hosting solver arrives through these traits, and handlers reach them
//! through the apply context's single [`BoundaryPatch`] object.

use crate::elem::{ElemType, VarSlice, VarSliceMut};
use crate::error::TableError;
use crate::face::FaceSet;
use crate::id::{GroupId, TableHandle, VarId, VarRange};
use smallvec::SmallVec;

/// Per-axis point counts of a grid patch.
///
/// Uses `SmallVec<[usize; 3]>` so grids up to
/// [`MAX_DIM`](crate::face::MAX_DIM) dimensions never allocate.
pub type Extents = SmallVec<[usize; 3]>;

/// Geometry of the host's local grid patch.
///
/// One implementation describes one patch: its dimensionality, its
/// extents, and which faces end at the outer boundary of the global grid
/// rather than at an interprocess or symmetry edge.
pub trait GridInfo {
    /// Number of grid axes.
    fn dim(&self) -> u32;

    /// Points per axis actually computed on this patch.
    fn local_extent(&self) -> Extents;

    /// Points per axis as allocated. Flat buffer strides derive from
    /// these, axis 0 fastest.
    fn alloc_extent(&self) -> Extents;

    /// Faces of this patch lying on the outer boundary of the global grid
    /// (an explicit mask, not [`FaceSet::ALL`]).
    fn outer_boundary(&self) -> FaceSet;

    /// Faces claimed by a symmetry condition, which are never treated as
    /// physical.
    ///
    /// `None` means the symmetry service itself failed, which the
    /// application engine treats as fatal.
    fn symmetry_faces(&self) -> Option<FaceSet>;
}

/// Name and group metadata for the host's grid variables.
///
/// All lookups return `None` for ids and names the host does not know.
pub trait VarCatalog {
    /// Resolve a variable name to its id.
    fn var_index(&self, name: &str) -> Option<VarId>;

    /// Full name of a variable.
    fn var_name(&self, var: VarId) -> Option<String>;

    /// The group a variable belongs to.
    fn group_of(&self, var: VarId) -> Option<GroupId>;

    /// Resolve a group name to its id.
    fn group_index(&self, name: &str) -> Option<GroupId>;

    /// The contiguous range of a group's member variables.
    fn group_range(&self, group: GroupId) -> Option<VarRange>;

    /// Grid dimensionality shared by a group's variables.
    fn group_dim(&self, group: GroupId) -> Option<u32>;

    /// Element type of a variable.
    fn elem_type(&self, var: VarId) -> Option<ElemType>;

    /// Active storage time levels for a variable.
    fn timelevels(&self, var: VarId) -> Option<usize>;
}

/// Read and write access to variable storage.
///
/// Level 0 is the current time level, level 1 the previous. `None` means
/// storage is not active for that (variable, level) pair.
pub trait VarData {
    /// Read one (variable, time level) buffer.
    fn read(&self, var: VarId, level: usize) -> Option<VarSlice<'_>>;

    /// Open one (variable, time level) buffer for writing.
    fn write(&mut self, var: VarId, level: usize) -> Option<VarSliceMut<'_>>;
}

/// Kind of a table entry, for accessor dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Scalar integer.
    Int,
    /// Scalar real.
    Real,
    /// Integer array.
    IntArray,
    /// Character string.
    Str,
}

/// Typed accessors into the host's extra-argument tables.
///
/// Failures are sentinel values ([`TableError`]), never panics, matching
/// how hosts report unknown handles and absent keys.
pub trait ArgTables {
    /// Kind of the entry under `key`.
    fn query_kind(&self, table: TableHandle, key: &str) -> Result<TableKind, TableError>;

    /// Read a scalar integer entry.
    fn get_int(&self, table: TableHandle, key: &str) -> Result<i64, TableError>;

    /// Read a scalar real entry.
    fn get_real(&self, table: TableHandle, key: &str) -> Result<f64, TableError>;

    /// Fill `out` from an integer-array entry, up to `out.len()` values.
    ///
    /// Returns the entry's total length, which may exceed the number of
    /// values copied.
    fn get_int_array(
        &self,
        table: TableHandle,
        key: &str,
        out: &mut [i64],
    ) -> Result<usize, TableError>;

    /// Read a string entry.
    fn get_str(&self, table: TableHandle, key: &str) -> Result<String, TableError>;
}

/// The full host capability bundle handlers receive.
///
/// Blanket-implemented for any type providing all four capabilities, so
/// a host's patch object gets it for free.
pub trait BoundaryPatch: GridInfo + VarCatalog + VarData + ArgTables {}

impl<T: GridInfo + VarCatalog + VarData + ArgTables> BoundaryPatch for T {}
