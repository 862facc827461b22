//! Strongly-typed identifiers for grid variables, groups, and argument tables.

use std::fmt;

/// Identifies a grid variable within the host's variable catalog.
///
/// Variable indices are assigned by the host at startup and are stable for
/// the life of the process. `VarId(0)` is reserved as the invalid sentinel
/// and is rejected by selection and clear calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

impl VarId {
    /// The reserved invalid variable id.
    pub const INVALID: VarId = VarId(0);

    /// Returns `true` if this id is not the invalid sentinel.
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VarId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a variable group within the host's variable catalog.
///
/// Groups own a contiguous [`VarRange`] of member variables; all members
/// share the group's dimensionality and element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Opaque handle into the host's extra-argument table service.
///
/// [`TableHandle::NONE`] (−1) means "no table supplied". Table reads
/// through a negative handle fail with
/// [`TableError::BadHandle`](crate::error::TableError::BadHandle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableHandle(pub i32);

impl TableHandle {
    /// The "no table" sentinel.
    pub const NONE: TableHandle = TableHandle(-1);

    /// Returns `true` if this handle does not reference a table
    /// (the sentinel, or any other negative value).
    pub fn is_none(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TableHandle {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// A contiguous range of variable ids, as owned by a variable group.
///
/// Group members are numbered consecutively starting at `first`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarRange {
    /// First member variable.
    pub first: VarId,
    /// Number of member variables.
    pub len: u32,
}

impl VarRange {
    /// Returns `true` if the range contains no variables.
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Check whether the range contains a variable id.
    pub fn contains(self, var: VarId) -> bool {
        var.0 >= self.first.0 && var.0 - self.first.0 < self.len
    }

    /// Iterate over the member variable ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = VarId> {
        (self.first.0..self.first.0 + self.len).map(VarId)
    }
}
