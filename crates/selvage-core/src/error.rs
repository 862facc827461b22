//! Error and warning types for boundary-condition registration and
//! application.
//!
//! Organized by subsystem: registry (selection bookkeeping and dispatch),
//! apply (face-wise application), and table (extra-argument lookups).
//! Every discriminable failure cause gets its own variant so callers and
//! tests can tell them apart.

use crate::elem::ElemType;
use crate::face::{Face, FaceSet};
use crate::id::{TableHandle, VarId};
use std::error::Error;
use std::fmt;

/// Errors from selection-registry operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No boundary condition is registered under the given name.
    UnknownBc {
        /// The name that failed to resolve.
        name: String,
    },
    /// The invalid variable id (`VarId(0)`) was passed to select or clear.
    InvalidVariable,
    /// A variable name did not resolve in the host catalog.
    UnknownVariable {
        /// The name that failed to resolve.
        name: String,
    },
    /// A group id or name did not resolve in the host catalog.
    UnknownGroup {
        /// The group as given.
        name: String,
    },
    /// A boundary-condition handler returned an error during dispatch;
    /// dispatch stops at the first failure.
    HandlerFailed {
        /// Registry key of the failing handler.
        bc: String,
        /// The underlying application error.
        reason: ApplyError,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBc { name } => {
                write!(f, "no boundary condition registered under '{name}'")
            }
            Self::InvalidVariable => write!(f, "variable id 0 is reserved as invalid"),
            Self::UnknownVariable { name } => write!(f, "unknown variable '{name}'"),
            Self::UnknownGroup { name } => write!(f, "unknown group '{name}'"),
            Self::HandlerFailed { bc, reason } => {
                write!(f, "boundary condition '{bc}' failed: {reason}")
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HandlerFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors from face-wise boundary application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyError {
    /// The variable's grid dimensionality exceeds the supported ceiling.
    UnsupportedDimension {
        /// The offending dimensionality.
        dim: u32,
    },
    /// The face restriction names an axis outside the variable's grid.
    InvalidRestriction {
        /// The restricted face.
        face: Face,
        /// The variable's dimensionality.
        dim: u32,
    },
    /// A variable id did not resolve in the host catalog.
    UnknownVariable {
        /// The id that failed to resolve.
        var: VarId,
    },
    /// The boundary condition does not support the variable's element type.
    UnsupportedElemType {
        /// The unsupported element type.
        elem: ElemType,
    },
    /// Source and destination variables have different element types.
    ElemTypeMismatch {
        /// Destination element type.
        dest: ElemType,
        /// Source element type.
        src: ElemType,
    },
    /// No storage is active for a (variable, time level) pair.
    StorageUnavailable {
        /// The variable whose storage is missing.
        var: VarId,
        /// The time level requested.
        level: usize,
    },
    /// The `"BOUNDARY_WIDTH"` table entry could not be read.
    WidthArrayUnreadable {
        /// The table error behind the failure.
        reason: TableError,
    },
    /// The `"BOUNDARY_WIDTH"` entry is not exactly `2 * dim` integers long.
    WidthArrayWrongLength {
        /// Entry length found in the table.
        found: usize,
        /// Length required for the variable's grid.
        required: usize,
    },
    /// Copy requires an argument table supplying `"COPY_FROM"`, but the
    /// selection's handle does not reference one.
    BadCopyTable {
        /// The offending handle.
        table: TableHandle,
    },
    /// The copy table has no `"COPY_FROM"` entry.
    MissingCopySource,
    /// `"COPY_FROM"` did not resolve to a source variable.
    BadCopySource {
        /// What was found instead.
        reason: String,
    },
    /// Copying the previous time level requires at least two active levels.
    InsufficientTimeLevels {
        /// The variable lacking a previous level.
        var: VarId,
        /// Active time levels found.
        found: usize,
    },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDimension { dim } => {
                write!(f, "unsupported grid dimensionality {dim} (1-3 supported)")
            }
            Self::InvalidRestriction { face, dim } => {
                write!(f, "face restriction {face} outside a {dim}-dimensional grid")
            }
            Self::UnknownVariable { var } => write!(f, "unknown variable id {var}"),
            Self::UnsupportedElemType { elem } => {
                write!(f, "unsupported element type {elem}")
            }
            Self::ElemTypeMismatch { dest, src } => {
                write!(f, "element type mismatch: destination {dest}, source {src}")
            }
            Self::StorageUnavailable { var, level } => {
                write!(f, "no storage for variable {var} at time level {level}")
            }
            Self::WidthArrayUnreadable { reason } => {
                write!(f, "boundary width array unreadable: {reason}")
            }
            Self::WidthArrayWrongLength { found, required } => {
                write!(
                    f,
                    "boundary width array has {found} entries, need {required}"
                )
            }
            Self::BadCopyTable { table } => {
                write!(f, "copy requires an argument table, got handle {table}")
            }
            Self::MissingCopySource => write!(f, "copy table has no COPY_FROM entry"),
            Self::BadCopySource { reason } => {
                write!(f, "COPY_FROM does not name a usable source: {reason}")
            }
            Self::InsufficientTimeLevels { var, found } => {
                write!(
                    f,
                    "variable {var} has {found} active time level(s), need at least 2"
                )
            }
        }
    }
}

impl Error for ApplyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WidthArrayUnreadable { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Errors from extra-argument table lookups.
///
/// Sentinel results from the host's table service, never panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The handle does not reference a table.
    BadHandle,
    /// The table has no entry under the requested key.
    NoSuchKey,
    /// The entry exists but has the wrong kind for the accessor.
    WrongKind,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadHandle => write!(f, "bad table handle"),
            Self::NoSuchKey => write!(f, "no such table key"),
            Self::WrongKind => write!(f, "table entry has wrong kind"),
        }
    }
}

impl Error for TableError {}

/// Non-fatal diagnostics accumulated during application.
///
/// Warnings never stop execution. They collect on the apply context and
/// the host drains them after each phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyWarning {
    /// A selection carried an explicit face mask; the condition was applied
    /// to every eligible face regardless.
    FacesNotAll {
        /// The variable whose selection carried the mask.
        var: VarId,
        /// The mask as selected.
        faces: FaceSet,
    },
    /// A table lookup used an invalid handle; the key's built-in default
    /// was used instead.
    BadTableHandle {
        /// The key being looked up.
        key: &'static str,
        /// The offending handle.
        table: TableHandle,
    },
}

impl fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FacesNotAll { var, faces } => {
                write!(
                    f,
                    "variable {var} selected with face mask {faces}; \
                     applying to all eligible faces"
                )
            }
            Self::BadTableHandle { key, table } => {
                write!(f, "bad table handle {table} looking up '{key}'; using default")
            }
        }
    }
}
