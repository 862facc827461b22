//! Synchronization phases.

use std::fmt;

/// When during a synchronization cycle a boundary condition runs.
///
/// The phase is a property of the BC registration; every selection made
/// for a BC inherits the phase its handler was registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    /// Applied before ghost-zone synchronization.
    Before,
    /// Applied after ghost-zone synchronization.
    After,
}

impl SyncPhase {
    /// Both phases in array order.
    pub const BOTH: [SyncPhase; 2] = [SyncPhase::Before, SyncPhase::After];

    /// Index into phase-dimensioned arrays (0 = before, 1 = after).
    pub fn index(self) -> usize {
        match self {
            Self::Before => 0,
            Self::After => 1,
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}
