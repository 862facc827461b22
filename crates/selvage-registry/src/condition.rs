//! The boundary-condition handler contract.

use crate::context::ApplyContext;
use selvage_core::{ApplyError, FaceSet, TableHandle, VarId, WidthSpec};

/// One handler's slice of a phase's selections, as parallel arrays.
///
/// Entry `i` describes one selection: the variable, its face mask, its
/// width specification, and its extra-argument table.
#[derive(Clone, Copy, Debug)]
pub struct SelectionBatch<'a> {
    /// Selected variables.
    pub vars: &'a [VarId],
    /// Face mask of each selection.
    pub faces: &'a [FaceSet],
    /// Width specification of each selection.
    pub widths: &'a [WidthSpec],
    /// Argument table of each selection.
    pub tables: &'a [TableHandle],
}

impl SelectionBatch<'_> {
    /// Number of selections in the batch.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if the batch holds no selections.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// A boundary condition: fills boundary points of the variables a batch
/// selects.
///
/// Implementations are registered under a name and invoked once per
/// dispatch with every selection naming them. They hold no state across
/// calls; everything they need from the host arrives through the
/// [`ApplyContext`].
pub trait BoundaryCondition: Send {
    /// Apply the condition to every selection in `batch`.
    ///
    /// The first failing selection stops the handler; an error also
    /// stops the dispatch of the remaining handlers in the phase.
    fn apply(
        &self,
        ctx: &mut ApplyContext<'_>,
        batch: SelectionBatch<'_>,
    ) -> Result<(), ApplyError>;
}
