//! Host access and warning accumulation for one dispatch.

use selvage_core::{ApplyWarning, BoundaryPatch};

/// What a handler sees while applying: the host's patch object plus a
/// warning accumulator.
///
/// Handlers and the application engine reach grid geometry, variable
/// metadata, storage, and argument tables only through this context.
/// Non-fatal diagnostics collect here; the host drains them after each
/// phase and decides how loudly to report them.
pub struct ApplyContext<'a> {
    patch: &'a mut dyn BoundaryPatch,
    warnings: Vec<ApplyWarning>,
}

impl<'a> ApplyContext<'a> {
    /// Wrap a host patch for one dispatch.
    pub fn new(patch: &'a mut dyn BoundaryPatch) -> Self {
        Self {
            patch,
            warnings: Vec::new(),
        }
    }

    /// The host patch.
    pub fn patch(&self) -> &dyn BoundaryPatch {
        &*self.patch
    }

    /// The host patch, mutably, for storage writes.
    pub fn patch_mut(&mut self) -> &mut dyn BoundaryPatch {
        self.patch
    }

    /// Record a non-fatal diagnostic.
    pub fn warn(&mut self, warning: ApplyWarning) {
        self.warnings.push(warning);
    }

    /// Warnings recorded so far, in order.
    pub fn warnings(&self) -> &[ApplyWarning] {
        &self.warnings
    }

    /// Remove and return all recorded warnings.
    pub fn drain_warnings(&mut self) -> Vec<ApplyWarning> {
        std::mem::take(&mut self.warnings)
    }
}
