//! Boundary condition that claims a boundary without writing to it.
//!
//! # Semantics
//!
//! - Selections still pass the full validation path (coalescing, width
//!   resolution, face classification), but no storage is touched.
//! - Used for variables whose boundary is maintained elsewhere, e.g.
//!   by an evolution scheme that updates every point, while keeping the
//!   selection bookkeeping honest.

use selvage_core::ApplyError;
use selvage_engine::{coalesce_runs, prepare_run};
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

/// The `none` boundary condition.
#[derive(Debug, Default)]
pub struct NoneBc;

impl NoneBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for NoneBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            prepare_run(ctx, run, None)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selvage_core::{ElemType, FaceSet, TableHandle, VarId, WidthSpec};
    use selvage_test_utils::MockPatch;

    #[test]
    fn validates_without_touching_storage() {
        let mut patch = MockPatch::builder()
            .extent(&[4])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        patch.set_real64(var, 0, &[1.0, 2.0, 3.0, 4.0]);

        let vars = [var];
        let faces = [FaceSet::ALL];
        let widths = [WidthSpec::Uniform(1)];
        let tables = [TableHandle::NONE];
        let batch = SelectionBatch {
            vars: &vars,
            faces: &faces,
            widths: &widths,
            tables: &tables,
        };
        let mut ctx = ApplyContext::new(&mut patch);
        NoneBc::new().apply(&mut ctx, batch).unwrap();
        drop(ctx);
        assert_eq!(patch.real64(var, 0), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn still_rejects_unknown_variables() {
        let mut patch = MockPatch::builder().extent(&[4]).build();
        let vars = [VarId(7)];
        let faces = [FaceSet::ALL];
        let widths = [WidthSpec::Uniform(1)];
        let tables = [TableHandle::NONE];
        let batch = SelectionBatch {
            vars: &vars,
            faces: &faces,
            widths: &widths,
            tables: &tables,
        };
        let mut ctx = ApplyContext::new(&mut patch);
        let err = NoneBc::new().apply(&mut ctx, batch).unwrap_err();
        assert_eq!(err, ApplyError::UnknownVariable { var: VarId(7) });
    }
}
