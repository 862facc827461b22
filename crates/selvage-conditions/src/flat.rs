//! Boundary condition that extends the outermost interior point.
//!
//! # Semantics
//!
//! - Every boundary point takes the value of the first interior point
//!   of its own grid line, so each line ends in a constant plateau
//!   (zero normal gradient).
//! - Takes no table parameters; all element types are supported.

use selvage_core::{ApplyError, BoundaryPatch, VarData, VarId, VarSliceMut};
use selvage_engine::{coalesce_runs, prepare_run};
use selvage_grid::FaceSlab;
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

/// The `flat` boundary condition.
#[derive(Debug, Default)]
pub struct FlatBc;

impl FlatBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for FlatBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            let setup = prepare_run(ctx, run, None)?;
            for var in run.vars() {
                for face in setup.faces() {
                    let slab = setup.slab(face);
                    extend(ctx.patch_mut(), var, &slab)?;
                }
            }
        }
        Ok(())
    }
}

fn extend(patch: &mut dyn BoundaryPatch, var: VarId, slab: &FaceSlab) -> Result<(), ApplyError> {
    fn plateau<T: Copy>(data: &mut [T], slab: &FaceSlab) {
        for point in slab {
            data[point.offset] = data[slab.interior_offset(point)];
        }
    }
    let mut out = patch
        .write(var, 0)
        .ok_or(ApplyError::StorageUnavailable { var, level: 0 })?;
    match &mut out {
        VarSliceMut::Byte(data) => plateau(data, slab),
        VarSliceMut::Int32(data) => plateau(data, slab),
        VarSliceMut::Int64(data) => plateau(data, slab),
        VarSliceMut::Real32(data) => plateau(data, slab),
        VarSliceMut::Real64(data) => plateau(data, slab),
        VarSliceMut::Complex32(data) => plateau(data, slab),
        VarSliceMut::Complex64(data) => plateau(data, slab),
    }
    Ok(())
}
