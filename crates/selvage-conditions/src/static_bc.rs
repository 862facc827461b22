//! Boundary condition that freezes boundary points at their past values.
//!
//! # Semantics
//!
//! - Each boundary point of time level 0 is overwritten with the same
//!   point's value from time level 1, so the boundary never moves while
//!   the interior evolves.
//! - Requires at least two active time levels; anything shallower
//!   fails with [`ApplyError::InsufficientTimeLevels`].
//! - Takes no table parameters; all element types are supported.

use selvage_core::{ApplyError, VarCatalog};
use selvage_engine::{coalesce_runs, copy_elements, prepare_run};
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

/// The `static` boundary condition.
#[derive(Debug, Default)]
pub struct StaticBc;

impl StaticBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for StaticBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            let setup = prepare_run(ctx, run, None)?;
            for var in run.vars() {
                let levels = ctx
                    .patch()
                    .timelevels(var)
                    .ok_or(ApplyError::UnknownVariable { var })?;
                if levels < 2 {
                    return Err(ApplyError::InsufficientTimeLevels { var, found: levels });
                }
                for face in setup.faces() {
                    let slab = setup.slab(face);
                    let offsets: Vec<usize> = slab.iter().map(|point| point.offset).collect();
                    copy_elements(ctx.patch_mut(), var, 1, var, 0, &offsets)?;
                }
            }
        }
        Ok(())
    }
}
