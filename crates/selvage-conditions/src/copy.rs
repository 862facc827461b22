//! Boundary condition that copies boundary points from another variable.
//!
//! # Semantics
//!
//! - The source variable is named by the [`COPY_FROM_KEY`] table entry,
//!   either as a full variable name (string) or as a variable index
//!   (integer). Unlike the optional parameters of other conditions,
//!   `copy` cannot run without it, so table problems are hard errors.
//! - Source and destination must share an element type; the source is
//!   read at time level 0 and must have storage.
//! - Every destination boundary point takes the source's value at the
//!   same grid point.

use selvage_core::{
    ApplyError, ArgTables, BoundaryPatch, TableError, TableHandle, TableKind, VarCatalog, VarId,
};
use selvage_engine::{coalesce_runs, copy_elements, prepare_run};
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

/// Table key naming the source variable.
pub const COPY_FROM_KEY: &str = "COPY_FROM";

/// The `copy` boundary condition.
#[derive(Debug, Default)]
pub struct CopyBc;

impl CopyBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for CopyBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            let setup = prepare_run(ctx, run, None)?;
            let src = resolve_source(ctx.patch(), run.table)?;
            let src_elem = ctx
                .patch()
                .elem_type(src)
                .ok_or(ApplyError::UnknownVariable { var: src })?;
            let dest_elem = ctx
                .patch()
                .elem_type(run.first)
                .ok_or(ApplyError::UnknownVariable { var: run.first })?;
            if src_elem != dest_elem {
                return Err(ApplyError::ElemTypeMismatch {
                    dest: dest_elem,
                    src: src_elem,
                });
            }
            for var in run.vars() {
                for face in setup.faces() {
                    let slab = setup.slab(face);
                    let offsets: Vec<usize> = slab.iter().map(|point| point.offset).collect();
                    copy_elements(ctx.patch_mut(), src, 0, var, 0, &offsets)?;
                }
            }
        }
        Ok(())
    }
}

/// Resolve the `COPY_FROM` entry to a source variable.
fn resolve_source(patch: &dyn BoundaryPatch, table: TableHandle) -> Result<VarId, ApplyError> {
    if table.is_none() {
        return Err(ApplyError::BadCopyTable { table });
    }
    match patch.query_kind(table, COPY_FROM_KEY) {
        Ok(TableKind::Str) => {
            let name = patch
                .get_str(table, COPY_FROM_KEY)
                .map_err(|_| ApplyError::BadCopyTable { table })?;
            patch
                .var_index(&name)
                .ok_or_else(|| ApplyError::BadCopySource {
                    reason: format!("no variable named '{name}'"),
                })
        }
        Ok(TableKind::Int) => {
            let index = patch
                .get_int(table, COPY_FROM_KEY)
                .map_err(|_| ApplyError::BadCopyTable { table })?;
            u32::try_from(index)
                .ok()
                .map(VarId)
                .filter(|var| var.is_valid() && patch.group_of(*var).is_some())
                .ok_or_else(|| ApplyError::BadCopySource {
                    reason: format!("variable index {index} out of range"),
                })
        }
        Ok(_) => Err(ApplyError::BadCopySource {
            reason: "COPY_FROM must name a variable or give its index".to_string(),
        }),
        Err(TableError::NoSuchKey) => Err(ApplyError::MissingCopySource),
        Err(_) => Err(ApplyError::BadCopyTable { table }),
    }
}
