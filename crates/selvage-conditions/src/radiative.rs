//! Radiative boundary condition: geometric extrapolation of an
//! outgoing wave.
//!
//! # Semantics
//!
//! - For each boundary point's grid line, the two outermost interior
//!   points `s1` (deeper) and `s0` (outermost) fix a per-step decay
//!   ratio `r = (s0 - f0) / (s1 - f0)` towards the asymptotic value
//!   `f0`, clamped to `[0, 1]` so the extrapolation never grows.
//!   A boundary point `k` steps past `s0` is set to
//!   `f0 + (s0 - f0) * r^k`.
//! - Lines too short for a second interior point fall back to `r = 1`,
//!   which continues `s0` unchanged.
//! - `f0` comes from the table under [`LIMIT_KEY`] (default `0.0`);
//!   see [`crate::params`]. Only real-valued variables are supported.

use selvage_core::{ApplyError, BoundaryPatch, VarData, VarId, VarSliceMut};
use selvage_engine::{coalesce_runs, prepare_run};
use selvage_grid::FaceSlab;
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

use crate::params::real_param;

/// Table key holding the asymptotic value of the outgoing wave.
pub const LIMIT_KEY: &str = "LIMIT";

/// The `radiative` boundary condition.
#[derive(Debug, Default)]
pub struct RadiativeBc;

impl RadiativeBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for RadiativeBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            let setup = prepare_run(ctx, run, None)?;
            let limit = real_param(ctx, run.table, LIMIT_KEY, 0.0);
            for var in run.vars() {
                for face in setup.faces() {
                    let slab = setup.slab(face);
                    radiate(ctx.patch_mut(), var, &slab, limit)?;
                }
            }
        }
        Ok(())
    }
}

fn radiate(
    patch: &mut dyn BoundaryPatch,
    var: VarId,
    slab: &FaceSlab,
    limit: f64,
) -> Result<(), ApplyError> {
    fn extrapolate<T: Copy>(
        data: &mut [T],
        slab: &FaceSlab,
        limit: f64,
        to: impl Fn(T) -> f64,
        from: impl Fn(f64) -> T,
    ) {
        for point in slab {
            let interior = slab.interior_offset(point);
            let s0 = to(data[interior]);
            let ratio = if slab.has_second_interior() {
                let deeper = (interior as isize + slab.inward_stride()) as usize;
                let denom = to(data[deeper]) - limit;
                if denom == 0.0 {
                    1.0
                } else {
                    ((s0 - limit) / denom).clamp(0.0, 1.0)
                }
            } else {
                1.0
            };
            let value = limit + (s0 - limit) * ratio.powi(point.inward_steps as i32);
            data[point.offset] = from(value);
        }
    }
    let mut out = patch
        .write(var, 0)
        .ok_or(ApplyError::StorageUnavailable { var, level: 0 })?;
    match &mut out {
        VarSliceMut::Real32(data) => extrapolate(data, slab, limit, f64::from, |x| x as f32),
        VarSliceMut::Real64(data) => extrapolate(data, slab, limit, |x| x, |x| x),
        other => {
            return Err(ApplyError::UnsupportedElemType {
                elem: other.elem_type(),
            })
        }
    }
    Ok(())
}
