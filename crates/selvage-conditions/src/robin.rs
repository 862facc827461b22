//! Robin boundary condition: power-law decay towards an asymptotic value.
//!
//! # Semantics
//!
//! - Each boundary point is set to
//!   `finf + (s0 - finf) / (1 + k)^n`, where `s0` is the first interior
//!   point of the boundary point's grid line and `k` its distance from
//!   that point in grid steps.
//! - `finf` comes from the table under [`FINF_KEY`] (default `0.0`) and
//!   `n` from [`DECAY_POWER_KEY`] (default `1`); both are optional, see
//!   [`crate::params`].
//! - Only real-valued variables are supported.

use selvage_core::{ApplyError, BoundaryPatch, VarData, VarId, VarSliceMut};
use selvage_engine::{coalesce_runs, prepare_run};
use selvage_grid::FaceSlab;
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

use crate::params::{int_param, real_param};

/// Table key holding the asymptotic value.
pub const FINF_KEY: &str = "FINF";

/// Table key holding the integer decay power.
pub const DECAY_POWER_KEY: &str = "DECAY_POWER";

/// The `robin` boundary condition.
#[derive(Debug, Default)]
pub struct RobinBc;

impl RobinBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for RobinBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            let setup = prepare_run(ctx, run, None)?;
            let finf = real_param(ctx, run.table, FINF_KEY, 0.0);
            let power = int_param(ctx, run.table, DECAY_POWER_KEY, 1) as i32;
            for var in run.vars() {
                for face in setup.faces() {
                    let slab = setup.slab(face);
                    relax(ctx.patch_mut(), var, &slab, finf, power)?;
                }
            }
        }
        Ok(())
    }
}

fn relax(
    patch: &mut dyn BoundaryPatch,
    var: VarId,
    slab: &FaceSlab,
    finf: f64,
    power: i32,
) -> Result<(), ApplyError> {
    fn decay<T: Copy>(
        data: &mut [T],
        slab: &FaceSlab,
        finf: f64,
        power: i32,
        to: impl Fn(T) -> f64,
        from: impl Fn(f64) -> T,
    ) {
        for point in slab {
            let s0 = to(data[slab.interior_offset(point)]);
            let falloff = f64::from(1 + point.inward_steps).powi(power);
            data[point.offset] = from(finf + (s0 - finf) / falloff);
        }
    }
    let mut out = patch
        .write(var, 0)
        .ok_or(ApplyError::StorageUnavailable { var, level: 0 })?;
    match &mut out {
        VarSliceMut::Real32(data) => decay(data, slab, finf, power, f64::from, |x| x as f32),
        VarSliceMut::Real64(data) => decay(data, slab, finf, power, |x| x, |x| x),
        other => {
            return Err(ApplyError::UnsupportedElemType {
                elem: other.elem_type(),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use selvage_core::{ElemType, FaceSet, TableHandle, WidthSpec};
    use selvage_test_utils::MockPatch;

    fn apply_to(
        patch: &mut MockPatch,
        var: VarId,
        table: TableHandle,
        width: u32,
    ) -> Result<(), ApplyError> {
        let vars = [var];
        let faces = [FaceSet::ALL];
        let widths = [WidthSpec::Uniform(width)];
        let tables = [table];
        let batch = SelectionBatch {
            vars: &vars,
            faces: &faces,
            widths: &widths,
            tables: &tables,
        };
        let mut ctx = ApplyContext::new(patch);
        RobinBc::new().apply(&mut ctx, batch)
    }

    #[test]
    fn decays_towards_the_asymptotic_value() {
        let mut patch = MockPatch::builder()
            .extent(&[5])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        patch.set_real64(var, 0, &[0.0, 0.0, 13.0, 0.0, 0.0]);
        let table = patch.add_table();
        patch.table_set_real(table, FINF_KEY, 1.0);

        apply_to(&mut patch, var, table, 2).unwrap();
        // With finf = 1 and s0 = 13: one step out gives 1 + 12/2 = 7,
        // two steps out 1 + 12/3 = 5, symmetrically on both faces.
        assert_eq!(patch.real64(var, 0), &[5.0, 7.0, 13.0, 7.0, 5.0]);
    }

    #[test]
    fn decay_power_steepens_the_falloff() {
        let mut patch = MockPatch::builder()
            .extent(&[5])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        patch.set_real64(var, 0, &[0.0, 0.0, 37.0, 0.0, 0.0]);
        let table = patch.add_table();
        patch.table_set_real(table, FINF_KEY, 1.0);
        patch.table_set_int(table, DECAY_POWER_KEY, 2);

        apply_to(&mut patch, var, table, 2).unwrap();
        // (1 + k)^2 falloff: 1 + 36/4 = 10, then 1 + 36/9 = 5.
        assert_eq!(patch.real64(var, 0), &[5.0, 10.0, 37.0, 10.0, 5.0]);
    }

    #[test]
    fn defaults_decay_to_zero_with_unit_power() {
        let mut patch = MockPatch::builder()
            .extent(&[3])
            .group("g", ElemType::Real32, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        patch.set_real32(var, 0, &[0.0, 8.0, 0.0]);

        apply_to(&mut patch, var, TableHandle::NONE, 1).unwrap();
        assert_eq!(patch.real32(var, 0), &[4.0, 8.0, 4.0]);
    }

    #[test]
    fn integer_variables_are_rejected() {
        let mut patch = MockPatch::builder()
            .extent(&[4])
            .group("g", ElemType::Int32, 1, &["g::n"])
            .build();
        let var = patch.var("g::n");
        let err = apply_to(&mut patch, var, TableHandle::NONE, 1).unwrap_err();
        assert_eq!(err, ApplyError::UnsupportedElemType { elem: ElemType::Int32 });
    }
}
