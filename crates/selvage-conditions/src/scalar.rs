//! Boundary condition that sets every boundary point to a constant.
//!
//! # Semantics
//!
//! - The constant is read from the selection's argument table under
//!   [`SCALAR_KEY`] and defaults to `0.0` when absent; see
//!   [`crate::params`] for how table problems are handled.
//! - All element types are supported. Integer types truncate the
//!   constant; complex types take it as the real part with a zero
//!   imaginary part.

use selvage_core::{ApplyError, BoundaryPatch, Complex, VarData, VarId, VarSliceMut};
use selvage_engine::{coalesce_runs, prepare_run};
use selvage_grid::FaceSlab;
use selvage_registry::{ApplyContext, BoundaryCondition, SelectionBatch};

use crate::params::real_param;

/// Table key holding the fill constant.
pub const SCALAR_KEY: &str = "SCALAR";

/// The `scalar` boundary condition.
#[derive(Debug, Default)]
pub struct ScalarBc;

impl ScalarBc {
    /// Create the condition.
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryCondition for ScalarBc {
    fn apply(&self, ctx: &mut ApplyContext<'_>, batch: SelectionBatch<'_>) -> Result<(), ApplyError> {
        let runs = coalesce_runs(ctx.patch(), batch)?;
        for run in &runs {
            let setup = prepare_run(ctx, run, None)?;
            let value = real_param(ctx, run.table, SCALAR_KEY, 0.0);
            for var in run.vars() {
                for face in setup.faces() {
                    let slab = setup.slab(face);
                    fill(ctx.patch_mut(), var, &slab, value)?;
                }
            }
        }
        Ok(())
    }
}

fn fill(
    patch: &mut dyn BoundaryPatch,
    var: VarId,
    slab: &FaceSlab,
    value: f64,
) -> Result<(), ApplyError> {
    let mut out = patch
        .write(var, 0)
        .ok_or(ApplyError::StorageUnavailable { var, level: 0 })?;
    match &mut out {
        VarSliceMut::Byte(data) => {
            for point in slab {
                data[point.offset] = value as u8;
            }
        }
        VarSliceMut::Int32(data) => {
            for point in slab {
                data[point.offset] = value as i32;
            }
        }
        VarSliceMut::Int64(data) => {
            for point in slab {
                data[point.offset] = value as i64;
            }
        }
        VarSliceMut::Real32(data) => {
            for point in slab {
                data[point.offset] = value as f32;
            }
        }
        VarSliceMut::Real64(data) => {
            for point in slab {
                data[point.offset] = value;
            }
        }
        VarSliceMut::Complex32(data) => {
            for point in slab {
                data[point.offset] = Complex::new(value as f32, 0.0);
            }
        }
        VarSliceMut::Complex64(data) => {
            for point in slab {
                data[point.offset] = Complex::new(value, 0.0);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use selvage_core::{ApplyWarning, ElemType, FaceSet, TableHandle, WidthSpec};
    use selvage_test_utils::MockPatch;

    fn apply_to(
        patch: &mut MockPatch,
        vars: &[VarId],
        table: TableHandle,
        width: u32,
    ) -> Vec<ApplyWarning> {
        let faces = vec![FaceSet::ALL; vars.len()];
        let widths = vec![WidthSpec::Uniform(width); vars.len()];
        let tables = vec![table; vars.len()];
        let batch = SelectionBatch {
            vars,
            faces: &faces,
            widths: &widths,
            tables: &tables,
        };
        let mut ctx = ApplyContext::new(patch);
        ScalarBc::new().apply(&mut ctx, batch).unwrap();
        ctx.drain_warnings()
    }

    #[test]
    fn fills_both_faces_and_leaves_the_interior() {
        let mut patch = MockPatch::builder()
            .extent(&[6])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        let table = patch.add_table();
        patch.table_set_real(table, SCALAR_KEY, 5.0);
        patch.set_real64(var, 0, &[1.0; 6]);

        let warnings = apply_to(&mut patch, &[var], table, 2);
        assert!(warnings.is_empty());
        assert_eq!(patch.real64(var, 0), &[5.0, 5.0, 1.0, 1.0, 5.0, 5.0]);
    }

    #[test]
    fn missing_key_defaults_to_zero_without_warning() {
        let mut patch = MockPatch::builder()
            .extent(&[4])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        let table = patch.add_table();
        patch.set_real64(var, 0, &[9.0; 4]);

        let warnings = apply_to(&mut patch, &[var], table, 1);
        assert!(warnings.is_empty());
        assert_eq!(patch.real64(var, 0), &[0.0, 9.0, 9.0, 0.0]);
    }

    #[test]
    fn unreadable_value_warns_and_defaults() {
        let mut patch = MockPatch::builder()
            .extent(&[4])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        let table = patch.add_table();
        patch.table_set_str(table, SCALAR_KEY, "five");

        let warnings = apply_to(&mut patch, &[var], table, 1);
        assert_eq!(
            warnings,
            vec![ApplyWarning::BadTableHandle {
                key: SCALAR_KEY,
                table,
            }]
        );
    }

    #[test]
    fn complex_variables_get_a_purely_real_fill() {
        let mut patch = MockPatch::builder()
            .extent(&[3])
            .group("g", ElemType::Complex64, 1, &["g::psi"])
            .build();
        let var = patch.var("g::psi");
        let table = patch.add_table();
        patch.table_set_real(table, SCALAR_KEY, 2.5);

        apply_to(&mut patch, &[var], table, 1);
        let data = patch.complex64(var, 0);
        assert_eq!(data[0], Complex::new(2.5, 0.0));
        assert_eq!(data[1], Complex::new(0.0, 0.0));
        assert_eq!(data[2], Complex::new(2.5, 0.0));
    }

    #[test]
    fn integer_variables_truncate_the_constant() {
        let mut patch = MockPatch::builder()
            .extent(&[3])
            .group("g", ElemType::Int32, 1, &["g::n"])
            .build();
        let var = patch.var("g::n");
        let table = patch.add_table();
        patch.table_set_real(table, SCALAR_KEY, 7.9);

        apply_to(&mut patch, &[var], table, 1);
        assert_eq!(patch.int32(var, 0), &[7, 0, 7]);
    }

    #[test]
    fn two_dimensional_fill_covers_edges_only() {
        let mut patch = MockPatch::builder()
            .extent(&[4, 3])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        let table = patch.add_table();
        patch.table_set_real(table, SCALAR_KEY, 1.0);

        apply_to(&mut patch, &[var], table, 1);
        #[rustfmt::skip]
        let expected = [
            1.0, 1.0, 1.0, 1.0,
            1.0, 0.0, 0.0, 1.0,
            1.0, 1.0, 1.0, 1.0,
        ];
        assert_eq!(patch.real64(var, 0), &expected);
    }

    #[test]
    fn dropped_storage_is_an_error() {
        let mut patch = MockPatch::builder()
            .extent(&[4])
            .group("g", ElemType::Real64, 1, &["g::f"])
            .build();
        let var = patch.var("g::f");
        patch.drop_storage(var);

        let faces = [FaceSet::ALL];
        let widths = [WidthSpec::Uniform(1)];
        let tables = [TableHandle::NONE];
        let batch = SelectionBatch {
            vars: &[var],
            faces: &faces,
            widths: &widths,
            tables: &tables,
        };
        let mut ctx = ApplyContext::new(&mut patch);
        let err = ScalarBc::new().apply(&mut ctx, batch).unwrap_err();
        assert_eq!(err, ApplyError::StorageUnavailable { var, level: 0 });
    }
}
