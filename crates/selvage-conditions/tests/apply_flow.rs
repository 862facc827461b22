//! Integration tests for the full selection pipeline.
//!
//! These exercise registration, selection, and phase application
//! together through a SelectionRegistry, not individual conditions in
//! isolation.

use selvage_conditions::{
    copy::COPY_FROM_KEY, scalar::SCALAR_KEY, CopyBc, FlatBc, ScalarBc, StandardConditions,
};
use selvage_core::{
    ApplyError, ApplyWarning, ElemType, Face, FaceSet, RegistryError, Side, SyncPhase,
    TableHandle, VarId, WidthSpec, BOUNDARY_WIDTH_KEY,
};
use selvage_registry::{ApplyContext, SelectionRegistry};
use selvage_test_utils::MockPatch;

fn standard_registry() -> SelectionRegistry {
    let mut registry = SelectionRegistry::new();
    StandardConditions::default().register(&mut registry);
    registry
}

fn select(
    registry: &mut SelectionRegistry,
    var: VarId,
    width: u32,
    table: TableHandle,
    bc: &str,
) {
    registry
        .select_var(var, FaceSet::ALL, WidthSpec::Uniform(width), table, bc)
        .unwrap();
}

#[test]
fn one_phase_applies_every_selected_condition() {
    let mut patch = MockPatch::builder()
        .extent(&[6])
        .group("state", ElemType::Real64, 1, &["state::u", "state::v"])
        .build();
    let u = patch.var("state::u");
    let v = patch.var("state::v");
    patch.set_real64(u, 0, &[0.0, 0.0, 3.0, 4.0, 0.0, 0.0]);
    let table = patch.add_table();
    patch.table_set_real(table, SCALAR_KEY, 7.0);

    let mut registry = standard_registry();
    select(&mut registry, u, 2, TableHandle::NONE, "flat");
    select(&mut registry, v, 1, table, "scalar");

    let mut ctx = ApplyContext::new(&mut patch);
    let report = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    assert_eq!(report.handlers_run, 2);
    assert_eq!(report.selections_applied, 2);
    assert!(ctx.warnings().is_empty());
    drop(ctx);

    assert_eq!(patch.real64(u, 0), &[3.0, 3.0, 3.0, 4.0, 4.0, 4.0]);
    assert_eq!(patch.real64(v, 0), &[7.0, 0.0, 0.0, 0.0, 0.0, 7.0]);
}

#[test]
fn group_selection_fills_every_member() {
    let mut patch = MockPatch::builder()
        .extent(&[4])
        .group(
            "state",
            ElemType::Real64,
            1,
            &["state::a", "state::b", "state::c"],
        )
        .build();
    let table = patch.add_table();
    patch.table_set_real(table, SCALAR_KEY, 1.0);

    let mut registry = standard_registry();
    let selected = registry
        .select_group_by_name(
            &patch,
            "state",
            FaceSet::ALL,
            WidthSpec::Uniform(1),
            table,
            "scalar",
        )
        .unwrap();
    assert_eq!(selected, 3);

    let mut ctx = ApplyContext::new(&mut patch);
    let report = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    assert_eq!(report.selections_applied, 3);
    drop(ctx);

    for name in ["state::a", "state::b", "state::c"] {
        let var = patch.var(name);
        assert_eq!(patch.real64(var, 0), &[1.0, 0.0, 0.0, 1.0], "{name}");
    }
}

#[test]
fn failing_handler_stops_the_phase() {
    let mut patch = MockPatch::builder()
        .extent(&[4])
        .group("state", ElemType::Real64, 1, &["state::u", "state::v"])
        .build();
    let u = patch.var("state::u");
    let v = patch.var("state::v");
    let table = patch.add_table();
    patch.table_set_real(table, SCALAR_KEY, 9.0);

    // Register "copy" ahead of "scalar" so its failure must keep the
    // scalar selection from being applied.
    let mut registry = SelectionRegistry::new();
    registry.register("copy", SyncPhase::Before, Box::new(CopyBc::new()));
    registry.register("scalar", SyncPhase::Before, Box::new(ScalarBc::new()));
    select(&mut registry, u, 1, TableHandle::NONE, "copy");
    select(&mut registry, v, 1, table, "scalar");

    let mut ctx = ApplyContext::new(&mut patch);
    let err = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap_err();
    assert_eq!(
        err,
        RegistryError::HandlerFailed {
            bc: "copy".to_string(),
            reason: ApplyError::BadCopyTable {
                table: TableHandle::NONE,
            },
        }
    );
    drop(ctx);
    assert_eq!(patch.real64(v, 0), &[0.0; 4]);
}

#[test]
fn explicit_face_mask_warns_but_fills_everything() {
    let mut patch = MockPatch::builder()
        .extent(&[5])
        .group("g", ElemType::Real64, 1, &["g::f"])
        .build();
    let var = patch.var("g::f");
    patch.set_real64(var, 0, &[0.0, 0.0, 2.0, 0.0, 0.0]);
    let lower = FaceSet::empty().with(Face {
        axis: 0,
        side: Side::Lower,
    });

    let mut registry = standard_registry();
    registry
        .select_var(var, lower, WidthSpec::Uniform(2), TableHandle::NONE, "flat")
        .unwrap();

    let mut ctx = ApplyContext::new(&mut patch);
    registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    assert_eq!(
        ctx.warnings(),
        &[ApplyWarning::FacesNotAll { var, faces: lower }]
    );
    drop(ctx);

    // Both faces were filled despite the lower-only mask.
    assert_eq!(patch.real64(var, 0), &[2.0, 2.0, 2.0, 2.0, 2.0]);
}

#[test]
fn cleared_selections_do_not_apply() {
    let mut patch = MockPatch::builder()
        .extent(&[4])
        .group("g", ElemType::Real64, 1, &["g::f"])
        .build();
    let var = patch.var("g::f");
    let table = patch.add_table();
    patch.table_set_real(table, SCALAR_KEY, 5.0);

    let mut registry = standard_registry();
    select(&mut registry, var, 1, table, "scalar");
    assert_eq!(registry.clear_var(var).unwrap(), 1);

    let mut ctx = ApplyContext::new(&mut patch);
    let report = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    assert_eq!(report.handlers_run, 0);
    assert_eq!(report.selections_applied, 0);
    drop(ctx);
    assert_eq!(patch.real64(var, 0), &[0.0; 4]);
}

#[test]
fn selections_follow_their_condition_phase() {
    let mut patch = MockPatch::builder()
        .extent(&[4])
        .group("g", ElemType::Real64, 1, &["g::f"])
        .build();
    let var = patch.var("g::f");
    patch.set_real64(var, 0, &[0.0, 3.0, 4.0, 0.0]);

    // Move "flat" to the after-sync phase, then select it.
    let mut registry = standard_registry();
    registry.register("flat", SyncPhase::After, Box::new(FlatBc::new()));
    select(&mut registry, var, 1, TableHandle::NONE, "flat");

    let mut ctx = ApplyContext::new(&mut patch);
    let before = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    assert_eq!(before.selections_applied, 0);
    let after = registry.apply_phase(&mut ctx, SyncPhase::After).unwrap();
    assert_eq!(after.selections_applied, 1);
    drop(ctx);
    assert_eq!(patch.real64(var, 0), &[3.0, 3.0, 4.0, 4.0]);
}

#[test]
fn per_face_widths_come_from_the_selection_table() {
    let mut patch = MockPatch::builder()
        .extent(&[6])
        .group("g", ElemType::Real64, 1, &["g::f"])
        .build();
    let var = patch.var("g::f");
    let table = patch.add_table();
    patch.table_set_real(table, SCALAR_KEY, 1.0);
    patch.table_set_int_array(table, BOUNDARY_WIDTH_KEY, &[3, 1]);

    let mut registry = standard_registry();
    registry
        .select_var(var, FaceSet::ALL, WidthSpec::FromTable, table, "scalar")
        .unwrap();

    let mut ctx = ApplyContext::new(&mut patch);
    registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    drop(ctx);
    assert_eq!(patch.real64(var, 0), &[1.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn history_shortage_surfaces_through_the_phase_error() {
    let mut patch = MockPatch::builder()
        .extent(&[4])
        .group("g", ElemType::Real64, 1, &["g::f"])
        .build();
    let var = patch.var("g::f");

    let mut registry = standard_registry();
    select(&mut registry, var, 1, TableHandle::NONE, "static");

    let mut ctx = ApplyContext::new(&mut patch);
    let err = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap_err();
    assert_eq!(
        err,
        RegistryError::HandlerFailed {
            bc: "static".to_string(),
            reason: ApplyError::InsufficientTimeLevels { var, found: 1 },
        }
    );
}

#[test]
fn copy_pipeline_tracks_its_source_variable() {
    let mut patch = MockPatch::builder()
        .extent(&[8])
        .group("state", ElemType::Real64, 1, &["state::u", "state::ref"])
        .build();
    let u = patch.var("state::u");
    let source = patch.var("state::ref");
    patch.set_real64(source, 0, &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0]);
    let table = patch.add_table();
    patch.table_set_str(table, COPY_FROM_KEY, "state::ref");

    let mut registry = standard_registry();
    select(&mut registry, u, 2, table, "copy");

    let mut ctx = ApplyContext::new(&mut patch);
    registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    drop(ctx);
    assert_eq!(
        patch.real64(u, 0),
        &[10.0, 11.0, 0.0, 0.0, 0.0, 0.0, 16.0, 17.0]
    );
}

#[test]
fn three_dimensional_fill_covers_the_whole_shell() {
    let mut patch = MockPatch::builder()
        .extent(&[3, 4, 5])
        .group("g", ElemType::Real64, 1, &["g::f"])
        .build();
    let var = patch.var("g::f");
    let table = patch.add_table();
    patch.table_set_real(table, SCALAR_KEY, 1.0);

    let mut registry = standard_registry();
    select(&mut registry, var, 1, table, "scalar");

    let mut ctx = ApplyContext::new(&mut patch);
    registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
    drop(ctx);

    let filled: usize = patch
        .real64(var, 0)
        .iter()
        .filter(|&&value| value == 1.0)
        .count();
    // Everything except the 1x2x3 interior block is boundary.
    assert_eq!(filled, 3 * 4 * 5 - 6);
}
