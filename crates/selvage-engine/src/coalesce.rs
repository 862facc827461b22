//! Coalescing a selection batch into contiguous variable runs.

use selvage_core::{ApplyError, FaceSet, GroupId, TableHandle, VarCatalog, VarId, VarRange, WidthSpec};
use selvage_registry::SelectionBatch;

/// A maximal run of consecutive variables sharing a group and
/// identical selection arguments.
///
/// Conditions that read per-run parameters from the argument table can
/// resolve them once per run instead of once per variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    /// First variable of the run.
    pub first: VarId,
    /// Number of consecutive variables.
    pub len: u32,
    /// Group every variable of the run belongs to.
    pub group: GroupId,
    /// Face mask shared by the run.
    pub faces: FaceSet,
    /// Width specification shared by the run.
    pub width: WidthSpec,
    /// Argument table shared by the run.
    pub table: TableHandle,
}

impl Run {
    /// Iterate the run's variables in order.
    pub fn vars(&self) -> impl Iterator<Item = VarId> {
        VarRange {
            first: self.first,
            len: self.len,
        }
        .iter()
    }
}

/// Partition a batch into maximal [`Run`]s.
///
/// A run is extended while variable ids stay consecutive, the group
/// stays the same, and faces, width, and table all equal the run
/// head's. Concatenating the runs in order reproduces the batch
/// exactly, so per-variable conditions can still treat each run
/// element individually.
pub fn coalesce_runs(
    catalog: &dyn VarCatalog,
    batch: SelectionBatch<'_>,
) -> Result<Vec<Run>, ApplyError> {
    let mut runs = Vec::new();
    let mut start = 0;
    while start < batch.len() {
        let first = batch.vars[start];
        let group = catalog
            .group_of(first)
            .ok_or(ApplyError::UnknownVariable { var: first })?;
        let faces = batch.faces[start];
        let width = batch.widths[start];
        let table = batch.tables[start];

        let mut len = 1u32;
        while start + (len as usize) < batch.len() {
            let next = start + len as usize;
            let var = batch.vars[next];
            if var.0 != first.0 + len || catalog.group_of(var) != Some(group) {
                break;
            }
            if batch.faces[next] != faces
                || batch.widths[next] != width
                || batch.tables[next] != table
            {
                break;
            }
            len += 1;
        }
        runs.push(Run {
            first,
            len,
            group,
            faces,
            width,
            table,
        });
        start += len as usize;
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use selvage_core::ElemType;
    use selvage_test_utils::MockPatch;

    fn catalog() -> MockPatch {
        MockPatch::builder()
            .extent(&[4])
            .group(
                "state",
                ElemType::Real64,
                1,
                &["state::u", "state::v", "state::w"],
            )
            .group("aux", ElemType::Real64, 1, &["aux::p", "aux::q"])
            .build()
    }

    fn batch_of<'a>(
        vars: &'a [VarId],
        faces: &'a [FaceSet],
        widths: &'a [WidthSpec],
        tables: &'a [TableHandle],
    ) -> SelectionBatch<'a> {
        SelectionBatch {
            vars,
            faces,
            widths,
            tables,
        }
    }

    #[test]
    fn consecutive_variables_form_one_run() {
        let patch = catalog();
        let vars = [patch.var("state::u"), patch.var("state::v"), patch.var("state::w")];
        let faces = [FaceSet::ALL; 3];
        let widths = [WidthSpec::Uniform(1); 3];
        let tables = [TableHandle::NONE; 3];
        let runs = coalesce_runs(&patch, batch_of(&vars, &faces, &widths, &tables)).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].first, vars[0]);
        assert_eq!(runs[0].len, 3);
    }

    #[test]
    fn group_boundary_splits_consecutive_ids() {
        // "state::w" and "aux::p" have adjacent ids but different groups.
        let patch = catalog();
        let vars = [patch.var("state::w"), patch.var("aux::p")];
        assert_eq!(vars[1].0, vars[0].0 + 1);
        let faces = [FaceSet::ALL; 2];
        let widths = [WidthSpec::Uniform(1); 2];
        let tables = [TableHandle::NONE; 2];
        let runs = coalesce_runs(&patch, batch_of(&vars, &faces, &widths, &tables)).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].group, patch.group_of(vars[0]).unwrap());
        assert_eq!(runs[1].group, patch.group_of(vars[1]).unwrap());
    }

    #[test]
    fn argument_change_splits_a_run() {
        let patch = catalog();
        let vars = [patch.var("state::u"), patch.var("state::v")];
        let faces = [FaceSet::ALL; 2];
        let widths = [WidthSpec::Uniform(1), WidthSpec::Uniform(2)];
        let tables = [TableHandle::NONE; 2];
        let runs = coalesce_runs(&patch, batch_of(&vars, &faces, &widths, &tables)).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len, 1);
        assert_eq!(runs[1].len, 1);
    }

    #[test]
    fn id_gap_splits_a_run() {
        let patch = catalog();
        let vars = [patch.var("state::u"), patch.var("state::w")];
        let faces = [FaceSet::ALL; 2];
        let widths = [WidthSpec::Uniform(1); 2];
        let tables = [TableHandle::NONE; 2];
        let runs = coalesce_runs(&patch, batch_of(&vars, &faces, &widths, &tables)).unwrap();
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let patch = catalog();
        let vars = [VarId(99)];
        let faces = [FaceSet::ALL];
        let widths = [WidthSpec::Uniform(1)];
        let tables = [TableHandle::NONE];
        let err =
            coalesce_runs(&patch, batch_of(&vars, &faces, &widths, &tables)).unwrap_err();
        assert_eq!(err, ApplyError::UnknownVariable { var: VarId(99) });
    }

    #[test]
    fn empty_batch_has_no_runs() {
        let patch = catalog();
        let runs = coalesce_runs(&patch, batch_of(&[], &[], &[], &[])).unwrap();
        assert!(runs.is_empty());
    }

    // ── Properties ──────────────────────────────────────────────────────

    fn arb_selection() -> impl Strategy<Value = (u32, bool, u32, i32)> {
        (1u32..=5, any::<bool>(), 1u32..=2, -1i32..=1)
    }

    proptest! {
        #[test]
        fn runs_partition_the_batch(selections in prop::collection::vec(arb_selection(), 0..12)) {
            let patch = catalog();
            let vars: Vec<VarId> = selections.iter().map(|s| VarId(s.0)).collect();
            let faces: Vec<FaceSet> = selections
                .iter()
                .map(|s| if s.1 { FaceSet::ALL } else { FaceSet::full(1) })
                .collect();
            let widths: Vec<WidthSpec> =
                selections.iter().map(|s| WidthSpec::Uniform(s.2)).collect();
            let tables: Vec<TableHandle> =
                selections.iter().map(|s| TableHandle(s.3)).collect();

            let runs = coalesce_runs(
                &patch,
                batch_of(&vars, &faces, &widths, &tables),
            ).unwrap();

            // Concatenating the runs reproduces the batch order.
            let expanded: Vec<VarId> = runs.iter().flat_map(Run::vars).collect();
            prop_assert_eq!(&expanded, &vars);

            // Every run is internally uniform and within one group.
            let mut cursor = 0;
            for run in &runs {
                for (step, var) in run.vars().enumerate() {
                    prop_assert_eq!(var.0, run.first.0 + step as u32);
                    prop_assert_eq!(patch.group_of(var), Some(run.group));
                    prop_assert_eq!(faces[cursor], run.faces);
                    prop_assert_eq!(widths[cursor], run.width);
                    prop_assert_eq!(tables[cursor], run.table);
                    cursor += 1;
                }
            }
            prop_assert_eq!(cursor, vars.len());
        }
    }
}
