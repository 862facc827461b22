//! The selection registry: BC handlers and per-phase selection lists.

use crate::condition::{BoundaryCondition, SelectionBatch};
use crate::context::ApplyContext;
use indexmap::map::Entry;
use indexmap::IndexMap;
use selvage_core::{
    FaceSet, GroupId, RegistryError, SyncPhase, TableHandle, VarCatalog, VarId, WidthSpec,
};

/// One stored selection entry.
#[derive(Clone, Debug)]
struct Selection {
    faces: FaceSet,
    width: WidthSpec,
    table: TableHandle,
    bc: String,
    seq: u64,
}

/// A registered handler plus its redundant selection counts.
///
/// The counts double-check the per-variable lists during queries; a
/// disagreement means the registry's state is corrupt and is fatal.
struct HandlerEntry {
    handler: Box<dyn BoundaryCondition>,
    phase: SyncPhase,
    counts: [usize; 2],
}

/// An owned snapshot of selections, as parallel arrays.
///
/// Entry `i` of each array describes the same selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionList {
    /// Selected variables.
    pub vars: Vec<VarId>,
    /// Face mask per selection.
    pub faces: Vec<FaceSet>,
    /// Width specification per selection.
    pub widths: Vec<WidthSpec>,
    /// Argument table per selection.
    pub tables: Vec<TableHandle>,
}

impl SelectionList {
    /// Number of selections.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no selections are present.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Borrow the list as a dispatch batch.
    pub fn as_batch(&self) -> SelectionBatch<'_> {
        SelectionBatch {
            vars: &self.vars,
            faces: &self.faces,
            widths: &self.widths,
            tables: &self.tables,
        }
    }
}

/// Caller-provided output arrays for [`SelectionRegistry::query_into`].
///
/// Any subset of the arrays may be supplied; each is filled up to its
/// own length and never grown.
#[derive(Debug, Default)]
pub struct QueryBuffers<'a> {
    /// Receives selected variables.
    pub vars: Option<&'a mut [VarId]>,
    /// Receives face masks.
    pub faces: Option<&'a mut [FaceSet]>,
    /// Receives width specifications.
    pub widths: Option<&'a mut [WidthSpec]>,
    /// Receives argument tables.
    pub tables: Option<&'a mut [TableHandle]>,
}

/// Outcome summary of one phase dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseReport {
    /// Handlers invoked (those with at least one selection).
    pub handlers_run: usize,
    /// Selections handed to handlers across the phase.
    pub selections_applied: usize,
}

/// Registry of boundary conditions and the selections made for them.
///
/// Handlers register under a unique name together with the
/// synchronization phase they run in. Selections bind a variable to a
/// registered name with a face mask, width specification, and optional
/// argument table; they live until explicitly cleared. Queries and
/// dispatch walk handlers in registration order and each handler's
/// selections in insertion order.
pub struct SelectionRegistry {
    handlers: IndexMap<String, HandlerEntry>,
    selections: [IndexMap<VarId, Vec<Selection>>; 2],
    next_seq: u64,
}

impl SelectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: IndexMap::new(),
            selections: [IndexMap::new(), IndexMap::new()],
            next_seq: 0,
        }
    }

    /// Register `handler` under `name`, to run during `phase`.
    ///
    /// Re-registering an existing name replaces the handler in place and
    /// returns the displaced one; the registration keeps its original
    /// rank and any selections already made for the name stay live.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        phase: SyncPhase,
        handler: Box<dyn BoundaryCondition>,
    ) -> Option<Box<dyn BoundaryCondition>> {
        match self.handlers.entry(name.into()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.phase = phase;
                Some(std::mem::replace(&mut entry.handler, handler))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(HandlerEntry {
                    handler,
                    phase,
                    counts: [0; 2],
                });
                None
            }
        }
    }

    /// Returns `true` if a handler is registered under `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// The phase a registered name runs in.
    pub fn phase_of(&self, name: &str) -> Option<SyncPhase> {
        self.handlers.get(name).map(|entry| entry.phase)
    }

    /// Select `var` for boundary condition `bc`.
    ///
    /// The selection joins the phase the BC was registered with and
    /// stays until [`clear_var`](Self::clear_var) removes it.
    pub fn select_var(
        &mut self,
        var: VarId,
        faces: FaceSet,
        width: WidthSpec,
        table: TableHandle,
        bc: &str,
    ) -> Result<(), RegistryError> {
        let entry = self
            .handlers
            .get_mut(bc)
            .ok_or_else(|| RegistryError::UnknownBc {
                name: bc.to_string(),
            })?;
        if !var.is_valid() {
            return Err(RegistryError::InvalidVariable);
        }
        let phase = entry.phase;
        entry.counts[phase.index()] += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.selections[phase.index()]
            .entry(var)
            .or_default()
            .push(Selection {
                faces,
                width,
                table,
                bc: bc.to_string(),
                seq,
            });
        Ok(())
    }

    /// Select a variable by catalog name.
    pub fn select_var_by_name(
        &mut self,
        catalog: &dyn VarCatalog,
        name: &str,
        faces: FaceSet,
        width: WidthSpec,
        table: TableHandle,
        bc: &str,
    ) -> Result<(), RegistryError> {
        let var = catalog
            .var_index(name)
            .ok_or_else(|| RegistryError::UnknownVariable {
                name: name.to_string(),
            })?;
        self.select_var(var, faces, width, table, bc)
    }

    /// Select every member of a group.
    ///
    /// Returns the number of members selected; an empty group selects
    /// nothing and returns 0.
    pub fn select_group(
        &mut self,
        catalog: &dyn VarCatalog,
        group: GroupId,
        faces: FaceSet,
        width: WidthSpec,
        table: TableHandle,
        bc: &str,
    ) -> Result<usize, RegistryError> {
        let range = catalog
            .group_range(group)
            .ok_or_else(|| RegistryError::UnknownGroup {
                name: group.to_string(),
            })?;
        for var in range.iter() {
            self.select_var(var, faces, width, table, bc)?;
        }
        Ok(range.len as usize)
    }

    /// Select every member of a group by catalog name.
    pub fn select_group_by_name(
        &mut self,
        catalog: &dyn VarCatalog,
        name: &str,
        faces: FaceSet,
        width: WidthSpec,
        table: TableHandle,
        bc: &str,
    ) -> Result<usize, RegistryError> {
        let group = catalog
            .group_index(name)
            .ok_or_else(|| RegistryError::UnknownGroup {
                name: name.to_string(),
            })?;
        self.select_group(catalog, group, faces, width, table, bc)
    }

    /// Remove every selection of `var` from both phases.
    ///
    /// Returns the number of entries removed. Clearing a variable with
    /// no selections removes nothing and succeeds.
    pub fn clear_var(&mut self, var: VarId) -> Result<usize, RegistryError> {
        if !var.is_valid() {
            return Err(RegistryError::InvalidVariable);
        }
        let mut removed = 0;
        for phase in SyncPhase::BOTH {
            if let Some(list) = self.selections[phase.index()].shift_remove(&var) {
                for selection in &list {
                    if let Some(entry) = self.handlers.get_mut(&selection.bc) {
                        entry.counts[phase.index()] -= 1;
                    }
                }
                removed += list.len();
            }
        }
        Ok(removed)
    }

    /// Snapshot the selections of one phase.
    ///
    /// With `bc` given, returns only that BC's entries in insertion
    /// order; the name must be registered even when it has no
    /// selections. With `None`, returns every entry of the phase,
    /// ordered by BC registration rank and then insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the entries walked disagree with the registry's
    /// maintained per-handler counts, which indicates corrupted
    /// registry state.
    pub fn selections(
        &self,
        phase: SyncPhase,
        bc: Option<&str>,
    ) -> Result<SelectionList, RegistryError> {
        let found = self.collect(phase, bc)?;
        let mut list = SelectionList::default();
        for (_, _, var, selection) in found {
            list.vars.push(var);
            list.faces.push(selection.faces);
            list.widths.push(selection.width);
            list.tables.push(selection.table);
        }
        Ok(list)
    }

    /// Capacity-limited query into caller-provided buffers.
    ///
    /// Fills each provided buffer up to its own length and returns the
    /// true total match count, which may exceed what was written; a
    /// caller seeing a larger total re-queries with bigger buffers.
    /// Insufficient capacity is not an error.
    ///
    /// # Panics
    ///
    /// Panics on a selection accounting mismatch, as for
    /// [`selections`](Self::selections).
    pub fn query_into(
        &self,
        phase: SyncPhase,
        bc: Option<&str>,
        out: &mut QueryBuffers<'_>,
    ) -> Result<usize, RegistryError> {
        let found = self.collect(phase, bc)?;
        for (i, (_, _, var, selection)) in found.iter().enumerate() {
            if let Some(vars) = out.vars.as_deref_mut() {
                if let Some(slot) = vars.get_mut(i) {
                    *slot = *var;
                }
            }
            if let Some(faces) = out.faces.as_deref_mut() {
                if let Some(slot) = faces.get_mut(i) {
                    *slot = selection.faces;
                }
            }
            if let Some(widths) = out.widths.as_deref_mut() {
                if let Some(slot) = widths.get_mut(i) {
                    *slot = selection.width;
                }
            }
            if let Some(tables) = out.tables.as_deref_mut() {
                if let Some(slot) = tables.get_mut(i) {
                    *slot = selection.table;
                }
            }
        }
        Ok(found.len())
    }

    /// Dispatch one phase: invoke each registered handler that has
    /// selections, in registration order.
    ///
    /// Handlers with no selections in the phase are skipped. The first
    /// failing handler stops the dispatch; its error is wrapped as
    /// [`RegistryError::HandlerFailed`].
    ///
    /// # Panics
    ///
    /// Panics on a selection accounting mismatch, as for
    /// [`selections`](Self::selections).
    pub fn apply_phase(
        &self,
        ctx: &mut ApplyContext<'_>,
        phase: SyncPhase,
    ) -> Result<PhaseReport, RegistryError> {
        let mut report = PhaseReport::default();
        for (name, entry) in &self.handlers {
            let list = self.selections(phase, Some(name))?;
            if list.is_empty() {
                continue;
            }
            entry
                .handler
                .apply(ctx, list.as_batch())
                .map_err(|reason| RegistryError::HandlerFailed {
                    bc: name.clone(),
                    reason,
                })?;
            report.handlers_run += 1;
            report.selections_applied += list.len();
        }
        Ok(report)
    }

    /// Walk one phase's store and return matching entries sorted by
    /// (handler rank, insertion sequence).
    fn collect(
        &self,
        phase: SyncPhase,
        bc: Option<&str>,
    ) -> Result<Vec<(usize, u64, VarId, &Selection)>, RegistryError> {
        if let Some(name) = bc {
            if !self.handlers.contains_key(name) {
                return Err(RegistryError::UnknownBc {
                    name: name.to_string(),
                });
            }
        }
        let mut found: Vec<(usize, u64, VarId, &Selection)> = Vec::new();
        for (var, list) in &self.selections[phase.index()] {
            for selection in list {
                if bc.is_some_and(|name| selection.bc != name) {
                    continue;
                }
                let rank = self
                    .handlers
                    .get_index_of(&selection.bc)
                    .unwrap_or(usize::MAX);
                found.push((rank, selection.seq, *var, selection));
            }
        }
        found.sort_by_key(|&(rank, seq, _, _)| (rank, seq));
        self.check_accounting(phase, bc, found.len());
        Ok(found)
    }

    /// Compare walked entries against the maintained counts.
    fn check_accounting(&self, phase: SyncPhase, bc: Option<&str>, walked: usize) {
        let recorded: usize = match bc {
            Some(name) => self
                .handlers
                .get(name)
                .map_or(0, |entry| entry.counts[phase.index()]),
            None => self
                .handlers
                .values()
                .map(|entry| entry.counts[phase.index()])
                .sum(),
        };
        if walked != recorded {
            let scope = bc.map(|name| format!(" for '{name}'")).unwrap_or_default();
            panic!(
                "selection accounting mismatch{scope} in {phase} phase: \
                 walked {walked} entries, registry recorded {recorded}"
            );
        }
    }
}

impl Default for SelectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
