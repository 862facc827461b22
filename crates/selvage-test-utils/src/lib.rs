//! Test utilities and mock host types for selvage development.
//!
//! Provides [`MockPatch`], an in-memory implementation of the four host
//! traits ([`GridInfo`], [`VarCatalog`], [`VarData`], [`ArgTables`]) with
//! a builder for declaring grids, variable groups, and argument tables,
//! plus typed accessors for seeding and inspecting variable storage.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;

use selvage_core::{
    ArgTables, Complex, ElemType, Extents, FaceSet, GridInfo, GroupId, TableError, TableHandle,
    TableKind, VarCatalog, VarData, VarId, VarRange, VarSlice, VarSliceMut,
};
use smallvec::SmallVec;

/// One typed storage buffer for a (variable, time level) pair.
enum ElemBuf {
    Byte(Vec<u8>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
    Complex32(Vec<Complex<f32>>),
    Complex64(Vec<Complex<f64>>),
}

impl ElemBuf {
    fn zeroed(elem: ElemType, len: usize) -> Self {
        match elem {
            ElemType::Byte => Self::Byte(vec![0; len]),
            ElemType::Int32 => Self::Int32(vec![0; len]),
            ElemType::Int64 => Self::Int64(vec![0; len]),
            ElemType::Real32 => Self::Real32(vec![0.0; len]),
            ElemType::Real64 => Self::Real64(vec![0.0; len]),
            ElemType::Complex32 => Self::Complex32(vec![Complex::default(); len]),
            ElemType::Complex64 => Self::Complex64(vec![Complex::default(); len]),
        }
    }

    fn as_slice(&self) -> VarSlice<'_> {
        match self {
            Self::Byte(v) => VarSlice::Byte(v),
            Self::Int32(v) => VarSlice::Int32(v),
            Self::Int64(v) => VarSlice::Int64(v),
            Self::Real32(v) => VarSlice::Real32(v),
            Self::Real64(v) => VarSlice::Real64(v),
            Self::Complex32(v) => VarSlice::Complex32(v),
            Self::Complex64(v) => VarSlice::Complex64(v),
        }
    }

    fn as_mut_slice(&mut self) -> VarSliceMut<'_> {
        match self {
            Self::Byte(v) => VarSliceMut::Byte(v),
            Self::Int32(v) => VarSliceMut::Int32(v),
            Self::Int64(v) => VarSliceMut::Int64(v),
            Self::Real32(v) => VarSliceMut::Real32(v),
            Self::Real64(v) => VarSliceMut::Real64(v),
            Self::Complex32(v) => VarSliceMut::Complex32(v),
            Self::Complex64(v) => VarSliceMut::Complex64(v),
        }
    }
}

struct GroupDef {
    name: String,
    first: VarId,
    len: u32,
    dim: u32,
    elem: ElemType,
    timelevels: usize,
}

struct VarDef {
    name: String,
    group: GroupId,
    /// One buffer per active time level; empty means storage dropped.
    levels: Vec<ElemBuf>,
}

enum TableValue {
    Int(i64),
    Real(f64),
    IntArray(Vec<i64>),
    Str(String),
}

/// Declarative setup for a [`MockPatch`].
pub struct MockPatchBuilder {
    local: Extents,
    alloc: Option<Extents>,
    outer: Option<FaceSet>,
    symmetry: Option<FaceSet>,
    symmetry_broken: bool,
    groups: Vec<(String, ElemType, usize, Option<u32>, Vec<String>)>,
}

impl MockPatchBuilder {
    fn new() -> Self {
        Self {
            local: SmallVec::from_slice(&[4]),
            alloc: None,
            outer: None,
            symmetry: None,
            symmetry_broken: false,
            groups: Vec::new(),
        }
    }

    /// Computed extents per axis; also sets the grid dimensionality.
    pub fn extent(mut self, local: &[usize]) -> Self {
        self.local = SmallVec::from_slice(local);
        self
    }

    /// Allocated extents per axis, when padding beyond the computed
    /// extents. Defaults to the computed extents.
    pub fn alloc(mut self, alloc: &[usize]) -> Self {
        self.alloc = Some(SmallVec::from_slice(alloc));
        self
    }

    /// Faces on the outer boundary of the global grid. Defaults to every
    /// face (a single-patch grid).
    pub fn outer(mut self, outer: FaceSet) -> Self {
        self.outer = Some(outer);
        self
    }

    /// Faces claimed by a symmetry condition. Defaults to none.
    pub fn symmetry(mut self, symmetry: FaceSet) -> Self {
        self.symmetry = Some(symmetry);
        self
    }

    /// Make the symmetry service fail (`symmetry_faces()` returns `None`).
    pub fn broken_symmetry(mut self) -> Self {
        self.symmetry_broken = true;
        self
    }

    /// Declare a variable group. Member ids are assigned sequentially in
    /// declaration order, starting at `VarId(1)`.
    pub fn group(
        mut self,
        name: &str,
        elem: ElemType,
        timelevels: usize,
        members: &[&str],
    ) -> Self {
        self.groups.push((
            name.to_string(),
            elem,
            timelevels,
            None,
            members.iter().map(|m| m.to_string()).collect(),
        ));
        self
    }

    /// Declare a group reporting a dimensionality other than the grid's,
    /// for exercising dimension checks.
    pub fn group_with_dim(
        mut self,
        name: &str,
        elem: ElemType,
        timelevels: usize,
        dim: u32,
        members: &[&str],
    ) -> Self {
        self.groups.push((
            name.to_string(),
            elem,
            timelevels,
            Some(dim),
            members.iter().map(|m| m.to_string()).collect(),
        ));
        self
    }

    /// Build the patch, allocating zero-filled storage for every member
    /// variable at every time level.
    pub fn build(self) -> MockPatch {
        let local = self.local;
        let alloc = self.alloc.unwrap_or_else(|| local.clone());
        let dim = local.len() as u32;
        let volume: usize = alloc.iter().product();

        let mut groups = Vec::new();
        let mut vars = Vec::new();
        for (gi, (name, elem, timelevels, gdim, members)) in self.groups.into_iter().enumerate() {
            let first = VarId(vars.len() as u32 + 1);
            groups.push(GroupDef {
                name,
                first,
                len: members.len() as u32,
                dim: gdim.unwrap_or(dim),
                elem,
                timelevels,
            });
            for member in members {
                let levels = (0..timelevels).map(|_| ElemBuf::zeroed(elem, volume)).collect();
                vars.push(VarDef {
                    name: member,
                    group: GroupId(gi as u32),
                    levels,
                });
            }
        }

        MockPatch {
            local,
            alloc,
            outer: self.outer.unwrap_or_else(|| FaceSet::full(dim)),
            symmetry: if self.symmetry_broken {
                None
            } else {
                Some(self.symmetry.unwrap_or_else(FaceSet::empty))
            },
            groups,
            vars,
            tables: Vec::new(),
        }
    }
}

/// In-memory host patch implementing all four host traits.
///
/// Variables are declared through the builder in groups; ids are
/// assigned sequentially from `VarId(1)`. Storage is zero-filled at
/// build time and seeded with the typed `set_*` accessors. Argument
/// tables are created with [`add_table`](MockPatch::add_table) and
/// populated with the `table_set_*` methods.
pub struct MockPatch {
    local: Extents,
    alloc: Extents,
    outer: FaceSet,
    symmetry: Option<FaceSet>,
    groups: Vec<GroupDef>,
    vars: Vec<VarDef>,
    tables: Vec<HashMap<String, TableValue>>,
}

impl MockPatch {
    /// Start declaring a patch.
    pub fn builder() -> MockPatchBuilder {
        MockPatchBuilder::new()
    }

    /// Resolve a variable declared through the builder.
    ///
    /// Panics if the name was never declared.
    pub fn var(&self, name: &str) -> VarId {
        self.var_index(name)
            .unwrap_or_else(|| panic!("no mock variable named '{name}'"))
    }

    /// Create an empty argument table and return its handle.
    pub fn add_table(&mut self) -> TableHandle {
        self.tables.push(HashMap::new());
        TableHandle(self.tables.len() as i32 - 1)
    }

    pub fn table_set_int(&mut self, table: TableHandle, key: &str, value: i64) {
        self.table_mut(table).insert(key.to_string(), TableValue::Int(value));
    }

    pub fn table_set_real(&mut self, table: TableHandle, key: &str, value: f64) {
        self.table_mut(table).insert(key.to_string(), TableValue::Real(value));
    }

    pub fn table_set_str(&mut self, table: TableHandle, key: &str, value: &str) {
        self.table_mut(table)
            .insert(key.to_string(), TableValue::Str(value.to_string()));
    }

    pub fn table_set_int_array(&mut self, table: TableHandle, key: &str, values: &[i64]) {
        self.table_mut(table)
            .insert(key.to_string(), TableValue::IntArray(values.to_vec()));
    }

    /// Deactivate all storage for a variable, so reads and writes of any
    /// level return `None`.
    pub fn drop_storage(&mut self, var: VarId) {
        if let Some(def) = self.var_def_mut(var) {
            def.levels.clear();
        }
    }

    pub fn set_byte(&mut self, var: VarId, level: usize, data: &[u8]) {
        match self.level_mut(var, level) {
            ElemBuf::Byte(v) => v.copy_from_slice(data),
            _ => panic!("variable {var} is not byte-typed"),
        }
    }

    pub fn byte(&self, var: VarId, level: usize) -> &[u8] {
        match self.level(var, level) {
            ElemBuf::Byte(v) => v,
            _ => panic!("variable {var} is not byte-typed"),
        }
    }

    pub fn set_int32(&mut self, var: VarId, level: usize, data: &[i32]) {
        match self.level_mut(var, level) {
            ElemBuf::Int32(v) => v.copy_from_slice(data),
            _ => panic!("variable {var} is not int32-typed"),
        }
    }

    pub fn int32(&self, var: VarId, level: usize) -> &[i32] {
        match self.level(var, level) {
            ElemBuf::Int32(v) => v,
            _ => panic!("variable {var} is not int32-typed"),
        }
    }

    pub fn set_real32(&mut self, var: VarId, level: usize, data: &[f32]) {
        match self.level_mut(var, level) {
            ElemBuf::Real32(v) => v.copy_from_slice(data),
            _ => panic!("variable {var} is not real32-typed"),
        }
    }

    pub fn real32(&self, var: VarId, level: usize) -> &[f32] {
        match self.level(var, level) {
            ElemBuf::Real32(v) => v,
            _ => panic!("variable {var} is not real32-typed"),
        }
    }

    pub fn set_real64(&mut self, var: VarId, level: usize, data: &[f64]) {
        match self.level_mut(var, level) {
            ElemBuf::Real64(v) => v.copy_from_slice(data),
            _ => panic!("variable {var} is not real64-typed"),
        }
    }

    pub fn real64(&self, var: VarId, level: usize) -> &[f64] {
        match self.level(var, level) {
            ElemBuf::Real64(v) => v,
            _ => panic!("variable {var} is not real64-typed"),
        }
    }

    pub fn set_complex64(&mut self, var: VarId, level: usize, data: &[Complex<f64>]) {
        match self.level_mut(var, level) {
            ElemBuf::Complex64(v) => v.copy_from_slice(data),
            _ => panic!("variable {var} is not complex64-typed"),
        }
    }

    pub fn complex64(&self, var: VarId, level: usize) -> &[Complex<f64>] {
        match self.level(var, level) {
            ElemBuf::Complex64(v) => v,
            _ => panic!("variable {var} is not complex64-typed"),
        }
    }

    fn var_def(&self, var: VarId) -> Option<&VarDef> {
        var.0
            .checked_sub(1)
            .and_then(|i| self.vars.get(i as usize))
    }

    fn var_def_mut(&mut self, var: VarId) -> Option<&mut VarDef> {
        var.0
            .checked_sub(1)
            .and_then(|i| self.vars.get_mut(i as usize))
    }

    fn level(&self, var: VarId, level: usize) -> &ElemBuf {
        self.var_def(var)
            .and_then(|def| def.levels.get(level))
            .unwrap_or_else(|| panic!("no storage for variable {var} level {level}"))
    }

    fn level_mut(&mut self, var: VarId, level: usize) -> &mut ElemBuf {
        self.var_def_mut(var)
            .and_then(|def| def.levels.get_mut(level))
            .unwrap_or_else(|| panic!("no storage for variable {var} level {level}"))
    }

    fn table_mut(&mut self, table: TableHandle) -> &mut HashMap<String, TableValue> {
        self.tables
            .get_mut(table.0 as usize)
            .unwrap_or_else(|| panic!("no mock table with handle {table}"))
    }

    fn table_entry(&self, table: TableHandle, key: &str) -> Result<&TableValue, TableError> {
        if table.is_none() {
            return Err(TableError::BadHandle);
        }
        let entries = self
            .tables
            .get(table.0 as usize)
            .ok_or(TableError::BadHandle)?;
        entries.get(key).ok_or(TableError::NoSuchKey)
    }
}

impl GridInfo for MockPatch {
    fn dim(&self) -> u32 {
        self.local.len() as u32
    }

    fn local_extent(&self) -> Extents {
        self.local.clone()
    }

    fn alloc_extent(&self) -> Extents {
        self.alloc.clone()
    }

    fn outer_boundary(&self) -> FaceSet {
        self.outer
    }

    fn symmetry_faces(&self) -> Option<FaceSet> {
        self.symmetry
    }
}

impl VarCatalog for MockPatch {
    fn var_index(&self, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .position(|def| def.name == name)
            .map(|i| VarId(i as u32 + 1))
    }

    fn var_name(&self, var: VarId) -> Option<String> {
        self.var_def(var).map(|def| def.name.clone())
    }

    fn group_of(&self, var: VarId) -> Option<GroupId> {
        self.var_def(var).map(|def| def.group)
    }

    fn group_index(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|group| group.name == name)
            .map(|i| GroupId(i as u32))
    }

    fn group_range(&self, group: GroupId) -> Option<VarRange> {
        self.groups.get(group.0 as usize).map(|def| VarRange {
            first: def.first,
            len: def.len,
        })
    }

    fn group_dim(&self, group: GroupId) -> Option<u32> {
        self.groups.get(group.0 as usize).map(|def| def.dim)
    }

    fn elem_type(&self, var: VarId) -> Option<ElemType> {
        let group = self.group_of(var)?;
        self.groups.get(group.0 as usize).map(|def| def.elem)
    }

    fn timelevels(&self, var: VarId) -> Option<usize> {
        let group = self.group_of(var)?;
        self.groups.get(group.0 as usize).map(|def| def.timelevels)
    }
}

impl VarData for MockPatch {
    fn read(&self, var: VarId, level: usize) -> Option<VarSlice<'_>> {
        self.var_def(var)
            .and_then(|def| def.levels.get(level))
            .map(ElemBuf::as_slice)
    }

    fn write(&mut self, var: VarId, level: usize) -> Option<VarSliceMut<'_>> {
        self.var_def_mut(var)
            .and_then(|def| def.levels.get_mut(level))
            .map(ElemBuf::as_mut_slice)
    }
}

impl ArgTables for MockPatch {
    fn query_kind(&self, table: TableHandle, key: &str) -> Result<TableKind, TableError> {
        Ok(match self.table_entry(table, key)? {
            TableValue::Int(_) => TableKind::Int,
            TableValue::Real(_) => TableKind::Real,
            TableValue::IntArray(_) => TableKind::IntArray,
            TableValue::Str(_) => TableKind::Str,
        })
    }

    fn get_int(&self, table: TableHandle, key: &str) -> Result<i64, TableError> {
        match self.table_entry(table, key)? {
            TableValue::Int(value) => Ok(*value),
            _ => Err(TableError::WrongKind),
        }
    }

    fn get_real(&self, table: TableHandle, key: &str) -> Result<f64, TableError> {
        match self.table_entry(table, key)? {
            TableValue::Real(value) => Ok(*value),
            _ => Err(TableError::WrongKind),
        }
    }

    fn get_int_array(
        &self,
        table: TableHandle,
        key: &str,
        out: &mut [i64],
    ) -> Result<usize, TableError> {
        match self.table_entry(table, key)? {
            TableValue::IntArray(values) => {
                let n = values.len().min(out.len());
                out[..n].copy_from_slice(&values[..n]);
                Ok(values.len())
            }
            _ => Err(TableError::WrongKind),
        }
    }

    fn get_str(&self, table: TableHandle, key: &str) -> Result<String, TableError> {
        match self.table_entry(table, key)? {
            TableValue::Str(value) => Ok(value.clone()),
            _ => Err(TableError::WrongKind),
        }
    }
}
