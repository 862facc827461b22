//! Selvage: boundary condition selection and application for
//! structured-grid solvers.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all selvage sub-crates. For most users, adding `selvage` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use selvage::prelude::*;
//!
//! // An in-memory host patch; real solvers implement the host traits
//! // (`GridInfo`, `VarCatalog`, `VarData`, `ArgTables`) themselves.
//! let mut patch = selvage_test_utils::MockPatch::builder()
//!     .extent(&[8])
//!     .group("state", ElemType::Real64, 1, &["state::u"])
//!     .build();
//! let u = patch.var("state::u");
//!
//! // Register the standard conditions, then select a boundary for `u`.
//! let mut registry = SelectionRegistry::new();
//! StandardConditions::default().register(&mut registry);
//! registry
//!     .select_var(u, FaceSet::ALL, WidthSpec::Uniform(1), TableHandle::NONE, "flat")
//!     .unwrap();
//!
//! // At each sync point, apply everything selected for the phase.
//! let mut ctx = ApplyContext::new(&mut patch);
//! let report = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
//! assert_eq!(report.selections_applied, 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `selvage-core` | IDs, faces, element types, errors, host traits |
//! | [`grid`] | `selvage-grid` | Flat indexing and boundary slab iteration |
//! | [`registry`] | `selvage-registry` | Selection registry and the condition trait |
//! | [`engine`] | `selvage-engine` | Width resolution, face classification, runs |
//! | [`conditions`] | `selvage-conditions` | The standard boundary conditions |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`selvage-core`).
///
/// Contains the id newtypes ([`types::VarId`], [`types::GroupId`],
/// [`types::TableHandle`]), face bookkeeping, element types, and the
/// four host traits a solver implements.
pub use selvage_core as types;

/// Grid geometry helpers (`selvage-grid`).
///
/// [`grid::FlatIndexer`] turns multi-dimensional points into flat
/// offsets; [`grid::FaceSlab`] iterates the boundary layers of a face.
pub use selvage_grid as grid;

/// Selection registry and condition trait (`selvage-registry`).
///
/// The [`registry::SelectionRegistry`] maps boundary condition names
/// to handlers and per-variable selections; the
/// [`registry::BoundaryCondition`] trait is the extension point for
/// custom conditions.
pub use selvage_registry as registry;

/// Application machinery (`selvage-engine`).
///
/// Width resolution, physical-face classification, and run coalescing;
/// used by condition implementations rather than end users.
pub use selvage_engine as engine;

/// The standard boundary conditions (`selvage-conditions`).
///
/// `scalar`, `flat`, `copy`, `static`, `robin`, `radiative`, and
/// `none`, registered through [`conditions::StandardConditions`].
pub use selvage_conditions as conditions;

/// Common imports for typical selvage usage.
///
/// ```rust
/// use selvage::prelude::*;
/// ```
///
/// This imports the id and face types, the host traits, the selection
/// registry, and the standard condition set.
pub mod prelude {
    // Ids, faces, and selection arguments
    pub use selvage_core::{
        ElemType, Face, FaceSet, GroupId, Side, SyncPhase, TableHandle, VarId, WidthSpec,
    };

    // Host traits
    pub use selvage_core::{ArgTables, BoundaryPatch, GridInfo, VarCatalog, VarData};

    // Errors and warnings
    pub use selvage_core::{ApplyError, ApplyWarning, RegistryError, TableError};

    // Registry
    pub use selvage_registry::{
        ApplyContext, BoundaryCondition, PhaseReport, SelectionRegistry,
    };

    // Standard conditions
    pub use selvage_conditions::StandardConditions;
}
