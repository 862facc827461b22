//! Boundary-condition registration, selection bookkeeping, and dispatch.
//!
//! [`SelectionRegistry`] maps BC names to handler objects and records
//! which variables are selected for which condition, per synchronization
//! phase. Hosts query the selections back
//! ([`selections`](SelectionRegistry::selections),
//! [`query_into`](SelectionRegistry::query_into)) or dispatch them
//! wholesale ([`apply_phase`](SelectionRegistry::apply_phase)), which
//! hands each handler its batch through an [`ApplyContext`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod condition;
pub mod context;
pub mod registry;

pub use condition::{BoundaryCondition, SelectionBatch};
pub use context::ApplyContext;
pub use registry::{PhaseReport, QueryBuffers, SelectionList, SelectionRegistry};
