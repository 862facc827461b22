//! Core types and traits for the selvage boundary-condition system.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the selvage workspace:
//! variable and table identifiers, face sets, width specifications,
//! element types, host capability traits, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod elem;
pub mod error;
pub mod face;
pub mod id;
pub mod phase;
pub mod traits;
pub mod width;

pub use elem::{Complex, ElemType, VarSlice, VarSliceMut};
pub use error::{ApplyError, ApplyWarning, RegistryError, TableError};
pub use face::{Face, FaceSet, Side, MAX_DIM};
pub use id::{GroupId, TableHandle, VarId, VarRange};
pub use phase::SyncPhase;
pub use traits::{ArgTables, BoundaryPatch, Extents, GridInfo, TableKind, VarCatalog, VarData};
pub use width::{FaceWidths, WidthSpec, BOUNDARY_WIDTH_KEY};
