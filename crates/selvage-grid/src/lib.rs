//! Grid addressing and boundary-slab iteration for selvage.
//!
//! Grid variables live in flat host buffers laid out axis 0 fastest,
//! with strides derived from the *allocated* extents (which may pad the
//! computed extents). [`FlatIndexer`] owns that arithmetic.
//! [`FaceSlab`] walks the boundary region of one face — every point
//! within the face's stencil width, across the full computed extent of
//! the transverse axes — exposing each point's flat offset and its
//! distance to the interior, which is all the boundary rules need.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod indexer;
pub mod slab;

pub use indexer::FlatIndexer;
pub use slab::{FaceSlab, SlabIter, SlabPoint};
