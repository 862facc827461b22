//! Shared machinery for applying boundary conditions.
//!
//! A boundary condition implementation receives a batch of selected
//! variables and has to answer the same questions every time: how wide
//! is the boundary on each face, which faces is it allowed to touch,
//! and which selections can be processed together. This crate answers
//! them once, so the conditions in `selvage-conditions` reduce to the
//! arithmetic that actually distinguishes them.
//!
//! The pipeline for one handler invocation is:
//!
//! 1. [`coalesce_runs`] partitions the batch into [`Run`]s of
//!    consecutive variables sharing a group and identical arguments.
//! 2. [`prepare_run`] resolves widths, checks them for plausibility,
//!    and classifies the faces the run may write, yielding a
//!    [`RunSetup`].
//! 3. The condition walks [`RunSetup::faces`], builds a
//!    [`selvage_grid::FaceSlab`] per face, and fills it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod apply;
pub mod classify;
pub mod coalesce;
pub mod widths;

pub use apply::{copy_elements, prepare_run, RunSetup};
pub use classify::classify_faces;
pub use coalesce::{coalesce_runs, Run};
pub use widths::{check_plausible_widths, resolve_widths, MAX_SANE_WIDTH};
