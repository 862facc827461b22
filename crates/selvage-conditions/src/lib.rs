//! The standard boundary conditions.
//!
//! Seven conditions cover the usual needs of a structured-grid solver:
//!
//! | name        | effect on each boundary point                          |
//! |-------------|--------------------------------------------------------|
//! | `scalar`    | set to a constant read from the argument table         |
//! | `flat`      | copy the nearest interior point outward                |
//! | `copy`      | copy from another variable at the same point           |
//! | `static`    | copy from the previous time level at the same point    |
//! | `robin`     | decay towards an asymptotic value with distance        |
//! | `radiative` | extrapolate an outgoing wave from two interior points  |
//! | `none`      | claim the boundary without writing anything            |
//!
//! [`StandardConditions`] registers any subset of them with a
//! [`selvage_registry::SelectionRegistry`], after which variables can
//! be selected by name and the whole set applied per sync phase:
//!
//! ```
//! use selvage_conditions::StandardConditions;
//! use selvage_core::{FaceSet, SyncPhase, TableHandle, WidthSpec};
//! use selvage_registry::{ApplyContext, SelectionRegistry};
//! use selvage_test_utils::MockPatch;
//!
//! let mut patch = MockPatch::builder()
//!     .extent(&[8])
//!     .group("state", selvage_core::ElemType::Real64, 1, &["state::u"])
//!     .build();
//! let var = patch.var("state::u");
//!
//! let mut registry = SelectionRegistry::new();
//! StandardConditions::default().register(&mut registry);
//! registry
//!     .select_var(var, FaceSet::ALL, WidthSpec::Uniform(1), TableHandle::NONE, "flat")
//!     .unwrap();
//!
//! let mut ctx = ApplyContext::new(&mut patch);
//! let report = registry.apply_phase(&mut ctx, SyncPhase::Before).unwrap();
//! assert_eq!(report.selections_applied, 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod copy;
pub mod flat;
pub mod none;
pub mod radiative;
pub mod register;
pub mod robin;
pub mod scalar;
pub mod static_bc;

mod params;

pub use copy::CopyBc;
pub use flat::FlatBc;
pub use none::NoneBc;
pub use radiative::RadiativeBc;
pub use register::StandardConditions;
pub use robin::RobinBc;
pub use scalar::ScalarBc;
pub use static_bc::StaticBc;
