//! Benchmark profiles and utilities for the selvage boundary system.
//!
//! Provides pre-built host patches and registries for benchmarking and
//! examples:
//!
//! - [`shell_patch`]: a cubic real-valued patch with a configurable
//!   number of variables
//! - [`seed_field`]: deterministic pseudo-random field seeding
//! - [`standard_registry`]: a registry with all standard conditions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use selvage_conditions::StandardConditions;
use selvage_core::{ElemType, VarId};
use selvage_registry::SelectionRegistry;
use selvage_test_utils::MockPatch;

/// Build an `n`-cubed patch holding `vars` real-valued variables in one
/// group named `bench`, members `bench::v0`, `bench::v1`, ...
pub fn shell_patch(n: usize, dim: u32, vars: u32) -> MockPatch {
    let extent: Vec<usize> = (0..dim).map(|_| n).collect();
    let names: Vec<String> = (0..vars).map(|i| format!("bench::v{i}")).collect();
    let members: Vec<&str> = names.iter().map(String::as_str).collect();
    MockPatch::builder()
        .extent(&extent)
        .group("bench", ElemType::Real64, 2, &members)
        .build()
}

/// Fill a variable's level-0 storage with deterministic pseudo-random
/// values derived from `seed`.
pub fn seed_field(patch: &mut MockPatch, var: VarId, seed: u64) {
    let len = patch.real64(var, 0).len();
    let values: Vec<f64> = (0..len as u64)
        .map(|i| {
            let bits = (seed.wrapping_add(i)).wrapping_mul(6364136223846793005);
            // Map to [0, 1) from the top 53 bits.
            (bits >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect();
    patch.set_real64(var, 0, &values);
}

/// A registry with the full standard condition set registered.
pub fn standard_registry() -> SelectionRegistry {
    let mut registry = SelectionRegistry::new();
    StandardConditions::default().register(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_patch_declares_the_requested_variables() {
        let patch = shell_patch(8, 3, 4);
        for i in 0..4 {
            let var = patch.var(&format!("bench::v{i}"));
            assert_eq!(patch.real64(var, 0).len(), 512);
        }
    }

    #[test]
    fn seeding_is_deterministic_and_bounded() {
        let mut a = shell_patch(8, 2, 1);
        let mut b = shell_patch(8, 2, 1);
        let var = a.var("bench::v0");
        seed_field(&mut a, var, 42);
        seed_field(&mut b, var, 42);
        assert_eq!(a.real64(var, 0), b.real64(var, 0));
        assert!(a.real64(var, 0).iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn registry_profile_has_the_standard_set() {
        let registry = standard_registry();
        for name in ["scalar", "flat", "copy", "static", "robin", "radiative", "none"] {
            assert!(registry.is_registered(name));
        }
    }
}
