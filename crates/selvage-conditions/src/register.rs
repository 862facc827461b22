//! Registering the standard conditions with a selection registry.

use selvage_core::SyncPhase;
use selvage_registry::SelectionRegistry;

use crate::{CopyBc, FlatBc, NoneBc, RadiativeBc, RobinBc, ScalarBc, StaticBc};

/// Which of the standard conditions to register.
///
/// All seven are enabled by default; disable individual flags to leave
/// a name free for a custom replacement:
///
/// ```
/// use selvage_conditions::StandardConditions;
/// use selvage_registry::SelectionRegistry;
///
/// let mut registry = SelectionRegistry::new();
/// StandardConditions {
///     radiative: false,
///     ..StandardConditions::default()
/// }
/// .register(&mut registry);
///
/// assert!(registry.is_registered("flat"));
/// assert!(!registry.is_registered("radiative"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StandardConditions {
    /// Register [`ScalarBc`] as `"scalar"`.
    pub scalar: bool,
    /// Register [`FlatBc`] as `"flat"`.
    pub flat: bool,
    /// Register [`CopyBc`] as `"copy"`.
    pub copy: bool,
    /// Register [`StaticBc`] as `"static"`.
    pub static_: bool,
    /// Register [`RobinBc`] as `"robin"`.
    pub robin: bool,
    /// Register [`RadiativeBc`] as `"radiative"`.
    pub radiative: bool,
    /// Register [`NoneBc`] as `"none"`.
    pub none: bool,
}

impl Default for StandardConditions {
    fn default() -> Self {
        Self {
            scalar: true,
            flat: true,
            copy: true,
            static_: true,
            robin: true,
            radiative: true,
            none: true,
        }
    }
}

impl StandardConditions {
    /// Register the enabled conditions under their lowercase names.
    ///
    /// All registrations use [`SyncPhase::Before`], so the conditions
    /// run ahead of inter-patch synchronization. Existing handlers
    /// under the same names are replaced.
    pub fn register(self, registry: &mut SelectionRegistry) {
        if self.scalar {
            registry.register("scalar", SyncPhase::Before, Box::new(ScalarBc::new()));
        }
        if self.flat {
            registry.register("flat", SyncPhase::Before, Box::new(FlatBc::new()));
        }
        if self.copy {
            registry.register("copy", SyncPhase::Before, Box::new(CopyBc::new()));
        }
        if self.static_ {
            registry.register("static", SyncPhase::Before, Box::new(StaticBc::new()));
        }
        if self.robin {
            registry.register("robin", SyncPhase::Before, Box::new(RobinBc::new()));
        }
        if self.radiative {
            registry.register("radiative", SyncPhase::Before, Box::new(RadiativeBc::new()));
        }
        if self.none {
            registry.register("none", SyncPhase::Before, Box::new(NoneBc::new()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_all_seven_by_default() {
        let mut registry = SelectionRegistry::new();
        StandardConditions::default().register(&mut registry);
        for name in ["scalar", "flat", "copy", "static", "robin", "radiative", "none"] {
            assert!(registry.is_registered(name), "{name} missing");
            assert_eq!(registry.phase_of(name), Some(SyncPhase::Before));
        }
    }

    #[test]
    fn disabled_conditions_are_skipped() {
        let mut registry = SelectionRegistry::new();
        StandardConditions {
            copy: false,
            static_: false,
            ..StandardConditions::default()
        }
        .register(&mut registry);
        assert!(!registry.is_registered("copy"));
        assert!(!registry.is_registered("static"));
        assert!(registry.is_registered("scalar"));
    }
}
