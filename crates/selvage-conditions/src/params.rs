//! Reading optional per-selection parameters from argument tables.
//!
//! Conditions treat their table parameters as optional with defaults:
//! a selection with no table, or a table without the key, silently
//! uses the default, while a table that exists but cannot be read
//! raises a [`ApplyWarning::BadTableHandle`] warning and still falls
//! back to the default. Application never fails over a parameter.

use selvage_core::{ApplyWarning, ArgTables, TableError, TableHandle};
use selvage_registry::ApplyContext;

pub(crate) fn real_param(
    ctx: &mut ApplyContext<'_>,
    table: TableHandle,
    key: &'static str,
    default: f64,
) -> f64 {
    if table.is_none() {
        return default;
    }
    match ctx.patch().get_real(table, key) {
        Ok(value) => value,
        Err(TableError::NoSuchKey) => default,
        Err(_) => {
            ctx.warn(ApplyWarning::BadTableHandle { key, table });
            default
        }
    }
}

pub(crate) fn int_param(
    ctx: &mut ApplyContext<'_>,
    table: TableHandle,
    key: &'static str,
    default: i64,
) -> i64 {
    if table.is_none() {
        return default;
    }
    match ctx.patch().get_int(table, key) {
        Ok(value) => value,
        Err(TableError::NoSuchKey) => default,
        Err(_) => {
            ctx.warn(ApplyWarning::BadTableHandle { key, table });
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selvage_test_utils::MockPatch;

    #[test]
    fn absent_table_and_absent_key_default_silently() {
        let mut patch = MockPatch::builder().extent(&[4]).build();
        let empty = patch.add_table();
        let mut ctx = ApplyContext::new(&mut patch);
        assert_eq!(real_param(&mut ctx, TableHandle::NONE, "FINF", 2.5), 2.5);
        assert_eq!(real_param(&mut ctx, empty, "FINF", 2.5), 2.5);
        assert_eq!(int_param(&mut ctx, empty, "DECAY_POWER", 1), 1);
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn present_key_overrides_the_default() {
        let mut patch = MockPatch::builder().extent(&[4]).build();
        let table = patch.add_table();
        patch.table_set_real(table, "FINF", -3.0);
        patch.table_set_int(table, "DECAY_POWER", 2);
        let mut ctx = ApplyContext::new(&mut patch);
        assert_eq!(real_param(&mut ctx, table, "FINF", 0.0), -3.0);
        assert_eq!(int_param(&mut ctx, table, "DECAY_POWER", 1), 2);
    }

    #[test]
    fn unreadable_key_warns_and_defaults() {
        let mut patch = MockPatch::builder().extent(&[4]).build();
        let table = patch.add_table();
        patch.table_set_str(table, "FINF", "not a number");
        let mut ctx = ApplyContext::new(&mut patch);
        assert_eq!(real_param(&mut ctx, table, "FINF", 0.5), 0.5);
        assert_eq!(
            ctx.warnings(),
            &[ApplyWarning::BadTableHandle { key: "FINF", table }]
        );
    }
}
