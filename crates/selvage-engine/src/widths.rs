//! Resolving a selection's width specification to per-face widths.

use selvage_core::{
    ApplyError, ArgTables, FaceWidths, TableHandle, VarId, WidthSpec, BOUNDARY_WIDTH_KEY,
};
use smallvec::smallvec;

/// Largest boundary width accepted as a point count.
///
/// Boundaries deeper than this almost always mean a physical length
/// was passed where a number of grid points belongs.
pub const MAX_SANE_WIDTH: i64 = 100;

/// Resolve a width specification to one width per face.
///
/// [`WidthSpec::Uniform`] broadcasts its value to all `2 * dim` faces.
/// [`WidthSpec::FromTable`] reads `2 * dim` integers from `table`
/// under the [`BOUNDARY_WIDTH_KEY`] key, in face-slot order.
pub fn resolve_widths(
    tables: &dyn ArgTables,
    spec: WidthSpec,
    table: TableHandle,
    dim: u32,
) -> Result<FaceWidths, ApplyError> {
    let nfaces = 2 * dim as usize;
    match spec {
        WidthSpec::Uniform(width) => Ok((0..nfaces).map(|_| i64::from(width)).collect()),
        WidthSpec::FromTable => {
            let mut widths: FaceWidths = smallvec![0; nfaces];
            let total = tables
                .get_int_array(table, BOUNDARY_WIDTH_KEY, &mut widths)
                .map_err(|reason| ApplyError::WidthArrayUnreadable { reason })?;
            if total != nfaces {
                return Err(ApplyError::WidthArrayWrongLength {
                    found: total,
                    required: nfaces,
                });
            }
            Ok(widths)
        }
    }
}

/// Abort on widths too large to be point counts.
///
/// # Panics
///
/// Panics if any width exceeds [`MAX_SANE_WIDTH`]. Such a width would
/// silently overwrite most of the patch, so this is not recoverable
/// through the error channel.
pub fn check_plausible_widths(var: VarId, widths: &FaceWidths) {
    for (slot, &width) in widths.iter().enumerate() {
        if width > MAX_SANE_WIDTH {
            panic!(
                "boundary width {width} on face {} of variable {var} exceeds \
                 {MAX_SANE_WIDTH} points; widths count grid points, not physical distances",
                selvage_core::Face::from_slot(slot as u32),
            );
        }
    }
}
