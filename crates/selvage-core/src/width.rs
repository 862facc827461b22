//! Stencil-width specifications and resolved per-face widths.

use smallvec::SmallVec;

/// Table key under which per-face width arrays are stored.
pub const BOUNDARY_WIDTH_KEY: &str = "BOUNDARY_WIDTH";

/// How many boundary points a selection fills, before resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthSpec {
    /// One width applied to every face of the variable.
    Uniform(u32),
    /// Read a per-face width array from the selection's argument table
    /// under [`BOUNDARY_WIDTH_KEY`] (`2 * dim` integers in face-slot order).
    FromTable,
}

/// Resolved per-face widths in face-slot order (`2 * dim` entries).
///
/// Uses `SmallVec<[i64; 6]>` so grids up to [`MAX_DIM`](crate::face::MAX_DIM)
/// dimensions never allocate. Entries read from a table may be negative;
/// a non-positive width selects no boundary points on that face.
pub type FaceWidths = SmallVec<[i64; 6]>;
