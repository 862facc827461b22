//! Deciding which faces of a patch a condition may write.

use selvage_core::{ApplyError, Face, FaceSet, FaceWidths, GridInfo};

/// Classify the faces a boundary condition is allowed to fill.
///
/// A face is eligible when all of the following hold:
///
/// * it is physical, i.e. not claimed by a symmetry condition;
/// * the selection mask covers it (an [`FaceSet::ALL`] mask covers
///   every face);
/// * the patch extends strictly past the boundary width on the face's
///   axis, so at least one interior point remains;
/// * it lies on the outer boundary of the global domain;
/// * it matches `restrict`, when a single-face restriction is given.
///
/// Faces excluded here are simply skipped; only a `restrict` naming an
/// axis the patch does not have is an error.
///
/// # Panics
///
/// Panics if the host cannot report its symmetry faces
/// ([`GridInfo::symmetry_faces`] returns `None`). Guessing would risk
/// overwriting symmetry zones, which corrupts the solution silently.
pub fn classify_faces(
    grid: &dyn GridInfo,
    dim: u32,
    widths: &FaceWidths,
    mask: FaceSet,
    restrict: Option<Face>,
) -> Result<FaceSet, ApplyError> {
    if let Some(face) = restrict {
        if face.axis >= dim {
            return Err(ApplyError::InvalidRestriction { face, dim });
        }
    }
    let symmetry = match grid.symmetry_faces() {
        Some(faces) => faces,
        None => panic!("symmetry interface failed; cannot tell physical faces from symmetry faces"),
    };
    let outer = grid.outer_boundary();
    let local = grid.local_extent();

    let mut eligible = FaceSet::empty();
    for face in FaceSet::ALL.faces(dim) {
        if symmetry.contains(face) {
            continue;
        }
        if !mask.is_all() && !mask.contains(face) {
            continue;
        }
        if local[face.axis as usize] as i64 <= widths[face.slot() as usize] {
            continue;
        }
        if !outer.contains(face) {
            continue;
        }
        if restrict.is_some_and(|only| only != face) {
            continue;
        }
        eligible.insert(face);
    }
    Ok(eligible)
}
