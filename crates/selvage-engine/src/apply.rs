//! Per-run preparation and element movement between storage buffers.

use selvage_core::{
    ApplyError, ApplyWarning, BoundaryPatch, Extents, Face, FaceSet, FaceWidths, GridInfo,
    VarCatalog, VarData, VarId, VarSlice, VarSliceMut, MAX_DIM,
};
use selvage_grid::{FaceSlab, FlatIndexer};
use selvage_registry::ApplyContext;

use crate::classify::classify_faces;
use crate::coalesce::Run;
use crate::widths::{check_plausible_widths, resolve_widths};

/// Geometry and eligibility prepared once per [`Run`].
#[derive(Clone, Debug)]
pub struct RunSetup {
    /// Grid dimensionality of the run's group.
    pub dim: u32,
    /// Faces the run is allowed to fill.
    pub eligible: FaceSet,
    /// Resolved per-face boundary widths.
    pub widths: FaceWidths,
    /// Local extent of the patch.
    pub local: Extents,
    /// Indexer over the allocated extent of the patch.
    pub indexer: FlatIndexer,
}

impl RunSetup {
    /// Iterate the eligible faces in face-slot order.
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.eligible.faces(self.dim)
    }

    /// The boundary slab of one face.
    pub fn slab(&self, face: Face) -> FaceSlab {
        FaceSlab::new(
            face,
            self.widths[face.slot() as usize],
            &self.local,
            &self.indexer,
        )
    }
}

/// Resolve widths and classify eligible faces for one run.
///
/// A run carrying an explicit face mask raises a
/// [`ApplyWarning::FacesNotAll`] warning and is then treated as if
/// every face had been selected; conditions in this crate family only
/// support whole-boundary application.
///
/// # Panics
///
/// Panics on implausible widths and on a failed symmetry interface;
/// see [`check_plausible_widths`] and [`classify_faces`].
pub fn prepare_run(
    ctx: &mut ApplyContext<'_>,
    run: &Run,
    restrict: Option<Face>,
) -> Result<RunSetup, ApplyError> {
    let dim = ctx
        .patch()
        .group_dim(run.group)
        .ok_or(ApplyError::UnknownVariable { var: run.first })?;
    if dim == 0 || dim > MAX_DIM {
        return Err(ApplyError::UnsupportedDimension { dim });
    }
    if !run.faces.is_all() {
        ctx.warn(ApplyWarning::FacesNotAll {
            var: run.first,
            faces: run.faces,
        });
    }
    let widths = resolve_widths(ctx.patch(), run.width, run.table, dim)?;
    check_plausible_widths(run.first, &widths);
    let eligible = classify_faces(ctx.patch(), dim, &widths, FaceSet::ALL, restrict)?;
    let local = ctx.patch().local_extent();
    let indexer = FlatIndexer::new(&ctx.patch().alloc_extent());
    Ok(RunSetup {
        dim,
        eligible,
        widths,
        local,
        indexer,
    })
}

/// Copy the elements at `offsets` from one storage buffer to another.
///
/// The source is read in full before the destination is opened, so the
/// two may belong to the same variable (as when copying between time
/// levels). Fails with [`ApplyError::ElemTypeMismatch`] when the two
/// buffers hold different element types and with
/// [`ApplyError::StorageUnavailable`] when either buffer is absent.
pub fn copy_elements(
    patch: &mut dyn BoundaryPatch,
    src: VarId,
    src_level: usize,
    dest: VarId,
    dest_level: usize,
    offsets: &[usize],
) -> Result<(), ApplyError> {
    let gathered = {
        let slice = patch.read(src, src_level).ok_or(ApplyError::StorageUnavailable {
            var: src,
            level: src_level,
        })?;
        ElemVec::gather(slice, offsets)
    };
    let mut out = patch
        .write(dest, dest_level)
        .ok_or(ApplyError::StorageUnavailable {
            var: dest,
            level: dest_level,
        })?;
    gathered.scatter(&mut out, offsets)
}

/// An owned, typed vector of gathered elements.
enum ElemVec {
    Byte(Vec<u8>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
    Complex32(Vec<selvage_core::Complex<f32>>),
    Complex64(Vec<selvage_core::Complex<f64>>),
}

impl ElemVec {
    fn gather(slice: VarSlice<'_>, offsets: &[usize]) -> Self {
        fn pick<T: Copy>(data: &[T], offsets: &[usize]) -> Vec<T> {
            offsets.iter().map(|&offset| data[offset]).collect()
        }
        match slice {
            VarSlice::Byte(data) => Self::Byte(pick(data, offsets)),
            VarSlice::Int32(data) => Self::Int32(pick(data, offsets)),
            VarSlice::Int64(data) => Self::Int64(pick(data, offsets)),
            VarSlice::Real32(data) => Self::Real32(pick(data, offsets)),
            VarSlice::Real64(data) => Self::Real64(pick(data, offsets)),
            VarSlice::Complex32(data) => Self::Complex32(pick(data, offsets)),
            VarSlice::Complex64(data) => Self::Complex64(pick(data, offsets)),
        }
    }

    fn scatter(&self, out: &mut VarSliceMut<'_>, offsets: &[usize]) -> Result<(), ApplyError> {
        fn place<T: Copy>(data: &mut [T], values: &[T], offsets: &[usize]) {
            for (&offset, &value) in offsets.iter().zip(values) {
                data[offset] = value;
            }
        }
        match (&mut *out, self) {
            (VarSliceMut::Byte(data), Self::Byte(values)) => place(data, values, offsets),
            (VarSliceMut::Int32(data), Self::Int32(values)) => place(data, values, offsets),
            (VarSliceMut::Int64(data), Self::Int64(values)) => place(data, values, offsets),
            (VarSliceMut::Real32(data), Self::Real32(values)) => place(data, values, offsets),
            (VarSliceMut::Real64(data), Self::Real64(values)) => place(data, values, offsets),
            (VarSliceMut::Complex32(data), Self::Complex32(values)) => {
                place(data, values, offsets)
            }
            (VarSliceMut::Complex64(data), Self::Complex64(values)) => {
                place(data, values, offsets)
            }
            (dest, src) => {
                return Err(ApplyError::ElemTypeMismatch {
                    dest: dest.elem_type(),
                    src: src.elem_type(),
                })
            }
        }
        Ok(())
    }

    fn elem_type(&self) -> selvage_core::ElemType {
        use selvage_core::ElemType;
        match self {
            Self::Byte(_) => ElemType::Byte,
            Self::Int32(_) => ElemType::Int32,
            Self::Int64(_) => ElemType::Int64,
            Self::Real32(_) => ElemType::Real32,
            Self::Real64(_) => ElemType::Real64,
            Self::Complex32(_) => ElemType::Complex32,
            Self::Complex64(_) => ElemType::Complex64,
        }
    }
}
