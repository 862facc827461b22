//! Face-wise iteration over boundary slabs.

use crate::indexer::FlatIndexer;
use selvage_core::{Extents, Face, Side};
use smallvec::SmallVec;

/// One point of a boundary slab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlabPoint {
    /// Flat offset of the point in the variable's buffer.
    pub offset: usize,
    /// Points between this point and the first interior point on the
    /// slab's axis. The innermost boundary layer is 1, the face itself
    /// is the slab depth.
    pub inward_steps: u32,
}

/// The boundary region of one face: every point within the face's
/// stencil width, across the full computed extent of the transverse axes.
///
/// The slab depth is the width clamped to `0..=local[axis]`, so a
/// non-positive width yields an empty slab and an oversized one stops at
/// the axis extent. Points are visited in memory order, axis 0 fastest.
///
/// # Examples
///
/// ```
/// use selvage_core::{Face, Side};
/// use selvage_grid::{FaceSlab, FlatIndexer};
/// use smallvec::smallvec;
///
/// let local = smallvec![10];
/// let idx = FlatIndexer::new(&local);
/// let face = Face { axis: 0, side: Side::Lower };
/// let slab = FaceSlab::new(face, 2, &local, &idx);
///
/// let points: Vec<_> = slab.iter().map(|p| (p.offset, p.inward_steps)).collect();
/// assert_eq!(points, [(0, 2), (1, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct FaceSlab {
    face: Face,
    depth: usize,
    axis_extent: usize,
    start: SmallVec<[usize; 3]>,
    count: SmallVec<[usize; 3]>,
    strides: SmallVec<[usize; 3]>,
    inward_stride: isize,
}

impl FaceSlab {
    /// Build the slab for `face` with the given stencil `width`.
    ///
    /// `local` bounds the transverse axes; `indexer` supplies the flat
    /// strides. The face's axis must exist in `local`.
    pub fn new(face: Face, width: i64, local: &Extents, indexer: &FlatIndexer) -> Self {
        let axis = face.axis as usize;
        debug_assert!(axis < local.len());
        let axis_extent = local[axis];
        let depth = width.clamp(0, axis_extent as i64) as usize;

        let mut start = SmallVec::with_capacity(local.len());
        let mut count = SmallVec::with_capacity(local.len());
        let mut strides = SmallVec::with_capacity(local.len());
        for (a, &extent) in local.iter().enumerate() {
            if a == axis {
                start.push(match face.side {
                    Side::Lower => 0,
                    Side::Upper => extent - depth,
                });
                count.push(depth);
            } else {
                start.push(0);
                count.push(extent);
            }
            strides.push(indexer.stride(a));
        }
        let inward_stride = match face.side {
            Side::Lower => indexer.stride(axis) as isize,
            Side::Upper => -(indexer.stride(axis) as isize),
        };

        Self {
            face,
            depth,
            axis_extent,
            start,
            count,
            strides,
            inward_stride,
        }
    }

    /// The face this slab bounds.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Slab depth in points, after clamping.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Signed flat stride that moves one point inward from the face.
    pub fn inward_stride(&self) -> isize {
        self.inward_stride
    }

    /// Number of points the slab contains.
    pub fn point_count(&self) -> usize {
        self.count.iter().product()
    }

    /// Flat offset of the first interior point on a slab point's axis,
    /// at the same transverse coordinates.
    pub fn interior_offset(&self, point: SlabPoint) -> usize {
        (point.offset as isize + point.inward_steps as isize * self.inward_stride) as usize
    }

    /// Whether a second interior point exists beyond the first, for rules
    /// that difference two interior values.
    pub fn has_second_interior(&self) -> bool {
        self.axis_extent > self.depth + 1
    }

    /// Iterate the slab's points in memory order.
    pub fn iter(&self) -> SlabIter<'_> {
        SlabIter {
            slab: self,
            idx: self.start.clone(),
            done: self.point_count() == 0,
        }
    }
}

impl<'a> IntoIterator for &'a FaceSlab {
    type Item = SlabPoint;
    type IntoIter = SlabIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`FaceSlab`], in memory order.
#[derive(Clone, Debug)]
pub struct SlabIter<'a> {
    slab: &'a FaceSlab,
    idx: SmallVec<[usize; 3]>,
    done: bool,
}

impl Iterator for SlabIter<'_> {
    type Item = SlabPoint;

    fn next(&mut self) -> Option<SlabPoint> {
        if self.done {
            return None;
        }
        let slab = self.slab;
        let offset = self
            .idx
            .iter()
            .zip(slab.strides.iter())
            .map(|(i, s)| i * s)
            .sum();
        let axis = slab.face.axis as usize;
        let within = self.idx[axis] - slab.start[axis];
        let inward_steps = match slab.face.side {
            Side::Lower => (slab.depth - within) as u32,
            Side::Upper => (within + 1) as u32,
        };

        // Odometer advance, axis 0 fastest.
        let mut a = 0;
        loop {
            self.idx[a] += 1;
            if self.idx[a] < slab.start[a] + slab.count[a] {
                break;
            }
            self.idx[a] = slab.start[a];
            a += 1;
            if a == self.idx.len() {
                self.done = true;
                break;
            }
        }

        Some(SlabPoint {
            offset,
            inward_steps,
        })
    }
}
