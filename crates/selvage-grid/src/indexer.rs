//! Flat addressing over allocated grid extents.

use selvage_core::Extents;
use smallvec::SmallVec;

/// Flat addressing into a grid buffer laid out axis 0 fastest.
///
/// Strides derive from the allocated extents, which may exceed the
/// computed extents when the host pads its buffers. A point with
/// per-axis indices `[i, j, k]` lives at flat offset
/// `i + alloc[0] * (j + alloc[1] * k)`.
///
/// # Examples
///
/// ```
/// use selvage_grid::FlatIndexer;
/// use smallvec::smallvec;
///
/// let idx = FlatIndexer::new(&smallvec![4, 5, 6]);
/// assert_eq!(idx.offset(&[1, 2, 0]), 9);
/// assert_eq!(idx.stride(1), 4);
/// assert_eq!(idx.volume(), 120);
/// ```
#[derive(Clone, Debug)]
pub struct FlatIndexer {
    alloc: Extents,
    strides: SmallVec<[usize; 3]>,
}

impl FlatIndexer {
    /// Build an indexer over the given allocated extents.
    pub fn new(alloc: &Extents) -> Self {
        let mut strides = SmallVec::with_capacity(alloc.len());
        let mut stride = 1usize;
        for &extent in alloc.iter() {
            strides.push(stride);
            stride *= extent;
        }
        Self {
            alloc: alloc.clone(),
            strides,
        }
    }

    /// Number of grid axes.
    pub fn dim(&self) -> usize {
        self.alloc.len()
    }

    /// The allocated extents the strides derive from.
    pub fn alloc_extent(&self) -> &Extents {
        &self.alloc
    }

    /// Flat offset of a point given its per-axis indices.
    pub fn offset(&self, point: &[usize]) -> usize {
        debug_assert_eq!(point.len(), self.strides.len());
        point
            .iter()
            .zip(self.strides.iter())
            .map(|(p, s)| p * s)
            .sum()
    }

    /// Flat distance between points one index apart on `axis`.
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Total allocated points.
    pub fn volume(&self) -> usize {
        self.alloc.iter().product()
    }
}
