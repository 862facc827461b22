//! Grid faces and the [`FaceSet`] bitmask.

use std::fmt;

/// Highest grid dimensionality the face model supports.
///
/// A `dim`-dimensional grid has `2 * dim` faces, so face slots range over
/// `0..2 * MAX_DIM`.
pub const MAX_DIM: u32 = 3;

/// Which end of an axis a face lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The low-coordinate end of the axis.
    Lower,
    /// The high-coordinate end of the axis.
    Upper,
}

impl Side {
    /// 0 for lower, 1 for upper — the side's contribution to the face slot.
    pub fn index(self) -> u32 {
        match self {
            Self::Lower => 0,
            Self::Upper => 1,
        }
    }

    /// The side at the other end of the axis.
    pub fn opposite(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

/// One outer face of a grid: a side of one axis.
///
/// Faces are numbered by slot, `2 * axis + side`, giving the order
/// lower-x, upper-x, lower-y, upper-y, lower-z, upper-z. A
/// `dim`-dimensional grid has faces in slots `0..2 * dim`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    /// Axis the face bounds (0 = x, the fastest-varying axis).
    pub axis: u32,
    /// Which end of the axis.
    pub side: Side,
}

impl Face {
    /// Construct a face from its slot number.
    pub fn from_slot(slot: u32) -> Self {
        let side = if slot % 2 == 0 { Side::Lower } else { Side::Upper };
        Self {
            axis: slot / 2,
            side,
        }
    }

    /// The face's slot number, `2 * axis + side`.
    pub fn slot(self) -> u32 {
        2 * self.axis + self.side.index()
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            0 => write!(f, "{}-x", self.side),
            1 => write!(f, "{}-y", self.side),
            2 => write!(f, "{}-z", self.side),
            axis => write!(f, "{}-axis{axis}", self.side),
        }
    }
}

/// A set of grid faces stored as a bitmask over face slots.
///
/// [`FaceSet::ALL`] is a distinguished "every face" marker used by
/// selections. It is not equal to any mask built by inserting individual
/// faces: an explicit mask that happens to cover every face of a grid
/// still reports `is_all() == false`, and the application engine treats
/// the two differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceSet(u32);

impl FaceSet {
    /// Marker meaning "every face of the variable's grid".
    pub const ALL: FaceSet = FaceSet(u32::MAX);

    /// Create an empty face set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The explicit mask covering every face of a `dim`-dimensional grid.
    ///
    /// Unlike [`ALL`](Self::ALL), this is an ordinary mask.
    pub fn full(dim: u32) -> Self {
        Self((1u32 << (2 * dim)) - 1)
    }

    /// Insert a face into the set.
    pub fn insert(&mut self, face: Face) {
        self.0 |= 1u32 << face.slot();
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, face: Face) -> Self {
        self.insert(face);
        self
    }

    /// Check whether the set contains a face. [`ALL`](Self::ALL) contains
    /// every face.
    pub fn contains(self, face: Face) -> bool {
        self.0 & (1u32 << face.slot()) != 0
    }

    /// Returns `true` if this is the [`ALL`](Self::ALL) marker.
    pub fn is_all(self) -> bool {
        self == Self::ALL
    }

    /// Returns `true` if the set contains no faces.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw slot bitmask.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Iterate the faces of the set belonging to a `dim`-dimensional grid,
    /// in slot order.
    pub fn faces(self, dim: u32) -> impl Iterator<Item = Face> {
        (0..2 * dim)
            .map(Face::from_slot)
            .filter(move |face| self.contains(*face))
    }
}

impl fmt::Display for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            write!(f, "all")
        } else {
            write!(f, "{:#b}", self.0)
        }
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = Self::empty();
        for face in iter {
            set.insert(face);
        }
        set
    }
}
