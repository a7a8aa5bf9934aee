//! # Database Objects
//!
//! What a directory entry resolves to: a combination, or a stored object
//! tagged by major type.

use serde::{Deserialize, Serialize};

use crate::primitive::Primitive;
use crate::tree::BooleanTree;

/// Major type of geometric objects.
pub const MAJOR_TYPE_BRLCAD: u8 = 1;
/// Major type of uniform binary arrays.
pub const MAJOR_TYPE_BINARY_UNIF: u8 = 9;

// =============================================================================
// COMBINATION
// =============================================================================

/// A named grouping node over member references.
///
/// # Examples
/// ```
/// use csg_db::{BooleanTree, Combination};
/// let part = Combination::region(Some(BooleanTree::leaf("hull.s")));
/// assert!(part.region);
/// let group = Combination::assembly(None);
/// assert!(!group.region);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Terminal solid (part) rather than a grouping assembly.
    pub region: bool,
    /// Member expression; `None` when the combination has no members.
    pub tree: Option<BooleanTree>,
}

impl Combination {
    /// A region (part).
    pub fn region(tree: Option<BooleanTree>) -> Self {
        Self {
            region: true,
            tree,
        }
    }

    /// A plain assembly (group).
    pub fn assembly(tree: Option<BooleanTree>) -> Self {
        Self {
            region: false,
            tree,
        }
    }
}

// =============================================================================
// STORED DATA
// =============================================================================

/// Element type of a uniform binary array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniformKind {
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Signed byte.
    I8,
    /// Unsigned byte.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
}

impl UniformKind {
    /// Size of one element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            UniformKind::I8 | UniformKind::U8 => 1,
            UniformKind::I16 | UniformKind::U16 => 2,
            UniformKind::Float | UniformKind::I32 | UniformKind::U32 => 4,
            UniformKind::Double | UniformKind::I64 | UniformKind::U64 => 8,
        }
    }
}

/// A typed array with no shape semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryUniform {
    /// Element type.
    pub kind: UniformKind,
    /// Raw element bytes.
    pub data: Vec<u8>,
}

impl BinaryUniform {
    /// Number of whole elements in `data`.
    ///
    /// # Examples
    /// ```
    /// use csg_db::{BinaryUniform, UniformKind};
    /// let blob = BinaryUniform { kind: UniformKind::U16, data: vec![0; 7] };
    /// assert_eq!(blob.count(), 3);
    /// ```
    pub fn count(&self) -> usize {
        self.data.len() / self.kind.element_size()
    }
}

/// Stored object data, tagged by major type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectData {
    /// Geometric primitive.
    Geometry(Primitive),
    /// Uniform binary array.
    BinaryUniform(BinaryUniform),
    /// Any other major type.
    Foreign {
        /// The stored major type tag.
        major_type: u8,
    },
}

impl ObjectData {
    /// Major type tag of the stored object.
    pub fn major_type(&self) -> u8 {
        match self {
            ObjectData::Geometry(_) => MAJOR_TYPE_BRLCAD,
            ObjectData::BinaryUniform(_) => MAJOR_TYPE_BINARY_UNIF,
            ObjectData::Foreign { major_type } => *major_type,
        }
    }
}

/// A directory entry's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DbObject {
    /// A combination.
    Combination(Combination),
    /// Any stored object that is not a combination.
    Solid(ObjectData),
}

impl DbObject {
    /// Returns the combination, if this is one.
    pub fn as_combination(&self) -> Option<&Combination> {
        match self {
            DbObject::Combination(comb) => Some(comb),
            DbObject::Solid(_) => None,
        }
    }
}
