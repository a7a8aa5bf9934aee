//! # Scene Elements
//!
//! Structured output of the converter, produced before any text is written.
//! Every conversion call returns a fresh element; nothing here refers back to
//! the database.

use std::fmt;

use csg_db::PrimitiveKind;
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// SHAPES
// =============================================================================

/// Triangles of an 8-point solid, as indices into the `vertices` of [`Shape::Mesh8`].
///
/// Two triangles per face, six faces. Faces of solids with fewer than six
/// faces collapse into zero-area triangles.
pub const ARB8_TRIANGLES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 5],
    [4, 3, 5],
    [2, 3, 4],
    [2, 4, 7],
    [0, 1, 6],
    [0, 5, 6],
    [1, 2, 6],
    [6, 7, 2],
    [4, 5, 6],
    [4, 6, 7],
];

/// A geometric scene node in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Torus placed by the `Torus` macro.
    Torus {
        /// Center of the torus.
        center: DVec3,
        /// Unit normal of the torus plane.
        normal: DVec3,
        /// Center to the middle of the tube.
        major_radius: f64,
        /// Tube radius.
        minor_radius: f64,
    },

    /// Right circular cylinder between two end points.
    Cylinder {
        /// Center of the base disc.
        base: DVec3,
        /// Center of the cap disc.
        cap: DVec3,
        /// Radius of both discs.
        radius: f64,
    },

    /// Circular cone frustum.
    Cone {
        /// Center of the base disc.
        base: DVec3,
        /// Radius at `base`.
        base_radius: f64,
        /// Center of the cap disc.
        cap: DVec3,
        /// Radius at `cap`.
        cap_radius: f64,
    },

    /// Elliptical frustum with semi-axis magnitudes at both ends.
    Supercone {
        /// Center of the base ellipse.
        base: DVec3,
        /// First base semi-axis length.
        a: f64,
        /// Second base semi-axis length.
        b: f64,
        /// Center of the cap ellipse.
        cap: DVec3,
        /// First cap semi-axis length.
        c: f64,
        /// Second cap semi-axis length.
        d: f64,
    },

    /// Right elliptical cylinder kept in its descriptive vector form.
    EllipticalCylinder {
        /// Center of the base ellipse.
        base: DVec3,
        /// Base center to top center.
        height: DVec3,
        /// First base semi-axis.
        a: DVec3,
        /// Second base semi-axis.
        b: DVec3,
        /// First top semi-axis.
        c: DVec3,
        /// Second top semi-axis.
        d: DVec3,
    },

    /// Ellipsoid given by its center and three radii.
    Spheroid {
        /// Center point.
        center: DVec3,
        /// Radius along each axis.
        radii: DVec3,
    },

    /// Sphere.
    Sphere {
        /// Center point.
        center: DVec3,
        /// Radius.
        radius: f64,
    },

    /// Triangle mesh over eight named vertices, faced by [`ARB8_TRIANGLES`].
    Mesh8 {
        /// Vertices `a` through `h`.
        vertices: [DVec3; 8],
    },

    /// Sphere-capped cone between two points.
    RoundCone {
        /// Center of the base sphere.
        base: DVec3,
        /// Radius at `base`.
        base_radius: f64,
        /// Center of the tip sphere.
        tip: DVec3,
        /// Radius at `tip`.
        tip_radius: f64,
    },
}

impl Shape {
    /// Scene include files the shape depends on.
    pub fn includes(&self) -> &'static [Include] {
        match self {
            Shape::Torus { .. } | Shape::Cylinder { .. } | Shape::Cone { .. } => &[Include::Colors],
            Shape::Sphere { .. } => &[Include::Colors],
            Shape::Supercone { .. } => &[Include::Shapes],
            Shape::Spheroid { .. } | Shape::RoundCone { .. } => &[Include::Colors, Include::Shapes],
            Shape::EllipticalCylinder { .. } | Shape::Mesh8 { .. } => &[],
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Torus { .. } => "torus",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Cone { .. } => "cone",
            Shape::Supercone { .. } => "supercone",
            Shape::EllipticalCylinder { .. } => "elliptical cylinder",
            Shape::Spheroid { .. } => "spheroid",
            Shape::Sphere { .. } => "sphere",
            Shape::Mesh8 { .. } => "mesh",
            Shape::RoundCone { .. } => "round cone",
        }
    }
}

/// Standard include files referenced by shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Include {
    /// `colors.inc`
    Colors,
    /// `shapes.inc`
    Shapes,
    /// `transforms.inc`
    Transforms,
}

impl Include {
    /// File name passed to `#include`.
    pub fn file_name(self) -> &'static str {
        match self {
            Include::Colors => "colors.inc",
            Include::Shapes => "shapes.inc",
            Include::Transforms => "transforms.inc",
        }
    }
}

/// Definitions written once, before the first shape that needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preamble {
    /// The `Torus(Center, Normal, Radius1, Radius2)` macro.
    TorusMacro,
}

// =============================================================================
// CONVERSION RESULTS
// =============================================================================

/// Why a stored object produced no geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unsupported {
    /// Geometric primitive with no scene equivalent, by type identifier.
    Primitive {
        /// Stored primitive type identifier.
        type_id: u16,
    },
    /// Stored object of a major type the converter does not know.
    MajorType {
        /// Stored major type tag.
        major_type: u8,
    },
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsupported::Primitive { type_id } => match PrimitiveKind::from_id(*type_id) {
                Some(kind) => write!(f, "unsupported primitive type {} ({type_id})", kind.name()),
                None => write!(f, "unrecognized primitive type ({type_id})"),
            },
            Unsupported::MajorType { major_type } => {
                write!(f, "unrecognized major type ({major_type})")
            }
        }
    }
}

/// Objects recognized but deliberately not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Uniform binary array.
    BinaryObject,
}

/// Result of converting one stored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Conversion {
    /// Drawable geometry.
    Shape {
        /// Set on the first shape that needs a one-time definition.
        preamble: Option<Preamble>,
        /// The converted shape.
        shape: Shape,
    },
    /// Recognized, noted, not drawn.
    Informational(Notice),
    /// No scene equivalent.
    Unsupported(Unsupported),
}

/// How a combination is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinationKind {
    /// A region, written as one part.
    Part,
    /// A grouping combination, written as an assembly.
    Assembly,
}

impl CombinationKind {
    /// Kind for a combination with the given region flag.
    pub fn from_region_flag(region: bool) -> Self {
        if region {
            CombinationKind::Part
        } else {
            CombinationKind::Assembly
        }
    }
}

/// One element of the output scene, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneElement {
    /// Structural description of a combination.
    Combination {
        /// Combination name.
        name: String,
        /// Part or assembly.
        kind: CombinationKind,
        /// Infix description of the member tree.
        description: String,
    },
    /// Converted stored object.
    Object {
        /// Object name.
        name: String,
        /// What the object converted to.
        conversion: Conversion,
    },
}

// =============================================================================
// TESTS
// =============================================================================
