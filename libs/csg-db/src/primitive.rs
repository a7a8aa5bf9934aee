//! # Primitive Payloads
//!
//! Type-tagged parametric solids stored in the database.
//!
//! Payloads are kept in their local frame. [`Primitive::transformed`] maps a
//! payload through an accumulated placement matrix the way the database
//! import does: points through the full matrix, direction vectors through its
//! linear part, scalar radii by the matrix's uniform scale.

use glam::{DMat3, DMat4, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// PRIMITIVE KINDS
// =============================================================================

/// Closed enumeration of primitive type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Torus (1).
    Torus,
    /// Truncated general cone (2).
    Tgc,
    /// Ellipsoid (3).
    Ellipsoid,
    /// Eight-point convex solid (4).
    Arb8,
    /// Arbitrary faceted solid (5).
    Ars,
    /// Half-space (6).
    HalfSpace,
    /// Right elliptical cylinder (7).
    Rec,
    /// Polygonal solid (8).
    Poly,
    /// B-spline solid (9).
    Bspline,
    /// Sphere (10).
    Sphere,
    /// Non-manifold geometry (11).
    Nmg,
    /// Extruded bitmap (12).
    Ebm,
    /// Voxel volume (13).
    Vol,
    /// Plane-bounded convex solid (14).
    Arbn,
    /// Pipe (15).
    Pipe,
    /// Particle (16).
    Particle,
    /// Right parabolic cylinder (17).
    Rpc,
    /// Right hyperbolic cylinder (18).
    Rhc,
    /// Elliptical paraboloid (19).
    Epa,
    /// Elliptical hyperboloid (20).
    Ehy,
    /// Elliptical torus (21).
    Eto,
    /// Grip (22).
    Grip,
    /// Joint (23).
    Joint,
    /// Height field (24).
    HeightField,
    /// Displacement map (25).
    Dsp,
    /// Sketch (26).
    Sketch,
    /// Extrusion (27).
    Extrude,
    /// Submodel (28).
    Submodel,
    /// Line-element solid (29).
    Cline,
    /// Bag of triangles (30).
    Bot,
}

impl PrimitiveKind {
    /// Every kind, ordered by type identifier.
    pub const ALL: [PrimitiveKind; 30] = [
        PrimitiveKind::Torus,
        PrimitiveKind::Tgc,
        PrimitiveKind::Ellipsoid,
        PrimitiveKind::Arb8,
        PrimitiveKind::Ars,
        PrimitiveKind::HalfSpace,
        PrimitiveKind::Rec,
        PrimitiveKind::Poly,
        PrimitiveKind::Bspline,
        PrimitiveKind::Sphere,
        PrimitiveKind::Nmg,
        PrimitiveKind::Ebm,
        PrimitiveKind::Vol,
        PrimitiveKind::Arbn,
        PrimitiveKind::Pipe,
        PrimitiveKind::Particle,
        PrimitiveKind::Rpc,
        PrimitiveKind::Rhc,
        PrimitiveKind::Epa,
        PrimitiveKind::Ehy,
        PrimitiveKind::Eto,
        PrimitiveKind::Grip,
        PrimitiveKind::Joint,
        PrimitiveKind::HeightField,
        PrimitiveKind::Dsp,
        PrimitiveKind::Sketch,
        PrimitiveKind::Extrude,
        PrimitiveKind::Submodel,
        PrimitiveKind::Cline,
        PrimitiveKind::Bot,
    ];

    /// Numeric type identifier as stored in the database.
    ///
    /// # Examples
    /// ```
    /// use csg_db::PrimitiveKind;
    /// assert_eq!(PrimitiveKind::Torus.id(), 1);
    /// assert_eq!(PrimitiveKind::Bot.id(), 30);
    /// ```
    pub fn id(self) -> u16 {
        // ALL is ordered by identifier starting at 1.
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .map_or(0, |index| index as u16 + 1)
    }

    /// Looks a kind up by its numeric identifier.
    ///
    /// # Examples
    /// ```
    /// use csg_db::PrimitiveKind;
    /// assert_eq!(PrimitiveKind::from_id(10), Some(PrimitiveKind::Sphere));
    /// assert_eq!(PrimitiveKind::from_id(0), None);
    /// assert_eq!(PrimitiveKind::from_id(99), None);
    /// ```
    pub fn from_id(id: u16) -> Option<Self> {
        let index = usize::from(id).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Short type name used in listings and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Torus => "tor",
            PrimitiveKind::Tgc => "tgc",
            PrimitiveKind::Ellipsoid => "ell",
            PrimitiveKind::Arb8 => "arb8",
            PrimitiveKind::Ars => "ars",
            PrimitiveKind::HalfSpace => "half",
            PrimitiveKind::Rec => "rec",
            PrimitiveKind::Poly => "poly",
            PrimitiveKind::Bspline => "bspline",
            PrimitiveKind::Sphere => "sph",
            PrimitiveKind::Nmg => "nmg",
            PrimitiveKind::Ebm => "ebm",
            PrimitiveKind::Vol => "vol",
            PrimitiveKind::Arbn => "arbn",
            PrimitiveKind::Pipe => "pipe",
            PrimitiveKind::Particle => "part",
            PrimitiveKind::Rpc => "rpc",
            PrimitiveKind::Rhc => "rhc",
            PrimitiveKind::Epa => "epa",
            PrimitiveKind::Ehy => "ehy",
            PrimitiveKind::Eto => "eto",
            PrimitiveKind::Grip => "grip",
            PrimitiveKind::Joint => "joint",
            PrimitiveKind::HeightField => "hf",
            PrimitiveKind::Dsp => "dsp",
            PrimitiveKind::Sketch => "sketch",
            PrimitiveKind::Extrude => "extrude",
            PrimitiveKind::Submodel => "submodel",
            PrimitiveKind::Cline => "cline",
            PrimitiveKind::Bot => "bot",
        }
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Torus about `normal` through `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    /// Center of the torus.
    pub center: DVec3,
    /// Unit normal of the torus plane.
    pub normal: DVec3,
    /// Distance from the center to the middle of the tube.
    pub major_radius: f64,
    /// Tube radius.
    pub minor_radius: f64,
}

impl Torus {
    /// Creates a torus; `normal` is normalized.
    pub fn new(center: DVec3, normal: DVec3, major_radius: f64, minor_radius: f64) -> Self {
        Self {
            center,
            normal: normal.normalize_or_zero(),
            major_radius,
            minor_radius,
        }
    }
}

/// Truncated general cone: base point, height vector, semi-axes `a`/`b` at
/// the base and `c`/`d` at the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tgc {
    /// Center of the base ellipse.
    pub base: DVec3,
    /// Base center to top center.
    pub height: DVec3,
    /// First base semi-axis.
    pub a: DVec3,
    /// Second base semi-axis.
    pub b: DVec3,
    /// First top semi-axis.
    pub c: DVec3,
    /// Second top semi-axis.
    pub d: DVec3,
}

impl Tgc {
    /// Creates a cone from its six vectors.
    pub fn new(base: DVec3, height: DVec3, a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> Self {
        Self {
            base,
            height,
            a,
            b,
            c,
            d,
        }
    }

    /// Circular frustum with base radius `r1` and top radius `r2`.
    ///
    /// # Examples
    /// ```
    /// use csg_db::Tgc;
    /// use glam::DVec3;
    /// let tgc = Tgc::truncated_cone(DVec3::ZERO, DVec3::Z * 10.0, 2.0, 1.0);
    /// assert!((tgc.a.length() - 2.0).abs() < 1e-12);
    /// assert!((tgc.d.length() - 1.0).abs() < 1e-12);
    /// assert!(tgc.a.dot(tgc.height).abs() < 1e-12);
    /// ```
    pub fn truncated_cone(base: DVec3, height: DVec3, r1: f64, r2: f64) -> Self {
        let (u, v) = height.normalize_or_zero().any_orthonormal_pair();
        Self {
            base,
            height,
            a: u * r1,
            b: v * r1,
            c: u * r2,
            d: v * r2,
        }
    }

    /// Right circular cylinder.
    pub fn cylinder(base: DVec3, height: DVec3, radius: f64) -> Self {
        Self::truncated_cone(base, height, radius, radius)
    }

    /// The point at the top end, `base + height`.
    pub fn top(&self) -> DVec3 {
        self.base + self.height
    }
}

/// Ellipsoid with center and three semi-axis vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Center point.
    pub center: DVec3,
    /// First semi-axis.
    pub a: DVec3,
    /// Second semi-axis.
    pub b: DVec3,
    /// Third semi-axis.
    pub c: DVec3,
}

impl Ellipsoid {
    /// Creates an ellipsoid from its center and semi-axes.
    pub fn new(center: DVec3, a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self { center, a, b, c }
    }

    /// Axis-aligned sphere in ellipsoid layout.
    pub fn sphere(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            a: DVec3::X * radius,
            b: DVec3::Y * radius,
            c: DVec3::Z * radius,
        }
    }
}

/// Sphere payloads share the ellipsoid layout.
pub type Sphere = Ellipsoid;

/// Convex solid given by eight vertices.
///
/// Faces, counter-clockwise seen from outside:
/// `0123, 7654, 0347, 1562, 0451, 3267`. Solids with fewer than six faces
/// repeat vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arb8 {
    /// Vertices in database order.
    pub points: [DVec3; 8],
}

impl Arb8 {
    /// Creates a solid from eight vertices.
    pub fn new(points: [DVec3; 8]) -> Self {
        Self { points }
    }

    /// Axis-aligned box between `min` and `max`.
    pub fn from_box(min: DVec3, max: DVec3) -> Self {
        Self {
            points: [
                DVec3::new(max.x, min.y, min.z),
                DVec3::new(max.x, max.y, min.z),
                DVec3::new(max.x, max.y, max.z),
                DVec3::new(max.x, min.y, max.z),
                DVec3::new(min.x, min.y, min.z),
                DVec3::new(min.x, max.y, min.z),
                DVec3::new(min.x, max.y, max.z),
                DVec3::new(min.x, min.y, max.z),
            ],
        }
    }
}

/// Particle: a sphere swept along `height`, radius varying linearly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center of the base sphere.
    pub base: DVec3,
    /// Base center to tip center.
    pub height: DVec3,
    /// Radius at `base`.
    pub base_radius: f64,
    /// Radius at `base + height`.
    pub tip_radius: f64,
}

impl Particle {
    /// Creates a particle.
    pub fn new(base: DVec3, height: DVec3, base_radius: f64, tip_radius: f64) -> Self {
        Self {
            base,
            height,
            base_radius,
            tip_radius,
        }
    }
}

/// One control point of a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipePoint {
    /// Location of the control point.
    pub position: DVec3,
    /// Outer diameter at this point.
    pub outer_diameter: f64,
    /// Inner diameter; zero for a solid pipe.
    pub inner_diameter: f64,
    /// Bend radius through this point.
    pub bend_radius: f64,
}

/// Pipe swept through an ordered list of control points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipe {
    /// Control points in sweep order.
    pub points: Vec<PipePoint>,
}

// =============================================================================
// PRIMITIVE
// =============================================================================

/// A type-tagged primitive payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Torus.
    Torus(Torus),
    /// Truncated general cone.
    Tgc(Tgc),
    /// Right elliptical cylinder, stored in TGC layout.
    Rec(Tgc),
    /// Ellipsoid.
    Ellipsoid(Ellipsoid),
    /// Sphere, in ellipsoid layout.
    Sphere(Sphere),
    /// Eight-point convex solid.
    Arb8(Arb8),
    /// Particle.
    Particle(Particle),
    /// Pipe.
    Pipe(Pipe),
    /// Recognized kind whose payload is not modelled.
    Opaque {
        /// The recognized kind.
        kind: PrimitiveKind,
    },
    /// Type identifier outside the known enumeration.
    Unknown {
        /// The stored type identifier.
        type_id: u16,
    },
}

impl Primitive {
    /// The kind, or `None` for an unknown type identifier.
    pub fn kind(&self) -> Option<PrimitiveKind> {
        match self {
            Primitive::Torus(_) => Some(PrimitiveKind::Torus),
            Primitive::Tgc(_) => Some(PrimitiveKind::Tgc),
            Primitive::Rec(_) => Some(PrimitiveKind::Rec),
            Primitive::Ellipsoid(_) => Some(PrimitiveKind::Ellipsoid),
            Primitive::Sphere(_) => Some(PrimitiveKind::Sphere),
            Primitive::Arb8(_) => Some(PrimitiveKind::Arb8),
            Primitive::Particle(_) => Some(PrimitiveKind::Particle),
            Primitive::Pipe(_) => Some(PrimitiveKind::Pipe),
            Primitive::Opaque { kind } => Some(*kind),
            Primitive::Unknown { .. } => None,
        }
    }

    /// Numeric type identifier.
    pub fn type_id(&self) -> u16 {
        match self {
            Primitive::Unknown { type_id } => *type_id,
            other => other.kind().map_or(0, PrimitiveKind::id),
        }
    }

    /// Maps the payload through `matrix`.
    ///
    /// # Examples
    /// ```
    /// use csg_db::{Ellipsoid, Primitive};
    /// use glam::{DMat4, DVec3};
    /// let sph = Primitive::Sphere(Ellipsoid::sphere(DVec3::ZERO, 1.0));
    /// let moved = sph.transformed(&DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)));
    /// match moved {
    ///     Primitive::Sphere(e) => assert_eq!(e.center, DVec3::new(0.0, 0.0, 5.0)),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn transformed(&self, matrix: &DMat4) -> Primitive {
        let point = |p: DVec3| matrix.transform_point3(p);
        let vector = |v: DVec3| matrix.transform_vector3(v);
        let scale = uniform_scale(matrix);

        match self {
            Primitive::Torus(tor) => Primitive::Torus(Torus {
                center: point(tor.center),
                normal: vector(tor.normal).normalize_or_zero(),
                major_radius: tor.major_radius * scale,
                minor_radius: tor.minor_radius * scale,
            }),
            Primitive::Tgc(tgc) => Primitive::Tgc(transform_tgc(tgc, matrix)),
            Primitive::Rec(tgc) => Primitive::Rec(transform_tgc(tgc, matrix)),
            Primitive::Ellipsoid(ell) => Primitive::Ellipsoid(transform_ellipsoid(ell, matrix)),
            Primitive::Sphere(ell) => Primitive::Sphere(transform_ellipsoid(ell, matrix)),
            Primitive::Arb8(arb) => Primitive::Arb8(Arb8 {
                points: arb.points.map(point),
            }),
            Primitive::Particle(part) => Primitive::Particle(Particle {
                base: point(part.base),
                height: vector(part.height),
                base_radius: part.base_radius * scale,
                tip_radius: part.tip_radius * scale,
            }),
            Primitive::Pipe(pipe) => Primitive::Pipe(Pipe {
                points: pipe
                    .points
                    .iter()
                    .map(|p| PipePoint {
                        position: point(p.position),
                        outer_diameter: p.outer_diameter * scale,
                        inner_diameter: p.inner_diameter * scale,
                        bend_radius: p.bend_radius * scale,
                    })
                    .collect(),
            }),
            Primitive::Opaque { .. } | Primitive::Unknown { .. } => self.clone(),
        }
    }
}

/// Uniform scale factor of a placement matrix, the cube root of the
/// absolute determinant of its linear part.
///
/// # Examples
/// ```
/// use csg_db::primitive::uniform_scale;
/// use glam::{DMat4, DVec3};
/// let m = DMat4::from_scale(DVec3::splat(2.0));
/// assert!((uniform_scale(&m) - 2.0).abs() < 1e-12);
/// ```
pub fn uniform_scale(matrix: &DMat4) -> f64 {
    DMat3::from_mat4(*matrix).determinant().abs().cbrt()
}

fn transform_tgc(tgc: &Tgc, matrix: &DMat4) -> Tgc {
    Tgc {
        base: matrix.transform_point3(tgc.base),
        height: matrix.transform_vector3(tgc.height),
        a: matrix.transform_vector3(tgc.a),
        b: matrix.transform_vector3(tgc.b),
        c: matrix.transform_vector3(tgc.c),
        d: matrix.transform_vector3(tgc.d),
    }
}

fn transform_ellipsoid(ell: &Ellipsoid, matrix: &DMat4) -> Ellipsoid {
    Ellipsoid {
        center: matrix.transform_point3(ell.center),
        a: matrix.transform_vector3(ell.a),
        b: matrix.transform_vector3(ell.b),
        c: matrix.transform_vector3(ell.c),
    }
}

#[cfg(test)]
mod tests;
