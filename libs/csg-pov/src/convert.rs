//! # Primitive Conversion
//!
//! Maps a stored object, placed by its accumulated matrix, to a scene
//! element.
//!
//! ## Dispatch
//!
//! | Primitive           | Shape                                         |
//! |---------------------|-----------------------------------------------|
//! | torus               | `Torus` macro (one-time preamble)             |
//! | tgc                 | cylinder, cone or supercone by radii          |
//! | rec                 | descriptive vector form                       |
//! | ellipsoid           | spheroid, radii from the B, A, C magnitudes   |
//! | sphere              | sphere, radius from the A magnitude           |
//! | arb8                | 12-triangle mesh                              |
//! | particle, pipe      | rounded cone                                  |
//! | anything else       | unsupported, carrying the type identifier     |
//!
//! Uniform binary arrays are informational; other major types are
//! unsupported.

use config::constants::approx_equal;
use csg_db::{Arb8, Ellipsoid, ObjectData, Particle, Pipe, Primitive, Tgc, Torus};
use glam::{DMat4, DVec3};
use tracing::{debug, warn};

use crate::scene::{Conversion, Notice, Preamble, Shape, Unsupported};

/// Database point index bound to each mesh vertex `a` through `h`.
///
/// Vertex order of [`Shape::Mesh8`] is the letter order; the triangle list
/// in [`crate::scene::ARB8_TRIANGLES`] refers to it.
pub const ARB8_LETTER_POINTS: [usize; 8] = [4, 0, 1, 5, 6, 7, 3, 2];

// =============================================================================
// CONVERTER
// =============================================================================

/// Converts stored objects, tracking one-time definitions.
///
/// # Examples
/// ```
/// use csg_db::{ObjectData, Primitive, Torus};
/// use csg_pov::convert::PrimitiveConverter;
/// use csg_pov::scene::{Conversion, Preamble};
/// use glam::{DMat4, DVec3};
///
/// let tor = ObjectData::Geometry(Primitive::Torus(Torus::new(DVec3::ZERO, DVec3::Z, 4.0, 1.0)));
/// let mut converter = PrimitiveConverter::new();
///
/// let first = converter.convert(&tor, &DMat4::IDENTITY);
/// assert!(matches!(first, Conversion::Shape { preamble: Some(Preamble::TorusMacro), .. }));
///
/// let second = converter.convert(&tor, &DMat4::IDENTITY);
/// assert!(matches!(second, Conversion::Shape { preamble: None, .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrimitiveConverter {
    torus_macro_emitted: bool,
}

impl PrimitiveConverter {
    /// Converter with no torus macro written yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a torus has been converted yet.
    pub fn torus_macro_emitted(&self) -> bool {
        self.torus_macro_emitted
    }

    /// Converts one stored object placed by `matrix`.
    pub fn convert(&mut self, data: &ObjectData, matrix: &DMat4) -> Conversion {
        match data {
            ObjectData::Geometry(prim) => {
                let placed = prim.transformed(matrix);
                match convert_primitive(&placed) {
                    Ok(shape) => {
                        let preamble = self.preamble_for(&shape);
                        Conversion::Shape { preamble, shape }
                    }
                    Err(unsupported) => Conversion::Unsupported(unsupported),
                }
            }
            ObjectData::BinaryUniform(blob) => {
                debug!("binary object with {} elements", blob.count());
                Conversion::Informational(Notice::BinaryObject)
            }
            ObjectData::Foreign { .. } => Conversion::Unsupported(Unsupported::MajorType {
                major_type: data.major_type(),
            }),
        }
    }

    fn preamble_for(&mut self, shape: &Shape) -> Option<Preamble> {
        match shape {
            Shape::Torus { .. } if !self.torus_macro_emitted => {
                self.torus_macro_emitted = true;
                Some(Preamble::TorusMacro)
            }
            _ => None,
        }
    }
}

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Converts a primitive already expressed in world coordinates.
///
/// Pure: the same payload always gives the same shape.
///
/// # Examples
/// ```
/// use csg_db::{Primitive, Tgc};
/// use csg_pov::convert::convert_primitive;
/// use csg_pov::scene::Shape;
/// use glam::DVec3;
///
/// let rod = Primitive::Tgc(Tgc::cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 10.0), 2.0));
/// match convert_primitive(&rod).unwrap() {
///     Shape::Cylinder { base, cap, radius } => {
///         assert_eq!(base, DVec3::ZERO);
///         assert_eq!(cap, DVec3::new(0.0, 0.0, 10.0));
///         assert!((radius - 2.0).abs() < 1e-12);
///     }
///     other => panic!("expected cylinder, got {:?}", other),
/// }
/// ```
pub fn convert_primitive(prim: &Primitive) -> Result<Shape, Unsupported> {
    match prim {
        Primitive::Torus(tor) => Ok(torus(tor)),
        Primitive::Tgc(tgc) => Ok(frustum(tgc)),
        Primitive::Rec(tgc) => Ok(Shape::EllipticalCylinder {
            base: tgc.base,
            height: tgc.height,
            a: tgc.a,
            b: tgc.b,
            c: tgc.c,
            d: tgc.d,
        }),
        Primitive::Ellipsoid(ell) => Ok(spheroid(ell)),
        Primitive::Sphere(ell) => Ok(sphere(ell)),
        Primitive::Arb8(arb) => Ok(mesh8(arb)),
        Primitive::Particle(part) => Ok(particle(part)),
        Primitive::Pipe(pipe) => pipe_ends(pipe).ok_or(Unsupported::Primitive {
            type_id: prim.type_id(),
        }),
        Primitive::Opaque { .. } | Primitive::Unknown { .. } => Err(Unsupported::Primitive {
            type_id: prim.type_id(),
        }),
    }
}

fn torus(tor: &Torus) -> Shape {
    Shape::Torus {
        center: tor.center,
        normal: tor.normal,
        major_radius: tor.major_radius,
        minor_radius: tor.minor_radius,
    }
}

/// Truncated general cone, specialized by its semi-axis magnitudes.
///
/// Cylinder when all four match, cone when the base pair matches, general
/// frustum otherwise. Magnitudes compare under the fixed epsilon.
fn frustum(tgc: &Tgc) -> Shape {
    let a = tgc.a.length();
    let b = tgc.b.length();
    let c = tgc.c.length();
    let d = tgc.d.length();
    let cap = tgc.top();

    if approx_equal(a, b) && approx_equal(a, c) && approx_equal(a, d) {
        Shape::Cylinder {
            base: tgc.base,
            cap,
            radius: a,
        }
    } else if approx_equal(a, b) {
        Shape::Cone {
            base: tgc.base,
            base_radius: a,
            cap,
            cap_radius: c,
        }
    } else {
        Shape::Supercone {
            base: tgc.base,
            a,
            b,
            cap,
            c,
            d,
        }
    }
}

/// The first two radius slots are `|B|` then `|A|`.
fn spheroid(ell: &Ellipsoid) -> Shape {
    Shape::Spheroid {
        center: ell.center,
        radii: DVec3::new(ell.b.length(), ell.a.length(), ell.c.length()),
    }
}

fn sphere(ell: &Ellipsoid) -> Shape {
    let radius = ell.a.length();
    if !approx_equal(radius, ell.b.length()) || !approx_equal(radius, ell.c.length()) {
        warn!(
            "sphere axes differ (|A|={}, |B|={}, |C|={}), using |A|",
            radius,
            ell.b.length(),
            ell.c.length()
        );
    }
    Shape::Sphere {
        center: ell.center,
        radius,
    }
}

fn mesh8(arb: &Arb8) -> Shape {
    Shape::Mesh8 {
        vertices: ARB8_LETTER_POINTS.map(|index| arb.points[index]),
    }
}

fn particle(part: &Particle) -> Shape {
    Shape::RoundCone {
        base: part.base,
        base_radius: part.base_radius,
        tip: part.base + part.height,
        tip_radius: part.tip_radius,
    }
}

/// Rounded cone through the first and last control points.
fn pipe_ends(pipe: &Pipe) -> Option<Shape> {
    match pipe.points.as_slice() {
        [first, .., last] => Some(Shape::RoundCone {
            base: first.position,
            base_radius: first.outer_diameter / 2.0,
            tip: last.position,
            tip_radius: last.outer_diameter / 2.0,
        }),
        _ => None,
    }
}
