//! # POV-Ray Output
//!
//! Formats scene elements as POV-Ray scene language.
//!
//! Shapes become POV-Ray statements; combination descriptions, elliptical
//! cylinders, binary objects and diagnostics become `//` comment stanzas so
//! the stream stays a parseable scene. Include files and the mesh texture are
//! declared once per writer.

use std::collections::BTreeSet;
use std::io::{self, Write};

use config::constants::{DEFAULT_PIGMENT, MESH_PIGMENT, SUPERCONE_PIGMENT};
use glam::DVec3;

use crate::format::{g, triple, vector};
use crate::scene::{
    CombinationKind, Conversion, Include, Notice, Preamble, SceneElement, Shape, Unsupported,
    ARB8_TRIANGLES,
};

/// Vertex names of an 8-point mesh, in vertex order.
pub const MESH_VERTEX_NAMES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Texture identifier declared for 8-point meshes.
pub const MESH_TEXTURE: &str = "Default_texture";

/// Body of the one-time `Torus` macro.
pub const TORUS_MACRO: &str = "#macro Torus(Center, Normal, Radius1, Radius2)\n\
     \ttorus { Radius1, Radius2 Reorient_Trans(y, Normal) translate Center }\n\
     #end\n";

/// Writes scene elements to an ordered sink.
///
/// # Examples
/// ```
/// use csg_pov::povray::PovWriter;
/// use csg_pov::scene::Shape;
/// use glam::DVec3;
///
/// let mut writer = PovWriter::new(Vec::new());
/// writer
///     .write_shape(&Shape::Sphere { center: DVec3::ZERO, radius: 2.0 })
///     .unwrap();
/// let text = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(text.contains("sphere {\n\t<0, 0, 0>, 2\n"));
/// ```
#[derive(Debug)]
pub struct PovWriter<W: Write> {
    out: W,
    included: BTreeSet<Include>,
    mesh_texture_declared: bool,
}

impl<W: Write> PovWriter<W> {
    /// Writer over `out` with nothing included yet.
    pub fn new(out: W) -> Self {
        Self {
            out,
            included: BTreeSet::new(),
            mesh_texture_declared: false,
        }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Writes one element.
    pub fn write_element(&mut self, element: &SceneElement) -> io::Result<()> {
        match element {
            SceneElement::Combination {
                name,
                kind,
                description,
            } => self.write_combination(name, *kind, description),
            SceneElement::Object { name, conversion } => self.write_conversion(name, conversion),
        }
    }

    /// Writes a combination's structural description.
    pub fn write_combination(
        &mut self,
        name: &str,
        kind: CombinationKind,
        description: &str,
    ) -> io::Result<()> {
        let heading = match kind {
            CombinationKind::Part => "Region",
            CombinationKind::Assembly => "Combination",
        };
        let written_as = match kind {
            CombinationKind::Part => "a part",
            CombinationKind::Assembly => "an assembly",
        };
        writeln!(self.out, "// {heading} {name}, written as {written_as}:")?;
        writeln!(self.out, "//\t{description}")?;
        writeln!(self.out)
    }

    /// Writes the result of converting the stored object `name`.
    pub fn write_conversion(&mut self, name: &str, conversion: &Conversion) -> io::Result<()> {
        match conversion {
            Conversion::Shape { preamble, shape } => {
                if let Some(preamble) = preamble {
                    self.write_preamble(*preamble)?;
                }
                if let Shape::EllipticalCylinder { .. } = shape {
                    writeln!(self.out, "// Right elliptical cylinder {name}:")?;
                }
                self.write_shape(shape)
            }
            Conversion::Informational(Notice::BinaryObject) => {
                writeln!(self.out, "// Found a binary object ({name})")?;
                writeln!(self.out)
            }
            Conversion::Unsupported(Unsupported::Primitive { type_id }) => {
                writeln!(
                    self.out,
                    "// Primitive {name} is an unsupported or unrecognized type ({type_id})"
                )?;
                writeln!(self.out)
            }
            Conversion::Unsupported(Unsupported::MajorType { major_type }) => {
                writeln!(
                    self.out,
                    "// Major type of {name} is unrecognized type ({major_type})"
                )?;
                writeln!(self.out)
            }
        }
    }

    /// Writes a one-time definition.
    pub fn write_preamble(&mut self, preamble: Preamble) -> io::Result<()> {
        match preamble {
            Preamble::TorusMacro => {
                self.include(Include::Transforms)?;
                writeln!(self.out, "{TORUS_MACRO}")
            }
        }
    }

    /// Writes a shape statement, preceded by any includes it still needs.
    pub fn write_shape(&mut self, shape: &Shape) -> io::Result<()> {
        for include in shape.includes() {
            self.include(*include)?;
        }

        match shape {
            Shape::Torus {
                center,
                normal,
                major_radius,
                minor_radius,
            } => {
                writeln!(self.out, "object {{")?;
                writeln!(
                    self.out,
                    "\tTorus({}, {}, {}, {})",
                    vector(*center),
                    vector(*normal),
                    g(*major_radius),
                    g(*minor_radius)
                )?;
                self.close_with_pigment(DEFAULT_PIGMENT)
            }
            Shape::Cylinder { base, cap, radius } => {
                writeln!(self.out, "cylinder {{")?;
                writeln!(self.out, "\t{}, {}, {}", vector(*base), vector(*cap), g(*radius))?;
                self.close_with_pigment(DEFAULT_PIGMENT)
            }
            Shape::Cone {
                base,
                base_radius,
                cap,
                cap_radius,
            } => {
                writeln!(self.out, "cone {{")?;
                writeln!(
                    self.out,
                    "\t{}, {}, {}, {}",
                    vector(*base),
                    g(*base_radius),
                    vector(*cap),
                    g(*cap_radius)
                )?;
                self.close_with_pigment(DEFAULT_PIGMENT)
            }
            Shape::Supercone {
                base,
                a,
                b,
                cap,
                c,
                d,
            } => {
                writeln!(self.out, "object {{")?;
                writeln!(
                    self.out,
                    "\tSupercone({}, {}, {}, {}, {}, {})",
                    vector(*base),
                    g(*a),
                    g(*b),
                    vector(*cap),
                    g(*c),
                    g(*d)
                )?;
                self.close_with_pigment(SUPERCONE_PIGMENT)
            }
            Shape::EllipticalCylinder {
                base,
                height,
                a,
                b,
                c,
                d,
            } => {
                let vectors = [
                    ("V", base),
                    ("H", height),
                    ("A", a),
                    ("B", b),
                    ("C", c),
                    ("D", d),
                ];
                for (label, v) in vectors {
                    writeln!(self.out, "//\t{label}=({})", triple(*v))?;
                }
                writeln!(self.out)
            }
            Shape::Spheroid { center, radii } => {
                writeln!(self.out, "object {{")?;
                writeln!(self.out, "\tSpheroid({}, {})", vector(*center), vector(*radii))?;
                self.close_with_pigment(DEFAULT_PIGMENT)
            }
            Shape::Sphere { center, radius } => {
                writeln!(self.out, "sphere {{")?;
                writeln!(self.out, "\t{}, {}", vector(*center), g(*radius))?;
                self.close_with_pigment(DEFAULT_PIGMENT)
            }
            Shape::Mesh8 { vertices } => self.write_mesh8(vertices),
            Shape::RoundCone {
                base,
                base_radius,
                tip,
                tip_radius,
            } => {
                writeln!(self.out, "object {{")?;
                writeln!(
                    self.out,
                    "\tRound_Cone2({}, {}, {}, {}, 0)",
                    vector(*base),
                    g(*base_radius),
                    vector(*tip),
                    g(*tip_radius)
                )?;
                self.close_with_pigment(DEFAULT_PIGMENT)
            }
        }
    }

    fn write_mesh8(&mut self, vertices: &[DVec3; 8]) -> io::Result<()> {
        if !self.mesh_texture_declared {
            writeln!(
                self.out,
                "#declare {MESH_TEXTURE} = texture {{ pigment {{ {MESH_PIGMENT} }} }}"
            )?;
            self.mesh_texture_declared = true;
        }
        for (letter, v) in MESH_VERTEX_NAMES.iter().zip(vertices) {
            writeln!(self.out, "#declare {letter} = {};", vector(*v))?;
        }
        writeln!(self.out, "mesh {{")?;
        for [i, j, k] in ARB8_TRIANGLES {
            writeln!(
                self.out,
                "\ttriangle {{ {}, {}, {} }}",
                MESH_VERTEX_NAMES[i], MESH_VERTEX_NAMES[j], MESH_VERTEX_NAMES[k]
            )?;
        }
        writeln!(self.out, "\ttexture {{ {MESH_TEXTURE} }}")?;
        writeln!(self.out, "}}")?;
        writeln!(self.out)
    }

    fn close_with_pigment(&mut self, pigment: &str) -> io::Result<()> {
        writeln!(self.out, "\ttexture {{ pigment {{ {pigment} }} }}")?;
        writeln!(self.out, "}}")?;
        writeln!(self.out)
    }

    fn include(&mut self, include: Include) -> io::Result<()> {
        if self.included.insert(include) {
            writeln!(self.out, "#include \"{}\"", include.file_name())?;
        }
        Ok(())
    }
}
