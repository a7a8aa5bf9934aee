use config::tolerance::Tolerance;
use csg_db::{
    Arb8, BinaryUniform, BooleanTree, Combination, Ellipsoid, InMemoryDatabase, MemberOp,
    ObjectData, Particle, Primitive, PrimitiveKind, Tgc, Torus, TreeLeaf, UniformKind, WalkError,
};
use csg_pov::{convert_objects, ConversionStats, ConvertError};
use glam::{DMat4, DVec3};

/// A small vehicle: a body region, two wheel instances and a few odd objects.
fn vehicle() -> InMemoryDatabase {
    let mut db = InMemoryDatabase::default();

    db.insert_primitive(
        "body.s",
        Primitive::Arb8(Arb8::from_box(DVec3::ZERO, DVec3::new(4.0, 2.0, 1.0))),
    );
    db.insert_primitive(
        "cab.s",
        Primitive::Ellipsoid(Ellipsoid::new(
            DVec3::new(2.0, 1.0, 1.0),
            DVec3::X * 1.5,
            DVec3::Y,
            DVec3::Z * 0.5,
        )),
    );
    db.insert_combination(
        "body.r",
        Combination::region(BooleanTree::from_members(vec![
            (MemberOp::Union, TreeLeaf::new("body.s")),
            (MemberOp::Union, TreeLeaf::new("cab.s")),
        ])),
    );

    db.insert_primitive("tire.s", Primitive::Torus(Torus::new(DVec3::ZERO, DVec3::Y, 0.5, 0.2)));
    db.insert_primitive(
        "hub.s",
        Primitive::Tgc(Tgc::cylinder(DVec3::new(0.0, -0.1, 0.0), DVec3::Y * 0.2, 0.3)),
    );
    db.insert_combination(
        "wheel.r",
        Combination::region(Some(BooleanTree::union(
            BooleanTree::leaf("tire.s"),
            BooleanTree::leaf("hub.s"),
        ))),
    );

    db.insert_primitive(
        "antenna.s",
        Primitive::Particle(Particle::new(DVec3::new(3.0, 1.0, 1.0), DVec3::Z, 0.05, 0.02)),
    );
    db.insert_primitive("trim.s", Primitive::Opaque { kind: PrimitiveKind::Bot });
    db.insert_data(
        "paint",
        ObjectData::BinaryUniform(BinaryUniform {
            kind: UniformKind::Float,
            data: vec![0; 12],
        }),
    );

    db.insert_combination(
        "car.g",
        Combination::assembly(BooleanTree::from_members(vec![
            (MemberOp::Union, TreeLeaf::new("body.r")),
            (
                MemberOp::Union,
                TreeLeaf::with_matrix("wheel.r", DMat4::from_translation(DVec3::new(1.0, 0.0, 0.0))),
            ),
            (
                MemberOp::Union,
                TreeLeaf::with_matrix("wheel.r", DMat4::from_translation(DVec3::new(3.0, 0.0, 0.0))),
            ),
            (MemberOp::Union, TreeLeaf::new("antenna.s")),
            (MemberOp::Subtract, TreeLeaf::new("trim.s")),
        ])),
    );
    db
}

fn convert(db: &InMemoryDatabase, roots: &[&str]) -> (String, ConversionStats) {
    let mut out = Vec::new();
    let stats = convert_objects(db, roots, Tolerance::default(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

#[test]
fn converts_whole_assembly() {
    let db = vehicle();
    let (scene, stats) = convert(&db, &["car.g", "paint"]);

    assert_eq!(
        stats,
        ConversionStats {
            parts: 3,
            assemblies: 1,
            shapes: 7,
            informational: 1,
            unsupported: 1,
        }
    );

    assert!(scene.starts_with(
        "// Combination car.g, written as an assembly:\n\
         //\t(((body.r u wheel.r) u wheel.r) u (antenna.s - trim.s))\n\n"
    ));
    assert!(scene.contains("// Region body.r, written as a part:\n//\t(body.s u cab.s)\n"));
    assert!(scene.contains("\tSpheroid(<2, 1, 1>, <1, 1.5, 0.5>)\n"));
    assert!(scene.contains("// Found a binary object (paint)\n"));
    assert!(scene.contains("// Primitive trim.s is an unsupported or unrecognized type (30)\n"));
    assert!(scene.contains("\tRound_Cone2(<3, 1, 1>, 0.05, <3, 1, 2>, 0.02, 0)\n"));
}

#[test]
fn wheel_instances_are_placed_separately() {
    let db = vehicle();
    let (scene, _) = convert(&db, &["car.g"]);

    assert_eq!(scene.matches("#macro Torus").count(), 1);
    assert!(scene.contains("\tTorus(<1, 0, 0>, <0, 1, 0>, 0.5, 0.2)\n"));
    assert!(scene.contains("\tTorus(<3, 0, 0>, <0, 1, 0>, 0.5, 0.2)\n"));
    assert!(scene.contains("cylinder {\n\t<1, -0.1, 0>, <1, 0.1, 0>, 0.3\n"));
    assert!(scene.contains("cylinder {\n\t<3, -0.1, 0>, <3, 0.1, 0>, 0.3\n"));
}

#[test]
fn each_include_appears_once() {
    let db = vehicle();
    let (scene, _) = convert(&db, &["car.g"]);
    for file in ["colors.inc", "shapes.inc", "transforms.inc"] {
        assert_eq!(
            scene.matches(&format!("#include \"{file}\"")).count(),
            1,
            "{file}"
        );
    }
}

#[test]
fn converting_twice_is_byte_identical() {
    let db = vehicle();
    let (first, _) = convert(&db, &["car.g"]);
    let (second, _) = convert(&db, &["car.g"]);
    assert_eq!(first, second);
}

#[test]
fn empty_combination_is_described() {
    let mut db = InMemoryDatabase::default();
    db.insert_combination("empty.g", Combination::assembly(None));
    let (scene, stats) = convert(&db, &["empty.g"]);
    assert_eq!(scene, "// Combination empty.g, written as an assembly:\n//\t-empty-\n\n");
    assert_eq!(stats.assemblies, 1);
}

#[test]
fn missing_root_is_reported() {
    let db = vehicle();
    let mut out = Vec::new();
    let err = convert_objects(&db, &["boat.g"], Tolerance::default(), &mut out).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Walk(WalkError::ObjectNotFound { ref name }) if name == "boat.g"
    ));
}

#[test]
fn corrupt_tree_stops_the_run() {
    let mut db = vehicle();
    db.insert_combination(
        "broken.g",
        Combination::assembly(Some(BooleanTree::union(
            BooleanTree::leaf("car.g"),
            BooleanTree::Unrecognized { op: 6 },
        ))),
    );
    let mut out = Vec::new();
    let err = convert_objects(&db, &["broken.g"], Tolerance::default(), &mut out).unwrap_err();
    assert!(matches!(err, ConvertError::UnrecognizedOp { op: 6 }));
    assert!(out.is_empty());
}
