//! Tests for primitive kinds and payload transforms.

use super::*;
use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_2;

// =============================================================================
// KIND TABLE
// =============================================================================

#[test]
fn kind_ids_round_trip() {
    for kind in PrimitiveKind::ALL {
        assert_eq!(PrimitiveKind::from_id(kind.id()), Some(kind));
    }
}

#[test]
fn kind_ids_match_database_numbering() {
    assert_eq!(PrimitiveKind::Tgc.id(), 2);
    assert_eq!(PrimitiveKind::Ellipsoid.id(), 3);
    assert_eq!(PrimitiveKind::Arb8.id(), 4);
    assert_eq!(PrimitiveKind::Rec.id(), 7);
    assert_eq!(PrimitiveKind::Sphere.id(), 10);
    assert_eq!(PrimitiveKind::Pipe.id(), 15);
    assert_eq!(PrimitiveKind::Particle.id(), 16);
    assert_eq!(PrimitiveKind::Extrude.id(), 27);
}

#[test]
fn unknown_primitive_keeps_type_id() {
    let prim = Primitive::Unknown { type_id: 77 };
    assert_eq!(prim.kind(), None);
    assert_eq!(prim.type_id(), 77);
}

#[test]
fn opaque_primitive_reports_kind_id() {
    let prim = Primitive::Opaque {
        kind: PrimitiveKind::Bot,
    };
    assert_eq!(prim.type_id(), 30);
}

// =============================================================================
// TRANSFORMS
// =============================================================================

#[test]
fn identity_leaves_payload_unchanged() {
    let tgc = Primitive::Tgc(Tgc::truncated_cone(
        DVec3::new(1.0, 2.0, 3.0),
        DVec3::new(0.0, 0.0, 4.0),
        2.0,
        1.0,
    ));
    assert_eq!(tgc.transformed(&DMat4::IDENTITY), tgc);
}

#[test]
fn translation_moves_points_not_vectors() {
    let m = DMat4::from_translation(DVec3::new(10.0, 0.0, 0.0));
    let moved = Primitive::Tgc(Tgc::cylinder(DVec3::ZERO, DVec3::Z * 5.0, 1.0)).transformed(&m);
    match moved {
        Primitive::Tgc(tgc) => {
            assert_eq!(tgc.base, DVec3::new(10.0, 0.0, 0.0));
            assert_eq!(tgc.height, DVec3::Z * 5.0);
        }
        other => panic!("Expected Tgc, got {:?}", other),
    }
}

#[test]
fn rotation_turns_torus_normal() {
    let m = DMat4::from_rotation_x(FRAC_PI_2);
    let tor = Primitive::Torus(Torus::new(DVec3::ZERO, DVec3::Z, 4.0, 1.0)).transformed(&m);
    match tor {
        Primitive::Torus(t) => {
            assert_relative_eq!(t.normal.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(t.normal.y, -1.0, epsilon = 1e-12);
            assert_relative_eq!(t.normal.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(t.major_radius, 4.0, epsilon = 1e-12);
        }
        other => panic!("Expected Torus, got {:?}", other),
    }
}

#[test]
fn uniform_scale_scales_radii() {
    let m = DMat4::from_scale(DVec3::splat(3.0));
    let part = Primitive::Particle(Particle::new(DVec3::X, DVec3::Z, 1.0, 0.5)).transformed(&m);
    match part {
        Primitive::Particle(p) => {
            assert_relative_eq!(p.base.x, 3.0, epsilon = 1e-12);
            assert_relative_eq!(p.height.z, 3.0, epsilon = 1e-12);
            assert_relative_eq!(p.base_radius, 3.0, epsilon = 1e-12);
            assert_relative_eq!(p.tip_radius, 1.5, epsilon = 1e-12);
        }
        other => panic!("Expected Particle, got {:?}", other),
    }
}

#[test]
fn pipe_points_follow_matrix() {
    let pipe = Pipe {
        points: vec![
            PipePoint {
                position: DVec3::ZERO,
                outer_diameter: 2.0,
                inner_diameter: 1.0,
                bend_radius: 4.0,
            },
            PipePoint {
                position: DVec3::Z * 10.0,
                outer_diameter: 2.0,
                inner_diameter: 1.0,
                bend_radius: 4.0,
            },
        ],
    };
    let m = DMat4::from_scale_rotation_translation(
        DVec3::splat(2.0),
        glam::DQuat::IDENTITY,
        DVec3::new(0.0, 1.0, 0.0),
    );
    match Primitive::Pipe(pipe).transformed(&m) {
        Primitive::Pipe(p) => {
            assert_eq!(p.points.len(), 2);
            assert_relative_eq!(p.points[1].position.z, 20.0, epsilon = 1e-12);
            assert_relative_eq!(p.points[1].position.y, 1.0, epsilon = 1e-12);
            assert_relative_eq!(p.points[0].outer_diameter, 4.0, epsilon = 1e-12);
        }
        other => panic!("Expected Pipe, got {:?}", other),
    }
}

#[test]
fn arb8_box_points_are_transformed() {
    let arb = Arb8::from_box(DVec3::ZERO, DVec3::ONE);
    let m = DMat4::from_translation(DVec3::splat(1.0));
    match Primitive::Arb8(arb).transformed(&m) {
        Primitive::Arb8(moved) => {
            for (before, after) in arb.points.iter().zip(moved.points.iter()) {
                assert_eq!(*after, *before + DVec3::ONE);
            }
        }
        other => panic!("Expected Arb8, got {:?}", other),
    }
}

#[test]
fn opaque_payload_is_untouched() {
    let prim = Primitive::Opaque {
        kind: PrimitiveKind::Sketch,
    };
    let m = DMat4::from_scale(DVec3::splat(5.0));
    assert_eq!(prim.transformed(&m), prim);
}
