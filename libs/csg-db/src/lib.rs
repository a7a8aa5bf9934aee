//! # CSG Database
//!
//! In-memory model of a hierarchical CSG database and the depth-first walker
//! that visits it.
//!
//! ## Architecture
//!
//! ```text
//! Database (name -> object) → walk_tree → TreeWalker hooks (region_start / leaf / region_end)
//! ```
//!
//! The walker owns traversal: it resolves member names, accumulates the
//! transform along each path and rebuilds a result tree from the values the
//! leaf hook returns. What a hook does with a combination or primitive is up
//! to the converter implementing [`TreeWalker`].
//!
//! ## Example
//!
//! ```rust
//! use csg_db::{BooleanTree, Combination, Ellipsoid, InMemoryDatabase, Primitive};
//! use glam::DVec3;
//!
//! let mut db = InMemoryDatabase::default();
//! db.insert_primitive("ball.s", Primitive::Sphere(Ellipsoid::sphere(DVec3::ZERO, 5.0)));
//! db.insert_combination("ball.r", Combination::region(Some(BooleanTree::leaf("ball.s"))));
//! assert_eq!(db.top_level_names(), vec!["ball.r"]);
//! ```

pub mod database;
pub mod error;
pub mod object;
pub mod primitive;
pub mod tree;
pub mod walk;

// Re-export public API
pub use database::{Database, InMemoryDatabase};
pub use error::WalkError;
pub use object::{
    BinaryUniform, Combination, DbObject, ObjectData, UniformKind, MAJOR_TYPE_BINARY_UNIF,
    MAJOR_TYPE_BRLCAD,
};
pub use primitive::{
    Arb8, Ellipsoid, Particle, Pipe, PipePoint, Primitive, PrimitiveKind, Sphere, Tgc, Torus,
};
pub use tree::{BinaryOp, BooleanTree, MemberOp, TreeLeaf, UnaryOp};
pub use walk::{
    walk_tree, FullPath, ResultTree, TreeOwnership, TreeState, TreeWalker, WalkControl,
};
