//! # CSG to POV-Ray
//!
//! Converts the objects of a CSG database into POV-Ray scene text.
//!
//! ## Architecture
//!
//! ```text
//! walk_tree ─▶ SceneConverter (hooks)
//!                ├─ region_start ─▶ describe_tree ─────────────┐
//!                └─ leaf ─────────▶ PrimitiveConverter ─▶ Conversion
//!                                                             ▼
//!                                                         PovWriter ─▶ io::Write
//! ```
//!
//! Conversion is split from formatting: [`convert::convert_primitive`] and
//! [`describe::describe_tree`] return values, and only [`povray::PovWriter`]
//! writes text.
//!
//! ## Example
//!
//! ```rust
//! use config::tolerance::Tolerance;
//! use csg_db::{BooleanTree, Combination, InMemoryDatabase, Primitive, Tgc};
//! use glam::DVec3;
//!
//! let mut db = InMemoryDatabase::default();
//! db.insert_primitive("rod.s", Primitive::Tgc(Tgc::cylinder(DVec3::ZERO, DVec3::Z * 10.0, 2.0)));
//! db.insert_combination("rod.r", Combination::region(Some(BooleanTree::leaf("rod.s"))));
//!
//! let mut out = Vec::new();
//! let stats = csg_pov::convert_objects(&db, &["rod.r"], Tolerance::default(), &mut out).unwrap();
//! assert_eq!(stats.shapes, 1);
//!
//! let scene = String::from_utf8(out).unwrap();
//! assert!(scene.contains("cylinder {\n\t<0, 0, 0>, <0, 0, 10>, 2\n"));
//! ```

pub mod callbacks;
pub mod convert;
pub mod describe;
pub mod error;
pub mod format;
pub mod povray;
pub mod scene;

use std::io::Write;

use config::tolerance::Tolerance;
use csg_db::{walk_tree, Database, TreeState};
use tracing::{debug, info};

// Re-export public API
pub use callbacks::{ConversionStats, SceneConverter};
pub use convert::{convert_primitive, PrimitiveConverter};
pub use describe::describe_tree;
pub use error::ConvertError;
pub use povray::PovWriter;
pub use scene::{
    CombinationKind, Conversion, Include, Notice, Preamble, SceneElement, Shape, Unsupported,
};

/// Walks `roots` in order and writes the scene to `out`.
///
/// Unsupported objects are reported in the scene and the counts; a corrupt
/// combination tree or a missing root stops the run.
pub fn convert_objects<D, W>(
    db: &D,
    roots: &[&str],
    tolerance: Tolerance,
    out: W,
) -> Result<ConversionStats, ConvertError>
where
    D: Database + ?Sized,
    W: Write,
{
    debug!("converting {} roots with tolerance {}", roots.len(), tolerance);

    let mut hooks = SceneConverter::new(out);
    walk_tree(db, roots, &TreeState::new(tolerance), &mut hooks)?;
    hooks.flush()?;

    let stats = hooks.stats();
    info!(
        "converted {} parts, {} assemblies, {} shapes ({} informational, {} unsupported)",
        stats.parts, stats.assemblies, stats.shapes, stats.informational, stats.unsupported
    );
    Ok(stats)
}
