//! # Walker Hooks
//!
//! Ties the tree walker to the describer, the converter and the writer.
//!
//! ```text
//! region_start ─▶ describe_tree ─▶ combination stanza
//! leaf         ─▶ PrimitiveConverter ─▶ shape / diagnostic stanza
//! region_end   ─▶ hand the result tree back to the walker
//! ```

use std::io::Write;

use csg_db::{
    Combination, FullPath, ObjectData, ResultTree, TreeOwnership, TreeState, TreeWalker,
    WalkControl,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::convert::PrimitiveConverter;
use crate::describe::describe_tree;
use crate::error::ConvertError;
use crate::povray::PovWriter;
use crate::scene::{CombinationKind, Conversion, SceneElement};

/// Counts of what a conversion run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Regions written as parts.
    pub parts: usize,
    /// Plain combinations written as assemblies.
    pub assemblies: usize,
    /// Shapes written.
    pub shapes: usize,
    /// Objects noted but not drawn.
    pub informational: usize,
    /// Objects with no scene equivalent.
    pub unsupported: usize,
}

/// Walker hooks writing a POV-Ray scene.
///
/// # Examples
/// ```
/// use csg_db::{walk_tree, BooleanTree, Combination, Ellipsoid, InMemoryDatabase, Primitive, TreeState};
/// use csg_pov::callbacks::SceneConverter;
/// use glam::DVec3;
///
/// let mut db = InMemoryDatabase::default();
/// db.insert_primitive("ball.s", Primitive::Sphere(Ellipsoid::sphere(DVec3::ZERO, 1.0)));
/// db.insert_combination("ball.r", Combination::region(Some(BooleanTree::leaf("ball.s"))));
///
/// let mut hooks = SceneConverter::new(Vec::new());
/// walk_tree(&db, &["ball.r"], &TreeState::default(), &mut hooks).unwrap();
/// let (out, stats) = hooks.finish();
/// assert_eq!(stats.parts, 1);
/// assert_eq!(stats.shapes, 1);
/// assert!(String::from_utf8(out).unwrap().contains("sphere {"));
/// ```
#[derive(Debug)]
pub struct SceneConverter<W: Write> {
    converter: PrimitiveConverter,
    writer: PovWriter<W>,
    stats: ConversionStats,
}

impl<W: Write> SceneConverter<W> {
    /// Hooks writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            converter: PrimitiveConverter::new(),
            writer: PovWriter::new(out),
            stats: ConversionStats::default(),
        }
    }

    /// Counts so far.
    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    /// Flushes the sink.
    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the sink and the final counts.
    pub fn finish(self) -> (W, ConversionStats) {
        (self.writer.into_inner(), self.stats)
    }

    fn record(&mut self, conversion: &Conversion) {
        match conversion {
            Conversion::Shape { .. } => self.stats.shapes += 1,
            Conversion::Informational(_) => self.stats.informational += 1,
            Conversion::Unsupported(_) => self.stats.unsupported += 1,
        }
    }
}

impl<W: Write> TreeWalker for SceneConverter<W> {
    /// Shapes are written as they are converted; nothing is handed back.
    type Output = ();
    type Error = ConvertError;

    fn region_start(
        &mut self,
        state: &TreeState,
        path: &FullPath,
        comb: &Combination,
    ) -> Result<WalkControl, ConvertError> {
        info!("region_start {}", path);
        debug!("{}: tolerance {}", path, state.tolerance);

        let kind = CombinationKind::from_region_flag(comb.region);
        match kind {
            CombinationKind::Part => self.stats.parts += 1,
            CombinationKind::Assembly => self.stats.assemblies += 1,
        }

        let element = SceneElement::Combination {
            name: path.current().unwrap_or_default().to_string(),
            kind,
            description: describe_tree(comb.tree.as_ref())?,
        };
        self.writer.write_element(&element)?;
        Ok(WalkControl::Continue)
    }

    fn region_end(
        &mut self,
        _state: &TreeState,
        path: &FullPath,
        tree: Option<ResultTree<()>>,
    ) -> Result<TreeOwnership<()>, ConvertError> {
        info!("region_end {}", path);
        Ok(TreeOwnership::NotOwned(tree))
    }

    fn leaf(
        &mut self,
        state: &TreeState,
        path: &FullPath,
        data: &ObjectData,
    ) -> Result<Option<()>, ConvertError> {
        info!("leaf_func {}", path);
        debug!("{}: major type {}", path, data.major_type());
        let name = path.current().unwrap_or_default();

        let conversion = self.converter.convert(data, &state.matrix);
        match &conversion {
            Conversion::Shape { shape, .. } => debug!("{}: {}", path, shape.label()),
            Conversion::Informational(_) => info!("Found a binary object ({})", name),
            Conversion::Unsupported(unsupported) => warn!("{}: {}", name, unsupported),
        }

        self.record(&conversion);
        self.writer.write_conversion(name, &conversion)?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csg_db::{walk_tree, BooleanTree, InMemoryDatabase, Primitive, PrimitiveKind, Torus};
    use glam::{DMat4, DVec3};

    fn run(db: &InMemoryDatabase, roots: &[&str]) -> (String, ConversionStats) {
        let mut hooks = SceneConverter::new(Vec::new());
        walk_tree(db, roots, &TreeState::default(), &mut hooks).unwrap();
        let (out, stats) = hooks.finish();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_region_written_before_members() {
        let mut db = InMemoryDatabase::default();
        db.insert_primitive("ring.s", Primitive::Torus(Torus::new(DVec3::ZERO, DVec3::Z, 4.0, 1.0)));
        db.insert_combination("ring.r", Combination::region(Some(BooleanTree::leaf("ring.s"))));

        let (text, stats) = run(&db, &["ring.r"]);
        let region_at = text.find("// Region ring.r, written as a part:").unwrap();
        let macro_at = text.find("#macro Torus").unwrap();
        assert!(region_at < macro_at);
        assert_eq!(stats.parts, 1);
        assert_eq!(stats.shapes, 1);
    }

    #[test]
    fn test_leaf_uses_accumulated_matrix() {
        let mut db = InMemoryDatabase::default();
        db.insert_primitive(
            "ball.s",
            Primitive::Sphere(csg_db::Ellipsoid::sphere(DVec3::ZERO, 1.0)),
        );
        db.insert_combination(
            "top.g",
            Combination::assembly(Some(BooleanTree::leaf_with_matrix(
                "ball.s",
                DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)),
            ))),
        );
        let (text, stats) = run(&db, &["top.g"]);
        assert!(text.contains("sphere {\n\t<0, 0, 5>, 1\n"));
        assert_eq!(stats.assemblies, 1);
    }

    #[test]
    fn test_unsupported_counted_and_walk_continues() {
        let mut db = InMemoryDatabase::default();
        db.insert_primitive("mesh.s", Primitive::Opaque { kind: PrimitiveKind::Bot });
        db.insert_primitive(
            "ball.s",
            Primitive::Sphere(csg_db::Ellipsoid::sphere(DVec3::ZERO, 1.0)),
        );
        db.insert_combination(
            "all.g",
            Combination::assembly(Some(BooleanTree::union(
                BooleanTree::leaf("mesh.s"),
                BooleanTree::leaf("ball.s"),
            ))),
        );
        let (text, stats) = run(&db, &["all.g"]);
        assert!(text.contains("// Primitive mesh.s is an unsupported or unrecognized type (30)"));
        assert!(text.contains("sphere {"));
        assert_eq!(stats.unsupported, 1);
        assert_eq!(stats.shapes, 1);
    }

    #[test]
    fn test_corrupt_tree_aborts_without_description() {
        let mut db = InMemoryDatabase::default();
        db.insert_combination(
            "bad.r",
            Combination::region(Some(BooleanTree::Unrecognized { op: 77 })),
        );
        let mut hooks = SceneConverter::new(Vec::new());
        let err = walk_tree(&db, &["bad.r"], &TreeState::default(), &mut hooks).unwrap_err();
        assert!(matches!(err, ConvertError::UnrecognizedOp { op: 77 }));
        let (out, _) = hooks.finish();
        assert!(out.is_empty());
    }

    #[test]
    fn test_region_end_hands_tree_back() {
        let mut hooks = SceneConverter::new(Vec::new());
        let tree = Some(ResultTree::Leaf(()));
        let path = FullPath::root("r");
        let result = hooks.region_end(&TreeState::default(), &path, tree.clone());
        assert_eq!(result.unwrap(), TreeOwnership::NotOwned(tree));
    }
}
