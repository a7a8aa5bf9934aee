//! Database directory abstraction used by the walker.
//!
//! Reading and decoding an on-disk database is out of scope; converters and
//! tests populate an [`InMemoryDatabase`] directly.

use std::collections::{BTreeMap, BTreeSet};

use crate::object::{Combination, DbObject, ObjectData};
use crate::primitive::Primitive;

/// Name to object lookup.
///
/// # Examples
/// ```
/// use csg_db::{Database, InMemoryDatabase};
/// let db = InMemoryDatabase::default();
/// assert!(db.lookup("all.g").is_none());
/// ```
pub trait Database {
    /// Resolves a directory name.
    fn lookup(&self, name: &str) -> Option<&DbObject>;

    /// All directory names, in sorted order.
    fn names(&self) -> Vec<&str>;
}

/// In-memory directory intended for tests and embedding.
///
/// # Examples
/// ```
/// use csg_db::{Database, InMemoryDatabase, Primitive, PrimitiveKind};
/// let mut db = InMemoryDatabase::default();
/// db.insert_primitive("mesh.s", Primitive::Opaque { kind: PrimitiveKind::Bot });
/// assert!(db.lookup("mesh.s").is_some());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryDatabase {
    objects: BTreeMap<String, DbObject>,
}

impl InMemoryDatabase {
    /// Inserts or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, object: DbObject) {
        self.objects.insert(name.into(), object);
    }

    /// Inserts or replaces a combination.
    pub fn insert_combination(&mut self, name: impl Into<String>, comb: Combination) {
        self.insert(name, DbObject::Combination(comb));
    }

    /// Inserts or replaces a geometric primitive.
    pub fn insert_primitive(&mut self, name: impl Into<String>, primitive: Primitive) {
        self.insert(name, DbObject::Solid(ObjectData::Geometry(primitive)));
    }

    /// Inserts or replaces a non-geometric stored object.
    pub fn insert_data(&mut self, name: impl Into<String>, data: ObjectData) {
        self.insert(name, DbObject::Solid(data));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Names not referenced by any combination, in sorted order.
    pub fn top_level_names(&self) -> Vec<&str> {
        let referenced: BTreeSet<&str> = self
            .objects
            .values()
            .filter_map(DbObject::as_combination)
            .filter_map(|comb| comb.tree.as_ref())
            .flat_map(|tree| tree.member_names())
            .collect();

        self.objects
            .keys()
            .map(String::as_str)
            .filter(|name| !referenced.contains(name))
            .collect()
    }
}

impl Database for InMemoryDatabase {
    fn lookup(&self, name: &str) -> Option<&DbObject> {
        self.objects.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.objects.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::BooleanTree;

    #[test]
    fn test_insert_replaces() {
        let mut db = InMemoryDatabase::default();
        db.insert_combination("a", Combination::assembly(None));
        db.insert_combination("a", Combination::region(None));
        assert_eq!(db.len(), 1);
        let comb = db.lookup("a").and_then(DbObject::as_combination).unwrap();
        assert!(comb.region);
    }

    #[test]
    fn test_names_sorted() {
        let mut db = InMemoryDatabase::default();
        db.insert_combination("b", Combination::assembly(None));
        db.insert_combination("a", Combination::assembly(None));
        assert_eq!(db.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_top_level_names_skip_members() {
        let mut db = InMemoryDatabase::default();
        db.insert_primitive("s1", Primitive::Unknown { type_id: 99 });
        db.insert_primitive("s2", Primitive::Unknown { type_id: 99 });
        db.insert_combination(
            "r1",
            Combination::region(Some(BooleanTree::subtract(
                BooleanTree::leaf("s1"),
                BooleanTree::leaf("s2"),
            ))),
        );
        db.insert_combination("all", Combination::assembly(Some(BooleanTree::leaf("r1"))));
        db.insert_combination("spare", Combination::assembly(None));

        assert_eq!(db.top_level_names(), vec!["all", "spare"]);
    }
}
