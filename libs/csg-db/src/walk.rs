//! # Tree Walking
//!
//! Depth-first traversal of named top-level objects, driving three hooks.
//!
//! ## Control Flow
//!
//! ```text
//! combination ─▶ region_start ─▶ members (through the Boolean tree) ─▶ region_end
//! primitive   ─▶ leaf
//! ```
//!
//! The walker resolves member names, multiplies member matrices onto the
//! accumulated transform and rebuilds a [`ResultTree`] from whatever the
//! leaf hook returns. The tree is offered to `region_end`; unless the hook
//! keeps it, the walker releases it.

use std::fmt;

use config::constants::{MAX_WALK_DEPTH, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use config::tolerance::Tolerance;
use glam::DMat4;
use stacker::maybe_grow;
use tracing::{debug, warn};

use crate::database::Database;
use crate::error::WalkError;
use crate::object::{Combination, DbObject, ObjectData};
use crate::tree::{BinaryOp, BooleanTree, UnaryOp};

// =============================================================================
// TRAVERSAL STATE
// =============================================================================

/// State threaded through a walk.
///
/// # Examples
/// ```
/// use config::tolerance::Tolerance;
/// use csg_db::TreeState;
/// use glam::{DMat4, DVec3};
///
/// let root = TreeState::new(Tolerance::default());
/// let m = DMat4::from_translation(DVec3::X);
/// let child = root.descend(Some(&m));
/// assert_eq!(child.matrix, m);
/// assert_eq!(child.tolerance, root.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeState {
    /// Calculational tolerances, never modified during a walk.
    pub tolerance: Tolerance,
    /// Transform accumulated from the walk root to the current node.
    pub matrix: DMat4,
}

impl TreeState {
    /// Root state with an identity transform.
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            matrix: DMat4::IDENTITY,
        }
    }

    /// Root state with a starting transform.
    pub fn with_matrix(self, matrix: DMat4) -> Self {
        Self { matrix, ..self }
    }

    /// State for a member placed by `member` inside the current node.
    pub fn descend(&self, member: Option<&DMat4>) -> Self {
        match member {
            Some(m) => Self {
                matrix: self.matrix * *m,
                ..*self
            },
            None => *self,
        }
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new(Tolerance::default())
    }
}

/// Names from the walk root to the current node.
///
/// # Examples
/// ```
/// use csg_db::FullPath;
/// let mut path = FullPath::default();
/// path.push("all.g");
/// path.push("wheel.r");
/// assert_eq!(path.to_string(), "/all.g/wheel.r");
/// assert_eq!(path.current(), Some("wheel.r"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullPath {
    names: Vec<String>,
}

impl FullPath {
    /// Path with a single root name.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    /// Descends into `name`.
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Leaves the current node.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Name of the node the path ends at.
    pub fn current(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    /// Names from the root down.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names on the path.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the path has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for FullPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.names {
            write!(f, "/{name}")?;
        }
        Ok(())
    }
}

// =============================================================================
// HOOK PROTOCOL
// =============================================================================

/// Returned by `region_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the combination's members.
    Continue,
    /// Skip the members and `region_end`.
    Skip,
}

/// Returned by `region_end`.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeOwnership<T> {
    /// The hook kept the tree; the walker must not touch it again.
    Owned,
    /// The tree is handed back and the walker releases it.
    NotOwned(Option<ResultTree<T>>),
}

/// Tree of leaf hook outputs, mirroring the Boolean structure of a
/// combination. Members that produced no output are pruned: a union or xor
/// keeps the surviving side, a subtraction with no minuend and an
/// intersection missing either side are empty.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultTree<T> {
    /// Output of one leaf hook call.
    Leaf(T),
    /// Binary operator over two surviving subtrees.
    Binary {
        /// Operator joining the subtrees.
        op: BinaryOp,
        /// Left operand.
        left: Box<ResultTree<T>>,
        /// Right operand.
        right: Box<ResultTree<T>>,
    },
    /// Unary modifier over a surviving subtree.
    Unary {
        /// Modifier applied.
        op: UnaryOp,
        /// The modified subtree.
        operand: Box<ResultTree<T>>,
    },
}

impl<T> ResultTree<T> {
    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                ResultTree::Leaf(_) => count += 1,
                ResultTree::Binary { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
                ResultTree::Unary { operand, .. } => stack.push(operand),
            }
        }
        count
    }

    /// Leaf values, left to right.
    pub fn into_leaves(self) -> Vec<T> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                ResultTree::Leaf(value) => leaves.push(value),
                ResultTree::Binary { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
                ResultTree::Unary { operand, .. } => stack.push(*operand),
            }
        }
        leaves
    }

    fn binary(op: BinaryOp, left: Option<Self>, right: Option<Self>) -> Option<Self> {
        match (left, right) {
            (Some(left), Some(right)) => Some(ResultTree::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }),
            // Nothing left to subtract from.
            (None, Some(_)) if op == BinaryOp::Subtract => None,
            // An intersection with nothing is nothing.
            (Some(_), None) | (None, Some(_)) if op == BinaryOp::Intersect => None,
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }
}

/// Hooks invoked by [`walk_tree`].
pub trait TreeWalker {
    /// Value the leaf hook produces for a primitive.
    type Output;
    /// Error type; walk failures convert into it.
    type Error: From<WalkError>;

    /// Called when a combination is entered, before its members.
    fn region_start(
        &mut self,
        state: &TreeState,
        path: &FullPath,
        comb: &Combination,
    ) -> Result<WalkControl, Self::Error>;

    /// Called after all members of a combination were visited.
    fn region_end(
        &mut self,
        state: &TreeState,
        path: &FullPath,
        tree: Option<ResultTree<Self::Output>>,
    ) -> Result<TreeOwnership<Self::Output>, Self::Error>;

    /// Called for every stored object reached. `data` is in its local frame;
    /// `state.matrix` places it.
    fn leaf(
        &mut self,
        state: &TreeState,
        path: &FullPath,
        data: &ObjectData,
    ) -> Result<Option<Self::Output>, Self::Error>;
}

// =============================================================================
// WALK
// =============================================================================

/// Walks each named root depth-first, in order.
///
/// A root missing from the database aborts the walk. A member reference
/// with no directory entry is logged and skipped.
pub fn walk_tree<D, W>(
    db: &D,
    roots: &[&str],
    initial: &TreeState,
    walker: &mut W,
) -> Result<(), W::Error>
where
    D: Database + ?Sized,
    W: TreeWalker,
{
    let mut traversal = Traversal { db, walker };

    for &root in roots {
        let object = db.lookup(root).ok_or_else(|| WalkError::ObjectNotFound {
            name: root.to_string(),
        })?;
        let mut path = FullPath::root(root);
        if let Some(tree) = traversal.visit(initial, &mut path, object)? {
            debug!("{}: releasing {} top-level results", path, tree.leaf_count());
        }
    }

    Ok(())
}

struct Traversal<'a, D: ?Sized, W> {
    db: &'a D,
    walker: &'a mut W,
}

impl<D, W> Traversal<'_, D, W>
where
    D: Database + ?Sized,
    W: TreeWalker,
{
    fn visit(
        &mut self,
        state: &TreeState,
        path: &mut FullPath,
        object: &DbObject,
    ) -> Result<Option<ResultTree<W::Output>>, W::Error> {
        if path.len() > MAX_WALK_DEPTH {
            return Err(WalkError::DepthExceeded {
                path: path.to_string(),
                max: MAX_WALK_DEPTH,
            }
            .into());
        }

        match object {
            DbObject::Solid(data) => {
                let output = self.walker.leaf(state, path, data)?;
                Ok(output.map(ResultTree::Leaf))
            }
            DbObject::Combination(comb) => {
                self.visit_combination(state, path, comb)?;
                Ok(None)
            }
        }
    }

    fn visit_combination(
        &mut self,
        state: &TreeState,
        path: &mut FullPath,
        comb: &Combination,
    ) -> Result<(), W::Error> {
        if self.walker.region_start(state, path, comb)? == WalkControl::Skip {
            debug!("{}: skipped by region_start", path);
            return Ok(());
        }

        let tree = match &comb.tree {
            Some(tree) => self.visit_tree(state, path, tree)?,
            None => None,
        };

        match self.walker.region_end(state, path, tree)? {
            TreeOwnership::Owned => debug!("{}: result tree kept by region_end", path),
            TreeOwnership::NotOwned(Some(tree)) => {
                debug!("{}: releasing result tree ({} leaves)", path, tree.leaf_count());
            }
            TreeOwnership::NotOwned(None) => {}
        }
        Ok(())
    }

    fn visit_tree(
        &mut self,
        state: &TreeState,
        path: &mut FullPath,
        tree: &BooleanTree,
    ) -> Result<Option<ResultTree<W::Output>>, W::Error> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.visit_tree_inner(state, path, tree)
        })
    }

    fn visit_tree_inner(
        &mut self,
        state: &TreeState,
        path: &mut FullPath,
        tree: &BooleanTree,
    ) -> Result<Option<ResultTree<W::Output>>, W::Error> {
        match tree {
            BooleanTree::Leaf(leaf) => {
                let Some(object) = self.db.lookup(&leaf.name) else {
                    warn!("{}: member {} not found in database, skipping", path, leaf.name);
                    return Ok(None);
                };
                let child_state = state.descend(leaf.matrix.as_ref());
                path.push(leaf.name.as_str());
                let result = self.visit(&child_state, path, object);
                path.pop();
                result
            }
            BooleanTree::Binary { op, left, right } => {
                let left = self.visit_tree(state, path, left)?;
                let right = self.visit_tree(state, path, right)?;
                Ok(ResultTree::binary(*op, left, right))
            }
            BooleanTree::Unary { op, operand } => {
                let operand = self.visit_tree(state, path, operand)?;
                Ok(operand.map(|operand| ResultTree::Unary {
                    op: *op,
                    operand: Box::new(operand),
                }))
            }
            BooleanTree::Nop => Ok(None),
            BooleanTree::Unrecognized { op } => Err(WalkError::UnrecognizedOp {
                op: *op,
                path: path.to_string(),
            }
            .into()),
        }
    }
}
