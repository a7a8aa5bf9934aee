//! # Boolean Combination Trees
//!
//! The expression tree a combination stores over its members.
//!
//! Operator arity is carried by the type: binary operators always own two
//! subtrees, unary operators one, leaves none. The only malformed shape that
//! survives decoding is an operator code the database layer could not
//! classify, kept as [`BooleanTree::Unrecognized`] so that consumers can
//! refuse it explicitly.

use glam::DMat4;
use serde::{Deserialize, Serialize};

// =============================================================================
// OPERATORS
// =============================================================================

/// Binary Boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `u`
    Union,
    /// `+`
    Intersect,
    /// `-`
    Subtract,
    /// Legacy exclusive-or; no CSG meaning in most scene formats.
    Xor,
}

/// Unary tree modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation.
    Not,
    /// Guard modifier.
    Guard,
    /// Extended no-op.
    XNop,
}

/// Operator attached to a member in a flat member list.
///
/// ```text
/// u a - b + c u d    =>    ((a - b) + c) u d
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberOp {
    /// Starts a new term.
    Union,
    /// Intersects with the current term.
    Intersect,
    /// Subtracts from the current term.
    Subtract,
}

// =============================================================================
// TREE
// =============================================================================

/// Reference to a member object, with the matrix placing it in its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeLeaf {
    /// Directory name of the referenced object.
    pub name: String,
    /// Member placement; `None` means identity.
    pub matrix: Option<DMat4>,
}

impl TreeLeaf {
    /// Creates an untransformed member reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matrix: None,
        }
    }

    /// Creates a member reference placed by `matrix`.
    pub fn with_matrix(name: impl Into<String>, matrix: DMat4) -> Self {
        Self {
            name: name.into(),
            matrix: Some(matrix),
        }
    }
}

/// A node of a Boolean combination tree.
///
/// # Examples
/// ```
/// use csg_db::BooleanTree;
/// let tree = BooleanTree::union(
///     BooleanTree::leaf("a"),
///     BooleanTree::subtract(BooleanTree::leaf("b"), BooleanTree::leaf("c")),
/// );
/// assert_eq!(tree.member_names(), vec!["a", "b", "c"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BooleanTree {
    /// Member reference.
    Leaf(TreeLeaf),
    /// Binary operator over two subtrees.
    Binary {
        /// Operator joining the subtrees.
        op: BinaryOp,
        /// Left operand.
        left: Box<BooleanTree>,
        /// Right operand.
        right: Box<BooleanTree>,
    },
    /// Unary modifier over one subtree.
    Unary {
        /// Modifier applied.
        op: UnaryOp,
        /// The modified subtree.
        operand: Box<BooleanTree>,
    },
    /// Empty node.
    Nop,
    /// Node whose stored operator code has no tree meaning.
    Unrecognized {
        /// The stored operator code.
        op: u16,
    },
}

impl BooleanTree {
    /// Member reference without a matrix.
    pub fn leaf(name: impl Into<String>) -> Self {
        BooleanTree::Leaf(TreeLeaf::new(name))
    }

    /// Member reference placed by `matrix`.
    pub fn leaf_with_matrix(name: impl Into<String>, matrix: DMat4) -> Self {
        BooleanTree::Leaf(TreeLeaf::with_matrix(name, matrix))
    }

    /// Binary node.
    pub fn binary(op: BinaryOp, left: BooleanTree, right: BooleanTree) -> Self {
        BooleanTree::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Unary node.
    pub fn unary(op: UnaryOp, operand: BooleanTree) -> Self {
        BooleanTree::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Union of two subtrees.
    pub fn union(left: BooleanTree, right: BooleanTree) -> Self {
        Self::binary(BinaryOp::Union, left, right)
    }

    /// Intersection of two subtrees.
    pub fn intersect(left: BooleanTree, right: BooleanTree) -> Self {
        Self::binary(BinaryOp::Intersect, left, right)
    }

    /// `left` minus `right`.
    pub fn subtract(left: BooleanTree, right: BooleanTree) -> Self {
        Self::binary(BinaryOp::Subtract, left, right)
    }

    /// Exclusive-or of two subtrees.
    pub fn xor(left: BooleanTree, right: BooleanTree) -> Self {
        Self::binary(BinaryOp::Xor, left, right)
    }

    /// Negation.
    pub fn not(operand: BooleanTree) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    /// Guard modifier.
    pub fn guard(operand: BooleanTree) -> Self {
        Self::unary(UnaryOp::Guard, operand)
    }

    /// Extended no-op modifier.
    pub fn xnop(operand: BooleanTree) -> Self {
        Self::unary(UnaryOp::XNop, operand)
    }

    /// Builds a tree from a flat member list.
    ///
    /// Intersection and subtraction bind tighter than union and associate to
    /// the left. The operator on the first member is ignored. Returns `None`
    /// for an empty list.
    ///
    /// # Examples
    /// ```
    /// use csg_db::{BooleanTree, MemberOp, TreeLeaf};
    /// let tree = BooleanTree::from_members(vec![
    ///     (MemberOp::Union, TreeLeaf::new("a")),
    ///     (MemberOp::Subtract, TreeLeaf::new("b")),
    ///     (MemberOp::Union, TreeLeaf::new("c")),
    /// ])
    /// .unwrap();
    /// assert_eq!(
    ///     tree,
    ///     BooleanTree::union(
    ///         BooleanTree::subtract(BooleanTree::leaf("a"), BooleanTree::leaf("b")),
    ///         BooleanTree::leaf("c"),
    ///     )
    /// );
    /// ```
    pub fn from_members<I>(members: I) -> Option<Self>
    where
        I: IntoIterator<Item = (MemberOp, TreeLeaf)>,
    {
        let mut terms: Vec<BooleanTree> = Vec::new();
        let mut current: Option<BooleanTree> = None;

        for (op, leaf) in members {
            let node = BooleanTree::Leaf(leaf);
            current = match (current.take(), op) {
                (None, _) => Some(node),
                (Some(term), MemberOp::Union) => {
                    terms.push(term);
                    Some(node)
                }
                (Some(term), MemberOp::Intersect) => Some(Self::intersect(term, node)),
                (Some(term), MemberOp::Subtract) => Some(Self::subtract(term, node)),
            };
        }
        terms.extend(current);

        terms.into_iter().reduce(Self::union)
    }

    /// Names of all referenced members, left to right.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                BooleanTree::Leaf(leaf) => names.push(leaf.name.as_str()),
                BooleanTree::Binary { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
                BooleanTree::Unary { operand, .. } => stack.push(operand),
                BooleanTree::Nop | BooleanTree::Unrecognized { .. } => {}
            }
        }
        names
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_from_members_empty() {
        assert_eq!(BooleanTree::from_members(Vec::new()), None);
    }

    #[test]
    fn test_from_members_single() {
        let tree = BooleanTree::from_members(vec![(MemberOp::Subtract, TreeLeaf::new("a"))]);
        assert_eq!(tree, Some(BooleanTree::leaf("a")));
    }

    /// `u a + b - c u d u e` groups as `(((a + b) - c) u d) u e`.
    #[test]
    fn test_from_members_precedence() {
        let tree = BooleanTree::from_members(vec![
            (MemberOp::Union, TreeLeaf::new("a")),
            (MemberOp::Intersect, TreeLeaf::new("b")),
            (MemberOp::Subtract, TreeLeaf::new("c")),
            (MemberOp::Union, TreeLeaf::new("d")),
            (MemberOp::Union, TreeLeaf::new("e")),
        ])
        .unwrap();

        let expected = BooleanTree::union(
            BooleanTree::union(
                BooleanTree::subtract(
                    BooleanTree::intersect(BooleanTree::leaf("a"), BooleanTree::leaf("b")),
                    BooleanTree::leaf("c"),
                ),
                BooleanTree::leaf("d"),
            ),
            BooleanTree::leaf("e"),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_from_members_keeps_matrices() {
        let m = DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0));
        let tree = BooleanTree::from_members(vec![(
            MemberOp::Union,
            TreeLeaf::with_matrix("a", m),
        )])
        .unwrap();
        match tree {
            BooleanTree::Leaf(leaf) => assert_eq!(leaf.matrix, Some(m)),
            other => panic!("Expected Leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_member_names_through_unary() {
        let tree = BooleanTree::intersect(
            BooleanTree::guard(BooleanTree::leaf("x")),
            BooleanTree::union(BooleanTree::Nop, BooleanTree::leaf("y")),
        );
        assert_eq!(tree.member_names(), vec!["x", "y"]);
    }
}
