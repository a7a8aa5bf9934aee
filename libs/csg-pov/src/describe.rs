//! # Boolean Tree Description
//!
//! Renders a combination tree as a fully parenthesized infix expression.
//!
//! ```text
//! union(a, subtract(b, c))  =>  (a u (b - c))
//! ```
//!
//! | Node      | Form          |
//! |-----------|---------------|
//! | leaf      | member name   |
//! | union     | `(l u r)`     |
//! | intersect | `(l + r)`     |
//! | subtract  | `(l - r)`     |
//! | xor       | `(l ^ r)`     |
//! | not       | `(!x)`        |
//! | guard     | `(Gx)`        |
//! | xnop      | `(Xx)`        |
//! | nop       | `NOP`         |
//! | no tree   | `-empty-`     |
//!
//! Member matrices are not rendered. Xor, guard and xnop have no POV-Ray
//! counterpart; they appear in the description as annotations only.

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use csg_db::{BinaryOp, BooleanTree, UnaryOp};
use stacker::maybe_grow;

use crate::error::ConvertError;

/// Text used for a combination with no members.
pub const EMPTY_TREE: &str = "-empty-";

/// Text used for an empty node.
pub const NOP: &str = "NOP";

/// Infix symbol of a binary operator.
pub fn binary_symbol(op: BinaryOp) -> char {
    match op {
        BinaryOp::Union => 'u',
        BinaryOp::Intersect => '+',
        BinaryOp::Subtract => '-',
        BinaryOp::Xor => '^',
    }
}

/// Prefix marker of a unary modifier.
pub fn unary_symbol(op: UnaryOp) -> char {
    match op {
        UnaryOp::Not => '!',
        UnaryOp::Guard => 'G',
        UnaryOp::XNop => 'X',
    }
}

/// Describes a combination tree.
///
/// Fails without partial output when the tree holds an unrecognized operator.
///
/// # Examples
/// ```
/// use csg_db::BooleanTree;
/// use csg_pov::describe::describe_tree;
///
/// let tree = BooleanTree::union(
///     BooleanTree::leaf("a"),
///     BooleanTree::subtract(BooleanTree::leaf("b"), BooleanTree::leaf("c")),
/// );
/// assert_eq!(describe_tree(Some(&tree)).unwrap(), "(a u (b - c))");
/// assert_eq!(describe_tree(None).unwrap(), "-empty-");
/// ```
pub fn describe_tree(tree: Option<&BooleanTree>) -> Result<String, ConvertError> {
    let Some(tree) = tree else {
        return Ok(EMPTY_TREE.to_string());
    };
    let mut out = String::new();
    describe_node(tree, &mut out)?;
    Ok(out)
}

fn describe_node(tree: &BooleanTree, out: &mut String) -> Result<(), ConvertError> {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        match tree {
            BooleanTree::Leaf(leaf) => out.push_str(&leaf.name),
            BooleanTree::Binary { op, left, right } => {
                // Both sides are rendered before anything is appended.
                let mut lhs = String::new();
                describe_node(left, &mut lhs)?;
                let mut rhs = String::new();
                describe_node(right, &mut rhs)?;
                out.push('(');
                out.push_str(&lhs);
                out.push(' ');
                out.push(binary_symbol(*op));
                out.push(' ');
                out.push_str(&rhs);
                out.push(')');
            }
            BooleanTree::Unary { op, operand } => {
                let mut inner = String::new();
                describe_node(operand, &mut inner)?;
                out.push('(');
                out.push(unary_symbol(*op));
                out.push_str(&inner);
                out.push(')');
            }
            BooleanTree::Nop => out.push_str(NOP),
            BooleanTree::Unrecognized { op } => {
                return Err(ConvertError::UnrecognizedOp { op: *op });
            }
        }
        Ok(())
    })
}

// =============================================================================
// TESTS
// =============================================================================
