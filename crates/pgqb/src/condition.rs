//! Normalization of WHERE/HAVING input shapes.
//!
//! `filter` and `having` accept several shapes; all normalize into an
//! expression [`Node`] at entry so the compiler sees one representation:
//!
//! - `(column, value)` — equality
//! - `(column, operator, value)` — explicit operator
//! - an ordered list of `(column, value)` pairs — ANDed equalities
//! - an expression `Node`

use crate::node::{and, col, op, IntoNode, Node};

/// Conversion of a condition shape into an expression node.
pub trait IntoCondition {
    fn into_condition(self) -> Node;
}

impl IntoCondition for Node {
    fn into_condition(self) -> Node {
        self
    }
}

/// `(column, value)` — the operator defaults to `=`.
impl<C: AsRef<str>, V: IntoNode> IntoCondition for (C, V) {
    fn into_condition(self) -> Node {
        op(col(self.0.as_ref()), "=", self.1)
    }
}

/// `(column, operator, value)`.
impl<C: AsRef<str>, V: IntoNode> IntoCondition for (C, &str, V) {
    fn into_condition(self) -> Node {
        op(col(self.0.as_ref()), self.1, self.2)
    }
}

/// Ordered `(column, value)` pairs, ANDed with `=`.
impl<C: AsRef<str>, V: IntoNode> IntoCondition for Vec<(C, V)> {
    fn into_condition(self) -> Node {
        and(self
            .into_iter()
            .map(|(c, v)| op(col(c.as_ref()), "=", v))
            .collect())
    }
}

/// Ordered `(column, value)` pairs, ANDed with `=`.
impl<C: AsRef<str>, V: IntoNode, const N: usize> IntoCondition for [(C, V); N] {
    fn into_condition(self) -> Node {
        and(self
            .into_iter()
            .map(|(c, v)| op(col(c.as_ref()), "=", v))
            .collect())
    }
}
