//! Statement builders.
//!
//! One fluent builder per statement variant, each with consuming methods
//! that return the builder itself so chaining composes:
//!
//! ```
//! use pgqb::{select, SortDir};
//!
//! let sql = select(["id", "name"])
//!     .from("users")
//!     .filter(("status", "active"))
//!     .order_by("id", SortDir::Asc)
//!     .limit(10)
//!     .to_sql()
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT "id", "name" FROM "users" WHERE "status" = 'active' ORDER BY "id" ASC LIMIT 10"#
//! );
//! ```
//!
//! Heterogeneous inputs (strings, arrays, nodes) normalize at entry into
//! canonical node lists, so each compiler sees one uniform representation
//! per clause.

mod combined;
mod delete;
mod insert;
mod select;
mod update;

pub use combined::{
    except, except_all, intersect, intersect_all, union, union_all, Combined, SetMember, SetOp,
};
pub use delete::{delete, Delete};
pub use insert::{insert, Insert};
pub use select::{select, IntoJoinCondition, JoinCondition, Select};
pub use update::{update, Update};

use crate::error::QbResult;
use crate::node::{col, Node, AND_PRECEDENCE};

// ==================== Ordering ====================

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn to_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// NULLS ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    fn to_sql(self) -> &'static str {
        match self {
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }
}

/// A single ORDER BY item.
#[derive(Debug, Clone)]
pub(crate) struct OrderItem {
    expr: Node,
    dir: SortDir,
    nulls: Option<NullsOrder>,
}

impl OrderItem {
    pub(crate) fn new(expr: Node, dir: SortDir, nulls: Option<NullsOrder>) -> Self {
        Self { expr, dir, nulls }
    }

    fn write(&self, out: &mut String) -> QbResult<()> {
        self.expr.write_expr(out)?;
        out.push(' ');
        out.push_str(self.dir.to_sql());
        if let Some(nulls) = self.nulls {
            out.push(' ');
            out.push_str(nulls.to_sql());
        }
        Ok(())
    }
}

// ==================== Field normalization ====================

/// Conversion of one field item into a node.
///
/// Strings are column paths here (projection position); literal values are
/// written as [`crate::val`] nodes.
pub trait IntoField {
    fn into_field(self) -> Node;
}

impl IntoField for Node {
    fn into_field(self) -> Node {
        self
    }
}

impl IntoField for &str {
    fn into_field(self) -> Node {
        col(self)
    }
}

impl IntoField for String {
    fn into_field(self) -> Node {
        col(&self)
    }
}

/// Conversion of a field-list shape into a list of nodes.
///
/// Accepts `()` (empty list), a single string or node, and arrays, vectors
/// or slices of field items. The aliased-field shape is written
/// `expr.alias("name")`.
pub trait IntoFields {
    fn into_fields(self) -> Vec<Node>;
}

impl IntoFields for () {
    fn into_fields(self) -> Vec<Node> {
        Vec::new()
    }
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<Node> {
        vec![col(self)]
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<Node> {
        vec![col(&self)]
    }
}

impl IntoFields for Node {
    fn into_fields(self) -> Vec<Node> {
        vec![self]
    }
}

impl<F: IntoField> IntoFields for Vec<F> {
    fn into_fields(self) -> Vec<Node> {
        self.into_iter().map(IntoField::into_field).collect()
    }
}

impl<F: IntoField, const N: usize> IntoFields for [F; N] {
    fn into_fields(self) -> Vec<Node> {
        self.into_iter().map(IntoField::into_field).collect()
    }
}

impl IntoFields for &[&str] {
    fn into_fields(self) -> Vec<Node> {
        self.iter().map(|s| col(s)).collect()
    }
}

// ==================== Row normalization ====================

/// Conversion of a row shape into ordered `(column, expression)` pairs.
///
/// Keys supply the column list in insertion order. Homogeneous rows can use
/// arrays or vectors of pairs; rows mixing value types use a tuple of pairs:
/// `(("a", 0), ("b", false), ("c", "text"))`.
pub trait IntoRow {
    fn into_row(self) -> Vec<(String, Node)>;
}

impl<S: Into<String>, V: crate::node::IntoNode> IntoRow for Vec<(S, V)> {
    fn into_row(self) -> Vec<(String, Node)> {
        self.into_iter()
            .map(|(c, v)| (c.into(), v.into_node()))
            .collect()
    }
}

impl<S: Into<String>, V: crate::node::IntoNode, const N: usize> IntoRow for [(S, V); N] {
    fn into_row(self) -> Vec<(String, Node)> {
        self.into_iter()
            .map(|(c, v)| (c.into(), v.into_node()))
            .collect()
    }
}

macro_rules! into_row_for_tuples {
    ($(($($idx:tt : $s:ident, $v:ident),+)),+ $(,)?) => {
        $(
            impl<$($s: Into<String>, $v: crate::node::IntoNode),+> IntoRow for ($(($s, $v),)+) {
                fn into_row(self) -> Vec<(String, Node)> {
                    vec![$((self.$idx.0.into(), self.$idx.1.into_node())),+]
                }
            }
        )+
    };
}

into_row_for_tuples!(
    (0: S0, V0),
    (0: S0, V0, 1: S1, V1),
    (0: S0, V0, 1: S1, V1, 2: S2, V2),
    (0: S0, V0, 1: S1, V1, 2: S2, V2, 3: S3, V3),
    (0: S0, V0, 1: S1, V1, 2: S2, V2, 3: S3, V3, 4: S4, V4),
    (0: S0, V0, 1: S1, V1, 2: S2, V2, 3: S3, V3, 4: S4, V4, 5: S5, V5),
    (0: S0, V0, 1: S1, V1, 2: S2, V2, 3: S3, V3, 4: S4, V4, 5: S5, V5, 6: S6, V6),
    (0: S0, V0, 1: S1, V1, 2: S2, V2, 3: S3, V3, 4: S4, V4, 5: S5, V5, 6: S6, V6, 7: S7, V7),
);

// ==================== Shared emission ====================

pub(crate) fn write_field_list(out: &mut String, fields: &[Node]) -> QbResult<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        field.write_projection(out)?;
    }
    Ok(())
}

/// Conditions joined with AND. A lone condition emits bare; in a list,
/// nested AND/OR groups are parenthesized.
pub(crate) fn write_condition_list(out: &mut String, conds: &[Node]) -> QbResult<()> {
    if conds.len() == 1 {
        return conds[0].write_expr(out);
    }
    for (i, cond) in conds.iter().enumerate() {
        if i > 0 {
            out.push_str(" AND ");
        }
        match cond {
            Node::And(_) | Node::Or(_) => {
                out.push('(');
                cond.write_expr(out)?;
                out.push(')');
            }
            other => other.write_operand(out, AND_PRECEDENCE)?,
        }
    }
    Ok(())
}

pub(crate) fn write_where(out: &mut String, conds: &[Node]) -> QbResult<()> {
    if conds.is_empty() {
        return Ok(());
    }
    out.push_str(" WHERE ");
    write_condition_list(out, conds)
}

pub(crate) fn write_returning(out: &mut String, fields: &[Node]) -> QbResult<()> {
    if fields.is_empty() {
        return Ok(());
    }
    out.push_str(" RETURNING ");
    write_field_list(out, fields)
}

pub(crate) fn write_order_by(out: &mut String, items: &[OrderItem]) -> QbResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    out.push_str(" ORDER BY ");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.write(out)?;
    }
    Ok(())
}

pub(crate) fn write_offset_limit(out: &mut String, offset: Option<i64>, limit: Option<i64>) {
    if let Some(offset) = offset {
        out.push_str(" OFFSET ");
        out.push_str(&offset.to_string());
    }
    if let Some(limit) = limit {
        out.push_str(" LIMIT ");
        out.push_str(&limit.to_string());
    }
}

#[cfg(test)]
mod tests;
