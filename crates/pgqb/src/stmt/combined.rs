//! Set-operation statements (UNION / INTERSECT / EXCEPT).
//!
//! A [`Combined`] joins member statements with a set-operation keyword.
//! Nesting is structural: a Combined member always emits parenthesized, only
//! the syntactic root is bare, so left-associative chains come out flat and
//! explicit nesting keeps its grouping.

use crate::error::{QbError, QbResult};
use crate::node::Node;
use crate::stmt::{
    write_offset_limit, write_order_by, IntoField, NullsOrder, OrderItem, Select, SortDir,
};

/// Set-operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl SetOp {
    fn keyword(self) -> &'static str {
        match self {
            SetOp::Union => "UNION",
            SetOp::UnionAll => "UNION ALL",
            SetOp::Intersect => "INTERSECT",
            SetOp::IntersectAll => "INTERSECT ALL",
            SetOp::Except => "EXCEPT",
            SetOp::ExceptAll => "EXCEPT ALL",
        }
    }
}

/// A member of a set operation: a SELECT or a nested Combined.
#[derive(Debug, Clone)]
pub enum SetMember {
    Select(Select),
    Combined(Combined),
}

impl From<Select> for SetMember {
    fn from(s: Select) -> Self {
        SetMember::Select(s)
    }
}

impl From<Combined> for SetMember {
    fn from(c: Combined) -> Self {
        SetMember::Combined(c)
    }
}

/// Set-operation statement builder.
#[derive(Debug, Clone)]
pub struct Combined {
    op: SetOp,
    members: Vec<SetMember>,
    order_items: Vec<OrderItem>,
    offset: Option<i64>,
    limit: Option<i64>,
}

impl Combined {
    /// Create a set operation over the given members.
    ///
    /// Compilation requires at least one member; a single member emits as
    /// just that member.
    pub fn new(op: SetOp, members: Vec<SetMember>) -> Self {
        Self {
            op,
            members,
            order_items: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    /// Append a member.
    pub fn add(mut self, member: impl Into<SetMember>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Append an ORDER BY item (applies to the whole set operation).
    pub fn order_by(mut self, expr: impl IntoField, dir: SortDir) -> Self {
        self.order_items
            .push(OrderItem::new(expr.into_field(), dir, None));
        self
    }

    /// Append an ORDER BY item with NULLS ordering.
    pub fn order_by_nulls(
        mut self,
        expr: impl IntoField,
        dir: SortDir,
        nulls: NullsOrder,
    ) -> Self {
        self.order_items
            .push(OrderItem::new(expr.into_field(), dir, Some(nulls)));
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Wrap this statement as an aliased subexpression node.
    pub fn alias(self, name: impl Into<String>) -> Node {
        Node::from(self).alias(name)
    }

    /// Compile to SQL text.
    pub fn to_sql(&self) -> QbResult<String> {
        if self.members.is_empty() {
            return Err(QbError::query_shape(
                "set operation requires at least one member",
            ));
        }

        let mut out = String::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(self.op.keyword());
                out.push(' ');
            }
            match member {
                SetMember::Select(s) => out.push_str(&s.to_sql()?),
                SetMember::Combined(c) => {
                    out.push('(');
                    out.push_str(&c.to_sql()?);
                    out.push(')');
                }
            }
        }

        write_order_by(&mut out, &self.order_items)?;
        write_offset_limit(&mut out, self.offset, self.limit);

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "pgqb", sql = %out, "compiled set-operation statement");

        Ok(out)
    }
}

/// `left UNION right`
pub fn union(left: impl Into<SetMember>, right: impl Into<SetMember>) -> Combined {
    Combined::new(SetOp::Union, vec![left.into(), right.into()])
}

/// `left UNION ALL right`
pub fn union_all(left: impl Into<SetMember>, right: impl Into<SetMember>) -> Combined {
    Combined::new(SetOp::UnionAll, vec![left.into(), right.into()])
}

/// `left INTERSECT right`
pub fn intersect(left: impl Into<SetMember>, right: impl Into<SetMember>) -> Combined {
    Combined::new(SetOp::Intersect, vec![left.into(), right.into()])
}

/// `left INTERSECT ALL right`
pub fn intersect_all(left: impl Into<SetMember>, right: impl Into<SetMember>) -> Combined {
    Combined::new(SetOp::IntersectAll, vec![left.into(), right.into()])
}

/// `left EXCEPT right`
pub fn except(left: impl Into<SetMember>, right: impl Into<SetMember>) -> Combined {
    Combined::new(SetOp::Except, vec![left.into(), right.into()])
}

/// `left EXCEPT ALL right`
pub fn except_all(left: impl Into<SetMember>, right: impl Into<SetMember>) -> Combined {
    Combined::new(SetOp::ExceptAll, vec![left.into(), right.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::select;

    fn sel(table: &str) -> Select {
        select("a").from(table)
    }

    #[test]
    fn union_flat() {
        let sql = union(sel("x"), sel("y")).to_sql().unwrap();
        assert_eq!(sql, r#"SELECT "a" FROM "x" UNION SELECT "a" FROM "y""#);
    }

    #[test]
    fn nested_right_parenthesizes() {
        let sql = union(sel("x"), union(sel("y"), sel("z"))).to_sql().unwrap();
        assert_eq!(
            sql,
            r#"SELECT "a" FROM "x" UNION (SELECT "a" FROM "y" UNION SELECT "a" FROM "z")"#
        );
    }

    #[test]
    fn nested_left_parenthesizes() {
        let sql = union(union(sel("x"), sel("y")), sel("z")).to_sql().unwrap();
        assert_eq!(
            sql,
            r#"(SELECT "a" FROM "x" UNION SELECT "a" FROM "y") UNION SELECT "a" FROM "z""#
        );
    }

    #[test]
    fn three_members_left_associative() {
        let sql = union(sel("x"), sel("y")).add(sel("z")).to_sql().unwrap();
        assert_eq!(
            sql,
            r#"SELECT "a" FROM "x" UNION SELECT "a" FROM "y" UNION SELECT "a" FROM "z""#
        );
    }

    #[test]
    fn single_member_degenerate() {
        let sql = Combined::new(SetOp::Union, vec![sel("x").into()])
            .to_sql()
            .unwrap();
        assert_eq!(sql, r#"SELECT "a" FROM "x""#);
    }

    #[test]
    fn zero_members_is_query_shape() {
        let err = Combined::new(SetOp::Union, Vec::new()).to_sql().unwrap_err();
        assert!(err.is_query_shape());
    }

    #[test]
    fn all_variants_keywords() {
        let cases: [(Combined, &str); 5] = [
            (union_all(sel("x"), sel("y")), "UNION ALL"),
            (intersect(sel("x"), sel("y")), "INTERSECT"),
            (intersect_all(sel("x"), sel("y")), "INTERSECT ALL"),
            (except(sel("x"), sel("y")), "EXCEPT"),
            (except_all(sel("x"), sel("y")), "EXCEPT ALL"),
        ];
        for (stmt, keyword) in cases {
            let sql = stmt.to_sql().unwrap();
            assert_eq!(
                sql,
                format!(r#"SELECT "a" FROM "x" {keyword} SELECT "a" FROM "y""#)
            );
        }
    }

    #[test]
    fn mixed_ops_nested_group_parenthesizes() {
        let sql = intersect(union(sel("x"), sel("y")), sel("z")).to_sql().unwrap();
        assert_eq!(
            sql,
            r#"(SELECT "a" FROM "x" UNION SELECT "a" FROM "y") INTERSECT SELECT "a" FROM "z""#
        );
    }

    #[test]
    fn trailing_order_offset_limit() {
        let sql = union(sel("x"), sel("y"))
            .order_by("a", SortDir::Desc)
            .offset(5)
            .limit(10)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            r#"SELECT "a" FROM "x" UNION SELECT "a" FROM "y" ORDER BY "a" DESC OFFSET 5 LIMIT 10"#
        );
    }
}
