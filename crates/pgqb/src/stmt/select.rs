//! SELECT statement builder.

use crate::condition::IntoCondition;
use crate::error::QbResult;
use crate::node::Node;
use crate::stmt::{
    write_condition_list, write_field_list, write_offset_limit, write_order_by, write_where,
    IntoField, IntoFields, NullsOrder, OrderItem, SortDir,
};

/// Create a SELECT statement.
///
/// `fields` may be `()` (compiles to `*`), a column path string, a node, or
/// an array/vector of field items.
///
/// # Example
/// ```
/// use pgqb::select;
///
/// let sql = select(()).from("x").to_sql().unwrap();
/// assert_eq!(sql, r#"SELECT * FROM "x""#);
/// ```
pub fn select(fields: impl IntoFields) -> Select {
    Select::new(fields)
}

/// Join condition: shared column names (`USING`) or a predicate (`ON`).
#[derive(Debug, Clone)]
pub enum JoinCondition {
    Using(Vec<String>),
    On(Node),
}

/// Conversion into a [`JoinCondition`]: lists of column names become
/// `USING (...)`, expression nodes become `ON ...`.
pub trait IntoJoinCondition {
    fn into_join_condition(self) -> JoinCondition;
}

impl IntoJoinCondition for JoinCondition {
    fn into_join_condition(self) -> JoinCondition {
        self
    }
}

impl IntoJoinCondition for Node {
    fn into_join_condition(self) -> JoinCondition {
        JoinCondition::On(self)
    }
}

impl IntoJoinCondition for Vec<&str> {
    fn into_join_condition(self) -> JoinCondition {
        JoinCondition::Using(self.into_iter().map(str::to_string).collect())
    }
}

impl IntoJoinCondition for Vec<String> {
    fn into_join_condition(self) -> JoinCondition {
        JoinCondition::Using(self)
    }
}

impl<const N: usize> IntoJoinCondition for [&str; N] {
    fn into_join_condition(self) -> JoinCondition {
        JoinCondition::Using(self.into_iter().map(str::to_string).collect())
    }
}

impl IntoJoinCondition for &[&str] {
    fn into_join_condition(self) -> JoinCondition {
        JoinCondition::Using(self.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone, Copy)]
enum JoinKind {
    Cross,
    Inner,
    LeftOuter,
    RightOuter,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Cross => "CROSS JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    relation: Node,
    condition: Option<JoinCondition>,
}

/// SELECT statement builder.
#[derive(Debug, Clone, Default)]
pub struct Select {
    distinct: bool,
    fields: Vec<Node>,
    from: Vec<Node>,
    joins: Vec<Join>,
    where_conds: Vec<Node>,
    group_by: Vec<Node>,
    having_conds: Vec<Node>,
    order_items: Vec<OrderItem>,
    offset: Option<i64>,
    limit: Option<i64>,
}

impl Select {
    /// Create a new SELECT with the given field list.
    pub fn new(fields: impl IntoFields) -> Self {
        Self {
            fields: fields.into_fields(),
            ..Self::default()
        }
    }

    // ==================== Projection ====================

    /// Set the DISTINCT flag.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the DISTINCT flag and replace the field list.
    pub fn distinct_fields(mut self, fields: impl IntoFields) -> Self {
        self.distinct = true;
        self.fields = fields.into_fields();
        self
    }

    /// Append one field.
    pub fn field(mut self, field: impl IntoField) -> Self {
        self.fields.push(field.into_field());
        self
    }

    // ==================== FROM & JOIN ====================

    /// Append relations to the FROM list. Two or more relations compose as
    /// `CROSS JOIN`.
    pub fn from(mut self, relations: impl IntoFields) -> Self {
        self.from.extend(relations.into_fields());
        self
    }

    /// Add `CROSS JOIN relation`.
    pub fn cross_join(mut self, relation: impl IntoField) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Cross,
            relation: relation.into_field(),
            condition: None,
        });
        self
    }

    /// Add `INNER JOIN relation ON ... / USING (...)`.
    pub fn inner_join(
        mut self,
        relation: impl IntoField,
        condition: impl IntoJoinCondition,
    ) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Inner,
            relation: relation.into_field(),
            condition: Some(condition.into_join_condition()),
        });
        self
    }

    /// Add `LEFT OUTER JOIN relation ON ... / USING (...)`.
    pub fn left_join(
        mut self,
        relation: impl IntoField,
        condition: impl IntoJoinCondition,
    ) -> Self {
        self.joins.push(Join {
            kind: JoinKind::LeftOuter,
            relation: relation.into_field(),
            condition: Some(condition.into_join_condition()),
        });
        self
    }

    /// Add `RIGHT OUTER JOIN relation ON ... / USING (...)`.
    pub fn right_join(
        mut self,
        relation: impl IntoField,
        condition: impl IntoJoinCondition,
    ) -> Self {
        self.joins.push(Join {
            kind: JoinKind::RightOuter,
            relation: relation.into_field(),
            condition: Some(condition.into_join_condition()),
        });
        self
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Add a WHERE condition; repeated calls AND together.
    ///
    /// Accepts `(column, value)`, `(column, operator, value)`, an ordered
    /// list of `(column, value)` pairs, or an expression node.
    pub fn filter(mut self, condition: impl IntoCondition) -> Self {
        self.where_conds.push(condition.into_condition());
        self
    }

    /// Append GROUP BY expressions.
    pub fn group_by(mut self, fields: impl IntoFields) -> Self {
        self.group_by.extend(fields.into_fields());
        self
    }

    /// Add a HAVING condition; repeated calls AND together. Same shapes as
    /// [`filter`](Select::filter).
    pub fn having(mut self, condition: impl IntoCondition) -> Self {
        self.having_conds.push(condition.into_condition());
        self
    }

    // ==================== Ordering & pagination ====================

    /// Append an ORDER BY item.
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

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1); `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: i64, per_page: i64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1) * size);
        self
    }

    // ==================== Compilation ====================

    /// Wrap this statement as an aliased subexpression node.
    pub fn alias(self, name: impl Into<String>) -> Node {
        Node::from(self).alias(name)
    }

    /// Compile to SQL text.
    pub fn to_sql(&self) -> QbResult<String> {
        let mut out = String::from("SELECT ");
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        if self.fields.is_empty() {
            out.push('*');
        } else {
            write_field_list(&mut out, &self.fields)?;
        }

        if !self.from.is_empty() {
            out.push_str(" FROM ");
            for (i, relation) in self.from.iter().enumerate() {
                if i > 0 {
                    out.push_str(" CROSS JOIN ");
                }
                relation.write_projection(&mut out)?;
            }
        }

        for join in &self.joins {
            out.push(' ');
            out.push_str(join.kind.keyword());
            out.push(' ');
            join.relation.write_projection(&mut out)?;
            match &join.condition {
                Some(JoinCondition::On(expr)) => {
                    out.push_str(" ON ");
                    expr.write_expr(&mut out)?;
                }
                Some(JoinCondition::Using(columns)) => {
                    out.push_str(" USING (");
                    for (i, column) in columns.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        crate::escape::write_identifier_part(&mut out, column)?;
                    }
                    out.push(')');
                }
                None => {}
            }
        }

        write_where(&mut out, &self.where_conds)?;

        if !self.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                expr.write_expr(&mut out)?;
            }
        }

        if !self.having_conds.is_empty() {
            out.push_str(" HAVING ");
            write_condition_list(&mut out, &self.having_conds)?;
        }

        write_order_by(&mut out, &self.order_items)?;
        write_offset_limit(&mut out, self.offset, self.limit);

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "pgqb", sql = %out, "compiled SELECT statement");

        Ok(out)
    }
}
