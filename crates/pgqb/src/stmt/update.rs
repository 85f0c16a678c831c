//! UPDATE statement builder.

use crate::condition::IntoCondition;
use crate::error::{QbError, QbResult};
use crate::node::{col, IntoNode, Node};
use crate::stmt::{write_returning, write_where, IntoFields, IntoRow};

/// Create an UPDATE statement for the given table.
///
/// # Example
/// ```
/// use pgqb::{col, op, update};
///
/// let sql = update("x")
///     .set("a", op(col("a"), "/", op(col("b"), "+", 1)))
///     .to_sql()
///     .unwrap();
/// assert_eq!(sql, r#"UPDATE "x" SET "a" = "a" / ("b" + 1)"#);
/// ```
pub fn update(table: &str) -> Update {
    Update::new(table)
}

/// UPDATE statement builder.
#[derive(Debug, Clone)]
pub struct Update {
    table: Node,
    sets: Vec<(String, Node)>,
    where_conds: Vec<Node>,
    returning: Vec<Node>,
}

impl Update {
    /// Create a new UPDATE for a table (dotted paths supported).
    pub fn new(table: &str) -> Self {
        Self {
            table: col(table),
            sets: Vec::new(),
            where_conds: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Append one assignment. The value may be a literal or an expression
    /// node (embedded as-is).
    pub fn set(mut self, column: impl Into<String>, value: impl IntoNode) -> Self {
        self.sets.push((column.into(), value.into_node()));
        self
    }

    /// Append assignments from ordered `(column, value)` pairs.
    pub fn values(mut self, row: impl IntoRow) -> Self {
        self.sets.extend(row.into_row());
        self
    }

    /// Add a WHERE condition; repeated calls AND together.
    pub fn filter(mut self, condition: impl IntoCondition) -> Self {
        self.where_conds.push(condition.into_condition());
        self
    }

    /// Append RETURNING fields.
    pub fn returning(mut self, fields: impl IntoFields) -> Self {
        self.returning.extend(fields.into_fields());
        self
    }

    /// Wrap this statement as an aliased subexpression node.
    pub fn alias(self, name: impl Into<String>) -> Node {
        self.into_node().alias(name)
    }

    /// Compile to SQL text.
    pub fn to_sql(&self) -> QbResult<String> {
        if self.sets.is_empty() {
            return Err(QbError::query_shape(
                "UPDATE requires at least one assignment",
            ));
        }

        let mut out = String::from("UPDATE ");
        self.table.write_expr(&mut out)?;
        out.push_str(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            crate::escape::write_identifier_part(&mut out, column)?;
            out.push_str(" = ");
            value.write_operand(&mut out, 0)?;
        }

        write_where(&mut out, &self.where_conds)?;
        write_returning(&mut out, &self.returning)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "pgqb", sql = %out, "compiled UPDATE statement");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::op;

    #[test]
    fn update_literal_values() {
        let sql = update("x")
            .set("a", 1)
            .set("b", "text")
            .to_sql()
            .unwrap();
        assert_eq!(sql, r#"UPDATE "x" SET "a" = 1, "b" = 'text'"#);
    }

    #[test]
    fn update_expression_value() {
        let sql = update("x")
            .set("a", op(col("a"), "/", op(col("b"), "+", 1)))
            .to_sql()
            .unwrap();
        assert_eq!(sql, r#"UPDATE "x" SET "a" = "a" / ("b" + 1)"#);
    }

    #[test]
    fn update_values_row() {
        let sql = update("x")
            .values((("a", 1), ("b", false)))
            .to_sql()
            .unwrap();
        assert_eq!(sql, r#"UPDATE "x" SET "a" = 1, "b" = FALSE"#);
    }

    #[test]
    fn update_with_where_and_returning() {
        let sql = update("x")
            .set("status", "done")
            .filter(("id", 7))
            .returning("status")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            r#"UPDATE "x" SET "status" = 'done' WHERE "id" = 7 RETURNING "status""#
        );
    }

    #[test]
    fn update_without_assignments_is_query_shape() {
        assert!(update("x").to_sql().unwrap_err().is_query_shape());
    }
}
