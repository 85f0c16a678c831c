//! DELETE statement builder.

use crate::condition::IntoCondition;
use crate::error::QbResult;
use crate::node::{col, Node};
use crate::stmt::{write_returning, write_where, IntoFields};

/// Create a DELETE statement for the given table.
///
/// # Example
/// ```
/// use pgqb::delete;
///
/// let sql = delete("x").filter(("id", 7)).to_sql().unwrap();
/// assert_eq!(sql, r#"DELETE FROM "x" WHERE "id" = 7"#);
/// ```
pub fn delete(table: &str) -> Delete {
    Delete::new(table)
}

/// DELETE statement builder.
#[derive(Debug, Clone)]
pub struct Delete {
    table: Node,
    where_conds: Vec<Node>,
    returning: Vec<Node>,
}

impl Delete {
    /// Create a new DELETE for a table (dotted paths supported).
    pub fn new(table: &str) -> Self {
        Self {
            table: col(table),
            where_conds: Vec::new(),
            returning: Vec::new(),
        }
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
        use crate::node::IntoNode;
        self.into_node().alias(name)
    }

    /// Compile to SQL text.
    pub fn to_sql(&self) -> QbResult<String> {
        let mut out = String::from("DELETE FROM ");
        self.table.write_expr(&mut out)?;
        write_where(&mut out, &self.where_conds)?;
        write_returning(&mut out, &self.returning)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "pgqb", sql = %out, "compiled DELETE statement");

        Ok(out)
    }
}
