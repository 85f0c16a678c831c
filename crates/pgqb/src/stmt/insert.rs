//! INSERT statement builder.

use crate::error::{QbError, QbResult};
use crate::node::{col, Node};
use crate::stmt::{write_field_list, write_returning, IntoFields, IntoRow};

/// Create an INSERT statement for the given table.
///
/// # Example
/// ```
/// use pgqb::insert;
///
/// let sql = insert("x")
///     .values((("a", 0), ("b", false), ("c", "String")))
///     .to_sql()
///     .unwrap();
/// assert_eq!(sql, r#"INSERT INTO "x" ("a", "b", "c") VALUES (0, FALSE, 'String')"#);
/// ```
pub fn insert(table: &str) -> Insert {
    Insert::new(table)
}

/// INSERT statement builder.
#[derive(Debug, Clone)]
pub struct Insert {
    table: Node,
    rows: Vec<Vec<(String, Node)>>,
    returning: Vec<Node>,
}

impl Insert {
    /// Create a new INSERT for a table (dotted paths supported).
    pub fn new(table: &str) -> Self {
        Self {
            table: col(table),
            rows: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Append one row of ordered `(column, value)` pairs.
    ///
    /// The first row's keys supply the column list; every further row must
    /// list the same columns in the same order.
    pub fn values(mut self, row: impl IntoRow) -> Self {
        self.rows.push(row.into_row());
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
        let Some(first) = self.rows.first() else {
            return Err(QbError::query_shape("INSERT requires at least one row"));
        };

        for (i, row) in self.rows.iter().enumerate().skip(1) {
            let same = row.len() == first.len()
                && row.iter().zip(first).all(|((a, _), (b, _))| a == b);
            if !same {
                return Err(QbError::query_shape(format!(
                    "INSERT row {} does not match the column list of the first row",
                    i + 1
                )));
            }
        }

        let mut out = String::from("INSERT INTO ");
        self.table.write_expr(&mut out)?;

        out.push_str(" (");
        let columns: Vec<Node> = first.iter().map(|(c, _)| col(c)).collect();
        write_field_list(&mut out, &columns)?;
        out.push(')');

        out.push_str(" VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('(');
            for (j, (_, value)) in row.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                value.write_operand(&mut out, 0)?;
            }
            out.push(')');
        }

        write_returning(&mut out, &self.returning)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "pgqb", sql = %out, "compiled INSERT statement");

        Ok(out)
    }
}
