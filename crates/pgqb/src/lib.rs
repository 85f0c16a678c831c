//! # pgqb
//!
//! A programmatic PostgreSQL SQL statement builder.
//!
//! Queries are built by combining node-returning factory calls into a typed
//! expression tree, then compiling the tree to a single injection-safe SQL
//! string that follows PostgreSQL lexical rules (double-quoted identifiers,
//! `E'...'` escape strings, `ARRAY[...]` literals, JSON literals, operator
//! precedence via parenthesization).
//!
//! ## Features
//!
//! - **Statement builders**: fluent `select` / `insert` / `update` /
//!   `delete` and set operations (`union`, `intersect`, `except`, `ALL`
//!   variants)
//! - **Expression tree**: columns, literal values, operators with a
//!   precedence table, AND/OR groups, function calls, aliases
//! - **Lexical layer**: [`escape_identifier`] and [`escape_value`] for
//!   direct use
//! - **Placeholder substitution**: [`substitute`] expands `?` / `$N`
//!   templates while skipping string and identifier literals
//!
//! ## Example
//!
//! ```
//! use pgqb::select;
//!
//! let sql = select(["a", "b", "c"])
//!     .from("x")
//!     .filter(("a", "IN", vec![42, 23]))
//!     .to_sql()
//!     .unwrap();
//! assert_eq!(sql, r#"SELECT "a", "b", "c" FROM "x" WHERE "a" IN (42, 23)"#);
//! ```
//!
//! Compilation is purely computational: no I/O, no connection handling, and
//! `to_sql` is referentially transparent. Executing the generated SQL is the
//! caller's concern.

mod condition;
mod error;
mod escape;
mod node;
pub mod prelude;
mod stmt;
mod substitute;
mod value;

pub use condition::IntoCondition;
pub use error::{QbError, QbResult};
pub use escape::{escape_identifier, escape_value};
pub use node::{
    and, array_val, avg, col, count, func, json_val, max, min, op, or, raw, sum, val, ColumnPart,
    IntoNode, Node,
};
pub use stmt::{
    delete, except, except_all, insert, intersect, intersect_all, select, union, union_all,
    update, Combined, Delete, Insert, IntoField, IntoFields, IntoJoinCondition, IntoRow,
    JoinCondition, NullsOrder, Select, SetMember, SetOp, SortDir, Update,
};
pub use substitute::substitute;
pub use value::Value;
