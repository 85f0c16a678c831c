//! Convenient imports for typical `pgqb` usage.
//!
//! This module is intentionally small and focused on the most common APIs so
//! callers can start with:
//!
//! ```
//! use pgqb::prelude::*;
//!
//! let sql = select(()).from("x").to_sql().unwrap();
//! assert_eq!(sql, r#"SELECT * FROM "x""#);
//! ```

pub use crate::{delete, insert, select, update};
pub use crate::{except, except_all, intersect, intersect_all, union, union_all};
pub use crate::{and, array_val, col, json_val, max, min, op, or, raw, val};
pub use crate::{escape_identifier, escape_value, substitute};
pub use crate::{Node, NullsOrder, QbError, QbResult, SortDir, Value};
