//! The query AST: node kinds, expression factories, and the expression
//! compiler.
//!
//! Every AST element is a [`Node`]. Expression nodes are built with the
//! factories in this module ([`col`], [`val`], [`op`], [`and`], [`or`],
//! [`func`], ...); statement nodes wrap the statement builders. Compilation
//! is a recursive walk that emits SQL text, deciding parenthesization from a
//! static operator precedence table.

use crate::error::QbResult;
use crate::escape::{write_identifier_part, write_string, write_value};
use crate::stmt::{Combined, Delete, Insert, Select, Update};
use crate::value::Value;

/// One segment of a column path.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPart {
    /// A named segment, double-quoted on emission.
    Name(String),
    /// The `*` wildcard, never quoted.
    Star,
}

/// An element of the query AST.
///
/// Nodes are immutable once built; compilation via [`Node::to_sql`] is
/// deterministic and side-effect-free.
#[derive(Debug, Clone)]
pub enum Node {
    /// Opaque SQL fragment, emitted verbatim.
    Raw(String),
    /// Column path; zero surviving segments compile to empty text.
    Column(Vec<ColumnPart>),
    /// Host value, escaped on emission.
    Value(Value),
    /// Value forced into ARRAY literal encoding.
    ArrayValue(Value),
    /// Value forced into JSON literal encoding.
    JsonValue(Value),
    /// Binary operator (or function-like construct such as `IN`).
    Operator {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// AND conjunction; children joined left-associatively.
    And(Vec<Node>),
    /// OR disjunction; children joined left-associatively.
    Or(Vec<Node>),
    /// Function call such as `MIN(...)`.
    Func { name: String, args: Vec<Node> },
    /// Adds `AS "name"` when emitted in a projection context.
    Aliased { inner: Box<Node>, alias: String },
    /// SELECT statement.
    Select(Box<Select>),
    /// INSERT statement.
    Insert(Box<Insert>),
    /// UPDATE statement.
    Update(Box<Update>),
    /// DELETE statement.
    Delete(Box<Delete>),
    /// Set-operation statement.
    Combined(Box<Combined>),
}

/// Binding strength of an operator; higher binds tighter.
///
/// Unlisted operators (`||`, `LIKE`, `IS`, ...) bind at comparison level.
pub(crate) fn precedence(op: &str) -> u8 {
    match op {
        "NOT" => 7,
        "*" | "/" | "%" => 6,
        "+" | "-" => 5,
        "=" | "<>" | "!=" | "<" | "<=" | ">" | ">=" => 4,
        "IN" | "NOT IN" => 3,
        "AND" => 2,
        "OR" => 1,
        _ => 4,
    }
}

pub(crate) const AND_PRECEDENCE: u8 = 2;

impl Node {
    /// Compile this node to SQL text.
    ///
    /// Statement nodes yield the complete statement; expression nodes yield
    /// the expression fragment (an alias at the root is kept).
    pub fn to_sql(&self) -> QbResult<String> {
        let mut out = String::new();
        match self {
            Node::Select(s) => out.push_str(&s.to_sql()?),
            Node::Insert(s) => out.push_str(&s.to_sql()?),
            Node::Update(s) => out.push_str(&s.to_sql()?),
            Node::Delete(s) => out.push_str(&s.to_sql()?),
            Node::Combined(c) => out.push_str(&c.to_sql()?),
            other => other.write_projection(&mut out)?,
        }
        Ok(out)
    }

    /// Wrap in an alias, emitted as `AS "name"` in projection contexts.
    pub fn alias(self, name: impl Into<String>) -> Node {
        Node::Aliased {
            inner: Box::new(self),
            alias: name.into(),
        }
    }

    // ==================== Comparison sugar ====================

    /// `self = value`
    pub fn eq(self, value: impl IntoNode) -> Node {
        op(self, "=", value)
    }

    /// `self <> value`
    pub fn ne(self, value: impl IntoNode) -> Node {
        op(self, "<>", value)
    }

    /// `self > value`
    pub fn gt(self, value: impl IntoNode) -> Node {
        op(self, ">", value)
    }

    /// `self >= value`
    pub fn gte(self, value: impl IntoNode) -> Node {
        op(self, ">=", value)
    }

    /// `self < value`
    pub fn lt(self, value: impl IntoNode) -> Node {
        op(self, "<", value)
    }

    /// `self <= value`
    pub fn lte(self, value: impl IntoNode) -> Node {
        op(self, "<=", value)
    }

    /// `self LIKE pattern`
    pub fn like(self, pattern: impl IntoNode) -> Node {
        op(self, "LIKE", pattern)
    }

    /// `self ILIKE pattern` (case-insensitive)
    pub fn ilike(self, pattern: impl IntoNode) -> Node {
        op(self, "ILIKE", pattern)
    }

    /// `self IS NULL`
    pub fn is_null(self) -> Node {
        op(self, "IS", Value::Null)
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(self) -> Node {
        op(self, "IS NOT", Value::Null)
    }

    /// `self IN (v1, v2, ...)` — a parenthesized tuple, not an ARRAY.
    pub fn in_list(self, values: impl Into<Value>) -> Node {
        Node::Operator {
            op: "IN".to_string(),
            left: Box::new(self),
            right: Box::new(Node::ArrayValue(values.into())),
        }
    }

    /// `self NOT IN (v1, v2, ...)`
    pub fn not_in(self, values: impl Into<Value>) -> Node {
        Node::Operator {
            op: "NOT IN".to_string(),
            left: Box::new(self),
            right: Box::new(Node::ArrayValue(values.into())),
        }
    }

    // ==================== Emission ====================

    /// Expression-position emission: aliases are dropped, statements emit
    /// bare (parenthesization is the caller's decision).
    pub(crate) fn write_expr(&self, out: &mut String) -> QbResult<()> {
        match self {
            Node::Raw(sql) => out.push_str(sql),
            Node::Column(parts) => write_column(out, parts)?,
            Node::Value(v) => write_value(out, v)?,
            Node::ArrayValue(v) => write_array_value(out, v)?,
            Node::JsonValue(v) => write_json_value(out, v)?,
            Node::Operator { op, left, right } => write_operator(out, op, left, right)?,
            Node::And(children) => write_group(out, "AND", 2, children)?,
            Node::Or(children) => write_group(out, "OR", 1, children)?,
            Node::Func { name, args } => {
                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.write_operand(out, 0)?;
                }
                out.push(')');
            }
            Node::Aliased { inner, .. } => inner.write_expr(out)?,
            Node::Select(s) => out.push_str(&s.to_sql()?),
            Node::Insert(s) => out.push_str(&s.to_sql()?),
            Node::Update(s) => out.push_str(&s.to_sql()?),
            Node::Delete(s) => out.push_str(&s.to_sql()?),
            Node::Combined(c) => out.push_str(&c.to_sql()?),
        }
        Ok(())
    }

    /// Operand-position emission under an operator of precedence
    /// `parent_prec`: operators and groups of lower-or-equal precedence get
    /// parentheses, statements always do.
    pub(crate) fn write_operand(&self, out: &mut String, parent_prec: u8) -> QbResult<()> {
        let parens = match self {
            Node::Operator { op, .. } => precedence(op) <= parent_prec,
            Node::And(_) => 2 <= parent_prec,
            Node::Or(_) => 1 <= parent_prec,
            Node::Select(_)
            | Node::Insert(_)
            | Node::Update(_)
            | Node::Delete(_)
            | Node::Combined(_) => true,
            _ => false,
        };
        if parens {
            out.push('(');
            self.write_expr(out)?;
            out.push(')');
        } else {
            self.write_expr(out)?;
        }
        Ok(())
    }

    /// Projection-position emission (field lists, RETURNING, FROM):
    /// aliases are kept, statements are parenthesized.
    pub(crate) fn write_projection(&self, out: &mut String) -> QbResult<()> {
        match self {
            Node::Aliased { inner, alias } => {
                match &**inner {
                    stmt @ (Node::Select(_)
                    | Node::Insert(_)
                    | Node::Update(_)
                    | Node::Delete(_)
                    | Node::Combined(_)) => {
                        out.push('(');
                        stmt.write_expr(out)?;
                        out.push(')');
                    }
                    other => other.write_expr(out)?,
                }
                out.push_str(" AS ");
                write_identifier_part(out, alias)?;
            }
            stmt @ (Node::Select(_)
            | Node::Insert(_)
            | Node::Update(_)
            | Node::Delete(_)
            | Node::Combined(_)) => {
                out.push('(');
                stmt.write_expr(out)?;
                out.push(')');
            }
            other => other.write_expr(out)?,
        }
        Ok(())
    }
}

fn write_column(out: &mut String, parts: &[ColumnPart]) -> QbResult<()> {
    let mut first = true;
    for part in parts {
        match part {
            ColumnPart::Star => {
                if !first {
                    out.push('.');
                }
                out.push('*');
                first = false;
            }
            ColumnPart::Name(name) => {
                if name.is_empty() {
                    continue;
                }
                if !first {
                    out.push('.');
                }
                write_identifier_part(out, name)?;
                first = false;
            }
        }
    }
    Ok(())
}

fn write_operator(out: &mut String, op: &str, left: &Node, right: &Node) -> QbResult<()> {
    let prec = precedence(op);
    left.write_operand(out, prec)?;
    out.push(' ');
    out.push_str(op);
    if op == "IN" || op == "NOT IN" {
        out.push_str(" (");
        write_in_list(out, right)?;
        out.push(')');
    } else {
        out.push(' ');
        right.write_operand(out, prec)?;
    }
    Ok(())
}

/// Right side of IN/NOT IN, flattened to a comma-separated tuple. Subquery
/// operands emit their statement text (the caller supplies the parens).
fn write_in_list(out: &mut String, right: &Node) -> QbResult<()> {
    match right {
        Node::ArrayValue(Value::Array(items)) | Node::Value(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item)?;
            }
            Ok(())
        }
        Node::ArrayValue(single) | Node::Value(single) => write_value(out, single),
        other => other.write_expr(out),
    }
}

/// AND/OR children joined by the keyword. Nested groups always
/// parenthesize; other operands follow precedence.
fn write_group(out: &mut String, keyword: &str, prec: u8, children: &[Node]) -> QbResult<()> {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push(' ');
            out.push_str(keyword);
            out.push(' ');
        }
        match child {
            Node::And(_) | Node::Or(_) => {
                out.push('(');
                child.write_expr(out)?;
                out.push(')');
            }
            other => other.write_operand(out, prec)?,
        }
    }
    Ok(())
}

fn write_array_value(out: &mut String, value: &Value) -> QbResult<()> {
    match value {
        Value::Array(_) => write_value(out, value),
        single => {
            out.push_str("ARRAY[");
            write_value(out, single)?;
            out.push(']');
            Ok(())
        }
    }
}

fn write_json_value(out: &mut String, value: &Value) -> QbResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| crate::error::QbError::unsupported_value(e.to_string()))?;
    write_string(out, &json)
}

// ==================== Factories ====================

/// An opaque SQL fragment, emitted verbatim.
pub fn raw(sql: impl Into<String>) -> Node {
    Node::Raw(sql.into())
}

/// A column reference. The path splits on `.`; `*` segments are wildcards;
/// empty segments are dropped.
///
/// # Example
/// ```
/// use pgqb::col;
///
/// assert_eq!(col("t.a").to_sql().unwrap(), r#""t"."a""#);
/// assert_eq!(col("t.*").to_sql().unwrap(), r#""t".*"#);
/// ```
pub fn col(path: &str) -> Node {
    let parts = path
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment == "*" {
                ColumnPart::Star
            } else {
                ColumnPart::Name(segment.to_string())
            }
        })
        .collect();
    Node::Column(parts)
}

/// A literal value, escaped on emission.
pub fn val(value: impl Into<Value>) -> Node {
    Node::Value(value.into())
}

/// A value forced into ARRAY literal encoding.
pub fn array_val(value: impl Into<Value>) -> Node {
    Node::ArrayValue(value.into())
}

/// A value forced into JSON literal encoding.
pub fn json_val(value: impl Into<Value>) -> Node {
    Node::JsonValue(value.into())
}

/// A binary operator expression.
///
/// Bare strings in operand position are string literals; write columns as
/// [`col`] nodes.
///
/// # Example
/// ```
/// use pgqb::{col, op};
///
/// let expr = op(col("a"), "/", op(col("b"), "+", 1));
/// assert_eq!(expr.to_sql().unwrap(), r#""a" / ("b" + 1)"#);
/// ```
pub fn op(left: impl IntoNode, operator: impl Into<String>, right: impl IntoNode) -> Node {
    Node::Operator {
        op: operator.into(),
        left: Box::new(left.into_node()),
        right: Box::new(right.into_node()),
    }
}

/// AND conjunction of expressions: `a AND b AND c`.
pub fn and(children: Vec<Node>) -> Node {
    Node::And(children)
}

/// OR disjunction of expressions: `a OR b OR c`.
pub fn or(children: Vec<Node>) -> Node {
    Node::Or(children)
}

/// A function call: `func("COALESCE", vec![...])` → `COALESCE(...)`.
pub fn func(name: impl Into<String>, args: Vec<Node>) -> Node {
    Node::Func {
        name: name.into(),
        args,
    }
}

/// `MIN(arg)`
pub fn min(arg: impl IntoNode) -> Node {
    func("MIN", vec![arg.into_node()])
}

/// `MAX(arg)`
pub fn max(arg: impl IntoNode) -> Node {
    func("MAX", vec![arg.into_node()])
}

/// `COUNT(arg)` — use `count(col("*"))` for `COUNT(*)`.
pub fn count(arg: impl IntoNode) -> Node {
    func("COUNT", vec![arg.into_node()])
}

/// `SUM(arg)`
pub fn sum(arg: impl IntoNode) -> Node {
    func("SUM", vec![arg.into_node()])
}

/// `AVG(arg)`
pub fn avg(arg: impl IntoNode) -> Node {
    func("AVG", vec![arg.into_node()])
}

// ==================== IntoNode ====================

/// Conversion into an expression [`Node`].
///
/// `Node`s pass through; everything `Value`-convertible becomes a literal
/// Value node (bare strings included — columns are written with [`col`]).
pub trait IntoNode {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Node {
        self
    }
}

impl IntoNode for Value {
    fn into_node(self) -> Node {
        Node::Value(self)
    }
}

macro_rules! into_node_via_value {
    ($($ty:ty),*) => {
        $(
            impl IntoNode for $ty {
                fn into_node(self) -> Node {
                    Node::Value(self.into())
                }
            }
        )*
    };
}

into_node_via_value!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String);

impl<T: Into<Value>> IntoNode for Vec<T> {
    fn into_node(self) -> Node {
        Node::Value(self.into())
    }
}

impl<T: Into<Value>, const N: usize> IntoNode for [T; N] {
    fn into_node(self) -> Node {
        Node::Value(self.into())
    }
}

impl IntoNode for Select {
    fn into_node(self) -> Node {
        Node::Select(Box::new(self))
    }
}

impl IntoNode for Insert {
    fn into_node(self) -> Node {
        Node::Insert(Box::new(self))
    }
}

impl IntoNode for Update {
    fn into_node(self) -> Node {
        Node::Update(Box::new(self))
    }
}

impl IntoNode for Delete {
    fn into_node(self) -> Node {
        Node::Delete(Box::new(self))
    }
}

impl IntoNode for Combined {
    fn into_node(self) -> Node {
        Node::Combined(Box::new(self))
    }
}

impl From<Select> for Node {
    fn from(s: Select) -> Node {
        s.into_node()
    }
}

impl From<Combined> for Node {
    fn from(c: Combined) -> Node {
        c.into_node()
    }
}
