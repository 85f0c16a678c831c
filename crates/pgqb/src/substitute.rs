//! Placeholder substitution over SQL template strings.
//!
//! [`substitute`] expands `?` and `$N` placeholders with escaped values while
//! walking the template with a small lexical state machine, so placeholders
//! inside string literals, E-strings, and quoted identifiers stay inert.

use crate::error::{QbError, QbResult};
use crate::escape::write_value;
use crate::value::Value;

/// Expand `?` and `$N` placeholders in `template` with escaped `values`.
///
/// - `?` consumes the next value in order of appearance (0-based counter).
/// - `$N` (N ≥ 1) splices `values[N-1]`; `$` not followed by a digit copies
///   verbatim.
/// - The two forms may be mixed; the `?` counter and `$N` indexes are
///   independent.
///
/// Contents of `'...'` literals (with `''` doubling), `E'...'` escape
/// strings (with `\` escapes, terminated by a single `'`), and `"..."`
/// identifiers (with `""` doubling) are copied untouched.
///
/// Errors: [`QbError::MissingBind`] when a placeholder refers past the end
/// of `values` (including `$0`); [`QbError::LexError`] on an unterminated
/// literal.
///
/// # Example
/// ```
/// use pgqb::substitute;
///
/// let sql = substitute("a = ?, b = '?''?', c = ?", &[1.into(), 2.into()]).unwrap();
/// assert_eq!(sql, "a = 1, b = '?''?', c = 2");
/// ```
pub fn substitute(template: &str, values: &[Value]) -> QbResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_positional = 0usize;

    while let Some(ch) = chars.next() {
        match ch {
            '?' => {
                let value = values.get(next_positional).ok_or_else(|| {
                    QbError::missing_bind(format!(
                        "placeholder needs value {} but only {} supplied",
                        next_positional + 1,
                        values.len()
                    ))
                })?;
                write_value(&mut out, value)?;
                next_positional += 1;
            }
            '$' => {
                if !chars.peek().is_some_and(char::is_ascii_digit) {
                    out.push('$');
                    continue;
                }
                let mut index = 0usize;
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    index = index * 10 + digit as usize;
                    chars.next();
                }
                if index == 0 {
                    return Err(QbError::missing_bind(
                        "placeholder $0 is out of range (indexes start at $1)",
                    ));
                }
                let value = values.get(index - 1).ok_or_else(|| {
                    QbError::missing_bind(format!(
                        "placeholder ${index} but only {} values supplied",
                        values.len()
                    ))
                })?;
                write_value(&mut out, value)?;
            }
            'E' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push_str("E'");
                copy_escape_string(&mut out, &mut chars)?;
            }
            '\'' => {
                out.push('\'');
                copy_quoted(&mut out, &mut chars, '\'', "unterminated string literal")?;
            }
            '"' => {
                out.push('"');
                copy_quoted(&mut out, &mut chars, '"', "unterminated quoted identifier")?;
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Copy the body of an E-string. `\` consumes the next character; a single
/// `'` terminates (doubled quotes do not continue the literal here).
fn copy_escape_string(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> QbResult<()> {
    loop {
        match chars.next() {
            Some('\\') => {
                out.push('\\');
                match chars.next() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(QbError::lex("unterminated escape string literal")),
                }
            }
            Some('\'') => {
                out.push('\'');
                return Ok(());
            }
            Some(c) => out.push(c),
            None => return Err(QbError::lex("unterminated escape string literal")),
        }
    }
}

/// Copy the body of a quoted region where a doubled quote char stays inside
/// the literal.
fn copy_quoted(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
    unterminated: &str,
) -> QbResult<()> {
    loop {
        match chars.next() {
            Some(c) if c == quote => {
                if chars.peek() == Some(&quote) {
                    chars.next();
                    out.push(quote);
                    out.push(quote);
                } else {
                    out.push(quote);
                    return Ok(());
                }
            }
            Some(c) => out.push(c),
            None => return Err(QbError::lex(unterminated)),
        }
    }
}
