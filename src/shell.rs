//! Shell quoting for rendering CLI commands in logs.
//!
//! Commands are executed as argv vectors and never pass through a shell. The
//! rendered form exists so that operators can copy a logged command and
//! reproduce it; every value is quoted so that it stays one word.

/// Escapes a value for safe inclusion in a POSIX shell command.
///
/// Uses single-quote wrapping and the standard `'\''` sequence for embedded
/// quotes.
#[must_use]
pub fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}

/// Quotes a value only when it would otherwise be split or expanded.
///
/// Plain values made of alphanumerics and `-_./:=@,+` are returned as-is so
/// that rendered commands stay readable.
#[must_use]
pub fn quote_if_needed(value: &str) -> String {
    let is_plain = !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "-_./:=@,+".contains(ch));
    if is_plain {
        value.to_owned()
    } else {
        shell_escape(value)
    }
}
