//! Parameter mapping between raw task inputs and command fragments.
//!
//! Parsing functions turn raw host values into typed option values and fail
//! with [`InputError`] on missing or malformed required inputs. Emitting
//! functions turn typed values into command tokens and never fail; an absent
//! or disabled option yields no token at all.

use super::{CommandArg, InputError};

/// Returns the trimmed value when it is present and non-empty.
#[must_use]
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Returns whether a raw boolean input is truthy.
///
/// Only `true` (case-insensitive, surrounding whitespace ignored) is truthy.
#[must_use]
pub fn parse_bool(raw: Option<&str>) -> bool {
    present(raw).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Returns a required string input.
///
/// # Errors
///
/// Returns [`InputError::MissingInput`] naming the input when it is absent or
/// empty.
pub fn parse_required(name: &str, raw: Option<&str>) -> Result<String, InputError> {
    present(raw)
        .map(str::to_owned)
        .ok_or_else(|| InputError::MissingInput(name.to_owned()))
}

/// Returns an optional string input.
#[must_use]
pub fn parse_optional(raw: Option<&str>) -> Option<String> {
    present(raw).map(str::to_owned)
}

/// Parses an optional integer input.
///
/// # Errors
///
/// Returns [`InputError::InvalidInteger`] when the input is present but is
/// not a base-10 integer.
pub fn parse_integer(name: &str, raw: Option<&str>) -> Result<Option<i64>, InputError> {
    present(raw)
        .map(|value| {
            value.parse::<i64>().map_err(|_| InputError::InvalidInteger {
                name: name.to_owned(),
                value: value.to_owned(),
            })
        })
        .transpose()
}

/// Emits `--flag` when `enabled` is true.
#[must_use]
pub fn switch_if(enabled: bool, flag: &str) -> Option<CommandArg> {
    enabled.then(|| CommandArg::switch(flag))
}

/// Emits `--flag=<value>` when a value is present.
#[must_use]
pub fn value_if(value: Option<&str>, flag: &str) -> Option<CommandArg> {
    value.map(|present_value| CommandArg::value(flag, present_value))
}

/// Emits `--flag=<value>` for an integer value.
#[must_use]
pub fn integer_value(value: i64, flag: &str) -> CommandArg {
    CommandArg::value(flag, value.to_string())
}

/// Escapes `/` as `\/` so a value can be joined into a slash-separated
/// composite without ambiguity.
#[must_use]
pub fn escape_separator(value: &str) -> String {
    value.replace('/', "\\/")
}
