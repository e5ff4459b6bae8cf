//! Structured command representation for JFrog CLI invocations.

use crate::shell::quote_if_needed;
use std::fmt;

/// One token of a CLI command.
///
/// Tokens stay structured until they reach the process boundary so that
/// command shape can be inspected without rendering or executing anything.
#[derive(Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// A sub-command keyword such as `rt` or `dl`.
    Keyword(String),
    /// A positional argument such as a source pattern or property list.
    Positional(String),
    /// A bare flag rendered as `--name`.
    Switch(String),
    /// A valued flag rendered as `--name=value`.
    Value {
        /// Flag name without leading dashes.
        name: String,
        /// Raw, unquoted flag value.
        value: String,
    },
}

impl CommandArg {
    /// Creates a keyword token.
    #[must_use]
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(value.into())
    }

    /// Creates a positional token.
    #[must_use]
    pub fn positional(value: impl Into<String>) -> Self {
        Self::Positional(value.into())
    }

    /// Creates a bare flag token.
    #[must_use]
    pub fn switch(name: impl Into<String>) -> Self {
        Self::Switch(name.into())
    }

    /// Creates a valued flag token.
    #[must_use]
    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Value {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the flag name for switch and valued tokens.
    #[must_use]
    pub fn flag_name(&self) -> Option<&str> {
        match self {
            Self::Switch(name) | Self::Value { name, .. } => Some(name.as_str()),
            Self::Keyword(_) | Self::Positional(_) => None,
        }
    }

    /// Returns the argv form of this token.
    #[must_use]
    pub fn to_arg(&self) -> String {
        match self {
            Self::Keyword(value) | Self::Positional(value) => value.clone(),
            Self::Switch(name) => format!("--{name}"),
            Self::Value { name, value } => format!("--{name}={value}"),
        }
    }

    /// Returns the display form of this token with values quoted.
    #[must_use]
    pub fn to_display(&self) -> String {
        match self {
            Self::Keyword(value) => value.clone(),
            Self::Positional(value) => quote_if_needed(value),
            Self::Switch(name) => format!("--{name}"),
            Self::Value { name, value } => format!("--{name}={}", quote_if_needed(value)),
        }
    }
}

impl fmt::Debug for CommandArg {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.to_display())
    }
}

/// Ordered command tokens for one CLI invocation.
///
/// The base program path is held separately from its arguments. Token order
/// is exactly the order in which fragments were pushed.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<CommandArg>,
}

impl CommandSpec {
    /// Starts a command for the given CLI program path.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one token.
    #[must_use]
    pub fn arg(mut self, arg: CommandArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Appends a token when present.
    #[must_use]
    pub fn arg_opt(mut self, arg: Option<CommandArg>) -> Self {
        self.args.extend(arg);
        self
    }

    /// Appends a sequence of tokens in order.
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = CommandArg>) -> Self {
        self.args.extend(args);
        self
    }

    /// Appends whitespace-separated keywords such as `rt dl`.
    #[must_use]
    pub fn keywords(mut self, keywords: &str) -> Self {
        self.args
            .extend(keywords.split_whitespace().map(CommandArg::keyword));
        self
    }

    /// Returns the program path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the argv vector, excluding the program.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.args.iter().map(CommandArg::to_arg).collect()
    }

    /// Returns the keyword tokens joined with spaces, e.g. `rt dl`.
    #[must_use]
    pub fn sub_command(&self) -> String {
        self.args
            .iter()
            .filter_map(|arg| match arg {
                CommandArg::Keyword(value) => Some(value.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns positional argument values in order.
    #[must_use]
    pub fn positionals(&self) -> Vec<&str> {
        self.args
            .iter()
            .filter_map(|arg| match arg {
                CommandArg::Positional(value) => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns flag names in order.
    #[must_use]
    pub fn flag_names(&self) -> Vec<&str> {
        self.args.iter().filter_map(CommandArg::flag_name).collect()
    }

    /// Returns whether a flag with the given name is present.
    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.args.iter().any(|arg| arg.flag_name() == Some(name))
    }

    /// Returns the raw value of the first valued flag with the given name.
    #[must_use]
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            CommandArg::Value { name: flag, value } if flag == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Renders the command for logs with every value quoted.
    #[must_use]
    pub fn to_display(&self) -> String {
        std::iter::once(quote_if_needed(&self.program))
            .chain(self.args.iter().map(CommandArg::to_display))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.to_display())
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandSpec")
            .field("command", &self.to_display())
            .finish()
    }
}
