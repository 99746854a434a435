//! User gestures as typed commands.

use std::str::FromStr;

/// One of the six operations a user can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Push the raw contents of the input field; parsing happens on dispatch
    Push(String),
    Pop,
    Peek,
    Size,
    IsEmpty,
    Clear,
}

impl Command {
    /// Short verb used in logs and events.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Push(_) => "push",
            Self::Pop => "pop",
            Self::Peek => "peek",
            Self::Size => "size",
            Self::IsEmpty => "is_empty",
            Self::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("No command given")]
    Blank,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("`{verb}` takes no argument (got `{argument}`)")]
    UnexpectedArgument { verb: String, argument: String },
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse a line such as `push 12.5`, `pop` or `is-empty`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        if verb.is_empty() {
            return Err(CommandParseError::Blank);
        }

        let lower = verb.to_ascii_lowercase();
        if lower == "push" {
            return Ok(Self::Push(rest.to_string()));
        }

        let command = match lower.as_str() {
            "pop" => Self::Pop,
            "peek" | "top" => Self::Peek,
            "size" => Self::Size,
            "empty" | "is-empty" | "isempty" | "is_empty" => Self::IsEmpty,
            "clear" | "reset" => Self::Clear,
            _ => return Err(CommandParseError::Unknown(verb.to_string())),
        };

        if !rest.is_empty() {
            return Err(CommandParseError::UnexpectedArgument {
                verb: lower,
                argument: rest.to_string(),
            });
        }

        Ok(command)
    }
}
