//! The line based interaction script replayed by the binary.
//!
//! ```text
//! # open the list and search
//! open
//! type ger
//! wait 350
//! show
//! scroll-end
//! toggle de
//! ```

use std::time::Duration;

use lazy_combo::ScrollMetrics;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Open,
  Close,
  Click,
  Focus,
  Blur,
  /// The search input now reads this text
  Type(String),
  Wait(Duration),
  Scroll(ScrollMetrics),
  /// Scroll to the bottom of whatever is loaded
  ScrollEnd,
  Toggle(String),
  Clear,
  Show,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
  #[error("unknown command `{0}`")]
  UnknownCommand(String),

  #[error("`{command}` expects {expected}")]
  MissingArgument {
    command:  &'static str,
    expected: &'static str,
  },

  #[error("`{command}` takes no arguments")]
  UnexpectedArgument { command: &'static str },

  #[error("`{0}` is not a valid number")]
  InvalidNumber(String),
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
  let line = line.trim();
  if line.is_empty() || line.starts_with('#') {
    return Ok(None);
  }

  let (name, rest) = match line.split_once(char::is_whitespace) {
    Some((name, rest)) => (name, rest.trim()),
    None => (line, ""),
  };

  let command = match name {
    "open" => no_args("open", rest, Command::Open)?,
    "close" => no_args("close", rest, Command::Close)?,
    "click" => no_args("click", rest, Command::Click)?,
    "focus" => no_args("focus", rest, Command::Focus)?,
    "blur" => no_args("blur", rest, Command::Blur)?,
    "clear" => no_args("clear", rest, Command::Clear)?,
    "show" => no_args("show", rest, Command::Show)?,
    "scroll-end" => no_args("scroll-end", rest, Command::ScrollEnd)?,
    // an empty `type` clears the search input
    "type" => Command::Type(rest.to_string()),
    "toggle" => {
      if rest.is_empty() {
        return Err(ScriptError::MissingArgument {
          command:  "toggle",
          expected: "an option value",
        });
      }
      Command::Toggle(rest.to_string())
    },
    "wait" => {
      let ms = rest.parse::<u64>().map_err(|_| {
        if rest.is_empty() {
          ScriptError::MissingArgument {
            command:  "wait",
            expected: "a duration in milliseconds",
          }
        } else {
          ScriptError::InvalidNumber(rest.to_string())
        }
      })?;
      Command::Wait(Duration::from_millis(ms))
    },
    "scroll" => {
      let numbers = rest
        .split_whitespace()
        .map(|n| n.parse::<f64>().map_err(|_| ScriptError::InvalidNumber(n.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
      let &[top, height, client] = numbers.as_slice() else {
        return Err(ScriptError::MissingArgument {
          command:  "scroll",
          expected: "<top> <height> <client>",
        });
      };
      Command::Scroll(ScrollMetrics::new(top, height, client))
    },
    other => return Err(ScriptError::UnknownCommand(other.to_string())),
  };
  Ok(Some(command))
}

fn no_args(command: &'static str, rest: &str, parsed: Command) -> Result<Command, ScriptError> {
  if rest.is_empty() {
    Ok(parsed)
  } else {
    Err(ScriptError::UnexpectedArgument { command })
  }
}
