//! Error types for check-alpha-spec with contextual messages and exit codes
//!
//! Lint warnings are not errors: they are accumulated by the linter and only
//! influence the final exit code. The types here cover everything that aborts
//! a run instead, chiefly unreadable files and YAML that fails to parse.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for check-alpha-spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid args, input that is not valid YAML)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (at least one lint warning was emitted)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for check-alpha-spec
#[derive(Debug)]
pub enum AlphaError {
  /// An input file is not valid YAML; the whole check for that file aborts
  Yaml { path: PathBuf, message: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl AlphaError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    AlphaError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    AlphaError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      AlphaError::Message { message, context, help } => AlphaError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      AlphaError::Yaml { .. } => ExitCode::User,
      AlphaError::Io(_) => ExitCode::System,
      AlphaError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      AlphaError::Yaml { .. } => {
        Some("The file must be valid YAML before the alpha spec can be checked.".to_string())
      }
      AlphaError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for AlphaError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AlphaError::Yaml { path, message } => {
        write!(f, "{}: YAML parse error: {}", path.display(), message)
      }
      AlphaError::Io(e) => write!(f, "I/O error: {}", e),
      AlphaError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for AlphaError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      AlphaError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for AlphaError {
  fn from(err: io::Error) -> Self {
    AlphaError::Io(err)
  }
}

impl From<String> for AlphaError {
  fn from(msg: String) -> Self {
    AlphaError::message(msg)
  }
}

impl From<&str> for AlphaError {
  fn from(msg: &str) -> Self {
    AlphaError::message(msg)
  }
}

impl From<serde_json::Error> for AlphaError {
  fn from(err: serde_json::Error) -> Self {
    AlphaError::message(format!("JSON error: {}", err))
  }
}

/// Result type alias for check-alpha-spec
pub type AlphaResult<T> = Result<T, AlphaError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> AlphaResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> AlphaResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<AlphaError>,
{
  fn context(self, ctx: impl Into<String>) -> AlphaResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> AlphaResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &AlphaError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
