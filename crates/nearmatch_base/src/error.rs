use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

The engine needs callers to match on a few structural cases (bad input, unreadable case
file, several failures at once) while the CLI wants a readable chain of context. A small
hand-written type covers both and keeps the span trace in one place.
 */

/// Error variants that can occur in nearmatch operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A search request was missing or had an unusable field
    InvalidInput { field: String, reason: String },

    /// Multiple errors occurred during batch operations
    Multiple {
        errors: Vec<NearmatchError>,
        count: usize,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::InvalidInput { field, reason } => {
                write!(f, "Invalid input for '{}': {}", field, reason)
            }
            ErrorKind::Multiple { count, .. } => {
                write!(f, "Multiple errors occurred ({} total)", count)
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/* 📖 # Why separate ErrorKind and NearmatchError?
ErrorKind holds the structural variant that callers match on (for example to tell an
invalid request apart from an I/O failure). NearmatchError wraps it with the runtime
context strings, an optional cause and the span trace captured when the error was created.
*/

/// Error type wrapping ErrorKind with context, an optional cause and a span trace.
pub struct NearmatchError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<NearmatchError>>,
    span_trace: SpanTrace,
}

impl NearmatchError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a plain message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates an input validation error for the named field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Bundles several errors into one.
    pub fn multiple(errors: Vec<NearmatchError>) -> Self {
        let count = errors.len();
        Self::new(ErrorKind::Multiple { errors, count })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that led to this one.
    pub fn caused_by(mut self, cause: NearmatchError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    pub fn cause(&self) -> Option<&NearmatchError> {
        self.cause.as_deref()
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns true if this error is an input validation failure, or a non-empty
    /// collection made only of such failures.
    pub fn is_invalid_input(&self) -> bool {
        match &self.kind {
            ErrorKind::InvalidInput { .. } => true,
            ErrorKind::Multiple { errors, .. } => {
                !errors.is_empty() && errors.iter().all(NearmatchError::is_invalid_input)
            }
            _ => false,
        }
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;

        let mut children: Vec<(&str, Option<&NearmatchError>)> = self
            .context
            .iter()
            .map(|context| (context.as_str(), None))
            .collect();
        if let ErrorKind::Multiple { errors, .. } = &self.kind {
            children.extend(errors.iter().map(|error| ("error", Some(error))));
        }
        if let Some(cause) = &self.cause {
            children.push(("cause", Some(cause)));
        }

        let last = children.len().saturating_sub(1);
        for (i, (label, nested)) in children.into_iter().enumerate() {
            let (branch, continuation) = if i == last {
                ("└─ ", "   ")
            } else {
                ("├─ ", "│  ")
            };
            match nested {
                None => writeln!(f, "{indent}{branch}{label}")?,
                Some(error) => {
                    write!(f, "{indent}{branch}{label}: ")?;
                    error.write_tree(f, &format!("{indent}{continuation}"))?;
                }
            }
        }
        Ok(())
    }
}

impl From<ErrorKind> for NearmatchError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for NearmatchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if let Some(cause) = &self.cause {
            return Some(cause.as_ref());
        }
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Multiple { errors, .. } => {
                errors.first().map(|e| e as &(dyn StdError + 'static))
            }
            ErrorKind::InvalidInput { .. } | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for NearmatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }

        match &self.kind {
            ErrorKind::Multiple { errors, .. } => match errors.first() {
                Some(first) => write!(f, "{}: {}", self.kind, first),
                None => write!(f, "{}", self.kind),
            },
            kind => write!(f, "{}", kind),
        }
    }
}

/* 📖 # Why a tree-shaped Debug output?
Errors are usually printed with `{:?}` at the top of the program. A tree showing the
message, each context line and the nested causes reads much better than the derived
struct dump, and the span trace at the bottom points at where the error was created.
*/
impl fmt::Debug for NearmatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<NearmatchError> in the result type?

The error carries a span trace and a context vector, so it is large. Boxing keeps
`NearmatchResult<T>` close to the size of `T` on the success path.
*/

/// Standard result type for nearmatch operations.
pub type NearmatchResult<T> = std::result::Result<T, Box<NearmatchError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> NearmatchResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> NearmatchResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for NearmatchResult<T> {
    fn context(self, context: impl Into<String>) -> NearmatchResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> NearmatchResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed message error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::NearmatchError::message(format!($($arg)*)))
    };
}

/// Returns early with a message error built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
