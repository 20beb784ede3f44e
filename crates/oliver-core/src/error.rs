use std::fmt;

/// A source position, line and column both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn point(line: usize, col: usize) -> Span {
        Span { line, col }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Host-level failures: malformed source at the reader boundary and driver
/// I/O. Evaluation failures are never represented here; inside the machine
/// errors are ordinary values that travel on the stack.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OliverError {
    #[error("Reader error at {span}: {message}")]
    Reader { message: String, span: Span },

    #[error("IO error: {0}")]
    Io(String),
}

impl OliverError {
    pub fn reader(message: impl Into<String>, span: Span) -> Self {
        OliverError::Reader {
            message: message.into(),
            span,
        }
    }
}

impl From<std::io::Error> for OliverError {
    fn from(err: std::io::Error) -> Self {
        OliverError::Io(err.to_string())
    }
}
