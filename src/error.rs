use std::fmt;

/// Result type alias for document operations
pub type DocResult<T> = Result<T, DocError>;

/// Errors that can occur while parsing or mutating a configuration document
#[derive(Debug, Clone)]
pub enum DocError {
    /// The recognizable data-block delimiters are absent from the input
    StructureNotFound,

    /// A line inside the data block could not be interpreted
    Parse { line: usize, message: String },

    /// A node's ancestor chain never reaches the file root
    RootResolution { key: String },

    /// An operation was invoked on a node that cannot satisfy it
    UnsupportedOperation { operation: String, path: String },
}

impl DocError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        DocError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a root resolution error
    pub fn root_resolution(key: impl Into<String>) -> Self {
        DocError::RootResolution { key: key.into() }
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>, path: impl Into<String>) -> Self {
        DocError::UnsupportedOperation {
            operation: operation.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::StructureNotFound => {
                write!(f, "no recognizable data block found in the input")
            }
            DocError::Parse { line, message } => {
                write!(f, "parse error at line {}: {}", line + 1, message)
            }
            DocError::RootResolution { key } => {
                write!(f, "node '{}' is not attached to a file root", key)
            }
            DocError::UnsupportedOperation { operation, path } => {
                write!(f, "operation '{}' is not supported on '{}'", operation, path)
            }
        }
    }
}

impl std::error::Error for DocError {}
