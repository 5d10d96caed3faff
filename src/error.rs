use std::fmt;

/// Errors raised while generating, merging, reading or writing basis sets.
#[derive(Debug, Clone, PartialEq)]
pub enum BasisError {
    /// An argument has the wrong type, e.g. a non-integer function count.
    Type(String),
    /// An argument has the right type but an invalid value or arity.
    Value(String),
    /// Two basis sets that belong to different elements were combined.
    Incompatible { left: String, right: String },
    /// An element identifier could not be resolved.
    NotFound(String),
    /// A basis set file could not be parsed.
    Parse { line: usize, message: String },
    /// Reading or writing a file failed.
    Io(String),
}

impl BasisError {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        BasisError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BasisError::Type(message) => write!(f, "type error: {}", message),
            BasisError::Value(message) => write!(f, "value error: {}", message),
            BasisError::Incompatible { left, right } => write!(
                f,
                "type error: basis sets for different elements cannot be combined ({} and {})",
                left, right
            ),
            BasisError::NotFound(id) => write!(f, "element not found: {}", id),
            BasisError::Parse { line, message } => {
                write!(f, "parse error in line {}: {}", line, message)
            }
            BasisError::Io(message) => write!(f, "io error: {}", message),
        }
    }
}

impl std::error::Error for BasisError {}

impl From<std::io::Error> for BasisError {
    fn from(err: std::io::Error) -> Self {
        BasisError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BasisError>;
