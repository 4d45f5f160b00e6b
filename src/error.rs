use std::fmt;

/// Broad classification of a [`LogError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ArgumentCount,
    Domain,
    Type,
}

/// Error types for log-domain construction and arithmetic
#[derive(Debug, Clone, PartialEq)]
pub enum LogError {
    ConflictingArguments,
    NegativeDifference,
    NegativeLogFloat,
    NegativeValue(f64),
    TooManyArguments(usize),
    UnsupportedOperand(String),
}

impl LogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LogError::ConflictingArguments | LogError::TooManyArguments(_) => {
                ErrorKind::ArgumentCount
            }
            LogError::NegativeDifference
            | LogError::NegativeLogFloat
            | LogError::NegativeValue(_) => ErrorKind::Domain,
            LogError::UnsupportedOperand(_) => ErrorKind::Type,
        }
    }

    pub fn is_domain_error(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::ConflictingArguments => write!(
                f,
                "either a positional argument or the log keyword can be given, but not both"
            ),
            LogError::NegativeDifference => write!(
                f,
                "math domain error: can't subtract a larger logfloat value from a smaller one"
            ),
            LogError::NegativeLogFloat => {
                write!(f, "math domain error: can't negate a logfloat instance")
            }
            LogError::NegativeValue(x) => {
                write!(f, "math domain error: logfloat value must be nonnegative, got {}", x)
            }
            LogError::TooManyArguments(n) => {
                write!(f, "at most 1 positional argument may be given, got {}", n)
            }
            LogError::UnsupportedOperand(msg) => write!(f, "unsupported operand: {}", msg),
        }
    }
}

impl std::error::Error for LogError {}
