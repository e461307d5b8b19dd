#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    InvalidConfiguration { reason: String },
    DuplicateWrite { index: usize },
    IncompleteCoverage { index: usize },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            EvalError::DuplicateWrite { index } => {
                write!(f, "Result slot '{}' was written more than once", index)
            }
            EvalError::IncompleteCoverage { index } => {
                write!(f, "Result slot '{}' was never written", index)
            }
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
