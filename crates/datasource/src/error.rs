use std::collections::TryReserveError;
use std::fmt;
use std::io::ErrorKind;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    InvalidArgument {
        context: String,
    },
    AllocationFailure {
        context: String,
        requested: usize,
        details: String,
    },
    Io {
        context: String,
        kind: ErrorKind,
        details: String,
    },
    Parse {
        context: String,
        token: String,
        details: String,
    },
    Exhausted,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::InvalidArgument { context } => write!(f, "Invalid argument: {context}"),
            SourceError::AllocationFailure {
                context,
                requested,
                details,
            } => write!(
                f,
                "Allocation of {requested} elements failed in {context}: {details}"
            ),
            SourceError::Io {
                context, details, ..
            } => write!(f, "IO error in {context}: {details}"),
            SourceError::Parse {
                context,
                token,
                details,
            } => write!(f, "Failed to parse token '{token}' in {context}: {details}"),
            SourceError::Exhausted => write!(f, "No more elements"),
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, SourceError::Exhausted)
    }

    /// Errors caused by the caller's input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SourceError::InvalidArgument { .. } | SourceError::Parse { .. }
        )
    }

    pub fn from_io_error(e: std::io::Error, context: &str) -> Self {
        SourceError::Io {
            context: context.to_string(),
            kind: e.kind(),
            details: e.to_string(),
        }
    }

    pub fn from_reserve_error(e: TryReserveError, context: &str, requested: usize) -> Self {
        SourceError::AllocationFailure {
            context: context.to_string(),
            requested,
            details: e.to_string(),
        }
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        SourceError::InvalidArgument {
            context: context.into(),
        }
    }
}
