use crate::mapping::MappingError;
use rowsync_config::ConfigError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Every failure aborts the whole batch it was raised in.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `class`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a structural mismatch between a row and its column catalog.
    pub(crate) fn arity_mismatch(kind: ArityKind, expected: usize, found: usize) -> Self {
        let mismatch = ArityMismatch {
            kind,
            expected,
            found,
        };

        Self {
            class: ErrorClass::StructuralMismatch,
            origin: ErrorOrigin::Translate,
            message: mismatch.to_string(),
            detail: Some(ErrorDetail::Arity(mismatch)),
        }
    }

    /// Wrap a column-mapping failure. The message is the collaborator's own.
    pub(crate) fn mapping(err: MappingError) -> Self {
        Self {
            class: ErrorClass::Mapping,
            origin: ErrorOrigin::Mapping,
            message: err.to_string(),
            detail: Some(ErrorDetail::Mapping(err)),
        }
    }

    /// Construct a catalog-origin invariant violation.
    pub(crate) fn catalog_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Catalog,
            message,
        )
    }

    pub(crate) fn checkpoint_conflict(file: &str) -> Self {
        Self::new(
            ErrorClass::Conflict,
            ErrorOrigin::Checkpoint,
            format!("checkpoint for file '{file}' already initialized"),
        )
    }

    pub(crate) fn checkpoint_not_found(file: &str) -> Self {
        Self::new(
            ErrorClass::NotFound,
            ErrorOrigin::Checkpoint,
            format!("no checkpoint for file '{file}'"),
        )
    }

    #[must_use]
    pub const fn is_structural_mismatch(&self) -> bool {
        matches!(self.class, ErrorClass::StructuralMismatch)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorDetail
///
/// Structured, class-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Arity(ArityMismatch),
    #[error("{0}")]
    Mapping(MappingError),
}

///
/// ArityMismatch
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("{kind} mismatch in length: {expected} (columns) vs {found} (data)")]
pub struct ArityMismatch {
    pub kind: ArityKind,
    pub expected: usize,
    pub found: usize,
}

///
/// ArityKind
/// Which comparison failed.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArityKind {
    Insert,
    Delete,
    Update,
    /// Before and after images of one update disagree.
    UpdatePair,
}

impl fmt::Display for ArityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Insert => "insert columns and data",
            Self::Delete => "delete columns and data",
            Self::Update => "update columns and data",
            Self::UpdatePair => "update data",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    StructuralMismatch,
    Mapping,
    Config,
    Conflict,
    NotFound,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StructuralMismatch => "structural_mismatch",
            Self::Mapping => "mapping",
            Self::Config => "config",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Catalog,
    Translate,
    Mapping,
    Checkpoint,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Catalog => "catalog",
            Self::Translate => "translate",
            Self::Mapping => "mapping",
            Self::Checkpoint => "checkpoint",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
