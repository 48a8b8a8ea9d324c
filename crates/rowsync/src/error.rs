use derive_more::Display;
use rowsync_config::ConfigError;
use rowsync_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;


///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::StructuralMismatch => ErrorKind::Translate(TranslateErrorKind::Structure),
            ErrorClass::Mapping => ErrorKind::Translate(TranslateErrorKind::Mapping),
            ErrorClass::Config => ErrorKind::Config,
            ErrorClass::Conflict => ErrorKind::Checkpoint(CheckpointErrorKind::Conflict),
            ErrorClass::NotFound => ErrorKind::Checkpoint(CheckpointErrorKind::NotFound),
            ErrorClass::InvariantViolation => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Translate(TranslateErrorKind),
    Checkpoint(CheckpointErrorKind),

    /// Configuration could not be read or failed validation.
    Config,

    /// The caller cannot remediate this.
    Internal,
}

///
/// TranslateErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TranslateErrorKind {
    /// Row length disagrees with the column catalog or its paired image.
    Structure,

    /// The column-mapping collaborator rejected a row.
    Mapping,
}

///
/// CheckpointErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CheckpointErrorKind {
    /// File already has a checkpoint.
    Conflict,

    /// No checkpoint exists for the file.
    NotFound,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Catalog,
    Translate,
    Mapping,
    Checkpoint,
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Catalog => Self::Catalog,
            CoreErrorOrigin::Translate => Self::Translate,
            CoreErrorOrigin::Mapping => Self::Mapping,
            CoreErrorOrigin::Checkpoint => Self::Checkpoint,
            CoreErrorOrigin::Config => Self::Config,
        }
    }
}
