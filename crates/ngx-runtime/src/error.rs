//! Errors of the runtime contract and of the layer built on top of it.

use crate::{BackendKind, ParameterType, Status};

/// The result type used throughout.
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Every error is a value; none of them is retried automatically.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The parameter block has no entry with this name.
    #[error("The parameter {0:?} is not set")]
    KeyNotFound(String),
    /// The entry exists but was written with another type.
    #[error("The parameter {name:?} holds a {stored} value, but a {requested} value was requested")]
    TypeMismatch {
        /// The parameter name.
        name: String,
        /// The type the value was written with.
        stored: ParameterType,
        /// The type the caller asked for.
        requested: ParameterType,
    },
    /// A required parameter is missing, mistyped or null.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The device or the driver lack the requested capability.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    /// The runtime failed allocating or compiling the feature's resources.
    #[error("The runtime couldn't create the feature resources: {0}")]
    ResourceCreationFailed(Status),
    /// The feature handle was never created, was destroyed, or is unknown
    /// to the runtime.
    #[error("The feature handle is invalid")]
    InvalidHandle,
    /// The feature handle was already destroyed.
    #[error("The feature handle has already been destroyed")]
    AlreadyDestroyed,
    /// The feature handle was created through another backend.
    #[error("The feature was created with the {created} backend but used with the {used} backend")]
    BackendMismatch {
        /// The backend the feature was created with.
        created: BackendKind,
        /// The backend it was used with.
        used: BackendKind,
    },
    /// No consistent render resolution exists for the requested settings.
    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),
    /// A runtime failure with no closer category.
    #[error("The runtime returned an error: {0}")]
    Runtime(Status),
    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::Other(value.to_owned())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

impl From<Status> for Result {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Ok(()),
            Status::FeatureNotSupported
            | Status::PlatformError
            | Status::OutOfDate
            | Status::Denied
            | Status::NotImplemented => Err(Error::UnsupportedFeature(status.to_string())),
            Status::InvalidParameter
            | Status::MissingInput
            | Status::UnsupportedParameter
            | Status::UnsupportedInputFormat
            | Status::RWFlagMissing => Err(Error::InvalidParameter(status.to_string())),
            Status::OutOfGPUMemory
            | Status::UnableToInitializeFeature
            | Status::ScratchBufferTooSmall
            | Status::UnsupportedFormat
            | Status::FeatureAlreadyExists => Err(Error::ResourceCreationFailed(status)),
            Status::FeatureNotFound => Err(Error::InvalidHandle),
            Status::Fail | Status::NotInitialized | Status::UnableToWriteToAppDataPath => {
                Err(Error::Runtime(status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_ok() {
        assert_eq!(Result::from(Status::Success), Ok(()));
    }

    #[test]
    fn statuses_map_onto_the_taxonomy() {
        assert!(matches!(
            Result::from(Status::FeatureNotSupported),
            Err(Error::UnsupportedFeature(_))
        ));
        assert!(matches!(
            Result::from(Status::MissingInput),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(
            Result::from(Status::OutOfGPUMemory),
            Err(Error::ResourceCreationFailed(Status::OutOfGPUMemory))
        );
        assert_eq!(Result::from(Status::FeatureNotFound), Err(Error::InvalidHandle));
        assert_eq!(
            Result::from(Status::NotInitialized),
            Err(Error::Runtime(Status::NotInitialized))
        );
    }

    #[test]
    fn every_failure_is_an_error() {
        for status in Status::ALL {
            assert_eq!(Result::from(status).is_ok(), status.is_success());
        }
    }
}
