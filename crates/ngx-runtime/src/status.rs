//! Status codes returned by every runtime entry point.

/// The failure bit shared by every unsuccessful status.
const FAIL: u32 = 0xBAD0_0000;

/// A status code returned by the runtime. Mirrors `NVSDK_NGX_Result`.
#[repr(u32)]
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// The call succeeded.
    Success = 0x1,
    /// A generic failure.
    Fail = FAIL,
    /// The feature isn't supported on the current hardware.
    FeatureNotSupported = FAIL | 1,
    /// The platform error - check the runtime log.
    PlatformError = FAIL | 2,
    /// The feature with the given parameters already exists.
    FeatureAlreadyExists = FAIL | 3,
    /// The feature with the provided handle doesn't exist.
    FeatureNotFound = FAIL | 4,
    /// An invalid parameter was provided.
    InvalidParameter = FAIL | 5,
    /// The provided scratch buffer is too small.
    ScratchBufferTooSmall = FAIL | 6,
    /// The runtime wasn't initialised.
    NotInitialized = FAIL | 7,
    /// The input buffer format isn't supported.
    UnsupportedInputFormat = FAIL | 8,
    /// A feature input/output needs the read/write access flag.
    RWFlagMissing = FAIL | 9,
    /// A required input parameter wasn't provided.
    MissingInput = FAIL | 10,
    /// The feature couldn't be initialised.
    UnableToInitializeFeature = FAIL | 11,
    /// The driver is out of date.
    OutOfDate = FAIL | 12,
    /// The runtime ran out of GPU memory.
    OutOfGPUMemory = FAIL | 13,
    /// The format used in the input buffer(s) isn't supported by the feature.
    UnsupportedFormat = FAIL | 14,
    /// The application data path isn't writable.
    UnableToWriteToAppDataPath = FAIL | 15,
    /// The provided parameter isn't supported.
    UnsupportedParameter = FAIL | 16,
    /// The feature or the application was denied (contact NVIDIA).
    Denied = FAIL | 17,
    /// The feature or functionality isn't implemented.
    NotImplemented = FAIL | 18,
}

impl Status {
    /// All the known status codes.
    pub const ALL: [Status; 20] = [
        Status::Success,
        Status::Fail,
        Status::FeatureNotSupported,
        Status::PlatformError,
        Status::FeatureAlreadyExists,
        Status::FeatureNotFound,
        Status::InvalidParameter,
        Status::ScratchBufferTooSmall,
        Status::NotInitialized,
        Status::UnsupportedInputFormat,
        Status::RWFlagMissing,
        Status::MissingInput,
        Status::UnableToInitializeFeature,
        Status::OutOfDate,
        Status::OutOfGPUMemory,
        Status::UnsupportedFormat,
        Status::UnableToWriteToAppDataPath,
        Status::UnsupportedParameter,
        Status::Denied,
        Status::NotImplemented,
    ];

    /// Returns the raw numeric value of the status.
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Converts a raw status value. Unknown failure codes collapse into
    /// [`Status::Fail`], any other unknown value is treated as a success,
    /// the same way the runtime's own `NVSDK_NGX_SUCCEED` macro does.
    pub fn from_raw(raw: u32) -> Self {
        if let Some(status) = Self::ALL.iter().copied().find(|s| s.as_raw() == raw) {
            return status;
        }

        if raw & 0xFFF0_0000 == FAIL {
            Status::Fail
        } else {
            Status::Success
        }
    }

    /// Returns [`true`] if the status is a success.
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// A human-readable description, like `GetNGXResultAsString`.
    pub const fn description(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::Fail => "Failure",
            Status::FeatureNotSupported => "Feature is not supported on current hardware",
            Status::PlatformError => "Platform error",
            Status::FeatureAlreadyExists => "Feature with given parameters already exists",
            Status::FeatureNotFound => "Feature with provided handle does not exist",
            Status::InvalidParameter => "Invalid parameter was provided",
            Status::ScratchBufferTooSmall => "Provided buffer is too small",
            Status::NotInitialized => "SDK was not initialized properly",
            Status::UnsupportedInputFormat => "Unsupported format used for input/output buffers",
            Status::RWFlagMissing => "Feature input/output needs RW access (UAV)",
            Status::MissingInput => "Feature was created with specific input but none is provided at evaluation",
            Status::UnableToInitializeFeature => "Feature is not available on the system",
            Status::OutOfDate => "NGX system libraries are old and need an update",
            Status::OutOfGPUMemory => "Feature requires more GPU memory than it is available on system",
            Status::UnsupportedFormat => "Format used in input buffer(s) is not supported by feature",
            Status::UnableToWriteToAppDataPath => "Path provided in InApplicationDataPath cannot be written to",
            Status::UnsupportedParameter => "Unsupported parameter was provided",
            Status::Denied => "The feature or application was denied",
            Status::NotImplemented => "The feature or functionality is not implemented",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#x})", self.description(), self.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn raw_values_round_trip_for_known_codes() {
        assert_eq!(Status::from_raw(0x1), Status::Success);
        assert_eq!(Status::from_raw(0xBAD0_0005), Status::InvalidParameter);
        assert_eq!(Status::OutOfGPUMemory.as_raw(), 0xBAD0_000D);
    }

    #[test]
    fn unknown_failures_collapse_into_fail() {
        assert_eq!(Status::from_raw(0xBAD0_00FF), Status::Fail);
        assert!(!Status::from_raw(0xBAD0_00FF).is_success());
    }

    #[test]
    fn display_mentions_the_code() {
        let text = Status::FeatureNotSupported.to_string();
        assert!(text.contains("0xbad00001"), "{text}");
    }
}
