//! Standard exit codes for releasekit binaries
//!
//! Both `releasekit-icons` and `releasekit-aab` map their failures onto
//! these codes so release scripts can branch on them.

use crate::exceptions::ReleaseError;

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Malformed configuration record (BundleConfig.pb)
pub const EXIT_RECORD_ERROR: i32 = 102;

/// Icon rendering or image codec failure
pub const EXIT_IMAGE_ERROR: i32 = 103;

/// Zip archive could not be written or read
pub const EXIT_ARCHIVE_ERROR: i32 = 104;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error (file not found, permission denied, disk error)
pub const EXIT_IO_ERROR: i32 = 106;

/// An output failed its post-build check (alpha channel, wrong size, bad record)
pub const EXIT_VALIDATION_FAILED: i32 = 107;

/// Configuration error (invalid release.json, bad pattern)
pub const EXIT_CONFIG_ERROR: i32 = 109;

/// Exit code for a failed operation
pub fn exit_code_for(err: &ReleaseError) -> i32 {
    match err {
        ReleaseError::Config(_) | ReleaseError::Json(_) | ReleaseError::Pattern(_) => {
            EXIT_CONFIG_ERROR
        }
        ReleaseError::Record(_) => EXIT_RECORD_ERROR,
        ReleaseError::Render(_) | ReleaseError::Image(_) => EXIT_IMAGE_ERROR,
        ReleaseError::Archive(_) => EXIT_ARCHIVE_ERROR,
        ReleaseError::Io(_) => EXIT_IO_ERROR,
        ReleaseError::Validation(_) => EXIT_VALIDATION_FAILED,
        ReleaseError::Generic(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::record::RecordError;

    #[test]
    fn test_exit_code_for() {
        assert_eq!(
            exit_code_for(&ReleaseError::Record(RecordError::InvalidUtf8)),
            EXIT_RECORD_ERROR
        );
        assert_eq!(
            exit_code_for(&ReleaseError::Validation("alpha".into())),
            EXIT_VALIDATION_FAILED
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(exit_code_for(&io.into()), EXIT_IO_ERROR);
        assert_eq!(exit_code_for(&ReleaseError::Config("x".into())), EXIT_CONFIG_ERROR);
    }
}
