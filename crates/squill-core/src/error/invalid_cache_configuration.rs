use super::Error;

/// Error when a compiled cache is configured with unusable settings.
///
/// This occurs when:
/// - The capacity is zero
/// - The overgrowth threshold is negative or not finite
///
/// These errors are raised when the cache is constructed, never on lookup.
#[derive(Debug)]
pub(super) struct InvalidCacheConfiguration {
    message: Box<str>,
}

impl std::error::Error for InvalidCacheConfiguration {}

impl core::fmt::Display for InvalidCacheConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid cache configuration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid cache configuration error.
    pub fn invalid_cache_configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidCacheConfiguration(
            InvalidCacheConfiguration {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid cache configuration error.
    pub fn is_invalid_cache_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidCacheConfiguration(_))
    }
}
