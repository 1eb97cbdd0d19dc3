use super::Error;

/// Error when a bind parameter has no value at execution time.
#[derive(Debug)]
pub(super) struct MissingParameter {
    name: Box<str>,
}

impl std::error::Error for MissingParameter {}

impl core::fmt::Display for MissingParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing parameter: a value is required for bind parameter `{}`",
            self.name
        )
    }
}

impl Error {
    /// Creates a missing parameter error for the bind parameter `name`.
    pub fn missing_parameter(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingParameter(MissingParameter {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing parameter error.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingParameter(_))
    }
}
