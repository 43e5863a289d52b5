use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid verbosity level: {0}, expected a value from {{0, 1, 2}}")]
/// A verbosity level outside of `{0, 1, 2}` was given
///
/// This is a usage error and is always returned to the caller.
pub struct InvalidLevelError(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}() not defined in {type_name}")]
/// A contract method was called on a type that does not provide it
///
/// This signals a developer error in the implementing type, not a problem
/// with the data being represented.
pub struct NotImplementedError {
    pub operation: &'static str,
    pub type_name: &'static str,
}

impl NotImplementedError {
    pub fn new(operation: &'static str, type_name: &'static str) -> Self {
        Self {
            operation,
            type_name,
        }
    }
}

#[derive(Debug, Error)]
#[error("serialization error: {0:?}")]
/// An error happened while converting a serializable type into a value
pub struct SerializationError(#[from] serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_describes_invalid_levels() {
        assert_eq!(
            InvalidLevelError(3).to_string(),
            "invalid verbosity level: 3, expected a value from {0, 1, 2}"
        );
    }

    #[test]
    fn it_names_the_missing_operation() {
        let err = NotImplementedError::new("duplicate", "Page");
        assert_eq!(err.to_string(), "duplicate() not defined in Page");
    }
}
