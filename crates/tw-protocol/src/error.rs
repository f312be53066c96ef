use thiserror::Error;

/// Rejections raised while decoding request fields, before any file I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is not a valid {expected}: {value:?}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ProtocolError {
    pub fn invalid(field: &'static str, expected: &'static str, value: &str) -> Self {
        Self::Invalid {
            field,
            expected,
            value: value.to_string(),
        }
    }
}
