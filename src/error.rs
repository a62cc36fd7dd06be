use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CharacterError {
    /// Input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed when reading file contents
    #[error("Failed to parse JSON in {} at line {line}, column {column}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A key the character record needs is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Key is present but its value has the wrong shape
    #[error("Field {field} has an unexpected shape: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// Caller asked for a selection out of nothing
    #[error("Cannot select from an empty list")]
    EmptyInput,

    /// The schema could not be turned into a validator
    #[error("Validation is unavailable for this schema: {0}")]
    CapabilityUnavailable(String),
}

// Helper type alias for Results using this error type
pub type CharacterResult<T> = Result<T, CharacterError>;

impl CharacterError {
    /// Whether the error should stop the process with a non-zero status
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CharacterError::EmptyInput)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn empty_input_is_not_fatal() {
        assert!(!CharacterError::EmptyInput.is_fatal());
        assert!(CharacterError::MissingField("bio".into()).is_fatal());
        assert!(CharacterError::CapabilityUnavailable("bad".into()).is_fatal());
    }

    #[test]
    fn missing_field_names_the_field() {
        let e = CharacterError::MissingField("style.chat".into());
        assert_eq!(e.to_string(), "Missing required field: style.chat");
    }
}
