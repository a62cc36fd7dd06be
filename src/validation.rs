use std::fmt;

use tracing::{debug, info, instrument, trace, warn};

use crate::{error::CharacterError, json_pointer};

pub const VALID_MESSAGE: &str = "JSON file is valid against the schema.";
pub const INVALID_MESSAGE: &str = "JSON file is not valid against the schema.";

/// Validates a JSON document against a schema and collects every violation
pub struct SchemaValidator<'a> {
    json_schema: &'a serde_json::Value,
    document: &'a serde_json::Value,
    file_contents: &'a str,
}

impl<'a> SchemaValidator<'a> {
    /// `file_contents` is the raw text `document` was parsed from, used to put
    /// line numbers on violations. Pass `""` if there is none.
    pub fn new(
        json_schema: &'a serde_json::Value,
        document: &'a serde_json::Value,
        file_contents: &'a str,
    ) -> Self {
        Self {
            json_schema,
            document,
            file_contents,
        }
    }

    #[instrument(skip(self))]
    pub fn validate(self) -> Result<ValidationOutcome, CharacterError> {
        trace!("Creating schema validator");
        // a schema we can't compile means validation can't happen at all
        let validator = jsonschema::validator_for(self.json_schema).map_err(|e| {
            warn!(error = %e, "Schema could not be compiled");
            CharacterError::CapabilityUnavailable(e.to_string())
        })?;

        debug!("Schema validator created successfully");

        let violations: Vec<Violation> = validator
            .iter_errors(self.document)
            .map(|e| Violation::new(&e, self.file_contents))
            .collect();

        if violations.is_empty() {
            info!("Schema validation passed with no errors");
            Ok(ValidationOutcome::Valid)
        } else {
            warn!(
                error_count = violations.len(),
                "Schema validation found errors"
            );
            Ok(ValidationOutcome::Invalid(violations))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<Violation>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationOutcome::Valid => &[],
            ValidationOutcome::Invalid(v) => v,
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => write!(f, "{VALID_MESSAGE}"),
            ValidationOutcome::Invalid(violations) => {
                write!(f, "{INVALID_MESSAGE}")?;
                for violation in violations {
                    write!(f, "\nValidation error: {violation}")?;
                }
                Ok(())
            }
        }
    }
}

/// A single place where the document breaks the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the document, `""` for the root
    pub instance_path: String,
    pub message: String,
    /// 1-based, when the path could be found in the source text
    pub line: Option<usize>,
}

impl Violation {
    #[instrument(skip(error, file_contents), fields(instance_path = %error.instance_path()))]
    pub fn new(error: &jsonschema::ValidationError<'_>, file_contents: &str) -> Self {
        let instance_path = error.instance_path().to_string();
        let message = error.to_string();

        trace!(
            path = %instance_path,
            error = %message,
            "Creating violation"
        );

        let line = json_pointer::into_line(&instance_path, file_contents);

        Self {
            instance_path,
            message,
            line,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            &self.instance_path
        };
        write!(f, "{} at {}", self.message, path)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::parsing::LoadedDocument;
    use serde_json::json;

    fn name_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        })
    }

    #[test]
    fn string_name_passes() -> Result<(), Box<dyn std::error::Error>> {
        let schema = name_schema();
        let doc = json!({ "name": "ok" });

        let outcome = SchemaValidator::new(&schema, &doc, "").validate()?;
        assert_eq!(outcome, ValidationOutcome::Valid);
        assert_eq!(outcome.to_string(), VALID_MESSAGE);
        Ok(())
    }

    #[test]
    fn numeric_name_fails_mentioning_name() -> Result<(), Box<dyn std::error::Error>> {
        let schema = name_schema();
        let text = "{\n  \"name\": 123\n}";
        let doc: serde_json::Value = serde_json::from_str(text)?;

        let outcome = SchemaValidator::new(&schema, &doc, text).validate()?;
        assert!(!outcome.is_valid());

        let violation = &outcome.violations()[0];
        assert_eq!(violation.instance_path, "/name");
        assert_eq!(violation.line, Some(2));

        let report = outcome.to_string();
        assert!(report.starts_with(INVALID_MESSAGE));
        assert!(report.contains("Validation error:"));
        assert!(report.contains("name"));
        Ok(())
    }

    #[test]
    fn every_violation_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "bio": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["name", "bio"]
        });
        let doc = json!({ "bio": ["fine", 4] });

        let outcome = SchemaValidator::new(&schema, &doc, "").validate()?;
        let paths: Vec<&str> = outcome
            .violations()
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect();

        assert_eq!(outcome.violations().len(), 2);
        assert!(paths.contains(&"/bio/1"));
        assert!(paths.contains(&""));
        Ok(())
    }

    #[test]
    fn broken_schema_is_capability_unavailable() {
        let schema = json!({ "type": "not-a-type" });
        let doc = json!({});

        let result = SchemaValidator::new(&schema, &doc, "").validate();
        assert!(matches!(result, Err(CharacterError::CapabilityUnavailable(_))));
    }

    #[test]
    fn shipped_example_matches_shipped_schema() -> Result<(), Box<dyn std::error::Error>> {
        let schema = LoadedDocument::load("schema/character.schema.json")?;
        let doc = LoadedDocument::load("characters/example.character.json")?;

        let outcome = SchemaValidator::new(&schema.json, &doc.json, &doc.contents).validate()?;
        assert!(outcome.is_valid(), "{outcome}");
        Ok(())
    }

    #[test]
    fn wrong_style_shape_is_located() -> Result<(), Box<dyn std::error::Error>> {
        let schema = LoadedDocument::load("schema/character.schema.json")?;
        let doc = LoadedDocument::load("characters/example.character.json")?;

        let mut broken = doc.json.clone();
        broken["style"]["chat"] = json!("should be a list");
        let text = serde_json::to_string_pretty(&broken)?;

        let outcome = SchemaValidator::new(&schema.json, &broken, &text).validate()?;
        let violation = outcome
            .violations()
            .iter()
            .find(|v| v.instance_path == "/style/chat")
            .expect("style.chat violation");
        assert!(violation.line.is_some());
        Ok(())
    }
}
