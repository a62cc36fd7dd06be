pub mod character;
pub mod config;
pub mod error;
pub mod json_pointer;
pub mod line_number;
pub mod parsing;
pub mod placeholders;
pub mod report;
pub mod sampling;
pub mod validation;

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    character::CharacterRecord,
    config::SamplerConfig,
    error::CharacterResult,
    parsing::LoadedDocument,
    report::CharacterReport,
    validation::{SchemaValidator, ValidationOutcome},
};

pub const DEFAULT_CHARACTER_PATH: &str = "characters/example.character.json";
pub const DEFAULT_SCHEMA_PATH: &str = "schema/character.schema.json";

/// Loads a character file and draws one random excerpt of it.
///
/// Seeded configs give the same report every time.
#[instrument(skip(character_path), fields(path = %character_path.as_ref().display()))]
pub fn sample_character(
    character_path: impl AsRef<Path>,
    config: &SamplerConfig,
) -> CharacterResult<CharacterReport> {
    info!("Sampling character");

    let document = LoadedDocument::load(character_path)?;
    let record = CharacterRecord::from_document(&document.json)?;
    debug!(
        bio = record.bio.len(),
        lore = record.lore.len(),
        conversations = record.message_examples.len(),
        "Character record loaded"
    );

    let mut rng = config.rng();
    Ok(CharacterReport::sample(&record, config, &mut rng))
}

/// Loads a document and a schema and checks one against the other.
///
/// A document that breaks the schema is `Ok(ValidationOutcome::Invalid(..))`;
/// `Err` is reserved for unreadable files and schemas that can't be compiled.
#[instrument(skip(document_path, schema_path), fields(
    document = %document_path.as_ref().display(),
    schema = %schema_path.as_ref().display()
))]
pub fn validate_file(
    document_path: impl AsRef<Path>,
    schema_path: impl AsRef<Path>,
) -> CharacterResult<ValidationOutcome> {
    info!("Starting schema validation");

    let schema = LoadedDocument::load(schema_path)?;
    let document = LoadedDocument::load(document_path)?;

    SchemaValidator::new(&schema.json, &document.json, &document.contents).validate()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::error::CharacterError;
    use std::io::Write;

    #[test]
    fn shipped_character_samples() -> Result<(), Box<dyn std::error::Error>> {
        let config = SamplerConfig {
            seed: Some(2024),
            ..Default::default()
        };
        let report = sample_character(DEFAULT_CHARACTER_PATH, &config)?;

        assert!(report.bio.split(' ').count() > 3);
        assert_eq!(report.conversations.len(), 3);
        assert_eq!(report.knowledge_count, 4);
        assert_eq!(report.all_style.lines().count(), 3);
        assert_eq!(report.chat_style.lines().count(), 3);

        let printed = report.to_string();
        assert!(printed.starts_with("Bio: "));
        assert!(printed.contains("Conversation 3:"));
        assert!(!printed.contains("{{user1}}:"));
        assert!(printed.ends_with("Knowledge Items: 4"));
        Ok(())
    }

    #[test]
    fn seeded_runs_print_the_same() -> Result<(), Box<dyn std::error::Error>> {
        let config = SamplerConfig {
            seed: Some(5),
            ..Default::default()
        };
        let a = sample_character(DEFAULT_CHARACTER_PATH, &config)?;
        let b = sample_character(DEFAULT_CHARACTER_PATH, &config)?;

        assert_eq!(a.to_string(), b.to_string());
        Ok(())
    }

    #[test]
    fn shipped_character_validates() -> Result<(), Box<dyn std::error::Error>> {
        let outcome = validate_file(DEFAULT_CHARACTER_PATH, DEFAULT_SCHEMA_PATH)?;
        assert!(outcome.is_valid(), "{outcome}");
        Ok(())
    }

    #[test]
    fn character_without_style_chat_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{
  "bio": [], "lore": [], "messageExamples": [], "knowledge": [],
  "style": {{ "all": [], "post": [] }}
}}"#
        )?;

        match sample_character(file.path(), &SamplerConfig::default()) {
            Err(CharacterError::MissingField(field)) => assert_eq!(field, "style.chat"),
            other => panic!("expected missing style.chat, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn malformed_character_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "{{ \"bio\": [ }}")?;

        let result = sample_character(file.path(), &SamplerConfig::default());
        assert!(matches!(result, Err(CharacterError::Parse { line: 1, .. })));
        Ok(())
    }
}
