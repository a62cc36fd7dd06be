use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{
    error::{CharacterError, CharacterResult},
    json_pointer,
};

/// Keys the sampler reads. Checked up front so a missing one is named in the error.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "/bio",
    "/lore",
    "/messageExamples",
    "/style/all",
    "/style/chat",
    "/style/post",
    "/knowledge",
];

/// The parts of a character profile the sampler uses. Everything else in the file
/// is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub bio: Vec<String>,
    pub lore: Vec<String>,
    pub message_examples: Vec<Conversation>,
    pub style: Style,
    /// Only counted
    pub knowledge: Vec<serde_json::Value>,
}

pub type Conversation = Vec<Message>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub all: Vec<String>,
    pub chat: Vec<String>,
    pub post: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub user: String,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
}

impl Message {
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            content: Content { text: text.into() },
        }
    }
}

impl CharacterRecord {
    /// Builds a record from a parsed character document.
    ///
    /// Fails with `MissingField` naming the first absent key, or `InvalidField`
    /// when a key holds the wrong kind of value.
    #[instrument(skip(document))]
    pub fn from_document(document: &serde_json::Value) -> CharacterResult<Self> {
        for pointer in REQUIRED_FIELDS {
            if document.pointer(pointer).is_none() {
                let field = json_pointer::to_field_name(pointer);
                debug!(field = %field, "Required field absent");
                return Err(CharacterError::MissingField(field));
            }
        }
        trace!("All required fields present");

        // Deserialize field by field so shape errors point at the offending key
        Ok(Self {
            bio: field(document, "/bio")?,
            lore: field(document, "/lore")?,
            message_examples: field(document, "/messageExamples")?,
            style: Style {
                all: field(document, "/style/all")?,
                chat: field(document, "/style/chat")?,
                post: field(document, "/style/post")?,
            },
            knowledge: field(document, "/knowledge")?,
        })
    }
}

fn field<T: serde::de::DeserializeOwned>(
    document: &serde_json::Value,
    pointer: &str,
) -> CharacterResult<T> {
    let value = document
        .pointer(pointer)
        .ok_or_else(|| CharacterError::MissingField(json_pointer::to_field_name(pointer)))?;

    T::deserialize(value).map_err(|source| CharacterError::InvalidField {
        field: json_pointer::to_field_name(pointer),
        source,
    })
}
