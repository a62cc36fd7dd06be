use std::path::{Path, PathBuf};

use tracing::{debug, error, instrument, trace};

use crate::error::{CharacterError, CharacterResult};

/// A JSON file read from disk, kept alongside its raw text so violations can be
/// mapped back to lines.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub contents: String,
    pub json: serde_json::Value,
}

impl LoadedDocument {
    /// Reads and parses the file at `path`
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> CharacterResult<Self> {
        let path = path.as_ref();
        trace!("Reading file contents");

        let contents = std::fs::read_to_string(path).map_err(|source| {
            error!(error = %source, "Could not read file");
            CharacterError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Self::parse(path, contents)
    }

    /// Parses already-read contents. `path` is only used for error reporting.
    #[instrument(skip(path, contents), fields(content_len = contents.len()))]
    pub fn parse(path: impl AsRef<Path>, contents: String) -> CharacterResult<Self> {
        let path = path.as_ref().to_path_buf();
        trace!("Attempting to parse file contents as JSON");

        match serde_json::from_str(&contents) {
            Ok(json) => {
                debug!("Successfully parsed JSON content");
                Ok(Self {
                    path,
                    contents,
                    json,
                })
            }
            Err(source) => {
                error!(
                    line = source.line(),
                    column = source.column(),
                    error = %source,
                    "JSON parsing failed"
                );
                Err(CharacterError::Parse {
                    path,
                    line: source.line(),
                    column: source.column(),
                    source,
                })
            }
        }
    }
}
