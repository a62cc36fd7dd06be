use tracing::{debug, instrument, trace};

use crate::line_number;

/// Splits a JSON pointer into its unescaped reference tokens.
/// `""` (the whole document) has no tokens.
pub fn segments(json_pointer: &str) -> Vec<String> {
    json_pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// `/style/chat` -> `style.chat`, for messages aimed at people rather than tools
pub fn to_field_name(json_pointer: &str) -> String {
    segments(json_pointer).join(".")
}

/// Resolves a JSON pointer to the 1-based line of `raw_file_contents` where its
/// deepest object key appears.
///
/// The walk only follows object keys, in order, each searched after the previous
/// match. Array indices are stepped over, so `/messageExamples/2/0/user` lands on
/// the first `user` key after `messageExamples` rather than the one in the third
/// conversation. Returns None when no key could be found at all.
#[instrument(skip(raw_file_contents), fields(
    pointer = json_pointer,
    content_len = raw_file_contents.len()
))]
pub fn into_line(json_pointer: &str, raw_file_contents: &str) -> Option<usize> {
    let tokens = segments(json_pointer);
    if tokens.is_empty() {
        return Some(1);
    }

    let mut offset = 0usize;
    let mut resolved_any = false;

    for (idx, token) in tokens.iter().enumerate() {
        if token.parse::<usize>().is_ok() {
            trace!(iteration = idx, token = %token, "Skipping array index");
            continue;
        }

        match find_key(&raw_file_contents[offset..], token) {
            Some(found) => {
                offset += found;
                resolved_any = true;
                trace!(iteration = idx, token = %token, offset, "Resolved key");
            }
            None => {
                debug!(iteration = idx, token = %token, "Key not found in remaining content");
            }
        }
    }

    resolved_any.then(|| line_number::from_index(raw_file_contents, offset))
}

/// Byte offset of the first `"key"` in `haystack` that is followed by a colon.
fn find_key(haystack: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{key}\"");
    let mut start = 0;

    while let Some(pos) = haystack[start..].find(&needle) {
        let at = start + pos;
        let after = &haystack[at + needle.len()..];
        if after.trim_start().starts_with(':') {
            return Some(at);
        }
        start = at + needle.len();
    }

    None
}
