use std::{collections::HashMap, sync::OnceLock};

use rand::{Rng, seq::SliceRandom};
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::character::Message;

/// Names handed out to anonymised participants
pub const NAME_POOL: [&str; 5] = ["Alice", "Bob", "Charlie", "Dick", "Edward"];

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{user\d+\}\}").expect("Valid regex"))
}

/// Token -> display name for a single conversation. Names are drawn the first
/// time a token is seen and reused for every later occurrence.
#[derive(Debug, Default)]
pub struct PlaceholderMap {
    names: HashMap<String, &'static str>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for `token`, drawing one from the pool on first sight
    pub fn resolve<R: Rng + ?Sized>(&mut self, token: &str, rng: &mut R) -> &'static str {
        if let Some(name) = self.names.get(token).copied() {
            return name;
        }

        // pool is a non-empty const
        let name = NAME_POOL.choose(rng).copied().unwrap_or(NAME_POOL[0]);
        trace!(token, name, "Assigned name to placeholder");
        self.names.insert(token.to_owned(), name);
        name
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Replaces every `{{userN}}` in the `user` fields of `conversation` with a
/// name, consistently across the whole conversation.
#[instrument(skip_all, fields(messages = conversation.len()))]
pub fn replace_user_placeholders<R: Rng + ?Sized>(conversation: &mut [Message], rng: &mut R) {
    let regex = placeholder_regex();
    let mut mapping = PlaceholderMap::new();

    for message in conversation.iter_mut() {
        let tokens: Vec<String> = regex
            .find_iter(&message.user)
            .map(|m| m.as_str().to_owned())
            .collect();

        for token in tokens {
            let name = mapping.resolve(&token, rng);
            message.user = message.user.replace(&token, name);
        }
    }

    debug!(distinct = mapping.len(), "Replaced user placeholders");
}
