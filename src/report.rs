use std::fmt;

use rand::Rng;
use tracing::{info, instrument};

use crate::{
    character::{CharacterRecord, Conversation},
    config::SamplerConfig,
    placeholders::replace_user_placeholders,
    sampling::{random_select, random_select_and_combine, sample_conversations},
};

/// One randomized excerpt of a character, ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterReport {
    pub bio: String,
    /// The sampled lore joined on spaces and split again, so entries with
    /// spaces in them come back as several tokens.
    pub lore: Vec<String>,
    pub conversations: Vec<Conversation>,
    pub all_style: String,
    pub chat_style: String,
    pub post_style: String,
    pub knowledge_count: usize,
}

impl CharacterReport {
    #[instrument(skip_all, fields(config = ?config))]
    pub fn sample<R: Rng + ?Sized>(
        record: &CharacterRecord,
        config: &SamplerConfig,
        rng: &mut R,
    ) -> Self {
        let bio = random_select_and_combine(&record.bio, config.bio_count, rng);

        let lore = random_select_and_combine(&record.lore, config.lore_count, rng)
            .split(' ')
            .map(str::to_owned)
            .collect();

        let mut conversations =
            sample_conversations(&record.message_examples, config.conversation_count, rng);
        for conversation in conversations.iter_mut() {
            replace_user_placeholders(conversation, rng);
        }

        let all_style = random_select(&record.style.all, config.style_count, rng).join("\n");
        let chat_style = random_select(&record.style.chat, config.style_count, rng).join("\n");
        let post_style = random_select(&record.style.post, config.style_count, rng).join("\n");

        info!(
            conversations = conversations.len(),
            knowledge = record.knowledge.len(),
            "Sampled character"
        );

        Self {
            bio,
            lore,
            conversations,
            all_style,
            chat_style,
            post_style,
            knowledge_count: record.knowledge.len(),
        }
    }
}

impl fmt::Display for CharacterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bio: {}", self.bio)?;
        writeln!(f, "Lore: {:?}", self.lore)?;
        writeln!(f, "Message Examples:")?;
        for (i, conversation) in self.conversations.iter().enumerate() {
            writeln!(f, "Conversation {}:", i + 1)?;
            for message in conversation {
                writeln!(f, "{}: {}", message.user, message.content.text)?;
            }
            writeln!(f, "---")?;
        }
        writeln!(f, "All Style:")?;
        writeln!(f, "{}", self.all_style)?;
        writeln!(f, "Chat Style:")?;
        writeln!(f, "{}", self.chat_style)?;
        writeln!(f, "Post Style:")?;
        writeln!(f, "{}", self.post_style)?;
        write!(f, "Knowledge Items: {}", self.knowledge_count)
    }
}
