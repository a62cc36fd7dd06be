use rand::{Rng, seq::SliceRandom};
use tracing::trace;

use crate::{
    character::Conversation,
    error::{CharacterError, CharacterResult},
};

/// Shuffles a copy of `items` and keeps the first `count` (or all of them if
/// there are fewer).
pub fn random_select<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count.min(items.len()));

    trace!(available = items.len(), requested = count, kept = shuffled.len(), "Selected items");
    shuffled
}

/// `random_select` joined with single spaces. Empty input gives an empty string.
pub fn random_select_and_combine<S: AsRef<str>, R: Rng + ?Sized>(
    items: &[S],
    count: usize,
    rng: &mut R,
) -> String {
    let refs: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    random_select(&refs, count, rng).join(" ")
}

/// Like `random_select_and_combine`, but refuses empty input instead of
/// returning `""`.
pub fn try_random_select_and_combine<S: AsRef<str>, R: Rng + ?Sized>(
    items: &[S],
    count: usize,
    rng: &mut R,
) -> CharacterResult<String> {
    if items.is_empty() {
        return Err(CharacterError::EmptyInput);
    }
    Ok(random_select_and_combine(items, count, rng))
}

/// Draws up to `count` conversations without replacement. Messages inside each
/// conversation keep their order.
pub fn sample_conversations<R: Rng + ?Sized>(
    conversations: &[Conversation],
    count: usize,
    rng: &mut R,
) -> Vec<Conversation> {
    random_select(conversations, count, rng)
}
