//! Transcript chunking.

use fillercut_models::Word;

/// Split words into bounded-duration groups for classification.
///
/// Greedy accumulation: a word joins the current group while its end stays
/// within `max_duration_secs` of the group's first word, otherwise it starts
/// a new group. Groups partition the input in order; no word is dropped or
/// duplicated. The bound keeps each classification request small and fast
/// while leaving enough surrounding words for the model to judge pauses.
pub fn chunk_words(words: &[Word], max_duration_secs: f64) -> Vec<Vec<Word>> {
    let mut chunks: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();

    for word in words {
        if current.is_empty() {
            current.push(word.clone());
            continue;
        }

        let duration = word.end - current[0].start;
        if duration < max_duration_secs {
            current.push(word.clone());
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push(word.clone());
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
