//! Group occurrences by card key and merge words that share a subtitle phrase.
//!
//! The deck is the only mutable state of a run. Cards keep first-seen order so output is
//! deterministic, and the widest card's word count is computed on demand once ingestion is
//! finished rather than tracked globally.

use std::collections::HashMap;

use tracing::debug;

use crate::card::{BuiltCard, Card, CardKey, build_card};
use crate::media::MediaFile;
use crate::record::VocabularyOccurrence;
use crate::{Error, Result};

/// A card together with the media decoded when its key was first seen.
#[derive(Debug, Clone)]
pub struct DeckEntry {
    pub card: Card,
    pub media: Vec<MediaFile>,
}

/// What `Deck::ingest` did with an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    /// The occurrence started a new card.
    Created,
    /// The occurrence was appended to an existing card, which now holds this many words.
    Merged(usize),
}

#[derive(Debug, Default)]
pub struct Deck {
    entries: Vec<DeckEntry>,
    index: HashMap<CardKey, usize>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence, creating its card or merging it into an existing one.
    ///
    /// Merging requires the sentence, its phonetics and its translation to match the card
    /// already stored under the key; any divergence fails with `InconsistentMerge` and
    /// leaves the deck unchanged.
    pub fn ingest(&mut self, occurrence: &VocabularyOccurrence) -> Result<Ingested> {
        let BuiltCard { card, media } = build_card(occurrence)?;

        let Some(&i) = self.index.get(&card.key) else {
            debug!(key = %card.key, word = %occurrence.word.text, "new card");
            self.index.insert(card.key.clone(), self.entries.len());
            self.entries.push(DeckEntry { card, media });
            return Ok(Ingested::Created);
        };

        let existing = &mut self.entries[i].card;
        merge(existing, card)?;
        debug!(
            key = %existing.key,
            word = %occurrence.word.text,
            words = existing.words.len(),
            "merged word into card"
        );
        Ok(Ingested::Merged(existing.words.len()))
    }

    /// Ingest every occurrence in order, stopping at the first failure.
    pub fn ingest_all<'a, I>(&mut self, occurrences: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a VocabularyOccurrence>,
    {
        for occurrence in occurrences {
            self.ingest(occurrence)?;
        }
        Ok(())
    }

    /// The largest number of words on any card (zero for an empty deck).
    pub fn max_words(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.card.words.len())
            .max()
            .unwrap_or(0)
    }

    /// Total word entries across all cards.
    pub fn word_count(&self) -> usize {
        self.entries.iter().map(|e| e.card.words.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &CardKey) -> Option<&Card> {
        self.index.get(key).map(|&i| &self.entries[i].card)
    }

    /// Cards in first-seen order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.entries.iter().map(|e| &e.card)
    }

    pub fn into_entries(self) -> Vec<DeckEntry> {
        self.entries
    }
}

fn merge(existing: &mut Card, incoming: Card) -> Result<()> {
    let checks = [
        ("sentence", &existing.sentence, &incoming.sentence),
        (
            "sentence phonetics",
            &existing.sentence_phonetics,
            &incoming.sentence_phonetics,
        ),
        (
            "sentence translation",
            &existing.sentence_translation,
            &incoming.sentence_translation,
        ),
    ];

    if let Some((field, a, b)) = checks.into_iter().find(|(_, a, b)| a != b) {
        return Err(Error::InconsistentMerge {
            key: existing.key.to_string(),
            field,
            existing: a.clone(),
            incoming: b.clone(),
        });
    }

    existing.words.extend(incoming.words);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::fixtures::*;
    use serde_json::json;

    fn other_phrase() -> serde_json::Value {
        json!({
            "reference": { "movieId": "M1", "subtitleIndex": 4, "title": "Hello World" },
            "subtitleTokens": { "1": [token("谢谢", Some(&["xiè", "xie"]), "VERB")] },
            "hTranslations": { "1": "Thanks" },
            "audio": { "dataURL": AUDIO_URL },
            "thumb_prev": { "dataURL": IMAGE_URL },
            "thumb_next": { "dataURL": IMAGE_URL },
        })
    }

    #[test]
    fn merges_words_sharing_a_key() -> anyhow::Result<()> {
        let mut deck = Deck::new();
        let a = occurrence("你好", &["nǐ", "hǎo"], &["hello"], greeting_phrase());
        let b = occurrence("世界", &["shì", "jiè"], &["world"], greeting_phrase());

        assert_eq!(deck.ingest(&a)?, Ingested::Created);
        assert_eq!(deck.ingest(&b)?, Ingested::Merged(2));

        assert_eq!(deck.len(), 1);
        assert_eq!(deck.max_words(), 2);
        let card = deck.cards().next().expect("one card");
        assert_eq!(card.key.to_string(), "M1:3");
        let words: Vec<_> = card.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, ["你好", "世界"]);
        Ok(())
    }

    #[test]
    fn keeps_first_seen_order_and_media_once() -> anyhow::Result<()> {
        let mut deck = Deck::new();
        let occurrences = [
            occurrence("谢谢", &[], &[], other_phrase()),
            occurrence("你好", &[], &[], greeting_phrase()),
            occurrence("世界", &[], &[], greeting_phrase()),
        ];
        deck.ingest_all(&occurrences)?;

        assert_eq!(deck.word_count(), 3);
        let entries = deck.into_entries();
        let keys: Vec<_> = entries.iter().map(|e| e.card.key.to_string()).collect();
        assert_eq!(keys, ["M1:4", "M1:3"]);
        assert!(entries.iter().all(|e| e.media.len() == 3));
        Ok(())
    }

    #[test]
    fn divergent_translation_is_an_inconsistent_merge() -> anyhow::Result<()> {
        let mut deck = Deck::new();
        deck.ingest(&occurrence("你好", &[], &[], greeting_phrase()))?;

        let mut phrase = greeting_phrase();
        phrase["hTranslations"]["1"] = "Hi, world!".into();
        let err = deck
            .ingest(&occurrence("世界", &[], &[], phrase))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InconsistentMerge { field: "sentence translation", .. }
        ));
        assert_eq!(deck.word_count(), 1);
        Ok(())
    }

    #[test]
    fn divergent_sentence_is_an_inconsistent_merge() -> anyhow::Result<()> {
        let mut deck = Deck::new();
        deck.ingest(&occurrence("你好", &[], &[], greeting_phrase()))?;

        let mut phrase = greeting_phrase();
        phrase["subtitleTokens"]["1"][3]["form"]["text"] = "?".into();
        let err = deck
            .ingest(&occurrence("世界", &[], &[], phrase))
            .unwrap_err();

        assert!(matches!(err, Error::InconsistentMerge { field: "sentence", .. }));
        Ok(())
    }

    #[test]
    fn divergent_phonetics_is_an_inconsistent_merge() -> anyhow::Result<()> {
        let mut deck = Deck::new();
        deck.ingest(&occurrence("你好", &[], &[], greeting_phrase()))?;

        let mut phrase = greeting_phrase();
        phrase["subtitleTokens"]["1"][2]["form"]["pinyin"] = serde_json::json!(["shí", "jiè"]);
        let err = deck
            .ingest(&occurrence("世界", &[], &[], phrase))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InconsistentMerge { field: "sentence phonetics", .. }
        ));
        assert_eq!(deck.word_count(), 1);
        Ok(())
    }

    #[test]
    fn empty_deck_has_no_width() {
        let deck = Deck::new();
        assert!(deck.is_empty());
        assert_eq!(deck.max_words(), 0);
    }
}
