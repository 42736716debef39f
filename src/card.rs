//! Build a single-word card from one vocabulary occurrence.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::media::{MediaFile, MediaRole, decode_media};
use crate::part_of_speech::{PartOfSpeech, UnknownTag};
use crate::record::{MovieId, PRIMARY_GROUP, Reference, SubtitleToken, VocabularyOccurrence};
use crate::{Error, Result};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Number of fields every card row starts with (key, sentence, phonetics, translation,
/// audio, two images).
pub const SHARED_FIELD_COUNT: usize = 7;

/// Number of fields each word entry contributes to a row.
pub const WORD_FIELD_COUNT: usize = 4;

/// Identifies the subtitle phrase a card belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub movie_id: MovieId,
    pub subtitle_index: u64,
}

impl From<&Reference> for CardKey {
    fn from(reference: &Reference) -> Self {
        Self {
            movie_id: reference.movie_id.clone(),
            subtitle_index: reference.subtitle_index,
        }
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.movie_id, self.subtitle_index)
    }
}

/// One studied word on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub text: String,
    pub phonetics: String,
    pub translation: String,
    pub part_of_speech: PartOfSpeech,
}

impl WordEntry {
    pub fn fields(&self) -> [&str; WORD_FIELD_COUNT] {
        [
            &self.text,
            &self.phonetics,
            &self.translation,
            self.part_of_speech.label(),
        ]
    }
}

/// A flashcard: one subtitle phrase plus every studied word that occurs in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: CardKey,
    pub sentence: String,
    pub sentence_phonetics: String,
    pub sentence_translation: String,
    pub audio: String,
    pub image_prev: String,
    pub image_next: String,
    pub words: Vec<WordEntry>,
}

impl Card {
    /// The leading, word-independent fields of the card's row.
    pub fn shared_fields(&self) -> [String; SHARED_FIELD_COUNT] {
        [
            self.key.to_string(),
            self.sentence.clone(),
            self.sentence_phonetics.clone(),
            self.sentence_translation.clone(),
            self.audio.clone(),
            self.image_prev.clone(),
            self.image_next.clone(),
        ]
    }

    /// Labelled fields for human inspection, words first.
    pub fn labelled_fields(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| (i.to_string(), w.fields().join(" | ")))
            .collect();

        let labels = [
            "key",
            "sentence",
            "sentence_phonetics",
            "sentence_translation",
            "audio",
            "image1",
            "image2",
        ];
        out.extend(
            labels
                .into_iter()
                .map(str::to_owned)
                .zip(self.shared_fields()),
        );
        out
    }
}

/// A freshly built single-word card and the media its context carries.
#[derive(Debug, Clone)]
pub struct BuiltCard {
    pub card: Card,
    pub media: Vec<MediaFile>,
}

/// Replace every run of whitespace with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Concatenate token texts in order and collapse whitespace.
pub fn render_sentence(tokens: &[SubtitleToken]) -> String {
    let joined: String = tokens.iter().map(|t| t.form.text.as_str()).collect();
    collapse_whitespace(&joined)
}

/// Join every syllable of every annotated token with single spaces.
pub fn render_sentence_phonetics(tokens: &[SubtitleToken]) -> String {
    tokens
        .iter()
        .filter_map(|t| t.form.phonetics.as_deref())
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the part of speech of `word` by scanning every token of every group.
fn find_part_of_speech(occurrence: &VocabularyOccurrence, key: &CardKey) -> Result<PartOfSpeech> {
    let word = &occurrence.word.text;
    let token = occurrence
        .context
        .phrase
        .all_tokens()
        .find(|t| &t.form.text == word)
        .ok_or_else(|| Error::WordNotFound {
            key: key.to_string(),
            word: word.clone(),
        })?;

    token
        .pos
        .parse()
        .map_err(|UnknownTag(tag)| Error::UnknownPartOfSpeech {
            key: key.to_string(),
            word: word.clone(),
            tag,
        })
}

/// Build a single-word card for `occurrence`, decoding its context's three media payloads.
///
/// Sentence text, phonetics and translation always come from the primary token group,
/// even when the word itself only appears in another group.
pub fn build_card(occurrence: &VocabularyOccurrence) -> Result<BuiltCard> {
    let phrase = &occurrence.context.phrase;
    let key = CardKey::from(&phrase.reference);
    let label = key.to_string();

    let part_of_speech = find_part_of_speech(occurrence, &key)?;
    let word = WordEntry {
        text: occurrence.word.text.clone(),
        phonetics: occurrence.word.phonetics.join(" "),
        translation: occurrence.translations.join("; "),
        part_of_speech,
    };

    let tokens = phrase
        .token_groups
        .get(PRIMARY_GROUP)
        .ok_or_else(|| Error::malformed_record(&label, "missing primary token group"))?;
    let translation = phrase
        .translations
        .get(PRIMARY_GROUP)
        .ok_or_else(|| Error::malformed_record(&label, "missing primary translation"))?;

    let payloads = [
        (&phrase.audio, MediaRole::Audio),
        (&phrase.thumb_prev, MediaRole::PreviousThumbnail),
        (&phrase.thumb_next, MediaRole::NextThumbnail),
    ];
    let media = payloads
        .into_iter()
        .map(|(payload, role)| decode_media(payload, &phrase.reference, role, &label))
        .collect::<Result<Vec<_>>>()?;

    let card = Card {
        key,
        sentence: render_sentence(tokens),
        sentence_phonetics: render_sentence_phonetics(tokens),
        sentence_translation: collapse_whitespace(translation),
        audio: MediaRole::Audio.reference(&media[0].name),
        image_prev: MediaRole::PreviousThumbnail.reference(&media[1].name),
        image_next: MediaRole::NextThumbnail.reference(&media[2].name),
        words: vec![word],
    };

    Ok(BuiltCard { card, media })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn builds_single_word_card() -> anyhow::Result<()> {
        let occ = occurrence("世界", &["shì", "jiè"], &["world", "earth"], greeting_phrase());
        let BuiltCard { card, media } = build_card(&occ)?;

        assert_eq!(card.key.to_string(), "M1:3");
        assert_eq!(card.sentence, "你好, 世界!");
        assert_eq!(card.sentence_phonetics, "nǐ hǎo shì jiè");
        assert_eq!(card.sentence_translation, "Hello, world!");
        assert_eq!(card.audio, "[sound:hello_world_3.mp3]");
        assert_eq!(card.image_prev, "<img src=\"hello_world_3_prev.jpeg\"/>");
        assert_eq!(card.image_next, "<img src=\"hello_world_3_next.jpeg\"/>");
        assert_eq!(
            card.words,
            vec![WordEntry {
                text: "世界".to_owned(),
                phonetics: "shì jiè".to_owned(),
                translation: "world; earth".to_owned(),
                part_of_speech: PartOfSpeech::Noun,
            }]
        );

        let names: Vec<_> = media.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            ["hello_world_3.mp3", "hello_world_3_prev.jpeg", "hello_world_3_next.jpeg"]
        );
        Ok(())
    }

    #[test]
    fn sentence_rendering_is_deterministic() -> anyhow::Result<()> {
        let occ = occurrence("你好", &[], &[], greeting_phrase());
        let tokens = &occ.context.phrase.token_groups[PRIMARY_GROUP];
        assert_eq!(render_sentence(tokens), render_sentence(tokens));
        assert_eq!(
            render_sentence_phonetics(tokens),
            render_sentence_phonetics(tokens)
        );
        Ok(())
    }

    #[test]
    fn whitespace_runs_collapse_without_trimming() {
        assert_eq!(collapse_whitespace(" a \t\n b  "), " a b ");
    }

    #[test]
    fn missing_word_is_a_hard_error() {
        let occ = occurrence("再见", &[], &[], greeting_phrase());
        let err = build_card(&occ).unwrap_err();
        assert!(matches!(err, Error::WordNotFound { ref word, .. } if word == "再见"));
    }

    #[test]
    fn word_found_in_a_secondary_group() -> anyhow::Result<()> {
        let mut phrase = greeting_phrase();
        phrase["subtitleTokens"]["2"] = serde_json::json!([token("朋友", None, "NOUN")]);
        let occ = occurrence("朋友", &["péng", "you"], &["friend"], phrase);

        let built = build_card(&occ)?;
        assert_eq!(built.card.sentence, "你好, 世界!");
        assert_eq!(built.card.words[0].part_of_speech, PartOfSpeech::Noun);
        Ok(())
    }

    #[test]
    fn part_of_speech_follows_export_group_order() -> anyhow::Result<()> {
        // Serialized `Value` objects sort their keys, so the groups are spliced in as raw
        // JSON to keep "2" ahead of "10".
        let mut phrase = greeting_phrase();
        let primary = phrase["subtitleTokens"]["1"].take();
        if let Some(obj) = phrase.as_object_mut() {
            obj.remove("subtitleTokens");
        }
        let groups = format!(
            r#""phrase":{{"subtitleTokens":{{"1":{primary},"2":[{}],"10":[{}]}},"#,
            token("看", None, "NOUN"),
            token("看", None, "VERB"),
        );
        let raw = occurrence_json("看", &["kàn"], &["look"], phrase)
            .to_string()
            .replacen(r#""phrase":{"#, &groups, 1);
        let occ: VocabularyOccurrence = serde_json::from_str(&raw)?;

        let built = build_card(&occ)?;
        assert_eq!(built.card.words[0].part_of_speech, PartOfSpeech::Noun);
        assert_eq!(built.card.sentence, "你好, 世界!");
        Ok(())
    }

    #[test]
    fn unknown_tag_fails_and_placeholder_is_empty() -> anyhow::Result<()> {
        let mut phrase = greeting_phrase();
        phrase["subtitleTokens"]["1"][0]["pos"] = "XYZ".into();
        let err = build_card(&occurrence("你好", &[], &[], phrase)).unwrap_err();
        assert!(matches!(err, Error::UnknownPartOfSpeech { ref tag, .. } if tag == "XYZ"));

        let mut phrase = greeting_phrase();
        phrase["subtitleTokens"]["1"][0]["pos"] = "_".into();
        let built = build_card(&occurrence("你好", &[], &[], phrase))?;
        assert_eq!(built.card.words[0].fields()[3], "");
        Ok(())
    }

    #[test]
    fn missing_primary_translation_is_malformed() {
        let mut phrase = greeting_phrase();
        phrase["hTranslations"] = serde_json::json!({ "2": "Hi" });
        let err = build_card(&occurrence("你好", &[], &[], phrase)).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn labelled_fields_list_words_then_shared_fields() -> anyhow::Result<()> {
        let occ = occurrence("你好", &["nǐ", "hǎo"], &["hello"], greeting_phrase());
        let fields = build_card(&occ)?.card.labelled_fields();

        assert_eq!(fields.len(), 1 + SHARED_FIELD_COUNT);
        assert_eq!(
            fields[0],
            (
                "0".to_owned(),
                "你好 | nǐ hǎo | hello | interjection".to_owned()
            )
        );
        assert_eq!(fields[1], ("key".to_owned(), "M1:3".to_owned()));
        Ok(())
    }
}
