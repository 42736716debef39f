use std::fmt;
use std::str::FromStr;

/// Grammatical category of a token, using the Universal Dependencies tag set.
///
/// `Unspecified` stands for the `_` placeholder and renders as an empty field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Unspecified,
    Adjective,
    Adposition,
    Adverb,
    Auxiliary,
    CoordinatingConjunction,
    Determiner,
    Interjection,
    Noun,
    Numeral,
    Particle,
    Pronoun,
    ProperNoun,
    Punctuation,
    SubordinatingConjunction,
    Symbol,
    Verb,
    Other,
}

impl PartOfSpeech {
    /// The label written into the card.
    pub fn label(self) -> &'static str {
        match self {
            PartOfSpeech::Unspecified => "",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adposition => "adposition",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Auxiliary => "auxiliary verb",
            PartOfSpeech::CoordinatingConjunction => "coordinating conjunction",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::ProperNoun => "proper noun",
            PartOfSpeech::Punctuation => "punctuation",
            PartOfSpeech::SubordinatingConjunction => "subordinating conjunction",
            PartOfSpeech::Symbol => "symbol",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Other => "other",
        }
    }
}

/// Returned when a tag is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl FromStr for PartOfSpeech {
    type Err = UnknownTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let pos = match tag {
            "_" => PartOfSpeech::Unspecified,
            "ADJ" => PartOfSpeech::Adjective,
            "ADP" => PartOfSpeech::Adposition,
            "ADV" => PartOfSpeech::Adverb,
            "AUX" => PartOfSpeech::Auxiliary,
            "CCONJ" => PartOfSpeech::CoordinatingConjunction,
            "DET" => PartOfSpeech::Determiner,
            "INTJ" => PartOfSpeech::Interjection,
            "NOUN" => PartOfSpeech::Noun,
            "NUM" => PartOfSpeech::Numeral,
            "PART" => PartOfSpeech::Particle,
            "PRON" => PartOfSpeech::Pronoun,
            "PROPN" => PartOfSpeech::ProperNoun,
            "PUNCT" => PartOfSpeech::Punctuation,
            "SCONJ" => PartOfSpeech::SubordinatingConjunction,
            "SYM" => PartOfSpeech::Symbol,
            "VERB" => PartOfSpeech::Verb,
            "X" => PartOfSpeech::Other,
            other => return Err(UnknownTag(other.to_owned())),
        };
        Ok(pos)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
