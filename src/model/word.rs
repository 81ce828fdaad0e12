// src/model/word.rs

vocabulary! {
    PartOfSpeech {
        Verb => "verb",
        Noun => "noun",
        Adjective => "adjective",
        Other => "other",
    }
}

vocabulary! {
    Gender {
        Masculine => "masculine",
        Feminine => "feminine",
        Neutral => "neutral",
    }
}

vocabulary! {
    Auxiliary {
        Haben => "haben",
        Sein => "sein",
    }
}

vocabulary! {
    Regularity {
        Regular => "regular",
        Irregular => "irregular",
    }
}

impl Gender {
    /// Nominative singular article, used when rendering the headword line.
    pub fn article(&self) -> &'static str {
        match self {
            Gender::Masculine => "der",
            Gender::Feminine => "die",
            Gender::Neutral => "das",
        }
    }
}

/// One dictionary entry as scraped from the descriptor region.
///
/// `gender` is only ever set for nouns; `auxiliary` and `separable` only for verbs.
/// `regularity` stays `None` when the page does not say.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub headword: String,
    pub pos: PartOfSpeech,
    pub gender: Option<Gender>,
    pub auxiliary: Option<Auxiliary>,
    pub regularity: Option<Regularity>,
    pub separable: Option<bool>,
    pub definition: Option<String>,
}

impl WordEntry {
    pub fn new(headword: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            headword: headword.into(),
            pos,
            gender: None,
            auxiliary: None,
            regularity: None,
            separable: None,
            definition: None,
        }
    }

    pub fn bare_headword(&self) -> &str {
        bare_headword(&self.headword)
    }
}

/// Headword without its "(haben)"/"(sein)" qualifier: "fliegen (sein)" → "fliegen".
pub fn bare_headword(headword: &str) -> &str {
    headword.split('(').next().unwrap_or(headword).trim()
}
