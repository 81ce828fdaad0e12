// src/error.rs
use crate::model::{Mood, PartOfSpeech};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{0}' was not found in the dictionary")]
    NotFound(String),
    #[error("too many requests, slow down")]
    RateLimited,
    #[error("malformed {section}: {reason}")]
    MalformedSection { section: String, reason: String },
    #[error("declension is not available for '{0}'")]
    DeclensionUnavailable(String),
    #[error("conjugation is not available for '{0}'")]
    ConjugationUnavailable(String),
    #[error("no example sentences could be parsed from the response")]
    GenerationParse,
    #[error("{requested} is not available for a {pos}")]
    CategoryMismatch { requested: &'static str, pos: PartOfSpeech },
    #[error("'{0}' is not a known mood")]
    UnknownMood(String),
    #[error("conjugation for mood '{0}' is not stored")]
    MoodUnavailable(Mood),
    #[error("no word given")]
    NoAction,
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("bad selector '{0}'")]
    Selector(String),
    #[error("sentence generation failed: {0}")]
    Generation(String),
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("database request failed: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("error reading input: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(section: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSection { section: section.into(), reason: reason.into() }
    }

    /// Process exit status for this failure.
    /// 1 fetch/parse/category errors, 2 nothing to do, 3 rate limited or data missing,
    /// 4 sentence parse failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NoAction => 2,
            Error::RateLimited
            | Error::DeclensionUnavailable(_)
            | Error::ConjugationUnavailable(_)
            | Error::MoodUnavailable(_)
            | Error::MissingApiKey => 3,
            Error::GenerationParse => 4,
            _ => 1,
        }
    }
}
