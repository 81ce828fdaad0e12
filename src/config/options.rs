// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::model::Mood;

/// What to show once the word is resolved (and scraped, if needed).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Headword + definition. The default when no category flag is given.
    Definition,
    Declension,
    Conjugation { mood: Option<Mood> },
    Sentences { replace: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub word: String,
    pub action: Action,
    pub pronunciation: bool,
    /// Generate example sentences right after a fresh scrape.
    pub generate_on_scrape: bool,
    pub verbose: bool,
    pub data_dir: PathBuf,
    pub llm: LlmOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            word: s!(),
            action: Action::Definition,
            pronunciation: false,
            generate_on_scrape: false,
            verbose: false,
            data_dir: default_data_dir(),
            llm: LlmOptions::default(),
        }
    }
}

impl AppOptions {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Sentences are needed either on explicit request or right after a scrape with `-a`.
    pub fn wants_generator(&self) -> bool {
        self.generate_on_scrape || matches!(self.action, Action::Sentences { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LlmOptions {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub url: String,
}

impl Default for LlmOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            model: s!(DEFAULT_MODEL),
            temperature: TEMPERATURE,
            url: s!(OPENAI_URL),
        }
    }
}

/// `<platform data dir>/german-dict`, or the working directory when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
