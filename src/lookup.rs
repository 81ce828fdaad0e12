// src/lookup.rs
//! The lookup pipeline: resolve → fetch → parse → persist → (sentences).
//!
//! `Dictionary` owns the store for one invocation and reaches the network
//! only through the [`Fetch`] and [`Generate`] seams.

use std::iter;

use crate::config::options::Action;
use crate::core::net::{lookup_url, Fetch};
use crate::matcher::{self, umlaut_candidates, Resolution};
use crate::model::{
    ConjugationTable, DeclensionTable, ExampleSentence, Mood, PartOfSpeech, WordEntry,
};
use crate::progress::Progress;
use crate::sentences::{parse_numbered, Generate};
use crate::specs::page::{self, ScrapedWord};
use crate::store::{Store, StoredEntry};
use crate::{Error, Result};

/// A settled choice: a stored headword, or a word to look up online.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Stored(String),
    Online(String),
}

pub struct Dictionary {
    store: Store,
    fetcher: Box<dyn Fetch>,
    generator: Option<Box<dyn Generate>>,
}

impl Dictionary {
    pub fn new(store: Store, fetcher: Box<dyn Fetch>) -> Self {
        Self { store, fetcher, generator: None }
    }

    pub fn with_generator(mut self, generator: Box<dyn Generate>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn resolve(&self, query: &str) -> Result<Resolution> {
        matcher::resolve(&self.store, query)
    }

    /// Load the target word, scraping it first when it is not stored yet.
    /// A stored word is checked against `action` before any network call.
    /// `generate` is ignored when `action` replaces sentences anyway.
    pub fn load(
        &mut self,
        target: Target,
        action: &Action,
        generate: bool,
        progress: Option<&mut dyn Progress>,
    ) -> Result<StoredEntry> {
        match target {
            Target::Stored(headword) => {
                let stored = self.entry(&headword)?;
                ensure_category(&stored.entry, action)?;
                Ok(stored)
            }
            Target::Online(word) => {
                // a replace would discard them straight away
                let generate = generate && !matches!(action, Action::Sentences { replace: true });
                let stored = self.scrape(&word, generate, progress)?;
                ensure_category(&stored.entry, action)?;
                Ok(stored)
            }
        }
    }

    /// Fetch, parse and persist `word`; with `generate`, also store fresh sentences.
    /// The word is committed before sentences are requested.
    pub fn scrape(
        &mut self,
        word: &str,
        generate: bool,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<StoredEntry> {
        if let Some(p) = progress.as_deref_mut() {
            p.begin(if generate { 4 } else { 3 });
        }
        let reborrowed = progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
        let result = self.scrape_steps(word, generate, reborrowed);
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        result
    }

    fn scrape_steps(
        &mut self,
        word: &str,
        generate: bool,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<StoredEntry> {
        let reborrowed = progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
        let scraped = self.fetch_page(word, reborrowed)?;
        if let Some(p) = progress.as_deref_mut() {
            p.step_done("parse");
            for issue in &scraped.issues {
                p.log(&format!("skipped: {issue}"));
            }
        }

        let headword = scraped.entry.headword.clone();
        if self.store.word_exists(&headword)? {
            logf!("'{headword}' is already stored; filling in missing rows only");
        }
        let word_id = self.store.save_scraped(&scraped)?;
        if let Some(p) = progress.as_deref_mut() {
            p.step_done("save");
        }

        if generate {
            self.generate_sentences(word_id, &scraped.entry, false)?;
            if let Some(p) = progress.as_deref_mut() {
                p.step_done("sentences");
            }
        }

        self.entry(&headword)
    }

    /// First spelling of `word` whose page has a headword.
    /// 429 stops immediately; other statuses and empty pages move on to the next spelling.
    fn fetch_page(&self, word: &str, mut progress: Option<&mut dyn Progress>) -> Result<ScrapedWord> {
        let word = word.trim();
        for spelling in iter::once(s!(word)).chain(umlaut_candidates(word)) {
            let url = lookup_url(&spelling);
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("fetching {url}"));
            }
            let resp = self.fetcher.get(&url)?;
            match resp.status {
                429 => {
                    loge!("rate limited on '{spelling}'");
                    return Err(Error::RateLimited);
                }
                200 => {}
                status => {
                    logw!("'{spelling}' -> HTTP {status}");
                    continue;
                }
            }
            if let Some(p) = progress.as_deref_mut() {
                p.step_done("fetch");
            }
            match page::parse(&resp.body)? {
                Some(scraped) => return Ok(scraped),
                None => logd!("no headword on page for '{spelling}'"),
            }
        }
        Err(Error::NotFound(s!(word)))
    }

    pub fn entry(&self, headword: &str) -> Result<StoredEntry> {
        self.store
            .entry(headword)?
            .ok_or_else(|| Error::NotFound(s!(headword)))
    }

    /// Stored conjugation; with `mood`, that mood must have forms.
    pub fn conjugation(&self, stored: &StoredEntry, mood: Option<Mood>) -> Result<ConjugationTable> {
        ensure_category(&stored.entry, &Action::Conjugation { mood })?;
        let table = self.store.conjugation(stored.id)?;
        if table.is_empty() {
            return Err(Error::ConjugationUnavailable(stored.entry.headword.clone()));
        }
        if let Some(m) = mood.filter(|m| !table.has_mood(*m)) {
            return Err(Error::MoodUnavailable(m));
        }
        Ok(table)
    }

    pub fn declension(&self, stored: &StoredEntry) -> Result<DeclensionTable> {
        ensure_category(&stored.entry, &Action::Declension)?;
        self.store
            .declension(stored.id)?
            .ok_or_else(|| Error::DeclensionUnavailable(stored.entry.headword.clone()))
    }

    /// Stored sentences; generated first when there are none or `replace` is set.
    pub fn sentences(&mut self, stored: &StoredEntry, replace: bool) -> Result<Vec<ExampleSentence>> {
        let existing = self.store.sentences(stored.id)?;
        if !replace && !existing.is_empty() {
            return Ok(existing);
        }
        self.generate_sentences(stored.id, &stored.entry, replace)?;
        self.store.sentences(stored.id)
    }

    fn generate_sentences(&mut self, word_id: i64, entry: &WordEntry, replace: bool) -> Result<usize> {
        let generator = self.generator.as_ref().ok_or(Error::MissingApiKey)?;
        let raw = generator.generate(entry.bare_headword())?;
        let parsed = parse_numbered(&raw)?;
        self.store.insert_sentences(word_id, &parsed, replace)?;
        logf!("stored {} sentence(s) for '{}'", parsed.len(), entry.headword);
        Ok(parsed.len())
    }
}

/// Declension needs a noun, conjugation a verb; everything else fits any word.
pub fn ensure_category(entry: &WordEntry, action: &Action) -> Result<()> {
    let (requested, needed) = match action {
        Action::Declension => ("declension", PartOfSpeech::Noun),
        Action::Conjugation { .. } => ("conjugation", PartOfSpeech::Verb),
        Action::Definition | Action::Sentences { .. } => return Ok(()),
    };
    if entry.pos == needed {
        Ok(())
    } else {
        Err(Error::CategoryMismatch { requested, pos: entry.pos })
    }
}
