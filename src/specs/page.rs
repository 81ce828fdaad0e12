// src/specs/page.rs
//! Whole-page extraction: descriptors first, then the tables the word type calls for.

use scraper::Html;

use super::{conjugation, declension, definition, descriptors};
use crate::model::{ConjugationTable, DeclensionTable, PartOfSpeech, WordEntry};
use crate::{Error, Result};

/// Everything read from one word page.
#[derive(Debug)]
pub struct ScrapedWord {
    pub entry: WordEntry,
    pub conjugation: Option<ConjugationTable>,
    pub declension: Option<DeclensionTable>,
    /// Sub-sections that could not be read; the rest of the page still was.
    pub issues: Vec<Error>,
}

/// Parse a fetched page. `Ok(None)` when the page has no headword.
pub fn parse(body: &str) -> Result<Option<ScrapedWord>> {
    let doc = Html::parse_document(body);
    parse_document(&doc)
}

pub fn parse_document(doc: &Html) -> Result<Option<ScrapedWord>> {
    let Some(mut entry) = descriptors::extract(doc)? else {
        return Ok(None);
    };
    let mut issues = Vec::new();

    match definition::extract(doc) {
        Ok(text) => entry.definition = Some(text),
        Err(e) => tolerate(e, &mut issues)?,
    }

    let mut conjugation = None;
    let mut declension = None;
    match entry.pos {
        PartOfSpeech::Verb => {
            let report = conjugation::extract(doc)?;
            issues.extend(report.issues);
            conjugation = Some(report.table);
        }
        PartOfSpeech::Noun => match declension::extract(doc) {
            Ok(table) => declension = Some(table),
            Err(e) => tolerate(e, &mut issues)?,
        },
        PartOfSpeech::Adjective | PartOfSpeech::Other => {}
    }

    logf!(
        "parsed '{}' ({}), {} issue(s)",
        entry.headword,
        entry.pos,
        issues.len()
    );
    Ok(Some(ScrapedWord { entry, conjugation, declension, issues }))
}

/// Keep a malformed sub-section as an issue; anything else propagates.
fn tolerate(e: Error, issues: &mut Vec<Error>) -> Result<()> {
    match e {
        Error::MalformedSection { .. } => {
            logw!("{e}");
            issues.push(e);
            Ok(())
        }
        other => Err(other),
    }
}
