// src/specs/definition.rs
use scraper::Html;

use crate::config::consts::DEFINITION_SELECTOR;
use crate::core::html;
use crate::{Error, Result};

/// Gloss paragraph, `<br>`-separated parts joined by single spaces.
/// An absent or blank paragraph is an error, never an empty definition.
pub fn extract(doc: &Html) -> Result<String> {
    let node = html::select_first(doc, DEFINITION_SELECTOR)?
        .ok_or_else(|| Error::malformed("definition", "paragraph not found"))?;
    let text = html::lines_of(node);
    if text.is_empty() {
        return Err(Error::malformed("definition", "paragraph is empty"));
    }
    Ok(text)
}
