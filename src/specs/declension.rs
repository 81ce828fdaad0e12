// src/specs/declension.rs
//! Noun declension: two tables under `div.rAufZu > div.vDkl > div.vTbl`,
//! singular first, plural second. Each case row is found by its header's
//! `title` attribute; the article and form are the next two cells.
//!
//! ```text
//! <tr><th title="Nominative">Nom.</th><td>der</td><td>Tisch</td></tr>
//! ```

use scraper::{ElementRef, Html};

use crate::config::consts::{CASE_HEADER_SELECTOR, DECLENSION_SELECTOR, DECLENSION_TABLE_SELECTOR};
use crate::core::html::{self, sel};
use crate::core::sanitize::{
    first_variant, normalize_ws, split_article_compound, strip_footnote, strip_superscripts,
};
use crate::model::declension::CaseRow;
use crate::model::{Case, DeclensionTable, Number};
use crate::{Error, Result};

const SECTION: &str = "declension";

/// All eight cells or an error; never a partial table.
pub fn extract(doc: &Html) -> Result<DeclensionTable> {
    let blocks: Vec<ElementRef<'_>> = doc.select(&sel(DECLENSION_SELECTOR)?).collect();
    if blocks.len() < Number::ALL.len() {
        return Err(Error::malformed(
            SECTION,
            format!("expected 2 tables, found {}", blocks.len()),
        ));
    }
    if blocks.len() > Number::ALL.len() {
        logd!("{} declension blocks, reading the first two", blocks.len());
    }

    let singular = read_table(blocks[0], Number::Singular)?;
    let plural = read_table(blocks[1], Number::Plural)?;
    Ok(DeclensionTable::new(singular, plural))
}

fn read_table(block: ElementRef<'_>, number: Number) -> Result<CaseRow> {
    let section = format!("{SECTION}/{number}");
    let table = html::select_first_in(block, DECLENSION_TABLE_SELECTOR)?
        .ok_or_else(|| Error::malformed(&section, "table missing"))?;
    let headers: Vec<ElementRef<'_>> = table.select(&sel(CASE_HEADER_SELECTOR)?).collect();

    let mut row = CaseRow::default();
    for (slot, case) in row.iter_mut().zip(Case::ALL) {
        let th = headers
            .iter()
            .find(|th| html::attr_eq_ci(**th, "title", case.as_str()))
            .ok_or_else(|| Error::malformed(&section, format!("no {case} row")))?;

        let mut cells = html::next_elements(*th).map(html::text_of);
        let article = cells.next().unwrap_or_default();
        let form = cells.next().unwrap_or_default();

        let cell = clean_cell(&article, &form);
        if cell.is_empty() {
            return Err(Error::malformed(&section, format!("empty {case} cell")));
        }
        *slot = cell;
    }
    Ok(row)
}

/// "der" + "Tisch¹/Tischs" → "der Tisch".
pub fn clean_cell(article: &str, form: &str) -> String {
    let article = strip_superscripts(article);
    let article = strip_footnote(article.trim());
    let form = strip_superscripts(form);
    let form = strip_footnote(first_variant(&form));

    let joined = if article.is_empty() {
        s!(form)
    } else {
        join!(article, " ", form)
    };
    split_article_compound(&normalize_ws(&joined))
}
