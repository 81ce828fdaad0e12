// src/specs/conjugation.rs
//! Conjugation tables of a verb page.
//!
//! Page shape (one `section.rBox` per mood, in document order):
//! ```text
//! <section class="rBox">                 ← first qualifying section: always "simple"
//!   <header><h2>…</h2></header>
//!   <div class="vTbl"><h2>Present</h2><table><tr><td>ich</td><td>lerne</td></tr>…</table></div>
//!   …
//! </section>
//! <section class="rBox">
//!   <header><h2>Indicative</h2></header>
//!   <div class="vTbl"><h3>Perfect</h3><table>…</table></div>
//! </section>
//! ```
//! The simple-tense group has no mood heading of its own, so its heading text is ignored.
//! The imperative section repeats simple/imperative and is never parsed.

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{
    CELL_SELECTOR, FIRST_TENSE_HEADING, ROW_SELECTOR, SECTION_HEADER_SELECTOR,
    SECTION_SELECTOR, TENSE_BLOCK_SELECTOR, TENSE_HEADING,
};
use crate::core::html::{self, sel};
use crate::core::sanitize::{normalize_ws, remove_word, strip_superscripts};
use crate::model::{CellKey, ConjugationTable, Forms, Mood, Pronoun, Tense};
use crate::{Error, Result};

/// Extracted table plus the sub-tables that could not be read.
#[derive(Debug, Default)]
pub struct ConjugationReport {
    pub table: ConjugationTable,
    pub issues: Vec<Error>,
}

/// How the rows of one tense table map onto keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowStrategy {
    /// "0", "1", … in row order; rows are not pronoun-labelled.
    Positional,
    /// Exactly six rows zipped with `Pronoun::ALL`.
    Personal { strip_parens: bool },
}

pub fn strategy(mood: Mood, tense: Tense) -> RowStrategy {
    match (mood, tense) {
        (Mood::Simple, Tense::Infinitive | Tense::Participle) => RowStrategy::Positional,
        (Mood::InfinitiveParticiple | Mood::Imperative, _) => RowStrategy::Positional,
        (Mood::Simple, Tense::Imperative) => RowStrategy::Personal { strip_parens: true },
        _ => RowStrategy::Personal { strip_parens: false },
    }
}

struct Selectors {
    section: Selector,
    header: Selector,
    block: Selector,
    first_heading: Selector,
    heading: Selector,
    row: Selector,
    cell: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            section: sel(SECTION_SELECTOR)?,
            header: sel(SECTION_HEADER_SELECTOR)?,
            block: sel(TENSE_BLOCK_SELECTOR)?,
            first_heading: sel(FIRST_TENSE_HEADING)?,
            heading: sel(TENSE_HEADING)?,
            row: sel(ROW_SELECTOR)?,
            cell: sel(CELL_SELECTOR)?,
        })
    }
}

/// Walk every mood section of the page.
pub fn extract(doc: &Html) -> Result<ConjugationReport> {
    let sels = Selectors::new()?;
    let mut report = ConjugationReport::default();
    let mut first = true;

    for section in doc.select(&sels.section) {
        let Some(header) = section.select(&sels.header).next() else {
            continue;
        };

        let mood = if first {
            first = false;
            Mood::Simple
        } else {
            let heading = html::text_of(header);
            match Mood::from_heading(&heading) {
                Some(m) => m,
                None => {
                    logd!("skipping section '{heading}'");
                    continue;
                }
            }
        };

        if mood == Mood::Imperative {
            // same rows as simple/imperative; aliased below
            continue;
        }

        read_section(section, mood, &sels, &mut report);
    }

    report.table.alias_imperative();
    logd!(
        "conjugation: {} cells, {} issues",
        report.table.cell_count(),
        report.issues.len()
    );
    Ok(report)
}

fn read_section(section: ElementRef<'_>, mood: Mood, sels: &Selectors, report: &mut ConjugationReport) {
    for block in section.select(&sels.block) {
        let heading = block
            .select(&sels.first_heading)
            .next()
            .or_else(|| block.select(&sels.heading).next());

        let Some(label) = heading.map(html::text_of) else {
            report.issues.push(Error::malformed(mood.as_str(), "tense block without heading"));
            continue;
        };
        let Some(tense) = Tense::from_heading(mood, &label) else {
            report.issues.push(Error::malformed(mood.as_str(), format!("unknown tense '{label}'")));
            continue;
        };

        let rows: Vec<String> = block
            .select(&sels.row)
            .map(|tr| row_text(tr, &sels.cell))
            .filter(|r| !r.is_empty())
            .collect();

        match read_rows(mood, tense, &rows) {
            Ok(forms) => report.table.set_forms(mood, tense, forms),
            Err(e) => {
                logw!("{e}");
                report.issues.push(e);
            }
        }
    }
}

/// Cell texts of one row joined by single spaces.
fn row_text(tr: ElementRef<'_>, cell: &Selector) -> String {
    let cells: Vec<String> = tr.select(cell).map(html::text_of).collect();
    if cells.is_empty() {
        html::text_of(tr)
    } else {
        normalize_ws(&cells.join(" "))
    }
}

/// Map the raw row texts of one tense table to keyed, cleaned forms.
pub fn read_rows(mood: Mood, tense: Tense, rows: &[String]) -> Result<Forms> {
    match strategy(mood, tense) {
        RowStrategy::Positional => Ok(rows
            .iter()
            .enumerate()
            .map(|(i, row)| (CellKey::Index(i), clean_row(row, None, false)))
            .collect()),
        RowStrategy::Personal { strip_parens } => {
            if rows.len() != Pronoun::ALL.len() {
                return Err(Error::malformed(
                    format!("{mood}/{tense}"),
                    format!("expected {} rows, found {}", Pronoun::ALL.len(), rows.len()),
                ));
            }
            Ok(Pronoun::ALL
                .iter()
                .zip(rows)
                .map(|(p, row)| (CellKey::Person(*p), clean_row(row, Some(*p), strip_parens)))
                .collect())
        }
    }
}

/// Lower-case, drop the displayed pronoun, drop "()" leftovers when asked, drop footnote superscripts.
pub fn clean_row(row: &str, pronoun: Option<Pronoun>, strip_parens: bool) -> String {
    let lc = row.to_lowercase();
    let mut text = match pronoun {
        Some(p) => remove_word(&lc, p.as_str()),
        None => normalize_ws(&lc),
    };
    if strip_parens {
        text = normalize_ws(&text.replace("()", ""));
    }
    normalize_ws(&strip_superscripts(&text))
}
