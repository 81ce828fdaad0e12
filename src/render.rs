// src/render.rs
//! Terminal output for stored entries. Everything writes to a caller-supplied sink.

use std::io::{self, Write};

use console::style;

use crate::core::net::pronunciation_url;
use crate::model::{
    Case, CellKey, ConjugationTable, DeclensionTable, ExampleSentence, Mood, Number, WordEntry,
};

const KEY_WIDTH: usize = 4;
const CASE_WIDTH: usize = 12;

/// Headword line, then the definition.
pub fn definition(out: &mut impl Write, entry: &WordEntry) -> io::Result<()> {
    let mut tags = vec![entry.pos.as_str()];
    if let Some(g) = entry.gender {
        tags.push(g.as_str());
    }
    if let Some(a) = entry.auxiliary {
        tags.push(a.as_str());
    }
    if let Some(r) = entry.regularity {
        tags.push(r.as_str());
    }
    if entry.separable == Some(true) {
        tags.push("separable");
    }

    writeln!(
        out,
        "{} {}",
        style(&entry.headword).blue().bold(),
        style(format!("({})", tags.join(", "))).dim()
    )?;
    match entry.definition.as_deref() {
        Some(text) => writeln!(out, "{}", style(text).red()),
        None => writeln!(out, "{}", style("no definition stored").dim()),
    }
}

/// Every mood with stored forms, or only `mood` when given.
pub fn conjugation(out: &mut impl Write, table: &ConjugationTable, mood: Option<Mood>) -> io::Result<()> {
    let moods = Mood::ALL
        .iter()
        .copied()
        .filter(|m| mood.is_none_or(|only| only == *m))
        .filter(|m| table.has_mood(*m));

    for (i, m) in moods.enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", style(m.as_str().to_uppercase()).bold())?;
        for (tense, forms) in table.tenses(m) {
            if forms.is_empty() {
                continue;
            }
            writeln!(out, "  {}", style(tense).cyan())?;
            for (key, form) in forms {
                match key {
                    CellKey::Person(p) => writeln!(out, "    {:<KEY_WIDTH$} {form}", p.as_str())?,
                    CellKey::Index(_) => writeln!(out, "    {form}")?,
                }
            }
        }
    }
    Ok(())
}

/// Case rows against singular/plural columns.
pub fn declension(out: &mut impl Write, table: &DeclensionTable) -> io::Result<()> {
    let width = table
        .row(Number::Singular)
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    writeln!(
        out,
        "{:<CASE_WIDTH$}{}{}",
        "",
        style(format!("{:<width$}", Number::Singular)).bold(),
        style(Number::Plural).bold()
    )?;
    for case in Case::ALL {
        writeln!(
            out,
            "{}{:<width$}{}",
            style(format!("{:<CASE_WIDTH$}", case.as_str())).cyan(),
            table.get(Number::Singular, *case),
            table.get(Number::Plural, *case)
        )?;
    }
    Ok(())
}

/// Numbered sentence, translation underneath.
pub fn sentences(out: &mut impl Write, sentences: &[ExampleSentence]) -> io::Result<()> {
    for (i, s) in sentences.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, s.source)?;
        writeln!(out, "   {}", style(&s.target).dim())?;
    }
    Ok(())
}

pub fn pronunciation(out: &mut impl Write, headword: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("pronunciation:").dim(), pronunciation_url(headword))
}
