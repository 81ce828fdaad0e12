// src/specs/descriptors.rs
//! Headword and the short descriptor phrase under it
//! ("irregular · haben · separable", "noun · masculine · regular").

use scraper::Html;

use crate::config::consts::{DESCRIPTOR_SELECTOR, HEADWORD_SELECTOR};
use crate::core::html;
use crate::core::sanitize::{normalize_ws, strip_footnote, strip_interpuncts};
use crate::model::{Auxiliary, Gender, PartOfSpeech, Regularity, WordEntry};
use crate::Result;

/// Type words the phrase can carry. Verbs have none: the site omits the word "verb".
const TYPES: &[(&str, PartOfSpeech)] = &[
    ("noun", PartOfSpeech::Noun),
    ("adjective", PartOfSpeech::Adjective),
    ("pronoun", PartOfSpeech::Other),
    ("adverb", PartOfSpeech::Other),
    ("preposition", PartOfSpeech::Other),
    ("conjunction", PartOfSpeech::Other),
    ("interjection", PartOfSpeech::Other),
];

const GENDERS: &[(&str, Gender)] = &[
    ("masculine", Gender::Masculine),
    ("feminine", Gender::Feminine),
    ("neutral", Gender::Neutral),
];

const REGULARITY: &[(&str, Regularity)] = &[
    ("regular", Regularity::Regular),
    ("irregular", Regularity::Irregular),
];

const AUXILIARIES: &[(&str, Auxiliary)] = &[
    ("haben", Auxiliary::Haben),
    ("sein", Auxiliary::Sein),
];

const SEPARABLE: &str = "separable";

/// Read the descriptor region. `Ok(None)` when the headword node is absent.
pub fn extract(doc: &Html) -> Result<Option<WordEntry>> {
    let Some(head) = html::select_first(doc, HEADWORD_SELECTOR)? else {
        logf!("headword node missing");
        return Ok(None);
    };
    let headword = normalize_ws(&strip_interpuncts(&html::text_of(head)));
    if headword.is_empty() {
        logf!("headword node empty");
        return Ok(None);
    }

    let phrase = html::select_first(doc, DESCRIPTOR_SELECTOR)?
        .map(html::text_of)
        .unwrap_or_default();
    let tokens = tokenize(&phrase);
    logd!("descriptors for '{headword}': {tokens:?}");

    Ok(Some(classify(headword, &tokens)))
}

/// Word tokens of the phrase, lower-cased, footnote markers removed.
pub fn tokenize(phrase: &str) -> Vec<String> {
    phrase
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| strip_footnote(t).to_lowercase())
        .collect()
}

/// Assign each category from its vocabulary; the first vocabulary entry present wins.
pub fn classify(headword: impl Into<String>, tokens: &[String]) -> WordEntry {
    let pos = first_match(TYPES, tokens).unwrap_or(PartOfSpeech::Verb);
    let mut entry = WordEntry::new(headword, pos);

    entry.regularity = first_match(REGULARITY, tokens);
    match pos {
        PartOfSpeech::Verb => {
            entry.auxiliary = first_match(AUXILIARIES, tokens);
            entry.separable = Some(tokens.iter().any(|t| t == SEPARABLE));
        }
        PartOfSpeech::Noun => entry.gender = first_match(GENDERS, tokens),
        _ => {}
    }
    entry
}

fn first_match<T: Copy>(vocab: &[(&str, T)], tokens: &[String]) -> Option<T> {
    vocab
        .iter()
        .find(|(word, _)| tokens.iter().any(|t| t == word))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn tokenize_strips_footnotes() {
        assert_eq!(toks("irregular · haben¹ · separable"), vec!["irregular", "haben", "separable"]);
    }

    #[test]
    fn verb_is_the_default_type() {
        let e = classify("anzeigen", &toks("regular · haben · separable"));
        assert_eq!(e.pos, PartOfSpeech::Verb);
        assert_eq!(e.regularity, Some(Regularity::Regular));
        assert_eq!(e.auxiliary, Some(Auxiliary::Haben));
        assert_eq!(e.separable, Some(true));
        assert_eq!(e.gender, None);
    }

    #[test]
    fn inseparable_is_not_separable() {
        let e = classify("verstehen", &toks("irregular · haben · inseparable"));
        assert_eq!(e.separable, Some(false));
        assert_eq!(e.regularity, Some(Regularity::Irregular));
    }

    #[test]
    fn noun_gets_gender_not_auxiliary() {
        let e = classify("Tisch", &toks("noun · masculine · regular · -s, -e"));
        assert_eq!(e.pos, PartOfSpeech::Noun);
        assert_eq!(e.gender, Some(Gender::Masculine));
        assert_eq!(e.auxiliary, None);
        assert_eq!(e.separable, None);
    }

    #[test]
    fn missing_categories_stay_null() {
        let e = classify("schnell", &toks("adjective"));
        assert_eq!(e.pos, PartOfSpeech::Adjective);
        assert_eq!(e.regularity, None);
        assert_eq!(e.gender, None);
    }

    #[test]
    fn extract_strips_interpuncts_and_reports_missing_headword() {
        let doc = Html::parse_document(
            r#"<p class="vGrnd rCntr"> an·zeigen </p><p class="rInf">regular · haben · separable</p>"#,
        );
        let e = extract(&doc).unwrap().unwrap();
        assert_eq!(e.headword, "anzeigen");
        assert_eq!(e.separable, Some(true));

        let empty = Html::parse_document(r#"<p class="rInf">noun · feminine</p>"#);
        assert!(extract(&empty).unwrap().is_none());
    }
}
