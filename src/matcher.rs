// src/matcher.rs
//! Resolve a typed query against stored headwords before going online.

use crate::model::Auxiliary;
use crate::store::{Store, WordRef};
use crate::{Error, Result};

/// Whole-string spelling substitutions, each applied on its own.
const UMLAUT_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("ae", "ä"),
    ("oe", "ö"),
    ("ue", "ü"),
    ("ss", "ß"),
    ("Ae", "Ä"),
    ("Oe", "Ö"),
    ("Ue", "Ü"),
    ("a", "ä"),
    ("o", "ö"),
    ("u", "ü"),
    ("A", "Ä"),
    ("O", "Ö"),
    ("U", "Ü"),
];

/// Outcome of matching a query against the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly this stored headword.
    Stored(String),
    /// Nothing stored; fetch this word.
    Online(String),
    /// Let the user pick. `offer_online` adds a "search online" choice.
    Ambiguous { candidates: Vec<String>, offer_online: bool },
}

/// Alternate spellings of `query`, in substitution order, without duplicates
/// and without `query` itself.
pub fn umlaut_candidates(query: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for &(from, to) in UMLAUT_SUBSTITUTIONS {
        if !query.contains(from) {
            continue;
        }
        let cand = query.replace(from, to);
        if cand != query && !out.contains(&cand) {
            out.push(cand);
        }
    }
    out
}

/// Fuzzy matches for `query`; when there are none, the first umlaut spelling that has some.
pub fn search(store: &Store, query: &str) -> Result<Vec<WordRef>> {
    let direct = store.fuzzy_matches(query)?;
    if !direct.is_empty() {
        return Ok(direct);
    }
    for cand in umlaut_candidates(query) {
        let found = store.fuzzy_matches(&cand)?;
        if !found.is_empty() {
            logd!("'{query}' matched stored words via '{cand}'");
            return Ok(found);
        }
    }
    Ok(Vec::new())
}

/// Decide between a stored word, an online lookup and a user choice.
pub fn resolve(store: &Store, query: &str) -> Result<Resolution> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::NoAction);
    }

    let found = search(store, query)?;
    match found.as_slice() {
        [] => return Ok(Resolution::Online(s!(query))),
        [only] => return Ok(Resolution::Stored(only.text.clone())),
        _ => {}
    }

    let mut spellings = vec![query.to_lowercase()];
    spellings.extend(umlaut_candidates(query).iter().map(|c| c.to_lowercase()));
    let exact: Vec<&WordRef> = found
        .iter()
        .filter(|w| spellings.contains(&w.text.to_lowercase()))
        .collect();
    if let [only] = exact.as_slice() {
        return Ok(Resolution::Stored(only.text.clone()));
    }

    let candidates: Vec<String> = found.into_iter().map(|w| w.text).collect();
    let offer_online = !both_auxiliaries_stored(&candidates);
    Ok(Resolution::Ambiguous { candidates, offer_online })
}

/// True when some headword appears with both a "(haben)" and a "(sein)" qualifier.
pub fn both_auxiliaries_stored(candidates: &[String]) -> bool {
    let haben = format!(" ({})", Auxiliary::Haben);
    let sein = format!(" ({})", Auxiliary::Sein);
    candidates.iter().any(|c| {
        c.strip_suffix(haben.as_str())
            .is_some_and(|base| candidates.iter().any(|o| o.strip_suffix(sein.as_str()) == Some(base)))
    })
}
