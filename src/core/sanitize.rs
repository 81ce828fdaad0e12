// src/core/sanitize.rs
//! Text cleanup shared by the conjugation and declension specs.

/// Unicode superscript digits used by the site for footnote markers.
const SUPERSCRIPTS: &[char] = &['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Syllable separators shown inside headwords ("an·zeigen").
const INTERPUNCTS: &[char] = &['·', '⋅', '∙', '\u{00AD}'];

/// Lower-case articles that can end up glued to the noun ("desTisches").
const ARTICLES: &[&str] = &[
    "der", "die", "das", "des", "dem", "den",
    "ein", "eine", "einer", "eines", "einem", "einen",
];

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

pub fn is_superscript(ch: char) -> bool {
    SUPERSCRIPTS.contains(&ch)
}

/// Drop every superscript digit, wherever it sits.
pub fn strip_superscripts(s: &str) -> String {
    s.chars().filter(|c| !is_superscript(*c)).collect()
}

/// Drop a trailing footnote marker (ASCII or superscript digits): "haben¹" → "haben".
/// A token made only of digits is left alone.
pub fn strip_footnote(token: &str) -> &str {
    let trimmed = token.trim_end_matches(|c: char| c.is_ascii_digit() || is_superscript(c));
    if trimmed.is_empty() { token } else { trimmed }
}

pub fn strip_interpuncts(s: &str) -> String {
    s.chars().filter(|c| !INTERPUNCTS.contains(c)).collect()
}

/// Keep only the first of several slash-separated variants: "Tisches/Tischs" → "Tisches".
pub fn first_variant(s: &str) -> &str {
    match s.find('/') {
        Some(i) => s[..i].trim(),
        None => s.trim(),
    }
}

/// Re-insert the space in an "articleNoun" compound: "desTisches" → "des Tisches".
/// Only splits at the first lower→upper transition, and only when the prefix is an article.
pub fn split_article_compound(s: &str) -> String {
    let s = s.trim();
    if s.contains(' ') {
        return s.to_string();
    }
    let mut prev: Option<char> = None;
    for (i, ch) in s.char_indices() {
        if let Some(p) = prev {
            if p.is_lowercase() && ch.is_uppercase() {
                let head = &s[..i];
                if ARTICLES.contains(&head) {
                    return join!(head, " ", &s[i..]);
                }
                break;
            }
        }
        prev = Some(ch);
    }
    s.to_string()
}

/// Remove every whole-word occurrence of `word` and re-collapse whitespace.
/// "er erwartet" minus "er" → "erwartet"; "lern(e) (du)" minus "du" → "lern(e) ()".
pub fn remove_word(text: &str, word: &str) -> String {
    if word.is_empty() {
        return normalize_ws(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(word) {
        let end = pos + word.len();
        let before_ok = rest[..pos].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
        let after_ok = rest[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            out.push_str(&rest[..pos]);
        } else {
            out.push_str(&rest[..end]);
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    normalize_ws(&out)
}
