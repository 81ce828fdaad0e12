// src/core/html.rs
//! Thin helpers over `scraper` for the handful of operations the specs need.

use scraper::{ElementRef, Html, Node, Selector};

use super::sanitize::normalize_ws;
use crate::{Error, Result};

/// Compile a CSS selector, mapping the parser's error into ours.
pub fn sel(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| Error::Selector(s!(css)))
}

/// First match for `css` anywhere in the document.
pub fn select_first<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = sel(css)?;
    Ok(doc.select(&selector).next())
}

/// First match for `css` below `el`.
pub fn select_first_in<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = sel(css)?;
    Ok(el.select(&selector).next())
}

/// Visible text with text nodes concatenated as-is, then whitespace-collapsed.
/// Inline markup inside a word ("lern<b>t</b>") stays glued.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Like [`text_of`], but every `<br>` becomes a space.
/// Used where `<br>` separates the parts of a block.
pub fn lines_of(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name() == "br" => out.push(' '),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Element siblings after `el`, skipping text and comment nodes.
pub fn next_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Case-insensitive attribute comparison.
pub fn attr_eq_ci(el: ElementRef<'_>, name: &str, value: &str) -> bool {
    el.value()
        .attr(name)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
}
