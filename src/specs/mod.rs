// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific extraction for the dictionary site. Each spec knows *where the
//! ground truth lives in the HTML* of a word page and *how to read it*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of an already-fetched word page (`scraper::Html`).
//! - **Selector choice**: all selectors come from `config::consts`.
//! - **Normalization** of cell text through `core::sanitize`.
//! - **Light shaping** into the typed model (`WordEntry`, `ConjugationTable`,
//!   `DeclensionTable`).
//!
//! ## What does **not** live here
//! - Networking (`core::net`), persistence (`store`), user interaction (`cli`).
//!
//! ## Typical call chain
//! ```text
//! cli → lookup::Dictionary::scrape → core::net::Fetch::get
//!                                  ↘ specs::page::parse → descriptors / definition
//!                                                       → conjugation | declension
//!                                  ↘ store::Store::save_scraped
//! ```
//!
//! ## Conventions & invariants
//! - A missing headword means "no such word here": `Ok(None)`, nothing else is parsed.
//! - A broken sub-table is a `MalformedSection`; it is collected as an issue and
//!   sibling tables are still read.
//! - Selector compile errors are real errors and always propagate.
//!
//! ## Testing notes
//! Specs are tested offline against the fixtures in `tests/fixtures/`.
pub mod conjugation;
pub mod declension;
pub mod definition;
pub mod descriptors;
pub mod page;
