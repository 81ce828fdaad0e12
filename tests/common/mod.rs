// tests/common/mod.rs
//
// Fixture pages plus in-process stand-ins for the network seams.
//
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use german_dict::core::net::{lookup_url, Fetch, FetchResponse};
use german_dict::sentences::Generate;
use german_dict::{Error, Result};

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Serves canned pages by word; anything else is a 404. Records every URL asked for.
#[derive(Clone, Default)]
pub struct FakeFetch {
    pages: HashMap<String, FetchResponse>,
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl FakeFetch {
    pub fn page(mut self, word: &str, status: u16, body: impl Into<String>) -> Self {
        self.pages
            .insert(lookup_url(word), FetchResponse { status, body: body.into() });
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetch for FakeFetch {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        self.calls.borrow_mut().push(url.to_string());
        Ok(self
            .pages
            .get(url)
            .cloned()
            .unwrap_or(FetchResponse { status: 404, body: String::new() }))
    }
}

/// Returns the same text for every word, or fails when `text` is `None`.
#[derive(Clone, Default)]
pub struct FakeGenerator {
    text: Option<String>,
    pub words: Rc<RefCell<Vec<String>>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self { text: Some(text.to_string()), ..Self::default() }
    }
}

impl Generate for FakeGenerator {
    fn generate(&self, word: &str) -> Result<String> {
        self.words.borrow_mut().push(word.to_string());
        self.text
            .clone()
            .ok_or_else(|| Error::Generation("offline".to_string()))
    }
}
