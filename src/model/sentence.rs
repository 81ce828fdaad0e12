// src/model/sentence.rs

/// A generated example: German source sentence and its English translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExampleSentence {
    pub source: String,
    pub target: String,
}

impl ExampleSentence {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}
