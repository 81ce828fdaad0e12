// src/sentences.rs
//! Example sentences from a chat-completion model.
//!
//! The model is asked for a numbered list, one `<german> - <english>` pair per
//! line. Only the parsing is ours to get right; generation is behind [`Generate`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::config::consts::{MAX_TOKENS, SENTENCE_COUNT};
use crate::config::options::LlmOptions;
use crate::core::net;
use crate::model::ExampleSentence;
use crate::{Error, Result};

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\W+(.+)\s-\s(.+?)\s*$").expect("static regex")
});

/// Source of raw generated text for a word.
pub trait Generate {
    fn generate(&self, word: &str) -> Result<String>;
}

/// Pull `(source, target)` pairs out of a numbered list.
/// Lines that do not match are skipped; no pairs at all is an error.
pub fn parse_numbered(text: &str) -> Result<Vec<ExampleSentence>> {
    let mut out = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match NUMBERED_LINE.captures(line) {
            Some(caps) => {
                let source = caps[2].trim();
                let target = caps[3].trim();
                if !source.is_empty() && !target.is_empty() {
                    out.push(ExampleSentence::new(source, target));
                }
            }
            None => logd!("skipping unparsed line: {line}"),
        }
    }
    if out.is_empty() {
        return Err(Error::GenerationParse);
    }
    Ok(out)
}

pub fn prompt(word: &str) -> String {
    format!(
        "Write a numbered list of {SENTENCE_COUNT} example sentences used in daily life, \
         each at least 5 words long, for the German word \"{word}\". \
         Translate each sentence into English. Put every sentence on its own line \
         in exactly this form:\n1. <german sentence> - <english sentence>"
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    n: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// `error.message` out of a failed response body, when it has one.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
}

/// First choice's text, trimmed.
fn first_choice(chat: ChatResponse) -> Result<String> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| s!(c.trim()))
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::Generation(s!("empty response")))
}

/// OpenAI chat-completions client.
pub struct OpenAiGenerator {
    agent: Agent,
    api_key: String,
    model: String,
    temperature: f64,
    url: String,
}

impl OpenAiGenerator {
    /// Fails with `MissingApiKey` when no key is configured.
    pub fn new(opts: &LlmOptions) -> Result<Self> {
        let api_key = opts
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingApiKey)?;
        Ok(Self {
            agent: net::agent(),
            api_key: s!(api_key),
            model: opts.model.clone(),
            temperature: opts.temperature,
            url: opts.url.clone(),
        })
    }
}

impl Generate for OpenAiGenerator {
    fn generate(&self, word: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt(word) }],
            temperature: self.temperature,
            max_tokens: MAX_TOKENS,
            n: 1,
        };

        logd!("requesting sentences for '{word}' from {}", self.model);
        let mut resp = self
            .agent
            .post(&self.url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.body_mut().read_to_string().unwrap_or_default();
            loge!("sentence request failed with {status}: {body}");
            return Err(Error::Generation(match api_error_message(&body) {
                Some(msg) => format!("HTTP {status}: {msg}"),
                None => format!("HTTP {status}"),
            }));
        }

        first_choice(resp.body_mut().read_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_pairs_in_order() {
        let text = "1. Ich gehe nach Hause. - I go home.\n2. Er lief schnell. - He ran fast.";
        let got = parse_numbered(text).unwrap();
        assert_eq!(
            got,
            vec![
                ExampleSentence::new("Ich gehe nach Hause.", "I go home."),
                ExampleSentence::new("Er lief schnell.", "He ran fast."),
            ]
        );
    }

    #[test]
    fn lines_without_separator_are_skipped() {
        let text = "Here are your sentences:\n1. Ich lerne Deutsch. - I learn German.\n2. Kein Trenner hier.\n";
        let got = parse_numbered(text).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].target, "I learn German.");
    }

    #[test]
    fn nothing_parsed_is_fatal() {
        assert!(matches!(parse_numbered("1. Kein Trenner."), Err(Error::GenerationParse)));
        assert!(matches!(parse_numbered(""), Err(Error::GenerationParse)));
    }

    #[test]
    fn hyphenated_words_stay_in_the_sentence() {
        let got = parse_numbered("3) Das E-Mail-Konto ist neu. - The e-mail account is new.").unwrap();
        assert_eq!(got[0].source, "Das E-Mail-Konto ist neu.");
    }

    #[test]
    fn generator_requires_api_key() {
        let opts = LlmOptions { api_key: Some(s!("  ")), ..LlmOptions::default() };
        assert!(matches!(OpenAiGenerator::new(&opts), Err(Error::MissingApiKey)));
    }

    #[test]
    fn chat_request_body_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage { role: "user", content: prompt("Tisch") }],
            temperature: 1.0,
            max_tokens: MAX_TOKENS,
            n: 1,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["n"], 1);
    }

    #[test]
    fn first_choice_is_taken_from_response() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  1. Ja. - Yes.\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(chat).unwrap(), "1. Ja. - Yes.");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_choice(empty), Err(Error::Generation(_))));
    }

    #[test]
    fn api_error_message_is_surfaced() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body).as_deref(), Some("Incorrect API key provided"));
        assert_eq!(api_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn prompt_names_word_and_format() {
        let p = prompt("lernen");
        assert!(p.contains("\"lernen\""));
        assert!(p.contains("<german sentence> - <english sentence>"));
    }
}
