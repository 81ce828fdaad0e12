// tests/lookup_pipeline.rs
//
// resolve → fetch → parse → persist → sentences, with the network faked out.
//
mod common;

use common::{fixture, FakeFetch, FakeGenerator};
use german_dict::config::options::Action;
use german_dict::lookup::{Dictionary, Target};
use german_dict::matcher::Resolution;
use german_dict::model::{Mood, PartOfSpeech};
use german_dict::progress::{NullProgress, Progress};
use german_dict::store::Store;
use german_dict::Error;
use rstest::rstest;

const SENTENCES: &str = "1. Ich lerne jeden Tag Deutsch. - I study German every day.\n\
                         2. Wir lernen zusammen. - We learn together.";

fn dictionary(fetch: &FakeFetch) -> Dictionary {
    Dictionary::new(Store::open_in_memory().unwrap(), Box::new(fetch.clone()))
}

#[test]
fn unknown_word_is_scraped_then_answered_locally() {
    let fetch = FakeFetch::default().page("lernen", 200, fixture("verb.html"));
    let mut dict = dictionary(&fetch);

    assert_eq!(dict.resolve("lernen").unwrap(), Resolution::Online("lernen".into()));
    let action = Action::Conjugation { mood: None };
    let stored = dict.load(Target::Online("lernen".into()), &action, false, None).unwrap();
    assert_eq!(stored.entry.pos, PartOfSpeech::Verb);
    assert_eq!(fetch.call_count(), 1);

    assert_eq!(dict.resolve("lernen").unwrap(), Resolution::Stored("lernen".into()));
    let again = dict.load(Target::Stored("lernen".into()), &action, false, None).unwrap();
    assert_eq!(again.id, stored.id);
    assert_eq!(fetch.call_count(), 1);

    let table = dict.conjugation(&again, Some(Mood::Conditional)).unwrap();
    assert!(table.has_mood(Mood::Conditional));
}

#[derive(Default)]
struct Steps {
    total: usize,
    done: Vec<String>,
    finished: bool,
}

impl Progress for Steps {
    fn begin(&mut self, steps: usize) {
        self.total = steps;
    }
    fn step_done(&mut self, step: &str) {
        self.done.push(step.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn scrape_reports_each_step() {
    let fetch = FakeFetch::default().page("lernen", 200, fixture("verb.html"));
    let mut dict = dictionary(&fetch).with_generator(Box::new(FakeGenerator::replying(SENTENCES)));

    let mut steps = Steps::default();
    dict.scrape("lernen", true, Some(&mut steps)).unwrap();
    assert_eq!(steps.total, 4);
    assert_eq!(steps.done, ["fetch", "parse", "save", "sentences"]);
    assert!(steps.finished);
}

#[test]
fn failed_scrape_still_finishes_progress() {
    let fetch = FakeFetch::default().page("lernen", 429, "");
    let mut dict = dictionary(&fetch);

    let mut steps = Steps::default();
    assert!(dict.scrape("lernen", false, Some(&mut steps)).is_err());
    assert!(steps.done.is_empty());
    assert!(steps.finished);

    // a silent sink is accepted as well
    assert!(dict.scrape("lernen", false, Some(&mut NullProgress)).is_err());
}

#[test]
fn rate_limit_aborts_without_retry() {
    let fetch = FakeFetch::default().page("wahlen", 429, "");
    let mut dict = dictionary(&fetch);

    let err = dict.scrape("wahlen", false, None).unwrap_err();
    assert!(matches!(err, Error::RateLimited));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(fetch.call_count(), 1);
}

#[test]
fn non_200_retries_umlaut_spellings() {
    let fetch = FakeFetch::default().page("wählen", 200, fixture("verb.html"));
    let mut dict = dictionary(&fetch);

    let stored = dict.scrape("wahlen", false, None).unwrap();
    assert_eq!(stored.entry.headword, "lernen");
    assert_eq!(fetch.call_count(), 2);
}

#[test]
fn missing_headword_inserts_nothing() {
    let fetch = FakeFetch::default().page("xyzzy", 200, fixture("not_found.html"));
    let mut dict = dictionary(&fetch);

    let err = dict.scrape("xyzzy", false, None).unwrap_err();
    assert!(matches!(err, Error::NotFound(ref w) if w == "xyzzy"));
    assert_eq!(err.exit_code(), 1);
    assert!(dict.store().fuzzy_matches("xyzzy").unwrap().is_empty());
}

#[rstest]
#[case("noun.html", "Tisch", Action::Conjugation { mood: None })]
#[case("verb.html", "lernen", Action::Declension)]
fn category_mismatch_on_fresh_scrape(#[case] page: &str, #[case] word: &str, #[case] action: Action) {
    let fetch = FakeFetch::default().page(word, 200, fixture(page));
    let mut dict = dictionary(&fetch);

    let err = dict.load(Target::Online(word.into()), &action, false, None).unwrap_err();
    assert!(matches!(err, Error::CategoryMismatch { .. }));
    // the word itself is kept
    assert_eq!(dict.store().fuzzy_matches(word).unwrap().len(), 1);
}

#[test]
fn category_mismatch_on_stored_word_skips_network() {
    let fetch = FakeFetch::default().page("Tisch", 200, fixture("noun.html"));
    let mut dict = dictionary(&fetch);
    dict.scrape("Tisch", false, None).unwrap();

    let err = dict
        .load(Target::Stored("der Tisch".into()), &Action::Conjugation { mood: None }, false, None)
        .unwrap_err();
    assert!(matches!(err, Error::CategoryMismatch { requested: "conjugation", .. }));
    assert_eq!(fetch.call_count(), 1);
}

#[test]
fn declension_missing_is_exit_3() {
    let fetch = FakeFetch::default().page("Eltern", 200, fixture("noun_one_table.html"));
    let mut dict = dictionary(&fetch);

    let stored = dict.load(Target::Online("Eltern".into()), &Action::Declension, false, None).unwrap();
    let err = dict.declension(&stored).unwrap_err();
    assert!(matches!(err, Error::DeclensionUnavailable(_)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn sentences_generated_once_then_replaced() {
    let fetch = FakeFetch::default().page("lernen", 200, fixture("verb.html"));
    let generator = FakeGenerator::replying(SENTENCES);
    let mut dict = dictionary(&fetch).with_generator(Box::new(generator.clone()));

    let stored = dict.scrape("lernen", true, None).unwrap();
    assert_eq!(generator.words.borrow().as_slice(), ["lernen"]);

    let first = dict.sentences(&stored, false).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].target, "We learn together.");
    assert_eq!(generator.words.borrow().len(), 1);

    let replaced = dict.sentences(&stored, true).unwrap();
    assert_eq!(replaced, first);
    assert_eq!(generator.words.borrow().len(), 2);
}

#[test]
fn unparsable_sentences_keep_the_scraped_word() {
    let fetch = FakeFetch::default().page("lernen", 200, fixture("verb.html"));
    let generator = FakeGenerator::replying("Sorry, I cannot help with that.");
    let mut dict = dictionary(&fetch).with_generator(Box::new(generator));

    let err = dict.scrape("lernen", true, None).unwrap_err();
    assert!(matches!(err, Error::GenerationParse));
    assert_eq!(err.exit_code(), 4);
    assert!(dict.store().word_exists("lernen").unwrap());
}

#[test]
fn sentences_without_generator_need_an_api_key() {
    let fetch = FakeFetch::default().page("lernen", 200, fixture("verb.html"));
    let mut dict = dictionary(&fetch);
    let stored = dict.scrape("lernen", false, None).unwrap();

    let err = dict.sentences(&stored, false).unwrap_err();
    assert!(matches!(err, Error::MissingApiKey));
}

#[test]
fn replace_on_fresh_word_calls_generator_once() {
    let fetch = FakeFetch::default().page("lernen", 200, fixture("verb.html"));
    let generator = FakeGenerator::replying(SENTENCES);
    let mut dict = dictionary(&fetch).with_generator(Box::new(generator.clone()));

    let action = Action::Sentences { replace: true };
    let stored = dict.load(Target::Online("lernen".into()), &action, true, None).unwrap();
    assert!(generator.words.borrow().is_empty());

    let sentences = dict.sentences(&stored, true).unwrap();
    assert_eq!(sentences.len(), 2);
    assert_eq!(generator.words.borrow().as_slice(), ["lernen"]);
}

#[test]
fn verb_without_readable_tables_is_exit_3() {
    let fetch = FakeFetch::default().page("rennen", 200, fixture("verb_short_tables.html"));
    let mut dict = dictionary(&fetch);

    let action = Action::Conjugation { mood: None };
    let stored = dict.load(Target::Online("rennen".into()), &action, false, None).unwrap();
    assert_eq!(stored.entry.pos, PartOfSpeech::Verb);

    let err = dict.conjugation(&stored, None).unwrap_err();
    assert!(matches!(err, Error::ConjugationUnavailable(ref w) if w == "rennen"));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn absent_mood_is_reported() {
    let page = fixture("verb.html").replace("<h2>Subjunctive</h2>", "<h2>Examples</h2>");
    let fetch = FakeFetch::default().page("lernen", 200, page);
    let mut dict = dictionary(&fetch);

    let action = Action::Conjugation { mood: Some(Mood::Subjunctive) };
    let stored = dict.load(Target::Online("lernen".into()), &action, false, None).unwrap();

    let err = dict.conjugation(&stored, Some(Mood::Subjunctive)).unwrap_err();
    assert!(matches!(err, Error::MoodUnavailable(Mood::Subjunctive)));
    assert_eq!(err.exit_code(), 3);
    assert!(dict.conjugation(&stored, Some(Mood::Indicative)).is_ok());
}
