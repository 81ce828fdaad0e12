// src/model/conjugation.rs
use std::collections::BTreeMap;
use std::fmt;

use crate::core::sanitize::normalize_ws;

vocabulary! {
    Mood {
        Simple => "simple",
        Indicative => "indicative",
        Subjunctive => "subjunctive",
        Conditional => "conditional",
        Imperative => "imperative",
        InfinitiveParticiple => "infinitive/participle",
    }
}

vocabulary! {
    Tense {
        Present => "present",
        Imperfect => "imperfect",
        Imperative => "imperative",
        PresentSubjunctive => "present subj.",
        ImperfectSubjunctive => "imperf. subj.",
        Infinitive => "infinitive",
        Participle => "participle",
        Perfect => "perfect",
        Pluperfect => "pluperfect",
        Future => "future",
        FuturePerfect => "future perfect",
        Past => "past",
        Infinitive1 => "infinitive 1",
        Infinitive2 => "infinitive 2",
        Participle1 => "participle 1",
        Participle2 => "participle 2",
    }
}

vocabulary! {
    Pronoun {
        Ich => "ich",
        Du => "du",
        Er => "er",
        Wir => "wir",
        Ihr => "ihr",
        Sie => "sie",
    }
}

const SIMPLE: &[Tense] = &[
    Tense::Present,
    Tense::Imperfect,
    Tense::Imperative,
    Tense::PresentSubjunctive,
    Tense::ImperfectSubjunctive,
    Tense::Infinitive,
    Tense::Participle,
];

const COMPOUND: &[Tense] = &[
    Tense::Present,
    Tense::Imperfect,
    Tense::Perfect,
    Tense::Pluperfect,
    Tense::Future,
    Tense::FuturePerfect,
];

const CONDITIONAL: &[Tense] = &[Tense::Present, Tense::Past];

const IMPERATIVE: &[Tense] = &[Tense::Present];

const NON_FINITE: &[Tense] = &[
    Tense::Infinitive1,
    Tense::Infinitive2,
    Tense::Participle1,
    Tense::Participle2,
];

impl Mood {
    /// Tenses this mood carries, in page order.
    pub fn tenses(&self) -> &'static [Tense] {
        match self {
            Mood::Simple => SIMPLE,
            Mood::Indicative | Mood::Subjunctive => COMPOUND,
            Mood::Conditional => CONDITIONAL,
            Mood::Imperative => IMPERATIVE,
            Mood::InfinitiveParticiple => NON_FINITE,
        }
    }

    /// Mood from a section heading.
    /// Anything mentioning "conditional" is the conditional, whatever qualifier follows it.
    pub fn from_heading(text: &str) -> Option<Self> {
        let lc = normalize_ws(&text.to_lowercase());
        if lc.contains("conditional") {
            return Some(Mood::Conditional);
        }
        let compact = lc.replace(" / ", "/").replace("/ ", "/").replace(" /", "/");
        let head = compact.split('(').next().unwrap_or_default().trim();
        Mood::from_name(head.trim_end_matches(':'))
    }

    /// Lenient parse for user input ("infinitive" and "participle" both mean the non-finite mood).
    pub fn from_user(text: &str) -> Option<Self> {
        let lc = text.trim().to_lowercase();
        match lc.as_str() {
            "infinitive" | "participle" | "non-finite" => Some(Mood::InfinitiveParticiple),
            _ => Mood::from_heading(&lc),
        }
    }
}

impl Tense {
    /// Tense from a tense-block heading, interpreted within `mood`.
    /// Returns `None` for labels that are unknown or do not belong to the mood.
    pub fn from_heading(mood: Mood, text: &str) -> Option<Self> {
        let label = normalize_ws(&text.to_lowercase());
        let label = label.trim_end_matches(':');

        let tense = match mood {
            Mood::Conditional => match label {
                "present" | "imperf. subj." | "imperfect subjunctive" => Tense::Present,
                "past" | "pluperf. subj." | "pluperfect subjunctive" => Tense::Past,
                _ => return None,
            },
            // The site labels these "Present Subj.", "Perf. Subj." and so on.
            Mood::Subjunctive => {
                let base = label.trim_end_matches("subjunctive").trim_end_matches("subj.").trim();
                match base {
                    "present" => Tense::Present,
                    "imperf." | "imperfect" => Tense::Imperfect,
                    "perf." | "perfect" => Tense::Perfect,
                    "pluperf." | "pluperfect" => Tense::Pluperfect,
                    "future" | "future i" | "fut." => Tense::Future,
                    "future perfect" | "future ii" | "fut. perf." => Tense::FuturePerfect,
                    _ => return None,
                }
            }
            Mood::InfinitiveParticiple => match label {
                "infinitive 1" | "infinitive i" | "zu-infinitive" => Tense::Infinitive1,
                "infinitive 2" | "infinitive ii" => Tense::Infinitive2,
                "participle 1" | "participle i" | "present participle" => Tense::Participle1,
                "participle 2" | "participle ii" | "past participle" => Tense::Participle2,
                _ => return None,
            },
            _ => match label {
                "present" => Tense::Present,
                "imperfect" | "preterite" | "past tense" => Tense::Imperfect,
                "imperative" => Tense::Imperative,
                "present subj." | "present subjunctive" | "subjunctive i" => Tense::PresentSubjunctive,
                "imperf. subj." | "imperfect subjunctive" | "subjunctive ii" => Tense::ImperfectSubjunctive,
                "infinitive" => Tense::Infinitive,
                "participle" => Tense::Participle,
                "perfect" => Tense::Perfect,
                "pluperfect" | "pluperf." | "past perfect" => Tense::Pluperfect,
                "future" | "future i" => Tense::Future,
                "future perfect" | "future ii" => Tense::FuturePerfect,
                _ => return None,
            },
        };

        mood.tenses().contains(&tense).then_some(tense)
    }
}

/// Row key inside one tense table: a personal pronoun, or a row position for
/// non-personal forms (infinitives, participles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellKey {
    Person(Pronoun),
    Index(usize),
}

impl CellKey {
    /// Inverse of `Display`: "ich" → Person, "0" → Index.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(p) = Pronoun::from_name(s) {
            return Some(CellKey::Person(p));
        }
        s.parse::<usize>().ok().map(CellKey::Index)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKey::Person(p) => f.write_str(p.as_str()),
            CellKey::Index(i) => write!(f, "{i}"),
        }
    }
}

pub type Forms = BTreeMap<CellKey, String>;

/// Mood → tense → key → surface form.
///
/// A fresh table already holds every (mood, tense) pair the site can show,
/// each with no forms, so lookups never have to special-case missing tenses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConjugationTable {
    moods: BTreeMap<Mood, BTreeMap<Tense, Forms>>,
}

impl Default for ConjugationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ConjugationTable {
    pub fn new() -> Self {
        let moods = Mood::ALL
            .iter()
            .map(|m| (*m, m.tenses().iter().map(|t| (*t, Forms::new())).collect()))
            .collect();
        Self { moods }
    }

    /// Last write wins.
    pub fn insert(&mut self, mood: Mood, tense: Tense, key: CellKey, form: impl Into<String>) {
        self.moods
            .entry(mood)
            .or_default()
            .entry(tense)
            .or_default()
            .insert(key, form.into());
    }

    pub fn set_forms(&mut self, mood: Mood, tense: Tense, forms: Forms) {
        self.moods.entry(mood).or_default().insert(tense, forms);
    }

    pub fn forms(&self, mood: Mood, tense: Tense) -> Option<&Forms> {
        self.moods.get(&mood)?.get(&tense)
    }

    pub fn get(&self, mood: Mood, tense: Tense, key: CellKey) -> Option<&str> {
        self.forms(mood, tense)?.get(&key).map(String::as_str)
    }

    pub fn tenses(&self, mood: Mood) -> impl Iterator<Item = (Tense, &Forms)> {
        self.moods
            .get(&mood)
            .into_iter()
            .flat_map(|tenses| tenses.iter().map(|(t, f)| (*t, f)))
    }

    /// Imperative/present is the same table as simple/imperative.
    pub fn alias_imperative(&mut self) {
        let simple = self
            .forms(Mood::Simple, Tense::Imperative)
            .cloned()
            .unwrap_or_default();
        self.set_forms(Mood::Imperative, Tense::Present, simple);
    }

    /// Every populated cell, in (mood, tense, key) order.
    pub fn cells(&self) -> impl Iterator<Item = (Mood, Tense, CellKey, &str)> {
        self.moods.iter().flat_map(|(mood, tenses)| {
            tenses.iter().flat_map(move |(tense, forms)| {
                forms.iter().map(move |(key, form)| (*mood, *tense, *key, form.as_str()))
            })
        })
    }

    pub fn has_mood(&self, mood: Mood) -> bool {
        self.tenses(mood).any(|(_, forms)| !forms.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_seeded_and_empty() {
        let t = ConjugationTable::new();
        assert!(t.is_empty());
        assert!(t.forms(Mood::Indicative, Tense::FuturePerfect).is_some());
        assert!(t.forms(Mood::Conditional, Tense::Past).is_some());
        assert!(t.forms(Mood::Imperative, Tense::Perfect).is_none());
    }

    #[test]
    fn insert_is_last_write_wins() {
        let mut t = ConjugationTable::new();
        let key = CellKey::Person(Pronoun::Ich);
        t.insert(Mood::Indicative, Tense::Present, key, "lerne");
        t.insert(Mood::Indicative, Tense::Present, key, "lern");
        assert_eq!(t.get(Mood::Indicative, Tense::Present, key), Some("lern"));
        assert_eq!(t.cell_count(), 1);
    }

    #[test]
    fn imperative_alias_copies_simple_imperative() {
        let mut t = ConjugationTable::new();
        t.insert(Mood::Simple, Tense::Imperative, CellKey::Person(Pronoun::Du), "lern(e)");
        t.alias_imperative();
        assert_eq!(
            t.forms(Mood::Imperative, Tense::Present),
            t.forms(Mood::Simple, Tense::Imperative)
        );
    }

    #[test]
    fn mood_headings() {
        assert_eq!(Mood::from_heading("Indicative"), Some(Mood::Indicative));
        assert_eq!(Mood::from_heading("Conditional (Konjunktiv II - würde)"), Some(Mood::Conditional));
        assert_eq!(Mood::from_heading("Infinitive / Participle"), Some(Mood::InfinitiveParticiple));
        assert_eq!(Mood::from_heading("Examples"), None);
        assert_eq!(Mood::from_user("participle"), Some(Mood::InfinitiveParticiple));
    }

    #[test]
    fn tense_headings_are_mood_aware() {
        assert_eq!(Tense::from_heading(Mood::Simple, "Imperf. Subj."), Some(Tense::ImperfectSubjunctive));
        assert_eq!(Tense::from_heading(Mood::Indicative, "Future II"), Some(Tense::FuturePerfect));
        assert_eq!(Tense::from_heading(Mood::Indicative, "Imperative"), None);
        assert_eq!(Tense::from_heading(Mood::Conditional, "Pluperf. Subj."), Some(Tense::Past));
        assert_eq!(Tense::from_heading(Mood::Conditional, "Imperf. Subj."), Some(Tense::Present));
        assert_eq!(Tense::from_heading(Mood::InfinitiveParticiple, "Participle II"), Some(Tense::Participle2));
    }

    #[test]
    fn subjunctive_labels_map_onto_compound_tenses() {
        let cases = [
            ("Present Subj.", Tense::Present),
            ("Imperf. Subj.", Tense::Imperfect),
            ("Perf. Subj.", Tense::Perfect),
            ("Pluperf. Subj.", Tense::Pluperfect),
            ("Future Subj.", Tense::Future),
            ("Future II Subj.", Tense::FuturePerfect),
            ("Present", Tense::Present),
        ];
        for (label, tense) in cases {
            assert_eq!(Tense::from_heading(Mood::Subjunctive, label), Some(tense), "{label}");
        }
        assert_eq!(Tense::from_heading(Mood::Subjunctive, "Imperative"), None);
    }

    #[test]
    fn conditional_rejects_unrelated_blocks() {
        assert_eq!(Tense::from_heading(Mood::Conditional, "Present"), Some(Tense::Present));
        assert_eq!(Tense::from_heading(Mood::Conditional, "Past"), Some(Tense::Past));
        assert_eq!(Tense::from_heading(Mood::Conditional, "Examples"), None);
        assert_eq!(Tense::from_heading(Mood::Conditional, "Future I"), None);
    }

    #[test]
    fn cell_keys_parse_their_display() {
        for key in [CellKey::Person(Pronoun::Wir), CellKey::Index(3)] {
            assert_eq!(CellKey::parse(&key.to_string()), Some(key));
        }
        assert_eq!(CellKey::parse("es"), None);
    }
}
