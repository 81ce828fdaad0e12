// src/store/mod.rs
//! Local SQLite store: words, their tables, definitions and example sentences.
//!
//! A word row is written once and never rewritten; its conjugation cells,
//! declension row and definition link hang off its id. Reference tables
//! (types, genders, moods) are seeded on open.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::model::{
    Auxiliary, CellKey, ConjugationTable, DeclensionTable, ExampleSentence, Gender, Mood,
    Number, PartOfSpeech, Regularity, Tense, WordEntry,
};
use crate::specs::page::ScrapedWord;
use crate::Result;

const SCHEMA: &str = include_str!("schema.sql");

/// A stored word as returned by the fuzzy search.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordRef {
    pub id: i64,
    pub text: String,
}

/// A stored word with its row id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredEntry {
    pub id: i64,
    pub entry: WordEntry,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file, creating its directory as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        init(&conn)?;
        logd!("store open at {} (journal: {mode})", path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        init(&conn)?;
        Ok(Self { conn })
    }

    pub fn word_exists(&self, text: &str) -> Result<bool> {
        Ok(word_id(&self.conn, text)?.is_some())
    }

    /// Stored words matching `query` as a prefix or as a space-separated part.
    /// Ordered shortest first, then lexicographically.
    pub fn fuzzy_matches(&self, query: &str) -> Result<Vec<WordRef>> {
        let q = escape_like(query.trim());
        if q.is_empty() {
            return Ok(Vec::new());
        }
        let patterns = [
            format!("{q}%"),
            format!("% {q}"),
            format!("{q} %"),
            format!("% {q} %"),
        ];

        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, word FROM words WHERE word LIKE ?1 ESCAPE '\\'")?;
        let mut found = BTreeSet::new();
        for pattern in &patterns {
            let rows = stmt.query_map(params![pattern], |row| {
                Ok(WordRef { id: row.get(0)?, text: row.get(1)? })
            })?;
            for row in rows {
                found.insert(row?);
            }
        }

        let mut out: Vec<WordRef> = found.into_iter().collect();
        out.sort_by(|a, b| {
            a.text
                .chars()
                .count()
                .cmp(&b.text.chars().count())
                .then_with(|| a.text.cmp(&b.text))
        });
        Ok(out)
    }

    pub fn insert_definition(&self, text: &str) -> Result<i64> {
        insert_definition(&self.conn, text)
    }

    pub fn insert_word(&self, entry: &WordEntry, definition_id: Option<i64>) -> Result<i64> {
        insert_word(&self.conn, entry, definition_id)
    }

    pub fn insert_conjugation_cell(
        &self,
        word_id: i64,
        mood: Mood,
        tense: Tense,
        key: CellKey,
        form: &str,
    ) -> Result<()> {
        insert_conjugation_cell(&self.conn, word_id, mood, tense, key, form)
    }

    pub fn insert_declension_row(&self, word_id: i64, table: &DeclensionTable) -> Result<()> {
        insert_declension_row(&self.conn, word_id, table)
    }

    /// Append sentences for a word, or swap out the stored set when `replace` is set.
    pub fn insert_sentences(
        &mut self,
        word_id: i64,
        sentences: &[ExampleSentence],
        replace: bool,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        if replace {
            let n = tx.execute("DELETE FROM sentences WHERE word_id = ?1", params![word_id])?;
            logd!("dropped {n} sentence(s) of word {word_id}");
        }
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO sentences (word_id, source, target) VALUES (?1, ?2, ?3)",
            )?;
            for s in sentences {
                stmt.execute(params![word_id, s.source, s.target])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Persist one scraped page in a single transaction. Returns the word id.
    /// A word that is already stored keeps its row; missing cells are filled in.
    pub fn save_scraped(&mut self, scraped: &ScrapedWord) -> Result<i64> {
        let tx = self.conn.transaction()?;

        let definition_id = match scraped.entry.definition.as_deref() {
            Some(text) => Some(insert_definition(&tx, text)?),
            None => None,
        };
        let word_id = insert_word(&tx, &scraped.entry, definition_id)?;

        let mut cells = 0usize;
        if let Some(table) = &scraped.conjugation {
            for (mood, tense, key, form) in table.cells() {
                insert_conjugation_cell(&tx, word_id, mood, tense, key, form)?;
                cells += 1;
            }
        }
        if let Some(table) = &scraped.declension {
            insert_declension_row(&tx, word_id, table)?;
        }

        tx.commit()?;
        logf!(
            "saved '{}' as word {word_id} ({cells} conjugation cell(s), declension: {})",
            scraped.entry.headword,
            scraped.declension.is_some()
        );
        Ok(word_id)
    }

    pub fn entry(&self, text: &str) -> Result<Option<StoredEntry>> {
        let row = self
            .conn
            .query_row(
                "SELECT w.id, w.word, t.type, g.gender, w.auxiliary, w.regular, w.separable, d.definition
                 FROM words w
                 JOIN types t ON t.id = w.type_id
                 LEFT JOIN genders g ON g.id = w.gender_id
                 LEFT JOIN definitions d ON d.id = w.definition_id
                 WHERE w.word = ?1",
                params![text],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<bool>>(5)?,
                        row.get::<_, Option<bool>>(6)?,
                        row.get::<_, Option<String>>(7)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, word, pos, gender, auxiliary, regular, separable, definition)) = row else {
            return Ok(None);
        };

        let mut entry = WordEntry::new(word, PartOfSpeech::from_name(&pos).unwrap_or(PartOfSpeech::Other));
        entry.gender = gender.as_deref().and_then(Gender::from_name);
        entry.auxiliary = auxiliary.as_deref().and_then(Auxiliary::from_name);
        entry.regularity = regular.map(|r| if r { Regularity::Regular } else { Regularity::Irregular });
        entry.separable = separable;
        entry.definition = definition;
        Ok(Some(StoredEntry { id, entry }))
    }

    /// Stored cells of a word. Tenses with nothing stored stay empty.
    pub fn conjugation(&self, word_id: i64) -> Result<ConjugationTable> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT m.mood, c.tense, c.person, c.form
             FROM conjugations c
             JOIN moods m ON m.id = c.mood_id
             WHERE c.word_id = ?1",
        )?;
        let rows = stmt.query_map(params![word_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut table = ConjugationTable::new();
        for row in rows {
            let (mood, tense, person, form) = row?;
            let parsed = Mood::from_name(&mood).and_then(|m| {
                Some((m, Tense::from_name(&tense)?, CellKey::parse(&person)?))
            });
            match parsed {
                Some((m, t, k)) => table.insert(m, t, k, form),
                None => logw!("ignoring stored cell {mood}/{tense}/{person} of word {word_id}"),
            }
        }
        Ok(table)
    }

    pub fn declension(&self, word_id: i64) -> Result<Option<DeclensionTable>> {
        let row = self
            .conn
            .query_row(
                "SELECT nom_sg, gen_sg, dat_sg, acc_sg, nom_pl, gen_pl, dat_pl, acc_pl
                 FROM declensions WHERE word_id = ?1",
                params![word_id],
                |row| {
                    let sg = [row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?];
                    let pl = [row.get(4)?, row.get(5)?, row.get(6)?, row.get(7)?];
                    Ok(DeclensionTable::new(sg, pl))
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Stored sentences in insertion order.
    pub fn sentences(&self, word_id: i64) -> Result<Vec<ExampleSentence>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT source, target FROM sentences WHERE word_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![word_id], |row| {
            Ok(ExampleSentence::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Schema plus reference rows. Safe to run on every open.
fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    for pos in PartOfSpeech::ALL {
        conn.execute("INSERT OR IGNORE INTO types (type) VALUES (?1)", params![pos.as_str()])?;
    }
    for gender in Gender::ALL {
        conn.execute("INSERT OR IGNORE INTO genders (gender) VALUES (?1)", params![gender.as_str()])?;
    }
    for mood in Mood::ALL {
        conn.execute("INSERT OR IGNORE INTO moods (mood) VALUES (?1)", params![mood.as_str()])?;
    }
    Ok(())
}

fn word_id(conn: &Connection, text: &str) -> Result<Option<i64>> {
    Ok(conn
        .query_row("SELECT id FROM words WHERE word = ?1", params![text], |row| row.get(0))
        .optional()?)
}

/// Id of the definition text, inserting it when new.
fn insert_definition(conn: &Connection, text: &str) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO definitions (definition) VALUES (?1)",
        params![text],
    )?;
    Ok(conn.query_row(
        "SELECT id FROM definitions WHERE definition = ?1",
        params![text],
        |row| row.get(0),
    )?)
}

/// Id of the word, inserting it when new. An existing row is left as is,
/// except that a missing definition link gets filled in.
fn insert_word(conn: &Connection, entry: &WordEntry, definition_id: Option<i64>) -> Result<i64> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO words
            (word, type_id, gender_id, auxiliary, regular, separable, definition_id)
         VALUES (
            ?1,
            (SELECT id FROM types WHERE type = ?2),
            (SELECT id FROM genders WHERE gender = ?3),
            ?4, ?5, ?6, ?7
         )",
        params![
            entry.headword,
            entry.pos.as_str(),
            entry.gender.map(|g| g.as_str()),
            entry.auxiliary.map(|a| a.as_str()),
            entry.regularity.map(|r| r == Regularity::Regular),
            entry.separable,
            definition_id,
        ],
    )?;

    if inserted == 0 {
        if let Some(def) = definition_id {
            conn.execute(
                "UPDATE words SET definition_id = ?1 WHERE word = ?2 AND definition_id IS NULL",
                params![def, entry.headword],
            )?;
        }
        logd!("'{}' already stored", entry.headword);
    }

    Ok(conn.query_row(
        "SELECT id FROM words WHERE word = ?1",
        params![entry.headword],
        |row| row.get(0),
    )?)
}

/// No-op when the cell is already stored.
fn insert_conjugation_cell(
    conn: &Connection,
    word_id: i64,
    mood: Mood,
    tense: Tense,
    key: CellKey,
    form: &str,
) -> Result<()> {
    conn.prepare_cached(
        "INSERT OR IGNORE INTO conjugations (word_id, mood_id, tense, person, form)
         VALUES (?1, (SELECT id FROM moods WHERE mood = ?2), ?3, ?4, ?5)",
    )?
    .execute(params![word_id, mood.as_str(), tense.as_str(), key.to_string(), form])?;
    Ok(())
}

/// No-op when the word already has a declension row.
fn insert_declension_row(conn: &Connection, word_id: i64, table: &DeclensionTable) -> Result<()> {
    let sg = table.row(Number::Singular);
    let pl = table.row(Number::Plural);
    conn.execute(
        "INSERT OR IGNORE INTO declensions
            (word_id, nom_sg, gen_sg, dat_sg, acc_sg, nom_pl, gen_pl, dat_pl, acc_pl)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![word_id, sg[0], sg[1], sg[2], sg[3], pl[0], pl[1], pl[2], pl[3]],
    )?;
    Ok(())
}

/// Make `%`, `_` and the escape char literal inside a LIKE pattern.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
