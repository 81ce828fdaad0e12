// src/config/consts.rs

// Net config
pub const LOOKUP_URL: &str = "https://www.verbformen.com/";
pub const LOOKUP_PARAM: &str = "w";
pub const PRONUNCIATION_URL: &str = "https://forvo.com/word/";
pub const USER_AGENT: &str = "german_dict/0.4";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Page selectors
pub const HEADWORD_SELECTOR: &str = "p.vGrnd.rCntr";
pub const DESCRIPTOR_SELECTOR: &str = "p.rInf";
pub const SECTION_SELECTOR: &str = "section.rBox";
pub const SECTION_HEADER_SELECTOR: &str = "header h2";
pub const TENSE_BLOCK_SELECTOR: &str = "div.vTbl";
pub const FIRST_TENSE_HEADING: &str = "h2";
pub const TENSE_HEADING: &str = "h3";
pub const ROW_SELECTOR: &str = "table tr";
pub const CELL_SELECTOR: &str = "td";
pub const DECLENSION_SELECTOR: &str = "div.rAufZu > div.vDkl > div.vTbl";
pub const DECLENSION_TABLE_SELECTOR: &str = "table";
pub const CASE_HEADER_SELECTOR: &str = "th[title]";
pub const DEFINITION_SELECTOR: &str = "div.rAufZu > p.rDef";

// Local store
pub const DATA_DIR_NAME: &str = "german-dict";
pub const DB_FILE: &str = "dictionary.db";

// Logging
pub const LOG_FILE: &str = "debug.log";
pub const LOG_ENV: &str = "GERMAN_DICT_LOG";
pub const LOG_DEFAULT_FILTER: &str = "info";

// Sentence generation
pub const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f64 = 1.0;
pub const MAX_TOKENS: u32 = 256;
pub const SENTENCE_COUNT: usize = 5;
