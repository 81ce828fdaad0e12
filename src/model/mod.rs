// src/model/mod.rs
//! Typed shapes of everything the dictionary scrapes and stores.
//!
//! Closed vocabularies (moods, tenses, cases, …) are enums with a fixed
//! storage name each; `from_name` is the inverse of `as_str` and is what the
//! store uses when reading rows back.

/// Closed vocabulary enum with a storage name per variant.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn from_name(s: &str) -> Option<Self> {
                match s {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

pub mod conjugation;
pub mod declension;
pub mod sentence;
pub mod word;

pub use conjugation::{CellKey, ConjugationTable, Forms, Mood, Pronoun, Tense};
pub use declension::{Case, DeclensionTable, Number};
pub use sentence::ExampleSentence;
pub use word::{bare_headword, Auxiliary, Gender, PartOfSpeech, Regularity, WordEntry};
