//! Word pair catalog
//!
//! This module holds the fixed catalog of civilian/undercover word pairs
//! and supplies one pair per round, drawn uniformly at random. Civilians
//! all see the same word, undercover players see the decoy, and Mr. White
//! sees no word at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pair of closely related words, one per side of the table
///
/// The civilian word is the "real" word; the undercover word is a decoy
/// similar enough that an undercover player can blend into the discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    /// Word shown to every civilian
    pub civilian_word: String,
    /// Decoy word shown to every undercover player
    pub undercover_word: String,
}

impl WordPair {
    /// Creates a word pair from a civilian word and an undercover decoy
    pub fn new(civilian_word: impl Into<String>, undercover_word: impl Into<String>) -> Self {
        Self {
            civilian_word: civilian_word.into(),
            undercover_word: undercover_word.into(),
        }
    }
}

/// The fixed catalog of word pairs, as (civilian, undercover) entries
pub const WORD_PAIRS: &[(&str, &str)] = &[
    ("coke", "fanta"),
    ("cherry", "strawberry"),
    ("dog", "cat"),
    ("burger", "pizza"),
    ("tea", "coffee"),
    ("winter", "summer"),
    ("magazine", "book"),
    ("motorcycle", "car"),
    ("orange", "apple"),
    ("mountain", "beach"),
];

/// Errors that can occur when drawing a word pair
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The catalog contains no word pairs
    #[error("word catalog is empty")]
    EmptyCatalog,
}

/// Draws one word pair uniformly at random from the fixed catalog
///
/// # Errors
///
/// Returns [`Error::EmptyCatalog`] if the catalog is empty.
pub fn pick_random_pair() -> Result<WordPair, Error> {
    pick_from(WORD_PAIRS)
}

fn pick_from(catalog: &[(&str, &str)]) -> Result<WordPair, Error> {
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    let (civilian, undercover) = catalog[fastrand::usize(..catalog.len())];
    Ok(WordPair::new(civilian, undercover))
}
