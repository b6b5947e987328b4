//! Level generation: choosing a target word and describing which words can
//! be spelled from its letters.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::dictionary::DictionaryIndex;
use crate::errors::LevelError;
use crate::search::SubWordSearch;

/// Letter multiset of a word: how many times each character occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFrequencyMap {
    counts: HashMap<char, usize>,
}

impl CharFrequencyMap {
    pub fn from_word(word: &str) -> Self {
        let mut counts = HashMap::new();
        for ch in word.chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of `ch`; zero for characters not in the word.
    pub fn count(&self, ch: char) -> usize {
        self.counts.get(&ch).copied().unwrap_or(0)
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// True when no character of `word` is needed more often than it is
    /// available here. This is a multiset test: "see" is not spellable
    /// from "sea".
    pub fn can_spell(&self, word: &str) -> bool {
        let mut ascii_used = [0usize; 128];
        for (i, ch) in word.char_indices() {
            let needed = if ch.is_ascii() {
                let slot = &mut ascii_used[ch as usize];
                *slot += 1;
                *slot
            } else {
                // Count each non-ASCII char once, at its first occurrence.
                if word[..i].contains(ch) {
                    continue;
                }
                word[i..].chars().filter(|&c| c == ch).count()
            };
            if needed > self.count(ch) {
                return false;
            }
        }
        true
    }
}

/// Spellability of `word` from the letters in `map`.
pub fn is_spellable(word: &str, map: &CharFrequencyMap) -> bool {
    map.can_spell(word)
}

/// How the target word of a level is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelRequest {
    /// Draw uniformly from all long words.
    #[default]
    Random,
    /// Use the long word at this index.
    Index(usize),
}

impl LevelRequest {
    /// The level number to record, `None` for random levels.
    pub fn level_number(self) -> Option<usize> {
        match self {
            LevelRequest::Random => None,
            LevelRequest::Index(ndx) => Some(ndx),
        }
    }
}

/// One puzzle: a target word and the sorted words spellable from it.
///
/// `sub_words` stays empty until the [`SubWordSearch`] driving this level
/// completes; check [`WordLevel::is_complete`] before using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLevel {
    level_number: Option<usize>,
    target_word_index: usize,
    target_word: String,
    char_frequency_map: CharFrequencyMap,
    pub(crate) sub_words: Vec<String>,
    pub(crate) complete: bool,
}

impl WordLevel {
    pub fn new(level_number: Option<usize>, target_word_index: usize, target_word: &str) -> Self {
        Self {
            level_number,
            target_word_index,
            target_word: target_word.to_string(),
            char_frequency_map: CharFrequencyMap::from_word(target_word),
            sub_words: Vec::new(),
            complete: false,
        }
    }

    pub fn level_number(&self) -> Option<usize> {
        self.level_number
    }

    pub fn target_word_index(&self) -> usize {
        self.target_word_index
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn char_frequency_map(&self) -> &CharFrequencyMap {
        &self.char_frequency_map
    }

    pub fn sub_words(&self) -> &[String] {
        &self.sub_words
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn can_spell(&self, word: &str) -> bool {
        self.char_frequency_map.can_spell(word)
    }
}

impl fmt::Display for WordLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level_number {
            Some(n) => write!(f, "level {n}")?,
            None => write!(f, "random level")?,
        }
        write!(
            f,
            ": {} ({} sub-words)",
            self.target_word,
            self.sub_words.len()
        )
    }
}

/// Creates levels against a shared, finished dictionary.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    index: Arc<DictionaryIndex>,
}

impl LevelGenerator {
    pub fn new(index: Arc<DictionaryIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Arc<DictionaryIndex> {
        &self.index
    }

    /// Create a level using the thread-local RNG for random requests.
    pub fn create_level(&self, request: LevelRequest) -> Result<WordLevel, LevelError> {
        self.create_level_with_rng(request, &mut rand::thread_rng())
    }

    /// Create a level without searching for its sub-words.
    pub fn create_level_with_rng(
        &self,
        request: LevelRequest,
        rng: &mut impl Rng,
    ) -> Result<WordLevel, LevelError> {
        let len = self.index.long_word_count();
        let ndx = match request {
            LevelRequest::Random => {
                if len == 0 {
                    return Err(LevelError::EmptyDictionary);
                }
                rng.gen_range(0..len)
            }
            LevelRequest::Index(ndx) => ndx,
        };
        let word = self
            .index
            .long_word(ndx)
            .ok_or(LevelError::IndexOutOfRange { index: ndx, len })?;

        log::debug!("target word #{ndx}: {word}");
        Ok(WordLevel::new(request.level_number(), ndx, word))
    }

    /// Create a level and the search that will fill in its sub-words.
    ///
    /// The level is available right away through [`SubWordSearch::level`],
    /// but its sub-words are only final once the search completes.
    pub fn make_word_level(
        &self,
        request: LevelRequest,
        rng: &mut impl Rng,
    ) -> Result<SubWordSearch, LevelError> {
        let level = self.create_level_with_rng(request, rng)?;
        Ok(SubWordSearch::new(level, Arc::clone(&self.index)))
    }
}
