//! Sub-word search.
//!
//! Scans the dictionary's valid words in order, keeps the ones spellable
//! from the level's target word, then orders the result by length with
//! alphabetical order inside each length group.

use std::sync::Arc;

use rayon::prelude::*;

use crate::dictionary::DictionaryIndex;
use crate::errors::LevelError;
use crate::level::WordLevel;
use crate::scan::{CancelToken, Completion, ResumableScan, ScanProgress, ScanStatus};

/// Stable sort by character count. Words of equal length keep their
/// relative order, so sorting alphabetically first yields length groups
/// that are each alphabetical.
pub fn sort_words_by_length(words: &mut [String]) {
    words.par_sort_by_key(|w| w.chars().count());
}

/// Resumable search filling in a [`WordLevel`]'s sub-words.
#[derive(Debug)]
pub struct SubWordSearch {
    index: Arc<DictionaryIndex>,
    level: WordLevel,
    cursor: usize,
    batches: usize,
    status: Option<ScanStatus>,
    cancel: Option<CancelToken>,
    on_complete: Completion<WordLevel>,
}

impl SubWordSearch {
    pub fn new(level: WordLevel, index: Arc<DictionaryIndex>) -> Self {
        Self {
            index,
            level,
            cursor: 0,
            batches: 0,
            status: None,
            cancel: None,
            on_complete: Completion::new(),
        }
    }

    /// Register the search-complete listener. It is handed the finished
    /// level exactly once, after sorting.
    pub fn on_search_complete<F>(&mut self, listener: F)
    where
        F: FnOnce(&WordLevel) + 'static,
    {
        self.on_complete.set_listener(listener);
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The level being searched. Its sub-words are partial and unsorted
    /// until the search completes.
    pub fn level(&self) -> &WordLevel {
        &self.level
    }

    pub fn is_complete(&self) -> bool {
        self.status == Some(ScanStatus::Complete)
    }

    /// Batches processed so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Hand back the finished level.
    pub fn into_level(self) -> Result<WordLevel, LevelError> {
        if self.is_complete() {
            Ok(self.level)
        } else {
            Err(LevelError::SearchIncomplete)
        }
    }

    fn finish(&mut self) {
        let sub_words = &mut self.level.sub_words;
        sub_words.par_sort();
        sort_words_by_length(sub_words);
        self.level.complete = true;
        self.status = Some(ScanStatus::Complete);

        log::info!(
            "found {} sub-words of '{}' in {} batches",
            self.level.sub_words.len(),
            self.level.target_word(),
            self.batches
        );
        self.on_complete.fire(&self.level);
    }
}

impl ResumableScan for SubWordSearch {
    fn resume_batch(&mut self, n: usize) -> ScanStatus {
        if let Some(status) = self.status {
            return status;
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::debug!("sub-word search cancelled at word {}", self.cursor);
            self.status = Some(ScanStatus::Cancelled);
            return ScanStatus::Cancelled;
        }

        let words = self.index.words();
        let end = self.cursor.saturating_add(n.max(1)).min(words.len());
        let map = self.level.char_frequency_map();
        // Indexed parallel collect keeps scan order.
        let found: Vec<String> = words[self.cursor..end]
            .par_iter()
            .filter(|w| map.can_spell(w))
            .cloned()
            .collect();
        self.level.sub_words.extend(found);
        self.cursor = end;
        self.batches += 1;
        log::debug!(
            "searched {}/{} words, {} spellable so far",
            self.cursor,
            words.len(),
            self.level.sub_words.len()
        );

        if self.cursor >= words.len() {
            self.finish();
            ScanStatus::Complete
        } else {
            ScanStatus::Yielded
        }
    }

    fn progress(&self) -> ScanProgress {
        ScanProgress {
            current: self.cursor,
            total: self.index.word_count(),
        }
    }
}
