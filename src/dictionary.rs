//! Dictionary ingestion.
//!
//! A raw word list is split into lines and classified by length into long
//! words (candidate puzzle targets) and valid words (candidate sub-words).
//! Classification runs as a [`ResumableScan`] so a host loop can show
//! progress while a large list is processed.

use std::path::Path;

use crate::config::WordLengthBounds;
use crate::errors::LevelError;
use crate::scan::{CancelToken, Completion, ResumableScan, ScanProgress, ScanStatus};

/// The word list bundled with the crate.
pub fn load_dictionary() -> &'static str {
    include_str!("../dictionary/dictionary.txt")
}

/// Read a word list from disk.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<String, LevelError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| LevelError::WordListIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Raw dictionary text split into lines, one candidate word per line.
///
/// Lines are split on `'\n'` and a single trailing `'\r'` is dropped, so
/// CRLF files classify exactly like LF files. No other whitespace is
/// touched. A trailing newline leaves one final empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWordList {
    lines: Vec<String>,
}

impl RawWordList {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Length-classified dictionary. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryIndex {
    bounds: WordLengthBounds,
    long_words: Vec<String>,
    words: Vec<String>,
}

impl DictionaryIndex {
    /// Classify every line in one go.
    pub fn build(raw: RawWordList, bounds: WordLengthBounds) -> Self {
        let total = raw.len();
        let mut loader = DictionaryLoader::new(raw, bounds);
        loader.run_to_completion(total.max(1));
        loader.into_parts()
    }

    pub fn bounds(&self) -> WordLengthBounds {
        self.bounds
    }

    /// Words of exactly `bounds.max()` letters.
    pub fn long_words(&self) -> &[String] {
        &self.long_words
    }

    pub fn long_word(&self, ndx: usize) -> Option<&str> {
        self.long_words.get(ndx).map(String::as_str)
    }

    pub fn long_word_count(&self) -> usize {
        self.long_words.len()
    }

    /// Every word whose length falls within the bounds.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, ndx: usize) -> Option<&str> {
        self.words.get(ndx).map(String::as_str)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Incremental builder for a [`DictionaryIndex`].
///
/// Counts are published after every batch, so `long_word_count()` and
/// `word_count()` lag the work in progress by at most one batch and are
/// exact once the scan completes.
#[derive(Debug)]
pub struct DictionaryLoader {
    raw: RawWordList,
    bounds: WordLengthBounds,
    curr_line: usize,
    long_words: Vec<String>,
    words: Vec<String>,
    long_word_count: usize,
    word_count: usize,
    status: Option<ScanStatus>,
    cancel: Option<CancelToken>,
    on_complete: Completion<DictionaryIndex>,
    index: Option<DictionaryIndex>,
}

impl DictionaryLoader {
    pub fn new(raw: RawWordList, bounds: WordLengthBounds) -> Self {
        Self {
            raw,
            bounds,
            curr_line: 0,
            long_words: Vec::new(),
            words: Vec::new(),
            long_word_count: 0,
            word_count: 0,
            status: None,
            cancel: None,
            on_complete: Completion::new(),
            index: None,
        }
    }

    pub fn from_text(text: &str, bounds: WordLengthBounds) -> Self {
        Self::new(RawWordList::parse(text), bounds)
    }

    /// Register the parse-complete listener. It runs exactly once, after
    /// the last batch.
    pub fn on_parse_complete<F>(&mut self, listener: F)
    where
        F: FnOnce(&DictionaryIndex) + 'static,
    {
        self.on_complete.set_listener(listener);
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn curr_line(&self) -> usize {
        self.curr_line
    }

    pub fn total_lines(&self) -> usize {
        self.raw.len()
    }

    pub fn long_word_count(&self) -> usize {
        self.long_word_count
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_complete(&self) -> bool {
        self.status == Some(ScanStatus::Complete)
    }

    /// The finished index, once the scan has completed.
    pub fn index(&self) -> Option<&DictionaryIndex> {
        self.index.as_ref()
    }

    pub fn into_index(self) -> Result<DictionaryIndex, LevelError> {
        self.index.ok_or(LevelError::DictionaryNotReady)
    }

    fn into_parts(self) -> DictionaryIndex {
        match self.index {
            Some(index) => index,
            None => DictionaryIndex {
                bounds: self.bounds,
                long_words: self.long_words,
                words: self.words,
            },
        }
    }

    fn publish_counts(&mut self) {
        self.long_word_count = self.long_words.len();
        self.word_count = self.words.len();
    }

    fn finish(&mut self) {
        let index = DictionaryIndex {
            bounds: self.bounds,
            long_words: std::mem::take(&mut self.long_words),
            words: std::mem::take(&mut self.words),
        };
        log::info!(
            "word list parsed: {} lines, {} long words, {} valid words",
            self.raw.len(),
            index.long_word_count(),
            index.word_count()
        );
        self.status = Some(ScanStatus::Complete);
        self.on_complete.fire(&index);
        self.index = Some(index);
    }
}

impl ResumableScan for DictionaryLoader {
    fn resume_batch(&mut self, n: usize) -> ScanStatus {
        if let Some(status) = self.status {
            return status;
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::debug!("word list parse cancelled at line {}", self.curr_line);
            self.status = Some(ScanStatus::Cancelled);
            return ScanStatus::Cancelled;
        }

        let end = self.curr_line.saturating_add(n.max(1)).min(self.raw.len());
        for line in &self.raw.lines[self.curr_line..end] {
            let len = line.chars().count();
            if self.bounds.is_long_length(len) {
                self.long_words.push(line.clone());
            }
            if self.bounds.is_valid_length(len) {
                self.words.push(line.clone());
            }
        }
        self.curr_line = end;
        self.publish_counts();
        log::debug!(
            "parsed {}/{} lines ({} long, {} valid)",
            self.curr_line,
            self.raw.len(),
            self.long_word_count,
            self.word_count
        );

        if self.curr_line >= self.raw.len() {
            self.finish();
            ScanStatus::Complete
        } else {
            ScanStatus::Yielded
        }
    }

    fn progress(&self) -> ScanProgress {
        ScanProgress {
            current: self.curr_line,
            total: self.raw.len(),
        }
    }
}
