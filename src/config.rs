//! Tunable configuration for dictionary classification and scan batching.

use crate::errors::LevelError;

/// Default shortest word that counts as a valid sub-word.
pub const DEFAULT_WORD_LENGTH_MIN: usize = 3;
/// Default length of a long (target) word.
pub const DEFAULT_WORD_LENGTH_MAX: usize = 7;
/// Default number of elements processed before a scan yields.
pub const DEFAULT_NUM_TO_PARSE_BEFORE_YIELD: usize = 10_000;

/// Inclusive length range for valid words. Words of exactly `max` letters
/// are also long words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLengthBounds {
    min: usize,
    max: usize,
}

impl WordLengthBounds {
    /// Create bounds, rejecting `min == 0` and `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, LevelError> {
        if min == 0 || min > max {
            return Err(LevelError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> usize {
        self.min
    }

    pub fn max(self) -> usize {
        self.max
    }

    /// True when a word of `len` letters is a valid word.
    pub fn is_valid_length(self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }

    /// True when a word of `len` letters is a long word.
    pub fn is_long_length(self, len: usize) -> bool {
        len == self.max
    }
}

impl Default for WordLengthBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_WORD_LENGTH_MIN,
            max: DEFAULT_WORD_LENGTH_MAX,
        }
    }
}

/// Everything a session needs to know before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub bounds: WordLengthBounds,
    num_to_parse_before_yield: usize,
}

impl LevelConfig {
    pub fn new(bounds: WordLengthBounds, num_to_parse_before_yield: usize) -> Result<Self, LevelError> {
        if num_to_parse_before_yield == 0 {
            return Err(LevelError::InvalidBatchSize);
        }
        Ok(Self {
            bounds,
            num_to_parse_before_yield,
        })
    }

    pub fn num_to_parse_before_yield(&self) -> usize {
        self.num_to_parse_before_yield
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            bounds: WordLengthBounds::default(),
            num_to_parse_before_yield: DEFAULT_NUM_TO_PARSE_BEFORE_YIELD,
        }
    }
}
