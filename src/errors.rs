//! Error types for dictionary loading and level generation.

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the level generator.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// A random level was requested but the dictionary holds no long words.
    #[error("no long words available: cannot draw a random target from an empty range")]
    EmptyDictionary,

    #[error("level index {index} out of range (long word count is {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A level was requested before the dictionary finished building.
    #[error("dictionary is still loading")]
    DictionaryNotReady,

    /// The finished level was requested before its search completed.
    #[error("sub-word search has not completed")]
    SearchIncomplete,

    /// A scan was cancelled before it could finish.
    #[error("scan cancelled")]
    Cancelled,

    #[error("invalid word length bounds: min={min}, max={max}")]
    InvalidBounds { min: usize, max: usize },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("failed to read word list from '{}': {source}", path.display())]
    WordListIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
