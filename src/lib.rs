//! # Word Levels
//!
//! A word-puzzle level generator. A dictionary is classified by length into
//! long words (puzzle targets) and valid words (candidate answers); a level
//! picks a long word and collects every valid word that can be spelled from
//! its letters, grouped by length and alphabetical within each group.
//!
//! Both the dictionary build and the sub-word search are resumable scans so
//! they can be driven a batch at a time from a host loop.

pub mod config;
pub mod dictionary;
pub mod errors;
pub mod level;
pub mod logging;
pub mod scan;
pub mod search;
pub mod session;

pub use config::{LevelConfig, WordLengthBounds};
pub use dictionary::{load_dictionary, read_word_list, DictionaryIndex, DictionaryLoader, RawWordList};
pub use errors::LevelError;
pub use level::{is_spellable, CharFrequencyMap, LevelGenerator, LevelRequest, WordLevel};
pub use logging::init_logger;
pub use scan::{CancelToken, Completion, ResumableScan, ScanProgress, ScanStatus};
pub use search::{sort_words_by_length, SubWordSearch};
pub use session::{GameMode, LevelSink, Session};
