//! Session controller.
//!
//! Owns the mode transitions loading → level-building → ready and drives
//! the two scans one batch per [`Session::tick`], handing results to a
//! [`LevelSink`] supplied by the host.

use std::sync::Arc;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::LevelConfig;
use crate::dictionary::{DictionaryIndex, DictionaryLoader};
use crate::errors::LevelError;
use crate::level::{LevelGenerator, LevelRequest, WordLevel};
use crate::scan::{CancelToken, ResumableScan, ScanProgress, ScanStatus};
use crate::search::SubWordSearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Nothing started yet.
    PreGame,
    /// The word list is being parsed.
    Loading,
    /// A level's sub-words are being searched.
    MakeLevel,
    /// The current level is complete and has been handed to the sink.
    Ready,
}

/// Receives the session's results.
pub trait LevelSink {
    /// Called once when the dictionary finishes loading. The returned
    /// request decides the first level.
    fn on_parse_complete(&mut self, _index: &DictionaryIndex) -> LevelRequest {
        LevelRequest::Random
    }

    /// Called once per level, with its sorted sub-words.
    fn on_level_ready(&mut self, level: &WordLevel);
}

pub struct Session<S, R = ThreadRng> {
    config: LevelConfig,
    mode: GameMode,
    sink: S,
    rng: R,
    cancel: CancelToken,
    loader: Option<DictionaryLoader>,
    generator: Option<LevelGenerator>,
    pending: Option<LevelRequest>,
    search: Option<SubWordSearch>,
    level: Option<WordLevel>,
}

impl<S: LevelSink> Session<S> {
    pub fn new(config: LevelConfig, sink: S) -> Self {
        Self::with_rng(config, sink, rand::thread_rng())
    }
}

impl<S: LevelSink, R: Rng> Session<S, R> {
    pub fn with_rng(config: LevelConfig, sink: S, rng: R) -> Self {
        Self {
            config,
            mode: GameMode::PreGame,
            sink,
            rng,
            cancel: CancelToken::new(),
            loader: None,
            generator: None,
            pending: None,
            search: None,
            level: None,
        }
    }

    /// Begin loading `text`. Restarts from scratch if already running.
    pub fn start(&mut self, text: &str) {
        self.cancel = CancelToken::new();
        let loader = DictionaryLoader::from_text(text, self.config.bounds)
            .with_cancel_token(self.cancel.clone());
        log::info!("loading word list ({} lines)", loader.total_lines());
        self.loader = Some(loader);
        self.generator = None;
        self.pending = None;
        self.search = None;
        self.level = None;
        self.mode = GameMode::Loading;
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The loader while the word list is still being parsed.
    pub fn loader(&self) -> Option<&DictionaryLoader> {
        self.loader.as_ref()
    }

    pub fn index(&self) -> Option<&Arc<DictionaryIndex>> {
        self.generator.as_ref().map(LevelGenerator::index)
    }

    /// The level being built, if a search is running.
    pub fn search(&self) -> Option<&SubWordSearch> {
        self.search.as_ref()
    }

    /// The most recently completed level.
    pub fn level(&self) -> Option<&WordLevel> {
        self.level.as_ref()
    }

    /// Progress of whichever scan is currently running.
    pub fn progress(&self) -> Option<ScanProgress> {
        match self.mode {
            GameMode::Loading => self.loader.as_ref().map(ResumableScan::progress),
            GameMode::MakeLevel => self.search.as_ref().map(ResumableScan::progress),
            GameMode::PreGame | GameMode::Ready => None,
        }
    }

    /// Queue another level against the loaded dictionary.
    pub fn next_level(&mut self, request: LevelRequest) -> Result<(), LevelError> {
        if self.generator.is_none() {
            return Err(LevelError::DictionaryNotReady);
        }
        self.cancel = CancelToken::new();
        self.pending = Some(request);
        self.search = None;
        self.mode = GameMode::MakeLevel;
        Ok(())
    }

    /// Do one unit of work: one batch of the running scan, or one mode
    /// transition.
    pub fn tick(&mut self) -> Result<GameMode, LevelError> {
        let batch = self.config.num_to_parse_before_yield();
        match self.mode {
            GameMode::PreGame | GameMode::Ready => {}
            GameMode::Loading => self.resume_loading(batch)?,
            GameMode::MakeLevel if self.search.is_none() => self.begin_search()?,
            GameMode::MakeLevel => self.resume_search(batch)?,
        }
        Ok(self.mode)
    }

    /// Tick until the current level is ready.
    pub fn run(&mut self) -> Result<&WordLevel, LevelError> {
        if self.mode == GameMode::PreGame {
            return Err(LevelError::DictionaryNotReady);
        }
        while self.tick()? != GameMode::Ready {}
        self.level.as_ref().ok_or(LevelError::SearchIncomplete)
    }

    fn resume_loading(&mut self, batch: usize) -> Result<(), LevelError> {
        let loader = self.loader.as_mut().ok_or(LevelError::DictionaryNotReady)?;
        match loader.resume_batch(batch) {
            ScanStatus::Yielded => Ok(()),
            ScanStatus::Cancelled => Err(self.abort()),
            ScanStatus::Complete => {
                let loader = self.loader.take().ok_or(LevelError::DictionaryNotReady)?;
                let index = Arc::new(loader.into_index()?);
                let request = self.sink.on_parse_complete(&index);
                self.generator = Some(LevelGenerator::new(index));
                self.pending = Some(request);
                self.mode = GameMode::MakeLevel;
                Ok(())
            }
        }
    }

    fn begin_search(&mut self) -> Result<(), LevelError> {
        let generator = self.generator.as_ref().ok_or(LevelError::DictionaryNotReady)?;
        // The request stays queued on failure so a retry fails the same way.
        let request = self.pending.unwrap_or_default();
        let search = generator
            .make_word_level(request, &mut self.rng)?
            .with_cancel_token(self.cancel.clone());
        self.pending = None;
        self.search = Some(search);
        Ok(())
    }

    fn resume_search(&mut self, batch: usize) -> Result<(), LevelError> {
        let search = self.search.as_mut().ok_or(LevelError::SearchIncomplete)?;
        match search.resume_batch(batch) {
            ScanStatus::Yielded => Ok(()),
            ScanStatus::Cancelled => Err(self.abort()),
            ScanStatus::Complete => {
                let search = self.search.take().ok_or(LevelError::SearchIncomplete)?;
                let level = search.into_level()?;
                self.sink.on_level_ready(&level);
                self.level = Some(level);
                self.mode = GameMode::Ready;
                Ok(())
            }
        }
    }

    fn abort(&mut self) -> LevelError {
        log::info!("session cancelled in {:?}", self.mode);
        self.loader = None;
        self.search = None;
        self.pending = None;
        self.mode = if self.generator.is_some() {
            GameMode::Ready
        } else {
            GameMode::PreGame
        };
        LevelError::Cancelled
    }
}
