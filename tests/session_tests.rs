use rand::rngs::StdRng;
use rand::SeedableRng;
use word_levels::{
    load_dictionary, DictionaryIndex, GameMode, LevelConfig, LevelError, LevelRequest, LevelSink,
    Session, WordLengthBounds, WordLevel,
};

const SAMPLE: &str = "cat\ndog\nact\nacted\ncats\n";

#[derive(Default)]
struct RecordingSink {
    request: Option<LevelRequest>,
    parsed: Vec<(usize, usize)>,
    levels: Vec<WordLevel>,
}

impl LevelSink for RecordingSink {
    fn on_parse_complete(&mut self, index: &DictionaryIndex) -> LevelRequest {
        self.parsed.push((index.long_word_count(), index.word_count()));
        self.request.unwrap_or_default()
    }

    fn on_level_ready(&mut self, level: &WordLevel) {
        self.levels.push(level.clone());
    }
}

fn session(min: usize, max: usize, batch: usize, sink: RecordingSink) -> Session<RecordingSink, StdRng> {
    let bounds = WordLengthBounds::new(min, max).unwrap();
    let config = LevelConfig::new(bounds, batch).unwrap();
    Session::with_rng(config, sink, StdRng::seed_from_u64(1))
}

#[test]
fn test_sample_session() {
    let mut session = session(3, 4, 10_000, RecordingSink::default());
    session.start(SAMPLE);

    let level = session.run().unwrap();
    assert_eq!(level.target_word(), "cats");
    assert_eq!(level.sub_words(), ["act", "cat", "cats"]);

    let sink = session.sink();
    assert_eq!(sink.parsed, [(1, 4)]);
    assert_eq!(sink.levels.len(), 1);
    assert_eq!(sink.levels[0].sub_words(), ["act", "cat", "cats"]);
}

#[test]
fn test_mode_transitions() {
    let mut session = session(3, 4, 2, RecordingSink::default());
    assert_eq!(session.mode(), GameMode::PreGame);
    assert_eq!(session.tick().unwrap(), GameMode::PreGame);

    session.start(SAMPLE);
    assert_eq!(session.mode(), GameMode::Loading);

    // 6 lines in batches of 2
    assert_eq!(session.tick().unwrap(), GameMode::Loading);
    assert_eq!(session.progress().map(|p| p.current), Some(2));
    assert_eq!(session.tick().unwrap(), GameMode::Loading);
    assert_eq!(session.tick().unwrap(), GameMode::MakeLevel);
    assert!(session.index().is_some());

    // level creation, then 4 valid words in batches of 2
    assert_eq!(session.tick().unwrap(), GameMode::MakeLevel);
    assert!(session.search().is_some());
    assert_eq!(session.tick().unwrap(), GameMode::MakeLevel);
    assert!(session.sink().levels.is_empty());
    assert_eq!(session.tick().unwrap(), GameMode::Ready);

    assert_eq!(session.sink().levels.len(), 1);
    assert_eq!(session.progress(), None);
    assert_eq!(session.tick().unwrap(), GameMode::Ready);
    assert_eq!(session.sink().levels.len(), 1);
}

#[test]
fn test_loader_counts_visible_while_loading() {
    let mut session = session(3, 7, 50, RecordingSink::default());
    session.start(load_dictionary());
    session.tick().unwrap();

    let loader = session.loader().unwrap();
    assert_eq!(loader.curr_line(), 50);
    assert!(loader.total_lines() > 50);
    assert!(loader.word_count() <= 50);
}

#[test]
fn test_run_before_start() {
    let mut session = session(3, 4, 10, RecordingSink::default());
    assert!(matches!(session.run(), Err(LevelError::DictionaryNotReady)));
    assert!(matches!(
        session.next_level(LevelRequest::Random),
        Err(LevelError::DictionaryNotReady)
    ));
}

#[test]
fn test_empty_dictionary_reports_error() {
    let mut session = session(3, 7, 10, RecordingSink::default());
    session.start("cat\ndog\n");
    assert!(matches!(session.run(), Err(LevelError::EmptyDictionary)));
    assert!(session.sink().levels.is_empty());
}

#[test]
fn test_requested_index_out_of_range() {
    let sink = RecordingSink {
        request: Some(LevelRequest::Index(3)),
        ..RecordingSink::default()
    };
    let mut session = session(3, 4, 10, sink);
    session.start(SAMPLE);
    assert!(matches!(
        session.run(),
        Err(LevelError::IndexOutOfRange { index: 3, len: 1 })
    ));
}

#[test]
fn test_next_level_reuses_dictionary() {
    let text = "cats\ndogs\ncat\ndog\ngod\nact\n";
    let sink = RecordingSink {
        request: Some(LevelRequest::Index(0)),
        ..RecordingSink::default()
    };
    let mut session = session(3, 4, 2, sink);
    session.start(text);
    assert_eq!(session.run().unwrap().target_word(), "cats");

    session.next_level(LevelRequest::Index(1)).unwrap();
    assert_eq!(session.mode(), GameMode::MakeLevel);
    let level = session.run().unwrap();
    assert_eq!(level.target_word(), "dogs");
    assert_eq!(level.level_number(), Some(1));
    assert_eq!(level.sub_words(), ["dog", "god", "dogs"]);

    assert_eq!(session.sink().parsed.len(), 1);
    assert_eq!(session.sink().levels.len(), 2);
}

#[test]
fn test_cancel_while_loading() {
    let mut session = session(3, 7, 10, RecordingSink::default());
    session.start(load_dictionary());
    session.tick().unwrap();

    session.cancel_token().cancel();
    assert!(matches!(session.tick(), Err(LevelError::Cancelled)));
    assert_eq!(session.mode(), GameMode::PreGame);
    assert!(session.sink().parsed.is_empty());
}

#[test]
fn test_cancel_while_searching_keeps_previous_level() {
    let mut session = session(3, 7, 10, RecordingSink::default());
    session.start(load_dictionary());
    let first = session.run().unwrap().clone();

    session.next_level(LevelRequest::Random).unwrap();
    session.tick().unwrap();
    session.tick().unwrap();
    session.cancel_token().cancel();
    assert!(matches!(session.run(), Err(LevelError::Cancelled)));
    assert_eq!(session.mode(), GameMode::Ready);
    assert_eq!(session.level(), Some(&first));
}

#[test]
fn test_restart_after_cancel() {
    let mut session = session(3, 4, 1, RecordingSink::default());
    session.start(SAMPLE);
    session.cancel_token().cancel();
    assert!(session.run().is_err());

    session.start(SAMPLE);
    assert_eq!(session.run().unwrap().sub_words(), ["act", "cat", "cats"]);
}

#[test]
fn test_failed_level_request_is_not_replaced_by_random() {
    let sink = RecordingSink {
        request: Some(LevelRequest::Index(3)),
        ..RecordingSink::default()
    };
    let mut session = session(3, 4, 10, sink);
    session.start(SAMPLE);

    for _ in 0..3 {
        assert!(matches!(
            session.run(),
            Err(LevelError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(session.mode(), GameMode::MakeLevel);
        assert!(session.level().is_none());
    }
    assert!(session.sink().levels.is_empty());

    session.next_level(LevelRequest::Index(0)).unwrap();
    assert_eq!(session.run().unwrap().level_number(), Some(0));
}

#[test]
fn test_empty_dictionary_error_repeats_on_tick() {
    let mut session = session(3, 7, 10, RecordingSink::default());
    session.start("cat\ndog\n");
    assert_eq!(session.tick().unwrap(), GameMode::MakeLevel);
    assert!(matches!(session.tick(), Err(LevelError::EmptyDictionary)));
    assert!(matches!(session.tick(), Err(LevelError::EmptyDictionary)));
    assert!(session.search().is_none());
}
