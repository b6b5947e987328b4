use std::cell::Cell;
use std::rc::Rc;

use word_levels::{CancelToken, Completion, ScanProgress, ScanStatus};

#[test]
fn test_completion_calls_listener() {
    let got = Rc::new(Cell::new(0));
    let mut completion: Completion<usize> = Completion::new();
    {
        let got = Rc::clone(&got);
        completion.set_listener(move |n| got.set(*n));
    }

    assert!(!completion.has_fired());
    completion.fire(&5);
    assert!(completion.has_fired());
    assert_eq!(got.get(), 5);
}

#[test]
fn test_completion_without_listener() {
    let mut completion: Completion<str> = Completion::default();
    completion.fire("done");
    assert!(completion.has_fired());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "completion fired more than once")]
fn test_duplicate_completion_panics_in_debug() {
    let mut completion: Completion<()> = Completion::new();
    completion.fire(&());
    completion.fire(&());
}

#[test]
#[cfg(not(debug_assertions))]
fn test_duplicate_completion_ignored_in_release() {
    let calls = Rc::new(Cell::new(0));
    let mut completion: Completion<()> = Completion::new();
    {
        let calls = Rc::clone(&calls);
        completion.set_listener(move |_| calls.set(calls.get() + 1));
    }
    completion.fire(&());
    completion.fire(&());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_cancel_token_is_shared() {
    let token = CancelToken::new();
    let other = token.clone();
    assert!(!other.is_cancelled());
    token.cancel();
    assert!(other.is_cancelled());
}

#[test]
fn test_scan_status_finished() {
    assert!(!ScanStatus::Yielded.is_finished());
    assert!(ScanStatus::Complete.is_finished());
    assert!(ScanStatus::Cancelled.is_finished());
}

#[test]
fn test_progress_fraction() {
    let half = ScanProgress { current: 5, total: 10 };
    assert_eq!(half.fraction(), 0.5);
    assert_eq!(half.to_string(), "5/10");
    assert_eq!(ScanProgress::default().fraction(), 1.0);
}
