//! Tests for the bounded readiness poll
//!
//! The poll must terminate after at most `max_attempts` probes regardless
//! of endpoint behavior, and succeed exactly when a probe returns true
//! before that bound.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use labup::pipeline::poll::{PollError, ReadinessPoll};

fn no_interrupt() -> AtomicBool {
    AtomicBool::new(false)
}

#[test]
fn succeeds_on_first_attempt() {
    let poll = ReadinessPoll::new(5, Duration::ZERO);
    let mut probes = 0;

    let result = poll.run(
        |_| {
            probes += 1;
            true
        },
        &no_interrupt(),
    );

    assert_eq!(result, Ok(1));
    assert_eq!(probes, 1);
}

#[test]
fn succeeds_mid_way() {
    let poll = ReadinessPoll::new(10, Duration::ZERO);
    let mut probes = 0;

    let result = poll.run(
        |_| {
            probes += 1;
            probes >= 3
        },
        &no_interrupt(),
    );

    assert_eq!(result, Ok(3));
    assert_eq!(probes, 3);
}

#[test]
fn exhausts_after_bound() {
    let poll = ReadinessPoll::new(5, Duration::ZERO);
    let mut probes = 0;

    let result = poll.run(
        |_| {
            probes += 1;
            false
        },
        &no_interrupt(),
    );

    assert_eq!(result, Err(PollError::Exhausted(5)));
    assert_eq!(probes, 5, "probe must run exactly max_attempts times");
}

#[test]
fn zero_attempts_exhausts_without_probing() {
    let poll = ReadinessPoll::new(0, Duration::ZERO);
    let mut probes = 0;

    let result = poll.run(
        |_| {
            probes += 1;
            true
        },
        &no_interrupt(),
    );

    assert_eq!(result, Err(PollError::Exhausted(0)));
    assert_eq!(probes, 0);
}

#[test]
fn attempts_are_numbered_sequentially() {
    let poll = ReadinessPoll::new(3, Duration::ZERO);
    let mut seen = Vec::new();

    let _ = poll.run(
        |attempt| {
            seen.push(attempt);
            false
        },
        &no_interrupt(),
    );

    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn interrupt_stops_before_any_probe() {
    let poll = ReadinessPoll::new(5, Duration::ZERO);
    let interrupt = AtomicBool::new(true);
    let mut probes = 0;

    let result = poll.run(
        |_| {
            probes += 1;
            false
        },
        &interrupt,
    );

    assert_eq!(result, Err(PollError::Interrupted));
    assert_eq!(probes, 0);
}

#[test]
fn interrupt_mid_poll_stops_next_attempt() {
    let poll = ReadinessPoll::new(5, Duration::ZERO);
    let interrupt = AtomicBool::new(false);
    let mut probes = 0;

    let result = poll.run(
        |_| {
            probes += 1;
            // Simulate Ctrl-C arriving during the second probe
            if probes == 2 {
                interrupt.store(true, Ordering::SeqCst);
            }
            false
        },
        &interrupt,
    );

    assert_eq!(result, Err(PollError::Interrupted));
    assert_eq!(probes, 2);
}

#[test]
fn max_attempts_accessor() {
    let poll = ReadinessPoll::new(30, Duration::from_secs(2));
    assert_eq!(poll.max_attempts(), 30);
}
