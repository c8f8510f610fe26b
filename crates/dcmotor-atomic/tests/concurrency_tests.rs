//! Concurrency tests for dcmotor-atomic.
//!
//! A control loop records events while a diagnostics reader drains them.

use std::sync::Arc;
use std::thread;

use dcmotor_atomic::prelude::*;

#[test]
fn test_concurrent_record_single_event() {
    let counters = Arc::new(ClampCounters::new());
    let num_threads: u64 = 8;
    let per_thread: u64 = 10_000;

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let counters = Arc::clone(&counters);
            thread::spawn(move || {
                for _ in 0..per_thread {
                    counters.record(ClampEvent::PwmSaturated);
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok(), "thread panicked unexpectedly");
    }

    assert_eq!(
        counters.count(ClampEvent::PwmSaturated),
        num_threads * per_thread
    );
}

#[test]
fn test_concurrent_record_every_event() {
    let counters = Arc::new(ClampCounters::new());
    let num_threads: u64 = 4;
    let per_thread: u64 = 2_000;

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let counters = Arc::clone(&counters);
            thread::spawn(move || {
                for _ in 0..per_thread {
                    counters.inc_cycle();
                    for event in ClampEvent::ALL {
                        counters.record(event);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok(), "thread panicked unexpectedly");
    }

    let snapshot = counters.snapshot();
    let expected = num_threads * per_thread;
    assert_eq!(snapshot.cycles, expected);
    for event in ClampEvent::ALL {
        assert_eq!(snapshot.get(event), expected, "{event}");
    }
}

#[test]
fn test_drain_while_recording_loses_nothing() {
    let counters = Arc::new(ClampCounters::new());
    let total: u64 = 50_000;

    let writer = {
        let counters = Arc::clone(&counters);
        thread::spawn(move || {
            for _ in 0..total {
                counters.inc_cycle();
            }
        })
    };

    let mut drained = 0u64;
    while !writer.is_finished() {
        drained += counters.snapshot_and_reset().cycles;
        thread::yield_now();
    }
    assert!(writer.join().is_ok(), "writer panicked unexpectedly");
    drained += counters.snapshot_and_reset().cycles;

    assert_eq!(drained, total);
}
