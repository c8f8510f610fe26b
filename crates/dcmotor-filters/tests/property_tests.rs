//! Property-Based Tests for the low-pass filter.

use approx::assert_relative_eq;
use dcmotor_filters::prelude::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn output_stays_between_previous_and_input(
        start in -1000.0f32..1000.0,
        input in -1000.0f32..1000.0,
        cutoff in 0.1f32..500.0,
        dt_us in 1u64..1_000_000,
    ) {
        let mut filter = LowPassFilter::initialized(cutoff, start, 0);
        let out = filter.step(input, dt_us);
        let lo = start.min(input) - 1e-3;
        let hi = start.max(input) + 1e-3;
        prop_assert!(out >= lo && out <= hi, "{out} not within [{lo}, {hi}]");
    }

    #[test]
    fn zero_dt_never_changes_output(
        start in -1000.0f32..1000.0,
        input in -1000.0f32..1000.0,
        cutoff in 0.1f32..500.0,
        now in 0u64..u64::MAX,
    ) {
        let mut filter = LowPassFilter::initialized(cutoff, start, now);
        let out = filter.step(input, now);
        prop_assert!((out - start).abs() < 1e-6);
    }

    #[test]
    fn non_monotonic_time_is_tolerated(
        start in -1000.0f32..1000.0,
        input in -1000.0f32..1000.0,
        now in 1u64..u64::MAX,
        back in 1u64..1_000_000,
    ) {
        let mut filter = LowPassFilter::initialized(20.0, start, now);
        let earlier = now.saturating_sub(back);
        let out = filter.step(input, earlier);
        prop_assert!((out - start).abs() < 1e-6);
        prop_assert_eq!(filter.last_update_us(), now);
    }

    #[test]
    fn alpha_is_a_fraction(dt in 0.0f32..1.0e6, cutoff in 0.0f32..1.0e4) {
        let filter = LowPassFilter::new(cutoff);
        let alpha = filter.alpha(dt);
        prop_assert!((0.0..=1.0).contains(&alpha));
    }

    #[test]
    fn deterministic(input in -1000.0f32..1000.0, dt_us in 1u64..100_000) {
        let mut a = LowPassFilter::initialized(2.5, 0.0, 0);
        let mut b = LowPassFilter::initialized(2.5, 0.0, 0);
        prop_assert!((a.step(input, dt_us) - b.step(input, dt_us)).abs() < 1e-9);
    }
}

#[test]
fn converges_after_many_periods() {
    let mut filter = LowPassFilter::initialized(2.5, 0.0, 0);
    let mut now = 0;
    for _ in 0..2_000 {
        now += 10_000;
        filter.step(1.0, now);
    }
    assert_relative_eq!(filter.value(), 1.0, epsilon = 1e-4);
}

#[test]
fn reset_returns_to_unseeded() {
    let mut filter = LowPassFilter::initialized(2.5, 5.0, 100);
    filter.clear();
    assert!(!filter.is_seeded());
    assert_relative_eq!(filter.step(-3.0, 200), -3.0);
}
