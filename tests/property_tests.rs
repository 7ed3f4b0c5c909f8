//! Property-based tests for spotprice
//!
//! These tests use proptest to generate random inputs and verify
//! that the window and aggregation properties hold across a wide range of values.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use spotprice::aggregate::{aggregate, AggregateResult};
use spotprice::region::{resolve_region, RegionCatalog, RegionTarget};
use spotprice::window::{resolve_window_at, LookbackDuration, MAX_LOOKBACK_DAYS};

proptest! {
    #[test]
    fn test_window_span_matches_request_below_limit(
        days in 0u64..MAX_LOOKBACK_DAYS,
        hours in 0u64..24,
        minutes in 0u64..60,
        seconds in 0u64..60,
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let d = LookbackDuration::new(days, hours, minutes, seconds);
        let window = resolve_window_at(&d, now);

        let expected = days * 86_400 + hours * 3_600 + minutes * 60 + seconds;
        prop_assert_eq!(window.span().num_seconds(), expected as i64);
        prop_assert_eq!(window.end, now);
    }

    #[test]
    fn test_window_clamped_at_limit(
        days in MAX_LOOKBACK_DAYS..100_000u64,
        hours in 0u64..1_000_000,
        minutes in 0u64..1_000_000,
        seconds in 0u64..1_000_000,
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = resolve_window_at(&LookbackDuration::new(days, hours, minutes, seconds), now);
        prop_assert_eq!(window.span(), Duration::days(90));
    }

    #[test]
    fn test_window_never_exceeds_limit(
        days in any::<u64>(),
        hours in any::<u64>(),
        minutes in any::<u64>(),
        seconds in any::<u64>(),
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = resolve_window_at(&LookbackDuration::new(days, hours, minutes, seconds), now);
        prop_assert!(window.span() <= Duration::days(90));
        prop_assert!(window.start <= window.end);
    }

    #[test]
    fn test_aggregate_matches_global_extremes(
        samples in prop::collection::vec(0.0f64..100.0, 1..200)
    ) {
        let expected_max = samples.iter().cloned().fold(f64::MIN, f64::max);
        let expected_min = samples.iter().cloned().fold(f64::MAX, f64::min);

        prop_assert_eq!(
            aggregate(&samples, false, "t2.medium").unwrap(),
            AggregateResult::Max(expected_max)
        );
        prop_assert_eq!(
            aggregate(&samples, true, "t2.medium").unwrap(),
            AggregateResult::Range { min: expected_min, max: expected_max }
        );
    }

    #[test]
    fn test_aggregate_result_round_trips(
        min_ticks in 0u32..500_000,
        spread_ticks in 0u32..500_000,
    ) {
        // Spot prices are quoted to four decimal places
        let min = f64::from(min_ticks) / 10_000.0;
        let max = f64::from(min_ticks + spread_ticks) / 10_000.0;

        for value in [AggregateResult::Max(max), AggregateResult::Range { min, max }] {
            let json = serde_json::to_string(&value).unwrap();
            let back: AggregateResult = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, value);
        }
    }

    #[test]
    fn test_zone_resolves_to_its_region(
        index in 0usize..32,
        letter in "[a-f]",
    ) {
        let catalog = RegionCatalog::builtin();
        let region = catalog.regions()[index % catalog.regions().len()].clone();
        let zone = format!("{}{}", region, letter);

        prop_assert_eq!(
            resolve_region(&[zone], &catalog),
            RegionTarget::Resolved(region)
        );
    }
}
