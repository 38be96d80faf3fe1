//! Window statistics over the leading hours of a forecast
//!
//! A window is always a prefix: "the next N hours" means the first N samples
//! of the sequence handed in.

use crate::apparent::{kmh_to_ms, resolve_apparent_temperature};
use crate::error::GuidanceError;
use crate::models::{HourlySample, RawWindowStats, WindowStats};

/// A window together with its display statistics
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedStats<'a> {
    pub window: &'a [HourlySample],
    pub stats: WindowStats,
}

/// The first `window_size` samples, or all of them when fewer exist
#[must_use]
pub fn leading_window(hours: &[HourlySample], window_size: usize) -> &[HourlySample] {
    &hours[..window_size.min(hours.len())]
}

/// Display statistics over the first `window_size` hours, using each sample's
/// apparent temperature as delivered.
pub fn compute_window_stats(
    hours: &[HourlySample],
    window_size: usize,
) -> Result<WindowedStats<'_>, GuidanceError> {
    let window = checked_window(hours, window_size)?;
    let stats = raw_window_stats(window)?.rounded();

    Ok(WindowedStats { window, stats })
}

/// Like [`compute_window_stats`], but re-resolves every sample's apparent
/// temperature from air temperature, humidity and wind first.
pub fn compute_apparent_aware_stats(
    hours: &[HourlySample],
    window_size: usize,
) -> Result<WindowedStats<'_>, GuidanceError> {
    let window = checked_window(hours, window_size)?;
    let stats = raw_apparent_aware_stats(window)?.rounded();

    Ok(WindowedStats { window, stats })
}

/// Unrounded aggregates over an already sliced window
pub fn raw_window_stats(window: &[HourlySample]) -> Result<RawWindowStats, GuidanceError> {
    validate_window(window)?;
    let apparent: Vec<f64> = window.iter().map(HourlySample::apparent_or_air).collect();
    Ok(aggregate(window, &apparent))
}

/// Unrounded aggregates with apparent temperatures recomputed per sample
pub fn raw_apparent_aware_stats(
    window: &[HourlySample],
) -> Result<RawWindowStats, GuidanceError> {
    validate_window(window)?;
    let apparent = window
        .iter()
        .map(|sample| {
            resolve_apparent_temperature(
                sample.air_temperature,
                sample.humidity_or_default(),
                kmh_to_ms(sample.wind_speed_kmh),
                sample.apparent_temperature,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate(window, &apparent))
}

fn checked_window(
    hours: &[HourlySample],
    window_size: usize,
) -> Result<&[HourlySample], GuidanceError> {
    if window_size == 0 {
        return Err(GuidanceError::invalid_input("window size must be at least 1"));
    }
    Ok(leading_window(hours, window_size))
}

fn validate_window(window: &[HourlySample]) -> Result<(), GuidanceError> {
    for (index, sample) in window.iter().enumerate() {
        sample.validate().map_err(|err| match err {
            GuidanceError::InvalidInput { message } => {
                GuidanceError::invalid_input(format!("hour {index}: {message}"))
            }
            other => other,
        })?;
    }
    Ok(())
}

fn aggregate(window: &[HourlySample], apparent: &[f64]) -> RawWindowStats {
    if window.is_empty() {
        return RawWindowStats::default();
    }

    let count = apparent.len() as f64;
    let min_apparent = apparent.iter().copied().fold(f64::INFINITY, f64::min);
    let max_apparent = apparent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_apparent = apparent.iter().sum::<f64>() / count;

    let stats = RawWindowStats {
        min_apparent,
        max_apparent,
        avg_apparent,
        max_precipitation_probability: max_of(window, |s| s.precipitation_probability),
        total_precipitation: window.iter().map(|s| s.precipitation_amount).sum(),
        max_uv: max_of(window, |s| s.uv_index),
        max_wind: max_of(window, |s| s.wind_speed_kmh),
    };

    tracing::debug!(hours = window.len(), ?stats, "aggregated window");
    stats
}

fn max_of(window: &[HourlySample], field: impl Fn(&HourlySample) -> f64) -> f64 {
    window.iter().map(field).fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn hours_from(apparent: &[f64]) -> Vec<HourlySample> {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        apparent
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                HourlySample::new(start + Duration::hours(i as i64), value).with_apparent(value)
            })
            .collect()
    }

    #[test]
    fn test_empty_window_is_all_zero() {
        for window_size in [1, 6, 48] {
            let result = compute_window_stats(&[], window_size).unwrap();
            assert!(result.window.is_empty());
            assert_eq!(result.stats, WindowStats::default());
        }
    }

    #[test]
    fn test_zero_window_size_is_rejected() {
        let hours = hours_from(&[10.0]);
        let err = compute_window_stats(&hours, 0).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(compute_apparent_aware_stats(&hours, 0).is_err());
    }

    #[test]
    fn test_window_is_a_prefix() {
        let hours = hours_from(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        let result = compute_window_stats(&hours, 3).unwrap();
        assert_eq!(result.window, &hours[..3]);
        assert_eq!(result.stats.min_apparent, 1);
        assert_eq!(result.stats.max_apparent, 3);
        assert_eq!(result.stats.avg_apparent, 2);

        let all = compute_window_stats(&hours, 10).unwrap();
        assert_eq!(all.window.len(), 5);
    }

    #[test]
    fn test_aggregates_every_field() {
        let mut hours = hours_from(&[12.4, 15.6, 9.0]);
        hours[0] = hours[0].clone().with_precipitation(20.0, 0.04).with_wind_kmh(11.2).with_uv(2.0);
        hours[1] = hours[1].clone().with_precipitation(65.4, 1.2).with_wind_kmh(25.5).with_uv(5.6);
        hours[2] = hours[2].clone().with_precipitation(40.0, 0.0).with_wind_kmh(7.0).with_uv(0.0);

        let stats = compute_window_stats(&hours, 3).unwrap().stats;
        assert_eq!(stats.min_apparent, 9);
        assert_eq!(stats.max_apparent, 16);
        assert_eq!(stats.avg_apparent, 12);
        assert_eq!(stats.max_precipitation_probability, 65);
        assert_eq!(stats.total_precipitation, 1.2);
        assert_eq!(stats.max_uv, 6);
        assert_eq!(stats.max_wind, 26);
    }

    #[test]
    fn test_missing_apparent_uses_air_temperature() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let hours = vec![HourlySample::new(start, 14.0)];
        let stats = compute_window_stats(&hours, 1).unwrap().stats;
        assert_eq!(stats.avg_apparent, 14);
    }

    #[test]
    fn test_apparent_aware_recomputes_missing_values() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        // 36 km/h is 10 m/s, enough for wind chill at -5 °C
        let hours = vec![HourlySample::new(start, -5.0).with_wind_kmh(36.0)];

        let plain = compute_window_stats(&hours, 1).unwrap().stats;
        let aware = compute_apparent_aware_stats(&hours, 1).unwrap().stats;
        assert_eq!(plain.min_apparent, -5);
        assert_eq!(aware.min_apparent, -9);
    }

    #[test]
    fn test_apparent_aware_keeps_measured_values() {
        let hours = hours_from(&[21.0, 23.0]);
        let plain = compute_window_stats(&hours, 2).unwrap();
        let aware = compute_apparent_aware_stats(&hours, 2).unwrap();
        assert_eq!(plain, aware);
    }

    #[test]
    fn test_non_finite_sample_is_rejected() {
        let mut hours = hours_from(&[10.0, 11.0, 12.0]);
        hours[1].air_temperature = f64::NAN;

        let err = compute_window_stats(&hours, 3).unwrap_err();
        assert!(err.to_string().contains("hour 1"));

        // the bad sample sits outside a one-hour window
        assert!(compute_window_stats(&hours, 1).is_ok());
    }

    #[test]
    fn test_raw_stats_stay_unrounded() {
        let hours = hours_from(&[25.4, 25.4]);
        let raw = raw_window_stats(&hours).unwrap();
        assert!((raw.avg_apparent - 25.4).abs() < 1e-9);
        assert_eq!(raw.rounded().avg_apparent, 25);
    }

    proptest! {
        #[test]
        fn prop_min_avg_max_are_ordered(
            apparent in prop::collection::vec(-40.0f64..45.0, 1..48),
            window_size in 1usize..60,
        ) {
            let hours = hours_from(&apparent);

            let raw = raw_window_stats(leading_window(&hours, window_size)).unwrap();
            prop_assert!(raw.min_apparent <= raw.avg_apparent + 1e-9);
            prop_assert!(raw.avg_apparent <= raw.max_apparent + 1e-9);

            let stats = compute_window_stats(&hours, window_size).unwrap().stats;
            prop_assert!(stats.min_apparent <= stats.avg_apparent);
            prop_assert!(stats.avg_apparent <= stats.max_apparent);
        }

        #[test]
        fn prop_stats_are_idempotent(
            apparent in prop::collection::vec(-40.0f64..45.0, 0..48),
            window_size in 1usize..60,
        ) {
            let hours = hours_from(&apparent);
            let first = compute_apparent_aware_stats(&hours, window_size).unwrap();
            let second = compute_apparent_aware_stats(&hours, window_size).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
