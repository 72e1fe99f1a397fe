//! Rayleigh-shaped staffing curves.
//!
//! Effort on a software project ramps up, peaks, and tails off. This module
//! models that profile with a Rayleigh density reparametrized by a single
//! peak position, discretized over whole project days.
//!
//! Generation happens in two passes:
//!
//! 1. [`RayleighCurve::generate`] samples the density at each day, scales it
//!    by an amplitude, and clamps every day to a capacity ceiling.
//! 2. [`RawSeries::normalize`] rescales the clamped series so that it sums to
//!    a target total.
//!
//! The second pass is required because neither the discrete sum of the
//! density nor the clamped series matches the continuous integral.
//!
//! The kernel is unit-agnostic: callers decide whether the series carries
//! hours or currency by choosing the amplitude, ceiling, and target.
//!
//! # Example
//!
//! ```
//! use twine_cost_models::support::rayleigh::{CurveConfig, RayleighCurve, Timeline};
//!
//! let timeline = Timeline::new(10, 4.0).unwrap();
//! let curve = RayleighCurve::new(timeline, &CurveConfig::default()).unwrap();
//!
//! let series = curve.generate(1000.0, f64::INFINITY).normalize(1000.0, 1.0);
//! let total: f64 = series.values().iter().sum();
//! assert!((total - 1000.0).abs() < 1e-9);
//! ```

use thiserror::Error;
use uom::si::{f64::Time, time::hour};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

/// Configuration shared by every curve a model generates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveConfig {
    /// Billable hours per developer per day.
    pub hours_per_day: Time,

    /// Numerator of the shape coefficient `K = shape / peak_day²`.
    ///
    /// With `shape = 1` the density's mode falls on the peak day.
    /// With `shape = 2` it falls on `peak_day / √2`.
    pub shape: f64,

    /// Multiplier applied to the normalization scale factor.
    ///
    /// Values below one deliberately undershoot the target total.
    pub smoothing: f64,

    /// Longest schedule, in days, a curve may span.
    pub max_days: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            hours_per_day: Time::new::<hour>(8.0),
            shape: 1.0,
            smoothing: 1.0,
            max_days: 3_650,
        }
    }
}

impl CurveConfig {
    /// Uses `K = 2 / peak_day²` for the shape coefficient.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            shape: 2.0,
            ..Self::default()
        }
    }

    /// Returns this configuration with a different smoothing factor.
    #[must_use]
    pub fn with_smoothing(self, smoothing: f64) -> Self {
        Self { smoothing, ..self }
    }

    /// Billable hours per developer per day, as a plain number of hours.
    #[must_use]
    pub fn daily_hours(&self) -> f64 {
        self.hours_per_day.get::<hour>()
    }
}

/// The effort does not fit in the longest allowed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("schedule needs more than {max_days} days")]
pub struct ScheduleTooLong {
    pub max_days: usize,
}

/// Number of whole days needed to burn `effort_hours` at `daily_hours` per day.
///
/// Always at least one day, so a timeline built from it is never empty.
///
/// # Errors
///
/// Returns [`ScheduleTooLong`] if more than `max_days` days are needed,
/// including when the effort is infinite.
pub fn days_for_effort(
    effort_hours: f64,
    daily_hours: Constrained<f64, StrictlyPositive>,
    max_days: usize,
) -> Result<usize, ScheduleTooLong> {
    let days = (effort_hours / daily_hours.get()).ceil();
    if days.is_nan() || days < 1.0 {
        Ok(1)
    } else if days > max_days as f64 {
        Err(ScheduleTooLong { max_days })
    } else {
        Ok(days as usize)
    }
}

/// Project length and peak position, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    days: Constrained<usize, StrictlyPositive>,
    peak_day: Constrained<f64, StrictlyPositive>,
}

impl Timeline {
    /// Constructs a timeline of `days` days peaking at `peak_day`.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is zero or `peak_day` is not strictly positive.
    pub fn new(days: usize, peak_day: f64) -> ConstraintResult<Self> {
        Ok(Self {
            days: StrictlyPositive::new(days)?,
            peak_day: StrictlyPositive::new(peak_day)?,
        })
    }

    /// Number of project days.
    #[must_use]
    pub fn days(&self) -> usize {
        self.days.get()
    }

    /// Day at which the curve is meant to peak.
    #[must_use]
    pub fn peak_day(&self) -> f64 {
        self.peak_day.get()
    }
}

/// A discretized Rayleigh curve over a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayleighCurve {
    timeline: Timeline,
    k: f64,
}

impl RayleighCurve {
    /// Builds the curve for `timeline` using the configured shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured shape is not strictly positive.
    pub fn new(timeline: Timeline, config: &CurveConfig) -> ConstraintResult<Self> {
        let shape = StrictlyPositive::new(config.shape)?.get();
        let peak = timeline.peak_day();
        Ok(Self {
            timeline,
            k: shape / (peak * peak),
        })
    }

    /// The timeline this curve spans.
    #[must_use]
    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    /// Shape coefficient `K`.
    #[must_use]
    pub fn shape_coefficient(&self) -> f64 {
        self.k
    }

    /// Rayleigh density `K·t·exp(-K·t²/2)` at day `t`.
    #[must_use]
    pub fn density(&self, t: f64) -> f64 {
        self.k * t * (-self.k * t * t / 2.0).exp()
    }

    /// Samples the density for days `1..=days`, scaled by `amplitude`.
    ///
    /// Each day is clamped to `ceiling`.
    #[must_use]
    pub fn generate(&self, amplitude: f64, ceiling: f64) -> RawSeries {
        let mut clamped_days = 0;
        let values = (1..=self.timeline.days())
            .map(|day| {
                let candidate = self.density(day as f64) * amplitude;
                let value = if candidate > ceiling {
                    clamped_days += 1;
                    ceiling
                } else {
                    candidate
                };
                tracing::trace!(day, candidate, value, "rayleigh sample");
                value
            })
            .collect();

        RawSeries {
            values,
            clamped_days,
        }
    }
}

/// Clamped daily values before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    values: Vec<f64>,
    clamped_days: usize,
}

impl RawSeries {
    /// Daily values, indexed from day one.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of days whose candidate value exceeded the ceiling.
    #[must_use]
    pub fn clamped_days(&self) -> usize {
        self.clamped_days
    }

    /// Sum of all daily values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Rescales the series so it sums to `target × smoothing`.
    ///
    /// A series that sums to zero yields zeros and a zero scale factor.
    #[must_use]
    pub fn normalize(self, target: f64, smoothing: f64) -> NormalizedSeries {
        let raw_sum = self.sum();
        let scale_factor = if raw_sum > 0.0 {
            target / raw_sum * smoothing
        } else {
            0.0
        };

        tracing::debug!(
            raw_sum,
            target,
            smoothing,
            scale_factor,
            clamped_days = self.clamped_days,
            "normalized rayleigh series"
        );
        if scale_factor > 1.0 && self.clamped_days > 0 {
            tracing::warn!(
                scale_factor,
                clamped_days = self.clamped_days,
                "normalization lifts clamped days above the capacity ceiling"
            );
        }
        let values = self.values.into_iter().map(|v| v * scale_factor).collect();
        NormalizedSeries {
            values,
            scale_factor,
        }
    }
}

/// Daily values after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    values: Vec<f64>,
    scale_factor: f64,
}

impl NormalizedSeries {
    /// Daily values, indexed from day one.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Factor applied to every raw value.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Multiplies every value by `factor`.
    ///
    /// Used to convert an effort series into a cost series.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            values: self.values.into_iter().map(|v| v * factor).collect(),
            ..self
        }
    }

    /// Consumes the series and returns its values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use approx::assert_relative_eq;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` and returns everything logged at `warn` or above.
    fn warnings(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn curve(days: usize, peak_day: f64, config: &CurveConfig) -> RayleighCurve {
        RayleighCurve::new(Timeline::new(days, peak_day).unwrap(), config).unwrap()
    }

    fn argmax(values: &[f64]) -> usize {
        values
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, max), (i, &v)| {
                if v > max { (i, v) } else { (best, max) }
            })
            .0
            + 1
    }

    #[test]
    fn days_for_effort_rounds_up_and_never_hits_zero() {
        let eight = StrictlyPositive::new(8.0).unwrap();
        assert_eq!(days_for_effort(8.0, eight, 10), Ok(1));
        assert_eq!(days_for_effort(8.5, eight, 10), Ok(2));
        assert_eq!(days_for_effort(0.0, eight, 10), Ok(1));
        assert_eq!(days_for_effort(f64::NAN, eight, 10), Ok(1));
    }

    #[test]
    fn days_for_effort_respects_max_days() {
        let eight = StrictlyPositive::new(8.0).unwrap();
        assert_eq!(days_for_effort(80.0, eight, 10), Ok(10));
        assert_eq!(
            days_for_effort(80.5, eight, 10),
            Err(ScheduleTooLong { max_days: 10 })
        );
        assert_eq!(
            days_for_effort(8e20, eight, 3_650),
            Err(ScheduleTooLong { max_days: 3_650 })
        );
        assert_eq!(
            days_for_effort(f64::INFINITY, eight, 3_650),
            Err(ScheduleTooLong { max_days: 3_650 })
        );
    }

    #[test]
    fn timeline_rejects_degenerate_inputs() {
        assert!(Timeline::new(0, 1.0).is_err());
        assert!(Timeline::new(5, 0.0).is_err());
        assert!(Timeline::new(5, f64::NAN).is_err());
    }

    #[test]
    fn rejects_non_positive_shape() {
        let config = CurveConfig {
            shape: 0.0,
            ..CurveConfig::default()
        };
        assert!(RayleighCurve::new(Timeline::new(5, 2.0).unwrap(), &config).is_err());
    }

    #[test]
    fn shape_coefficient_follows_config() {
        assert_relative_eq!(
            curve(10, 4.0, &CurveConfig::default()).shape_coefficient(),
            1.0 / 16.0
        );
        assert_relative_eq!(
            curve(10, 4.0, &CurveConfig::legacy()).shape_coefficient(),
            2.0 / 16.0
        );
    }

    #[test]
    fn default_shape_peaks_on_peak_day() {
        for (days, peak) in [(10, 4.0), (30, 12.0), (60, 21.5), (100, 37.3)] {
            let c = curve(days, peak, &CurveConfig::default());
            let raw = c.generate(1.0, f64::INFINITY);
            let day = argmax(raw.values()) as f64;
            assert!((day - peak).abs() <= 1.0, "days={days} peak={peak} got={day}");
        }
    }

    #[test]
    fn legacy_shape_peaks_before_peak_day() {
        let c = curve(100, 40.0, &CurveConfig::legacy());
        let day = argmax(c.generate(1.0, f64::INFINITY).values()) as f64;
        assert!((day - 40.0 / 2f64.sqrt()).abs() <= 1.0);
    }

    #[test]
    fn clamps_to_ceiling() {
        let c = curve(10, 4.0, &CurveConfig::default());
        let raw = c.generate(10_000.0, 500.0);
        assert!(raw.clamped_days() > 0);
        assert!(raw.values().iter().all(|&v| v <= 500.0));
    }

    #[test]
    fn normalize_hits_target_with_smoothing() {
        let c = curve(20, 8.0, &CurveConfig::default());
        let series = c.generate(3000.0, 200.0).normalize(3000.0, 0.95);
        let total: f64 = series.values().iter().sum();
        assert_relative_eq!(total, 3000.0 * 0.95, max_relative = 1e-12);
    }

    #[test]
    fn warns_when_clamped_days_are_lifted() {
        let c = curve(10, 4.0, &CurveConfig::default());

        let logged = warnings(|| {
            let series = c.generate(10_000.0, 500.0).normalize(10_000.0, 1.0);
            assert!(series.scale_factor() > 1.0);
        });
        assert!(logged.contains("capacity ceiling"), "{logged}");

        let logged = warnings(|| {
            let _ = c.generate(1000.0, f64::INFINITY).normalize(1000.0, 1.0);
        });
        assert!(logged.is_empty(), "{logged}");
    }

    #[test]
    fn zero_amplitude_yields_zero_series() {
        let c = curve(3, 1.0, &CurveConfig::default());
        let series = c.generate(0.0, 100.0).normalize(0.0, 1.0);
        assert_eq!(series.scale_factor(), 0.0);
        assert!(series.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn scaled_preserves_scale_factor() {
        let c = curve(5, 2.0, &CurveConfig::default());
        let series = c.generate(40.0, f64::INFINITY).normalize(40.0, 1.0);
        let factor = series.scale_factor();
        let cost = series.scaled(45.0);
        assert_relative_eq!(cost.scale_factor(), factor);
        assert_relative_eq!(cost.values().iter().sum::<f64>(), 1800.0, max_relative = 1e-12);
    }
}
