//! Cost curves and the metrics derived from them.

use std::fmt;

use thiserror::Error;
use uom::si::{f64::Time, time::hour};

use crate::support::{constraint::ConstraintError, rayleigh::ScheduleTooLong};

/// Relative tolerance used when checking the cumulative series.
const CUMULATIVE_TOL: f64 = 1e-9;

/// Project phase a day belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Phase {
    Development,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("Development"),
        }
    }
}

/// Cost of a single project day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Day number, starting at one.
    pub day: usize,

    /// Spend on this day.
    pub cost: f64,

    /// Initial cost plus all spend up to and including this day.
    pub cumulative_cost: f64,

    pub phase: Phase,
}

/// Aggregate figures derived from a breakdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMetrics {
    pub average_daily_cost: f64,
    pub peak_cost: f64,

    /// Total effort the model scheduled.
    pub estimated_effort: Time,

    /// Efficiency in percent. Whether this is measured or a fixed label
    /// depends on the model.
    pub efficiency_factor: f64,

    /// Human-readable classification of the project and team.
    pub team_productivity: String,
}

impl CostMetrics {
    /// Computes the average and peak from daily costs.
    pub(crate) fn from_costs(
        costs: &[f64],
        estimated_effort: Time,
        efficiency_factor: f64,
        team_productivity: impl Into<String>,
    ) -> Self {
        let average_daily_cost = if costs.is_empty() {
            0.0
        } else {
            costs.iter().sum::<f64>() / costs.len() as f64
        };
        let peak_cost = costs.iter().copied().fold(0.0, f64::max);

        Self {
            average_daily_cost,
            peak_cost,
            estimated_effort,
            efficiency_factor,
            team_productivity: team_productivity.into(),
        }
    }
}

/// Spend split by activity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostSummary {
    pub development: f64,
    pub overhead: f64,
    pub requirements: f64,
    pub testing: f64,
}

/// How the curve was laid out over the calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub total_days: usize,

    /// Day the curve was shaped to peak at.
    pub peak_day: f64,

    /// Most the team can bill in one day.
    pub daily_capacity: f64,

    /// Normalization factor applied to the clamped series.
    ///
    /// When greater than one, clamped days end up above `daily_capacity`,
    /// bounded by `daily_capacity × scale_factor`.
    pub scale_factor: f64,
}

impl Schedule {
    /// Upper bound on any single day's cost after normalization.
    #[must_use]
    pub fn daily_cost_bound(&self) -> f64 {
        self.daily_capacity * self.scale_factor.max(1.0)
    }
}

/// Whole-day durations for one developer and for the whole team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub individual_days: u64,
    pub team_days: u64,
}

/// Resource utilization of a single day, in percent of team capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utilization {
    pub day: usize,
    pub utilization: f64,
}

/// A complete estimate produced by a cost model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostResult {
    /// Initial cost plus every day's spend.
    pub total_cost: f64,

    /// Daily spend, ordered by day.
    pub cost_breakdown: Vec<CostBreakdown>,

    pub metrics: CostMetrics,
    pub summary: CostSummary,
    pub schedule: Schedule,
}

impl CostResult {
    /// Builds a result from daily costs, accumulating on top of `initial_cost`.
    pub(crate) fn from_daily_costs(
        initial_cost: f64,
        costs: &[f64],
        metrics: CostMetrics,
        summary: CostSummary,
        schedule: Schedule,
    ) -> Self {
        let mut cumulative_cost = initial_cost;
        let cost_breakdown: Vec<_> = costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| {
                cumulative_cost += cost;
                CostBreakdown {
                    day: i + 1,
                    cost,
                    cumulative_cost,
                    phase: Phase::Development,
                }
            })
            .collect();

        Self {
            total_cost: cumulative_cost,
            cost_breakdown,
            metrics,
            summary,
            schedule,
        }
    }

    /// Initial cost implied by the first day of the breakdown.
    #[must_use]
    pub fn initial_cost(&self) -> Option<f64> {
        self.cost_breakdown
            .first()
            .map(|first| first.cumulative_cost - first.cost)
    }

    /// Checks the structural invariants of the breakdown.
    ///
    /// # Errors
    ///
    /// Returns a [`BreakdownError`] if the breakdown is empty, contains
    /// non-finite or negative costs, is not numbered `1..=n`, or its
    /// cumulative series is inconsistent.
    pub fn check(&self) -> Result<(), BreakdownError> {
        let Some(first) = self.cost_breakdown.first() else {
            return Err(BreakdownError::Empty);
        };

        let mut previous = first.cumulative_cost - first.cost;
        for (index, entry) in self.cost_breakdown.iter().enumerate() {
            let day = entry.day;
            if day != index + 1 {
                return Err(BreakdownError::Misnumbered { index, day });
            }
            if !entry.cost.is_finite() || !entry.cumulative_cost.is_finite() {
                return Err(BreakdownError::NonFinite { day });
            }
            if entry.cost < 0.0 {
                return Err(BreakdownError::NegativeCost { day });
            }
            if entry.cumulative_cost < previous {
                return Err(BreakdownError::Decreasing { day });
            }
            let expected = previous + entry.cost;
            if !close(entry.cumulative_cost, expected) {
                return Err(BreakdownError::CumulativeMismatch { day });
            }
            previous = entry.cumulative_cost;
        }

        if !close(self.total_cost, previous) {
            return Err(BreakdownError::TotalMismatch);
        }
        Ok(())
    }

    /// Durations in whole days, as if the effort were worked at `hours_per_day`.
    #[must_use]
    pub fn durations(&self, hours_per_day: Time, team_size: u32) -> Durations {
        let hours = self.metrics.estimated_effort.get::<hour>();
        let individual_days = (hours / hours_per_day.get::<hour>()).ceil().max(0.0) as u64;
        let team_days = individual_days.div_ceil(u64::from(team_size.max(1)));
        Durations {
            individual_days,
            team_days,
        }
    }

    /// Per-day spend as a percentage of team capacity.
    #[must_use]
    pub fn utilization(&self) -> Vec<Utilization> {
        let capacity = self.schedule.daily_capacity;
        self.cost_breakdown
            .iter()
            .map(|entry| Utilization {
                day: entry.day,
                utilization: if capacity > 0.0 {
                    entry.cost / capacity * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// First and last day of the run of days sharing the maximum cost.
    ///
    /// When clamping binds, several consecutive days tie at the maximum.
    #[must_use]
    pub fn peak_days(&self) -> Option<(usize, usize)> {
        let peak = self.metrics.peak_cost;
        let mut days = self
            .cost_breakdown
            .iter()
            .filter(|entry| close(entry.cost, peak))
            .map(|entry| entry.day);
        let first = days.next()?;
        let last = days.last().unwrap_or(first);
        Some((first, last))
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= CUMULATIVE_TOL * a.abs().max(b.abs()).max(1.0)
}

/// Structural problems with a computed breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakdownError {
    #[error("cost breakdown is empty")]
    Empty,

    #[error("entry {index} is numbered day {day}")]
    Misnumbered { index: usize, day: usize },

    #[error("day {day} has a non-finite cost")]
    NonFinite { day: usize },

    #[error("day {day} has a negative cost")]
    NegativeCost { day: usize },

    #[error("cumulative cost decreases on day {day}")]
    Decreasing { day: usize },

    #[error("cumulative cost on day {day} does not match the daily costs")]
    CumulativeMismatch { day: usize },

    #[error("total cost does not match the last cumulative cost")]
    TotalMismatch,

    /// The schedule length or peak day was not strictly positive.
    #[error("schedule is degenerate")]
    Schedule(#[source] ConstraintError),

    #[error(transparent)]
    TooLong(#[from] ScheduleTooLong),
}
