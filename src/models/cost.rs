//! Software project cost-curve models.
//!
//! Both models take the same [`ProjectParams`] and return a [`CostResult`]:
//! a day-by-day spend curve plus aggregate metrics. They differ in how they
//! size total effort and where they place the peak.
//!
//! - [`marginal::MarginalCost`]: complexity-banded productivity multiplier
//!   with diminishing returns in team size; the peak moves later as
//!   complexity grows.
//! - [`cocomo::CocomoCost`]: COCOMO archetype factor and a `1/√team`
//!   coordination penalty; the peak sits at a fixed fraction of the schedule.
//!
//! Every estimate satisfies the same invariants:
//!
//! - The last cumulative cost equals the initial cost plus every day's spend.
//! - The cumulative series never decreases.
//! - No day exceeds `daily_capacity × max(1, scale_factor)` (see [`Schedule`]).
//! - The run of maximal days sits within one day of the schedule's peak day,
//!   which never lies past the last day.
//!
//! Effort that would need more than the curve's `max_days` is rejected with
//! [`BreakdownError::TooLong`].
//!
//! Estimation is pure: each call validates its input, allocates a fresh
//! result, and shares no state with other calls.

pub mod cocomo;
pub mod estimator;
pub mod marginal;

mod error;
mod project;
mod result;

#[cfg(test)]
mod test_support;

pub use error::EstimateError;
pub use estimator::{Estimate, Estimates, Estimator, ModelComparison, ModelKind};
pub use project::{ModuleConfig, ModuleSize, ParamsError, ProjectParams, ValidProject};
pub use result::{
    BreakdownError, CostBreakdown, CostMetrics, CostResult, CostSummary, Durations, Phase,
    Schedule, Utilization,
};
