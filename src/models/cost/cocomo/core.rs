//! COCOMO-adapted cost estimation.
//!
//! Raw module hours are sized in KLOC to pick a project archetype, whose
//! factor inflates the effort. The effort is spread over the schedule along a
//! Rayleigh curve peaking at a fixed fraction of the project, normalized in
//! the effort domain, and only then converted to cost.
//!
//! Cost per effort hour is `rate × team / √team`, so larger teams finish
//! sooner but pay a coordination overhead that grows with `√team`.

mod preset;
mod project_type;

pub use preset::{ClassLimit, CocomoPreset, ProjectClass, SizeEstimate};
pub use project_type::{Classification, ProjectType};

use uom::si::{f64::Time, time::hour};

use crate::{
    models::cost::{
        BreakdownError, CostMetrics, CostResult, CostSummary, EstimateError, ProjectParams,
        Schedule,
    },
    support::{
        constraint::StrictlyPositive,
        rayleigh::{RayleighCurve, Timeline, days_for_effort},
    },
};

use project_type::classify;

/// Produces a COCOMO-adapted estimate for `params`.
///
/// # Errors
///
/// Returns an [`EstimateError`] if the project is invalid, the preset holds
/// an out-of-range value, or the resulting breakdown is malformed.
pub(super) fn estimate(
    preset: &CocomoPreset,
    params: &ProjectParams,
) -> Result<CostResult, EstimateError> {
    let project = params.validate()?;
    let hours_per_day =
        EstimateError::positive_config("hours_per_day", preset.curve.daily_hours())?;
    let smoothing = EstimateError::positive_config("smoothing", preset.curve.smoothing)?;
    let peak_fraction = EstimateError::positive_config("peak_fraction", preset.peak_fraction)?;

    let rate = project.developer_rate();
    let team_size = project.team_size();
    let raw_hours = project.raw_hours();

    let classification = classify(preset, raw_hours, team_size);
    let total_effort = raw_hours * classification.factor;
    let efficiency = team_efficiency(team_size);
    let cost_per_hour = rate * f64::from(team_size) * efficiency;

    tracing::debug!(
        raw_hours,
        kloc = classification.kloc,
        project_type = ?classification.project_type,
        factor = classification.factor,
        total_effort,
        efficiency,
        cost_per_hour,
        "cocomo classification"
    );

    let team_hours = StrictlyPositive::new(hours_per_day * f64::from(team_size))
        .map_err(|source| EstimateError::InvalidConfig {
            field: "hours_per_day",
            source,
        })?;
    let total_days = days_for_effort(total_effort, team_hours, preset.curve.max_days)
        .map_err(BreakdownError::from)?;
    let peak_day = (total_days as f64 * peak_fraction).min(total_days as f64);

    let timeline = Timeline::new(total_days, peak_day).map_err(BreakdownError::Schedule)?;
    let curve = RayleighCurve::new(timeline, &preset.curve).map_err(|source| {
        EstimateError::InvalidConfig {
            field: "shape",
            source,
        }
    })?;

    // Clamp in the effort domain against the effort that fills the team's
    // daily billing capacity.
    let daily_capacity = project.daily_capacity(hours_per_day);
    let effort_ceiling = daily_capacity / cost_per_hour;
    let series = curve
        .generate(total_effort, effort_ceiling)
        .normalize(total_effort, smoothing);
    let scale_factor = series.scale_factor();
    let costs = series.scaled(cost_per_hour).into_values();

    let efficiency_factor = total_effort / (total_days as f64 * hours_per_day) * 100.0;
    let metrics = CostMetrics::from_costs(
        &costs,
        Time::new::<hour>(total_effort),
        efficiency_factor,
        classification.label,
    );
    let budget = total_effort * rate;
    let summary = CostSummary {
        development: costs.iter().sum(),
        overhead: project.initial_cost(),
        requirements: budget * preset.requirements_share,
        testing: budget * preset.testing_share,
    };
    let schedule = Schedule {
        total_days,
        peak_day,
        daily_capacity,
        scale_factor,
    };

    let result =
        CostResult::from_daily_costs(project.initial_cost(), &costs, metrics, summary, schedule);
    result.check()?;
    Ok(result)
}

/// Coordination penalty `1 / √team`.
fn team_efficiency(team_size: u32) -> f64 {
    1.0 / f64::from(team_size).sqrt()
}
