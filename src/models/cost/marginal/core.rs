//! Marginal cost estimation.
//!
//! Total spend is module effort times the hourly rate, inflated by a
//! productivity multiplier with diminishing returns in team size. The spend
//! is spread over the schedule along a Rayleigh curve whose peak moves later
//! as average complexity grows.

mod preset;
mod productivity;

pub use preset::{DualModulePolicy, MarginalPreset, ProductivityBand, ProductivityTable};
pub use productivity::{ComplexityBand, Productivity};

use uom::si::{f64::Time, time::hour};

use crate::{
    models::cost::{
        BreakdownError, CostMetrics, CostResult, CostSummary, EstimateError, ModuleConfig,
        ProjectParams, Schedule,
    },
    support::{
        constraint::StrictlyPositive,
        rayleigh::{RayleighCurve, Timeline, days_for_effort},
    },
};

use productivity::classify;

/// Produces a marginal cost estimate for `params`.
///
/// # Errors
///
/// Returns an [`EstimateError`] if the project is invalid, the preset holds
/// an out-of-range value, or the resulting breakdown is malformed.
pub(super) fn estimate(
    preset: &MarginalPreset,
    params: &ProjectParams,
) -> Result<CostResult, EstimateError> {
    let project = params.validate()?;
    let hours_per_day =
        EstimateError::positive_config("hours_per_day", preset.curve.daily_hours())?;
    let smoothing = EstimateError::positive_config("smoothing", preset.curve.smoothing)?;
    let scaling_log =
        EstimateError::positive_config("team_scaling_base", preset.team_scaling_base.ln())?;

    let modules = project.modules();
    let rate = project.developer_rate();
    let team_size = project.team_size();
    let average_complexity = project.average_complexity();
    let dual = preset.dual_module_policy(modules.len());

    let productivity = classify(preset, average_complexity, dual);
    let total_effort = total_effort(modules, dual);
    let multiplier = team_multiplier(productivity.factor, team_size, scaling_log);
    let development_cost = total_effort * rate * multiplier;

    tracing::debug!(
        modules = modules.len(),
        average_complexity,
        band = ?productivity.band,
        factor = productivity.factor,
        total_effort,
        multiplier,
        development_cost,
        "marginal cost classification"
    );

    let team_hours = StrictlyPositive::new(hours_per_day * f64::from(team_size))
        .map_err(|source| EstimateError::InvalidConfig {
            field: "hours_per_day",
            source,
        })?;
    let total_days = days_for_effort(total_effort, team_hours, preset.curve.max_days)
        .map_err(BreakdownError::from)?;
    let divisor = EstimateError::positive_config(
        "peak_complexity_divisor",
        dual.map_or(preset.peak_complexity_divisor, |d| d.peak_complexity_divisor),
    )?;
    // Complexities far outside the preset's scale would push the peak past
    // the last day.
    let peak_day = (total_days as f64 * (preset.peak_offset + average_complexity / divisor))
        .min(total_days as f64);

    let timeline = Timeline::new(total_days, peak_day).map_err(BreakdownError::Schedule)?;
    let curve = RayleighCurve::new(timeline, &preset.curve).map_err(|source| {
        EstimateError::InvalidConfig {
            field: "shape",
            source,
        }
    })?;

    let daily_capacity = project.daily_capacity(hours_per_day);
    let series = curve
        .generate(development_cost, daily_capacity)
        .normalize(development_cost, smoothing);
    let scale_factor = series.scale_factor();
    let costs = series.into_values();

    let efficiency_factor = dual.map_or(preset.efficiency_factor, |d| d.efficiency_factor);
    let metrics = CostMetrics::from_costs(
        &costs,
        Time::new::<hour>(total_effort),
        efficiency_factor,
        productivity.label,
    );
    let summary = CostSummary {
        development: development_cost,
        overhead: project.initial_cost(),
        requirements: 0.0,
        testing: 0.0,
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

/// Sum of module effort, weighting the second module when the two-module
/// policy applies.
fn total_effort(modules: &[ModuleConfig], dual: Option<&DualModulePolicy>) -> f64 {
    modules
        .iter()
        .enumerate()
        .map(|(index, module)| {
            let hours = module.raw_hours();
            match dual {
                Some(policy) if index == 1 => hours * policy.second_module_multiplier,
                _ => hours,
            }
        })
        .sum()
}

/// Productivity multiplier `factor ^ (ln(team) / ln(base))`.
///
/// A single developer always gets a multiplier of one.
fn team_multiplier(factor: f64, team_size: u32, scaling_log: f64) -> f64 {
    factor.powf(f64::from(team_size).ln() / scaling_log)
}
