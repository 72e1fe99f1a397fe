use approx::assert_relative_eq;

use super::{CostResult, ModuleConfig, ModuleSize, ProjectParams};

pub(crate) fn module(size: ModuleSize, complexity: f64) -> ModuleConfig {
    ModuleConfig::new(format!("{size:?} module"), size, complexity)
}

pub(crate) fn project(
    modules: Vec<ModuleConfig>,
    developer_rate: f64,
    initial_cost: f64,
    team_size: u32,
) -> ProjectParams {
    ProjectParams {
        modules,
        developer_rate,
        initial_cost,
        team_size,
    }
}

/// Asserts the invariants every estimate must satisfy, regardless of model.
pub(crate) fn assert_curve_invariants(result: &CostResult, initial_cost: f64) {
    result.check().expect("breakdown should be well formed");

    let breakdown = &result.cost_breakdown;
    assert_eq!(breakdown.len(), result.schedule.total_days);

    // Total conservation.
    let spent: f64 = breakdown.iter().map(|b| b.cost).sum();
    assert_relative_eq!(result.total_cost, initial_cost + spent, max_relative = 1e-9);
    assert_relative_eq!(
        breakdown[0].cumulative_cost,
        initial_cost + breakdown[0].cost,
        max_relative = 1e-12
    );

    // Monotonic cumulative series.
    assert!(
        breakdown
            .windows(2)
            .all(|w| w[1].cumulative_cost >= w[0].cumulative_cost)
    );

    // Capacity ceiling, lifted by the normalization factor when it exceeds one.
    let bound = result.schedule.daily_cost_bound() * (1.0 + 1e-9);
    for entry in breakdown {
        assert!(
            entry.cost <= bound,
            "day {} cost {} exceeds bound {bound}",
            entry.day,
            entry.cost
        );
    }

    // Peak location: the run of maximal days sits within one day of the peak.
    // When every day clamps, the run spans the whole schedule and this holds
    // trivially; short schedules with larger teams land there.
    let (first, last) = result.peak_days().expect("non-empty breakdown");
    let peak = result.schedule.peak_day;
    assert!(
        first as f64 - 1.0 <= peak && peak <= last as f64 + 1.0,
        "peak day {peak} outside maximal run {first}..={last}"
    );
}
