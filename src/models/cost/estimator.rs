//! Model selection and side-by-side comparison.

use std::fmt;

use twine_core::Model;
use uom::si::f64::Time;

use super::{
    CostResult, EstimateError, ProjectParams,
    cocomo::{CocomoCost, CocomoPreset},
    marginal::{MarginalCost, MarginalPreset},
};

/// Identifies one of the available cost models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelKind {
    Marginal,
    Cocomo,
}

impl ModelKind {
    pub const ALL: [Self; 2] = [Self::Marginal, Self::Cocomo];
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marginal => f.write_str("Marginal Cost"),
            Self::Cocomo => f.write_str("Cocomo II"),
        }
    }
}

/// A [`CostResult`] tagged with the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Marginal(CostResult),
    Cocomo(CostResult),
}

impl Estimate {
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Marginal(_) => ModelKind::Marginal,
            Self::Cocomo(_) => ModelKind::Cocomo,
        }
    }

    #[must_use]
    pub fn result(&self) -> &CostResult {
        match self {
            Self::Marginal(result) | Self::Cocomo(result) => result,
        }
    }

    #[must_use]
    pub fn into_result(self) -> CostResult {
        match self {
            Self::Marginal(result) | Self::Cocomo(result) => result,
        }
    }
}

/// Runs whichever model the caller selects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    marginal: MarginalCost,
    cocomo: CocomoCost,
}

impl Estimator {
    /// Creates an estimator with explicit presets for both models.
    #[must_use]
    pub fn new(marginal: MarginalPreset, cocomo: CocomoPreset) -> Self {
        Self {
            marginal: MarginalCost::new(marginal),
            cocomo: CocomoCost::new(cocomo),
        }
    }

    /// Estimates `params` with the model identified by `kind`.
    ///
    /// # Errors
    ///
    /// Returns an [`EstimateError`] if the selected model rejects the input.
    pub fn estimate(
        &self,
        kind: ModelKind,
        params: &ProjectParams,
    ) -> Result<Estimate, EstimateError> {
        tracing::debug!(model = %kind, modules = params.modules.len(), "estimating");
        match kind {
            ModelKind::Marginal => self.marginal.call(params).map(Estimate::Marginal),
            ModelKind::Cocomo => self.cocomo.call(params).map(Estimate::Cocomo),
        }
    }

    /// Estimates `params` with every model.
    ///
    /// # Errors
    ///
    /// Returns the first [`EstimateError`] encountered.
    pub fn estimate_all(&self, params: &ProjectParams) -> Result<Estimates, EstimateError> {
        let mut estimates = Estimates::default();
        for kind in ModelKind::ALL {
            estimates.insert(self.estimate(kind, params)?);
        }
        Ok(estimates)
    }
}

/// The latest result from each model, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimates {
    marginal: Option<CostResult>,
    cocomo: Option<CostResult>,
}

impl Estimates {
    /// Stores `estimate`, returning the result it replaces.
    pub fn insert(&mut self, estimate: Estimate) -> Option<CostResult> {
        match estimate {
            Estimate::Marginal(result) => self.marginal.replace(result),
            Estimate::Cocomo(result) => self.cocomo.replace(result),
        }
    }

    #[must_use]
    pub fn get(&self, kind: ModelKind) -> Option<&CostResult> {
        match kind {
            ModelKind::Marginal => self.marginal.as_ref(),
            ModelKind::Cocomo => self.cocomo.as_ref(),
        }
    }

    /// Drops every stored result.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Compares the two models once both have produced a result.
    #[must_use]
    pub fn comparison(&self) -> Option<ModelComparison> {
        Some(ModelComparison::new(self.marginal.as_ref()?, self.cocomo.as_ref()?))
    }
}

/// Differences between a COCOMO and a marginal estimate (`cocomo - marginal`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelComparison {
    pub total_cost: f64,
    pub average_daily_cost: f64,
    pub estimated_effort: Time,

    /// Total cost difference relative to the marginal estimate, in percent.
    ///
    /// Zero when the marginal total is zero.
    pub percentage_variance: f64,
}

impl ModelComparison {
    #[must_use]
    pub fn new(marginal: &CostResult, cocomo: &CostResult) -> Self {
        let total_cost = cocomo.total_cost - marginal.total_cost;
        let percentage_variance = if marginal.total_cost == 0.0 {
            0.0
        } else {
            total_cost / marginal.total_cost * 100.0
        };

        Self {
            total_cost,
            average_daily_cost: cocomo.metrics.average_daily_cost
                - marginal.metrics.average_daily_cost,
            estimated_effort: cocomo.metrics.estimated_effort - marginal.metrics.estimated_effort,
            percentage_variance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::hour;

    use crate::models::cost::{
        ModuleSize, ParamsError,
        test_support::{module, project},
    };

    fn params() -> ProjectParams {
        project(
            vec![
                module(ModuleSize::Large, 2.0),
                module(ModuleSize::Medium, 1.0),
                module(ModuleSize::Small, 1.5),
            ],
            45.0,
            200.0,
            2,
        )
    }

    #[test]
    fn tags_results_by_model() {
        let estimator = Estimator::default();
        for kind in ModelKind::ALL {
            let estimate = estimator.estimate(kind, &params()).unwrap();
            assert_eq!(estimate.kind(), kind);
            assert!(!estimate.result().cost_breakdown.is_empty());
        }
    }

    #[test]
    fn matches_direct_model_calls() {
        let estimator = Estimator::default();
        let direct = MarginalCost::default().call(&params()).unwrap();
        let selected = estimator
            .estimate(ModelKind::Marginal, &params())
            .unwrap()
            .into_result();
        assert_eq!(direct, selected);
    }

    #[test]
    fn keeps_latest_result_per_model() {
        let estimator = Estimator::default();
        let mut estimates = Estimates::default();
        assert!(estimates.get(ModelKind::Cocomo).is_none());
        assert!(estimates.comparison().is_none());

        let first = estimator.estimate(ModelKind::Cocomo, &params()).unwrap();
        assert!(estimates.insert(first.clone()).is_none());
        assert_eq!(estimates.insert(first.clone()), Some(first.into_result()));
        assert!(estimates.get(ModelKind::Marginal).is_none());

        estimates.clear();
        assert!(estimates.get(ModelKind::Cocomo).is_none());
    }

    #[test]
    fn compares_both_models() {
        let estimates = Estimator::default().estimate_all(&params()).unwrap();
        let marginal = estimates.get(ModelKind::Marginal).unwrap();
        let cocomo = estimates.get(ModelKind::Cocomo).unwrap();
        let comparison = estimates.comparison().unwrap();

        assert_relative_eq!(
            comparison.total_cost,
            cocomo.total_cost - marginal.total_cost
        );
        assert_relative_eq!(
            comparison.percentage_variance,
            (cocomo.total_cost - marginal.total_cost) / marginal.total_cost * 100.0
        );
        // Same raw hours and an organic project, so efforts match.
        assert_relative_eq!(comparison.estimated_effort.get::<hour>(), 0.0);
    }

    #[test]
    fn propagates_validation_errors() {
        let estimator = Estimator::default();
        let empty = ProjectParams::default();
        for kind in ModelKind::ALL {
            assert_eq!(
                estimator.estimate(kind, &empty).unwrap_err(),
                EstimateError::InvalidProjectParameters(ParamsError::NoModules)
            );
        }
    }
}
