//! Marginal cost model.
//!
//! [`MarginalCost`] is a [`twine_core::Model`] that turns a
//! [`ProjectParams`] into a [`CostResult`]. The computation lives in the
//! internal `core` module; this adapter only owns the preset.

mod core;

pub use self::core::{
    ComplexityBand, DualModulePolicy, MarginalPreset, Productivity, ProductivityBand,
    ProductivityTable,
};

use twine_core::Model;

use super::{CostResult, EstimateError, ProjectParams};

/// Marginal cost model configured by a [`MarginalPreset`].
///
/// # Example
///
/// ```
/// use twine_core::Model;
/// use twine_cost_models::models::cost::{
///     ModuleConfig, ModuleSize, ProjectParams, marginal::MarginalCost,
/// };
///
/// let params = ProjectParams {
///     modules: vec![ModuleConfig::new("Contact Form", ModuleSize::Small, 1.0)],
///     ..ProjectParams::default()
/// };
///
/// let result = MarginalCost::default().call(&params).unwrap();
/// assert_eq!(result.cost_breakdown.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarginalCost {
    preset: MarginalPreset,
}

impl MarginalCost {
    /// Creates a model using `preset`.
    #[must_use]
    pub fn new(preset: MarginalPreset) -> Self {
        Self { preset }
    }

    /// The preset this model was configured with.
    #[must_use]
    pub fn preset(&self) -> &MarginalPreset {
        &self.preset
    }
}

impl Model for MarginalCost {
    type Input = ProjectParams;
    type Output = CostResult;
    type Error = EstimateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::estimate(&self.preset, input)
    }
}
