//! COCOMO-adapted cost model.
//!
//! [`CocomoCost`] is a [`twine_core::Model`] that turns a [`ProjectParams`]
//! into a [`CostResult`]. The computation lives in the internal `core`
//! module; this adapter only owns the preset.

mod core;

pub use self::core::{
    ClassLimit, Classification, CocomoPreset, ProjectClass, ProjectType, SizeEstimate,
};

use twine_core::Model;

use super::{CostResult, EstimateError, ProjectParams};

/// COCOMO-adapted cost model configured by a [`CocomoPreset`].
///
/// # Example
///
/// ```
/// use twine_core::Model;
/// use twine_cost_models::models::cost::{
///     ModuleConfig, ModuleSize, ProjectParams, cocomo::CocomoCost,
/// };
///
/// let params = ProjectParams {
///     modules: vec![
///         ModuleConfig::new("Admin Dashboard", ModuleSize::Large, 1.5),
///         ModuleConfig::new("Custom CMS", ModuleSize::ExtraLarge, 2.0),
///     ],
///     team_size: 2,
///     ..ProjectParams::default()
/// };
///
/// let result = CocomoCost::default().call(&params).unwrap();
/// assert_eq!(result.schedule.total_days, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CocomoCost {
    preset: CocomoPreset,
}

impl CocomoCost {
    /// Creates a model using `preset`.
    #[must_use]
    pub fn new(preset: CocomoPreset) -> Self {
        Self { preset }
    }

    /// The preset this model was configured with.
    #[must_use]
    pub fn preset(&self) -> &CocomoPreset {
        &self.preset
    }
}

impl Model for CocomoCost {
    type Input = ProjectParams;
    type Output = CostResult;
    type Error = EstimateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::estimate(&self.preset, input)
    }
}
