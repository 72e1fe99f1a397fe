//! Project descriptions consumed by the cost models.

use thiserror::Error;
use uom::si::{f64::Time, time::hour};

use crate::support::constraint::{
    Constrained, ConstraintError, NonNegative, StrictlyPositive,
};

/// Size category of a work module.
///
/// Each category maps to a fixed base effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ModuleSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl ModuleSize {
    /// Every size category, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::ExtraLarge];

    /// Base effort before any complexity adjustment.
    #[must_use]
    pub fn base_effort(self) -> Time {
        Time::new::<hour>(self.base_hours())
    }

    /// Base effort in hours.
    #[must_use]
    pub fn base_hours(self) -> f64 {
        match self {
            Self::Small => 8.0,
            Self::Medium => 16.0,
            Self::Large => 24.0,
            Self::ExtraLarge => 40.0,
        }
    }

    /// Typical work items that fit this size category.
    #[must_use]
    pub fn examples(self) -> &'static [&'static str] {
        match self {
            Self::Small => &[
                "About Us page",
                "Contact Form",
                "Simple FAQ page",
                "Footer component",
            ],
            Self::Medium => &[
                "User Authentication",
                "Blog listing",
                "Simple Dashboard",
                "Search functionality",
            ],
            Self::Large => &[
                "Product Catalog with filters",
                "User Profile with editing",
                "Admin Dashboard",
                "Payment Integration",
            ],
            Self::ExtraLarge => &[
                "Complex E-commerce functionality",
                "Real-time Chat system",
                "Advanced Analytics Dashboard",
                "Custom CMS",
            ],
        }
    }
}

/// A single unit of work in a project.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleConfig {
    /// Display name; must not be blank.
    pub name: String,

    /// Size category.
    pub size: ModuleSize,

    /// Strictly positive multiplier on the base effort.
    pub complexity: f64,
}

impl ModuleConfig {
    /// Creates a module description.
    pub fn new(name: impl Into<String>, size: ModuleSize, complexity: f64) -> Self {
        Self {
            name: name.into(),
            size,
            complexity,
        }
    }

    /// Base hours scaled by complexity.
    #[must_use]
    pub fn raw_hours(&self) -> f64 {
        self.size.base_hours() * self.complexity
    }
}

/// Everything a cost model needs to produce an estimate.
///
/// Module order is significant for models with position-dependent rules.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectParams {
    /// Work modules, in the order they were defined.
    pub modules: Vec<ModuleConfig>,

    /// Hourly rate per developer.
    pub developer_rate: f64,

    /// Fixed cost incurred before the first day of work.
    pub initial_cost: f64,

    /// Number of developers working in parallel.
    pub team_size: u32,
}

impl Default for ProjectParams {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            developer_rate: 45.0,
            initial_cost: 200.0,
            team_size: 1,
        }
    }
}

impl ProjectParams {
    /// Checks every precondition the cost models rely on.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] describing the first violated precondition.
    pub fn validate(&self) -> Result<ValidProject<'_>, ParamsError> {
        if self.modules.is_empty() {
            return Err(ParamsError::NoModules);
        }

        for (index, module) in self.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(ParamsError::BlankModuleName { index });
            }
            finite(module.complexity)
                .and_then(StrictlyPositive::new)
                .map_err(|source| ParamsError::InvalidComplexity { index, source })?;
        }

        let developer_rate = finite(self.developer_rate)
            .and_then(StrictlyPositive::new)
            .map_err(ParamsError::InvalidDeveloperRate)?;
        let initial_cost = finite(self.initial_cost)
            .and_then(NonNegative::new)
            .map_err(ParamsError::InvalidInitialCost)?;
        let team_size =
            StrictlyPositive::new(self.team_size).map_err(ParamsError::InvalidTeamSize)?;

        Ok(ValidProject {
            modules: &self.modules,
            developer_rate,
            initial_cost,
            team_size,
        })
    }
}

fn finite(value: f64) -> Result<f64, ConstraintError> {
    if value.is_nan() {
        Err(ConstraintError::NotANumber)
    } else if value.is_infinite() {
        Err(ConstraintError::NotFinite)
    } else {
        Ok(value)
    }
}

/// A borrowed view of [`ProjectParams`] that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidProject<'a> {
    modules: &'a [ModuleConfig],
    developer_rate: Constrained<f64, StrictlyPositive>,
    initial_cost: Constrained<f64, NonNegative>,
    team_size: Constrained<u32, StrictlyPositive>,
}

impl ValidProject<'_> {
    /// Non-empty module list.
    #[must_use]
    pub fn modules(&self) -> &[ModuleConfig] {
        self.modules
    }

    #[must_use]
    pub fn developer_rate(&self) -> f64 {
        self.developer_rate.get()
    }

    #[must_use]
    pub fn initial_cost(&self) -> f64 {
        self.initial_cost.get()
    }

    #[must_use]
    pub fn team_size(&self) -> u32 {
        self.team_size.get()
    }

    /// Sum of complexity-adjusted module hours.
    #[must_use]
    pub fn raw_hours(&self) -> f64 {
        self.modules.iter().map(ModuleConfig::raw_hours).sum()
    }

    /// Mean module complexity.
    #[must_use]
    pub fn average_complexity(&self) -> f64 {
        let total: f64 = self.modules.iter().map(|m| m.complexity).sum();
        total / self.modules.len() as f64
    }

    /// Most the whole team can bill in one day.
    #[must_use]
    pub fn daily_capacity(&self, hours_per_day: f64) -> f64 {
        self.developer_rate() * hours_per_day * f64::from(self.team_size())
    }
}

/// Reasons a [`ProjectParams`] value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("project has no modules")]
    NoModules,

    #[error("module {index} has a blank name")]
    BlankModuleName { index: usize },

    #[error("module {index} has an invalid complexity")]
    InvalidComplexity {
        /// Position of the module in the project.
        index: usize,

        #[source]
        source: ConstraintError,
    },

    #[error("developer rate is invalid")]
    InvalidDeveloperRate(#[source] ConstraintError),

    #[error("initial cost is invalid")]
    InvalidInitialCost(#[source] ConstraintError),

    #[error("team size is invalid")]
    InvalidTeamSize(#[source] ConstraintError),
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::cost::test_support::{module, project};

    #[test]
    fn base_effort_table() {
        let hours: Vec<f64> = ModuleSize::ALL
            .iter()
            .map(|size| size.base_effort().get::<hour>())
            .collect();
        assert_eq!(hours, [8.0, 16.0, 24.0, 40.0]);
    }

    #[test]
    fn every_size_has_examples() {
        for size in ModuleSize::ALL {
            assert!(!size.examples().is_empty());
        }
    }

    #[test]
    fn valid_project_aggregates() {
        let params = project(
            vec![
                module(ModuleSize::Small, 1.0),
                module(ModuleSize::ExtraLarge, 2.0),
            ],
            50.0,
            0.0,
            3,
        );
        let valid = params.validate().unwrap();

        assert_relative_eq!(valid.raw_hours(), 88.0);
        assert_relative_eq!(valid.average_complexity(), 1.5);
        assert_relative_eq!(valid.daily_capacity(8.0), 1200.0);
    }

    #[test]
    fn rejects_empty_module_list() {
        let params = ProjectParams::default();
        assert_eq!(params.validate().unwrap_err(), ParamsError::NoModules);
    }

    #[test]
    fn rejects_blank_module_name() {
        let mut params = project(
            vec![module(ModuleSize::Small, 1.0), module(ModuleSize::Small, 1.0)],
            45.0,
            200.0,
            1,
        );
        params.modules[1].name = "   ".into();

        assert_eq!(
            params.validate().unwrap_err(),
            ParamsError::BlankModuleName { index: 1 }
        );
    }

    #[test]
    fn rejects_bad_complexity() {
        for (complexity, source) in [
            (0.0, ConstraintError::Zero),
            (-1.0, ConstraintError::Negative),
            (f64::NAN, ConstraintError::NotANumber),
            (f64::INFINITY, ConstraintError::NotFinite),
        ] {
            let params = project(vec![module(ModuleSize::Medium, complexity)], 45.0, 0.0, 1);
            assert_eq!(
                params.validate().unwrap_err(),
                ParamsError::InvalidComplexity { index: 0, source }
            );
        }
    }

    #[test]
    fn rejects_bad_rate_cost_and_team() {
        let modules = vec![module(ModuleSize::Medium, 1.0)];

        let params = project(modules.clone(), 0.0, 0.0, 1);
        assert_eq!(
            params.validate().unwrap_err(),
            ParamsError::InvalidDeveloperRate(ConstraintError::Zero)
        );

        let params = project(modules.clone(), 45.0, -1.0, 1);
        assert_eq!(
            params.validate().unwrap_err(),
            ParamsError::InvalidInitialCost(ConstraintError::Negative)
        );

        let params = project(modules, 45.0, 0.0, 0);
        assert_eq!(
            params.validate().unwrap_err(),
            ParamsError::InvalidTeamSize(ConstraintError::Zero)
        );
    }
}
