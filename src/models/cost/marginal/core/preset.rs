use crate::support::rayleigh::CurveConfig;

/// Productivity multiplier and labels for one complexity band.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductivityBand {
    /// Multiplier raised to the team scaling exponent.
    pub factor: f64,

    /// Label for projects without the two-module policy.
    pub label: String,

    /// Label used when the two-module policy applies.
    pub dual_label: String,
}

impl ProductivityBand {
    fn new(factor: f64, label: &str, dual_label: &str) -> Self {
        Self {
            factor,
            label: label.into(),
            dual_label: dual_label.into(),
        }
    }
}

/// Average-complexity thresholds and the band each one selects.
///
/// A project falls in `simple` when its average complexity is at most
/// `simple_max`, in `moderate` when at most `moderate_max`, and in `complex`
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductivityTable {
    pub simple_max: f64,
    pub moderate_max: f64,
    pub simple: ProductivityBand,
    pub moderate: ProductivityBand,
    pub complex: ProductivityBand,
}

impl ProductivityTable {
    fn with_thresholds(simple_max: f64, moderate_max: f64) -> Self {
        Self {
            simple_max,
            moderate_max,
            simple: ProductivityBand::new(
                1.4,
                "Simple project with experienced team",
                "Simple dual-module project",
            ),
            moderate: ProductivityBand::new(
                3.0,
                "Moderate complexity with mixed experience",
                "Moderate dual-module project",
            ),
            complex: ProductivityBand::new(
                3.6,
                "Complex project requiring high expertise",
                "Complex dual-module project",
            ),
        }
    }
}

/// Extra weight applied to projects with exactly two modules.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DualModulePolicy {
    /// Multiplier on the band's productivity factor.
    pub productivity_bonus: f64,

    /// Multiplier on the second module's effort.
    pub second_module_multiplier: f64,

    /// Replaces [`MarginalPreset::peak_complexity_divisor`].
    pub peak_complexity_divisor: f64,

    /// Reported efficiency label, in percent.
    pub efficiency_factor: f64,
}

/// Tunable constants of the marginal cost model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarginalPreset {
    pub productivity: ProductivityTable,

    /// Applied only when a project has exactly two modules.
    pub dual_module: Option<DualModulePolicy>,

    /// Fraction of the schedule at which a zero-complexity project would peak.
    pub peak_offset: f64,

    /// Average complexity is divided by this and added to `peak_offset`.
    pub peak_complexity_divisor: f64,

    /// Team size at which the productivity factor applies in full.
    ///
    /// The multiplier is `factor ^ (ln(team) / ln(base))`.
    pub team_scaling_base: f64,

    /// Reported efficiency label, in percent.
    pub efficiency_factor: f64,

    pub curve: CurveConfig,
}

impl Default for MarginalPreset {
    fn default() -> Self {
        Self::ten_point()
    }
}

impl MarginalPreset {
    /// Complexity rated on a 1–10 scale.
    ///
    /// Two-module projects get a productivity bonus, extra weight on the
    /// second module, and an earlier peak.
    #[must_use]
    pub fn ten_point() -> Self {
        Self {
            productivity: ProductivityTable::with_thresholds(3.0, 6.0),
            dual_module: Some(DualModulePolicy {
                productivity_bonus: 1.1,
                second_module_multiplier: 1.25,
                peak_complexity_divisor: 449.0,
                efficiency_factor: 110.0,
            }),
            peak_offset: 0.35,
            peak_complexity_divisor: 40.0,
            team_scaling_base: 4.0,
            efficiency_factor: 100.0,
            curve: CurveConfig::default().with_smoothing(0.95),
        }
    }

    /// Complexity rated from 1.0 to 2.0.
    ///
    /// Two-module projects only get the productivity bonus.
    #[must_use]
    pub fn unit_range() -> Self {
        Self {
            productivity: ProductivityTable::with_thresholds(1.3, 1.6),
            dual_module: Some(DualModulePolicy {
                productivity_bonus: 1.1,
                second_module_multiplier: 1.0,
                peak_complexity_divisor: 40.0,
                efficiency_factor: 110.0,
            }),
            ..Self::ten_point()
        }
    }

    /// The two-module policy, if it applies to a project of `module_count` modules.
    #[must_use]
    pub fn dual_module_policy(&self, module_count: usize) -> Option<&DualModulePolicy> {
        self.dual_module.as_ref().filter(|_| module_count == 2)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn overrides_from_json() {
        let mut config = serde_json::to_value(MarginalPreset::ten_point()).unwrap();
        config["team_scaling_base"] = serde_json::json!(2.0);
        config["dual_module"] = serde_json::Value::Null;
        config["productivity"]["simple_max"] = serde_json::json!(2.5);

        let preset: MarginalPreset = serde_json::from_value(config).unwrap();

        assert_eq!(preset.team_scaling_base, 2.0);
        assert_eq!(preset.dual_module_policy(2), None);
        assert_eq!(preset.productivity.simple_max, 2.5);
        assert_eq!(preset.curve, MarginalPreset::ten_point().curve);
    }
}
