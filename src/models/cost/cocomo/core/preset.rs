use crate::support::rayleigh::CurveConfig;

/// How raw module hours translate into thousands of lines of code.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeEstimate {
    /// `KLOC = hours / divisor`.
    HoursPerKloc(f64),

    /// `KLOC = hours × loc_per_hour / 1000`.
    LocPerHour(f64),
}

impl SizeEstimate {
    /// Estimated size, in KLOC, of `hours` of raw module effort.
    #[must_use]
    pub fn kloc(self, hours: f64) -> f64 {
        match self {
            Self::HoursPerKloc(divisor) => hours / divisor,
            Self::LocPerHour(rate) => hours * rate / 1000.0,
        }
    }
}

/// Effort factor and description attached to a project archetype.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectClass {
    /// Multiplier on raw module hours.
    pub factor: f64,

    pub label: String,
}

impl ProjectClass {
    fn new(factor: f64, label: &str) -> Self {
        Self {
            factor,
            label: label.into(),
        }
    }
}

/// Largest project an archetype admits. Both limits are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassLimit {
    pub max_kloc: f64,
    pub max_team_size: u32,
}

impl ClassLimit {
    /// Whether a project of `kloc` built by `team_size` developers fits.
    #[must_use]
    pub fn admits(&self, kloc: f64, team_size: u32) -> bool {
        kloc <= self.max_kloc && team_size <= self.max_team_size
    }
}

/// Tunable constants of the COCOMO-adapted model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CocomoPreset {
    pub sizing: SizeEstimate,

    pub organic: ProjectClass,
    pub organic_limit: ClassLimit,
    pub semi_detached: ProjectClass,
    pub semi_detached_limit: ClassLimit,

    /// Applies to every project that fits neither limit.
    pub embedded: ProjectClass,

    /// Fraction of the schedule at which the curve peaks.
    pub peak_fraction: f64,

    /// Share of `effort × rate` reported as requirements work.
    pub requirements_share: f64,

    /// Share of `effort × rate` reported as testing work.
    pub testing_share: f64,

    pub curve: CurveConfig,
}

impl Default for CocomoPreset {
    fn default() -> Self {
        Self::hours_per_kloc()
    }
}

impl CocomoPreset {
    /// Sizes projects at twenty hours of effort per KLOC.
    #[must_use]
    pub fn hours_per_kloc() -> Self {
        Self {
            sizing: SizeEstimate::HoursPerKloc(20.0),
            organic: ProjectClass::new(1.0, "Small project with experienced team"),
            organic_limit: ClassLimit {
                max_kloc: 50.0,
                max_team_size: 5,
            },
            semi_detached: ProjectClass::new(1.2, "Medium project with mixed experience"),
            semi_detached_limit: ClassLimit {
                max_kloc: 300.0,
                max_team_size: 15,
            },
            embedded: ProjectClass::new(1.4, "Complex project requiring high expertise"),
            peak_fraction: 0.4,
            requirements_share: 0.2,
            testing_share: 0.3,
            curve: CurveConfig::default(),
        }
    }

    /// Sizes projects at ten lines of code per hour of effort.
    #[must_use]
    pub fn loc_per_hour() -> Self {
        Self {
            sizing: SizeEstimate::LocPerHour(10.0),
            ..Self::hours_per_kloc()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn sizing_variants() {
        assert_relative_eq!(SizeEstimate::HoursPerKloc(20.0).kloc(400.0), 20.0);
        assert_relative_eq!(SizeEstimate::LocPerHour(10.0).kloc(400.0), 4.0);
    }

    #[test]
    fn limits_are_inclusive() {
        let limit = CocomoPreset::default().organic_limit;
        assert!(limit.admits(50.0, 5));
        assert!(!limit.admits(50.1, 5));
        assert!(!limit.admits(10.0, 6));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn sizing_from_json() {
        let mut config = serde_json::to_value(CocomoPreset::default()).unwrap();
        config["sizing"] = serde_json::json!({ "LocPerHour": 12.0 });
        config["peak_fraction"] = serde_json::json!(0.35);

        let preset: CocomoPreset = serde_json::from_value(config).unwrap();

        assert_eq!(preset.sizing, SizeEstimate::LocPerHour(12.0));
        assert_relative_eq!(preset.peak_fraction, 0.35);
    }
}
