//! Maps average module complexity to a productivity band.

use super::preset::{DualModulePolicy, MarginalPreset, ProductivityBand};

/// Complexity band a project falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComplexityBand {
    Simple,
    Moderate,
    Complex,
}

/// Productivity classification of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct Productivity {
    pub band: ComplexityBand,

    /// Band factor, including any two-module bonus.
    pub factor: f64,

    pub label: String,
}

/// Classifies a project by its average complexity.
///
/// `dual` is the two-module policy when it applies to this project.
pub(super) fn classify(
    preset: &MarginalPreset,
    average_complexity: f64,
    dual: Option<&DualModulePolicy>,
) -> Productivity {
    let table = &preset.productivity;
    let (band, entry): (_, &ProductivityBand) = if average_complexity <= table.simple_max {
        (ComplexityBand::Simple, &table.simple)
    } else if average_complexity <= table.moderate_max {
        (ComplexityBand::Moderate, &table.moderate)
    } else {
        (ComplexityBand::Complex, &table.complex)
    };

    match dual {
        Some(policy) => Productivity {
            band,
            factor: entry.factor * policy.productivity_bonus,
            label: entry.dual_label.clone(),
        },
        None => Productivity {
            band,
            factor: entry.factor,
            label: entry.label.clone(),
        },
    }
}
