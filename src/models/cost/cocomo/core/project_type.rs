//! Classifies projects into COCOMO archetypes.

use super::preset::CocomoPreset;

/// COCOMO project archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectType {
    Organic,
    SemiDetached,
    Embedded,
}

/// Archetype of a project along with the size that selected it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub project_type: ProjectType,
    pub kloc: f64,
    pub factor: f64,
    pub label: String,
}

/// Classifies a project of `raw_hours` effort built by `team_size` developers.
pub(super) fn classify(preset: &CocomoPreset, raw_hours: f64, team_size: u32) -> Classification {
    let kloc = preset.sizing.kloc(raw_hours);

    let (project_type, class) = if preset.organic_limit.admits(kloc, team_size) {
        (ProjectType::Organic, &preset.organic)
    } else if preset.semi_detached_limit.admits(kloc, team_size) {
        (ProjectType::SemiDetached, &preset.semi_detached)
    } else {
        (ProjectType::Embedded, &preset.embedded)
    };

    Classification {
        project_type,
        kloc,
        factor: class.factor,
        label: class.label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn classifies_by_size_and_team() {
        let preset = CocomoPreset::hours_per_kloc();

        for (hours, team, expected) in [
            (1000.0, 5, ProjectType::Organic),
            (1000.0, 6, ProjectType::SemiDetached),
            (1001.0, 1, ProjectType::SemiDetached),
            (6000.0, 15, ProjectType::SemiDetached),
            (6001.0, 1, ProjectType::Embedded),
            (100.0, 16, ProjectType::Embedded),
        ] {
            let c = classify(&preset, hours, team);
            assert_eq!(c.project_type, expected, "hours={hours} team={team}");
        }
    }

    #[test]
    fn factors_and_labels() {
        let preset = CocomoPreset::default();

        let c = classify(&preset, 100.0, 1);
        assert_relative_eq!(c.kloc, 5.0);
        assert_relative_eq!(c.factor, 1.0);
        assert_eq!(c.label, "Small project with experienced team");

        let c = classify(&preset, 100.0, 10);
        assert_relative_eq!(c.factor, 1.2);

        let c = classify(&preset, 100.0, 20);
        assert_relative_eq!(c.factor, 1.4);
        assert_eq!(c.label, "Complex project requiring high expertise");
    }

    #[test]
    fn loc_per_hour_sizing() {
        let preset = CocomoPreset::loc_per_hour();

        let c = classify(&preset, 5000.0, 1);
        assert_relative_eq!(c.kloc, 50.0);
        assert_eq!(c.project_type, ProjectType::Organic);

        let c = classify(&preset, 5001.0, 1);
        assert_eq!(c.project_type, ProjectType::SemiDetached);
    }
}
