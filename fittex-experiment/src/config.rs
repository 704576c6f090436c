use fittex_core::{results_math, ExperimentTask, PlaneOrientation};

/// One (width, distance) pair defining an index-of-difficulty condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexOfDifficultyConfiguration {
    pub target_width: f32,
    pub target_distance: f32,
}

impl IndexOfDifficultyConfiguration {
    pub const fn new(target_width: f32, target_distance: f32) -> Self {
        Self {
            target_width,
            target_distance,
        }
    }

    pub fn index_of_difficulty(&self) -> f64 {
        results_math::index_of_difficulty(self.target_width, self.target_distance)
    }
}

/// Read-only contract describing which conditions an experiment runs.
///
/// The test/block layer is agnostic to the concrete configuration it
/// receives; it only consumes this contract.
pub trait ExperimentConfiguration {
    fn cursor_diameter(&self) -> f32;
    fn experiment_task(&self) -> ExperimentTask;
    fn num_blocks_per_test(&self) -> usize;
    fn num_targets_per_test(&self) -> usize;
    fn plane_orientations_to_test(&self) -> &[PlaneOrientation];
    fn target_configurations_to_test(&self) -> &[IndexOfDifficultyConfiguration];
}

/// Reciprocal tapping with a mouse-driven cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct TappingMouseConfiguration;

static TAPPING_PLANE_ORIENTATIONS: [PlaneOrientation; 1] = [PlaneOrientation::PlaneYZ];
static TAPPING_CONFIGURATIONS: [IndexOfDifficultyConfiguration; 9] = [
    IndexOfDifficultyConfiguration::new(0.04, 0.2),
    IndexOfDifficultyConfiguration::new(0.04, 0.3),
    IndexOfDifficultyConfiguration::new(0.04, 0.4),
    IndexOfDifficultyConfiguration::new(0.015, 0.2),
    IndexOfDifficultyConfiguration::new(0.015, 0.3),
    IndexOfDifficultyConfiguration::new(0.015, 0.4),
    IndexOfDifficultyConfiguration::new(0.005, 0.2),
    IndexOfDifficultyConfiguration::new(0.005, 0.3),
    IndexOfDifficultyConfiguration::new(0.005, 0.4),
];

impl ExperimentConfiguration for TappingMouseConfiguration {
    fn cursor_diameter(&self) -> f32 {
        0.01
    }

    fn experiment_task(&self) -> ExperimentTask {
        ExperimentTask::ReciprocalTapping
    }

    fn num_blocks_per_test(&self) -> usize {
        1
    }

    fn num_targets_per_test(&self) -> usize {
        9
    }

    fn plane_orientations_to_test(&self) -> &[PlaneOrientation] {
        &TAPPING_PLANE_ORIENTATIONS
    }

    fn target_configurations_to_test(&self) -> &[IndexOfDifficultyConfiguration] {
        &TAPPING_CONFIGURATIONS
    }
}

/// Dragging with a mouse-driven cursor, over all three planes
#[derive(Debug, Clone, Copy, Default)]
pub struct DragMouseConfiguration;

static DRAG_PLANE_ORIENTATIONS: [PlaneOrientation; 3] = [
    PlaneOrientation::PlaneYZ,
    PlaneOrientation::PlaneXY,
    PlaneOrientation::PlaneZX,
];
static DRAG_CONFIGURATIONS: [IndexOfDifficultyConfiguration; 9] = [
    IndexOfDifficultyConfiguration::new(0.04, 0.2),
    IndexOfDifficultyConfiguration::new(0.04, 0.3),
    IndexOfDifficultyConfiguration::new(0.04, 0.4),
    IndexOfDifficultyConfiguration::new(0.02, 0.2),
    IndexOfDifficultyConfiguration::new(0.02, 0.3),
    IndexOfDifficultyConfiguration::new(0.02, 0.4),
    IndexOfDifficultyConfiguration::new(0.01, 0.2),
    IndexOfDifficultyConfiguration::new(0.01, 0.3),
    IndexOfDifficultyConfiguration::new(0.01, 0.4),
];

impl ExperimentConfiguration for DragMouseConfiguration {
    fn cursor_diameter(&self) -> f32 {
        0.01
    }

    fn experiment_task(&self) -> ExperimentTask {
        ExperimentTask::Dragging
    }

    fn num_blocks_per_test(&self) -> usize {
        1
    }

    fn num_targets_per_test(&self) -> usize {
        9
    }

    fn plane_orientations_to_test(&self) -> &[PlaneOrientation] {
        &DRAG_PLANE_ORIENTATIONS
    }

    fn target_configurations_to_test(&self) -> &[IndexOfDifficultyConfiguration] {
        &DRAG_CONFIGURATIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tapping_conditions_span_the_difficulty_range() {
        let config = TappingMouseConfiguration;
        let ids: Vec<f64> = config
            .target_configurations_to_test()
            .iter()
            .map(|c| c.index_of_difficulty())
            .collect();
        assert_eq!(ids.len(), 9);
        // easiest condition: W 0.04 / D 0.2
        assert!((ids[0] - 2.585).abs() < 1e-3);
        // hardest condition is the narrow/far one
        assert!(ids.last().unwrap() > &6.0);
    }

    #[test]
    fn dragging_tests_all_three_planes() {
        let config = DragMouseConfiguration;
        assert_eq!(config.plane_orientations_to_test().len(), 3);
        assert_eq!(config.experiment_task(), ExperimentTask::Dragging);
        assert_eq!(config.num_targets_per_test(), 9);
    }
}
