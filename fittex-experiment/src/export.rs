//! Flat key→value export for downstream statistical analysis.
//!
//! Field names are part of the external contract; analysis scripts group
//! and join on them, so they must not drift.

use crate::test::{TestConfiguration, TestRecord};
use fittex_core::{BlockRecord, TrialRecord, Vec3};
use serde_json::{json, Map, Value};

/// Conversion to a flat mapping of primitive values (strings, numbers,
/// nested number lists for positions).
pub trait FlatRecord {
    fn to_flat_map(&self) -> Map<String, Value>;
}

fn position_value(position: Vec3) -> Value {
    json!([position.x, position.y, position.z])
}

impl FlatRecord for TestConfiguration {
    fn to_flat_map(&self) -> Map<String, Value> {
        let mut output = Map::new();
        output.insert("testId".into(), json!(self.test_id));
        output.insert("task".into(), json!(self.task.label()));
        output.insert("numberOfTargets".into(), json!(self.number_of_targets));
        output.insert("targetWidth".into(), json!(self.target_width));
        output.insert("targetDistance".into(), json!(self.target_distance));
        output.insert(
            "indexOfDifficulty".into(),
            json!(self.index_of_difficulty()),
        );
        output.insert(
            "numOfBlocksPerTest".into(),
            json!(self.num_of_blocks_per_test),
        );
        output.insert(
            "targetsPositions".into(),
            Value::Array(
                self.targets_positions
                    .iter()
                    .map(|p| position_value(*p))
                    .collect(),
            ),
        );
        output
    }
}

impl FlatRecord for TrialRecord {
    fn to_flat_map(&self) -> Map<String, Value> {
        let mut output = Map::new();
        output.insert("trialId".into(), json!(self.trial_id()));
        output.insert("initialTargetId".into(), json!(self.initial_target_id()));
        output.insert("finalTargetId".into(), json!(self.final_target_id()));
        if let Some(time) = self.initial_time() {
            output.insert("initialTime".into(), json!(time));
        }
        if let Some(time) = self.final_time() {
            output.insert("finalTime".into(), json!(time));
        }
        if let Some(duration) = self.trial_duration() {
            output.insert("trialDuration".into(), json!(duration));
        }
        if let Some(position) = self.initial_position() {
            output.insert("initialPosition".into(), position_value(position));
        }
        if let Some(position) = self.final_position() {
            output.insert("finalPosition".into(), position_value(position));
        }
        output.insert("missedTarget".into(), json!(self.missed_target()));
        if let Some(projection) = self.final_position_projected_on_movement_axis() {
            output.insert(
                "finalPositionProjectedOnMovementAxis".into(),
                json!(projection),
            );
        }
        if let Some(amplitude) = self.effective_amplitude_of_movement() {
            output.insert("effectiveAmplitudeOfMovement".into(), json!(amplitude));
        }
        if let Some(error) = self.distance_error_from_target() {
            output.insert("distanceErrorFromTarget".into(), json!(error));
        }
        if self.is_finished() {
            output.insert(
                "isMarkedAsOutlier".into(),
                json!(self.is_marked_as_outlier()),
            );
        }
        output
    }
}

impl FlatRecord for BlockRecord {
    fn to_flat_map(&self) -> Map<String, Value> {
        let mut output = Map::new();
        output.insert("blockId".into(), json!(self.block_id));
        output.insert("initialTargetId".into(), json!(self.initial_target_id));
        output.insert("initialTime".into(), json!(self.initial_time));
        if let Some(time) = self.final_time {
            output.insert("finalTime".into(), json!(time));
        }
        if let Some(duration) = self.block_duration() {
            output.insert("blockDuration".into(), json!(duration));
        }
        output.insert(
            "trialsData".into(),
            Value::Array(
                self.trials
                    .iter()
                    .map(|t| Value::Object(t.to_flat_map()))
                    .collect(),
            ),
        );
        output
    }
}

impl FlatRecord for TestRecord {
    fn to_flat_map(&self) -> Map<String, Value> {
        let mut output = Map::new();
        output.insert(
            "configuration".into(),
            Value::Object(self.configuration.to_flat_map()),
        );
        output.insert("timestamp".into(), json!(self.timestamp));
        if let Some(time) = self.initial_time {
            output.insert("initialTime".into(), json!(time));
        }
        if let Some(time) = self.final_time {
            output.insert("finalTime".into(), json!(time));
        }
        if let Some(duration) = self.test_duration() {
            output.insert("testDuration".into(), json!(duration));
        }
        output.insert(
            "blocksData".into(),
            Value::Array(
                self.blocks
                    .iter()
                    .map(|b| Value::Object(b.to_flat_map()))
                    .collect(),
            ),
        );
        output
    }
}
