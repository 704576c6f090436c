use crate::interaction::{CursorInteractor, SelectionMethod};
use crate::participant::SimulatedParticipant;
use anyhow::{bail, Result};
use chrono::Local;
use fittex_core::ExperimentTask;
use fittex_experiment::{
    build_target_plane, ExperimentConfiguration, FlatRecord, TestController, TestNotice,
    TestRecord, TestStatus,
};
use fittex_timing::{MonotonicTimer, Timer, VirtualTimer};
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// One full experiment session: every plane orientation crossed with
/// every width/distance condition of the chosen configuration, one test
/// per combination.
pub struct ExperimentSession<C: ExperimentConfiguration> {
    configuration: C,
    selection_method: SelectionMethod,
    seed: u64,
    results: Vec<TestRecord>,
}

impl<C: ExperimentConfiguration> ExperimentSession<C> {
    pub fn new(configuration: C, selection_method: SelectionMethod, seed: u64) -> Self {
        // dragging needs a held selection; contact mode cannot produce it
        let selection_method = match configuration.experiment_task() {
            ExperimentTask::Dragging => SelectionMethod::Button,
            ExperimentTask::ReciprocalTapping => selection_method,
        };
        Self {
            configuration,
            selection_method,
            seed,
            results: Vec::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let wall_clock = MonotonicTimer::new();
        let task = self.configuration.experiment_task();
        let mut participant = SimulatedParticipant::new(self.seed);

        println!(
            "Running {} session: {} orientation(s) x {} condition(s)",
            task.label(),
            self.configuration.plane_orientations_to_test().len(),
            self.configuration.target_configurations_to_test().len(),
        );

        for orientation in self.configuration.plane_orientations_to_test() {
            for condition in self.configuration.target_configurations_to_test() {
                let targets = build_target_plane(
                    self.configuration.num_targets_per_test(),
                    condition.target_width,
                    condition.target_distance,
                    *orientation,
                );
                let mut test = TestController::new(
                    targets,
                    task,
                    *orientation,
                    condition.target_width,
                    condition.target_distance,
                    self.configuration.num_blocks_per_test(),
                )?;
                test.set_timestamp(Local::now().to_rfc3339());

                let mut interactor = CursorInteractor::new(
                    self.selection_method,
                    self.configuration.cursor_diameter(),
                );
                let mut timer = VirtualTimer::new();
                let notices =
                    participant.run_test(&mut test, &mut interactor, &mut timer)?;

                if test.status() != TestStatus::Completed {
                    bail!(
                        "test {} did not run to completion",
                        test.configuration().test_id
                    );
                }
                let blocks_ended = notices
                    .iter()
                    .filter(|n| matches!(n, TestNotice::BlockEnded(_)))
                    .count();
                let record = test.into_record();
                self.print_test_summary(&record, blocks_ended);
                self.results.push(record);
            }
        }

        println!(
            "Session finished: {} test(s) in {:.2} s of wall time",
            self.results.len(),
            wall_clock.now(),
        );
        Ok(())
    }

    fn print_test_summary(&self, record: &TestRecord, blocks_ended: usize) {
        let trials: Vec<_> = record.blocks.iter().flat_map(|b| &b.trials).collect();
        let misses = trials.iter().filter(|t| t.missed_target()).count();
        let mean_duration = if trials.is_empty() {
            0.0
        } else {
            trials
                .iter()
                .filter_map(|t| t.trial_duration())
                .sum::<f64>()
                / trials.len() as f64
        };
        println!(
            "  {}  ID {:.3}  blocks {}  trials {}  misses {}  mean movement time {:.3} s",
            record.configuration.test_id,
            record.configuration.index_of_difficulty(),
            blocks_ended,
            trials.len(),
            misses,
            mean_duration,
        );
    }

    pub fn results(&self) -> &[TestRecord] {
        &self.results
    }

    /// Write every test record as its flat export mapping.
    pub fn save_results(&self, path: &Path) -> Result<()> {
        let output: Vec<Value> = self
            .results
            .iter()
            .map(|record| Value::Object(record.to_flat_map()))
            .collect();
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &Value::Array(output))?;
        println!("Results saved to {}", path.display());
        Ok(())
    }
}
