use crate::events::PointerEvent;
use crate::trial::{TrialController, TrialStatus};
use fittex_core::{BlockRecord, ExperimentTask, SequencingError, Target, Vec3};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Pending,
    Running,
    Completed,
    Aborted,
}

/// Drives one full cycle of trials over a fixed target set.
///
/// N targets yield N−1 trials; trial `i` moves from target `i` (array
/// order) to target `(i+1) mod N`. The preceding trial's endpoint
/// projection is threaded into each new trial so effective amplitudes
/// account for the participant's resting position.
#[derive(Debug)]
pub struct BlockController {
    block_id: usize,
    task: ExperimentTask,
    status: BlockStatus,
    current_trial_index: usize,
    current_trial: Option<TrialController>,
    last_projection: f64,
    record: Option<BlockRecord>,
}

impl BlockController {
    pub fn new(task: ExperimentTask, block_id: usize) -> Self {
        Self {
            block_id,
            task,
            status: BlockStatus::Pending,
            current_trial_index: 0,
            current_trial: None,
            last_projection: 0.0,
            record: None,
        }
    }

    /// Record the block start time and begin trial 0. A layout with
    /// fewer than two targets completes immediately with an empty trial
    /// list.
    pub fn start(
        &mut self,
        targets: &[Target],
        now: f64,
        cursor: Vec3,
    ) -> Result<BlockStatus, SequencingError> {
        if self.status != BlockStatus::Pending {
            return Err(SequencingError::TrialAlreadyStarted);
        }
        let initial_target_id = targets.first().map(|t| t.id).unwrap_or(0);
        let trial_count = targets.len().saturating_sub(1);
        let mut record = BlockRecord::new(self.block_id, initial_target_id, now, trial_count);

        if targets.len() <= 1 {
            record.final_time = Some(now);
            self.record = Some(record);
            self.status = BlockStatus::Completed;
            return Ok(self.status);
        }

        self.record = Some(record);
        self.status = BlockStatus::Running;
        self.start_trial(targets, now, cursor)?;
        debug!(block = self.block_id, targets = targets.len(), "block started");
        Ok(self.status)
    }

    /// Forward one interaction event to the in-flight trial and advance
    /// the sequence when the trial finishes. Events arriving after
    /// completion or abort are ignored.
    pub fn handle_event(
        &mut self,
        targets: &[Target],
        event: &PointerEvent,
        cursor: Vec3,
        now: f64,
    ) -> Result<BlockStatus, SequencingError> {
        match self.status {
            BlockStatus::Pending => return Err(SequencingError::TrialNotStarted),
            BlockStatus::Completed | BlockStatus::Aborted => return Ok(self.status),
            BlockStatus::Running => {}
        }
        let trial = self
            .current_trial
            .as_mut()
            .ok_or(SequencingError::NoActiveTrial)?;

        if trial.handle_event(event, cursor, now)? == TrialStatus::Finished {
            let finished = self
                .current_trial
                .take()
                .expect("a trial just finished")
                .into_record()?;
            self.last_projection = finished
                .final_position_projected_on_movement_axis()
                .unwrap_or(0.0);
            let record = self.record.as_mut().expect("running block has a record");
            record.trials.push(finished);
            self.current_trial_index += 1;

            if self.current_trial_index < targets.len() - 1 {
                self.start_trial(targets, now, cursor)?;
            } else {
                record.final_time = Some(now);
                self.status = BlockStatus::Completed;
                info!(
                    block = self.block_id,
                    trials = record.trials.len(),
                    "block completed"
                );
            }
        }
        Ok(self.status)
    }

    fn start_trial(
        &mut self,
        targets: &[Target],
        now: f64,
        cursor: Vec3,
    ) -> Result<(), SequencingError> {
        let index = self.current_trial_index;
        let initial = &targets[index];
        let destination = &targets[(index + 1) % targets.len()];
        let mut trial =
            TrialController::new(index, self.task, initial, destination, self.last_projection);
        trial.start(now, cursor)?;
        self.current_trial = Some(trial);
        Ok(())
    }

    /// Abort the in-flight trial (if any) and suppress the completion
    /// notice. Idempotent; already-recorded trials stay in the record.
    pub fn abort(&mut self) {
        if let Some(trial) = self.current_trial.take() {
            trial.abort();
        }
        if self.status == BlockStatus::Running || self.status == BlockStatus::Pending {
            self.status = BlockStatus::Aborted;
            debug!(block = self.block_id, "block aborted");
        }
    }

    pub fn status(&self) -> BlockStatus {
        self.status
    }

    pub fn block_id(&self) -> usize {
        self.block_id
    }

    /// Destination of the in-flight trial, for highlighting.
    pub fn current_destination(&self) -> Option<usize> {
        self.current_trial
            .as_ref()
            .map(|t| t.destination_target_id())
    }

    pub fn record(&self) -> Option<&BlockRecord> {
        self.record.as_ref()
    }

    pub fn into_record(self) -> Option<BlockRecord> {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> Vec<Target> {
        (0..n)
            .map(|i| {
                let theta = i as f32 * std::f32::consts::TAU / n.max(1) as f32;
                Target::new(i, Vec3::new(0.0, theta.sin(), theta.cos()) * 0.1, 0.04)
            })
            .collect()
    }

    /// Acquire every destination in turn, timestamps 1.0, 2.0, ...
    fn run_to_completion(block: &mut BlockController, targets: &[Target]) -> BlockStatus {
        let mut status = block.status();
        let mut now = 1.0;
        while let Some(dest) = block.current_destination() {
            status = block
                .handle_event(
                    targets,
                    &PointerEvent::TargetAcquired {
                        target_id: Some(dest),
                    },
                    targets[dest].position,
                    now,
                )
                .unwrap();
            now += 1.0;
        }
        status
    }

    #[test]
    fn two_targets_run_exactly_one_trial() {
        let targets = ring(2);
        let mut block = BlockController::new(ExperimentTask::ReciprocalTapping, 0);
        block.start(&targets, 0.0, targets[0].position).unwrap();
        let status = run_to_completion(&mut block, &targets);
        assert_eq!(status, BlockStatus::Completed);
        let record = block.into_record().unwrap();
        assert_eq!(record.trials.len(), 1);
        assert_eq!(record.trials[0].initial_target_id(), 0);
        assert_eq!(record.trials[0].final_target_id(), 1);
    }

    #[test]
    fn n_targets_run_n_minus_one_trials_in_ring_order() {
        let targets = ring(9);
        let mut block = BlockController::new(ExperimentTask::ReciprocalTapping, 2);
        block.start(&targets, 0.0, targets[0].position).unwrap();
        run_to_completion(&mut block, &targets);
        let record = block.into_record().unwrap();
        assert_eq!(record.trials.len(), 8);
        for (i, trial) in record.trials.iter().enumerate() {
            assert_eq!(trial.trial_id(), i);
            assert_eq!(trial.initial_target_id(), i);
            assert_eq!(trial.final_target_id(), (i + 1) % 9);
            assert!(trial.is_finished());
        }
        assert!(record.final_time.is_some());
    }

    #[test]
    fn single_target_block_finishes_immediately_and_empty() {
        let targets = ring(1);
        let mut block = BlockController::new(ExperimentTask::ReciprocalTapping, 0);
        let status = block.start(&targets, 3.0, Vec3::ZERO).unwrap();
        assert_eq!(status, BlockStatus::Completed);
        let record = block.into_record().unwrap();
        assert!(record.trials.is_empty());
        assert_eq!(record.final_time, Some(3.0));
    }

    #[test]
    fn event_before_start_is_rejected_and_appends_nothing() {
        let targets = ring(3);
        let mut block = BlockController::new(ExperimentTask::ReciprocalTapping, 0);
        let err = block
            .handle_event(
                &targets,
                &PointerEvent::TargetAcquired { target_id: Some(1) },
                Vec3::ZERO,
                0.5,
            )
            .unwrap_err();
        assert_eq!(err, SequencingError::TrialNotStarted);
        assert!(block.record().is_none());
    }

    #[test]
    fn abort_discards_in_flight_trial_and_is_idempotent() {
        let targets = ring(3);
        let mut block = BlockController::new(ExperimentTask::ReciprocalTapping, 0);
        block.start(&targets, 0.0, targets[0].position).unwrap();
        // finish the first of two trials
        block
            .handle_event(
                &targets,
                &PointerEvent::TargetAcquired { target_id: Some(1) },
                targets[1].position,
                1.0,
            )
            .unwrap();
        block.abort();
        block.abort();
        assert_eq!(block.status(), BlockStatus::Aborted);
        assert!(block.current_destination().is_none());
        let record = block.into_record().unwrap();
        // the aborted second trial left no partial record
        assert_eq!(record.trials.len(), 1);
        assert!(record.final_time.is_none());
    }

    #[test]
    fn amplitude_chains_previous_projection_through_the_block() {
        let targets = ring(3);
        let mut block = BlockController::new(ExperimentTask::ReciprocalTapping, 0);
        block.start(&targets, 0.0, targets[0].position).unwrap();
        run_to_completion(&mut block, &targets);
        let record = block.into_record().unwrap();
        let first = &record.trials[0];
        let second = &record.trials[1];
        // first trial: previous projection is 0
        assert_eq!(
            first.effective_amplitude_of_movement(),
            first.final_position_projected_on_movement_axis()
        );
        let expected = second.final_position_projected_on_movement_axis().unwrap()
            - first.final_position_projected_on_movement_axis().unwrap();
        assert!(
            (second.effective_amplitude_of_movement().unwrap() - expected).abs() < 1e-12
        );
    }
}
