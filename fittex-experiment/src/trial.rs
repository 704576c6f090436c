use crate::events::PointerEvent;
use fittex_core::{ExperimentTask, SequencingError, Target, TrialRecord, Vec3};
use tracing::debug;

/// Trial lifecycle: no transition skips a state, `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialPhase {
    Created,
    Started,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialStatus {
    InProgress,
    Finished,
}

/// State machine for one target-to-target acquisition attempt.
///
/// Both task variants run the same three-state machine; the task only
/// selects which pointer event satisfies the `Started -> Finished`
/// transition. Events that can never advance the active variant (drag
/// events while tapping, plain acquisition while dragging, hover
/// enter/exit) are informational and leave the state untouched, since a
/// live input source emits them freely. Out-of-order calls are rejected
/// with a `SequencingError` and change nothing.
#[derive(Debug)]
pub struct TrialController {
    task: ExperimentTask,
    phase: TrialPhase,
    record: TrialRecord,
    previous_projection: f64,
    drag_in_progress: bool,
    hovered_target: Option<usize>,
}

impl TrialController {
    /// `previous_projection` is the preceding trial's endpoint projection
    /// on its movement axis, or 0 for the first trial of a block.
    pub fn new(
        trial_id: usize,
        task: ExperimentTask,
        initial_target: &Target,
        final_target: &Target,
        previous_projection: f64,
    ) -> Self {
        Self {
            task,
            phase: TrialPhase::Created,
            record: TrialRecord::new(trial_id, initial_target, final_target),
            previous_projection,
            drag_in_progress: false,
            hovered_target: None,
        }
    }

    pub fn start(&mut self, now: f64, cursor: Vec3) -> Result<(), SequencingError> {
        match self.phase {
            TrialPhase::Created => {
                self.record.start(now, cursor)?;
                self.phase = TrialPhase::Started;
                debug!(
                    trial = self.record.trial_id(),
                    from = self.record.initial_target_id(),
                    to = self.record.final_target_id(),
                    "trial started"
                );
                Ok(())
            }
            TrialPhase::Started => Err(SequencingError::TrialAlreadyStarted),
            TrialPhase::Finished => Err(SequencingError::TrialAlreadyFinished),
        }
    }

    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        cursor: Vec3,
        now: f64,
    ) -> Result<TrialStatus, SequencingError> {
        match self.phase {
            TrialPhase::Created => return Err(SequencingError::TrialNotStarted),
            TrialPhase::Finished => return Err(SequencingError::TrialAlreadyFinished),
            TrialPhase::Started => {}
        }

        match *event {
            PointerEvent::TargetEntered { target_id } => {
                self.hovered_target = Some(target_id);
                Ok(TrialStatus::InProgress)
            }
            PointerEvent::TargetExited { target_id } => {
                if self.hovered_target == Some(target_id) {
                    self.hovered_target = None;
                }
                Ok(TrialStatus::InProgress)
            }
            PointerEvent::TargetAcquired { target_id } => match self.task {
                ExperimentTask::ReciprocalTapping => {
                    let missed = target_id != Some(self.record.final_target_id());
                    self.finish(now, cursor, missed)
                }
                // while dragging, acquisition is just the pick-up
                ExperimentTask::Dragging => Ok(TrialStatus::InProgress),
            },
            PointerEvent::DragStarted { .. } => match self.task {
                ExperimentTask::ReciprocalTapping => Ok(TrialStatus::InProgress),
                ExperimentTask::Dragging => {
                    self.drag_in_progress = true;
                    // trial time is anchored to the actual drag start
                    self.record.force_initial_time(now)?;
                    Ok(TrialStatus::InProgress)
                }
            },
            PointerEvent::DragEnded { receiving, .. } => match self.task {
                ExperimentTask::ReciprocalTapping => Ok(TrialStatus::InProgress),
                ExperimentTask::Dragging => {
                    if !self.drag_in_progress {
                        return Err(SequencingError::DragNotStarted);
                    }
                    let missed = receiving != Some(self.record.final_target_id());
                    self.finish(now, cursor, missed)
                }
            },
        }
    }

    fn finish(&mut self, now: f64, cursor: Vec3, missed: bool) -> Result<TrialStatus, SequencingError> {
        self.record
            .finish(now, cursor, missed, self.previous_projection)?;
        self.phase = TrialPhase::Finished;
        debug!(
            trial = self.record.trial_id(),
            missed,
            duration = ?self.record.trial_duration(),
            "trial finished"
        );
        Ok(TrialStatus::Finished)
    }

    /// Discard the trial; no partial record survives. Valid from any
    /// state, but only ever used from `Created`/`Started`.
    pub fn abort(self) {
        debug!(trial = self.record.trial_id(), "trial aborted");
    }

    /// The finalized measurement record; the trial must be `Finished`.
    pub fn into_record(self) -> Result<TrialRecord, SequencingError> {
        if self.phase != TrialPhase::Finished {
            return Err(SequencingError::TrialNotFinished);
        }
        Ok(self.record)
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn record(&self) -> &TrialRecord {
        &self.record
    }

    pub fn destination_target_id(&self) -> usize {
        self.record.final_target_id()
    }

    pub fn hovered_target(&self) -> Option<usize> {
        self.hovered_target
    }
}
