use crate::error::SequencingError;
use crate::results_math;
use crate::target::Target;
use crate::vec3::Vec3;
use serde::Serialize;

/// Measurements of a single target-to-target movement attempt.
///
/// A record is "open" after construction: the target pairing is fixed but
/// nothing has been measured. `start` stamps the movement onset, `finish`
/// stamps the endpoint and derives the movement analytics; each may run
/// exactly once, and every derived field is immutable afterwards. Outlier
/// marking is the only post-finalization mutation.
#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    trial_id: usize,
    initial_target_id: usize,
    final_target_id: usize,
    initial_target_position: Vec3,
    final_target_position: Vec3,
    initial_time: Option<f64>,
    final_time: Option<f64>,
    trial_duration: Option<f64>,
    initial_position: Option<Vec3>,
    final_position: Option<Vec3>,
    final_position_projected_on_movement_axis: Option<f64>,
    effective_amplitude_of_movement: Option<f64>,
    distance_error_from_target: Option<f64>,
    missed_target: bool,
    is_marked_as_outlier: bool,
}

impl TrialRecord {
    pub fn new(trial_id: usize, initial_target: &Target, final_target: &Target) -> Self {
        Self {
            trial_id,
            initial_target_id: initial_target.id,
            final_target_id: final_target.id,
            initial_target_position: initial_target.position,
            final_target_position: final_target.position,
            initial_time: None,
            final_time: None,
            trial_duration: None,
            initial_position: None,
            final_position: None,
            final_position_projected_on_movement_axis: None,
            effective_amplitude_of_movement: None,
            distance_error_from_target: None,
            missed_target: false,
            is_marked_as_outlier: false,
        }
    }

    /// Stamp movement onset. Valid exactly once, before `finish`.
    pub fn start(&mut self, initial_time: f64, initial_position: Vec3) -> Result<(), SequencingError> {
        if self.final_time.is_some() {
            return Err(SequencingError::TrialAlreadyFinished);
        }
        if self.initial_time.is_some() {
            return Err(SequencingError::TrialAlreadyStarted);
        }
        self.initial_time = Some(initial_time);
        self.initial_position = Some(initial_position);
        Ok(())
    }

    /// Re-stamp the movement onset time while the record is open. The
    /// dragging task re-anchors trial time to the actual drag start.
    pub fn force_initial_time(&mut self, initial_time: f64) -> Result<(), SequencingError> {
        if self.final_time.is_some() {
            return Err(SequencingError::TrialAlreadyFinished);
        }
        if self.initial_time.is_none() {
            return Err(SequencingError::TrialNotStarted);
        }
        self.initial_time = Some(initial_time);
        Ok(())
    }

    /// Stamp the endpoint and derive duration, axis projection, effective
    /// amplitude and distance error. `previous_projection` is the resting
    /// projection left over by the preceding trial (0 for the first trial
    /// of a block). Valid exactly once, after `start`.
    pub fn finish(
        &mut self,
        final_time: f64,
        final_position: Vec3,
        missed_target: bool,
        previous_projection: f64,
    ) -> Result<(), SequencingError> {
        let Some(initial_time) = self.initial_time else {
            return Err(SequencingError::TrialNotStarted);
        };
        if self.final_time.is_some() {
            return Err(SequencingError::TrialAlreadyFinished);
        }

        self.final_time = Some(final_time);
        self.trial_duration = Some(final_time - initial_time);
        self.final_position = Some(final_position);
        self.missed_target = missed_target;

        let projection = results_math::projected_point_coordinate(
            self.initial_target_position,
            self.final_target_position,
            final_position,
        );
        self.final_position_projected_on_movement_axis = Some(projection);
        self.effective_amplitude_of_movement = Some(results_math::effective_amplitude(
            self.initial_target_position,
            self.final_target_position,
            projection,
            previous_projection,
        ));
        self.distance_error_from_target = Some(results_math::distance_error(
            final_position,
            self.final_target_position,
        ));
        Ok(())
    }

    /// Post-hoc annotation; never re-sequences or removes the trial.
    /// Valid any time after `finish`.
    pub fn mark_as_outlier(&mut self, is_outlier: bool) -> Result<(), SequencingError> {
        if self.final_time.is_none() {
            return Err(SequencingError::TrialNotFinished);
        }
        self.is_marked_as_outlier = is_outlier;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.initial_time.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.final_time.is_some()
    }

    pub fn trial_id(&self) -> usize {
        self.trial_id
    }

    pub fn initial_target_id(&self) -> usize {
        self.initial_target_id
    }

    pub fn final_target_id(&self) -> usize {
        self.final_target_id
    }

    pub fn initial_target_position(&self) -> Vec3 {
        self.initial_target_position
    }

    pub fn final_target_position(&self) -> Vec3 {
        self.final_target_position
    }

    pub fn initial_time(&self) -> Option<f64> {
        self.initial_time
    }

    pub fn final_time(&self) -> Option<f64> {
        self.final_time
    }

    pub fn trial_duration(&self) -> Option<f64> {
        self.trial_duration
    }

    pub fn initial_position(&self) -> Option<Vec3> {
        self.initial_position
    }

    pub fn final_position(&self) -> Option<Vec3> {
        self.final_position
    }

    pub fn final_position_projected_on_movement_axis(&self) -> Option<f64> {
        self.final_position_projected_on_movement_axis
    }

    pub fn effective_amplitude_of_movement(&self) -> Option<f64> {
        self.effective_amplitude_of_movement
    }

    pub fn distance_error_from_target(&self) -> Option<f64> {
        self.distance_error_from_target
    }

    pub fn missed_target(&self) -> bool {
        self.missed_target
    }

    pub fn is_marked_as_outlier(&self) -> bool {
        self.is_marked_as_outlier
    }
}

/// Trial records accumulated over one full cycle through a target set
#[derive(Debug, Clone, Serialize)]
pub struct BlockRecord {
    pub block_id: usize,
    pub initial_target_id: usize,
    pub initial_time: f64,
    pub final_time: Option<f64>,
    pub trials: Vec<TrialRecord>,
}

impl BlockRecord {
    pub fn new(block_id: usize, initial_target_id: usize, initial_time: f64, trial_count: usize) -> Self {
        Self {
            block_id,
            initial_target_id,
            initial_time,
            final_time: None,
            trials: Vec::with_capacity(trial_count),
        }
    }

    pub fn block_duration(&self) -> Option<f64> {
        self.final_time.map(|t| t - self.initial_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> (Target, Target) {
        (
            Target::new(0, Vec3::new(0.0, 0.0, 0.1), 0.04),
            Target::new(5, Vec3::new(0.0, 0.0, -0.1), 0.04),
        )
    }

    #[test]
    fn finish_before_start_is_rejected() {
        let (a, b) = targets();
        let mut record = TrialRecord::new(0, &a, &b);
        let err = record.finish(1.0, Vec3::ZERO, false, 0.0).unwrap_err();
        assert_eq!(err, SequencingError::TrialNotStarted);
        assert!(!record.is_finished());
    }

    #[test]
    fn lifecycle_runs_once_each() {
        let (a, b) = targets();
        let mut record = TrialRecord::new(0, &a, &b);
        record.start(1.0, a.position).unwrap();
        assert_eq!(
            record.start(2.0, a.position).unwrap_err(),
            SequencingError::TrialAlreadyStarted
        );
        record.finish(1.8, b.position, false, 0.0).unwrap();
        assert_eq!(
            record.finish(2.5, b.position, false, 0.0).unwrap_err(),
            SequencingError::TrialAlreadyFinished
        );
        assert!((record.trial_duration().unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn finish_derives_analytics() {
        let (a, b) = targets();
        let mut record = TrialRecord::new(3, &a, &b);
        record.start(0.0, a.position).unwrap();
        // land exactly on the destination center
        record.finish(0.6, b.position, false, 0.0).unwrap();
        let projection = record.final_position_projected_on_movement_axis().unwrap();
        assert!((projection - 0.2).abs() < 1e-6);
        assert_eq!(record.effective_amplitude_of_movement(), Some(projection));
        assert_eq!(record.distance_error_from_target(), Some(0.0));
        assert!(!record.missed_target());
    }

    #[test]
    fn outlier_marking_requires_finished_trial() {
        let (a, b) = targets();
        let mut record = TrialRecord::new(0, &a, &b);
        assert_eq!(
            record.mark_as_outlier(true).unwrap_err(),
            SequencingError::TrialNotFinished
        );
        record.start(0.0, a.position).unwrap();
        record.finish(0.5, b.position, true, 0.0).unwrap();
        record.mark_as_outlier(true).unwrap();
        assert!(record.is_marked_as_outlier());
        record.mark_as_outlier(false).unwrap();
        assert!(!record.is_marked_as_outlier());
    }

    #[test]
    fn force_initial_time_re_stamps_open_record() {
        let (a, b) = targets();
        let mut record = TrialRecord::new(0, &a, &b);
        assert!(record.force_initial_time(1.0).is_err());
        record.start(1.0, a.position).unwrap();
        record.force_initial_time(1.4).unwrap();
        record.finish(2.0, b.position, false, 0.0).unwrap();
        assert!((record.trial_duration().unwrap() - 0.6).abs() < 1e-12);
        assert!(record.force_initial_time(3.0).is_err());
    }
}
