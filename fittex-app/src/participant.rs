//! Scripted participant used by the headless harness: moves a noisy
//! cursor through every trial of a test so the full event path
//! (interactor -> trial -> block -> test) is exercised without an input
//! device.

use crate::interaction::CursorInteractor;
use fittex_core::{ExperimentTask, SequencingError, Target, Vec3};
use fittex_experiment::{TestController, TestNotice, TestStatus};
use fittex_timing::{Timer, VirtualTimer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// Ticks with no progress before a run is declared stuck.
const STALL_LIMIT: usize = 5_000_000;

#[derive(Debug)]
pub struct SimulatedParticipant {
    rng: StdRng,
    /// Cursor speed in meters per second.
    speed: f64,
    /// Sample period in seconds.
    tick: f64,
    position: Vec3,
    button_down: bool,
    ticks: usize,
}

impl SimulatedParticipant {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            speed: 0.6,
            tick: 0.01,
            position: Vec3::ZERO,
            button_down: false,
            ticks: 0,
        }
    }

    /// Drive `test` to completion, collecting every notice it emits.
    pub fn run_test(
        &mut self,
        test: &mut TestController,
        interactor: &mut CursorInteractor,
        timer: &mut VirtualTimer,
    ) -> Result<Vec<TestNotice>, SequencingError> {
        let targets: Vec<Target> = test.targets().to_vec();
        let task = test.configuration().task;
        let mut notices = Vec::new();

        self.position = targets[0].position;
        self.button_down = false;
        self.ticks = 0;
        // the participant rests on the start target before the block
        // begins; those contact events predate the first trial
        interactor.update(&targets, self.position, false);
        notices.extend(test.start(timer.now(), self.position)?);

        while test.status() == TestStatus::Running {
            if self.ticks > STALL_LIMIT {
                warn!(test = %test.configuration().test_id, "simulation stalled, giving up");
                break;
            }
            let Some(destination_id) = test.current_destination() else {
                break;
            };
            let destination = targets
                .iter()
                .find(|t| t.id == destination_id)
                .copied()
                .ok_or(SequencingError::NoActiveTrial)?;
            let aim = destination.position + self.landing_offset(destination.width);

            match task {
                ExperimentTask::ReciprocalTapping => {
                    self.move_to(test, interactor, timer, &targets, aim, &mut notices)?;
                    self.set_button(test, interactor, timer, &targets, true, &mut notices)?;
                    self.set_button(test, interactor, timer, &targets, false, &mut notices)?;
                }
                ExperimentTask::Dragging => {
                    self.set_button(test, interactor, timer, &targets, true, &mut notices)?;
                    self.move_to(test, interactor, timer, &targets, aim, &mut notices)?;
                    self.set_button(test, interactor, timer, &targets, false, &mut notices)?;
                }
            }
        }
        Ok(notices)
    }

    /// Where this movement will land relative to the target center.
    fn landing_offset(&mut self, target_width: f32) -> Vec3 {
        let spread = target_width * 0.35;
        Vec3::new(
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
        )
    }

    fn move_to(
        &mut self,
        test: &mut TestController,
        interactor: &mut CursorInteractor,
        timer: &mut VirtualTimer,
        targets: &[Target],
        aim: Vec3,
        notices: &mut Vec<TestNotice>,
    ) -> Result<(), SequencingError> {
        loop {
            let delta = aim - self.position;
            let remaining = delta.magnitude();
            if remaining < 1e-4 {
                return Ok(());
            }
            let step = (self.speed * self.tick).min(remaining);
            self.position = self.position + delta * (step / remaining) as f32;
            self.step(test, interactor, timer, targets, notices)?;
        }
    }

    fn set_button(
        &mut self,
        test: &mut TestController,
        interactor: &mut CursorInteractor,
        timer: &mut VirtualTimer,
        targets: &[Target],
        down: bool,
        notices: &mut Vec<TestNotice>,
    ) -> Result<(), SequencingError> {
        self.button_down = down;
        self.step(test, interactor, timer, targets, notices)
    }

    fn step(
        &mut self,
        test: &mut TestController,
        interactor: &mut CursorInteractor,
        timer: &mut VirtualTimer,
        targets: &[Target],
        notices: &mut Vec<TestNotice>,
    ) -> Result<(), SequencingError> {
        self.ticks += 1;
        timer.advance(self.tick);
        for event in interactor.update(targets, self.position, self.button_down) {
            notices.extend(test.handle_event(&event, self.position, timer.now())?);
        }
        Ok(())
    }
}
