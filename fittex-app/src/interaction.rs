//! Concrete interaction adapter: turns raw cursor samples into the
//! pointer events the sequencing core consumes. Owns contact detection
//! and highlight/drag bookkeeping; knows nothing about trials.

use fittex_core::{Target, Vec3};
use fittex_experiment::PointerEvent;

/// Cursor movement needed (with the selection held) before an
/// acquisition turns into a drag.
const DRAG_START_DISTANCE: f64 = 0.005;

/// How a selection is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMethod {
    /// Touching a target acquires it; no drags are produced.
    AutomaticByContact,
    /// A button press acquires; holding and moving drags.
    Button,
}

/// Headless cursor interactor.
///
/// Feed it one `(position, button)` sample per tick; it emits the
/// enter/exit/acquire/drag events that sample produced, in order.
#[derive(Debug)]
pub struct CursorInteractor {
    selection_method: SelectionMethod,
    cursor_diameter: f32,
    position: Vec3,
    in_contact: Vec<usize>,
    highlighted: Option<usize>,
    auto_acquired: Option<usize>,
    button_was_down: bool,
    is_dragging: bool,
    dragged: Option<usize>,
    acquired_position: Vec3,
}

impl CursorInteractor {
    pub fn new(selection_method: SelectionMethod, cursor_diameter: f32) -> Self {
        Self {
            selection_method,
            cursor_diameter,
            position: Vec3::ZERO,
            in_contact: Vec::new(),
            highlighted: None,
            auto_acquired: None,
            button_was_down: false,
            is_dragging: false,
            dragged: None,
            acquired_position: Vec3::ZERO,
        }
    }

    /// Advance one input sample.
    pub fn update(
        &mut self,
        targets: &[Target],
        cursor: Vec3,
        button_down: bool,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        self.position = cursor;
        self.track_contacts(targets, &mut events);

        match self.selection_method {
            SelectionMethod::AutomaticByContact => self.check_contact_selection(targets, &mut events),
            SelectionMethod::Button => self.check_button_selection(button_down, &mut events),
        }

        self.button_was_down = button_down;
        events
    }

    fn track_contacts(&mut self, targets: &[Target], events: &mut Vec<PointerEvent>) {
        for target in targets {
            let contact_distance = ((target.width + self.cursor_diameter) * 0.5) as f64;
            let in_contact = self.position.distance(&target.position) <= contact_distance;
            let was_in_contact = self.in_contact.contains(&target.id);

            if in_contact && !was_in_contact {
                self.in_contact.push(target.id);
                self.highlighted = Some(target.id);
                events.push(PointerEvent::TargetEntered {
                    target_id: target.id,
                });
            } else if !in_contact && was_in_contact {
                self.in_contact.retain(|id| *id != target.id);
                if self.highlighted == Some(target.id) {
                    self.highlighted = self.in_contact.first().copied();
                }
                events.push(PointerEvent::TargetExited {
                    target_id: target.id,
                });
            }
        }
    }

    fn check_contact_selection(&mut self, targets: &[Target], events: &mut Vec<PointerEvent>) {
        if let Some(highlighted) = self.highlighted {
            if self.auto_acquired != Some(highlighted) {
                self.auto_acquired = Some(highlighted);
                events.push(PointerEvent::TargetAcquired {
                    target_id: Some(highlighted),
                });
            }
        } else if let Some(acquired) = self.auto_acquired {
            // re-arm only once the cursor is well clear of the target
            let release_distance = targets
                .iter()
                .find(|t| t.id == acquired)
                .map(|t| t.width as f64 * 3.0f64.sqrt())
                .unwrap_or(0.0);
            if self
                .position
                .distance(&target_position(targets, acquired))
                > release_distance
            {
                self.auto_acquired = None;
            }
        }
    }

    fn check_button_selection(&mut self, button_down: bool, events: &mut Vec<PointerEvent>) {
        let pressed = button_down && !self.button_was_down;
        let released = !button_down && self.button_was_down;

        if pressed {
            self.acquired_position = self.position;
            events.push(PointerEvent::TargetAcquired {
                target_id: self.highlighted,
            });
        }

        if self.is_dragging && released {
            events.push(PointerEvent::DragEnded {
                dragged: self.dragged,
                receiving: self.highlighted,
            });
            self.dragged = None;
            self.is_dragging = false;
        } else if button_down {
            let moved = self.position.distance(&self.acquired_position);
            if !self.is_dragging && moved > DRAG_START_DISTANCE {
                self.is_dragging = true;
                self.dragged = self.highlighted;
                events.push(PointerEvent::DragStarted {
                    target_id: self.dragged,
                });
            }
        } else {
            self.is_dragging = false;
        }
    }

    /// Target currently under the cursor, if any; what a renderer would
    /// highlight.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }
}

fn target_position(targets: &[Target], id: usize) -> Vec3 {
    targets
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.position)
        .unwrap_or(Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_targets() -> Vec<Target> {
        vec![
            Target::new(0, Vec3::new(0.0, 0.0, 0.1), 0.04),
            Target::new(1, Vec3::new(0.0, 0.0, -0.1), 0.04),
        ]
    }

    #[test]
    fn contact_produces_matched_enter_and_exit() {
        let targets = two_targets();
        let mut interactor = CursorInteractor::new(SelectionMethod::Button, 0.01);
        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), false);
        assert_eq!(events, vec![PointerEvent::TargetEntered { target_id: 0 }]);
        assert_eq!(interactor.highlighted(), Some(0));

        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.0), false);
        assert_eq!(events, vec![PointerEvent::TargetExited { target_id: 0 }]);
        assert_eq!(interactor.highlighted(), None);
    }

    #[test]
    fn button_press_acquires_the_highlighted_target() {
        let targets = two_targets();
        let mut interactor = CursorInteractor::new(SelectionMethod::Button, 0.01);
        interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), false);
        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), true);
        assert_eq!(
            events,
            vec![PointerEvent::TargetAcquired { target_id: Some(0) }]
        );
        // holding without motion never starts a drag
        let events = interactor.update(&targets, Vec3::new(0.0, 0.001, 0.1), true);
        assert!(events.is_empty());
    }

    #[test]
    fn held_button_with_movement_drags_to_the_receiving_target() {
        let targets = two_targets();
        let mut interactor = CursorInteractor::new(SelectionMethod::Button, 0.01);
        interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), false);
        interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), true);

        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.09), true);
        assert_eq!(
            events,
            vec![PointerEvent::DragStarted { target_id: Some(0) }]
        );

        interactor.update(&targets, Vec3::new(0.0, 0.0, -0.1), true);
        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, -0.1), false);
        assert_eq!(
            events,
            vec![PointerEvent::DragEnded {
                dragged: Some(0),
                receiving: Some(1),
            }]
        );
    }

    #[test]
    fn automatic_selection_fires_on_contact_and_rearms_after_release() {
        let targets = two_targets();
        let mut interactor = CursorInteractor::new(SelectionMethod::AutomaticByContact, 0.01);
        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), false);
        assert!(events.contains(&PointerEvent::TargetAcquired { target_id: Some(0) }));

        // leaving the contact zone but staying near keeps it armed
        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.13), false);
        assert_eq!(events, vec![PointerEvent::TargetExited { target_id: 0 }]);

        // far past the release distance, then back in: acquires again
        interactor.update(&targets, Vec3::new(0.0, 0.0, 0.0), false);
        let events = interactor.update(&targets, Vec3::new(0.0, 0.0, 0.1), false);
        assert!(events.contains(&PointerEvent::TargetAcquired { target_id: Some(0) }));
    }
}
