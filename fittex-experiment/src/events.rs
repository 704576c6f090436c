use fittex_core::BlockRecord;

/// Interaction events delivered into the active trial.
///
/// The adapter that owns pointer sampling and collision detection emits
/// these; every delivery also carries the cursor position and timestamp
/// sampled at the moment of the event. Target ids are `None` when the
/// interaction happened over empty space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    TargetEntered {
        target_id: usize,
    },
    TargetExited {
        target_id: usize,
    },
    /// Selection event; finishes a tapping trial.
    TargetAcquired {
        target_id: Option<usize>,
    },
    DragStarted {
        target_id: Option<usize>,
    },
    /// Finishes a dragging trial when a drag is in progress.
    DragEnded {
        dragged: Option<usize>,
        receiving: Option<usize>,
    },
}

/// Completion notices surfaced to the owning harness
#[derive(Debug, Clone)]
pub enum TestNotice {
    /// Fired once per completed block, carrying its finalized record.
    BlockEnded(BlockRecord),
    /// Fired once, after the last block of the test.
    TestEnded,
}
