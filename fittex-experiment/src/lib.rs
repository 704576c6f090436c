pub mod block;
pub mod config;
pub mod events;
pub mod export;
pub mod layout;
pub mod trial;

pub use block::{BlockController, BlockStatus};
pub use config::{
    DragMouseConfiguration, ExperimentConfiguration, IndexOfDifficultyConfiguration,
    TappingMouseConfiguration,
};
pub use events::{PointerEvent, TestNotice};
pub use export::FlatRecord;
pub use layout::build_target_plane;
pub use test::{TestConfiguration, TestController, TestRecord, TestStatus};
pub use trial::{TrialController, TrialPhase, TrialStatus};
