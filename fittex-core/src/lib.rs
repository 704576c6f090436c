pub mod error;
pub mod record;
pub mod results_math;
pub mod target;
pub mod vec3;

pub use error::{ConfigError, SequencingError};
pub use record::{BlockRecord, TrialRecord};
pub use target::{ExperimentTask, PlaneOrientation, Target};
pub use vec3::Vec3;
