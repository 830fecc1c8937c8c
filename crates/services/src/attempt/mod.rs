mod progress;
mod state;
mod workflow;

pub use progress::AttemptProgress;
pub use state::{Attempt, PASS_THRESHOLD};
pub use workflow::{AttemptLoopService, AttemptOutcome};
