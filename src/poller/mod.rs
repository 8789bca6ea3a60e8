mod report;
mod state;

pub use report::{CycleOutcome, CycleReport};
pub use state::{Detection, PollState, Stage};
