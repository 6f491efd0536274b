//! Cleaning pipeline: orchestration, progress reporting, and replay.

mod builder;
mod progress;
mod replay;

pub use builder::{Cleaner, CleanerBuilder};
pub use progress::{CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
pub use replay::ReplayExecutor;
