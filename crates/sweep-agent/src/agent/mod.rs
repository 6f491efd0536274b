//! The bounded planning loop that drives tool selection.
//!
//! The planner repeatedly asks the reasoning provider for the next step,
//! invokes the chosen catalog tool, and feeds the observation back into
//! the prompt, until the model declares completion or a budget expires.
//! Only the resulting trace survives the loop; the real dataset is never
//! mutated here.

mod planner;
pub mod prompt;

pub use planner::{Decision, Planner, parse_decision};
