//! Scheduler layer for the runner
//!
//! This layer drives a sourcing run: one worker per job collects and ranks
//! recommendations for a fixed window, a sequencer greets the ranked list
//! in order, and a retrier per greeted candidate keeps asking for a resume.
//! The orchestrator starts the workers and gathers their outcomes.

pub mod orchestrator;
pub mod retrier;
pub mod sequencer;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::Orchestrator;
pub use retrier::ResumeOutcome;
