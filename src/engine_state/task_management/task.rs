//! # Task System Core Traits
//!
//! A `Task` is a repeatable unit of background work. The worker calls
//! `process` in a loop; each call performs at most one bounded step and
//! reports whether it found anything to do.
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be moved onto the worker thread
//! - Shared state reached through a task must be synchronized by the task

/// Outcome of one `Task::process` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Work was done; more may be waiting.
    Progressed,
    /// Nothing to do until new work is signalled.
    Idle,
}

/// A unit of work the background worker repeats until it goes idle.
///
/// # Implementation Guidelines
/// - Keep each call short so cancellation is noticed promptly
/// - Return `TaskStatus::Idle` only when no progress was possible
pub trait Task: Send {
    fn process(&mut self) -> TaskStatus;
}
