//! Progress reporting for recursive parameter operations
//!
//! The library never prints. Long-running operations take an optional
//! [`ProgressCallback`] and the CLI decides how to show the events.

/// Progress events emitted by recursive copy, move and delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Enumeration of a path finished
    Enumerated { path: String, count: usize },
    /// One parameter was written to its destination
    Copied { source: String, destination: String },
    /// A delete batch completed
    Deleted { count: usize },
}

/// Callback type for progress events
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

pub(crate) fn emit(callback: Option<&ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}
