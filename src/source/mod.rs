//! Data source abstraction for receiving poll snapshots.
//!
//! The SNMP transport lives in the host. This module only covers how its
//! results reach the doctor: polled from a JSON file, or pushed through an
//! in-memory channel by a host-side poller (in-process, or as JSON lines on
//! a pipe).

mod channel;
mod file;
mod snapshot;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use snapshot::{PollSnapshot, StringTable};

use std::fmt::Debug;

/// Trait for receiving poll snapshots from various sources.
///
/// # Example
///
/// ```
/// use eltek_doctor::{DataSource, FileSource};
///
/// let mut source = FileSource::new("poll.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} sections", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<PollSnapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the error message if the last poll failed.
    fn error(&self) -> Option<&str>;

    /// Returns true once no further snapshots can arrive.
    fn is_exhausted(&self) -> bool {
        false
    }
}
