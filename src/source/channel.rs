//! Channel-based data source.
//!
//! Receives poll snapshots via a tokio watch channel, for hosts whose
//! poller pushes each result instead of writing it to a file. A poller
//! that writes JSON lines to a pipe is served by [`ChannelSource::spawn_reader`].

use std::io::BufRead;
use std::sync::{Arc, Mutex};
use std::thread;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{DataSource, PollSnapshot};

/// A data source that receives poll snapshots via a channel.
///
/// Only the latest snapshot is kept; a slow reader skips intermediate
/// polls, which is fine because every poll is evaluated independently.
/// A snapshot sent just before the sender is dropped is still delivered.
///
/// # Example
///
/// ```
/// use eltek_doctor::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("snmp://10.0.0.5");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<PollSnapshot>,
    description: String,
    initial_returned: bool,
    shared_error: Arc<Mutex<Option<String>>>,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// `source_description` names the device or poller feeding the channel
    /// (e.g. "snmp://10.0.0.5").
    pub fn new(receiver: watch::Receiver<PollSnapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
            shared_error: Arc::default(),
            last_error: None,
        }
    }

    /// Create a channel pair.
    ///
    /// Returns (sender, source); the host poller keeps the sender.
    pub fn create(source_description: &str) -> (watch::Sender<PollSnapshot>, Self) {
        let (tx, rx) = watch::channel(PollSnapshot::default());
        (tx, Self::new(rx, source_description))
    }

    /// Feed the channel from newline-delimited JSON snapshots.
    ///
    /// A background thread reads `reader` until end of input. Blank lines
    /// are skipped; a malformed line is reported through [`DataSource::error`]
    /// until the next good snapshot arrives. Only pushed snapshots are
    /// returned, not the empty initial value.
    pub fn spawn_reader<R>(reader: R, source_description: &str) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, mut source) = Self::create(source_description);
        source.initial_returned = true;
        let shared_error = Arc::clone(&source.shared_error);

        thread::spawn(move || {
            for (number, line) in reader.lines().enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        set_error(&shared_error, Some(format!("Read error: {}", e)));
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<PollSnapshot>(&line) {
                    Ok(snapshot) => {
                        set_error(&shared_error, None);
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(line = number + 1, error = %e, "skipping malformed snapshot");
                        set_error(&shared_error, Some(format!("Parse error: {}", e)));
                    }
                }
            }
            debug!("snapshot reader finished");
        });

        source
    }
}

fn set_error(shared: &Mutex<Option<String>>, error: Option<String>) {
    if let Ok(mut slot) = shared.lock() {
        *slot = error;
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<PollSnapshot> {
        if let Ok(error) = self.shared_error.lock() {
            self.last_error = error.clone();
        }

        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Unlike `Receiver::has_changed`, this still works once the sender
        // has been dropped.
        let latest = self.receiver.borrow_and_update();
        if latest.has_changed() {
            Some((*latest).clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The feeding side is gone and no unseen snapshot is left.
    fn is_exhausted(&self) -> bool {
        self.receiver.has_changed().is_err() && !self.receiver.borrow().has_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    fn wait_for_reader(source: &ChannelSource) {
        for _ in 0..500 {
            if source.receiver.has_changed().is_err() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("reader thread did not finish");
    }

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // The initial (empty) snapshot is returned once
        let snapshot = source.poll().unwrap();
        assert!(snapshot.is_empty());
        assert!(source.poll().is_none());

        let mut poll = PollSnapshot::new();
        poll.insert(
            "eltek_temperature".to_string(),
            vec![vec!["31".to_string(), "1".to_string()]],
        );
        tx.send(poll).unwrap();

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot["eltek_temperature"][0][0], "31");
        assert!(source.error().is_none());
        assert!(!source.is_exhausted());
    }

    #[tokio::test]
    async fn test_last_snapshot_survives_closed_sender() {
        let (tx, mut source) = ChannelSource::create("task");
        let _ = source.poll();

        let handle = tokio::spawn(async move {
            let mut poll = PollSnapshot::new();
            poll.insert("eltek".to_string(), vec![vec!["EL-1".to_string()]]);
            tx.send(poll).unwrap();
        });
        handle.await.unwrap();

        // The sender is dropped by now
        assert!(!source.is_exhausted());
        let snapshot = source.poll().unwrap();
        assert!(snapshot.contains_key("eltek"));
        assert!(source.poll().is_none());
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_reader_delivers_latest_line() {
        let input = concat!(
            "{\"eltek_temperature\": [[\"20\", \"1\"]]}\n",
            "\n",
            "{\"eltek_temperature\": [[\"45\", \"1\"]]}\n",
        );
        let mut source = ChannelSource::spawn_reader(Cursor::new(input), "stdin");
        wait_for_reader(&source);

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot["eltek_temperature"][0][0], "45");
        assert!(source.error().is_none());
        assert!(source.poll().is_none());
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_reader_reports_malformed_line() {
        let input = "{\"eltek\": [[\"EL-1\"]]}\nnot json\n";
        let mut source = ChannelSource::spawn_reader(Cursor::new(input), "stdin");
        wait_for_reader(&source);

        let snapshot = source.poll().unwrap();
        assert!(snapshot.contains_key("eltek"));
        assert!(source.error().unwrap().starts_with("Parse error"));
    }

    #[test]
    fn test_reader_without_input() {
        let mut source = ChannelSource::spawn_reader(Cursor::new(""), "stdin");
        wait_for_reader(&source);

        assert!(source.poll().is_none());
        assert!(source.is_exhausted());
    }
}
