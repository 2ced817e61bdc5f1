//! Replay channel for captured-output fixtures.

use indexmap::IndexMap;

use super::CommandChannel;
use crate::error::ChannelError;

/// A [`CommandChannel`] that replays canned output.
///
/// Maps command strings to captured device output, recording every command
/// it is asked to run. Commands with no canned output answer with an
/// `Invalid input:` line the way a live device rejects an unknown command,
/// so candidate-list sends fall through to the next candidate.
///
/// Intended for tests and offline parsing of captured sessions.
#[derive(Debug, Clone, Default)]
pub struct ReplayChannel {
    outputs: IndexMap<String, String>,
    sent: Vec<String>,
}

impl ReplayChannel {
    /// Create an empty replay channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned output for a command.
    pub fn with_output(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(command.into(), output.into());
        self
    }

    /// Commands sent so far, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
}

impl CommandChannel for ReplayChannel {
    fn send(&mut self, command: &str) -> Result<String, ChannelError> {
        self.sent.push(command.to_string());
        match self.outputs.get(command) {
            Some(output) => Ok(output.clone()),
            None => Ok(format!(
                "Invalid input: incomplete command found at '^' position.\n% {command}"
            )),
        }
    }
}
