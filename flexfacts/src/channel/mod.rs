//! Command channel boundary.
//!
//! The channel layer is the capability the core consumes to obtain raw
//! command output from a live device. Session establishment, authentication
//! and keep-alive live behind this trait and are not part of this crate.

mod replay;

pub use replay::ReplayChannel;

use crate::error::ChannelError;

/// Marker a device prints when it rejects a command it does not know.
pub const INVALID_INPUT: &str = "Invalid input:";

/// A request/response command channel to a device.
///
/// One command in flight at a time; each call returns the complete text the
/// device produced for that command. Implementations fail with
/// [`ChannelError`] on socket/EOF-class conditions, which the core
/// propagates unmodified.
pub trait CommandChannel {
    /// Execute a single command and return its raw text output.
    fn send(&mut self, command: &str) -> Result<String, ChannelError>;

    /// Try each candidate command in order until one is accepted.
    ///
    /// A candidate is rejected when its output carries the
    /// [`INVALID_INPUT`] marker. When every candidate is rejected, the last
    /// output is returned as-is; downstream extractors treat it as text
    /// with no matching rows.
    fn send_any(&mut self, candidates: &[&str]) -> Result<String, ChannelError> {
        let mut output = String::new();
        for command in candidates {
            output = self.send(command)?;
            if !output.contains(INVALID_INPUT) {
                break;
            }
        }
        Ok(output)
    }
}

impl<C: CommandChannel + ?Sized> CommandChannel for &mut C {
    fn send(&mut self, command: &str) -> Result<String, ChannelError> {
        (**self).send(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_any_skips_rejected_candidates() {
        let mut channel = ReplayChannel::new().with_output("display xyz", "xyz output");

        let output = channel
            .send_any(&["display abc", "display xyz"])
            .unwrap();
        assert_eq!(output, "xyz output");
        assert_eq!(channel.sent(), ["display abc", "display xyz"]);
    }

    #[test]
    fn test_send_any_stops_at_first_accepted() {
        let mut channel = ReplayChannel::new()
            .with_output("display abc", "abc output")
            .with_output("display xyz", "xyz output");

        let output = channel
            .send_any(&["display abc", "display xyz"])
            .unwrap();
        assert_eq!(output, "abc output");
        assert_eq!(channel.sent(), ["display abc"]);
    }

    #[test]
    fn test_send_any_keeps_last_output_when_all_rejected() {
        let mut channel = ReplayChannel::new();

        let output = channel.send_any(&["display abc", "display xyz"]).unwrap();
        assert!(output.contains(INVALID_INPUT));
        assert_eq!(channel.sent().len(), 2);
    }
}
