//! The command transport boundary.
//!
//! The admin client is generic over a [`Commander`], the single seam to the
//! remote administrative service. Production implementations wrap a cluster
//! connection; tests substitute a mock that records commands and replays
//! canned outputs.

use serde_json::Value;

use crate::error::{Error, Result};

/// The raw outcome of one administrative command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    /// The response body, JSON for the commands this library issues.
    pub body: Vec<u8>,
    /// The status string. Empty on success; on rejection it carries the
    /// service's explanation.
    pub status: String,
}

/// Commander issues administrative commands against a cluster.
pub trait Commander {
    /// Send one command, with an optional input buffer, and return its raw
    /// output. Transport-level failures are reported as
    /// [`Error::Transport`].
    fn mgr_command(&self, command: &Value, input: Option<&[u8]>) -> Result<CommandOutput>;
}

/// Unwrap a command output, mapping a non-empty status to a rejection
/// error.
pub(crate) fn require_ok(output: CommandOutput) -> Result<Vec<u8>> {
    if output.status.is_empty() {
        Ok(output.body)
    } else {
        Err(Error::Rejected(output.status))
    }
}
