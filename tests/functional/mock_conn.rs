//! Mock command transport for functional tests.
//!
//! `MockCommander` records every issued command and replays canned outputs
//! in order. It is cheaply cloneable so a test can keep a handle for
//! assertions after handing a clone to the admin client.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;
use smb_admin::client::{CommandOutput, Commander};
use smb_admin::error::{Error, Result};

/// One recorded command invocation.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    /// The command document.
    pub command: Value,
    /// The input buffer, parsed as JSON when present.
    pub input: Option<Value>,
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    responses: VecDeque<CommandOutput>,
    transport_failure: Option<String>,
}

/// A scripted command transport.
#[derive(Clone, Default)]
pub struct MockCommander {
    inner: Rc<RefCell<Inner>>,
}

impl MockCommander {
    pub fn new() -> Self {
        MockCommander::default()
    }

    /// Queue a successful response carrying the given JSON body.
    pub fn push_body(&self, body: Value) {
        self.inner.borrow_mut().responses.push_back(CommandOutput {
            body: serde_json::to_vec(&body).expect("canned body must serialize"),
            status: String::new(),
        });
    }

    /// Queue a rejection with the given status message.
    pub fn push_rejection(&self, status: &str) {
        self.inner.borrow_mut().responses.push_back(CommandOutput {
            body: Vec::new(),
            status: status.to_string(),
        });
    }

    /// Make the next command fail at the transport level.
    pub fn fail_transport(&self, message: &str) {
        self.inner.borrow_mut().transport_failure = Some(message.to_string());
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.borrow().calls.clone()
    }

    /// The number of commands issued so far.
    pub fn call_count(&self) -> usize {
        self.inner.borrow().calls.len()
    }
}

impl Commander for MockCommander {
    fn mgr_command(&self, command: &Value, input: Option<&[u8]>) -> Result<CommandOutput> {
        let mut inner = self.inner.borrow_mut();
        let input = input.map(|buf| serde_json::from_slice(buf).expect("input must be JSON"));
        inner.calls.push(RecordedCall {
            command: command.clone(),
            input,
        });
        if let Some(message) = inner.transport_failure.take() {
            return Err(Error::transport(std::io::Error::other(message)));
        }
        Ok(inner
            .responses
            .pop_front()
            .expect("no canned response queued"))
    }
}
