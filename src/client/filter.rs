//! Password field filtering for command payloads.
//!
//! Resource payloads can carry plaintext passwords. A password filter
//! controls how those fields are represented on the wire: passed through,
//! base64 obscured, or replaced by a placeholder. The base64 transform is
//! applied on the client side, symmetrically: inputs are encoded before
//! sending and outputs are decoded after receiving, so callers always see
//! plaintext values regardless of the wire representation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::{Error, Result};

/// The key of password fields in resource payloads.
const PASSWORD_KEY: &str = "password";

/// The value the service substitutes for password fields under the hidden
/// filter.
pub const HIDDEN_PLACEHOLDER: &str = "****************";

/// PasswordFilter selects how password fields are represented on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PasswordFilter {
    /// No filter requested; the service's default applies.
    #[default]
    Unset,
    /// Passwords travel as plaintext.
    None,
    /// Passwords travel base64 encoded. Obscures casual viewing only; this
    /// is not encryption.
    Base64,
    /// Passwords are replaced by [`HIDDEN_PLACEHOLDER`]. Output only: a
    /// hidden input would destroy the password.
    Hidden,
}

impl PasswordFilter {
    /// The wire name of the filter, or `None` when unset and the parameter
    /// is to be omitted from the command.
    pub fn wire_name(&self) -> Option<&'static str> {
        match self {
            PasswordFilter::Unset => None,
            PasswordFilter::None => Some("none"),
            PasswordFilter::Base64 => Some("base64"),
            PasswordFilter::Hidden => Some("hidden"),
        }
    }

    /// Transform password fields in a payload about to be sent.
    pub(crate) fn filter_input(&self, value: &mut Value) -> Result<()> {
        match self {
            PasswordFilter::Unset | PasswordFilter::None => Ok(()),
            PasswordFilter::Base64 => {
                transform_passwords(value, &|password| Ok(STANDARD.encode(password)))
            }
            PasswordFilter::Hidden => Err(Error::PasswordFilter(
                "hidden is not a valid input filter".to_string(),
            )),
        }
    }

    /// Transform password fields in a received payload back to plaintext.
    /// Hidden passwords stay hidden; there is nothing to restore.
    pub(crate) fn filter_output(&self, value: &mut Value) -> Result<()> {
        match self {
            PasswordFilter::Unset | PasswordFilter::None | PasswordFilter::Hidden => Ok(()),
            PasswordFilter::Base64 => transform_passwords(value, &|password| {
                let raw = STANDARD
                    .decode(password)
                    .map_err(|err| Error::PasswordFilter(format!("invalid base64: {err}")))?;
                String::from_utf8(raw)
                    .map_err(|err| Error::PasswordFilter(format!("invalid utf-8: {err}")))
            }),
        }
    }
}

/// Walk the JSON tree and apply the transform to every string value stored
/// under a password key.
fn transform_passwords<F>(value: &mut Value, transform: &F) -> Result<()>
where
    F: Fn(&str) -> Result<String>,
{
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == PASSWORD_KEY {
                    if let Value::String(password) = entry {
                        *entry = Value::String(transform(password)?);
                    }
                } else {
                    transform_passwords(entry, transform)?;
                }
            }
        }
        Value::Array(entries) => {
            for entry in entries.iter_mut() {
                transform_passwords(entry, transform)?;
            }
        }
        _ => {}
    }
    Ok(())
}
