//! Per-resource apply results.
//!
//! An apply command returns one result per submitted resource plus an
//! overall success flag. A result always embeds the resource description it
//! pertains to; any extra fields the service reports travel along in a raw
//! side channel reachable through [`ResourceResult::dump`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::resource::group::Resource;
use crate::resource::refs::ResourceRef;

/// ResourceResult is the outcome the service reported for one resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceResult {
    resource: Resource,
    message: String,
    success: bool,
    state: String,
    status: Map<String, Value>,
}

impl ResourceResult {
    /// Whether the operation on the resource succeeded.
    pub fn ok(&self) -> bool {
        self.success
    }

    /// The resource the result pertains to.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// A reference identifying the resource the result pertains to.
    pub fn identity(&self) -> ResourceRef {
        self.resource.identity()
    }

    /// The message the service reported, if any.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The state the service reported for the resource, "created" or
    /// "removed" for example. Informational only.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The complete raw result payload, including fields this library does
    /// not model. Useful for debugging and for forward compatibility.
    pub fn dump(&self) -> &Map<String, Value> {
        &self.status
    }
}

impl fmt::Display for ResourceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}: resource operation failed", self.identity())
        } else {
            write!(f, "{}: {}", self.identity(), self.message)
        }
    }
}

impl<'de> Deserialize<'de> for ResourceResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = Map::deserialize(deserializer)?;
        let Some(resource) = status.get("resource") else {
            return Err(serde::de::Error::missing_field("resource"));
        };
        let resource =
            Resource::from_value(resource.clone()).map_err(serde::de::Error::custom)?;
        let message = status
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let success = status
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or_default();
        let state = status
            .get("state")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(ResourceResult {
            resource,
            message,
            success,
            state,
            status,
        })
    }
}

impl Serialize for ResourceResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.status.serialize(serializer)
    }
}

/// ResultGroup is the overall outcome of an apply command.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ResultGroup {
    #[serde(default)]
    results: Vec<ResourceResult>,
    #[serde(default)]
    success: bool,
}

impl ResultGroup {
    /// Whether every resource operation in the group succeeded.
    pub fn ok(&self) -> bool {
        self.success
    }

    /// All per-resource results, in submission order.
    pub fn results(&self) -> &[ResourceResult] {
        &self.results
    }

    /// Only the results of failed resource operations.
    pub fn error_results(&self) -> Vec<&ResourceResult> {
        self.results.iter().filter(|r| !r.ok()).collect()
    }
}

impl fmt::Display for ResultGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_results();
        write!(f, "{} resource errors", errors.len())?;
        for (i, result) in errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{result}")?;
        }
        Ok(())
    }
}
