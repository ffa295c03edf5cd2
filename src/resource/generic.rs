//! Schema-less resources for forward compatibility.
//!
//! A GenericResource holds an open key/value payload plus inferred identity
//! metadata. It is used when the wire payload's declared kind is not known
//! to this library, or when a caller explicitly opts into generic mode to
//! work with new or experimental fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, ValidationError};
use crate::resource::group::Resource;
use crate::resource::refs::ResourceRef;
use crate::resource::registry::registry;
use crate::resource::types::{Intent, ResourceType};

/// The key holding a resource's type discriminator on the wire.
pub const RESOURCE_TYPE_KEY: &str = "resource_type";
/// The key holding a resource's intent on the wire.
pub const INTENT_KEY: &str = "intent";

fn string_value<'a>(values: &'a Map<String, Value>, key: &str) -> &'a str {
    values.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// IdentityKind is the metadata used to extract an identity from a generic
/// resource's payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IdentityKind {
    /// A resource with no parent and a single id field.
    TopLevel {
        /// The key of the id field.
        id_key: String,
    },
    /// A resource with a child relationship to another resource, a Share in
    /// a Cluster for example, carrying two id fields.
    Child {
        /// The key of the parent id field.
        parent_id_key: String,
        /// The key of the id field.
        id_key: String,
    },
}

impl IdentityKind {
    /// Extract the id fields from the payload and build a resource
    /// reference. Keys were located at inference time; a missing or
    /// non-string value degrades to an empty id component.
    pub fn identity(&self, values: &Map<String, Value>) -> ResourceRef {
        let resource_type = ResourceType::from_name(string_value(values, RESOURCE_TYPE_KEY));
        match self {
            IdentityKind::TopLevel { id_key } => {
                ResourceRef::id(resource_type, string_value(values, id_key))
            }
            IdentityKind::Child {
                parent_id_key,
                id_key,
            } => ResourceRef::child_id(
                resource_type,
                string_value(values, parent_id_key),
                string_value(values, id_key),
            ),
        }
    }
}

/// Inspect the payload and guess the best IdentityKind for it.
///
/// Every key ending in `_id` is considered an id field. One id field means
/// a top-level resource. With two id fields, `cluster_id` is preferred as
/// the parent key; otherwise the lexicographically first key is taken as
/// the parent. This is a guess, as the name says: a future three-level
/// hierarchy, or a parent key not named `cluster_id`, would defeat it.
pub fn guess_identity_kind(values: &Map<String, Value>) -> Result<IdentityKind, ValidationError> {
    let mut keys: Vec<&str> = values
        .keys()
        .filter(|key| key.ends_with("_id"))
        .map(String::as_str)
        .collect();
    keys.sort_unstable_by_key(|key| (*key != "cluster_id", *key));

    match keys[..] {
        [id_key] => Ok(IdentityKind::TopLevel {
            id_key: id_key.to_string(),
        }),
        [parent_id_key, id_key] => Ok(IdentityKind::Child {
            parent_id_key: parent_id_key.to_string(),
            id_key: id_key.to_string(),
        }),
        _ => Err(ValidationError::new(format!(
            "failed to guess identity kind ({} id keys found)",
            keys.len()
        ))),
    }
}

/// GenericResource is a resource that can hold data not known to the
/// concrete types implemented in this library.
///
/// Data is stored in the values map; metadata used to identify the resource
/// is inferred when the resource is built. Round-tripping a GenericResource
/// preserves every key, including nested unknown objects.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericResource {
    values: Map<String, Value>,
    id_kind: IdentityKind,
}

impl GenericResource {
    /// Build a generic resource from a JSON value. Fails if the value is
    /// not an object or if no identity kind can be inferred.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(values) => GenericResource::from_map(values),
            _ => Err(ValidationError::new("generic resource must be a JSON object").into()),
        }
    }

    /// Build a generic resource from a JSON object map.
    pub fn from_map(values: Map<String, Value>) -> Result<Self, Error> {
        let id_kind = guess_identity_kind(&values)?;
        Ok(GenericResource { values, id_kind })
    }

    /// Build a generic resource from a typed resource, losslessly. One use
    /// is to fill in known fields with the concrete types and then extend
    /// the generic form with fields not known to this library.
    pub fn from_resource(resource: &Resource) -> Result<Self, Error> {
        GenericResource::from_value(serde_json::to_value(resource)?)
    }

    /// The resource payload.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Mutable access to the resource payload. Changing id fields does not
    /// re-run identity inference.
    pub fn values_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.values
    }

    /// The inferred identity metadata.
    pub fn identity_kind(&self) -> &IdentityKind {
        &self.id_kind
    }

    /// The declared resource type of the payload.
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::from_name(string_value(&self.values, RESOURCE_TYPE_KEY))
    }

    /// The intent of the payload. A missing intent defaults to present.
    pub fn intent(&self) -> Intent {
        if string_value(&self.values, INTENT_KEY) == Intent::Removed.as_str() {
            Intent::Removed
        } else {
            Intent::Present
        }
    }

    /// A reference identifying this generic resource.
    pub fn identity(&self) -> ResourceRef {
        self.id_kind.identity(&self.values)
    }

    /// Validate the payload: the type discriminator must be present, the
    /// intent (when present) must be a legal value, and identity inference
    /// must succeed on the current payload.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if string_value(&self.values, RESOURCE_TYPE_KEY).is_empty() {
            return Err(ValidationError::new(
                "unknown resource type: resource_type not set",
            ));
        }
        let intent = string_value(&self.values, INTENT_KEY);
        if !intent.is_empty()
            && intent != Intent::Present.as_str()
            && intent != Intent::Removed.as_str()
        {
            return Err(ValidationError::new(format!("invalid intent {intent}")));
        }
        guess_identity_kind(&self.values)?;
        Ok(())
    }

    /// Convert this generic resource to a concrete typed resource.
    ///
    /// Fails with an unknown-resource-type error when no constructor is
    /// registered for the declared type. The conversion is lossy: keys not
    /// known to the typed schema are dropped.
    pub fn convert(&self) -> Result<Resource, Error> {
        self.validate()?;
        let type_name = string_value(&self.values, RESOURCE_TYPE_KEY).to_string();
        let Some(build) = registry().constructor(&type_name) else {
            return Err(Error::UnknownResourceType(type_name));
        };
        build(Value::Object(self.values.clone()))
    }
}

impl Serialize for GenericResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GenericResource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Map::deserialize(deserializer)?;
        GenericResource::from_map(values).map_err(serde::de::Error::custom)
    }
}
