//! The polymorphic resource value and the group wire codec.
//!
//! Resources travel in a `{"resources": [...]}` envelope. Each element
//! carries a `resource_type` discriminator that is synthesized at encode
//! time and consumed at decode time; it is never a field of the concrete
//! resource structs. Decoding dispatches on the discriminator through the
//! registry and falls back to a generic resource for unknown kinds.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, ValidationError};
use crate::resource::cluster::Cluster;
use crate::resource::generic::{GenericResource, RESOURCE_TYPE_KEY};
use crate::resource::join_auth::JoinAuth;
use crate::resource::refs::ResourceRef;
use crate::resource::registry::registry;
use crate::resource::share::Share;
use crate::resource::tls_cred::TlsCredential;
use crate::resource::types::{Intent, ResourceType};
use crate::resource::users_groups::UsersAndGroups;

/// Key of the resource list in the wire envelope.
const RESOURCES_KEY: &str = "resources";

/// Resource is a typed or generic smb resource description.
#[derive(Clone, Debug, PartialEq)]
pub enum Resource {
    /// An SMB cluster.
    Cluster(Cluster),
    /// An SMB share.
    Share(Share),
    /// Domain join credentials.
    JoinAuth(JoinAuth),
    /// Local user and group records.
    UsersAndGroups(UsersAndGroups),
    /// TLS credential material.
    TlsCredential(TlsCredential),
    /// A resource of a kind unknown to this library.
    Generic(GenericResource),
}

impl Resource {
    /// The type of the resource.
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Cluster(c) => c.resource_type(),
            Resource::Share(s) => s.resource_type(),
            Resource::JoinAuth(ja) => ja.resource_type(),
            Resource::UsersAndGroups(ug) => ug.resource_type(),
            Resource::TlsCredential(tc) => tc.resource_type(),
            Resource::Generic(g) => g.resource_type(),
        }
    }

    /// Whether the resource is to be created/updated or removed.
    pub fn intent(&self) -> Intent {
        match self {
            Resource::Cluster(c) => c.intent(),
            Resource::Share(s) => s.intent(),
            Resource::JoinAuth(ja) => ja.intent(),
            Resource::UsersAndGroups(ug) => ug.intent(),
            Resource::TlsCredential(tc) => tc.intent(),
            Resource::Generic(g) => g.intent(),
        }
    }

    /// A reference identifying the resource.
    pub fn identity(&self) -> ResourceRef {
        match self {
            Resource::Cluster(c) => c.identity(),
            Resource::Share(s) => s.identity(),
            Resource::JoinAuth(ja) => ja.identity(),
            Resource::UsersAndGroups(ug) => ug.identity(),
            Resource::TlsCredential(tc) => tc.identity(),
            Resource::Generic(g) => g.identity(),
        }
    }

    /// Validate the resource.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Resource::Cluster(c) => c.validate(),
            Resource::Share(s) => s.validate(),
            Resource::JoinAuth(ja) => ja.validate(),
            Resource::UsersAndGroups(ug) => ug.validate(),
            Resource::TlsCredential(tc) => tc.validate(),
            Resource::Generic(g) => g.validate(),
        }
    }

    /// Decode a resource from a JSON value, dispatching on the
    /// `resource_type` discriminator. Unrecognized kinds decode as generic
    /// resources.
    pub fn from_value(value: Value) -> Result<Resource, Error> {
        let type_name = value
            .get(RESOURCE_TYPE_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);
        let Some(type_name) = type_name else {
            return Err(Error::UnknownResourceType(
                "resource_type not set".to_string(),
            ));
        };
        match registry().constructor(&type_name) {
            Some(build) => build(value),
            None => {
                debug!(resource_type = %type_name, "decoding unrecognized resource type as generic");
                Ok(Resource::Generic(GenericResource::from_value(value)?))
            }
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inner = match self {
            Resource::Generic(g) => return g.serialize(serializer),
            Resource::Cluster(c) => serde_json::to_value(c),
            Resource::Share(s) => serde_json::to_value(s),
            Resource::JoinAuth(ja) => serde_json::to_value(ja),
            Resource::UsersAndGroups(ug) => serde_json::to_value(ug),
            Resource::TlsCredential(tc) => serde_json::to_value(tc),
        };
        let mut value = inner.map_err(serde::ser::Error::custom)?;
        if let Value::Object(map) = &mut value {
            map.insert(
                RESOURCE_TYPE_KEY.to_string(),
                Value::String(self.resource_type().as_str().to_string()),
            );
        }
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Resource::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<Cluster> for Resource {
    fn from(c: Cluster) -> Self {
        Resource::Cluster(c)
    }
}

impl From<Share> for Resource {
    fn from(s: Share) -> Self {
        Resource::Share(s)
    }
}

impl From<JoinAuth> for Resource {
    fn from(ja: JoinAuth) -> Self {
        Resource::JoinAuth(ja)
    }
}

impl From<UsersAndGroups> for Resource {
    fn from(ug: UsersAndGroups) -> Self {
        Resource::UsersAndGroups(ug)
    }
}

impl From<TlsCredential> for Resource {
    fn from(tc: TlsCredential) -> Self {
        Resource::TlsCredential(tc)
    }
}

impl From<GenericResource> for Resource {
    fn from(g: GenericResource) -> Self {
        Resource::Generic(g)
    }
}

fn decode_error(msg: &str) -> Error {
    Error::Serialization(serde::de::Error::custom(msg))
}

/// ResourceGroup is the wire collection of resources.
///
/// Decoding accepts either the `{"resources": [...]}` envelope or, as a
/// shorthand, a single bare resource object whose discriminator names a
/// known kind. Encoding always emits the envelope form. Any element that
/// fails to decode fails the whole group; no partial results are produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceGroup {
    /// The resources in the group.
    pub resources: Vec<Resource>,
}

impl ResourceGroup {
    /// A group holding the given resources.
    pub fn new(resources: Vec<Resource>) -> Self {
        ResourceGroup { resources }
    }

    pub(crate) fn from_value(value: Value) -> Result<ResourceGroup, Error> {
        if value
            .get(RESOURCE_TYPE_KEY)
            .and_then(Value::as_str)
            .is_some_and(|name| registry().contains(name))
        {
            // single resource shorthand
            return Ok(ResourceGroup {
                resources: vec![Resource::from_value(value)?],
            });
        }

        let Value::Object(mut map) = value else {
            return Err(decode_error(
                "expected a resource object or a resources envelope",
            ));
        };
        let elements = match map.remove(RESOURCES_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(elements)) => elements,
            Some(_) => return Err(decode_error("resources must be an array")),
        };
        let resources = elements
            .into_iter()
            .map(Resource::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResourceGroup { resources })
    }
}

impl Serialize for ResourceGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ResourceGroup", 1)?;
        s.serialize_field(RESOURCES_KEY, &self.resources)?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for ResourceGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ResourceGroup::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Decode a resources envelope without typed dispatch: every element
/// becomes a generic resource. The single resource shorthand is accepted
/// here as well.
pub(crate) fn generic_resources_from_value(value: Value) -> Result<Vec<Resource>, Error> {
    if value.get(RESOURCE_TYPE_KEY).and_then(Value::as_str).is_some() {
        return Ok(vec![Resource::Generic(GenericResource::from_value(value)?)]);
    }
    let Value::Object(mut map) = value else {
        return Err(decode_error("expected a resources envelope"));
    };
    let elements = match map.remove(RESOURCES_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(elements)) => elements,
        Some(_) => return Err(decode_error("resources must be an array")),
    };
    elements
        .into_iter()
        .map(|element| GenericResource::from_value(element).map(Resource::Generic))
        .collect()
}

/// Validate a slice of resources, failing fast on the first invalid entry.
/// The error names the position and identity of the offending resource.
pub fn validate_resources(resources: &[Resource]) -> Result<(), Error> {
    for (i, res) in resources.iter().enumerate() {
        if let Err(err) = res.validate() {
            return Err(ValidationError::new(format!(
                "resource #{i}: {}: {err}",
                res.identity()
            ))
            .into());
        }
    }
    Ok(())
}
