//! Addressing primitives used to refer to resources without payload data.

use std::fmt;

use crate::resource::types::ResourceType;

/// ResourceRef names a resource or a class of resources.
///
/// The string form is a stable opaque key used in wire requests: `<type>`
/// for a whole kind, `<type>.<id>` for a top-level resource, and
/// `<type>.<parent>.<id>` for a resource nested under a parent. It is not a
/// second serialization format and is never re-parsed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResourceRef {
    /// Addresses every resource of a kind.
    Type(ResourceType),
    /// Addresses a single top-level resource.
    Id {
        /// The kind of the resource.
        resource_type: ResourceType,
        /// The resource id.
        id: String,
    },
    /// Addresses a resource nested under a parent, typically a cluster.
    ChildId {
        /// The kind of the resource.
        resource_type: ResourceType,
        /// The id of the parent resource.
        parent_id: String,
        /// The resource id.
        id: String,
    },
}

impl ResourceRef {
    /// Construct a reference to a single top-level resource.
    pub fn id(resource_type: ResourceType, id: impl Into<String>) -> Self {
        ResourceRef::Id {
            resource_type,
            id: id.into(),
        }
    }

    /// Construct a reference to a resource nested under a parent.
    pub fn child_id(
        resource_type: ResourceType,
        parent_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        ResourceRef::ChildId {
            resource_type,
            parent_id: parent_id.into(),
            id: id.into(),
        }
    }

    /// The kind of resource this reference addresses.
    pub fn resource_type(&self) -> &ResourceType {
        match self {
            ResourceRef::Type(rt) => rt,
            ResourceRef::Id { resource_type, .. } => resource_type,
            ResourceRef::ChildId { resource_type, .. } => resource_type,
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Type(rt) => write!(f, "{rt}"),
            ResourceRef::Id { resource_type, id } => write!(f, "{resource_type}.{id}"),
            ResourceRef::ChildId {
                resource_type,
                parent_id,
                id,
            } => write!(f, "{resource_type}.{parent_id}.{id}"),
        }
    }
}

impl From<ResourceType> for ResourceRef {
    fn from(rt: ResourceType) -> Self {
        ResourceRef::Type(rt)
    }
}
