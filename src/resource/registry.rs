//! Registry mapping resource type discriminators to constructors.
//!
//! Decoding peeks at a payload's `resource_type` field and dispatches to
//! the registered constructor. The table is built once, by an explicit
//! registration function, and is read-only afterwards, so concurrent reads
//! need no locking.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::error::Error;
use crate::resource::group::Resource;
use crate::resource::types::{
    CLUSTER_TYPE_NAME, JOIN_AUTH_TYPE_NAME, SHARE_TYPE_NAME, TLS_CREDENTIAL_TYPE_NAME,
    USERS_AND_GROUPS_TYPE_NAME,
};

/// A constructor decoding a JSON payload into a concrete resource.
pub type Constructor = fn(Value) -> Result<Resource, Error>;

/// Registry of resource type constructors.
#[derive(Default)]
pub struct Registry {
    constructors: BTreeMap<String, Constructor>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// A registry holding every resource kind this library implements.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Registry::new();
        registry.register(CLUSTER_TYPE_NAME, build_cluster);
        registry.register(SHARE_TYPE_NAME, build_share);
        registry.register(JOIN_AUTH_TYPE_NAME, build_join_auth);
        registry.register(USERS_AND_GROUPS_TYPE_NAME, build_users_and_groups);
        registry.register(TLS_CREDENTIAL_TYPE_NAME, build_tls_credential);
        registry
    }

    /// Register a constructor for a resource type name.
    pub fn register(&mut self, type_name: &str, build: Constructor) {
        self.constructors.insert(type_name.to_string(), build);
    }

    /// Look up the constructor for a resource type name.
    pub fn constructor(&self, type_name: &str) -> Option<Constructor> {
        self.constructors.get(type_name).copied()
    }

    /// Check if a constructor is registered for a resource type name.
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }
}

/// The process-wide registry, initialized with the builtin kinds on first
/// use.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::with_builtin_kinds)
}

fn build_cluster(value: Value) -> Result<Resource, Error> {
    Ok(Resource::Cluster(serde_json::from_value(value)?))
}

fn build_share(value: Value) -> Result<Resource, Error> {
    Ok(Resource::Share(serde_json::from_value(value)?))
}

fn build_join_auth(value: Value) -> Result<Resource, Error> {
    Ok(Resource::JoinAuth(serde_json::from_value(value)?))
}

fn build_users_and_groups(value: Value) -> Result<Resource, Error> {
    Ok(Resource::UsersAndGroups(serde_json::from_value(value)?))
}

fn build_tls_credential(value: Value) -> Result<Resource, Error> {
    Ok(Resource::TlsCredential(serde_json::from_value(value)?))
}
