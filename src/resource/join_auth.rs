//! The JoinAuth resource: credentials used to join SMB servers to a domain.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::resource::cluster::{Cluster, DomainSettings, JoinAuthSource};
use crate::resource::random_link_name;
use crate::resource::refs::ResourceRef;
use crate::resource::types::{Intent, ResourceType};

/// JoinAuthValues contains the username and password an SMB server will use
/// to join a domain.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct JoinAuthValues {
    /// The name of the joining account.
    pub username: String,
    /// The password of the joining account. Only checked for presence;
    /// wire representation is controlled by the per-call password filter.
    pub password: String,
}

/// JoinAuth is a resource containing the parameters needed to join an SMB
/// server to a domain.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct JoinAuth {
    /// Whether the resource is to be created/updated or removed.
    #[serde(default)]
    pub intent: Intent,
    /// The unique id of the join auth resource.
    pub auth_id: String,
    /// The join credentials. Required for present intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<JoinAuthValues>,
    /// When set, the resource is owned by the named cluster and is removed
    /// together with it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linked_to_cluster: String,
}

impl JoinAuth {
    /// A new join auth resource with default values.
    pub fn new(auth_id: impl Into<String>) -> Self {
        JoinAuth {
            intent: Intent::Present,
            auth_id: auth_id.into(),
            auth: Some(JoinAuthValues::default()),
            ..Default::default()
        }
    }

    /// A new join auth resource owned by the given cluster. The resource
    /// gets a generated id, can only be used by the cluster it links to,
    /// and is automatically deleted when that cluster is deleted. A source
    /// reference is registered in the cluster's domain settings.
    pub fn linked(cluster: &mut Cluster) -> Self {
        let ja = JoinAuth {
            linked_to_cluster: cluster.cluster_id.clone(),
            ..JoinAuth::new(random_link_name(&cluster.cluster_id))
        };
        cluster
            .domain_settings
            .get_or_insert_with(DomainSettings::default)
            .join_sources
            .push(JoinAuthSource::resource(ja.auth_id.clone()));
        ja
    }

    /// A new join auth description that removes the resource from
    /// management.
    pub fn to_remove(auth_id: impl Into<String>) -> Self {
        JoinAuth {
            intent: Intent::Removed,
            auth_id: auth_id.into(),
            ..Default::default()
        }
    }

    /// Set the authentication values.
    pub fn set_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let auth = self.auth.get_or_insert_with(JoinAuthValues::default);
        auth.username = username.into();
        auth.password = password.into();
        self
    }

    /// The resource type of a join auth resource.
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::JoinAuth
    }

    /// Whether the resource is to be created/updated or removed.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// A reference identifying this join auth resource.
    pub fn identity(&self) -> ResourceRef {
        ResourceRef::id(ResourceType::JoinAuth, self.auth_id.clone())
    }

    /// Validate the resource. Removed intent requires only the auth_id;
    /// present intent additionally requires a username and password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.auth_id.is_empty() {
            return Err(ValidationError::new("missing auth_id"));
        }
        if self.intent == Intent::Removed {
            return Ok(());
        }

        let Some(auth) = &self.auth else {
            return Err(ValidationError::new("missing auth parameters"));
        };
        if auth.username.is_empty() {
            return Err(ValidationError::new("missing username"));
        }
        if auth.password.is_empty() {
            return Err(ValidationError::new("missing password"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_join_auth_identity() {
        let ja = JoinAuth::new("jauth1");
        assert_eq!(ja.identity().to_string(), "ceph.smb.join.auth.jauth1");
    }

    #[test]
    fn test_validation_tiers() {
        assert!(JoinAuth::to_remove("jauth1").validate().is_ok());

        let ja = JoinAuth::new("jauth1");
        assert_eq!(ja.validate().unwrap_err().message(), "missing username");

        let ja = JoinAuth::new("jauth1").set_auth("admin", "");
        assert_eq!(ja.validate().unwrap_err().message(), "missing password");

        let ja = JoinAuth::new("jauth1").set_auth("admin", "s3cr3t");
        assert!(ja.validate().is_ok());
    }

    #[test]
    fn test_linked_join_auth_registers_source() {
        let mut cluster = Cluster::active_directory("cc1", "example.org");
        let ja = JoinAuth::linked(&mut cluster).set_auth("admin", "s3cr3t");

        assert_eq!(ja.linked_to_cluster, "cc1");
        assert!(ja.auth_id.starts_with("cc1"));
        let sources = &cluster.domain_settings.as_ref().unwrap().join_sources;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].reference, ja.auth_id);
    }

    #[test]
    fn test_join_auth_round_trip() {
        let ja = JoinAuth::new("jauth1").set_auth("admin", "s3cr3t");
        let j = serde_json::to_string(&ja).unwrap();
        let back: JoinAuth = serde_json::from_str(&j).unwrap();
        assert_eq!(back, ja);
    }
}
