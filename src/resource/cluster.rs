//! The SMB Cluster resource and its satellite configuration types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::resource::refs::ResourceRef;
use crate::resource::types::{
    Clustering, ClusterAuthMode, Intent, ResourceType, Service, SourceType,
};

/// Placement is passed to cephadm to determine where cluster services run.
/// The mgr module accepts an open set of keys, so this stays a JSON map.
pub type Placement = serde_json::Map<String, Value>;

/// Build a placement with the common parameters, count and label, set.
/// Zero or empty values are omitted.
pub fn simple_placement(count: u32, label: &str) -> Placement {
    let mut p = Placement::new();
    if count > 0 {
        p.insert("count".to_string(), Value::from(count));
    }
    if !label.is_empty() {
        p.insert("label".to_string(), Value::from(label));
    }
    p
}

/// JoinAuthSource identifies a JoinAuth resource used as a source of
/// authentication parameters when joining a cluster to a domain.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct JoinAuthSource {
    /// How the referenced data is located. Always a resource reference.
    pub source_type: SourceType,
    /// The auth_id of the referenced JoinAuth resource.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl JoinAuthSource {
    /// Reference a JoinAuth resource by its auth_id.
    pub fn resource(reference: impl Into<String>) -> Self {
        JoinAuthSource {
            source_type: SourceType::Resource,
            reference: reference.into(),
        }
    }
}

/// UserGroupSource identifies a UsersAndGroups resource used as a source of
/// user and group information on an SMB cluster.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct UserGroupSource {
    /// How the referenced data is located. Always a resource reference.
    pub source_type: SourceType,
    /// The users_groups_id of the referenced UsersAndGroups resource.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl UserGroupSource {
    /// Reference a UsersAndGroups resource by its users_groups_id.
    pub fn resource(reference: impl Into<String>) -> Self {
        UserGroupSource {
            source_type: SourceType::Resource,
            reference: reference.into(),
        }
    }
}

/// TlsCredentialSource identifies a TlsCredential resource used as a source
/// of TLS material for a service used for-or-by the smb cluster.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TlsCredentialSource {
    /// How the referenced data is located. Always a resource reference.
    pub source_type: SourceType,
    /// The tls_credential_id of the referenced TlsCredential resource.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl TlsCredentialSource {
    /// Reference a TlsCredential resource by its tls_credential_id.
    pub fn resource(reference: impl Into<String>) -> Self {
        TlsCredentialSource {
            source_type: SourceType::Resource,
            reference: reference.into(),
        }
    }
}

/// DomainSettings configures the active directory domain of a cluster.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct DomainSettings {
    /// The domain realm.
    pub realm: String,
    /// JoinAuth resources providing credentials for the domain join.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub join_sources: Vec<JoinAuthSource>,
}

/// PublicAddress indicates an address, and optionally destination networks,
/// that a clustered SMB service publishes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct PublicAddress {
    /// The public IP address.
    pub address: String,
    /// Optional networks the address is reachable from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination: Vec<String>,
}

/// BindAddress indicates an IP address or network that an SMB cluster
/// running on a ceph node will bind to.
///
/// The wire form acts like a union keyed by field name; the private fields
/// keep callers from setting both at once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct BindAddress {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    network: String,
}

impl BindAddress {
    /// A bind address for a single IP address.
    pub fn from_address(address: impl Into<String>) -> Self {
        BindAddress {
            address: address.into(),
            network: String::new(),
        }
    }

    /// A bind address for a network, a range of addresses determined by a
    /// prefix length.
    pub fn from_network(network: impl Into<String>) -> Self {
        BindAddress {
            address: String::new(),
            network: network.into(),
        }
    }

    /// The IP address value.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The IP network address value.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Check if this bind address contains a network value.
    pub fn is_network(&self) -> bool {
        !self.network.is_empty()
    }
}

impl fmt::Display for BindAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_network() {
            write!(f, "network:{}", self.network)
        } else {
            write!(f, "address:{}", self.address)
        }
    }
}

/// RemoteControl configures the optional cluster remote control subsystem.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct RemoteControl {
    /// Explicitly enable or disable the remote control subsystem. When unset
    /// the state is determined by whether the TLS sources are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// TLS certificate for the remote control service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<TlsCredentialSource>,
    /// TLS key for the remote control service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<TlsCredentialSource>,
    /// TLS CA certificate for the remote control service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<TlsCredentialSource>,
}

impl RemoteControl {
    /// Validate the remote control configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_cert = self.cert.is_some();
        let has_key = self.key.is_some();
        let has_ca_cert = self.ca_cert.is_some();
        if has_cert != has_key {
            return Err(ValidationError::new(
                "cert and key must be specified together",
            ));
        }
        if has_ca_cert != has_cert {
            return Err(ValidationError::new(
                "a CA cert must be specified with a cert and key",
            ));
        }
        Ok(())
    }
}

/// Cluster configures an SMB Cluster resource managed within a ceph cluster.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Cluster {
    /// Whether the cluster is to be created/updated or removed.
    #[serde(default)]
    pub intent: Intent,
    /// The unique id of the cluster.
    pub cluster_id: String,
    /// How the cluster authenticates users. Required for present intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<ClusterAuthMode>,
    /// Active directory domain settings. Set exactly when auth_mode is
    /// active-directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_settings: Option<DomainSettings>,
    /// Local user and group sources. Set exactly when auth_mode is user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_group_settings: Vec<UserGroupSource>,
    /// Custom DNS server addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_dns: Vec<String>,
    /// Where cluster services will be run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    /// How SMB clustering is managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    /// Public addresses for clustered services.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub public_addrs: Vec<PublicAddress>,
    /// Custom network port bindings by virtual service name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_ports: BTreeMap<Service, u16>,
    /// Addresses or networks the SMB services will bind to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bind_addrs: Vec<BindAddress>,
    /// Settings for the remote control support service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_control: Option<RemoteControl>,
}

impl Cluster {
    /// A new cluster that authenticates against an active directory domain.
    pub fn active_directory(cluster_id: impl Into<String>, realm: impl Into<String>) -> Self {
        Cluster {
            intent: Intent::Present,
            cluster_id: cluster_id.into(),
            auth_mode: Some(ClusterAuthMode::ActiveDirectory),
            domain_settings: Some(DomainSettings {
                realm: realm.into(),
                join_sources: Vec::new(),
            }),
            ..Default::default()
        }
    }

    /// A new cluster that authenticates with locally defined users and
    /// groups. Link a UsersAndGroups resource to populate the sources.
    pub fn user(cluster_id: impl Into<String>) -> Self {
        Cluster {
            intent: Intent::Present,
            cluster_id: cluster_id.into(),
            auth_mode: Some(ClusterAuthMode::User),
            ..Default::default()
        }
    }

    /// A new cluster description that removes the cluster from management.
    pub fn to_remove(cluster_id: impl Into<String>) -> Self {
        Cluster {
            intent: Intent::Removed,
            cluster_id: cluster_id.into(),
            ..Default::default()
        }
    }

    /// The resource type of a cluster.
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::Cluster
    }

    /// Whether the cluster is to be created/updated or removed.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// A reference identifying this cluster resource.
    pub fn identity(&self) -> ResourceRef {
        ResourceRef::id(ResourceType::Cluster, self.cluster_id.clone())
    }

    /// Validate the resource. Removed intent requires only identity fields;
    /// present intent additionally requires exactly one auth branch matching
    /// the auth mode.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cluster_id.is_empty() {
            return Err(ValidationError::new("missing cluster_id"));
        }
        if self.intent == Intent::Removed {
            return Ok(());
        }

        match self.auth_mode {
            Some(ClusterAuthMode::ActiveDirectory) => {
                if self.domain_settings.is_none() {
                    return Err(ValidationError::new(
                        "active-directory auth mode requires domain_settings",
                    ));
                }
                if !self.user_group_settings.is_empty() {
                    return Err(ValidationError::new(
                        "active-directory auth mode does not accept user_group_settings",
                    ));
                }
            }
            Some(ClusterAuthMode::User) => {
                if self.domain_settings.is_some() {
                    return Err(ValidationError::new(
                        "user auth mode does not accept domain_settings",
                    ));
                }
                if self.user_group_settings.is_empty() {
                    return Err(ValidationError::new(
                        "user auth mode requires user_group_settings",
                    ));
                }
            }
            None => return Err(ValidationError::new("missing auth_mode")),
        }
        if let Some(rc) = &self.remote_control {
            rc.validate()?;
        }
        Ok(())
    }
}
