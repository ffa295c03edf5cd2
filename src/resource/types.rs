//! Enumerated wire values shared by the smb resource types.
//!
//! Every enum here maps one-to-one onto a string the mgr smb module
//! understands; serde renames keep the Rust names idiomatic.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Intent indicates how a resource description should be processed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// The resource will be created or updated.
    #[default]
    Present,
    /// The resource will be removed, or ignored if absent.
    Removed,
}

impl Intent {
    /// The wire string for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Present => "present",
            Intent::Removed => "removed",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire name of the cluster resource type.
pub const CLUSTER_TYPE_NAME: &str = "ceph.smb.cluster";
/// Wire name of the share resource type.
pub const SHARE_TYPE_NAME: &str = "ceph.smb.share";
/// Wire name of the join auth resource type.
pub const JOIN_AUTH_TYPE_NAME: &str = "ceph.smb.join.auth";
/// Wire name of the users-and-groups resource type.
pub const USERS_AND_GROUPS_TYPE_NAME: &str = "ceph.smb.usersgroups";
/// Wire name of the TLS credential resource type.
pub const TLS_CREDENTIAL_TYPE_NAME: &str = "ceph.smb.tls.credential";

/// ResourceType identifies the kind of a resource.
///
/// The five kinds managed by this library are covered by dedicated variants;
/// `Other` carries type names this library does not know about so that
/// generic resources can round-trip them.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResourceType {
    /// An SMB cluster.
    Cluster,
    /// An SMB share hosted by a cluster.
    Share,
    /// Parameters used to join a cluster to a domain.
    JoinAuth,
    /// Locally defined user and group records.
    UsersAndGroups,
    /// TLS certificate or key material.
    TlsCredential,
    /// A resource type unknown to this library.
    Other(String),
}

impl ResourceType {
    /// The wire string for this resource type.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Cluster => CLUSTER_TYPE_NAME,
            ResourceType::Share => SHARE_TYPE_NAME,
            ResourceType::JoinAuth => JOIN_AUTH_TYPE_NAME,
            ResourceType::UsersAndGroups => USERS_AND_GROUPS_TYPE_NAME,
            ResourceType::TlsCredential => TLS_CREDENTIAL_TYPE_NAME,
            ResourceType::Other(name) => name,
        }
    }

    /// Map a wire type name to a ResourceType value.
    pub fn from_name(name: &str) -> ResourceType {
        match name {
            CLUSTER_TYPE_NAME => ResourceType::Cluster,
            SHARE_TYPE_NAME => ResourceType::Share,
            JOIN_AUTH_TYPE_NAME => ResourceType::JoinAuth,
            USERS_AND_GROUPS_TYPE_NAME => ResourceType::UsersAndGroups,
            TLS_CREDENTIAL_TYPE_NAME => ResourceType::TlsCredential,
            other => ResourceType::Other(other.to_string()),
        }
    }

    /// Check if this type is one of the kinds this library implements.
    pub fn is_known(&self) -> bool {
        !matches!(self, ResourceType::Other(_))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ResourceType::from_name(&name))
    }
}

/// SourceType indicates how a cluster refers to another resource it needs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Another managed resource is being referenced.
    #[default]
    Resource,
}

/// ClusterAuthMode indicates how a cluster authenticates users.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ClusterAuthMode {
    /// The cluster uses an active directory domain.
    #[serde(rename = "active-directory")]
    ActiveDirectory,
    /// The cluster uses locally defined users and groups.
    #[serde(rename = "user")]
    User,
}

/// Clustering indicates how an abstract cluster should be managed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Clustering {
    /// Enable SMB clustering based on the placement value.
    Default,
    /// Never enable SMB clustering.
    Never,
    /// Always enable SMB clustering.
    Always,
}

/// AccessCategory determines if a share login control applies to a user
/// or a group.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessCategory {
    /// The login control applies to a user.
    User,
    /// The login control applies to a group.
    Group,
}

/// AccessMode determines what kind of access a share login control grants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum AccessMode {
    /// Read-only access.
    #[serde(rename = "read")]
    Read,
    /// Read-write access.
    #[serde(rename = "read-write")]
    ReadWrite,
    /// Administrative access.
    #[serde(rename = "admin")]
    Admin,
    /// Access denied.
    #[serde(rename = "none")]
    None,
}

/// CephFsProvider indicates what method bridges smb services to CephFS.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum CephFsProvider {
    /// The default VFS based provider.
    #[serde(rename = "samba-vfs")]
    SambaVfs,
    /// The new Ceph module VFS based provider.
    #[serde(rename = "samba-vfs/new")]
    SambaVfsNew,
    /// The older Ceph module VFS based provider.
    #[serde(rename = "samba-vfs/classic")]
    SambaVfsClassic,
    /// The new Ceph module VFS based provider with CephFS proxy support.
    #[serde(rename = "samba-vfs/proxied")]
    SambaVfsProxied,
}

/// TlsContent indicates the type of TLS data a credential resource holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum TlsContent {
    /// A TLS certificate.
    #[serde(rename = "cert")]
    Cert,
    /// A TLS key.
    #[serde(rename = "key")]
    Key,
    /// A TLS CA certificate.
    #[serde(rename = "ca-cert")]
    CaCert,
}

/// Service names a particular network service provided by an smb cluster.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
pub enum Service {
    /// The core smb network file system service.
    #[serde(rename = "smb")]
    Smb,
    /// The prometheus style metrics service.
    #[serde(rename = "smbmetrics")]
    SmbMetrics,
    /// The ctdb service used to coordinate clusters.
    #[serde(rename = "ctdb")]
    Ctdb,
    /// A cloud compatible remote control service.
    #[serde(rename = "remote-control")]
    RemoteControl,
}
