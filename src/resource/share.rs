//! The SMB Share resource.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::resource::refs::ResourceRef;
use crate::resource::types::{AccessCategory, AccessMode, CephFsProvider, Intent, ResourceType};

/// CephFsSource connects an SMB Share to a path or subvolume in CephFS.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct CephFsSource {
    /// The CephFS volume name.
    pub volume: String,
    /// Optional subvolume group.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subvolumegroup: String,
    /// Optional subvolume.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subvolume: String,
    /// Path within the volume or subvolume.
    #[serde(default)]
    pub path: String,
    /// What method bridges smb services to CephFS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<CephFsProvider>,
}

/// ShareAccess controls the ability to log in to a share with a particular
/// access level.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ShareAccess {
    /// The user or group name.
    pub name: String,
    /// Whether the entry applies to a user or a group.
    pub category: AccessCategory,
    /// The access level granted.
    pub access: AccessMode,
}

impl ShareAccess {
    /// Validate the share access entry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("missing name"));
        }
        Ok(())
    }
}

/// Share is a resource representing an SMB share configured on the SMB
/// servers hosted in the ceph cluster.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Share {
    /// Whether the share is to be created/updated or removed.
    #[serde(default)]
    pub intent: Intent,
    /// The id of the cluster hosting the share.
    pub cluster_id: String,
    /// The unique id of the share within its cluster.
    pub share_id: String,
    /// Display name of the share. Defaults to the share id when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Whether the share is read-only.
    #[serde(default)]
    pub readonly: bool,
    /// Whether the share is browseable.
    #[serde(default = "default_browseable")]
    pub browseable: bool,
    /// CephFS storage backing the share. Required for present intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cephfs: Option<CephFsSource>,
    /// Whether logins are restricted to the login_control entries.
    #[serde(default)]
    pub restrict_access: bool,
    /// Per-user and per-group access controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub login_control: Vec<ShareAccess>,
}

fn default_browseable() -> bool {
    true
}

impl Share {
    /// A new share with default values.
    pub fn new(cluster_id: impl Into<String>, share_id: impl Into<String>) -> Self {
        Share {
            intent: Intent::Present,
            cluster_id: cluster_id.into(),
            share_id: share_id.into(),
            browseable: true,
            ..Default::default()
        }
    }

    /// A new share description that removes the share from management.
    pub fn to_remove(cluster_id: impl Into<String>, share_id: impl Into<String>) -> Self {
        Share {
            intent: Intent::Removed,
            cluster_id: cluster_id.into(),
            share_id: share_id.into(),
            ..Default::default()
        }
    }

    /// Set the share's CephFS storage parameters.
    pub fn set_cephfs(
        mut self,
        volume: impl Into<String>,
        subvolumegroup: impl Into<String>,
        subvolume: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let cephfs = self.cephfs.get_or_insert_with(CephFsSource::default);
        cephfs.volume = volume.into();
        cephfs.subvolumegroup = subvolumegroup.into();
        cephfs.subvolume = subvolume.into();
        cephfs.path = path.into();
        self
    }

    /// The resource type of a share.
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::Share
    }

    /// Whether the share is to be created/updated or removed.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// A reference identifying this share resource.
    pub fn identity(&self) -> ResourceRef {
        ResourceRef::child_id(
            ResourceType::Share,
            self.cluster_id.clone(),
            self.share_id.clone(),
        )
    }

    /// Validate the resource. Removed intent requires only identity fields;
    /// present intent additionally requires a CephFS source with a volume
    /// and well-formed login control entries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cluster_id.is_empty() {
            return Err(ValidationError::new("missing cluster_id"));
        }
        if self.share_id.is_empty() {
            return Err(ValidationError::new("missing share_id"));
        }
        if self.intent == Intent::Removed {
            return Ok(());
        }

        let Some(cephfs) = &self.cephfs else {
            return Err(ValidationError::new("missing cephfs configuration"));
        };
        if cephfs.volume.is_empty() {
            return Err(ValidationError::new("missing cephfs volume"));
        }
        for sa in &self.login_control {
            sa.validate().map_err(|err| {
                ValidationError::new(format!("invalid login_control entry: {err}"))
            })?;
        }
        Ok(())
    }
}
