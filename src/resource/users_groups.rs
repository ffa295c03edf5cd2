//! The UsersAndGroups resource: locally defined SMB user and group records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::resource::cluster::{Cluster, UserGroupSource};
use crate::resource::random_link_name;
use crate::resource::refs::ResourceRef;
use crate::resource::types::{Intent, ResourceType};

/// UserInfo defines a user account managed by an SMB server instance.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct UserInfo {
    /// The user name.
    pub name: String,
    /// The user's password. Only checked for presence; wire representation
    /// is controlled by the per-call password filter.
    pub password: String,
}

impl UserInfo {
    /// A new user record.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        UserInfo {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// GroupInfo defines a group managed by an SMB server instance.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct GroupInfo {
    /// The group name.
    pub name: String,
}

impl GroupInfo {
    /// A new group record.
    pub fn new(name: impl Into<String>) -> Self {
        GroupInfo { name: name.into() }
    }
}

/// UsersAndGroupsValues contains the user and group definitions.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct UsersAndGroupsValues {
    /// User accounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserInfo>,
    /// Groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupInfo>,
}

/// UsersAndGroups is a resource containing user and group definitions for
/// SMB server instances that do not use active directory domains.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct UsersAndGroups {
    /// Whether the resource is to be created/updated or removed.
    #[serde(default)]
    pub intent: Intent,
    /// The unique id of the users and groups resource.
    pub users_groups_id: String,
    /// The user and group definitions. Required for present intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<UsersAndGroupsValues>,
    /// When set, the resource is owned by the named cluster and is removed
    /// together with it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linked_to_cluster: String,
}

impl UsersAndGroups {
    /// A new users and groups resource with default values.
    pub fn new(users_groups_id: impl Into<String>) -> Self {
        UsersAndGroups {
            intent: Intent::Present,
            users_groups_id: users_groups_id.into(),
            values: Some(UsersAndGroupsValues::default()),
            ..Default::default()
        }
    }

    /// A new users and groups resource owned by the given cluster. The
    /// resource gets a generated id, can only be used by the cluster it
    /// links to, and is automatically deleted when that cluster is deleted.
    /// A source reference is registered in the cluster's user group
    /// settings.
    pub fn linked(cluster: &mut Cluster) -> Self {
        let ug = UsersAndGroups {
            linked_to_cluster: cluster.cluster_id.clone(),
            ..UsersAndGroups::new(random_link_name(&cluster.cluster_id))
        };
        cluster
            .user_group_settings
            .push(UserGroupSource::resource(ug.users_groups_id.clone()));
        ug
    }

    /// A new users and groups description that removes the resource from
    /// management.
    pub fn to_remove(users_groups_id: impl Into<String>) -> Self {
        UsersAndGroups {
            intent: Intent::Removed,
            users_groups_id: users_groups_id.into(),
            ..Default::default()
        }
    }

    /// Set the user and group lists.
    pub fn set_values(mut self, users: Vec<UserInfo>, groups: Vec<GroupInfo>) -> Self {
        let values = self.values.get_or_insert_with(UsersAndGroupsValues::default);
        values.users = users;
        values.groups = groups;
        self
    }

    /// The resource type of a users and groups resource.
    pub fn resource_type(&self) -> ResourceType {
        ResourceType::UsersAndGroups
    }

    /// Whether the resource is to be created/updated or removed.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// A reference identifying this users and groups resource.
    pub fn identity(&self) -> ResourceRef {
        ResourceRef::id(ResourceType::UsersAndGroups, self.users_groups_id.clone())
    }

    /// Validate the resource. Removed intent requires only the id; present
    /// intent additionally requires at least one user entry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.users_groups_id.is_empty() {
            return Err(ValidationError::new("missing users_groups_id"));
        }
        if self.intent == Intent::Removed {
            return Ok(());
        }

        let Some(values) = &self.values else {
            return Err(ValidationError::new("missing values parameter"));
        };
        if values.users.is_empty() {
            return Err(ValidationError::new("no users defined"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_users_groups_identity() {
        let ug = UsersAndGroups::new("ug1");
        assert_eq!(ug.identity().to_string(), "ceph.smb.usersgroups.ug1");
    }

    #[test]
    fn test_validation_tiers() {
        assert!(UsersAndGroups::to_remove("ug1").validate().is_ok());

        let ug = UsersAndGroups::new("ug1");
        assert_eq!(ug.validate().unwrap_err().message(), "no users defined");

        let ug = UsersAndGroups::new("ug1")
            .set_values(vec![UserInfo::new("alice", "W0nder14nd")], Vec::new());
        assert!(ug.validate().is_ok());
    }

    #[test]
    fn test_linked_users_groups_registers_source() {
        let mut cluster = Cluster::user("clu1");
        let ug = UsersAndGroups::linked(&mut cluster)
            .set_values(vec![UserInfo::new("alice", "W0nder14nd")], Vec::new());

        assert_eq!(ug.linked_to_cluster, "clu1");
        assert_eq!(cluster.user_group_settings.len(), 1);
        assert_eq!(cluster.user_group_settings[0].reference, ug.users_groups_id);
    }

    #[test]
    fn test_users_groups_round_trip() {
        let ug = UsersAndGroups::new("ug1").set_values(
            vec![
                UserInfo::new("alice", "W0nder14nd"),
                UserInfo::new("billy", "p14n0m4N"),
            ],
            vec![GroupInfo::new("clients")],
        );
        let j = serde_json::to_string(&ug).unwrap();
        let back: UsersAndGroups = serde_json::from_str(&j).unwrap();
        assert_eq!(back, ug);
    }
}
