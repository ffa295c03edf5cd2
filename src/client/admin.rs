//! The administrative client: show and apply operations.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::filter::PasswordFilter;
use crate::client::transport::{Commander, require_ok};
use crate::error::{Error, Result};
use crate::resource::cluster::Cluster;
use crate::resource::group::{self, Resource, ResourceGroup, validate_resources};
use crate::resource::join_auth::JoinAuth;
use crate::resource::refs::ResourceRef;
use crate::resource::share::Share;
use crate::resource::tls_cred::TlsCredential;
use crate::resource::users_groups::UsersAndGroups;
use crate::result::ResultGroup;

/// Options for a show operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShowOptions {
    /// How password fields are represented in the returned payload.
    pub password_filter: PasswordFilter,
    /// Decode every returned resource as a generic resource instead of
    /// dispatching to the typed structs. Useful for fields this library
    /// does not model yet.
    pub generic: bool,
}

/// Options for an apply operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplyOptions {
    /// How password fields are represented in the submitted payload.
    pub password_filter: PasswordFilter,
    /// How password fields are represented in the returned results. When
    /// unset the input filter applies to the output as well.
    pub password_filter_out: PasswordFilter,
}

impl ApplyOptions {
    /// The filter governing the returned results. Mirrors the service side
    /// defaulting so that decode matches what is actually sent back.
    pub(crate) fn effective_output_filter(&self) -> PasswordFilter {
        if self.password_filter_out == PasswordFilter::Unset {
            self.password_filter
        } else {
            self.password_filter_out
        }
    }
}

/// Admin is the client for SMB administrative operations, generic over the
/// command transport.
pub struct Admin<C: Commander> {
    conn: C,
}

impl<C: Commander> Admin<C> {
    /// An admin client using the given transport.
    pub fn from_conn(conn: C) -> Self {
        Admin { conn }
    }

    /// Fetch the current definition of the named resources. An empty refs
    /// slice fetches everything under management. A ref may name a whole
    /// type, one resource, or one child resource.
    pub fn show(&self, refs: &[ResourceRef], opts: &ShowOptions) -> Result<Vec<Resource>> {
        let names: Vec<String> = refs.iter().map(ToString::to_string).collect();
        debug!(resource_names = ?names, generic = opts.generic, "showing smb resources");

        let mut command = json!({
            "prefix": "smb show",
            "format": "json",
            "resource_names": names,
            "results": "full",
        });
        if let Some(name) = opts.password_filter.wire_name() {
            command["password_filter"] = json!(name);
        }

        let body = require_ok(self.conn.mgr_command(&command, None)?)?;
        let mut value: Value = serde_json::from_slice(&body)?;
        opts.password_filter.filter_output(&mut value)?;
        if opts.generic {
            group::generic_resources_from_value(value)
        } else {
            Ok(ResourceGroup::from_value(value)?.resources)
        }
    }

    /// Submit a batch of resource descriptions to be reconciled, atomically
    /// on the service side: either the whole batch is accepted or none of
    /// it is. Every resource is validated locally first; an invalid
    /// resource fails the call before anything is sent.
    ///
    /// A returned group may still report per-resource failures; check
    /// [`ResultGroup::ok`].
    pub fn apply(&self, resources: &[Resource], opts: &ApplyOptions) -> Result<ResultGroup> {
        validate_resources(resources)?;
        debug!(count = resources.len(), "applying smb resources");

        let mut payload = serde_json::to_value(ResourceGroup::new(resources.to_vec()))?;
        opts.password_filter.filter_input(&mut payload)?;
        let input = serde_json::to_vec(&payload)?;

        let mut command = json!({
            "prefix": "smb apply",
            "format": "json",
        });
        if let Some(name) = opts.password_filter.wire_name() {
            command["password_filter"] = json!(name);
        }
        if let Some(name) = opts.password_filter_out.wire_name() {
            command["password_filter_out"] = json!(name);
        }

        let body = require_ok(self.conn.mgr_command(&command, Some(&input))?)?;
        let mut value: Value = serde_json::from_slice(&body)?;
        opts.effective_output_filter().filter_output(&mut value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Remove the named cluster. Fails if resources the cluster depends on,
    /// shares for example, still exist.
    pub fn remove_cluster(&self, cluster_id: &str) -> Result<()> {
        self.remove_one(Resource::from(Cluster::to_remove(cluster_id)))
    }

    /// Remove the named share.
    pub fn remove_share(&self, cluster_id: &str, share_id: &str) -> Result<()> {
        self.remove_one(Resource::from(Share::to_remove(cluster_id, share_id)))
    }

    /// Remove the named join auth resource.
    pub fn remove_join_auth(&self, auth_id: &str) -> Result<()> {
        self.remove_one(Resource::from(JoinAuth::to_remove(auth_id)))
    }

    /// Remove the named users and groups resource.
    pub fn remove_users_and_groups(&self, users_groups_id: &str) -> Result<()> {
        self.remove_one(Resource::from(UsersAndGroups::to_remove(users_groups_id)))
    }

    /// Remove the named TLS credential.
    pub fn remove_tls_credential(&self, tls_credential_id: &str) -> Result<()> {
        self.remove_one(Resource::from(TlsCredential::to_remove(tls_credential_id)))
    }

    fn remove_one(&self, resource: Resource) -> Result<()> {
        let results = self.apply(&[resource], &ApplyOptions::default())?;
        if results.ok() {
            Ok(())
        } else {
            Err(Error::ResourceFailures(results))
        }
    }
}
