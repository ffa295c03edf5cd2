//! Declarative descriptions of SMB configuration resources.
//!
//! Each resource kind is a plain serde struct with constructors for the
//! common shapes, a two-tier `validate` (removals need only identity,
//! present resources need a full description), and an `identity` reference
//! used to name it in commands and error messages. The [`group`] module
//! holds the polymorphic [`Resource`] value and the wire envelope codec.

use rand::Rng;

pub mod cluster;
pub mod generic;
pub mod group;
pub mod join_auth;
pub mod refs;
pub mod registry;
pub mod share;
pub mod tls_cred;
pub mod types;
pub mod users_groups;

pub use cluster::{
    BindAddress, Cluster, DomainSettings, JoinAuthSource, Placement, PublicAddress, RemoteControl,
    TlsCredentialSource, UserGroupSource, simple_placement,
};
pub use generic::{GenericResource, IdentityKind, guess_identity_kind};
pub use group::{Resource, ResourceGroup, validate_resources};
pub use join_auth::{JoinAuth, JoinAuthValues};
pub use refs::ResourceRef;
pub use registry::{Registry, registry};
pub use share::{CephFsSource, Share, ShareAccess};
pub use tls_cred::TlsCredential;
pub use types::{
    AccessCategory, AccessMode, CephFsProvider, ClusterAuthMode, Clustering, Intent, ResourceType,
    Service, SourceType, TlsContent,
};
pub use users_groups::{GroupInfo, UserInfo, UsersAndGroups, UsersAndGroupsValues};

/// Generate a name for a cluster-linked resource: the owning cluster's id,
/// truncated, plus a random suffix. Consonants only, to avoid accidentally
/// spelling anything.
pub(crate) fn random_link_name(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"bcdfghjklmnpqrstvwxyz";
    const SUFFIX_LEN: usize = 8;
    const MAX_PREFIX: usize = 10;

    let mut rng = rand::rng();
    let mut name: String = prefix.chars().take(MAX_PREFIX).collect();
    name.reserve(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        name.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_link_name_shape() {
        let name = random_link_name("mycluster");
        assert_eq!(name.len(), "mycluster".len() + 8);
        assert!(name.starts_with("mycluster"));

        let name = random_link_name("averylongclusterid");
        assert_eq!(name.len(), 10 + 8);
        assert!(name.starts_with("averylongc"));
    }

    #[test]
    fn test_random_link_names_differ() {
        assert_ne!(random_link_name("c"), random_link_name("c"));
    }
}
