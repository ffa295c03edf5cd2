//! Client module for SMB administrative operations.
//!
//! This module provides the client for managing SMB configuration through
//! the cluster's administrative command interface. It is generic over the
//! command transport, so any connection type implementing [`Commander`]
//! can back it.
//!
//! - `transport`: the command transport trait and raw output handling
//! - `filter`: password field filtering for command payloads
//! - `admin`: the show/apply client and its options
//!
//! ## Example
//!
//! ```rust,ignore
//! use smb_admin::client::{Admin, ApplyOptions};
//! use smb_admin::resource::{Cluster, JoinAuth, Resource};
//!
//! let admin = Admin::from_conn(conn);
//! let mut cluster = Cluster::active_directory("tango", "example.org");
//! let auth = JoinAuth::linked(&mut cluster).set_auth("Administrator", "Passw0rd");
//! let results = admin.apply(
//!     &[Resource::from(auth), Resource::from(cluster)],
//!     &ApplyOptions::default(),
//! )?;
//! assert!(results.ok());
//! ```

pub mod admin;
pub mod filter;
pub mod transport;

pub use admin::{Admin, ApplyOptions, ShowOptions};
pub use filter::{HIDDEN_PLACEHOLDER, PasswordFilter};
pub use transport::{CommandOutput, Commander};
