//! smb-admin library crate
//!
//! A client library for managing SMB configuration declaratively: describe
//! clusters, shares, and credentials as resources, then show or apply them
//! through the cluster's administrative command interface.
//!
//! The [`resource`] module holds the resource descriptions and their wire
//! codec, [`client`] the show/apply client generic over a command
//! transport, and [`result`] the per-resource apply outcomes.

pub mod client;
pub mod error;
pub mod resource;
pub mod result;

pub use client::{Admin, ApplyOptions, Commander, PasswordFilter, ShowOptions};
pub use error::{Error, Result, ValidationError};
pub use resource::{Resource, ResourceGroup, ResourceRef, ResourceType};
pub use result::{ResourceResult, ResultGroup};
