//! Show path tests: command construction, envelope and single-object
//! payloads, generic mode, and output password filtering.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use smb_admin::client::{Admin, PasswordFilter, ShowOptions};
use smb_admin::error::Error;
use smb_admin::resource::{Resource, ResourceRef, ResourceType};

use crate::mock_conn::MockCommander;

#[test]
fn test_show_single_resource() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    // a single ref yields a bare object, not an envelope
    conn.push_body(json!({
        "resource_type": "ceph.smb.cluster",
        "intent": "present",
        "cluster_id": "tango",
        "auth_mode": "active-directory",
        "domain_settings": {"realm": "EXAMPLE.ORG", "join_sources": []},
    }));

    let refs = [ResourceRef::id(ResourceType::Cluster, "tango")];
    let resources = admin.show(&refs, &ShowOptions::default()).unwrap();
    assert_eq!(resources.len(), 1);
    assert!(matches!(resources[0], Resource::Cluster(_)));
    assert_eq!(resources[0].identity().to_string(), "ceph.smb.cluster.tango");

    let calls = conn.calls();
    assert_eq!(calls[0].command["prefix"], json!("smb show"));
    assert_eq!(calls[0].command["format"], json!("json"));
    assert_eq!(calls[0].command["results"], json!("full"));
    assert_eq!(
        calls[0].command["resource_names"],
        json!(["ceph.smb.cluster.tango"])
    );
    assert!(calls[0].input.is_none());
}

#[test]
fn test_show_everything() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    conn.push_body(json!({"resources": [
        {
            "resource_type": "ceph.smb.cluster",
            "intent": "present",
            "cluster_id": "tango",
            "auth_mode": "user",
            "user_group_settings": [{"source_type": "resource", "ref": "ug1"}],
        },
        {
            "resource_type": "ceph.smb.share",
            "intent": "present",
            "cluster_id": "tango",
            "share_id": "docs",
            "cephfs": {"volume": "cephfs", "path": "/docs"},
        },
        {
            "resource_type": "ceph.smb.snack.machine",
            "intent": "present",
            "machine_id": "m1",
        },
    ]}));

    // empty refs fetch everything under management
    let resources = admin.show(&[], &ShowOptions::default()).unwrap();
    assert_eq!(resources.len(), 3);
    assert!(matches!(resources[0], Resource::Cluster(_)));
    assert!(matches!(resources[1], Resource::Share(_)));
    // unknown kinds come back generic rather than failing the call
    assert!(matches!(resources[2], Resource::Generic(_)));
    assert_eq!(
        resources[2].identity().to_string(),
        "ceph.smb.snack.machine.m1"
    );

    assert_eq!(conn.calls()[0].command["resource_names"], json!([]));
}

#[test]
fn test_show_child_ref() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());
    conn.push_body(json!({
        "resource_type": "ceph.smb.share",
        "intent": "present",
        "cluster_id": "tango",
        "share_id": "docs",
        "cephfs": {"volume": "cephfs", "path": "/docs"},
    }));

    let refs = [ResourceRef::child_id(ResourceType::Share, "tango", "docs")];
    admin.show(&refs, &ShowOptions::default()).unwrap();
    assert_eq!(
        conn.calls()[0].command["resource_names"],
        json!(["ceph.smb.share.tango.docs"])
    );
}

#[test]
fn test_show_generic_mode() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    conn.push_body(json!({"resources": [
        {
            "resource_type": "ceph.smb.cluster",
            "intent": "present",
            "cluster_id": "tango",
            "auth_mode": "user",
            "experimental_knob": 7,
        },
    ]}));

    let opts = ShowOptions {
        generic: true,
        ..Default::default()
    };
    let resources = admin.show(&[], &opts).unwrap();
    let Resource::Generic(generic) = &resources[0] else {
        panic!("expected a generic resource");
    };
    // generic mode keeps fields the typed structs do not model
    assert_eq!(generic.values().get("experimental_knob"), Some(&json!(7)));
    assert_eq!(generic.identity().to_string(), "ceph.smb.cluster.tango");
}

#[test]
fn test_show_with_password_filter() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    conn.push_body(json!({
        "resource_type": "ceph.smb.join.auth",
        "intent": "present",
        "auth_id": "ja1",
        "auth": {"username": "Administrator", "password": STANDARD.encode("Passw0rd")},
    }));

    let opts = ShowOptions {
        password_filter: PasswordFilter::Base64,
        ..Default::default()
    };
    let refs = [ResourceRef::id(ResourceType::JoinAuth, "ja1")];
    let resources = admin.show(&refs, &opts).unwrap();

    assert_eq!(conn.calls()[0].command["password_filter"], json!("base64"));
    let Resource::JoinAuth(auth) = &resources[0] else {
        panic!("expected a join auth resource");
    };
    assert_eq!(auth.auth.as_ref().unwrap().password, "Passw0rd");
}

#[test]
fn test_show_whole_type_ref() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());
    conn.push_body(json!({"resources": []}));

    let refs = [ResourceRef::from(ResourceType::Share)];
    let resources = admin.show(&refs, &ShowOptions::default()).unwrap();
    assert!(resources.is_empty());
    assert_eq!(
        conn.calls()[0].command["resource_names"],
        json!(["ceph.smb.share"])
    );
}

#[test]
fn test_show_transport_error() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());
    conn.fail_transport("connection reset");

    let err = admin.show(&[], &ShowOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
