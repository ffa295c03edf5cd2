//! Apply path tests: local validation, wire payloads, password filters,
//! and the remove convenience wrappers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use smb_admin::client::{Admin, ApplyOptions, PasswordFilter};
use smb_admin::error::Error;
use smb_admin::resource::{Cluster, JoinAuth, Resource, Share};

use crate::mock_conn::MockCommander;

fn result_for(resource: Value, success: bool, msg: &str) -> Value {
    json!({
        "resource": resource,
        "msg": msg,
        "success": success,
        "state": if success { "created" } else { "" },
    })
}

#[test]
fn test_apply_validates_before_sending() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    // a share without a cephfs source is invalid
    let bad = Resource::from(Share::new("tango", "s1"));
    let err = admin.apply(&[bad], &ApplyOptions::default()).unwrap_err();

    assert!(err.is_local());
    assert!(
        err.to_string()
            .contains("resource #0: ceph.smb.share.tango.s1")
    );
    assert_eq!(conn.call_count(), 0, "no command may be sent");
}

#[test]
fn test_apply_sends_envelope() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    let cluster = Resource::from(Cluster::active_directory("tango", "example.org"));
    let cluster_json = serde_json::to_value(&cluster).unwrap();
    conn.push_body(json!({
        "results": [result_for(cluster_json.clone(), true, "ok")],
        "success": true,
    }));

    let results = admin.apply(&[cluster], &ApplyOptions::default()).unwrap();
    assert!(results.ok());
    assert_eq!(results.results()[0].state(), "created");

    let calls = conn.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command["prefix"], json!("smb apply"));
    assert_eq!(calls[0].command["format"], json!("json"));
    assert!(calls[0].command.get("password_filter").is_none());

    let input = calls[0].input.as_ref().unwrap();
    assert_eq!(input["resources"], json!([cluster_json]));
}

#[test]
fn test_apply_base64_password_filter() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    let auth = JoinAuth::new("ja1").set_auth("Administrator", "Passw0rd");
    let encoded = STANDARD.encode("Passw0rd");
    conn.push_body(json!({
        "results": [result_for(
            json!({
                "resource_type": "ceph.smb.join.auth",
                "intent": "present",
                "auth_id": "ja1",
                "auth": {"username": "Administrator", "password": encoded},
            }),
            true,
            "ok",
        )],
        "success": true,
    }));

    let opts = ApplyOptions {
        password_filter: PasswordFilter::Base64,
        ..Default::default()
    };
    let results = admin.apply(&[Resource::from(auth)], &opts).unwrap();
    assert!(results.ok());

    // the filter parameter travels with the command, the output parameter
    // defaults to the input filter and is not sent
    let calls = conn.calls();
    assert_eq!(calls[0].command["password_filter"], json!("base64"));
    assert!(calls[0].command.get("password_filter_out").is_none());

    // the submitted password is encoded
    let input = calls[0].input.as_ref().unwrap();
    assert_eq!(
        input["resources"][0]["auth"]["password"],
        json!(encoded),
    );

    // the returned password is decoded back to plaintext
    let Resource::JoinAuth(back) = results.results()[0].resource() else {
        panic!("expected a join auth resource");
    };
    assert_eq!(back.auth.as_ref().unwrap().password, "Passw0rd");
}

#[test]
fn test_apply_hidden_filter_rejected_locally() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    let auth = Resource::from(JoinAuth::new("ja1").set_auth("Administrator", "Passw0rd"));
    let opts = ApplyOptions {
        password_filter: PasswordFilter::Hidden,
        ..Default::default()
    };
    let err = admin.apply(&[auth], &opts).unwrap_err();
    assert!(matches!(err, Error::PasswordFilter(_)));
    assert_eq!(conn.call_count(), 0);
}

#[test]
fn test_apply_rejected_command() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());
    conn.push_rejection("module 'smb' is not enabled");

    let cluster = Resource::from(Cluster::to_remove("tango"));
    let err = admin.apply(&[cluster], &ApplyOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Rejected(msg) if msg.contains("not enabled")));
}

#[test]
fn test_apply_returns_unsuccessful_group() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    let share = Resource::from(Share::to_remove("tango", "s1"));
    let share_json = serde_json::to_value(&share).unwrap();
    conn.push_body(json!({
        "results": [result_for(share_json, false, "share in use")],
        "success": false,
    }));

    // per-resource failures are data, not an error
    let results = admin.apply(&[share], &ApplyOptions::default()).unwrap();
    assert!(!results.ok());
    assert_eq!(results.error_results().len(), 1);
    assert_eq!(results.error_results()[0].message(), "share in use");
}

#[test]
fn test_remove_cluster_success() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    let removal = serde_json::to_value(Resource::from(Cluster::to_remove("tango"))).unwrap();
    conn.push_body(json!({
        "results": [result_for(removal.clone(), true, "")],
        "success": true,
    }));

    admin.remove_cluster("tango").unwrap();

    let input = conn.calls()[0].input.clone().unwrap();
    assert_eq!(input["resources"], json!([removal]));
}

#[test]
fn test_remove_share_failure_becomes_error() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());

    let removal = serde_json::to_value(Resource::from(Share::to_remove("tango", "s1"))).unwrap();
    conn.push_body(json!({
        "results": [result_for(removal, false, "share in use")],
        "success": false,
    }));

    let err = admin.remove_share("tango", "s1").unwrap_err();
    let Error::ResourceFailures(group) = err else {
        panic!("expected resource failures, got {err}");
    };
    assert_eq!(
        group.to_string(),
        "1 resource errors: ceph.smb.share.tango.s1: share in use"
    );
}

#[test]
fn test_apply_transport_error() {
    let conn = MockCommander::new();
    let admin = Admin::from_conn(conn.clone());
    conn.fail_transport("connection reset");

    let cluster = Resource::from(Cluster::to_remove("tango"));
    let err = admin.apply(&[cluster], &ApplyOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(!err.is_local());
}
