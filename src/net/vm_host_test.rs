use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::test_support::{BASE, json_body, signed_in_client};
use crate::net::transport::Method;
use crate::net::types::VmStatus;

fn vm_json(id: i64, status: &str) -> Value {
    json!({ "id": id, "user_id": 7, "name": format!("vm-{id}"), "status": status, "vcpu_count": 1 })
}

// =============================================================
// Listing
// =============================================================

#[test]
fn list_reads_two_data_layers() {
    let (client, transport) = signed_in_client();
    transport.reply(
        200,
        json!({ "data": { "statusCode": 200, "message": "User VMs found", "data": { "vms": [vm_json(1, "running"), vm_json(2, "stopped")] } } }),
    );
    let vms = block_on(list_vms(&client, 7)).unwrap();
    assert_eq!(vms.len(), 2);
    assert_eq!(vms[1].status, VmStatus::Stopped);
    assert_eq!(transport.last().url, format!("{BASE}/SERVICE-VM-HOST/api/service-vm-host/user/7"));
}

#[test]
fn list_inner_not_found_is_empty() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "statusCode": 404, "message": "User VMs not found", "data": {} } }));
    assert!(block_on(list_vms(&client, 7)).unwrap().is_empty());
}

#[test]
fn list_missing_vms_key_is_malformed() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "statusCode": 200, "data": {} } }));
    let err = block_on(list_vms(&client, 7)).unwrap_err();
    assert_eq!(err, ApiError::MalformedEnvelope("missing `data.vms`".into()));
}

#[test]
fn list_unauthorized_passes_through() {
    let (client, transport) = signed_in_client();
    transport.reply(401, json!({}));
    assert_eq!(block_on(list_vms(&client, 7)).unwrap_err(), ApiError::Unauthorized);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn lifecycle_actions_post_to_their_paths() {
    let (client, transport) = signed_in_client();
    let action = VmAction::new(7, 3);
    block_on(start_vm(&client, &action)).unwrap();
    block_on(stop_vm(&client, &action)).unwrap();
    block_on(delete_vm(&client, &action)).unwrap();

    let seen = transport.requests();
    let paths: Vec<_> = seen.iter().map(|r| r.url.rsplit("service-vm-host").next().unwrap_or_default().to_owned()).collect();
    assert_eq!(paths, ["/vm/start", "/vm/stop", "/vm/delete"]);
    assert!(seen.iter().all(|r| r.method == Method::Post));
    assert_eq!(json_body(&seen[0]), json!({ "user_id": "7", "vm_id": 3 }));
}

#[test]
fn create_returns_raw_body() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "statusCode": 200, "message": "VM created" }));
    let req = CreateVmRequest {
        name: "web".into(),
        user_id: "7".into(),
        service_cluster_id: Some(1),
        cpu_count: 2,
        memory_size_mib: 1024,
        disk_size_gb: 10,
        os_type: "ubuntu-22.04".into(),
        ssh_public_key: None,
        root_password: "secret".into(),
        vm_offer_id: None,
        system_image_id: Some(4),
    };
    let body = block_on(create_vm(&client, &req)).unwrap();
    assert_eq!(body["message"], "VM created");
}

// =============================================================
// Status and metrics
// =============================================================

#[test]
fn status_unwraps_report() {
    let (client, transport) = signed_in_client();
    transport.reply(
        200,
        json!({ "data": { "statusCode": 200, "data": { "status": { "name": "vm-3", "status": "running" }, "machine_config": { "vcpu_count": 2 } } } }),
    );
    let report = block_on(vm_status(&client, &VmAction::new(7, 3))).unwrap();
    assert_eq!(report.status.status, VmStatus::Running);
}

#[test]
fn status_inner_failure_becomes_unexpected_status() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "statusCode": 404, "message": "VM not found", "data": {} } }));
    let err = block_on(vm_status(&client, &VmAction::new(7, 3))).unwrap_err();
    assert_eq!(err, ApiError::UnexpectedStatus { status: 404, message: Some("VM not found".into()) });
}

#[test]
fn metrics_path_uses_name() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "cpu": 12.5 }));
    let metrics = block_on(vm_metrics(&client, 7, "web")).unwrap();
    assert_eq!(metrics["cpu"], 12.5);
    assert!(transport.last().url.ends_with("/vm/7/web/metrics"));
}

#[test]
fn metrics_escapes_machine_name() {
    let (client, transport) = signed_in_client();
    block_on(vm_metrics(&client, 7, "db/primary #2")).unwrap();
    assert!(transport.last().url.ends_with("/vm/7/db%2Fprimary%20%232/metrics"));
}
