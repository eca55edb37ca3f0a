use super::*;
use serde_json::json;

// =============================================================
// Role
// =============================================================

#[test]
fn role_admin_only_from_exact_uppercase() {
    assert_eq!(serde_json::from_value::<Role>(json!("ADMIN")).unwrap(), Role::Admin);
    assert_eq!(serde_json::from_value::<Role>(json!("USER")).unwrap(), Role::User);
    assert_eq!(serde_json::from_value::<Role>(json!("admin")).unwrap(), Role::Other);
    assert_eq!(serde_json::from_value::<Role>(json!("SUPERUSER")).unwrap(), Role::Other);
    assert!(!Role::Other.is_admin());
}

#[test]
fn user_without_role_defaults_to_user() {
    let user: User = serde_json::from_value(json!({ "id": 1, "username": "ada", "email": "ada@example.com" })).unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(user.status, None);
}

#[test]
fn login_payload_reads_access_and_user() {
    let payload: LoginPayload = serde_json::from_value(json!({
        "refresh": "r",
        "access": "a",
        "email": "ada@example.com",
        "user_id": 1,
        "username": "ada",
        "role": "ADMIN",
        "user": { "id": 1, "username": "ada", "email": "ada@example.com", "first_name": "", "last_name": "", "role": "ADMIN" }
    }))
    .unwrap();
    assert_eq!(payload.access, "a");
    assert_eq!(payload.refresh.as_deref(), Some("r"));
    assert!(payload.user.role.is_admin());
}

#[test]
fn user_update_skips_unset_fields() {
    let update = UserUpdate { role: Some(Role::Admin), ..UserUpdate::default() };
    assert_eq!(serde_json::to_value(update).unwrap(), json!({ "role": "ADMIN" }));
}

// =============================================================
// Virtual machines
// =============================================================

#[test]
fn vm_status_unknown_values_do_not_fail() {
    assert_eq!(serde_json::from_value::<VmStatus>(json!("paused")).unwrap(), VmStatus::Unknown);
    assert_eq!(serde_json::from_value::<VmStatus>(json!("running")).unwrap(), VmStatus::Running);
}

#[test]
fn vm_status_actions() {
    assert!(VmStatus::Stopped.can_start());
    assert!(!VmStatus::Running.can_start());
    assert!(VmStatus::Running.can_stop());
    assert!(!VmStatus::Deleted.can_stop());
}

#[test]
fn virtual_machine_tolerates_sparse_rows() {
    let vm: VirtualMachine = serde_json::from_value(json!({
        "id": 9,
        "user_id": 7,
        "name": "web",
        "status": "created",
        "vcpu_count": null,
        "kernel_image_path": "/vmlinux"
    }))
    .unwrap();
    assert_eq!(vm.status, VmStatus::Created);
    assert_eq!(vm.vcpu_count, None);
}

#[test]
fn vm_action_sends_user_id_as_string() {
    assert_eq!(serde_json::to_value(VmAction::new(7, 9)).unwrap(), json!({ "user_id": "7", "vm_id": 9 }));
}

#[test]
fn create_vm_omits_absent_optionals() {
    let req = CreateVmRequest {
        name: "web".into(),
        user_id: "7".into(),
        service_cluster_id: None,
        cpu_count: 1,
        memory_size_mib: 512,
        disk_size_gb: 5,
        os_type: "ubuntu-22.04".into(),
        ssh_public_key: None,
        root_password: "pw".into(),
        vm_offer_id: Some(2),
        system_image_id: None,
    };
    let value = serde_json::to_value(req).unwrap();
    assert!(value.get("ssh_public_key").is_none());
    assert_eq!(value["vm_offer_id"], 2);
}

#[test]
fn status_report_with_and_without_machine_config() {
    let bare: VmStatusReport =
        serde_json::from_value(json!({ "status": { "name": "web", "status": "stopped" } })).unwrap();
    assert_eq!(bare.machine_config, None);

    let full: VmStatusReport = serde_json::from_value(json!({
        "status": { "name": "web", "status": "running", "cpu_usage": null },
        "machine_config": { "vcpu_count": 2, "mem_size_mib": 1024, "smt": false }
    }))
    .unwrap();
    assert_eq!(full.status.status, VmStatus::Running);
    assert_eq!(full.machine_config.unwrap().vcpu_count, Some(2));
}

// =============================================================
// Offers, clusters, images
// =============================================================

#[test]
fn offer_price_accepts_decimal_strings() {
    let offer: VmOffer = serde_json::from_value(json!({
        "id": 1, "name": "small", "description": "", "cpu_count": 1,
        "memory_size_mib": 512, "disk_size_gb": 10, "price_per_hour": "0.25"
    }))
    .unwrap();
    assert!((offer.price_per_hour - 0.25).abs() < f64::EPSILON);
    assert!(offer.is_active);
}

#[test]
fn offer_price_rejects_garbage() {
    let err = serde_json::from_value::<VmOffer>(json!({
        "id": 1, "name": "small", "cpu_count": 1,
        "memory_size_mib": 512, "disk_size_gb": 10, "price_per_hour": "cheap"
    }));
    assert!(err.is_err());
}

#[test]
fn cluster_uses_wire_names() {
    let cluster: Cluster = serde_json::from_value(json!({
        "id": 3, "nom": "node-a", "adresse_mac": "aa:bb:cc:dd:ee:ff", "ip": "10.0.0.3",
        "rom": 500, "available_rom": 200, "ram": 64, "available_ram": 16,
        "processeur": "EPYC", "available_processor": 37.5, "number_of_core": 32
    }))
    .unwrap();
    assert_eq!(cluster.spec.name, "node-a");
    assert_eq!(cluster.spec.processor, "EPYC");

    let out = serde_json::to_value(&cluster.spec).unwrap();
    assert_eq!(out["nom"], "node-a");
    assert_eq!(out["adresse_mac"], "aa:bb:cc:dd:ee:ff");
    assert!(out.get("name").is_none());
}

#[test]
fn system_image_optional_fields() {
    let image: SystemImage = serde_json::from_value(json!({
        "id": 4, "name": "Ubuntu", "os_type": "ubuntu-22.04", "version": "22.04"
    }))
    .unwrap();
    assert_eq!(image.description, None);
    assert_eq!(image.image_path, None);
}
