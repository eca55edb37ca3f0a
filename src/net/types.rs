//! Wire types exchanged with the backend services.
//!
//! Field names follow the services' JSON. Where a service uses French
//! column names (clusters) the Rust field is renamed and the wire name kept
//! through `#[serde(rename)]`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================
// Users
// =============================================================

/// Account role. Only `ADMIN` grants admin access; anything unrecognised
/// reads as [`Role::Other`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    User,
    #[serde(other)]
    Other,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User | Self::Other => "USER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload: JWT pair plus the user it belongs to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginPayload {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    pub user: User,
}

/// Body for both self-registration and admin creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Admin edit of another account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangePassword {
    pub password: String,
    pub new_password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetCodeRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

// =============================================================
// Virtual machines
// =============================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmStatus {
    Creating,
    Created,
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl VmStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Created => "created",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Error => "error",
            Self::Deleted => "deleted",
            Self::Unknown => "unknown",
        }
    }

    /// Start is offered for machines that exist but are not running.
    pub fn can_start(self) -> bool {
        matches!(self, Self::Created | Self::Stopped | Self::Error)
    }

    pub fn can_stop(self) -> bool {
        matches!(self, Self::Running | Self::Starting)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub status: VmStatus,
    #[serde(default)]
    pub vcpu_count: Option<u32>,
    #[serde(default)]
    pub memory_size_mib: Option<u32>,
    #[serde(default)]
    pub disk_size_gb: Option<u32>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub cpu_usage_percent: Option<f64>,
    #[serde(default)]
    pub memory_usage_mib: Option<u64>,
    #[serde(default)]
    pub system_image_id: Option<i64>,
    #[serde(default)]
    pub vm_offer_id: Option<i64>,
    #[serde(default)]
    pub service_cluster_id: Option<i64>,
}

/// Direct create request sent to the VM host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateVmRequest {
    pub name: String,
    /// The host service takes user ids as strings.
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_cluster_id: Option<i64>,
    pub cpu_count: u32,
    pub memory_size_mib: u32,
    pub disk_size_gb: u32,
    pub os_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    pub root_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_offer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_image_id: Option<i64>,
}

/// Placement request: the cluster service picks a host and forwards the
/// create to it. Ids travel as strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostRequirements {
    pub name: String,
    pub user_id: String,
    pub cpu_count: u32,
    pub memory_size_mib: u32,
    pub disk_size_gb: u32,
    pub os_type: String,
    pub root_password: String,
    pub vm_offer_id: String,
    pub system_image_id: String,
}

/// Body of start / stop / delete / status calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VmAction {
    pub user_id: String,
    pub vm_id: i64,
}

impl VmAction {
    pub fn new(user_id: i64, vm_id: i64) -> Self {
        Self { user_id: user_id.to_string(), vm_id }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VmStatusDetail {
    pub name: String,
    pub status: VmStatus,
    #[serde(default)]
    pub cpu_usage: Option<f64>,
    #[serde(default)]
    pub memory_usage: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub vcpu_count: Option<u32>,
    #[serde(default)]
    pub mem_size_mib: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VmStatusReport {
    pub status: VmStatusDetail,
    #[serde(default)]
    pub machine_config: Option<MachineConfig>,
}

// =============================================================
// VM offers
// =============================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VmOffer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cpu_count: u32,
    pub memory_size_mib: u32,
    pub disk_size_gb: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub price_per_hour: f64,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VmOfferInput {
    pub name: String,
    pub description: String,
    pub cpu_count: u32,
    pub memory_size_mib: u32,
    pub disk_size_gb: u32,
    pub price_per_hour: f64,
}

impl From<&VmOffer> for VmOfferInput {
    fn from(offer: &VmOffer) -> Self {
        Self {
            name: offer.name.clone(),
            description: offer.description.clone(),
            cpu_count: offer.cpu_count,
            memory_size_mib: offer.memory_size_mib,
            disk_size_gb: offer.disk_size_gb,
            price_per_hour: offer.price_per_hour,
        }
    }
}

fn active_by_default() -> bool {
    true
}

/// Decimal columns arrive either as JSON numbers or as strings like `"0.25"`.
fn number_or_string<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

// =============================================================
// Clusters
// =============================================================

/// Editable cluster fields. Capacities are in GB; `available_processor` is a
/// percentage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterInput {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "adresse_mac")]
    pub mac_address: String,
    pub ip: String,
    pub rom: u32,
    pub available_rom: u32,
    pub ram: u32,
    pub available_ram: u32,
    #[serde(rename = "processeur")]
    pub processor: String,
    pub available_processor: f64,
    pub number_of_core: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Cluster {
    pub id: i64,
    #[serde(flatten)]
    pub spec: ClusterInput,
}

/// Liveness answer of the cluster service, normally `{"status": "UP"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub status: String,
}

impl ServiceHealth {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Name and version the cluster service reports about itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub version: String,
}

// =============================================================
// System images
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SystemImage {
    pub id: i64,
    pub name: String,
    pub os_type: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SystemImageUpdate {
    pub name: String,
    pub os_type: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// New image plus the file that goes with it, sent as multipart form data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemImageUpload {
    pub name: String,
    pub os_type: String,
    pub version: String,
    pub description: Option<String>,
    pub file_name: String,
    pub bytes: Vec<u8>,
}
