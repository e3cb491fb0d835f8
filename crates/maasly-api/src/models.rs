// MAAS 2.x response types
//
// Wire-exact models for the machine endpoints and the entities embedded in
// them. Field names match the API verbatim. Unknown fields are ignored;
// nullable fields are `Option` so `null` never collapses into a default.
//
// These types are only deserialized after the payload passed the schema
// check for its API version, so serde failures here indicate a schema gap.

use serde::{Deserialize, Serialize};

// ── Machine ──────────────────────────────────────────────────────────

/// Machine object from `machines/` and `machines/{system_id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineResponse {
    pub system_id: String,
    pub resource_uri: String,
    pub hostname: String,
    pub fqdn: String,
    pub tag_names: Vec<String>,
    pub ip_addresses: Vec<String>,
    /// MiB.
    pub memory: u64,
    pub cpu_count: u64,
    /// `"on"`, `"off"` or `"unknown"`.
    pub power_state: String,
    pub osystem: String,
    pub distro_series: String,
    /// `<arch>/<subarch>`, e.g. `amd64/generic`.
    pub architecture: String,
    pub status: i64,
    pub status_name: String,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    pub zone: ZoneResponse,
    pub domain: DomainResponse,
    #[serde(default)]
    pub boot_interface: Option<InterfaceResponse>,
    pub interface_set: Vec<InterfaceResponse>,
    pub blockdevice_set: Vec<BlockDeviceResponse>,
    #[serde(default)]
    pub physicalblockdevice_set: Vec<BlockDeviceResponse>,
    /// Total storage in MB, as a float.
    #[serde(default)]
    pub storage: Option<f64>,
}

// ── Zone / Domain ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub name: String,
    pub description: String,
    pub resource_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainResponse {
    pub id: i64,
    pub name: String,
    pub resource_uri: String,
    #[serde(default)]
    pub authoritative: bool,
    #[serde(default)]
    pub resource_record_count: u64,
    #[serde(default)]
    pub ttl: Option<u64>,
}

// ── Networking ───────────────────────────────────────────────────────

/// Network interface from `interface_set` / `boot_interface`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceResponse {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    pub enabled: bool,
    pub tags: Vec<String>,
    #[serde(default)]
    pub vlan: Option<VlanResponse>,
    pub links: Vec<LinkResponse>,
    pub mac_address: String,
    pub effective_mtu: u32,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// Address assignment of an interface on a subnet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    pub id: i64,
    /// `auto`, `dhcp`, `static` or `link_up`.
    pub mode: String,
    #[serde(default)]
    pub subnet: Option<SubnetResponse>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VlanResponse {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    pub fabric: String,
    pub vid: u16,
    pub mtu: u32,
    pub dhcp_on: bool,
    #[serde(default)]
    pub primary_rack: Option<String>,
    #[serde(default)]
    pub secondary_rack: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetResponse {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    pub space: String,
    pub vlan: VlanResponse,
    #[serde(default)]
    pub gateway_ip: Option<String>,
    pub cidr: String,
    pub dns_servers: Vec<String>,
}

// ── Storage ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDeviceResponse {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub id_path: Option<String>,
    pub path: String,
    pub used_for: String,
    pub tags: Vec<String>,
    pub block_size: u64,
    pub used_size: u64,
    pub size: u64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub partitions: Vec<PartitionResponse>,
    #[serde(default)]
    pub filesystem: Option<FilesystemResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionResponse {
    pub id: i64,
    pub resource_uri: String,
    pub path: String,
    #[serde(default)]
    pub uuid: Option<String>,
    pub used_for: String,
    pub size: u64,
    #[serde(default)]
    pub bootable: bool,
    #[serde(default)]
    pub filesystem: Option<FilesystemResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemResponse {
    pub fstype: String,
    #[serde(default)]
    pub mount_point: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub uuid: String,
    #[serde(default)]
    pub mount_options: Option<String>,
}
