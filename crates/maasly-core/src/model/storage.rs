// ── Storage hierarchy ──
//
// Block devices own their partitions; a partition owns its filesystem.

use indexmap::IndexSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filesystem {
    pub fstype: String,
    pub mount_point: Option<String>,
    pub label: Option<String>,
    pub uuid: String,
    pub mount_options: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Partition {
    pub id: i64,
    pub resource_uri: String,
    pub path: String,
    pub uuid: Option<String>,
    pub used_for: String,
    /// Bytes.
    pub size: u64,
    pub bootable: bool,
    pub filesystem: Option<Filesystem>,
}

impl Partition {
    /// Mount point of the partition's filesystem, if formatted and mounted.
    pub fn mount_point(&self) -> Option<&str> {
        self.filesystem.as_ref()?.mount_point.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct BlockDevice {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    pub model: Option<String>,
    pub id_path: Option<String>,
    pub path: String,
    pub used_for: String,
    pub tags: IndexSet<String>,
    pub block_size: u64,
    pub used_size: u64,
    pub size: u64,
    pub uuid: Option<String>,
    pub partitions: Vec<Partition>,
    /// Set when the whole device is formatted without a partition table.
    pub filesystem: Option<Filesystem>,
}

impl BlockDevice {
    pub fn partition(&self, id: i64) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.id == id)
    }
}
