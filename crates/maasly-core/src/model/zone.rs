// ── Zones and DNS domains ──
//
// Reference data embedded in machines. Equality follows the natural key
// (zone name, domain id) so two decoded copies compare equal.

use std::hash::{Hash, Hasher};

/// Physical availability zone.
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    pub description: String,
    pub resource_uri: String,
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Zone {}

impl Hash for Zone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// DNS domain a machine's FQDN lives in.
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: i64,
    pub name: String,
    pub resource_uri: String,
    pub authoritative: bool,
    pub resource_record_count: u64,
    /// `None` means the server default TTL applies.
    pub ttl: Option<u64>,
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Domain {}

impl Hash for Domain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
