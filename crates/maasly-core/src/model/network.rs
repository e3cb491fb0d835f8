// ── Network reference data ──
//
// VLANs and subnets are shared: the same VLAN shows up under every interface
// and subnet attached to it. Each parent holds its own copy; copies compare
// and hash by id.

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct Vlan {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    pub fabric: String,
    /// 802.1Q tag, 0 for untagged.
    pub vid: u16,
    pub mtu: u32,
    pub dhcp_on: bool,
    pub primary_rack: Option<String>,
    pub secondary_rack: Option<String>,
}

impl PartialEq for Vlan {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vlan {}

impl Hash for Vlan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct Subnet {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    pub space: String,
    pub vlan: Vlan,
    pub gateway: Option<String>,
    pub cidr: String,
    pub dns_servers: Vec<String>,
}

impl PartialEq for Subnet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subnet {}

impl Hash for Subnet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// How an interface obtains its address on a subnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMode {
    Auto,
    Dhcp,
    Static,
    LinkUp,
    Other(String),
}

impl LinkMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Dhcp => "dhcp",
            Self::Static => "static",
            Self::LinkUp => "link_up",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for LinkMode {
    fn from(raw: &str) -> Self {
        match raw {
            "auto" => Self::Auto,
            "dhcp" => Self::Dhcp,
            "static" => Self::Static,
            "link_up" => Self::LinkUp,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// An interface's attachment to a subnet.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub mode: LinkMode,
    pub subnet: Option<Subnet>,
    /// Assigned address, absent until one is allocated.
    pub ip_address: Option<String>,
}
