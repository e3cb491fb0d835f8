// ── Network interface ──

use indexmap::IndexSet;

use super::mac::MacAddress;
use super::network::{Link, Subnet, Vlan};

/// A machine's network interface.
///
/// Owned by exactly one machine and handed out as `Arc<Interface>`; the
/// machine's boot interface is the same allocation as the matching entry in
/// its interface set. Equality is by id.
#[derive(Debug, Clone)]
pub struct Interface {
    pub id: i64,
    pub resource_uri: String,
    pub name: String,
    /// `physical`, `bond`, `vlan`, `bridge`, ...
    pub interface_type: String,
    pub enabled: bool,
    pub tags: IndexSet<String>,
    pub vlan: Option<Vlan>,
    pub links: Vec<Link>,
    pub mac_address: MacAddress,
    pub effective_mtu: u32,
    pub parents: Vec<String>,
    pub children: Vec<String>,
}

impl Interface {
    /// Subnets this interface is linked to, in link order.
    pub fn subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.links.iter().filter_map(|l| l.subnet.as_ref())
    }

    pub fn link(&self, id: i64) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }
}

impl PartialEq for Interface {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Interface {}
