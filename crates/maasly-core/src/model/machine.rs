// ── Machine ──
//
// Identity (system id, resource URI) and the owned interface/storage graph
// are fixed at construction. Everything the server may change after an
// action lives in `MachineState` behind a per-machine lock, so callers that
// already hold the machine observe merges without re-fetching.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use maasly_api::Error;

use super::interface::Interface;
use super::storage::BlockDevice;
use super::zone::{Domain, Zone};

/// Reported power state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PowerState {
    On,
    Off,
    Unknown,
    Error,
    /// Anything a newer server reports that this client has no name for.
    Other(String),
}

impl PowerState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => "unknown",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for PowerState {
    fn from(raw: &str) -> Self {
        match raw {
            "on" => Self::On,
            "off" => Self::Off,
            "unknown" => Self::Unknown,
            "error" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-mutable machine fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    pub hostname: String,
    pub fqdn: String,
    pub tags: IndexSet<String>,
    /// As reported, in server order.
    pub ip_addresses: Vec<String>,
    /// MiB.
    pub memory: u64,
    pub cpu_count: u64,
    pub power_state: PowerState,
    pub operating_system: String,
    pub distro_series: String,
    /// `<arch>/<subarch>`.
    pub architecture: String,
    pub status: i64,
    pub status_name: String,
    pub status_message: Option<String>,
    pub owner: Option<String>,
    pub zone: Zone,
    pub domain: Domain,
    /// MB.
    pub storage: Option<f64>,
}

/// A managed physical or virtual host.
#[derive(Debug)]
pub struct Machine {
    system_id: String,
    resource_uri: String,
    interfaces: IndexMap<i64, Arc<Interface>>,
    boot_interface: Option<Arc<Interface>>,
    block_devices: Vec<BlockDevice>,
    physical_block_devices: Vec<BlockDevice>,
    state: RwLock<MachineState>,
}

impl Machine {
    /// Assemble a machine. `boot_interface`, when set, must be an entry of
    /// `interfaces`; the graph builder guarantees this.
    pub(crate) fn new(
        system_id: String,
        resource_uri: String,
        interfaces: IndexMap<i64, Arc<Interface>>,
        boot_interface: Option<Arc<Interface>>,
        block_devices: Vec<BlockDevice>,
        physical_block_devices: Vec<BlockDevice>,
        state: MachineState,
    ) -> Self {
        Self {
            system_id,
            resource_uri,
            interfaces,
            boot_interface,
            block_devices,
            physical_block_devices,
            state: RwLock::new(state),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MachineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MachineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    /// Path used to address this machine in later calls.
    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }

    // ── Interfaces ───────────────────────────────────────────────────

    pub fn boot_interface(&self) -> Option<&Arc<Interface>> {
        self.boot_interface.as_ref()
    }

    pub fn interface_set(&self) -> impl ExactSizeIterator<Item = &Arc<Interface>> {
        self.interfaces.values()
    }

    /// Interface with the given id, or `None`.
    pub fn interface(&self, id: i64) -> Option<&Arc<Interface>> {
        self.interfaces.get(&id)
    }

    // ── Storage ──────────────────────────────────────────────────────

    pub fn block_devices(&self) -> &[BlockDevice] {
        &self.block_devices
    }

    pub fn physical_block_devices(&self) -> &[BlockDevice] {
        &self.physical_block_devices
    }

    pub fn block_device(&self, id: i64) -> Option<&BlockDevice> {
        self.block_devices.iter().find(|d| d.id == id)
    }

    // ── Mutable state ────────────────────────────────────────────────

    /// Consistent copy of every server-mutable field.
    pub fn state(&self) -> MachineState {
        self.read().clone()
    }

    pub fn hostname(&self) -> String {
        self.read().hostname.clone()
    }

    pub fn fqdn(&self) -> String {
        self.read().fqdn.clone()
    }

    pub fn tags(&self) -> Vec<String> {
        self.read().tags.iter().cloned().collect()
    }

    pub fn ip_addresses(&self) -> Vec<String> {
        self.read().ip_addresses.clone()
    }

    pub fn memory(&self) -> u64 {
        self.read().memory
    }

    pub fn cpu_count(&self) -> u64 {
        self.read().cpu_count
    }

    pub fn power_state(&self) -> PowerState {
        self.read().power_state.clone()
    }

    pub fn operating_system(&self) -> String {
        self.read().operating_system.clone()
    }

    pub fn distro_series(&self) -> String {
        self.read().distro_series.clone()
    }

    pub fn architecture(&self) -> String {
        self.read().architecture.clone()
    }

    pub fn status(&self) -> i64 {
        self.read().status
    }

    pub fn status_name(&self) -> String {
        self.read().status_name.clone()
    }

    pub fn status_message(&self) -> Option<String> {
        self.read().status_message.clone()
    }

    pub fn owner(&self) -> Option<String> {
        self.read().owner.clone()
    }

    pub fn zone(&self) -> Zone {
        self.read().zone.clone()
    }

    pub fn domain(&self) -> Domain {
        self.read().domain.clone()
    }

    pub fn storage(&self) -> Option<f64> {
        self.read().storage
    }

    /// Apply a freshly decoded representation of this machine in place.
    ///
    /// Only `MachineState` is replaced, under a single write lock. Fails
    /// without touching anything if `update` is a different machine.
    pub(crate) fn merge_from(&self, update: Machine) -> Result<(), Error> {
        if update.system_id != self.system_id {
            return Err(Error::deserialization(format!(
                "machine update for {} returned system_id {}",
                self.system_id, update.system_id
            )));
        }

        let next = update
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        let mut state = self.write();
        debug!(
            system_id = %self.system_id,
            from = %state.status_name,
            to = %next.status_name,
            "merging machine state"
        );
        *state = next;
        Ok(())
    }
}
