// ── Entity graph builder ──
//
// Version-dispatched readers for every entity kind. A read resolves the
// decoder for the requested version, checks the outer shape, checks every
// element against the version's schema, and only then materializes
// entities. Nothing is returned unless the whole payload decodes.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use maasly_api::Error;
use maasly_api::models::{
    BlockDeviceResponse, DomainResponse, InterfaceResponse, MachineResponse, SubnetResponse,
    VlanResponse, ZoneResponse,
};

use crate::model::{
    BlockDevice, Domain, Interface, Machine, MachineState, PowerState, Subnet, Vlan, Zone,
};
use crate::schema::{Checker, integral_value, v2_0};
use crate::version::{Version, VersionTable};

/// First API version each 2.0 decoder applies to.
pub const TWO_DOT_OH: Version = Version::new(2, 0, 0);

// ── Read functions ──────────────────────────────────────────────────

/// Schema and decoder for one entity kind at one API version.
pub struct ReadFunc<T> {
    pub label: &'static str,
    pub schema: fn() -> Checker,
    pub build: fn(&Value) -> Result<T, Error>,
}

impl<T> ReadFunc<T> {
    fn check(&self, kind: &str, schema: &Checker, value: &Value) -> Result<(), Error> {
        schema.check(value).map_err(|e| {
            Error::deserialization(format!("{kind} {} schema check failed: {e}", self.label))
        })
    }

    fn materialize(&self, kind: &str, value: &Value) -> Result<T, Error> {
        (self.build)(value).map_err(|e| e.with_context(format_args!("{kind} {}", self.label)))
    }
}

pub fn machine_table() -> VersionTable<ReadFunc<Machine>> {
    VersionTable::new("machine").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::machine,
            build: |v| build_machine(decode(v)?),
        },
    )
}

pub fn interface_table() -> VersionTable<ReadFunc<Interface>> {
    VersionTable::new("interface").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::interface,
            build: |v| decode::<InterfaceResponse>(v).map(Interface::from),
        },
    )
}

pub fn zone_table() -> VersionTable<ReadFunc<Zone>> {
    VersionTable::new("zone").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::zone,
            build: |v| decode::<ZoneResponse>(v).map(Zone::from),
        },
    )
}

pub fn domain_table() -> VersionTable<ReadFunc<Domain>> {
    VersionTable::new("domain").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::domain,
            build: |v| decode::<DomainResponse>(v).map(Domain::from),
        },
    )
}

pub fn vlan_table() -> VersionTable<ReadFunc<Vlan>> {
    VersionTable::new("vlan").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::vlan,
            build: |v| decode::<VlanResponse>(v).map(Vlan::from),
        },
    )
}

pub fn subnet_table() -> VersionTable<ReadFunc<Subnet>> {
    VersionTable::new("subnet").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::subnet,
            build: |v| decode::<SubnetResponse>(v).map(Subnet::from),
        },
    )
}

pub fn block_device_table() -> VersionTable<ReadFunc<BlockDevice>> {
    VersionTable::new("blockdevice").with(
        TWO_DOT_OH,
        ReadFunc {
            label: v2_0::LABEL,
            schema: v2_0::block_device,
            build: |v| decode::<BlockDeviceResponse>(v).map(BlockDevice::from),
        },
    )
}

fn decode<W: DeserializeOwned>(value: &Value) -> Result<W, Error> {
    serde_json::from_value(whole_floats_as_ints(value))
        .map_err(|e| Error::deserialization(format!("decode failed: {e}")))
}

/// Rewrite floats like `1024.0` as integers so they decode into integer
/// fields. Float fields accept integers, so this is safe tree-wide.
fn whole_floats_as_ints(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .and_then(integral_value)
            .map_or_else(|| value.clone(), Value::from),
        Value::Array(items) => items.iter().map(whole_floats_as_ints).collect(),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), whole_floats_as_ints(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

// ── Generic list / single readers ───────────────────────────────────

/// Read a collection payload: a list of maps, one entity per element.
pub fn read_list<T>(
    table: &VersionTable<ReadFunc<T>>,
    version: &Version,
    source: &Value,
) -> Result<Vec<T>, Error> {
    let kind = table.kind();
    let read = table.resolve(version)?;

    Checker::list(Checker::string_map(Checker::Any))
        .check(source)
        .map_err(|e| Error::deserialization(format!("{kind} base schema check failed: {e}")))?;
    let items = source.as_array().map(Vec::as_slice).unwrap_or_default();

    let schema = (read.schema)();
    for (i, item) in items.iter().enumerate() {
        read.check(kind, &schema, item)
            .map_err(|e| e.with_context(format_args!("{kind} {i}")))?;
    }

    let entities = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            read.materialize(kind, item)
                .map_err(|e| e.with_context(format_args!("{kind} {i}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(kind, %version, count = entities.len(), "decoded collection");
    Ok(entities)
}

/// Read a singular payload: one map.
pub fn read_one<T>(
    table: &VersionTable<ReadFunc<T>>,
    version: &Version,
    source: &Value,
) -> Result<T, Error> {
    let kind = table.kind();
    let read = table.resolve(version)?;

    Checker::string_map(Checker::Any)
        .check(source)
        .map_err(|e| Error::deserialization(format!("{kind} base schema check failed: {e}")))?;

    read.check(kind, &(read.schema)(), source)?;
    let entity = read.materialize(kind, source)?;
    debug!(kind, %version, "decoded entity");
    Ok(entity)
}

// ── Public readers ──────────────────────────────────────────────────

pub fn read_machines(version: &Version, source: &Value) -> Result<Vec<Machine>, Error> {
    read_list(&machine_table(), version, source)
}

pub fn read_machine(version: &Version, source: &Value) -> Result<Machine, Error> {
    read_one(&machine_table(), version, source)
}

pub fn read_interfaces(version: &Version, source: &Value) -> Result<Vec<Interface>, Error> {
    read_list(&interface_table(), version, source)
}

pub fn read_interface(version: &Version, source: &Value) -> Result<Interface, Error> {
    read_one(&interface_table(), version, source)
}

pub fn read_zones(version: &Version, source: &Value) -> Result<Vec<Zone>, Error> {
    read_list(&zone_table(), version, source)
}

pub fn read_domains(version: &Version, source: &Value) -> Result<Vec<Domain>, Error> {
    read_list(&domain_table(), version, source)
}

pub fn read_vlans(version: &Version, source: &Value) -> Result<Vec<Vlan>, Error> {
    read_list(&vlan_table(), version, source)
}

pub fn read_subnets(version: &Version, source: &Value) -> Result<Vec<Subnet>, Error> {
    read_list(&subnet_table(), version, source)
}

pub fn read_block_devices(version: &Version, source: &Value) -> Result<Vec<BlockDevice>, Error> {
    read_list(&block_device_table(), version, source)
}

// ── Machine assembly ────────────────────────────────────────────────

/// Wire the machine graph: reference data, then interfaces (indexed by id),
/// then the boot interface resolved against that index.
fn build_machine(m: MachineResponse) -> Result<Machine, Error> {
    let zone = Zone::from(m.zone);
    let domain = Domain::from(m.domain);

    let mut interfaces: IndexMap<i64, Arc<Interface>> =
        IndexMap::with_capacity(m.interface_set.len());
    for iface in m.interface_set {
        match interfaces.entry(iface.id) {
            Entry::Occupied(_) => {
                return Err(Error::deserialization(format!(
                    "duplicate interface id {} in interface_set",
                    iface.id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Interface::from(iface)));
            }
        }
    }

    let boot_interface = match m.boot_interface {
        None => None,
        Some(boot) => Some(interfaces.get(&boot.id).map(Arc::clone).ok_or_else(|| {
            Error::deserialization(format!(
                "boot_interface {} not found in interface_set",
                boot.id
            ))
        })?),
    };

    let state = MachineState {
        hostname: m.hostname,
        fqdn: m.fqdn,
        tags: m.tag_names.into_iter().collect(),
        ip_addresses: m.ip_addresses,
        memory: m.memory,
        cpu_count: m.cpu_count,
        power_state: PowerState::from(m.power_state.as_str()),
        operating_system: m.osystem,
        distro_series: m.distro_series,
        architecture: m.architecture,
        status: m.status,
        status_name: m.status_name,
        status_message: m.status_message,
        owner: m.owner,
        zone,
        domain,
        storage: m.storage,
    };

    Ok(Machine::new(
        m.system_id,
        m.resource_uri,
        interfaces,
        boot_interface,
        m.blockdevice_set.into_iter().map(BlockDevice::from).collect(),
        m.physicalblockdevice_set
            .into_iter()
            .map(BlockDevice::from)
            .collect(),
        state,
    ))
}
