//! Versioned decoding and machine actions for the MAAS 2.x API.
//!
//! - **Readers** ([`read`]) resolve a decoder for the server's API version,
//!   validate the payload against that version's schema ([`schema`]), and
//!   build typed entities. Nothing partial is ever returned.
//!
//! - **Domain model** ([`model`]): [`Machine`] owns its interfaces and
//!   storage; the boot interface is the same allocation as its entry in the
//!   interface set.
//!
//! - **Actions** ([`action`]): [`ActionInvoker`] runs deploy, power and
//!   release operations and merges the server's answer into the machine in
//!   place.

pub mod action;
pub mod convert;
pub mod model;
pub mod read;
pub mod schema;
pub mod version;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::ActionInvoker;
pub use action::requests::{PowerOffArgs, PowerOnArgs, ReleaseArgs, StartArgs, StopMode};
pub use maasly_api::{Error, ErrorKind};
pub use read::{
    TWO_DOT_OH, read_block_devices, read_domains, read_interface, read_interfaces, read_machine,
    read_machines, read_subnets, read_vlans, read_zones,
};
pub use version::{Version, VersionParseError};

pub use model::{
    BlockDevice, Domain, Filesystem, Interface, Link, LinkMode, MacAddress, Machine, MachineState,
    Partition, PowerState, Subnet, Vlan, Zone,
};
