// ── Domain model ──
//
// Typed entities produced by the graph builder. Machines own their
// interfaces and storage; VLANs, subnets, zones and domains are value
// objects copied into every parent that references them.

pub mod interface;
pub mod mac;
pub mod machine;
pub mod network;
pub mod storage;
pub mod zone;

pub use interface::Interface;
pub use mac::MacAddress;
pub use machine::{Machine, MachineState, PowerState};
pub use network::{Link, LinkMode, Subnet, Vlan};
pub use storage::{BlockDevice, Filesystem, Partition};
pub use zone::{Domain, Zone};
