// ── Wire-to-domain conversions ──
//
// Bridges `maasly_api::models` response types into `maasly_core::model`
// entities. These are infallible: every input has already passed the schema
// check. Machines are not converted here since assembling one can fail
// (see `read::build_machine`).

use maasly_api::models::{
    BlockDeviceResponse, DomainResponse, FilesystemResponse, InterfaceResponse, LinkResponse,
    PartitionResponse, SubnetResponse, VlanResponse, ZoneResponse,
};

use crate::model::{
    BlockDevice, Domain, Filesystem, Interface, Link, LinkMode, MacAddress, Partition, Subnet,
    Vlan, Zone,
};

// ── Reference data ─────────────────────────────────────────────────

impl From<ZoneResponse> for Zone {
    fn from(z: ZoneResponse) -> Self {
        Zone {
            name: z.name,
            description: z.description,
            resource_uri: z.resource_uri,
        }
    }
}

impl From<DomainResponse> for Domain {
    fn from(d: DomainResponse) -> Self {
        Domain {
            id: d.id,
            name: d.name,
            resource_uri: d.resource_uri,
            authoritative: d.authoritative,
            resource_record_count: d.resource_record_count,
            ttl: d.ttl,
        }
    }
}

// ── Networking ─────────────────────────────────────────────────────

impl From<VlanResponse> for Vlan {
    fn from(v: VlanResponse) -> Self {
        Vlan {
            id: v.id,
            resource_uri: v.resource_uri,
            name: v.name,
            fabric: v.fabric,
            vid: v.vid,
            mtu: v.mtu,
            dhcp_on: v.dhcp_on,
            primary_rack: v.primary_rack,
            secondary_rack: v.secondary_rack,
        }
    }
}

impl From<SubnetResponse> for Subnet {
    fn from(s: SubnetResponse) -> Self {
        Subnet {
            id: s.id,
            resource_uri: s.resource_uri,
            name: s.name,
            space: s.space,
            vlan: s.vlan.into(),
            gateway: s.gateway_ip,
            cidr: s.cidr,
            dns_servers: s.dns_servers,
        }
    }
}

impl From<LinkResponse> for Link {
    fn from(l: LinkResponse) -> Self {
        Link {
            id: l.id,
            mode: LinkMode::from(l.mode.as_str()),
            subnet: l.subnet.map(Subnet::from),
            ip_address: l.ip_address,
        }
    }
}

impl From<InterfaceResponse> for Interface {
    fn from(i: InterfaceResponse) -> Self {
        Interface {
            id: i.id,
            resource_uri: i.resource_uri,
            name: i.name,
            interface_type: i.interface_type,
            enabled: i.enabled,
            tags: i.tags.into_iter().collect(),
            vlan: i.vlan.map(Vlan::from),
            links: i.links.into_iter().map(Link::from).collect(),
            mac_address: MacAddress::from(i.mac_address),
            effective_mtu: i.effective_mtu,
            parents: i.parents,
            children: i.children,
        }
    }
}

// ── Storage ────────────────────────────────────────────────────────

impl From<FilesystemResponse> for Filesystem {
    fn from(f: FilesystemResponse) -> Self {
        Filesystem {
            fstype: f.fstype,
            mount_point: f.mount_point,
            label: f.label,
            uuid: f.uuid,
            mount_options: f.mount_options,
        }
    }
}

impl From<PartitionResponse> for Partition {
    fn from(p: PartitionResponse) -> Self {
        Partition {
            id: p.id,
            resource_uri: p.resource_uri,
            path: p.path,
            uuid: p.uuid,
            used_for: p.used_for,
            size: p.size,
            bootable: p.bootable,
            filesystem: p.filesystem.map(Filesystem::from),
        }
    }
}

impl From<BlockDeviceResponse> for BlockDevice {
    fn from(b: BlockDeviceResponse) -> Self {
        BlockDevice {
            id: b.id,
            resource_uri: b.resource_uri,
            name: b.name,
            model: b.model,
            id_path: b.id_path,
            path: b.path,
            used_for: b.used_for,
            tags: b.tags.into_iter().collect(),
            block_size: b.block_size,
            used_size: b.used_size,
            size: b.size,
            uuid: b.uuid,
            partitions: b.partitions.into_iter().map(Partition::from).collect(),
            filesystem: b.filesystem.map(Filesystem::from),
        }
    }
}
