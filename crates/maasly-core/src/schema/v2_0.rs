// ── MAAS 2.0 entity schemas ──
//
// Field sets checked before decoding 2.0 payloads. Nested entities reuse the
// standalone schemas so a machine check covers its whole tree.

use super::{Checker, FieldMap};

pub const LABEL: &str = "2.0";

pub fn zone() -> Checker {
    FieldMap::new()
        .required("name", Checker::String)
        .required("description", Checker::String)
        .required("resource_uri", Checker::String)
        .into()
}

pub fn domain() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("name", Checker::String)
        .required("resource_uri", Checker::String)
        .optional("authoritative", Checker::Bool)
        .optional("resource_record_count", Checker::Int)
        .optional("ttl", Checker::nullable(Checker::Int))
        .into()
}

pub fn vlan() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("resource_uri", Checker::String)
        .required("name", Checker::String)
        .required("fabric", Checker::String)
        .required("vid", Checker::Int)
        .required("mtu", Checker::Int)
        .required("dhcp_on", Checker::Bool)
        .optional("primary_rack", Checker::nullable_string())
        .optional("secondary_rack", Checker::nullable_string())
        .into()
}

pub fn subnet() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("resource_uri", Checker::String)
        .required("name", Checker::String)
        .required("space", Checker::String)
        .required("vlan", vlan())
        .optional("gateway_ip", Checker::nullable_string())
        .required("cidr", Checker::String)
        .required("dns_servers", Checker::string_list())
        .into()
}

fn link() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("mode", Checker::String)
        .optional("subnet", Checker::nullable(subnet()))
        .optional("ip_address", Checker::nullable_string())
        .into()
}

pub fn interface() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("resource_uri", Checker::String)
        .required("name", Checker::String)
        .required("type", Checker::String)
        .required("enabled", Checker::Bool)
        .required("tags", Checker::string_list())
        .required("vlan", Checker::nullable(vlan()))
        .required("links", Checker::list(link()))
        .required("mac_address", Checker::String)
        .required("effective_mtu", Checker::Int)
        .optional("parents", Checker::string_list())
        .optional("children", Checker::string_list())
        .into()
}

fn filesystem() -> Checker {
    FieldMap::new()
        .required("fstype", Checker::String)
        .optional("mount_point", Checker::nullable_string())
        .optional("label", Checker::nullable_string())
        .required("uuid", Checker::String)
        .optional("mount_options", Checker::nullable_string())
        .into()
}

fn partition() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("resource_uri", Checker::String)
        .required("path", Checker::String)
        .optional("uuid", Checker::nullable_string())
        .required("used_for", Checker::String)
        .required("size", Checker::Int)
        .optional("bootable", Checker::Bool)
        .optional("filesystem", Checker::nullable(filesystem()))
        .into()
}

pub fn block_device() -> Checker {
    FieldMap::new()
        .required("id", Checker::Int)
        .required("resource_uri", Checker::String)
        .required("name", Checker::String)
        .optional("model", Checker::nullable_string())
        .optional("id_path", Checker::nullable_string())
        .required("path", Checker::String)
        .required("used_for", Checker::String)
        .required("tags", Checker::string_list())
        .required("block_size", Checker::Int)
        .required("used_size", Checker::Int)
        .required("size", Checker::Int)
        .optional("uuid", Checker::nullable_string())
        .required("partitions", Checker::list(partition()))
        .optional("filesystem", Checker::nullable(filesystem()))
        .into()
}

pub fn machine() -> Checker {
    FieldMap::new()
        .required("system_id", Checker::String)
        .required("resource_uri", Checker::String)
        .required("hostname", Checker::String)
        .required("fqdn", Checker::String)
        .required("tag_names", Checker::string_list())
        .required("ip_addresses", Checker::string_list())
        .required("memory", Checker::Int)
        .required("cpu_count", Checker::Int)
        .required("power_state", Checker::String)
        .required("osystem", Checker::String)
        .required("distro_series", Checker::String)
        .required("architecture", Checker::String)
        .required("status", Checker::Int)
        .required("status_name", Checker::String)
        .required("status_message", Checker::nullable_string())
        .required("owner", Checker::nullable_string())
        .required("zone", zone())
        .required("domain", domain())
        .required("boot_interface", Checker::nullable(interface()))
        .required("interface_set", Checker::list(interface()))
        .required("blockdevice_set", Checker::list(block_device()))
        .optional("physicalblockdevice_set", Checker::list(block_device()))
        .optional("storage", Checker::nullable(Checker::Float))
        .into()
}
