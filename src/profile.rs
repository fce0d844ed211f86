// Remote Admin Center - Unattended Profile Conversion
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Conversion of declarative installation profiles.
//!
//! Unattended installation profiles carry lower-case keys; the internal
//! representation mirrors the sysconfig files and is keyed upper-case,
//! with interfaces grouped per device type.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Remote administration section of an unattended profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProfile {
    /// Allow remote administration at all.
    #[serde(default)]
    pub enabled: bool,
    /// Use the session manager variant instead of plain VNC.
    #[serde(default)]
    pub manager: bool,
    /// Additionally allow access from a web browser.
    #[serde(default)]
    pub web: bool,
}

impl RemoteProfile {
    /// Parse the remote section of a profile document.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("profile serializes")
    }
}

/// Convert a network profile into the internal per-device representation.
///
/// The result always carries the four top-level sections, empty when the
/// profile does not fill them:
/// `{"config": {"dhcp": {}}, "devices": {}, "hwcfg": {}, "interfaces": []}`.
pub fn from_profile(profile: &Value) -> Value {
    let interfaces = profile
        .get("interfaces")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    json!({
        "config": { "dhcp": dhcp_config(profile) },
        "devices": devices(&interfaces),
        "hwcfg": {},
        "interfaces": interfaces,
    })
}

/// Group profile interfaces into `devices[type][name]` sysconfig maps.
fn devices(interfaces: &[Value]) -> Value {
    let mut devices = Map::new();

    for interface in interfaces {
        let Some(entry) = interface.as_object() else {
            continue;
        };
        let Some(name) = entry.get("device").and_then(Value::as_str) else {
            continue;
        };

        let mut sysconfig = Map::new();
        for (key, value) in entry {
            if key == "device" {
                continue;
            }
            sysconfig.insert(key.to_uppercase(), value.clone());
        }

        devices
            .entry(device_type(name))
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .expect("device groups are objects")
            .insert(name.to_string(), Value::Object(sysconfig));
    }

    Value::Object(devices)
}

/// DHCP client configuration from the `dhcp_options` and `dns` sub-trees.
fn dhcp_config(profile: &Value) -> Value {
    let mut dhcp = Map::new();

    if let Some(options) = profile.get("dhcp_options").and_then(Value::as_object) {
        for (key, value) in options {
            dhcp.insert(key.to_uppercase(), value.clone());
        }
    }

    // the hostname-over-dhcp switch lives in the dns sub-tree
    if let Some(value) = profile.get("dns").and_then(|dns| dns.get("dhcp_hostname")) {
        dhcp.insert("DHCLIENT_SET_HOSTNAME".to_string(), value.clone());
    }

    Value::Object(dhcp)
}

/// Device type of an interface name: the name minus its trailing index.
fn device_type(name: &str) -> String {
    name.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_makes_minimal_structure() {
        let expected = json!({
            "config": { "dhcp": {} },
            "devices": {},
            "hwcfg": {},
            "interfaces": [],
        });
        assert_eq!(from_profile(&json!({})), expected);
    }

    #[test]
    fn test_interfaces_become_nested_devices() {
        let input = json!({
            "interfaces": [
                {
                    "bootproto": "static",
                    "device": "eth1",
                    "ipaddr": "10.1.1.1",
                    "name": "Ethernet Card 0",
                    "prefixlen": "24",
                    "startmode": "auto",
                    "usercontrol": "no"
                }
            ]
        });
        let expected = json!({
            "eth": {
                "eth1": {
                    "BOOTPROTO": "static",
                    "IPADDR": "10.1.1.1",
                    "NAME": "Ethernet Card 0",
                    "PREFIXLEN": "24",
                    "STARTMODE": "auto",
                    "USERCONTROL": "no"
                }
            }
        });

        assert_eq!(from_profile(&input)["devices"], expected);
    }

    #[test]
    fn test_dhcp_options_and_dns_merge_into_config() {
        let input = json!({
            "dhcp_options": {
                "dhclient_hostname_option": "AUTO",
            },
            "dns": {
                "dhcp_hostname": false,
                "domain": "example.com",
                "hostname": "eg",
                "nameservers": ["10.10.0.100"],
                "resolv_conf_policy": "auto",
                "searchlist": ["example.com"],
                "write_hostname": false
            }
        });
        let expected = json!({
            "dhcp": {
                "DHCLIENT_HOSTNAME_OPTION": "AUTO",
                "DHCLIENT_SET_HOSTNAME": false
            }
        });

        assert_eq!(from_profile(&input)["config"], expected);
    }

    #[test]
    fn test_device_type_strips_trailing_index() {
        assert_eq!(device_type("eth1"), "eth");
        assert_eq!(device_type("br0"), "br");
        assert_eq!(device_type("bond42"), "bond");
    }

    #[test]
    fn test_remote_profile_defaults_to_disabled() {
        let profile = RemoteProfile::from_value(&json!({}));
        assert_eq!(profile, RemoteProfile::default());
        assert!(!profile.enabled);

        let profile = RemoteProfile::from_value(&json!({"enabled": true, "web": true}));
        assert!(profile.enabled && profile.web && !profile.manager);
    }
}
