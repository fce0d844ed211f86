// Remote Admin Center - Firewall Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Firewalld D-Bus client and the VNC service identifiers.

mod client;

pub use client::FirewallClient;

// Keep FirewallEvent for future use (event-based architecture)
#[allow(unused_imports)]
pub use client::FirewallEvent;

/// D-Bus bus name for firewalld.
pub const BUS_NAME: &str = "org.fedoraproject.FirewallD1";

/// D-Bus object paths.
pub mod paths {
    pub const ROOT: &str = "/org/fedoraproject/FirewallD1";
    pub const CONFIG: &str = "/org/fedoraproject/FirewallD1/config";
}

/// D-Bus interface names.
pub mod interfaces {
    /// Main firewalld interface (for getDefaultZone, reload, etc.)
    pub const MAIN: &str = "org.fedoraproject.FirewallD1";
    /// Zone interface (for zone-specific operations)
    pub const ZONE: &str = "org.fedoraproject.FirewallD1.zone";
    pub const CONFIG: &str = "org.fedoraproject.FirewallD1.config";
    pub const CONFIG_ZONE: &str = "org.fedoraproject.FirewallD1.config.zone";
}

/// Firewalld service definition covering the VNC display ports (590x).
pub const VNC_SERVER_SERVICE: &str = "vnc-server";

/// Firewalld service definition covering the browser access ports (580x).
pub const VNC_HTTPD_SERVICE: &str = "vnc-httpd";

/// Firewall services that must be open for the given access variant.
pub fn vnc_services(web: bool) -> Vec<&'static str> {
    let mut services = vec![VNC_SERVER_SERVICE];
    if web {
        services.push(VNC_HTTPD_SERVICE);
    }
    services
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnc_services_add_httpd_for_web_access() {
        assert_eq!(vnc_services(false), vec!["vnc-server"]);
        assert_eq!(vnc_services(true), vec!["vnc-server", "vnc-httpd"]);
    }
}
