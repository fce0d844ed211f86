// Remote Admin Center - Systemd D-Bus Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Systemd D-Bus client implementation for service management.

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use zbus::blocking::Connection;
use zbus::zvariant::OwnedObjectPath;

use super::ServiceManager;

const SYSTEMD_BUS: &str = "org.freedesktop.systemd1";
const SYSTEMD_PATH: &str = "/org/freedesktop/systemd1";
const MANAGER_INTERFACE: &str = "org.freedesktop.systemd1.Manager";
const UNIT_INTERFACE: &str = "org.freedesktop.systemd1.Unit";

/// State snapshot of a single unit, for the status display.
#[derive(Debug, Clone)]
pub struct UnitStatus {
    pub name: String,
    pub description: String,
    pub sub_state: String,
    pub is_enabled: bool,
}

impl UnitStatus {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            sub_state: "unknown".to_string(),
            is_enabled: false,
        }
    }
}

/// Client for interacting with systemd via D-Bus.
///
/// Read-only unit queries use the system bus directly; lifecycle changes
/// run `systemctl` under pkexec so Polkit handles the authentication.
pub struct SystemdClient {
    connection: Option<Connection>,
}

impl SystemdClient {
    /// Create a new systemd client.
    pub fn new() -> Self {
        Self { connection: None }
    }

    /// Connect to systemd.
    pub fn connect(&mut self) -> Result<()> {
        info!("Connecting to systemd...");

        let conn = Connection::system()
            .context("Failed to connect to system D-Bus")?;

        // Test connection by getting systemd version
        let value: zbus::zvariant::OwnedValue = conn
            .call_method(
                Some(SYSTEMD_BUS),
                SYSTEMD_PATH,
                Some("org.freedesktop.DBus.Properties"),
                "Get",
                &(MANAGER_INTERFACE, "Version"),
            )?
            .body()
            .deserialize()?;

        // Value is a variant containing a string
        let _version: String = value.try_into().unwrap_or_default();

        self.connection = Some(conn);
        info!("Connected to systemd");
        Ok(())
    }

    /// Check if connected to systemd.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Get the current state of a unit.
    pub fn status(&self, name: &str) -> Result<UnitStatus> {
        let unit_path = self.get_unit_path(name)?;

        let mut status = UnitStatus::new(name);

        if let Ok(desc) = self.get_unit_property(&unit_path, "Description") {
            status.description = desc;
        }

        // SubState is more specific than ActiveState: running, listening, dead
        if let Ok(sub_state) = self.get_unit_property(&unit_path, "SubState") {
            status.sub_state = sub_state;
        }

        if let Ok(unit_file_state) = self.get_unit_property(&unit_path, "UnitFileState") {
            status.is_enabled = unit_file_state == "enabled" || unit_file_state == "static";
        }

        Ok(status)
    }

    /// Get a unit's object path, loading the unit if necessary.
    fn get_unit_path(&self, name: &str) -> Result<OwnedObjectPath> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to systemd"))?;

        let unit_path: OwnedObjectPath = conn
            .call_method(
                Some(SYSTEMD_BUS),
                SYSTEMD_PATH,
                Some(MANAGER_INTERFACE),
                "GetUnit",
                &(name,),
            )
            .or_else(|_| {
                // Try LoadUnit if GetUnit fails (unit not loaded)
                conn.call_method(
                    Some(SYSTEMD_BUS),
                    SYSTEMD_PATH,
                    Some(MANAGER_INTERFACE),
                    "LoadUnit",
                    &(name,),
                )
            })?
            .body()
            .deserialize()?;

        Ok(unit_path)
    }

    /// Get a property from a unit.
    fn get_unit_property(&self, unit_path: &OwnedObjectPath, property: &str) -> Result<String> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to systemd"))?;

        let value: zbus::zvariant::OwnedValue = conn
            .call_method(
                Some(SYSTEMD_BUS),
                unit_path.as_ref(),
                Some("org.freedesktop.DBus.Properties"),
                "Get",
                &(UNIT_INTERFACE, property),
            )?
            .body()
            .deserialize()?;

        let s: String = value.try_into()
            .map_err(|_| anyhow!("Property is not a string"))?;
        Ok(s)
    }
}

impl ServiceManager for SystemdClient {
    fn enabled(&self, unit: &str) -> bool {
        match self
            .get_unit_path(unit)
            .and_then(|path| self.get_unit_property(&path, "UnitFileState"))
        {
            Ok(state) => state == "enabled" || state == "static",
            Err(e) => {
                warn!("Could not query enablement of {}: {}", unit, e);
                false
            }
        }
    }

    fn active(&self, unit: &str) -> bool {
        match self
            .get_unit_path(unit)
            .and_then(|path| self.get_unit_property(&path, "ActiveState"))
        {
            Ok(state) => state == "active" || state == "reloading",
            Err(e) => {
                warn!("Could not query activity of {}: {}", unit, e);
                false
            }
        }
    }

    fn enable(&self, unit: &str) -> Result<()> {
        run_systemctl_command("enable", unit)?;
        info!("Enabled service: {}", unit);
        Ok(())
    }

    fn disable(&self, unit: &str) -> Result<()> {
        run_systemctl_command("disable", unit)?;
        info!("Disabled service: {}", unit);
        Ok(())
    }

    fn restart(&self, unit: &str) -> Result<()> {
        run_systemctl_command("restart", unit)?;
        info!("Restarted service: {}", unit);
        Ok(())
    }

    fn stop(&self, unit: &str) -> Result<()> {
        run_systemctl_command("stop", unit)?;
        info!("Stopped service: {}", unit);
        Ok(())
    }

    fn reload(&self, unit: &str) -> Result<()> {
        run_systemctl_command("reload", unit)?;
        info!("Reloaded service: {}", unit);
        Ok(())
    }

    fn set_default_target(&self, target: &str) -> Result<()> {
        run_systemctl_command("set-default", target)?;
        info!("Default target set to {}", target);
        Ok(())
    }
}

/// Run a systemctl command with pkexec for authentication.
fn run_systemctl_command(action: &str, unit: &str) -> Result<()> {
    let output = std::process::Command::new("pkexec")
        .args(["systemctl", action, unit])
        .output()
        .context(format!("Failed to execute pkexec systemctl {} {}", action, unit))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Check if user cancelled the authentication dialog
        if stderr.contains("dismissed") || stderr.contains("cancelled") || output.status.code() == Some(126) {
            return Err(anyhow!("Authentication cancelled"));
        }
        return Err(anyhow!("Failed to {} unit {}: {}", action, unit, stderr));
    }

    Ok(())
}

impl Default for SystemdClient {
    fn default() -> Self {
        Self::new()
    }
}
