// Remote Admin Center - Firewalld D-Bus Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Firewalld D-Bus client implementation.

use anyhow::{anyhow, Context, Result};
use tokio::sync::broadcast;
use tracing::info;
use zbus::blocking::Connection;
use zbus::zvariant::{ObjectPath, OwnedObjectPath};

use super::{interfaces, paths, BUS_NAME};

/// Events emitted by the firewall client.
#[derive(Debug, Clone)]
pub enum FirewallEvent {
    Connected,
    StateChanged,
}

/// Client for interacting with firewalld via D-Bus.
pub struct FirewallClient {
    connection: Option<Connection>,
    event_sender: broadcast::Sender<FirewallEvent>,
}

impl FirewallClient {
    /// Create a new firewall client.
    pub fn new() -> Self {
        let (event_sender, _) = broadcast::channel(32);
        Self {
            connection: None,
            event_sender,
        }
    }

    /// Subscribe to firewall events.
    pub fn subscribe(&self) -> broadcast::Receiver<FirewallEvent> {
        self.event_sender.subscribe()
    }

    /// Connect to firewalld.
    pub fn connect(&mut self) -> Result<()> {
        info!("Connecting to firewalld...");

        let conn = Connection::system()
            .context("Failed to connect to system D-Bus")?;

        // Test connection by getting the default zone
        let _: String = conn
            .call_method(
                Some(BUS_NAME),
                paths::ROOT,
                Some(interfaces::MAIN),
                "getDefaultZone",
                &(),
            )?
            .body()
            .deserialize()?;

        self.connection = Some(conn);
        let _ = self.event_sender.send(FirewallEvent::Connected);

        info!("Connected to firewalld");
        Ok(())
    }

    /// Check if connected to firewalld.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Get the default zone name.
    pub fn get_default_zone(&self) -> Result<String> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to firewalld"))?;

        let zone: String = conn
            .call_method(
                Some(BUS_NAME),
                paths::ROOT,
                Some(interfaces::MAIN),
                "getDefaultZone",
                &(),
            )?
            .body()
            .deserialize()?;

        Ok(zone)
    }

    /// Get services enabled in a zone.
    pub fn get_zone_services(&self, zone: &str) -> Result<Vec<String>> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to firewalld"))?;

        let services: Vec<String> = conn
            .call_method(
                Some(BUS_NAME),
                paths::ROOT,
                Some(interfaces::ZONE),
                "getServices",
                &(zone,),
            )?
            .body()
            .deserialize()?;

        Ok(services)
    }

    /// Is a service enabled in the default zone?
    pub fn service_enabled(&self, service: &str) -> Result<bool> {
        let zone = self.get_default_zone()?;
        Ok(self.get_zone_services(&zone)?.iter().any(|s| s == service))
    }

    /// Enable a service in a zone, runtime and optionally permanent.
    pub fn enable_service(&self, zone: &str, service: &str, permanent: bool) -> Result<()> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to firewalld"))?;

        let result = conn.call_method(
            Some(BUS_NAME),
            paths::ROOT,
            Some(interfaces::ZONE),
            "addService",
            &(zone, service, 0i32),
        );

        match result {
            Ok(_) => {}
            Err(e) if e.to_string().contains("ALREADY_ENABLED") => {
                info!("Service {} already enabled in zone {}", service, zone);
            }
            Err(e) => return Err(e.into()),
        }

        if permanent {
            if let Ok(config_path) = self.get_zone_config_path(zone) {
                let _ = conn.call_method(
                    Some(BUS_NAME),
                    ObjectPath::try_from(config_path.as_str())?,
                    Some(interfaces::CONFIG_ZONE),
                    "addService",
                    &(service,),
                );
            }
        }

        info!("Enabled service {} in zone {}", service, zone);
        let _ = self.event_sender.send(FirewallEvent::StateChanged);
        Ok(())
    }

    /// Disable a service in a zone, runtime and optionally permanent.
    pub fn disable_service(&self, zone: &str, service: &str, permanent: bool) -> Result<()> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to firewalld"))?;

        let _ = conn.call_method(
            Some(BUS_NAME),
            paths::ROOT,
            Some(interfaces::ZONE),
            "removeService",
            &(zone, service),
        );

        if permanent {
            if let Ok(config_path) = self.get_zone_config_path(zone) {
                let _ = conn.call_method(
                    Some(BUS_NAME),
                    ObjectPath::try_from(config_path.as_str())?,
                    Some(interfaces::CONFIG_ZONE),
                    "removeService",
                    &(service,),
                );
            }
        }

        info!("Disabled service {} in zone {}", service, zone);
        let _ = self.event_sender.send(FirewallEvent::StateChanged);
        Ok(())
    }

    /// Get the D-Bus config object path of a zone (for permanent changes).
    fn get_zone_config_path(&self, zone_name: &str) -> Result<String> {
        let conn = self.connection.as_ref()
            .ok_or_else(|| anyhow!("Not connected to firewalld"))?;

        let path: OwnedObjectPath = conn
            .call_method(
                Some(BUS_NAME),
                paths::CONFIG,
                Some(interfaces::CONFIG),
                "getZoneByName",
                &(zone_name,),
            )?
            .body()
            .deserialize()?;

        Ok(path.to_string())
    }
}

impl Default for FirewallClient {
    fn default() -> Self {
        Self::new()
    }
}
