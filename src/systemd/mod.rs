// Remote Admin Center - Systemd Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Systemd D-Bus client for service management.

mod client;

pub use client::SystemdClient;
pub use client::UnitStatus;

/// Unit owning the graphical login screen and the remote access surface.
pub const XDM_SERVICE: &str = "display-manager.service";

/// Default target to boot into when remote administration is enabled.
pub const GRAPHICAL_TARGET: &str = "graphical.target";

/// Abstract systemd service manager.
///
/// Queries are best-effort and answer `false` when the state cannot be
/// determined; mutations go through Polkit and report their failure.
pub trait ServiceManager {
    /// Is the unit enabled (started at boot)?
    fn enabled(&self, unit: &str) -> bool;

    /// Is the unit currently active?
    fn active(&self, unit: &str) -> bool;

    /// Enable the unit at boot.
    fn enable(&self, unit: &str) -> anyhow::Result<()>;

    /// Disable the unit at boot.
    fn disable(&self, unit: &str) -> anyhow::Result<()>;

    /// Restart the unit now.
    fn restart(&self, unit: &str) -> anyhow::Result<()>;

    /// Stop the unit now.
    fn stop(&self, unit: &str) -> anyhow::Result<()>;

    /// Reload the unit's configuration without a full restart.
    fn reload(&self, unit: &str) -> anyhow::Result<()>;

    /// Change the default boot target.
    fn set_default_target(&self, target: &str) -> anyhow::Result<()>;
}
