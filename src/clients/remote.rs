// Remote Admin Center - Remote Administration Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Headless client driving a remote administration session.
//!
//! Owns the real system collaborators, builds a controller session around
//! them and applies the requested action, keeping the firewall in step
//! with the new configuration.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use super::{Action, RemoteProposal};
use crate::firewall::{self, FirewallClient, VNC_HTTPD_SERVICE, VNC_SERVER_SERVICE};
use crate::modes;
use crate::packages::ZypperClient;
use crate::profile::{self, RemoteProfile};
use crate::remote::RemoteAccess;
use crate::report::{LogReport, ReportSink};
use crate::sysconfig::SysconfigFile;
use crate::systemd::SystemdClient;

/// Client owning the live system collaborators.
pub struct RemoteClient {
    systemd: SystemdClient,
    packages: ZypperClient,
    firewall: FirewallClient,
    store: SysconfigFile,
    report: LogReport,
}

impl RemoteClient {
    /// Connect to the system. Unreachable daemons degrade to warnings;
    /// queries against them answer "unknown" later.
    pub fn new() -> Self {
        let mut systemd = SystemdClient::new();
        if let Err(e) = systemd.connect() {
            warn!("systemd is not reachable: {:#}", e);
        }

        let mut firewall = FirewallClient::new();
        if let Err(e) = firewall.connect() {
            warn!("firewalld is not reachable: {:#}", e);
        }

        Self {
            systemd,
            packages: ZypperClient::new(),
            firewall,
            store: SysconfigFile::display_manager(),
            report: LogReport,
        }
    }

    pub fn run(&mut self, action: Action) -> Result<()> {
        info!("----------------------------------------");
        info!("Remote administration client started");

        match action {
            Action::Status => self.show_status(),
            Action::Allow { manager, web } => self.apply(Some((manager, web))),
            Action::Disallow => self.apply(None),
            Action::Proposal => self.show_proposal(),
            Action::Import { path } => self.import_profile(&path),
            Action::Export => self.export_profile(),
        }
    }

    fn show_status(&mut self) -> Result<()> {
        let mut remote = RemoteAccess::new(
            &self.systemd,
            &self.packages,
            &mut self.store,
            &self.report,
        );
        remote.read();

        println!("{}", remote.summary());
        println!();
        println!(
            "{:<12} {:<18} {:<8} {:<10} {}",
            "mode", "unit", "enabled", "state", "description"
        );

        for mode in modes::all() {
            let Some(unit) = mode.service else { continue };
            match self.systemd.status(unit) {
                Ok(status) => println!(
                    "{:<12} {:<18} {:<8} {:<10} {}",
                    mode.name,
                    status.name,
                    if status.is_enabled { "yes" } else { "no" },
                    status.sub_state,
                    status.description,
                ),
                Err(_) => println!("{:<12} {:<18} {:<8} unknown", mode.name, unit, "?"),
            }
        }

        println!();
        if self.firewall.is_connected() {
            for service in firewall::vnc_services(true) {
                let open = self.firewall.service_enabled(service).unwrap_or(false);
                println!(
                    "firewall {:<12} {}",
                    service,
                    if open { "open" } else { "closed" }
                );
            }
        } else {
            println!("firewall: firewalld not available");
        }

        Ok(())
    }

    fn apply(&mut self, selection: Option<(bool, bool)>) -> Result<()> {
        let enabled = selection.is_some();
        let web = matches!(selection, Some((_, true)));

        {
            let mut remote = RemoteAccess::new(
                &self.systemd,
                &self.packages,
                &mut self.store,
                &self.report,
            );
            remote.read();

            // the action describes the full target state
            remote.disable();
            if let Some((manager, web)) = selection {
                if manager {
                    remote.enable_manager();
                } else {
                    remote.enable();
                }
                if web {
                    remote.enable_web();
                }
            }

            remote.write()?;
            println!("{}", remote.summary());

            if remote.enabled() {
                let names: Vec<&str> = remote
                    .modes()
                    .iter()
                    .map(|mode| mode.descriptor().name)
                    .collect();
                println!("Active modes: {}", names.join(", "));
            }
        }

        self.sync_firewall(enabled, web);
        Ok(())
    }

    /// Apply the remote section of an unattended profile document.
    fn import_profile(&mut self, path: &str) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path))?;
        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile {}", path))?;

        // networking sub-trees are owned by the network module
        let network = profile::from_profile(&document);
        let device_count: usize = network["devices"]
            .as_object()
            .map(|types| {
                types
                    .values()
                    .filter_map(Value::as_object)
                    .map(|group| group.len())
                    .sum()
            })
            .unwrap_or(0);
        if device_count > 0 {
            info!(
                "Profile defines {} network device(s), left to the network module",
                device_count
            );
        }

        let section = document.get("remote").unwrap_or(&document);
        let remote_profile = RemoteProfile::from_value(section);

        {
            let mut remote = RemoteAccess::new(
                &self.systemd,
                &self.packages,
                &mut self.store,
                &self.report,
            );
            remote.import(&remote_profile);
            remote.write()?;
            println!("{}", remote.summary());
        }

        self.sync_firewall(remote_profile.enabled, remote_profile.web);
        Ok(())
    }

    /// Print the remote section for an unattended profile document.
    fn export_profile(&mut self) -> Result<()> {
        let mut remote = RemoteAccess::new(
            &self.systemd,
            &self.packages,
            &mut self.store,
            &self.report,
        );
        remote.read();

        let section = remote.export().to_value();
        println!("{}", serde_json::to_string_pretty(&section)?);
        Ok(())
    }

    /// Open the firewall services the new state needs, close the rest.
    /// Firewall problems never fail the configuration change.
    fn sync_firewall(&self, enabled: bool, web: bool) {
        if !self.firewall.is_connected() {
            self.report
                .warning("firewalld is not available, firewall was not adjusted");
            return;
        }

        let zone = match self.firewall.get_default_zone() {
            Ok(zone) => zone,
            Err(e) => {
                self.report
                    .warning(&format!("Failed to query the default zone: {:#}", e));
                return;
            }
        };

        let (open, close) = firewall_plan(enabled, web);
        for service in open {
            if let Err(e) = self.firewall.enable_service(&zone, service, true) {
                self.report.warning(&format!(
                    "Failed to open firewall service {}: {:#}",
                    service, e
                ));
            }
        }
        for service in close {
            if let Err(e) = self.firewall.disable_service(&zone, service, true) {
                self.report.warning(&format!(
                    "Failed to close firewall service {}: {:#}",
                    service, e
                ));
            }
        }
    }

    fn show_proposal(&mut self) -> Result<()> {
        let remote = RemoteAccess::new(
            &self.systemd,
            &self.packages,
            &mut self.store,
            &self.report,
        );
        let mut proposal = RemoteProposal::new(remote);

        // the document a wizard front-end consumes
        let document = serde_json::json!({
            "description": proposal.description(),
            "proposal": proposal.make_proposal(false),
        });
        println!("{}", serde_json::to_string_pretty(&document)?);

        Ok(())
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Firewall services to open and close for a target state.
fn firewall_plan(enabled: bool, web: bool) -> (Vec<&'static str>, Vec<&'static str>) {
    if !enabled {
        return (Vec::new(), vec![VNC_SERVER_SERVICE, VNC_HTTPD_SERVICE]);
    }

    let close = if web { Vec::new() } else { vec![VNC_HTTPD_SERVICE] };
    (firewall::vnc_services(web), close)
}
