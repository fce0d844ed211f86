// Remote Admin Center - Remote Access Modes
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Registry of remote administration modes.
//!
//! Each mode maps to the systemd unit serving it and the packages it needs.
//! The table is static; everything that varies at runtime (installed,
//! enabled, active) is answered by the injected managers.

use crate::packages::PackageManager;
use crate::report::{self, ReportSink};
use crate::systemd::ServiceManager;

/// Tag identifying one of the known modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Plain VNC: one client per session, session dies with the connection.
    Vnc,
    /// VNC through the session manager: shared, persistent sessions.
    Manager,
    /// VNC over a browser (noVNC).
    Web,
}

/// Descriptor of a remote administration mode.
#[derive(Debug)]
pub struct Mode {
    pub kind: ModeKind,
    pub name: &'static str,
    /// Backing systemd unit; a mode without one can never be running.
    pub service: Option<&'static str>,
    /// Packages required before the unit can be enabled.
    pub packages: &'static [&'static str],
}

/// All known modes, in presentation order.
pub const MODES: &[Mode] = &[
    Mode {
        kind: ModeKind::Vnc,
        name: "vnc",
        service: Some("xvnc.socket"),
        packages: &["xorg-x11-Xvnc", "xorg-x11-fonts"],
    },
    Mode {
        kind: ModeKind::Manager,
        name: "vncmanager",
        service: Some("vncmanager"),
        packages: &["vncmanager"],
    },
    Mode {
        kind: ModeKind::Web,
        name: "web",
        service: Some("xvnc-novnc.socket"),
        packages: &["xorg-x11-Xvnc-novnc"],
    },
];

/// All known modes, in presentation order.
pub fn all() -> &'static [Mode] {
    MODES
}

/// Modes whose backing unit is currently enabled.
pub fn running_modes(services: &dyn ServiceManager) -> Vec<ModeKind> {
    all()
        .iter()
        .filter(|mode| mode.service_enabled(services))
        .map(|mode| mode.kind)
        .collect()
}

/// Union of the packages required by the given modes, in table order.
pub fn required_packages(modes: &[ModeKind]) -> Vec<&'static str> {
    let mut packages = Vec::new();
    for mode in all() {
        if !modes.contains(&mode.kind) {
            continue;
        }
        for pkg in mode.packages {
            if !packages.contains(pkg) {
                packages.push(*pkg);
            }
        }
    }
    packages
}

impl ModeKind {
    /// Descriptor for this mode.
    pub fn descriptor(self) -> &'static Mode {
        MODES
            .iter()
            .find(|mode| mode.kind == self)
            .expect("every ModeKind has a table entry")
    }
}

impl Mode {
    /// Are this mode's packages installed?
    pub fn installed(&self, packages: &dyn PackageManager) -> bool {
        packages.installed(self.packages)
    }

    /// Is this mode's unit enabled?
    pub fn service_enabled(&self, services: &dyn ServiceManager) -> bool {
        match self.service {
            Some(unit) => services.enabled(unit),
            None => false,
        }
    }

    /// Enable this mode's unit. Not installed means nothing to do.
    pub fn enable_service(
        &self,
        services: &dyn ServiceManager,
        packages: &dyn PackageManager,
        report: &dyn ReportSink,
    ) {
        let Some(unit) = self.service else { return };
        if !self.installed(packages) {
            return;
        }

        if let Err(e) = services.enable(unit) {
            report.error(&format!("Enabling service {} has failed: {}", unit, e));
        }
    }

    /// Disable this mode's unit. Not installed means nothing to do.
    pub fn disable_service(
        &self,
        services: &dyn ServiceManager,
        packages: &dyn PackageManager,
        report: &dyn ReportSink,
    ) {
        let Some(unit) = self.service else { return };
        if !self.installed(packages) {
            return;
        }

        if let Err(e) = services.disable(unit) {
            report.error(&format!("Disabling service {} has failed: {}", unit, e));
        }
    }

    /// Restart this mode's unit. Not installed means nothing to do.
    pub fn restart_service(
        &self,
        services: &dyn ServiceManager,
        packages: &dyn PackageManager,
        report: &dyn ReportSink,
    ) {
        let Some(unit) = self.service else { return };
        if !self.installed(packages) {
            return;
        }

        if services.restart(unit).is_err() {
            report.error(&report::cannot_restart_service(unit));
        }
    }

    /// Stop this mode's unit. Not installed means nothing to do.
    pub fn stop_service(
        &self,
        services: &dyn ServiceManager,
        packages: &dyn PackageManager,
        report: &dyn ReportSink,
    ) {
        let Some(unit) = self.service else { return };
        if !self.installed(packages) {
            return;
        }

        if services.stop(unit).is_err() {
            report.error(&report::cannot_stop_service(unit));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakePackages, FakeServices, RecordingReport};

    #[test]
    fn test_table_order_and_units() {
        let names: Vec<&str> = all().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["vnc", "vncmanager", "web"]);

        assert_eq!(ModeKind::Vnc.descriptor().service, Some("xvnc.socket"));
        assert_eq!(ModeKind::Manager.descriptor().service, Some("vncmanager"));
        assert_eq!(ModeKind::Web.descriptor().service, Some("xvnc-novnc.socket"));
    }

    #[test]
    fn test_required_packages_union_keeps_table_order() {
        let packages = required_packages(&[ModeKind::Web, ModeKind::Vnc]);
        assert_eq!(
            packages,
            vec!["xorg-x11-Xvnc", "xorg-x11-fonts", "xorg-x11-Xvnc-novnc"]
        );
        assert!(required_packages(&[]).is_empty());
    }

    #[test]
    fn test_running_modes_follow_unit_enablement() {
        let services = FakeServices::with_enabled(&["xvnc.socket", "xvnc-novnc.socket"]);
        assert_eq!(running_modes(&services), vec![ModeKind::Vnc, ModeKind::Web]);

        let none = FakeServices::default();
        assert!(running_modes(&none).is_empty());
    }

    #[test]
    fn test_lifecycle_is_a_noop_without_packages() {
        let services = FakeServices::default();
        let packages = FakePackages::default(); // nothing installed
        let report = RecordingReport::default();

        let vnc = ModeKind::Vnc.descriptor();
        vnc.enable_service(&services, &packages, &report);
        vnc.restart_service(&services, &packages, &report);
        vnc.stop_service(&services, &packages, &report);

        assert!(services.log().is_empty());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_lifecycle_failures_are_reported_not_propagated() {
        let mut services = FakeServices::default();
        services.fail_on("restart xvnc.socket");
        let packages = FakePackages::with_installed(&["xorg-x11-Xvnc", "xorg-x11-fonts"]);
        let report = RecordingReport::default();

        let vnc = ModeKind::Vnc.descriptor();
        vnc.restart_service(&services, &packages, &report);

        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].contains("xvnc.socket"));
    }
}
