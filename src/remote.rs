// Remote Admin Center - Remote Access Controller
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Remote administration state and orchestration.
//!
//! [`RemoteAccess`] owns the selected mode set for one configuration
//! session and drives package installation, unit enablement and sysconfig
//! persistence through injected collaborators. Remote access is enabled
//! exactly when at least one mode is selected.

use anyhow::Result;
use tracing::error;

use crate::modes::{self, ModeKind};
use crate::packages::PackageManager;
use crate::profile::RemoteProfile;
use crate::report::{self, ReportSink};
use crate::sysconfig::{SysconfigStore, REMOTE_ACCESS_KEY, ROOT_LOGIN_REMOTE_KEY};
use crate::systemd::{ServiceManager, GRAPHICAL_TARGET, XDM_SERVICE};

/// One remote administration configuration session.
pub struct RemoteAccess<'a> {
    modes: Vec<ModeKind>,
    proposed: bool,
    /// Running on an installed system, as opposed to inside an installation.
    /// Services are only restarted on an installed system.
    normal_mode: bool,
    services: &'a dyn ServiceManager,
    packages: &'a dyn PackageManager,
    sysconfig: &'a mut dyn SysconfigStore,
    report: &'a dyn ReportSink,
}

impl<'a> RemoteAccess<'a> {
    pub fn new(
        services: &'a dyn ServiceManager,
        packages: &'a dyn PackageManager,
        sysconfig: &'a mut dyn SysconfigStore,
        report: &'a dyn ReportSink,
    ) -> Self {
        Self {
            modes: Vec::new(),
            proposed: false,
            normal_mode: true,
            services,
            packages,
            sysconfig,
            report,
        }
    }

    pub fn set_normal_mode(&mut self, normal: bool) {
        self.normal_mode = normal;
    }

    /// Currently selected modes.
    pub fn modes(&self) -> &[ModeKind] {
        &self.modes
    }

    /// Is remote administration allowed?
    pub fn enabled(&self) -> bool {
        !self.disabled()
    }

    /// Is remote administration disallowed?
    pub fn disabled(&self) -> bool {
        self.modes.is_empty()
    }

    /// Is the session manager variant selected?
    pub fn enabled_manager(&self) -> bool {
        self.modes.contains(&ModeKind::Manager)
    }

    /// Is browser access selected?
    pub fn enabled_web(&self) -> bool {
        self.modes.contains(&ModeKind::Web)
    }

    /// Deselect everything.
    pub fn disable(&mut self) {
        self.modes.clear();
    }

    /// Select plain VNC access.
    pub fn enable(&mut self) {
        self.enable_mode(ModeKind::Vnc);
    }

    /// Select VNC access through the session manager.
    pub fn enable_manager(&mut self) {
        self.enable_mode(ModeKind::Manager);
    }

    /// Additionally allow access from a web browser.
    pub fn enable_web(&mut self) {
        self.enable_mode(ModeKind::Web);
    }

    // VNC and the session manager drive the same display, so they exclude
    // each other. Web access is an independent addition.
    fn enable_mode(&mut self, mode: ModeKind) {
        if self.modes.contains(&mode) {
            return;
        }

        match mode {
            ModeKind::Vnc => self.modes.retain(|m| *m != ModeKind::Manager),
            ModeKind::Manager => self.modes.retain(|m| *m != ModeKind::Vnc),
            ModeKind::Web => {}
        }
        self.modes.push(mode);
    }

    /// Read the current status from the system. Best effort: an unreadable
    /// system simply presents as disabled.
    pub fn read(&mut self) {
        let remote_access =
            self.sysconfig.read(REMOTE_ACCESS_KEY).as_deref() == Some("yes");
        let xdm = self.services.enabled(XDM_SERVICE);

        if xdm && remote_access {
            self.modes = modes::running_modes(self.services);
        }
    }

    /// Propose an initial configuration for the wizard step, reading the
    /// system state only once.
    pub fn propose(&mut self) {
        if self.proposed {
            return;
        }
        self.read();
        self.proposed = true;
    }

    /// Throw away the current selection and propose again.
    pub fn reset(&mut self) {
        self.modes.clear();
        self.proposed = false;
        self.propose();
    }

    /// Write the configuration to the system.
    ///
    /// Fails only when package installation fails; unit lifecycle problems
    /// are reported and do not abort the write.
    pub fn write(&mut self) -> Result<()> {
        self.configure_display_manager()?;

        if self.normal_mode {
            self.restart_services();
        }

        Ok(())
    }

    /// Ensure required packages are present, align unit enablement with the
    /// selection and persist the sysconfig flags.
    fn configure_display_manager(&mut self) -> Result<()> {
        if self.enabled() {
            let packages = modes::required_packages(&self.modes);

            if let Err(e) = self.packages.install(&packages) {
                error!("Installing of required packages failed");
                self.report
                    .error(&format!("Failed to install required packages: {:#}", e));
                return Err(e.context("Installing required packages failed"));
            }

            for mode in modes::all() {
                if self.modes.contains(&mode.kind) {
                    mode.enable_service(self.services, self.packages, self.report);
                } else {
                    mode.disable_service(self.services, self.packages, self.report);
                }
            }
        }

        let flag = if self.enabled() { "yes" } else { "no" };
        self.sysconfig.set(REMOTE_ACCESS_KEY, flag);
        self.sysconfig.set(ROOT_LOGIN_REMOTE_KEY, flag);

        if let Err(e) = self.sysconfig.flush() {
            self.report.error(&format!(
                "Failed to write display manager configuration: {:#}",
                e
            ));
        }

        Ok(())
    }

    /// Restart units of selected modes, stop the others, then bounce the
    /// display manager. Every failure is reported, none is fatal.
    pub fn restart_services(&self) {
        if self.enabled() {
            if let Err(e) = self.services.set_default_target(GRAPHICAL_TARGET) {
                self.report
                    .warning(&format!("Failed to set the graphical target: {}", e));
            }
        }

        for mode in modes::all() {
            if self.modes.contains(&mode.kind) {
                mode.restart_service(self.services, self.packages, self.report);
            } else {
                mode.stop_service(self.services, self.packages, self.report);
            }
        }

        if self.enabled() {
            self.restart_display_manager();
        }
    }

    // A live display manager only gets a reload; a full restart would kill
    // the session the user is configuring from.
    fn restart_display_manager(&self) {
        if self.services.active(XDM_SERVICE) {
            if self.services.reload(XDM_SERVICE).is_err() {
                self.report.error(&report::cannot_restart_service(XDM_SERVICE));
            }
            self.report.warning(&report::display_manager_restart_notice());
        } else if self.services.restart(XDM_SERVICE).is_err() {
            self.report.error(&report::cannot_restart_service(XDM_SERVICE));
        }
    }

    /// One-line description for the proposal.
    pub fn summary(&self) -> String {
        if self.enabled() {
            "Remote administration is enabled.".to_string()
        } else {
            "Remote administration is disabled.".to_string()
        }
    }

    /// Replace the selection with one from an unattended profile.
    pub fn import(&mut self, profile: &RemoteProfile) {
        self.modes.clear();

        if profile.enabled {
            if profile.manager {
                self.enable_manager();
            } else {
                self.enable();
            }
            if profile.web {
                self.enable_web();
            }
        }

        self.proposed = true;
    }

    /// Export the selection for an unattended profile.
    pub fn export(&self) -> RemoteProfile {
        RemoteProfile {
            enabled: self.enabled(),
            manager: self.enabled_manager(),
            web: self.enabled_web(),
        }
    }
}
