// Remote Admin Center - Package Management
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Package installation and queries.
//!
//! Queries go through the rpm database directly; installation runs zypper
//! under pkexec so Polkit handles the authentication, mirroring how the
//! service lifecycle commands are run.

use anyhow::{anyhow, Context, Result};
use tracing::info;

/// Abstract package manager.
pub trait PackageManager {
    /// Are all of the given packages installed?
    fn installed(&self, packages: &[&str]) -> bool;

    /// Install the given packages, skipping ones already present.
    fn install(&self, packages: &[&str]) -> Result<()>;
}

/// Package manager backed by rpm and zypper.
#[derive(Debug, Default)]
pub struct ZypperClient;

impl ZypperClient {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for ZypperClient {
    fn installed(&self, packages: &[&str]) -> bool {
        if packages.is_empty() {
            return true;
        }

        // rpm -q exits non-zero when any queried package is missing
        std::process::Command::new("rpm")
            .arg("-q")
            .args(packages)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn install(&self, packages: &[&str]) -> Result<()> {
        let missing: Vec<&str> = packages
            .iter()
            .copied()
            .filter(|pkg| !self.installed(&[*pkg]))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        info!("Installing packages: {}", missing.join(", "));

        let output = std::process::Command::new("pkexec")
            .args(["zypper", "--non-interactive", "install"])
            .args(&missing)
            .output()
            .context("Failed to execute pkexec zypper install")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("dismissed") || stderr.contains("cancelled") || output.status.code() == Some(126) {
                return Err(anyhow!("Authentication cancelled"));
            }
            return Err(anyhow!(
                "Failed to install packages {}: {}",
                missing.join(", "),
                stderr
            ));
        }

        info!("Installed {} package(s)", missing.len());
        Ok(())
    }
}
