// Remote Admin Center - Test Fakes
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! In-memory collaborator fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Result};

use crate::packages::PackageManager;
use crate::report::ReportSink;
use crate::sysconfig::SysconfigStore;
use crate::systemd::ServiceManager;

/// Service manager fake recording every lifecycle call.
#[derive(Debug, Default)]
pub struct FakeServices {
    enabled: RefCell<HashSet<String>>,
    active: RefCell<HashSet<String>>,
    log: RefCell<Vec<String>>,
    failing: HashSet<String>,
}

impl FakeServices {
    pub fn with_enabled(units: &[&str]) -> Self {
        let fake = Self::default();
        for unit in units {
            fake.enabled.borrow_mut().insert(unit.to_string());
        }
        fake
    }

    /// Mark a logged operation (e.g. "restart xvnc.socket") as failing.
    pub fn fail_on(&mut self, operation: &str) {
        self.failing.insert(operation.to_string());
    }

    pub fn set_active(&self, unit: &str) {
        self.active.borrow_mut().insert(unit.to_string());
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn record(&self, action: &str, unit: &str) -> Result<()> {
        let entry = format!("{} {}", action, unit);
        self.log.borrow_mut().push(entry.clone());
        if self.failing.contains(&entry) {
            return Err(anyhow!("{} failed", entry));
        }
        Ok(())
    }
}

impl ServiceManager for FakeServices {
    fn enabled(&self, unit: &str) -> bool {
        self.enabled.borrow().contains(unit)
    }

    fn active(&self, unit: &str) -> bool {
        self.active.borrow().contains(unit)
    }

    fn enable(&self, unit: &str) -> Result<()> {
        self.record("enable", unit)?;
        self.enabled.borrow_mut().insert(unit.to_string());
        Ok(())
    }

    fn disable(&self, unit: &str) -> Result<()> {
        self.record("disable", unit)?;
        self.enabled.borrow_mut().remove(unit);
        Ok(())
    }

    fn restart(&self, unit: &str) -> Result<()> {
        self.record("restart", unit)
    }

    fn stop(&self, unit: &str) -> Result<()> {
        self.record("stop", unit)
    }

    fn reload(&self, unit: &str) -> Result<()> {
        self.record("reload", unit)
    }

    fn set_default_target(&self, target: &str) -> Result<()> {
        self.record("set-default", target)
    }
}

/// Package manager fake with a fixed installed set.
#[derive(Debug, Default)]
pub struct FakePackages {
    installed: HashSet<String>,
    fail_install: bool,
    installs: RefCell<Vec<Vec<String>>>,
}

impl FakePackages {
    pub fn with_installed(packages: &[&str]) -> Self {
        Self {
            installed: packages.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_install: true,
            ..Self::default()
        }
    }

    pub fn installs(&self) -> Vec<Vec<String>> {
        self.installs.borrow().clone()
    }
}

impl PackageManager for FakePackages {
    fn installed(&self, packages: &[&str]) -> bool {
        packages.iter().all(|pkg| self.installed.contains(*pkg))
    }

    fn install(&self, packages: &[&str]) -> Result<()> {
        self.installs
            .borrow_mut()
            .push(packages.iter().map(|p| p.to_string()).collect());
        if self.fail_install {
            return Err(anyhow!("installation failed"));
        }
        Ok(())
    }
}

/// Sysconfig store fake backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    flushes: usize,
}

impl MemoryStore {
    pub fn with_values(values: &[(&str, &str)]) -> Self {
        Self {
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            flushes: 0,
        }
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl SysconfigStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Report sink fake collecting everything it is handed.
#[derive(Debug, Default)]
pub struct RecordingReport {
    errors: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
    messages: RefCell<Vec<String>>,
}

impl RecordingReport {
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }
}

impl ReportSink for RecordingReport {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn message(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
