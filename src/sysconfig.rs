// Remote Admin Center - Sysconfig Store
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Key-value access to /etc/sysconfig files.
//!
//! Sysconfig files are flat `KEY="value"` line files with shell-style
//! comments. [`SysconfigFile`] keeps every line it does not understand
//! verbatim, so rewriting a file touches only the keys that changed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Sysconfig file holding the display manager configuration.
pub const DISPLAYMANAGER_PATH: &str = "/etc/sysconfig/displaymanager";

/// Key controlling whether the display manager accepts remote connections.
pub const REMOTE_ACCESS_KEY: &str = "DISPLAYMANAGER_REMOTE_ACCESS";

/// Key controlling whether root may log in over a remote connection.
pub const ROOT_LOGIN_REMOTE_KEY: &str = "DISPLAYMANAGER_ROOT_LOGIN_REMOTE";

/// Abstract key-value system configuration store.
///
/// The controller only depends on this trait; the host configuration
/// layer owns the on-disk format.
pub trait SysconfigStore {
    /// Read a key, `None` when absent.
    fn read(&self, key: &str) -> Option<String>;

    /// Stage a new value for a key.
    fn set(&mut self, key: &str, value: &str);

    /// Persist staged values.
    fn flush(&mut self) -> Result<()>;
}

/// One line of a sysconfig file.
#[derive(Debug, Clone)]
enum Line {
    /// Comment, blank line, or anything else we leave untouched.
    Raw(String),
    /// A `KEY="value"` assignment.
    Entry { key: String, value: String },
}

/// A parsed `/etc/sysconfig` file.
#[derive(Debug)]
pub struct SysconfigFile {
    path: PathBuf,
    lines: Vec<Line>,
    dirty: bool,
}

impl SysconfigFile {
    /// Load a sysconfig file, degrading to an empty view when unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let lines = match fs::read_to_string(&path) {
            Ok(content) => content.lines().map(parse_line).collect(),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        };

        Self {
            path,
            lines,
            dirty: false,
        }
    }

    /// Load the display manager sysconfig file from its standard location.
    pub fn display_manager() -> Self {
        Self::load(DISPLAYMANAGER_PATH)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Raw(raw) => out.push_str(raw),
                Line::Entry { key, value } => {
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl SysconfigStore for SysconfigFile {
    fn read(&self, key: &str) -> Option<String> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Entry { key: k, value } if k == key => Some(value.clone()),
            _ => None,
        })
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.read(key).as_deref() == Some(value) {
            return;
        }

        let existing = self.lines.iter_mut().find_map(|line| match line {
            Line::Entry { key: k, value } if k == key => Some(value),
            _ => None,
        });

        match existing {
            Some(slot) => *slot = value.to_string(),
            None => self.lines.push(Line::Entry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
        self.dirty = true;
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        fs::write(&self.path, self.render())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.dirty = false;
        Ok(())
    }
}

fn parse_line(line: &str) -> Line {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Raw(line.to_string());
    }

    match trimmed.split_once('=') {
        Some((key, value)) if is_key(key) => Line::Entry {
            key: key.to_string(),
            value: unquote(value).to_string(),
        },
        _ => Line::Raw(line.to_string()),
    }
}

fn is_key(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
        })
        .unwrap_or(value)
}
