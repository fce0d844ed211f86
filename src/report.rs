// Remote Admin Center - Report Sink
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! User-visible error and warning reporting.
//!
//! Configuration operations never abort on a service or firewall failure;
//! they hand the message to a [`ReportSink`] and keep going. A front-end
//! supplies its own sink (dialog, notification banner); the default sink
//! forwards everything to the log.

use tracing::{error, info, warn};

/// Destination for messages that must reach the user.
pub trait ReportSink {
    /// An operation failed and the user should know about it.
    fn error(&self, message: &str);

    /// Something needs the user's attention but nothing failed.
    fn warning(&self, message: &str);

    /// Informational progress message.
    fn message(&self, message: &str);
}

/// Report sink that forwards to the tracing log.
#[derive(Debug, Default)]
pub struct LogReport;

impl ReportSink for LogReport {
    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn warning(&self, message: &str) {
        warn!("{}", message);
    }

    fn message(&self, message: &str) {
        info!("{}", message);
    }
}

/// Canned message for a failed service restart.
pub fn cannot_restart_service(service: &str) -> String {
    format!("Cannot restart service '{}'", service)
}

/// Canned message for a failed service stop.
pub fn cannot_stop_service(service: &str) -> String {
    format!("Cannot stop service '{}'", service)
}

/// Advice shown after remote access settings changed under a live session.
pub fn display_manager_restart_notice() -> String {
    "Your display manager must be restarted.\n\
     To take the changes in remote administration into account,\n\
     please restart it manually or log out and log in again."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_messages_name_the_unit() {
        assert_eq!(
            cannot_restart_service("display-manager.service"),
            "Cannot restart service 'display-manager.service'"
        );
        assert!(cannot_stop_service("vncmanager").contains("vncmanager"));
    }
}
