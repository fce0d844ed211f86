// Remote Admin Center - Main Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Remote Admin Center - remote administration (VNC) configuration for Linux.

use tracing::error;

mod clients;
mod firewall;
mod modes;
mod packages;
mod profile;
mod remote;
mod report;
mod sysconfig;
mod systemd;

#[cfg(test)]
mod testutil;

use clients::RemoteClient;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match clients::parse(&args) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "Usage: remote-admin-center [status|allow [--manager] [--web]|disallow|proposal|import <profile>|export]"
            );
            std::process::exit(2);
        }
    };

    let mut client = RemoteClient::new();
    if let Err(e) = client.run(action) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
