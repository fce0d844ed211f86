// Remote Admin Center - Clients Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Invocation surface of the configuration module.
//!
//! A front-end (or the command line) talks to the controller through these
//! clients; they own the real system collaborators.

mod proposal;
mod remote;

pub use proposal::{Proposal, ProposalDescription, RemoteProposal};
pub use remote::RemoteClient;

use anyhow::{bail, Result};

/// What the module was invoked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the current remote administration status.
    Status,
    /// Allow remote administration.
    Allow { manager: bool, web: bool },
    /// Disallow remote administration.
    Disallow,
    /// Produce the installation proposal text.
    Proposal,
    /// Apply the remote section of an unattended profile.
    Import { path: String },
    /// Print the remote section for an unattended profile.
    Export,
}

/// Parse the module invocation arguments.
pub fn parse(args: &[String]) -> Result<Action> {
    let mut words = args.iter().map(String::as_str);

    let action = match words.next() {
        None | Some("status") => Action::Status,
        Some("allow") => {
            let mut manager = false;
            let mut web = false;
            for word in words.by_ref() {
                match word {
                    "--manager" => manager = true,
                    "--web" => web = true,
                    other => bail!("Unknown option for allow: {}", other),
                }
            }
            Action::Allow { manager, web }
        }
        Some("disallow") => Action::Disallow,
        Some("proposal") => Action::Proposal,
        Some("import") => match words.next() {
            Some(path) => Action::Import { path: path.to_string() },
            None => bail!("import needs a profile file"),
        },
        Some("export") => Action::Export,
        Some(other) => bail!("Unknown action: {}", other),
    };

    if let Some(extra) = words.next() {
        bail!("Unexpected argument: {}", extra);
    }

    Ok(action)
}
