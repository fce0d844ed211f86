// Remote Admin Center - Installation Proposal Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Wizard-step integration of the remote access controller.

use anyhow::Result;
use serde::Serialize;

use crate::remote::RemoteAccess;

/// How the wizard presents this proposal step.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalDescription {
    pub rich_text_title: String,
    pub menu_title: String,
    pub id: String,
}

/// One rendered proposal.
#[derive(Debug, Clone, Serialize)]
pub struct Proposal {
    pub raw_proposal: Vec<String>,
}

/// Proposal client wrapping one configuration session.
pub struct RemoteProposal<'a> {
    remote: RemoteAccess<'a>,
}

impl<'a> RemoteProposal<'a> {
    pub fn new(remote: RemoteAccess<'a>) -> Self {
        Self { remote }
    }

    pub fn description(&self) -> ProposalDescription {
        ProposalDescription {
            rich_text_title: "VNC Remote Administration".to_string(),
            menu_title: "VNC Remote Administration".to_string(),
            id: "remote_admin".to_string(),
        }
    }

    /// Create a textual proposal, rereading the system on a forced reset.
    pub fn make_proposal(&mut self, force_reset: bool) -> Proposal {
        if force_reset {
            self.remote.reset();
        } else {
            self.remote.propose();
        }

        Proposal {
            raw_proposal: vec![self.remote.summary()],
        }
    }

    /// The session, for a front-end adjusting the selection.
    pub fn remote(&mut self) -> &mut RemoteAccess<'a> {
        &mut self.remote
    }

    pub fn write(&mut self) -> Result<()> {
        self.remote.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysconfig::REMOTE_ACCESS_KEY;
    use crate::testutil::{FakePackages, FakeServices, MemoryStore, RecordingReport};

    #[test]
    fn test_proposal_reflects_system_state() {
        let services =
            FakeServices::with_enabled(&["display-manager.service", "xvnc.socket"]);
        let packages = FakePackages::default();
        let mut store = MemoryStore::with_values(&[(REMOTE_ACCESS_KEY, "yes")]);
        let report = RecordingReport::default();

        let remote = RemoteAccess::new(&services, &packages, &mut store, &report);
        let mut proposal = RemoteProposal::new(remote);

        let rendered = proposal.make_proposal(false);
        assert_eq!(rendered.raw_proposal, vec!["Remote administration is enabled."]);
    }

    #[test]
    fn test_forced_reset_discards_the_selection() {
        let services = FakeServices::default();
        let packages = FakePackages::default();
        let mut store = MemoryStore::default();
        let report = RecordingReport::default();

        let remote = RemoteAccess::new(&services, &packages, &mut store, &report);
        let mut proposal = RemoteProposal::new(remote);

        proposal.remote().enable();
        assert!(proposal.remote().enabled());

        let rendered = proposal.make_proposal(true);
        assert_eq!(rendered.raw_proposal, vec!["Remote administration is disabled."]);
    }

    #[test]
    fn test_description_is_stable() {
        let services = FakeServices::default();
        let packages = FakePackages::default();
        let mut store = MemoryStore::default();
        let report = RecordingReport::default();

        let remote = RemoteAccess::new(&services, &packages, &mut store, &report);
        let proposal = RemoteProposal::new(remote);

        let description = proposal.description();
        assert_eq!(description.id, "remote_admin");
        assert!(description.rich_text_title.contains("VNC"));
    }
}
