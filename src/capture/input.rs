use crate::capture::model::{Contact, ContactId, Tool};
use crate::capture::palm::{RejectReason, RejectionPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another contact is already drawing.
    Busy,
    /// The event belongs to a contact that is not the active drawing contact.
    NotActive,
    /// The active contact failed palm rejection mid-stroke.
    StrokeSuspended,
    /// The surface is minimized or waiting for a resize restore.
    InputDisabled,
}

/// What the surface should do with the raster in response to one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Started { at: (f32, f32), tool: Tool },
    Extended { from: (f32, f32), to: (f32, f32), tool: Tool },
    /// The active contact grew past the footprint threshold; no more ink until it lifts.
    Suspended(RejectReason),
    Ended { cancelled: bool },
    Rejected(RejectReason),
    Ignored(IgnoreReason),
}

impl InputOutcome {
    pub fn produces_ink(&self) -> bool {
        matches!(self, Self::Started { .. } | Self::Extended { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveStroke {
    contact: ContactId,
    last: (f32, f32),
    suspended: bool,
}

/// Contact lifecycle counters; `accepted_downs` and `releases` differ by at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactStats {
    pub accepted_downs: u64,
    pub releases: u64,
    pub rejected: u64,
    pub ignored: u64,
}

/// Single-stroke pointer state machine.
///
/// Owns the active contact marker, the current tool and the rejection policy.
/// It never touches pixels; the capture surface turns its outcomes into ink.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureInput {
    tool: Tool,
    policy: RejectionPolicy,
    active: Option<ActiveStroke>,
    stats: ContactStats,
}

impl CaptureInput {
    pub fn new(tool: Tool, policy: RejectionPolicy) -> Self {
        Self {
            tool,
            policy,
            active: None,
            stats: ContactStats::default(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn policy(&self) -> RejectionPolicy {
        self.policy
    }

    pub fn stats(&self) -> ContactStats {
        self.stats
    }

    pub fn active_contact(&self) -> Option<ContactId> {
        self.active.map(|stroke| stroke.contact)
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some_and(|stroke| !stroke.suspended)
    }

    /// Takes effect on the remaining segments of a stroke in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_policy(&mut self, policy: RejectionPolicy) {
        self.policy = policy;
    }

    pub fn handle_down(&mut self, contact: &Contact) -> InputOutcome {
        if let Err(reason) = self.policy.check(contact) {
            self.stats.rejected += 1;
            return InputOutcome::Rejected(reason);
        }
        if self.active.is_some() {
            self.stats.ignored += 1;
            return InputOutcome::Ignored(IgnoreReason::Busy);
        }

        self.active = Some(ActiveStroke {
            contact: contact.id,
            last: contact.position,
            suspended: false,
        });
        self.stats.accepted_downs += 1;
        InputOutcome::Started {
            at: contact.position,
            tool: self.tool,
        }
    }

    pub fn handle_move(&mut self, contact: &Contact) -> InputOutcome {
        let tool = self.tool;
        let policy = self.policy;
        let Some(stroke) = self.active.as_mut().filter(|s| s.contact == contact.id) else {
            self.stats.ignored += 1;
            return InputOutcome::Ignored(IgnoreReason::NotActive);
        };
        if stroke.suspended {
            self.stats.ignored += 1;
            return InputOutcome::Ignored(IgnoreReason::StrokeSuspended);
        }
        if let Err(reason) = policy.check(contact) {
            stroke.suspended = true;
            return InputOutcome::Suspended(reason);
        }

        let from = stroke.last;
        stroke.last = contact.position;
        InputOutcome::Extended {
            from,
            to: contact.position,
            tool,
        }
    }

    pub fn handle_up(&mut self, contact: &Contact) -> InputOutcome {
        self.release(contact.id, false)
    }

    pub fn handle_cancel(&mut self, contact: &Contact) -> InputOutcome {
        self.release(contact.id, true)
    }

    /// Drops the active marker without waiting for the platform's up event.
    pub fn abort_active(&mut self) -> bool {
        match self.active.take() {
            Some(_) => {
                self.stats.releases += 1;
                true
            }
            None => false,
        }
    }

    fn release(&mut self, id: ContactId, cancelled: bool) -> InputOutcome {
        if self.active_contact() != Some(id) {
            self.stats.ignored += 1;
            return InputOutcome::Ignored(IgnoreReason::NotActive);
        }
        self.active = None;
        self.stats.releases += 1;
        InputOutcome::Ended { cancelled }
    }
}
