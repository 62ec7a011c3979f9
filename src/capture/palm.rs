use crate::capture::model::{Contact, PointerKind};
use serde::{Deserialize, Serialize};

pub const STRICT_MAX_EXTENT: f32 = 5.0;
pub const AREA_FILTERED_MAX_EXTENT: f32 = 25.0;

/// Palm rejection policy applied to every down and move event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionPolicy {
    /// Only pen and mouse contacts may draw; touch is always rejected.
    Strict { max_extent: f32 },
    /// Touch may draw as long as its footprint stays within `max_extent`.
    AreaFiltered { max_extent: f32 },
}

impl Default for RejectionPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    PointerKind,
    Footprint,
}

impl RejectionPolicy {
    pub const fn strict() -> Self {
        Self::Strict {
            max_extent: STRICT_MAX_EXTENT,
        }
    }

    pub const fn area_filtered() -> Self {
        Self::AreaFiltered {
            max_extent: AREA_FILTERED_MAX_EXTENT,
        }
    }

    pub fn max_extent(&self) -> f32 {
        match *self {
            Self::Strict { max_extent } | Self::AreaFiltered { max_extent } => max_extent,
        }
    }

    pub fn allows_kind(&self, kind: PointerKind) -> bool {
        match self {
            Self::Strict { .. } => matches!(kind, PointerKind::Pen | PointerKind::Mouse),
            Self::AreaFiltered { .. } => true,
        }
    }

    pub fn check(&self, contact: &Contact) -> Result<(), RejectReason> {
        if !self.allows_kind(contact.kind) {
            return Err(RejectReason::PointerKind);
        }
        if contact.footprint_extent() > self.max_extent() {
            return Err(RejectReason::Footprint);
        }
        Ok(())
    }

    pub fn accepts(&self, contact: &Contact) -> bool {
        self.check(contact).is_ok()
    }
}
