use crate::entities::designs::DesignStatus;

/// An admin's verdict on a design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

/// Status and reject reason a design should hold after a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub status: DesignStatus,
    pub reject_reason: Option<String>,
}

impl ReviewDecision {
    /// Computes the resulting state. The current status never blocks a
    /// decision: approve clears any earlier reason, reject overwrites it.
    #[must_use]
    pub fn apply(&self, _current: DesignStatus) -> ReviewOutcome {
        match self {
            Self::Approve => ReviewOutcome {
                status: DesignStatus::Approved,
                reject_reason: None,
            },
            Self::Reject { reason } => ReviewOutcome {
                status: DesignStatus::Rejected,
                reject_reason: Some(reason.clone()),
            },
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
        }
    }
}
