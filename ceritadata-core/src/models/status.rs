//! Publication workflow states.

use serde::{Deserialize, Serialize};

/// Publication status of a story.
///
/// The workflow is `Draft -> PendingApproval -> Published`, with
/// rejection sending a pending story back to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    /// Being edited; not visible to readers.
    Draft,
    /// Submitted, waiting for an approver.
    PendingApproval,
    /// Live on the public site.
    Published,
}

impl StoryStatus {
    /// Returns the display label for this status.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingApproval => "In Review",
            Self::Published => "Published",
        }
    }

    /// Returns the wire name for this status.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Published => "published",
        }
    }

    /// Returns all statuses, in workflow order.
    pub fn all() -> &'static [StoryStatus] {
        &[Self::Draft, Self::PendingApproval, Self::Published]
    }

    /// Parses a wire name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.wire_name() == name)
    }

    /// True if the workflow allows moving from this status to `next`.
    ///
    /// Allowed edges: draft submits for approval, a pending story is
    /// approved (published) or rejected (back to draft).
    pub fn can_transition_to(&self, next: StoryStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::PendingApproval)
                | (Self::PendingApproval, Self::Published)
                | (Self::PendingApproval, Self::Draft)
        )
    }

    /// True if the story can be submitted for approval.
    pub fn can_submit_for_approval(&self) -> bool {
        self.can_transition_to(Self::PendingApproval)
    }
}

impl Default for StoryStatus {
    fn default() -> Self {
        Self::Draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_edges() {
        use StoryStatus::{Draft, PendingApproval, Published};

        assert!(Draft.can_transition_to(PendingApproval));
        assert!(PendingApproval.can_transition_to(Published));
        assert!(PendingApproval.can_transition_to(Draft));

        assert!(!Draft.can_transition_to(Published));
        assert!(!Published.can_transition_to(Draft));
        assert!(!Published.can_transition_to(PendingApproval));
        assert!(!Draft.can_transition_to(Draft));
    }

    #[test]
    fn only_draft_submits() {
        assert!(StoryStatus::Draft.can_submit_for_approval());
        assert!(!StoryStatus::PendingApproval.can_submit_for_approval());
        assert!(!StoryStatus::Published.can_submit_for_approval());
    }

    #[test]
    fn wire_names_round_trip() {
        for status in StoryStatus::all() {
            assert_eq!(
                StoryStatus::from_wire_name(status.wire_name()),
                Some(*status)
            );
        }
    }
}
