//! Editorial status rules
//!
//! The editor only ever moves content into `Review`. `Approved` and
//! `Published` are set elsewhere on the platform, so no editor action leads
//! into them.

use edukit_model::ContentStatus;

/// User action that persists the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Save without touching status
    SaveDraft,
    /// Save and move to review
    SubmitForReview,
}

/// What a save has to do with the status field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Status written with the content
    pub target: ContentStatus,
    /// Whether a separate status call must follow the content write
    pub status_call: bool,
}

/// Plan the status side of an editor action
///
/// A submit forces `Review`; content that already exists with another
/// status additionally gets an explicit status update after the content
/// write. New content is created directly in its target status.
#[must_use]
pub fn plan(current: ContentStatus, persisted: bool, action: EditorAction) -> TransitionPlan {
    match action {
        EditorAction::SaveDraft => TransitionPlan {
            target: current,
            status_call: false,
        },
        EditorAction::SubmitForReview => TransitionPlan {
            target: ContentStatus::Review,
            status_call: persisted && current != ContentStatus::Review,
        },
    }
}

/// Statuses the editor may move content into from `from`
#[must_use]
pub fn allowed_transitions(from: ContentStatus) -> Vec<ContentStatus> {
    use ContentStatus::*;
    match from {
        Draft | Approved | Published => vec![Review],
        Review => vec![],
    }
}

/// Check an editor-driven status change
///
/// Keeping the current status is always allowed.
#[must_use]
pub fn is_allowed(from: ContentStatus, to: ContentStatus) -> bool {
    from == to || allowed_transitions(from).contains(&to)
}
