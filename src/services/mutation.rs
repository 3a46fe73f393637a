//! Mutation kinds, their user-facing messages, and outcome reporting.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::services::notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    Delete,
    /// Carries the publish flag being set.
    TogglePublish(bool),
    MarkDelivered,
}

impl MutationKind {
    /// Generic message used when the server supplies none.
    pub fn failure_message(&self, noun: &str) -> String {
        match self {
            Self::Create => format!("Failed to create {noun}"),
            Self::Delete => format!("Failed to delete {noun}"),
            Self::TogglePublish(_) => format!("Failed to update {noun}"),
            Self::MarkDelivered => format!("Failed to mark {noun} as delivered"),
        }
    }

    pub fn success_message(&self, noun: &str) -> String {
        let noun = capitalize(noun);
        match self {
            Self::Create => format!("{noun} created"),
            Self::Delete => format!("{noun} deleted"),
            Self::TogglePublish(true) => format!("{noun} published"),
            Self::TogglePublish(false) => format!("{noun} moved to drafts"),
            Self::MarkDelivered => format!("{noun} marked as delivered"),
        }
    }
}

/// The mutation currently awaiting a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    /// Item id; empty for creates.
    pub target: String,
    pub kind: MutationKind,
}

/// Result of a mutation request as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Backend accepted the mutation; the collection was refetched.
    Applied,
    /// Backend rejected it; the message was shown to the user.
    Failed { message: String },
    /// Not issued: the view state did not allow it.
    Rejected { reason: String },
    /// Backend answered after the view was unmounted.
    Discarded,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Turn a backend result into exactly one notification.
pub(crate) fn report(
    notifier: &dyn Notifier,
    collection: &str,
    noun: &str,
    pending: &PendingMutation,
    result: &Result<(), AppError>,
) -> Option<String> {
    match result {
        Ok(()) => {
            tracing::info!(
                collection,
                id = %pending.target,
                kind = ?pending.kind,
                "Mutation applied"
            );
            notifier.notify(Notification::success(pending.kind.success_message(noun)));
            None
        }
        Err(e) => {
            tracing::warn!(
                collection,
                id = %pending.target,
                kind = ?pending.kind,
                error = %e,
                "Mutation failed"
            );
            let message = e.user_message(&pending.kind.failure_message(noun));
            notifier.notify(Notification::error(message.clone()));
            Some(message)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
