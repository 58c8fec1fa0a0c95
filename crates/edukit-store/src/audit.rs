//! Hash-chained audit log of content writes
//!
//! Each event commits to its fields and to the previous event's hash, so
//! editing or dropping any entry breaks [`AuditLog::verify_integrity`].

use crate::error::AuditError;
use chrono::{DateTime, Utc};
use edukit_model::{ContentId, ContentStatus};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ulid::Ulid;

/// Sortable audit event id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Ulid);

impl EventId {
    /// Generate a new id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gateway operation that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// New content stored
    Create,
    /// Content overwritten
    Update,
    /// Status changed
    UpdateStatus,
}

impl AuditAction {
    fn tag(self) -> u8 {
        match self {
            AuditAction::Create => 0,
            AuditAction::Update => 1,
            AuditAction::UpdateStatus => 2,
        }
    }
}

/// One applied write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event id
    pub event_id: EventId,
    /// When the write was applied
    pub timestamp: DateTime<Utc>,
    /// Operation
    pub action: AuditAction,
    /// Content written
    pub content_id: ContentId,
    /// Status after the write
    pub status: ContentStatus,
    /// Hash of the previous event, zero for the first
    pub prev_hash: [u8; 32],
    /// Hash of this event
    pub hash: [u8; 32],
}

impl AuditEvent {
    /// Hex form of the event hash
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// Append-only, hash-chained event list
#[derive(Debug, Default)]
pub struct AuditLog {
    inner: Mutex<Vec<AuditEvent>>,
}

impl AuditLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a write and return its id
    pub fn record(
        &self,
        action: AuditAction,
        content_id: ContentId,
        status: ContentStatus,
    ) -> EventId {
        let mut guard = self.inner.lock();
        let mut event = AuditEvent {
            event_id: EventId::new(),
            timestamp: Utc::now(),
            action,
            content_id,
            status,
            prev_hash: guard.last().map_or([0u8; 32], |e| e.hash),
            hash: [0u8; 32],
        };
        event.hash = compute_hash(&event);
        tracing::debug!("Audit {:?} {} -> {}", action, content_id, event.hash_hex());
        let id = event.event_id;
        guard.push(event);
        id
    }

    /// Snapshot of all events
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.inner.lock().clone()
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hash of the newest event, hex encoded
    #[must_use]
    pub fn head(&self) -> Option<String> {
        self.inner.lock().last().map(AuditEvent::hash_hex)
    }

    /// Check every link and every event hash
    ///
    /// # Errors
    /// `AuditError::IntegrityViolation` at the first bad event.
    pub fn verify_integrity(&self) -> Result<(), AuditError> {
        verify_chain(&self.inner.lock())
    }
}

/// Verify a detached chain of events
///
/// # Errors
/// `AuditError::IntegrityViolation` at the first bad event.
pub fn verify_chain(events: &[AuditEvent]) -> Result<(), AuditError> {
    let mut prev = [0u8; 32];
    for (index, e) in events.iter().enumerate() {
        if e.prev_hash != prev || e.hash != compute_hash(e) {
            return Err(AuditError::IntegrityViolation { index });
        }
        prev = e.hash;
    }
    Ok(())
}

fn compute_hash(event: &AuditEvent) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(event.event_id.0.to_bytes());
    hasher.update(event.timestamp.to_rfc3339().as_bytes());
    hasher.update([0]);
    hasher.update([event.action.tag()]);
    hasher.update(event.content_id.0.as_bytes());
    hasher.update(event.status.as_str().as_bytes());
    hasher.update([0]);
    hasher.update(event.prev_hash);
    hasher.finalize().into()
}
