//! Content metadata
//!
//! [`MetadataDraft`] is what the editor mutates field by field; it may be
//! incomplete. [`ContentMetadata`] is the validated form that gets persisted.

use crate::curriculum::{
    ContentFormat, ContentStatus, ContentType, DifficultyLevel, KeyStage, Subject,
};
use crate::ids::ContentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default lesson length in minutes
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

/// Validated metadata of a curriculum content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    /// Assigned by the persistence gateway on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Key stage
    pub key_stage: KeyStage,
    /// Subject
    pub subject: Subject,
    /// Topics covered
    #[serde(default)]
    pub topics: Vec<String>,
    /// Learning objectives
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    /// Search keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Difficulty level
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    /// Content type
    #[serde(default)]
    pub content_type: ContentType,
    /// Content format
    #[serde(default)]
    pub content_format: ContentFormat,
    /// Estimated duration in minutes
    #[serde(default = "default_duration")]
    pub estimated_duration: u32,
    /// Editorial status
    #[serde(default)]
    pub status: ContentStatus,
    /// Creation time, set by the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentMetadata {
    /// Create metadata with the required fields and defaults for the rest
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        key_stage: KeyStage,
        subject: Subject,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            key_stage,
            subject,
            topics: Vec::new(),
            learning_objectives: Vec::new(),
            keywords: Vec::new(),
            difficulty_level: DifficultyLevel::default(),
            content_type: ContentType::default(),
            content_format: ContentFormat::default(),
            estimated_duration: DEFAULT_DURATION_MINUTES,
            status: ContentStatus::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// With topics
    #[inline]
    #[must_use]
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    /// With id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: ContentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether this metadata has been persisted at least once
    #[inline]
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Editable, possibly incomplete metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDraft {
    /// Id of the stored item this draft was opened from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Key stage
    #[serde(default)]
    pub key_stage: Option<KeyStage>,
    /// Subject
    #[serde(default)]
    pub subject: Option<Subject>,
    /// Topics covered
    #[serde(default)]
    pub topics: Vec<String>,
    /// Learning objectives
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    /// Search keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Difficulty level
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    /// Content type
    #[serde(default)]
    pub content_type: ContentType,
    /// Content format
    #[serde(default)]
    pub content_format: ContentFormat,
    /// Estimated duration in minutes
    #[serde(default = "default_duration")]
    pub estimated_duration: u32,
    /// Editorial status
    #[serde(default)]
    pub status: ContentStatus,
    /// Creation time of the stored item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time of the stored item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for MetadataDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            key_stage: None,
            subject: None,
            topics: Vec::new(),
            learning_objectives: Vec::new(),
            keywords: Vec::new(),
            difficulty_level: DifficultyLevel::default(),
            content_type: ContentType::default(),
            content_format: ContentFormat::default(),
            estimated_duration: DEFAULT_DURATION_MINUTES,
            status: ContentStatus::default(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<ContentMetadata> for MetadataDraft {
    fn from(m: ContentMetadata) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            key_stage: Some(m.key_stage),
            subject: Some(m.subject),
            topics: m.topics,
            learning_objectives: m.learning_objectives,
            keywords: m.keywords,
            difficulty_level: m.difficulty_level,
            content_type: m.content_type,
            content_format: m.content_format,
            estimated_duration: m.estimated_duration,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metadata_defaults() {
        let m = ContentMetadata::new("Fractions", "Intro", KeyStage::Ks2, Subject::Mathematics);
        assert_eq!(m.status, ContentStatus::Draft);
        assert_eq!(m.estimated_duration, DEFAULT_DURATION_MINUTES);
        assert!(!m.is_persisted());
    }

    #[test]
    fn metadata_uses_camel_case_on_the_wire() {
        let m = ContentMetadata::new("Fractions", "Intro", KeyStage::Ks2, Subject::Mathematics);
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["keyStage"], "KS2");
        assert_eq!(value["subject"], "MATHEMATICS");
        assert_eq!(value["estimatedDuration"], 30);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn draft_from_metadata_keeps_everything() {
        let id = ContentId::new();
        let m = ContentMetadata::new("Forces", "Pushes and pulls", KeyStage::Ks3, Subject::Science)
            .with_id(id)
            .with_status(ContentStatus::Review);
        let draft = MetadataDraft::from(m);
        assert_eq!(draft.id, Some(id));
        assert_eq!(draft.key_stage, Some(KeyStage::Ks3));
        assert_eq!(draft.subject, Some(Subject::Science));
        assert_eq!(draft.status, ContentStatus::Review);
    }

    #[test]
    fn empty_draft_deserializes() {
        let draft: MetadataDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(draft, MetadataDraft::default());
    }
}
