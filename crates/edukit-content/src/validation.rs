//! Pre-save validation
//!
//! Runs before any gateway call. Save is all-or-nothing at this boundary:
//! a draft either converts into [`ContentMetadata`] with at least one
//! non-empty variant, or nothing is persisted.

use crate::error::{MetadataField, ValidationError};
use edukit_model::{ContentMetadata, LearningStyle, MetadataDraft, VariantStore};

/// Required-field check for metadata drafts
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataValidator;

impl MetadataValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Required fields that are still empty, in form order
    #[must_use]
    pub fn missing_fields(&self, draft: &MetadataDraft) -> Vec<MetadataField> {
        let mut missing = Vec::new();
        if draft.title.trim().is_empty() {
            missing.push(MetadataField::Title);
        }
        if draft.description.trim().is_empty() {
            missing.push(MetadataField::Description);
        }
        if draft.key_stage.is_none() {
            missing.push(MetadataField::KeyStage);
        }
        if draft.subject.is_none() {
            missing.push(MetadataField::Subject);
        }
        missing
    }

    /// Convert a draft into validated metadata
    ///
    /// # Errors
    /// - `ValidationError::IncompleteMetadata` if title, description, key
    ///   stage or subject is missing
    /// - `ValidationError::InvalidDuration` if the duration is zero
    pub fn validate(&self, draft: &MetadataDraft) -> Result<ContentMetadata, ValidationError> {
        let missing = self.missing_fields(draft);
        let (Some(key_stage), Some(subject), true) =
            (draft.key_stage, draft.subject, missing.is_empty())
        else {
            return Err(ValidationError::IncompleteMetadata { missing });
        };
        validate_duration(draft.estimated_duration)?;

        Ok(ContentMetadata {
            id: draft.id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            key_stage,
            subject,
            topics: draft.topics.clone(),
            learning_objectives: draft.learning_objectives.clone(),
            keywords: draft.keywords.clone(),
            difficulty_level: draft.difficulty_level,
            content_type: draft.content_type,
            content_format: draft.content_format,
            estimated_duration: draft.estimated_duration,
            status: draft.status,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }
}

/// Validate a draft with the default validator
///
/// # Errors
/// See [`MetadataValidator::validate`].
pub fn validate_metadata(draft: &MetadataDraft) -> Result<ContentMetadata, ValidationError> {
    MetadataValidator::new().validate(draft)
}

/// Gate on the variant store: something must have been written
///
/// # Errors
/// `ValidationError::NoVariantContent` if every style is empty or
/// whitespace only.
pub fn validate_variants(variants: &VariantStore) -> Result<(), ValidationError> {
    if variants.has_any_content() {
        Ok(())
    } else {
        Err(ValidationError::NoVariantContent)
    }
}

/// Duration must be a positive number of minutes
///
/// # Errors
/// `ValidationError::InvalidDuration` for zero.
pub fn validate_duration(minutes: u32) -> Result<(), ValidationError> {
    if minutes == 0 {
        return Err(ValidationError::InvalidDuration);
    }
    Ok(())
}

/// Every URL must parse as an absolute URL
///
/// # Errors
/// `ValidationError::InvalidMediaUrl` naming the first bad entry.
pub fn validate_media_urls(style: LearningStyle, urls: &[String]) -> Result<(), ValidationError> {
    for raw in urls {
        if let Err(e) = url::Url::parse(raw) {
            return Err(ValidationError::InvalidMediaUrl {
                style,
                url: raw.clone(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}
