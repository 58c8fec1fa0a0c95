//! Error types for content editing
//!
//! - Validation failures, caught before any gateway call
//! - Gateway rejections, surfaced as-is
//! - Partially applied submissions (content saved, status not)

use edukit_model::{ContentId, ContentStatus, LearningStyle};
use std::fmt;

/// Editor section the user should be sent to after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorSection {
    /// Metadata form
    Metadata,
    /// Content tab for one learning style
    Variant(LearningStyle),
}

impl fmt::Display for EditorSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorSection::Metadata => f.write_str("metadata"),
            EditorSection::Variant(style) => write!(f, "variant:{style}"),
        }
    }
}

/// Required metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// Title
    Title,
    /// Description
    Description,
    /// Key stage
    KeyStage,
    /// Subject
    Subject,
}

impl MetadataField {
    /// Wire name of the field
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetadataField::Title => "title",
            MetadataField::Description => "description",
            MetadataField::KeyStage => "keyStage",
            MetadataField::Subject => "subject",
        }
    }
}

fn field_list(fields: &[MetadataField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Draft rejected before persistence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required metadata fields are empty
    #[error("required metadata incomplete: {}", field_list(.missing))]
    IncompleteMetadata {
        /// Fields that failed the check
        missing: Vec<MetadataField>,
    },

    /// Every learning-style variant is empty
    #[error("no learning-style variant has content")]
    NoVariantContent,

    /// Duration of zero minutes
    #[error("estimated duration must be at least one minute")]
    InvalidDuration,

    /// Media URL that does not parse
    #[error("invalid media url for {style}: '{url}' ({reason})")]
    InvalidMediaUrl {
        /// Variant holding the URL
        style: LearningStyle,
        /// Rejected URL
        url: String,
        /// Parser message
        reason: String,
    },
}

impl ValidationError {
    /// Section to focus in the editor
    ///
    /// An empty variant store always points at the visual tab, whichever
    /// style the author meant to fill.
    #[must_use]
    pub fn section(&self) -> EditorSection {
        match self {
            ValidationError::IncompleteMetadata { .. } | ValidationError::InvalidDuration => {
                EditorSection::Metadata
            }
            ValidationError::NoVariantContent => EditorSection::Variant(LearningStyle::Visual),
            ValidationError::InvalidMediaUrl { style, .. } => EditorSection::Variant(*style),
        }
    }
}

/// Classification of a gateway failure, for logs only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Target does not exist
    NotFound,
    /// Request refused
    Rejected,
    /// Backend unreachable
    Unavailable,
}

/// Persistence gateway rejection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// No content with this id
    #[error("content not found: {0}")]
    NotFound(ContentId),

    /// The gateway refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The gateway could not be reached
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Failure class
    #[inline]
    #[must_use]
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            GatewayError::NotFound(_) => GatewayErrorKind::NotFound,
            GatewayError::Rejected(_) => GatewayErrorKind::Rejected,
            GatewayError::Unavailable(_) => GatewayErrorKind::Unavailable,
        }
    }
}

/// Main editor error type
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Draft failed validation; nothing was sent
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Gateway rejected the content write
    #[error("save failed: {0}")]
    Gateway(#[from] GatewayError),

    /// Content was written but the follow-up status change was not
    #[error("content {id} saved but status change to {status} failed: {source}")]
    PartiallyApplied {
        /// Saved content
        id: ContentId,
        /// Status that still has to be applied
        status: ContentStatus,
        /// Gateway failure of the status call
        #[source]
        source: GatewayError,
    },

    /// Status retry requested with nothing outstanding
    #[error("no status change is pending")]
    NothingPending,
}

impl EditorError {
    /// Section to focus in the editor, for validation failures
    #[must_use]
    pub fn section(&self) -> Option<EditorSection> {
        match self {
            EditorError::Validation(e) => Some(e.section()),
            _ => None,
        }
    }

    /// Check whether the content write already happened
    #[inline]
    #[must_use]
    pub fn is_partially_applied(&self) -> bool {
        matches!(self, Self::PartiallyApplied { .. })
    }

    /// Check whether any gateway call was made before the failure
    #[inline]
    #[must_use]
    pub fn reached_gateway(&self) -> bool {
        matches!(self, Self::Gateway(_) | Self::PartiallyApplied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_metadata_lists_fields() {
        let err = ValidationError::IncompleteMetadata {
            missing: vec![MetadataField::Title, MetadataField::KeyStage],
        };
        assert_eq!(
            err.to_string(),
            "required metadata incomplete: title, keyStage"
        );
        assert_eq!(err.section(), EditorSection::Metadata);
    }

    #[test]
    fn no_content_points_at_visual_tab() {
        assert_eq!(
            ValidationError::NoVariantContent.section(),
            EditorSection::Variant(LearningStyle::Visual)
        );
    }

    #[test]
    fn media_url_error_points_at_its_variant() {
        let err = ValidationError::InvalidMediaUrl {
            style: LearningStyle::Kinesthetic,
            url: "nope".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(err.section(), EditorSection::Variant(LearningStyle::Kinesthetic));
    }

    #[test]
    fn editor_error_classification() {
        let validation = EditorError::from(ValidationError::NoVariantContent);
        assert!(!validation.reached_gateway());
        assert!(validation.section().is_some());

        let gateway = EditorError::from(GatewayError::Unavailable("down".into()));
        assert!(gateway.reached_gateway());
        assert!(!gateway.is_partially_applied());
        assert_eq!(gateway.section(), None);

        let partial = EditorError::PartiallyApplied {
            id: ContentId::new(),
            status: ContentStatus::Review,
            source: GatewayError::Rejected("busy".into()),
        };
        assert!(partial.is_partially_applied());
        assert!(partial.to_string().contains("REVIEW"));
    }

    #[test]
    fn gateway_error_kind() {
        let id = ContentId::new();
        assert_eq!(GatewayError::NotFound(id).kind(), GatewayErrorKind::NotFound);
        assert_eq!(
            GatewayError::Rejected("x".into()).kind(),
            GatewayErrorKind::Rejected
        );
    }

    #[test]
    fn section_display() {
        assert_eq!(EditorSection::Metadata.to_string(), "metadata");
        assert_eq!(
            EditorSection::Variant(LearningStyle::ReadWrite).to_string(),
            "variant:READ_WRITE"
        );
    }
}
