//! Curriculum content aggregate

use crate::curriculum::{ContentStatus, LearningStyle};
use crate::ids::ContentId;
use crate::metadata::ContentMetadata;
use crate::variants::ContentVariant;
use serde::{Deserialize, Serialize};

/// Persistable unit: metadata, the non-empty variants and a default variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumContent {
    /// Metadata
    pub metadata: ContentMetadata,
    /// Variants with content, in canonical style order
    pub variants: Vec<ContentVariant>,
    /// Variant shown when no learning style preference applies
    pub default_variant: ContentVariant,
}

impl CurriculumContent {
    /// Id, once persisted
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<ContentId> {
        self.metadata.id
    }

    /// Editorial status
    #[inline]
    #[must_use]
    pub fn status(&self) -> ContentStatus {
        self.metadata.status
    }

    /// Variant for a style, if it was persisted
    #[must_use]
    pub fn variant(&self, style: LearningStyle) -> Option<&ContentVariant> {
        self.variants.iter().find(|v| v.learning_style == style)
    }

    /// Styles that carry content
    #[must_use]
    pub fn styles(&self) -> Vec<LearningStyle> {
        self.variants.iter().map(|v| v.learning_style).collect()
    }
}
