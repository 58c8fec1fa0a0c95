//! Aggregate assembly
//!
//! Turns validated metadata plus the variant store into the
//! [`CurriculumContent`] handed to the gateway, and back again when stored
//! content is reopened.

use chrono::{DateTime, Utc};
use edukit_model::{ContentMetadata, ContentVariant, CurriculumContent, LearningStyle, VariantStore};
use serde::{Deserialize, Serialize};

/// How the default variant of an aggregate is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultVariantPolicy {
    /// Always the visual slot, even when it is empty
    #[default]
    AlwaysVisual,
    /// First style with content in canonical order, visual if none
    FirstWithContent,
}

/// Builds aggregates from editor state
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAssembler {
    policy: DefaultVariantPolicy,
}

impl ContentAssembler {
    /// Create assembler with the given default-variant policy
    #[inline]
    #[must_use]
    pub fn new(policy: DefaultVariantPolicy) -> Self {
        Self { policy }
    }

    /// Active policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> DefaultVariantPolicy {
        self.policy
    }

    /// Assemble an aggregate
    ///
    /// Blank variants are dropped. `updated_at` is stamped with `now`.
    #[must_use]
    pub fn assemble(
        &self,
        mut metadata: ContentMetadata,
        variants: &VariantStore,
        now: DateTime<Utc>,
    ) -> CurriculumContent {
        metadata.updated_at = Some(now);
        CurriculumContent {
            metadata,
            variants: variants.non_empty().cloned().collect(),
            default_variant: self.default_variant(variants),
        }
    }

    fn default_variant(&self, variants: &VariantStore) -> ContentVariant {
        match self.policy {
            DefaultVariantPolicy::AlwaysVisual => variants.get(LearningStyle::Visual).clone(),
            DefaultVariantPolicy::FirstWithContent => variants
                .non_empty()
                .next()
                .unwrap_or_else(|| variants.get(LearningStyle::Visual))
                .clone(),
        }
    }
}

/// Split an aggregate back into metadata and a full variant store
///
/// Styles absent from the aggregate come back empty.
#[must_use]
pub fn decompose(content: &CurriculumContent) -> (ContentMetadata, VariantStore) {
    (
        content.metadata.clone(),
        VariantStore::from_variants(content.variants.iter().cloned()),
    )
}
