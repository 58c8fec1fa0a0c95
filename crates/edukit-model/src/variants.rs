//! Learning-style variants
//!
//! A [`VariantStore`] always holds exactly one [`ContentVariant`] per
//! [`LearningStyle`]; the slot array is indexed by style so duplicates cannot
//! be represented.

use crate::curriculum::LearningStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of content written for one learning style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVariant {
    /// Learning style this body targets
    pub learning_style: LearningStyle,
    /// Content body, may be empty while editing
    #[serde(default)]
    pub content: String,
    /// Attached media
    #[serde(default)]
    pub media_urls: Vec<String>,
}

impl ContentVariant {
    /// Empty variant for a style
    #[inline]
    #[must_use]
    pub fn empty(learning_style: LearningStyle) -> Self {
        Self {
            learning_style,
            content: String::new(),
            media_urls: Vec::new(),
        }
    }

    /// Variant with a body
    #[inline]
    #[must_use]
    pub fn new(learning_style: LearningStyle, content: impl Into<String>) -> Self {
        Self {
            learning_style,
            content: content.into(),
            media_urls: Vec::new(),
        }
    }

    /// With media URLs
    #[inline]
    #[must_use]
    pub fn with_media(mut self, urls: Vec<String>) -> Self {
        self.media_urls = urls;
        self
    }

    /// True when the body is empty or whitespace only
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Per-style body as it appears in the keyed wire form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantBody {
    /// Content body
    #[serde(default)]
    pub content: String,
    /// Attached media
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Keyed wire form of a [`VariantStore`]
pub type VariantMap = BTreeMap<LearningStyle, VariantBody>;

/// One variant slot per learning style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VariantMap", into = "VariantMap")]
pub struct VariantStore {
    slots: [ContentVariant; LearningStyle::COUNT],
}

impl VariantStore {
    /// Store with every style empty
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [
                ContentVariant::empty(LearningStyle::Visual),
                ContentVariant::empty(LearningStyle::Auditory),
                ContentVariant::empty(LearningStyle::Kinesthetic),
                ContentVariant::empty(LearningStyle::ReadWrite),
            ],
        }
    }

    /// Build a store from variants; a later entry for the same style wins
    #[must_use]
    pub fn from_variants(variants: impl IntoIterator<Item = ContentVariant>) -> Self {
        let mut store = Self::new();
        for v in variants {
            let i = v.learning_style.index();
            store.slots[i] = v;
        }
        store
    }

    /// Replace the body of a style
    pub fn set_content(&mut self, style: LearningStyle, text: impl Into<String>) {
        self.slots[style.index()].content = text.into();
    }

    /// Replace the media list of a style
    pub fn set_media_urls(&mut self, style: LearningStyle, urls: Vec<String>) {
        self.slots[style.index()].media_urls = urls;
    }

    /// Variant for a style
    #[inline]
    #[must_use]
    pub fn get(&self, style: LearningStyle) -> &ContentVariant {
        &self.slots[style.index()]
    }

    /// True iff at least one style has non-whitespace content
    #[inline]
    #[must_use]
    pub fn has_any_content(&self) -> bool {
        self.slots.iter().any(|v| !v.is_blank())
    }

    /// Non-blank variants in canonical style order
    pub fn non_empty(&self) -> impl Iterator<Item = &ContentVariant> {
        self.slots.iter().filter(|v| !v.is_blank())
    }

    /// All variants in canonical style order
    pub fn iter(&self) -> impl Iterator<Item = &ContentVariant> {
        self.slots.iter()
    }
}

impl Default for VariantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl From<VariantMap> for VariantStore {
    fn from(map: VariantMap) -> Self {
        let mut store = Self::new();
        for (style, body) in map {
            store.slots[style.index()] = ContentVariant {
                learning_style: style,
                content: body.content,
                media_urls: body.media_urls,
            };
        }
        store
    }
}

impl From<VariantStore> for VariantMap {
    fn from(store: VariantStore) -> Self {
        store
            .slots
            .into_iter()
            .map(|v| {
                (
                    v.learning_style,
                    VariantBody {
                        content: v.content,
                        media_urls: v.media_urls,
                    },
                )
            })
            .collect()
    }
}
