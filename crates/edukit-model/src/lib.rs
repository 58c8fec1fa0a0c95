//! Edukit Model
//!
//! Curriculum content as it crosses the persistence boundary:
//! - UK key stages, National Curriculum subjects and the other enumerations
//! - Content metadata, both validated and in editable draft form
//! - One content variant per learning style
//! - The [`CurriculumContent`] aggregate
//!
//! # Example
//!
//! ```rust
//! use edukit_model::{LearningStyle, VariantStore};
//!
//! let mut variants = VariantStore::new();
//! variants.set_content(LearningStyle::Auditory, "Listen and repeat");
//! assert!(variants.has_any_content());
//! ```

#![warn(unreachable_pub)]

pub mod content;
pub mod curriculum;
pub mod ids;
pub mod metadata;
pub mod variants;

pub use content::CurriculumContent;
pub use curriculum::{
    ContentFormat, ContentStatus, ContentType, DifficultyLevel, KeyStage, LearningStyle,
    ParseEnumError, Subject,
};
pub use ids::{CommunityId, ContentId, DiscussionId, ReplyId};
pub use metadata::{ContentMetadata, MetadataDraft, DEFAULT_DURATION_MINUTES};
pub use variants::{ContentVariant, VariantBody, VariantMap, VariantStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with curriculum content
    pub use crate::{
        ContentId, ContentMetadata, ContentStatus, ContentVariant, CurriculumContent, KeyStage,
        LearningStyle, MetadataDraft, Subject, VariantStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
