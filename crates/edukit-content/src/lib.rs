//! Edukit Content - curriculum content editing workflow
//!
//! - Validates metadata and variant content before anything is persisted
//! - Assembles the [`CurriculumContent`](edukit_model::CurriculumContent)
//!   aggregate from the editor state
//! - Decides when a submit needs a separate status update
//! - Talks to storage only through [`PersistenceGateway`]
//!
//! # Example
//!
//! ```rust,ignore
//! use edukit_content::{ContentEditor, EditorConfig};
//! use edukit_model::{KeyStage, LearningStyle, Subject};
//!
//! # async fn example(gateway: std::sync::Arc<dyn edukit_content::PersistenceGateway>)
//! #     -> Result<(), edukit_content::EditorError> {
//! let mut editor = ContentEditor::new(gateway, EditorConfig::default());
//! editor.set_title("Fractions");
//! editor.set_description("Intro to fractions");
//! editor.set_key_stage(KeyStage::Ks2);
//! editor.set_subject(Subject::Mathematics);
//! editor.set_variant_content(LearningStyle::Auditory, "Listen and repeat");
//!
//! let saved = editor.save_draft().await?;
//! println!("Saved {:?}", saved.id());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod assembler;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod status;
pub mod validation;

pub use assembler::{decompose, ContentAssembler, DefaultVariantPolicy};
pub use editor::{ContentEditor, EditorConfig};
pub use error::{
    EditorError, EditorSection, GatewayError, GatewayErrorKind, MetadataField, ValidationError,
};
pub use gateway::PersistenceGateway;
pub use status::{EditorAction, TransitionPlan};
pub use validation::{
    validate_duration, validate_media_urls, validate_metadata, validate_variants, MetadataValidator,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for editing curriculum content
    pub use crate::{
        ContentEditor, EditorConfig, EditorError, EditorSection, GatewayError,
        PersistenceGateway, ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
