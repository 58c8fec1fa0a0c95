//! Content editor
//!
//! Owns one in-memory draft and drives it through the save workflow:
//!
//! 1. Validate metadata, then the variant store
//! 2. Assemble the aggregate, forcing `Review` on submit
//! 3. Create or update through the gateway
//! 4. On submit of existing content, follow up with a status update
//!
//! Gateway calls are awaited one after another; a failure ends the action.

use crate::assembler::{decompose, ContentAssembler, DefaultVariantPolicy};
use crate::error::{EditorError, GatewayError, ValidationError};
use crate::gateway::PersistenceGateway;
use crate::status::{self, EditorAction};
use crate::validation::{validate_duration, validate_media_urls, validate_variants, MetadataValidator};
use chrono::Utc;
use edukit_model::{
    ContentFormat, ContentId, ContentStatus, ContentType, CurriculumContent, DifficultyLevel,
    KeyStage, LearningStyle, MetadataDraft, Subject, VariantStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Editor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How the default variant is chosen at assembly
    pub default_variant: DefaultVariantPolicy,
    /// Reject media URLs that do not parse
    pub check_media_urls: bool,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default-variant policy
    #[inline]
    #[must_use]
    pub fn with_default_variant(mut self, policy: DefaultVariantPolicy) -> Self {
        self.default_variant = policy;
        self
    }

    /// With media URL checking on or off
    #[inline]
    #[must_use]
    pub fn with_media_url_check(mut self, check: bool) -> Self {
        self.check_media_urls = check;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_variant: DefaultVariantPolicy::AlwaysVisual,
            check_media_urls: true,
        }
    }
}

/// Editing session for one curriculum content item
pub struct ContentEditor {
    gateway: Arc<dyn PersistenceGateway>,
    config: EditorConfig,
    validator: MetadataValidator,
    assembler: ContentAssembler,
    metadata: MetadataDraft,
    variants: VariantStore,
    /// Last copy acknowledged by the gateway; may go stale
    saved: Option<CurriculumContent>,
    /// Status still owed after a partially applied submit
    pending_status: Option<ContentStatus>,
}

impl std::fmt::Debug for ContentEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentEditor")
            .field("config", &self.config)
            .field("metadata", &self.metadata)
            .field("variants", &self.variants)
            .field("saved", &self.saved.as_ref().and_then(CurriculumContent::id))
            .field("pending_status", &self.pending_status)
            .finish_non_exhaustive()
    }
}

impl ContentEditor {
    /// Open an empty editor
    #[must_use]
    pub fn new(gateway: Arc<dyn PersistenceGateway>, config: EditorConfig) -> Self {
        Self {
            gateway,
            config,
            validator: MetadataValidator::new(),
            assembler: ContentAssembler::new(config.default_variant),
            metadata: MetadataDraft::default(),
            variants: VariantStore::new(),
            saved: None,
            pending_status: None,
        }
    }

    /// Open an editor on stored content
    #[must_use]
    pub fn open(
        gateway: Arc<dyn PersistenceGateway>,
        config: EditorConfig,
        content: CurriculumContent,
    ) -> Self {
        let (metadata, variants) = decompose(&content);
        let mut editor = Self::new(gateway, config);
        editor.metadata = MetadataDraft::from(metadata);
        editor.variants = variants;
        editor.saved = Some(content);
        editor
    }

    /// Open an editor on a draft that has not gone through the gateway
    #[must_use]
    pub fn from_draft(
        gateway: Arc<dyn PersistenceGateway>,
        config: EditorConfig,
        metadata: MetadataDraft,
        variants: VariantStore,
    ) -> Self {
        let mut editor = Self::new(gateway, config);
        editor.metadata = metadata;
        editor.variants = variants;
        editor
    }

    /// Current metadata draft
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &MetadataDraft {
        &self.metadata
    }

    /// Current variant store
    #[inline]
    #[must_use]
    pub fn variants(&self) -> &VariantStore {
        &self.variants
    }

    /// Last gateway-acknowledged copy
    #[inline]
    #[must_use]
    pub fn saved(&self) -> Option<&CurriculumContent> {
        self.saved.as_ref()
    }

    /// Id once the content exists in the gateway
    #[inline]
    #[must_use]
    pub fn content_id(&self) -> Option<ContentId> {
        self.metadata.id
    }

    /// Status change still owed after a partial submit
    #[inline]
    #[must_use]
    pub fn pending_status(&self) -> Option<ContentStatus> {
        self.pending_status
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // Metadata setters

    /// Set title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = title.into();
    }

    /// Set description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.metadata.description = description.into();
    }

    /// Set key stage
    pub fn set_key_stage(&mut self, key_stage: KeyStage) {
        self.metadata.key_stage = Some(key_stage);
    }

    /// Set subject
    pub fn set_subject(&mut self, subject: Subject) {
        self.metadata.subject = Some(subject);
    }

    /// Replace topics
    pub fn set_topics(&mut self, topics: Vec<String>) {
        self.metadata.topics = topics;
    }

    /// Replace learning objectives
    pub fn set_learning_objectives(&mut self, objectives: Vec<String>) {
        self.metadata.learning_objectives = objectives;
    }

    /// Replace keywords
    pub fn set_keywords(&mut self, keywords: Vec<String>) {
        self.metadata.keywords = keywords;
    }

    /// Set difficulty level
    pub fn set_difficulty_level(&mut self, level: DifficultyLevel) {
        self.metadata.difficulty_level = level;
    }

    /// Set content type
    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.metadata.content_type = content_type;
    }

    /// Set content format
    pub fn set_content_format(&mut self, format: ContentFormat) {
        self.metadata.content_format = format;
    }

    /// Set estimated duration in minutes
    ///
    /// # Errors
    /// `ValidationError::InvalidDuration` for zero; the draft is unchanged.
    pub fn set_estimated_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        validate_duration(minutes)?;
        self.metadata.estimated_duration = minutes;
        Ok(())
    }

    // Variant setters

    /// Replace the body of one learning style
    pub fn set_variant_content(&mut self, style: LearningStyle, text: impl Into<String>) {
        self.variants.set_content(style, text);
    }

    /// Replace the media list of one learning style
    ///
    /// # Errors
    /// `ValidationError::InvalidMediaUrl` when URL checking is enabled and an
    /// entry does not parse; the draft is unchanged.
    pub fn set_variant_media_urls(
        &mut self,
        style: LearningStyle,
        urls: Vec<String>,
    ) -> Result<(), ValidationError> {
        if self.config.check_media_urls {
            validate_media_urls(style, &urls)?;
        }
        self.variants.set_media_urls(style, urls);
        Ok(())
    }

    /// Run the pre-save checks without saving
    ///
    /// # Errors
    /// First failing check, metadata before variants.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.validator.validate(&self.metadata)?;
        validate_variants(&self.variants)
    }

    /// Assemble what a plain save would send, without sending it
    ///
    /// # Errors
    /// Same as [`ContentEditor::check`].
    pub fn preview(&self) -> Result<CurriculumContent, ValidationError> {
        let metadata = self.validator.validate(&self.metadata)?;
        validate_variants(&self.variants)?;
        Ok(self.assembler.assemble(metadata, &self.variants, Utc::now()))
    }

    /// Save without changing status
    ///
    /// # Errors
    /// - `EditorError::Validation` before any gateway call
    /// - `EditorError::Gateway` if create/update is rejected
    pub async fn save_draft(&mut self) -> Result<CurriculumContent, EditorError> {
        self.persist(EditorAction::SaveDraft).await
    }

    /// Save and move to review
    ///
    /// # Errors
    /// - `EditorError::Validation` before any gateway call
    /// - `EditorError::Gateway` if create/update is rejected
    /// - `EditorError::PartiallyApplied` if the content was saved but the
    ///   follow-up status update failed; see
    ///   [`ContentEditor::retry_status_update`]
    pub async fn submit_for_review(&mut self) -> Result<CurriculumContent, EditorError> {
        self.persist(EditorAction::SubmitForReview).await
    }

    /// Repeat only the status step of a partially applied submit
    ///
    /// # Errors
    /// - `EditorError::NothingPending` if no status change is owed
    /// - `EditorError::PartiallyApplied` if the status call fails again
    pub async fn retry_status_update(&mut self) -> Result<CurriculumContent, EditorError> {
        let (Some(status), Some(id)) = (self.pending_status, self.metadata.id) else {
            return Err(EditorError::NothingPending);
        };
        self.apply_status(id, status).await
    }

    async fn persist(&mut self, action: EditorAction) -> Result<CurriculumContent, EditorError> {
        let mut metadata = self.validator.validate(&self.metadata).map_err(|e| {
            tracing::debug!("Metadata validation failed: {}", e);
            e
        })?;
        validate_variants(&self.variants)?;

        let plan = status::plan(metadata.status, metadata.id.is_some(), action);
        metadata.status = plan.target;
        let content = self.assembler.assemble(metadata, &self.variants, Utc::now());

        tracing::info!(
            "{:?} '{}' ({} variant(s), status {})",
            action,
            content.metadata.title,
            content.variants.len(),
            plan.target
        );

        let saved = match content.id() {
            None => self.gateway.create(&content).await,
            Some(id) => self.gateway.update(&id, &content).await,
        }
        .map_err(|e| {
            tracing::warn!("Content write failed: {}", e);
            EditorError::Gateway(e)
        })?;

        let Some(id) = saved.id() else {
            return Err(EditorError::Gateway(GatewayError::Rejected(
                "gateway returned content without an id".to_string(),
            )));
        };
        self.absorb(saved.clone());

        if !plan.status_call {
            self.pending_status = None;
            return Ok(saved);
        }

        self.pending_status = Some(plan.target);
        self.apply_status(id, plan.target).await
    }

    async fn apply_status(
        &mut self,
        id: ContentId,
        status: ContentStatus,
    ) -> Result<CurriculumContent, EditorError> {
        match self.gateway.update_status(&id, status).await {
            Ok(saved) => {
                tracing::info!("Content {} moved to {}", id, status);
                self.pending_status = None;
                self.absorb(saved.clone());
                Ok(saved)
            }
            Err(source) => {
                tracing::warn!("Status update for {} failed: {}", id, source);
                Err(EditorError::PartiallyApplied { id, status, source })
            }
        }
    }

    /// Take id, timestamps and status from the gateway's copy
    fn absorb(&mut self, saved: CurriculumContent) {
        self.metadata.id = saved.metadata.id;
        self.metadata.status = saved.metadata.status;
        self.metadata.created_at = saved.metadata.created_at;
        self.metadata.updated_at = saved.metadata.updated_at;
        self.saved = Some(saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockPersistenceGateway;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn stamp(content: &CurriculumContent, id: ContentId) -> CurriculumContent {
        let mut saved = content.clone();
        saved.metadata.id = Some(id);
        saved.metadata.created_at = saved.metadata.updated_at;
        saved
    }

    fn fill_fractions(editor: &mut ContentEditor) {
        editor.set_title("Fractions");
        editor.set_description("Intro to fractions");
        editor.set_key_stage(KeyStage::Ks2);
        editor.set_subject(Subject::Mathematics);
        editor.set_variant_content(LearningStyle::Auditory, "Listen and repeat");
    }

    #[tokio::test]
    async fn validation_failure_makes_no_gateway_call() {
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create().never();
        mock.expect_update().never();
        mock.expect_update_status().never();

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        editor.set_variant_content(LearningStyle::Visual, "Look");

        let err = editor.save_draft().await.unwrap_err();
        assert!(matches!(err, EditorError::Validation(ValidationError::IncompleteMetadata { .. })));
        assert!(!err.reached_gateway());

        let err = editor.submit_for_review().await.unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_variants_rejected_before_gateway() {
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create().never();

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        editor.set_title("Fractions");
        editor.set_description("Intro to fractions");
        editor.set_key_stage(KeyStage::Ks2);
        editor.set_subject(Subject::Mathematics);
        editor.set_variant_content(LearningStyle::Kinesthetic, "   ");

        let err = editor.save_draft().await.unwrap_err();
        assert!(matches!(err, EditorError::Validation(ValidationError::NoVariantContent)));
        assert_eq!(
            err.section(),
            Some(crate::error::EditorSection::Variant(LearningStyle::Visual))
        );
    }

    #[tokio::test]
    async fn save_draft_creates_new_content() {
        let id = ContentId::new();
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create()
            .withf(|c| c.status() == ContentStatus::Draft && c.id().is_none())
            .times(1)
            .returning(move |c| Ok(stamp(c, id)));
        mock.expect_update_status().never();

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        fill_fractions(&mut editor);

        let saved = editor.save_draft().await.unwrap();
        assert_eq!(saved.id(), Some(id));
        assert_eq!(saved.styles(), vec![LearningStyle::Auditory]);
        assert_eq!(saved.default_variant.learning_style, LearningStyle::Visual);
        assert!(saved.default_variant.content.is_empty());
        assert_eq!(editor.content_id(), Some(id));
    }

    #[tokio::test]
    async fn second_save_updates_existing_content() {
        let id = ContentId::new();
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create()
            .times(1)
            .returning(move |c| Ok(stamp(c, id)));
        mock.expect_update()
            .with(eq(id), mockall::predicate::always())
            .times(1)
            .returning(|_, c| Ok(c.clone()));

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        fill_fractions(&mut editor);
        editor.save_draft().await.unwrap();

        editor.set_title("Fractions and decimals");
        let saved = editor.save_draft().await.unwrap();
        assert_eq!(saved.metadata.title, "Fractions and decimals");
        assert_eq!(saved.status(), ContentStatus::Draft);
    }

    #[tokio::test]
    async fn create_without_assigned_id_is_rejected() {
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create()
            .times(1)
            .returning(|c| Ok(c.clone()));
        mock.expect_update_status().never();

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        fill_fractions(&mut editor);

        let err = editor.save_draft().await.unwrap_err();
        assert!(matches!(err, EditorError::Gateway(GatewayError::Rejected(_))));
        assert!(editor.saved().is_none());
        assert_eq!(editor.content_id(), None);
    }

    fn stored_draft(id: ContentId) -> CurriculumContent {
        CurriculumContent {
            metadata: edukit_model::ContentMetadata::new(
                "Fractions",
                "Intro to fractions",
                KeyStage::Ks2,
                Subject::Mathematics,
            )
            .with_id(id),
            variants: vec![edukit_model::ContentVariant::new(
                LearningStyle::Auditory,
                "Listen and repeat",
            )],
            default_variant: edukit_model::ContentVariant::empty(LearningStyle::Visual),
        }
    }

    #[tokio::test]
    async fn submit_existing_draft_updates_content_then_status() {
        let id = ContentId::new();
        let mut seq = Sequence::new();
        let mut mock = MockPersistenceGateway::new();
        mock.expect_update()
            .withf(move |got, c| *got == id && c.status() == ContentStatus::Review)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, c| Ok(c.clone()));
        mock.expect_update_status()
            .with(eq(id), eq(ContentStatus::Review))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, status| {
                let mut saved = stored_draft(id);
                saved.metadata.status = status;
                Ok(saved)
            });

        let mut editor =
            ContentEditor::open(Arc::new(mock), EditorConfig::default(), stored_draft(id));

        let saved = editor.submit_for_review().await.unwrap();
        assert_eq!(saved.status(), ContentStatus::Review);
        assert_eq!(editor.metadata().status, ContentStatus::Review);
        assert_eq!(editor.pending_status(), None);
    }

    #[tokio::test]
    async fn failed_status_call_is_partially_applied_and_retryable() {
        let id = ContentId::new();
        let mut seq = Sequence::new();
        let mut mock = MockPersistenceGateway::new();
        mock.expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, c| Ok(c.clone()));
        let mut attempts = 0;
        mock.expect_update_status()
            .with(eq(id), eq(ContentStatus::Review))
            .times(2)
            .in_sequence(&mut seq)
            .returning(move |_, status| {
                attempts += 1;
                if attempts == 1 {
                    return Err(GatewayError::Unavailable("timeout".into()));
                }
                let mut saved = stored_draft(id);
                saved.metadata.status = status;
                Ok(saved)
            });

        let mut editor =
            ContentEditor::open(Arc::new(mock), EditorConfig::default(), stored_draft(id));

        let err = editor.submit_for_review().await.unwrap_err();
        assert!(err.is_partially_applied());
        assert_eq!(editor.pending_status(), Some(ContentStatus::Review));

        let saved = editor.retry_status_update().await.unwrap();
        assert_eq!(saved.status(), ContentStatus::Review);
        assert_eq!(editor.pending_status(), None);
    }

    #[tokio::test]
    async fn submit_new_content_creates_in_review_without_status_call() {
        let id = ContentId::new();
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create()
            .withf(|c| c.status() == ContentStatus::Review)
            .times(1)
            .returning(move |c| Ok(stamp(c, id)));
        mock.expect_update_status().never();

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        fill_fractions(&mut editor);

        let saved = editor.submit_for_review().await.unwrap();
        assert_eq!(saved.status(), ContentStatus::Review);
        assert_eq!(editor.pending_status(), None);
    }

    #[tokio::test]
    async fn gateway_failure_is_not_retried() {
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(GatewayError::Unavailable("connection refused".into())));

        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        fill_fractions(&mut editor);

        let err = editor.save_draft().await.unwrap_err();
        assert!(matches!(err, EditorError::Gateway(GatewayError::Unavailable(_))));
        assert_eq!(editor.content_id(), None);
    }

    #[tokio::test]
    async fn retry_without_pending_status() {
        let mock = MockPersistenceGateway::new();
        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        let err = editor.retry_status_update().await.unwrap_err();
        assert!(matches!(err, EditorError::NothingPending));
    }

    #[test]
    fn zero_duration_setter_leaves_draft_unchanged() {
        let mock = MockPersistenceGateway::new();
        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        assert!(editor.set_estimated_duration(45).is_ok());
        assert!(editor.set_estimated_duration(0).is_err());
        assert_eq!(editor.metadata().estimated_duration, 45);
    }

    #[test]
    fn media_url_check_can_be_disabled() {
        let urls = vec!["slides/fractions.pdf".to_string()];

        let mut strict = ContentEditor::new(
            Arc::new(MockPersistenceGateway::new()),
            EditorConfig::default(),
        );
        assert!(strict
            .set_variant_media_urls(LearningStyle::ReadWrite, urls.clone())
            .is_err());
        assert!(strict.variants().get(LearningStyle::ReadWrite).media_urls.is_empty());

        let mut lax = ContentEditor::new(
            Arc::new(MockPersistenceGateway::new()),
            EditorConfig::default().with_media_url_check(false),
        );
        assert!(lax.set_variant_media_urls(LearningStyle::ReadWrite, urls.clone()).is_ok());
        assert_eq!(lax.variants().get(LearningStyle::ReadWrite).media_urls, urls);
    }

    #[test]
    fn preview_assembles_without_saving() {
        let mut mock = MockPersistenceGateway::new();
        mock.expect_create().never();
        let mut editor = ContentEditor::new(Arc::new(mock), EditorConfig::default());
        fill_fractions(&mut editor);

        let preview = editor.preview().unwrap();
        assert_eq!(preview.styles(), vec![LearningStyle::Auditory]);
        assert!(preview.metadata.updated_at.is_some());
        assert!(editor.saved().is_none());
    }
}
