//! Repository-backed persistence gateway
//!
//! The gateway is the system of record for ids and timestamps. Writes are
//! last-write-wins; there is no version check between sessions.

use crate::audit::{AuditAction, AuditLog};
use crate::error::StoreError;
use crate::repository::{require, Repository};
use async_trait::async_trait;
use chrono::Utc;
use edukit_content::{GatewayError, PersistenceGateway};
use edukit_model::{ContentId, ContentStatus, CurriculumContent};
use std::sync::Arc;

/// [`PersistenceGateway`] over a content repository
pub struct StoreGateway {
    repo: Arc<dyn Repository<CurriculumContent>>,
    audit: Option<Arc<AuditLog>>,
}

impl StoreGateway {
    /// Gateway without auditing
    #[must_use]
    pub fn new(repo: Arc<dyn Repository<CurriculumContent>>) -> Self {
        Self { repo, audit: None }
    }

    /// With an audit log receiving every successful write
    #[inline]
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<AuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Attached audit log
    #[must_use]
    pub fn audit(&self) -> Option<&Arc<AuditLog>> {
        self.audit.as_ref()
    }

    /// Load stored content
    ///
    /// # Errors
    /// `GatewayError::NotFound` if absent.
    pub async fn load(&self, id: &ContentId) -> Result<CurriculumContent, GatewayError> {
        require::<CurriculumContent, _>(self.repo.as_ref(), id)
            .await
            .map_err(|e| to_gateway(*id, e))
    }

    /// All stored content
    ///
    /// # Errors
    /// Backend failures as `GatewayError::Unavailable`.
    pub async fn list(&self) -> Result<Vec<CurriculumContent>, GatewayError> {
        self.repo
            .list()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))
    }

    fn audit_write(&self, action: AuditAction, saved: &CurriculumContent, id: ContentId) {
        if let Some(audit) = &self.audit {
            audit.record(action, id, saved.status());
        }
    }
}

impl std::fmt::Debug for StoreGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreGateway")
            .field("audited", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}

fn to_gateway(id: ContentId, err: StoreError) -> GatewayError {
    match err {
        StoreError::NotFound { .. } => GatewayError::NotFound(id),
        StoreError::Backend(msg) => GatewayError::Unavailable(msg),
        other => GatewayError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl PersistenceGateway for StoreGateway {
    async fn create(&self, content: &CurriculumContent) -> Result<CurriculumContent, GatewayError> {
        let id = ContentId::new();
        let now = Utc::now();
        let mut item = content.clone();
        item.metadata.id = Some(id);
        item.metadata.created_at = Some(now);
        item.metadata.updated_at = Some(now);

        let saved = self.repo.insert(item).await.map_err(|e| to_gateway(id, e))?;
        tracing::info!("Created content {} '{}'", id, saved.metadata.title);
        self.audit_write(AuditAction::Create, &saved, id);
        Ok(saved)
    }

    async fn update(
        &self,
        id: &ContentId,
        content: &CurriculumContent,
    ) -> Result<CurriculumContent, GatewayError> {
        let existing = self.load(id).await?;
        let mut item = content.clone();
        item.metadata.id = Some(*id);
        item.metadata.created_at = existing.metadata.created_at;
        item.metadata.updated_at = Some(Utc::now());

        let saved = self.repo.update(item).await.map_err(|e| to_gateway(*id, e))?;
        tracing::info!("Updated content {}", id);
        self.audit_write(AuditAction::Update, &saved, *id);
        Ok(saved)
    }

    async fn update_status(
        &self,
        id: &ContentId,
        status: ContentStatus,
    ) -> Result<CurriculumContent, GatewayError> {
        let mut item = self.load(id).await?;
        item.metadata.status = status;
        item.metadata.updated_at = Some(Utc::now());

        let saved = self.repo.update(item).await.map_err(|e| to_gateway(*id, e))?;
        tracing::info!("Content {} status -> {}", id, status);
        self.audit_write(AuditAction::UpdateStatus, &saved, *id);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;
    use edukit_model::{ContentMetadata, ContentVariant, KeyStage, LearningStyle, Subject};

    fn content() -> CurriculumContent {
        CurriculumContent {
            metadata: ContentMetadata::new(
                "Photosynthesis",
                "How plants make food",
                KeyStage::Ks3,
                Subject::Science,
            ),
            variants: vec![ContentVariant::new(LearningStyle::Visual, "Leaf diagram")],
            default_variant: ContentVariant::new(LearningStyle::Visual, "Leaf diagram"),
        }
    }

    fn gateway() -> (StoreGateway, Arc<AuditLog>) {
        let audit = Arc::new(AuditLog::new());
        let repo = Arc::new(InMemoryRepository::<CurriculumContent>::new());
        (StoreGateway::new(repo).with_audit(audit.clone()), audit)
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let (gw, _) = gateway();
        let saved = gw.create(&content()).await.unwrap();
        let id = saved.id().unwrap();
        assert!(saved.metadata.created_at.is_some());
        assert_eq!(saved.metadata.created_at, saved.metadata.updated_at);
        assert_eq!(gw.load(&id).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let (gw, _) = gateway();
        let first = gw.create(&content()).await.unwrap();
        let id = first.id().unwrap();

        let mut changed = first.clone();
        changed.metadata.title = "Photosynthesis II".into();
        changed.metadata.created_at = None;
        let saved = gw.update(&id, &changed).await.unwrap();

        assert_eq!(saved.metadata.created_at, first.metadata.created_at);
        assert!(saved.metadata.updated_at >= first.metadata.updated_at);
        assert_eq!(gw.load(&id).await.unwrap().metadata.title, "Photosynthesis II");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let (gw, audit) = gateway();
        let id = ContentId::new();
        let err = gw.update(&id, &content()).await.unwrap_err();
        assert_eq!(err, GatewayError::NotFound(id));
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn update_status_changes_only_status() {
        let (gw, _) = gateway();
        let first = gw.create(&content()).await.unwrap();
        let id = first.id().unwrap();

        let saved = gw.update_status(&id, ContentStatus::Review).await.unwrap();
        assert_eq!(saved.status(), ContentStatus::Review);
        assert_eq!(saved.variants, first.variants);
        assert_eq!(saved.metadata.title, first.metadata.title);
    }

    #[tokio::test]
    async fn writes_are_audited_in_order() {
        let (gw, audit) = gateway();
        let id = gw.create(&content()).await.unwrap().id().unwrap();
        gw.update(&id, &content()).await.unwrap();
        gw.update_status(&id, ContentStatus::Review).await.unwrap();

        let actions: Vec<_> = audit.events().iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Create, AuditAction::Update, AuditAction::UpdateStatus]
        );
        assert_eq!(audit.events()[2].status, ContentStatus::Review);
        assert!(audit.verify_integrity().is_ok());
    }
}
