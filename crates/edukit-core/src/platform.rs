//! Platform wiring
//!
//! Builds the store, the audited content gateway and the communities table
//! from one [`PlatformConfig`].

use crate::config::{ConfigError, PlatformConfig};
use edukit_communities::{load_seed, CommandTable, CommunityError, CommunityService};
use edukit_content::{ContentEditor, EditorError, GatewayError};
use edukit_model::{ContentId, CurriculumContent, MetadataDraft, VariantStore};
use edukit_store::{AuditLog, InMemoryRepository, StoreGateway};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Platform-level errors
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Community setup or command failure
    #[error(transparent)]
    Community(#[from] CommunityError),

    /// Editor action failure
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Direct gateway call failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Draft file unreadable or malformed
    #[error("draft {path}: {reason}")]
    Draft {
        /// Draft file
        path: String,
        /// Cause
        reason: String,
    },
}

/// Editor draft as stored on disk
///
/// `variants` is keyed by learning style; absent styles are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFile {
    /// Metadata, possibly incomplete
    #[serde(default)]
    pub metadata: MetadataDraft,
    /// Variant bodies
    #[serde(default)]
    pub variants: VariantStore,
}

impl DraftFile {
    /// Read a JSON draft
    ///
    /// # Errors
    /// `PlatformError::Draft` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PlatformError> {
        let draft_err = |reason: String| PlatformError::Draft {
            path: path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| draft_err(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| draft_err(e.to_string()))
    }
}

/// Running platform services
pub struct Platform {
    config: PlatformConfig,
    content: Arc<InMemoryRepository<CurriculumContent>>,
    gateway: Arc<StoreGateway>,
    communities: CommandTable,
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("config", &self.config)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

impl Platform {
    /// Wire every service and load community seed data
    ///
    /// # Errors
    /// `Config` for out-of-range settings, `Community` if seeding fails.
    pub async fn build(config: PlatformConfig) -> Result<Self, PlatformError> {
        config.validate()?;

        let content = Arc::new(InMemoryRepository::<CurriculumContent>::new());
        let mut gateway = StoreGateway::new(content.clone());
        if config.store.audit {
            gateway = gateway.with_audit(Arc::new(AuditLog::new()));
        }

        let service = Arc::new(CommunityService::in_memory(config.communities.clone()));
        if let Some(seed) = &config.communities.seed {
            let entries = load_seed(seed)?;
            service.seed(entries).await?;
        }
        let communities = CommandTable::with_defaults(service)?;

        tracing::info!(
            "Platform ready (audit: {}, {} community operations)",
            config.store.audit,
            communities.operations().len()
        );
        Ok(Self {
            config,
            content,
            gateway: Arc::new(gateway),
            communities,
        })
    }

    /// Configuration in effect
    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Content gateway
    #[must_use]
    pub fn gateway(&self) -> &Arc<StoreGateway> {
        &self.gateway
    }

    /// Audit log, when enabled
    #[must_use]
    pub fn audit(&self) -> Option<&Arc<AuditLog>> {
        self.gateway.audit()
    }

    /// Number of stored content items
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.content.len()
    }

    /// Communities command table
    #[must_use]
    pub fn communities(&self) -> &CommandTable {
        &self.communities
    }

    /// Editor on a new, empty draft
    #[must_use]
    pub fn new_editor(&self) -> ContentEditor {
        ContentEditor::new(self.gateway.clone(), self.config.editor)
    }

    /// Editor on a draft read from disk
    #[must_use]
    pub fn draft_editor(&self, draft: DraftFile) -> ContentEditor {
        ContentEditor::from_draft(
            self.gateway.clone(),
            self.config.editor,
            draft.metadata,
            draft.variants,
        )
    }

    /// Editor on stored content
    ///
    /// # Errors
    /// `Gateway` if the id is unknown.
    pub async fn open_editor(&self, id: &ContentId) -> Result<ContentEditor, PlatformError> {
        let content = self.gateway.load(id).await?;
        Ok(ContentEditor::open(self.gateway.clone(), self.config.editor, content))
    }
}
