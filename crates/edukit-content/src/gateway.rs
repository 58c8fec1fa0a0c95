//! Persistence gateway contract
//!
//! The editor's only way out to storage. Implementations assign ids and
//! timestamps; the editor never retries a call and keeps nothing beyond the
//! draft it is editing.

use crate::error::GatewayError;
use async_trait::async_trait;
use edukit_model::{ContentId, ContentStatus, CurriculumContent};

/// Create/update operations keyed by content id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Store new content; the result carries the assigned id and timestamps
    async fn create(&self, content: &CurriculumContent) -> Result<CurriculumContent, GatewayError>;

    /// Overwrite existing content
    async fn update(
        &self,
        id: &ContentId,
        content: &CurriculumContent,
    ) -> Result<CurriculumContent, GatewayError>;

    /// Change only the status of existing content
    async fn update_status(
        &self,
        id: &ContentId,
        status: ContentStatus,
    ) -> Result<CurriculumContent, GatewayError>;
}
