//! Testing utilities for the Edukit workspace
//!
//! Shared fixtures and a recording persistence gateway.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::Utc;
use edukit_content::{GatewayError, PersistenceGateway};
use edukit_model::{
    ContentId, ContentMetadata, ContentStatus, CurriculumContent, KeyStage, LearningStyle,
    MetadataDraft, Subject, VariantStore,
};
use parking_lot::Mutex;
use std::collections::HashMap;

pub fn fractions_metadata() -> ContentMetadata {
    ContentMetadata::new(
        "Fractions",
        "Intro to fractions",
        KeyStage::Ks2,
        Subject::Mathematics,
    )
}

pub fn fractions_draft() -> MetadataDraft {
    MetadataDraft::from(fractions_metadata())
}

/// Only the auditory slot has content
pub fn auditory_only() -> VariantStore {
    let mut store = VariantStore::new();
    store.set_content(LearningStyle::Auditory, "Listen and repeat");
    store
}

/// Gateway call as seen by [`RecordingGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Create(CurriculumContent),
    Update(ContentId, CurriculumContent),
    UpdateStatus(ContentId, ContentStatus),
}

impl GatewayCall {
    pub fn name(&self) -> &'static str {
        match self {
            GatewayCall::Create(_) => "create",
            GatewayCall::Update(..) => "update",
            GatewayCall::UpdateStatus(..) => "update_status",
        }
    }
}

#[derive(Default)]
struct State {
    calls: Vec<GatewayCall>,
    items: HashMap<ContentId, CurriculumContent>,
    fail_on: Option<(usize, GatewayError)>,
}

/// In-memory gateway that records every call in order
///
/// A failure can be injected for the n-th call (0-based); that call is
/// recorded but has no effect.
#[derive(Default)]
pub struct RecordingGateway {
    state: Mutex<State>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway already holding `content`, which must carry an id
    pub fn seeded(content: CurriculumContent) -> Self {
        let gateway = Self::new();
        if let Some(id) = content.id() {
            gateway.state.lock().items.insert(id, content);
        }
        gateway
    }

    pub fn fail_call(&self, index: usize, error: GatewayError) {
        self.state.lock().fail_on = Some((index, error));
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.state.lock().calls.iter().map(GatewayCall::name).collect()
    }

    pub fn stored(&self, id: &ContentId) -> Option<CurriculumContent> {
        self.state.lock().items.get(id).cloned()
    }

    fn record(&self, call: GatewayCall) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        let index = state.calls.len();
        state.calls.push(call);
        match state.fail_on.take() {
            Some((at, error)) if at == index => Err(error),
            other => {
                state.fail_on = other;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl PersistenceGateway for RecordingGateway {
    async fn create(&self, content: &CurriculumContent) -> Result<CurriculumContent, GatewayError> {
        self.record(GatewayCall::Create(content.clone()))?;
        let id = ContentId::new();
        let now = Utc::now();
        let mut saved = content.clone();
        saved.metadata.id = Some(id);
        saved.metadata.created_at = Some(now);
        saved.metadata.updated_at = Some(now);
        self.state.lock().items.insert(id, saved.clone());
        Ok(saved)
    }

    async fn update(
        &self,
        id: &ContentId,
        content: &CurriculumContent,
    ) -> Result<CurriculumContent, GatewayError> {
        self.record(GatewayCall::Update(*id, content.clone()))?;
        let mut state = self.state.lock();
        let created_at = state
            .items
            .get(id)
            .ok_or(GatewayError::NotFound(*id))?
            .metadata
            .created_at;
        let mut saved = content.clone();
        saved.metadata.id = Some(*id);
        saved.metadata.created_at = created_at;
        saved.metadata.updated_at = Some(Utc::now());
        state.items.insert(*id, saved.clone());
        Ok(saved)
    }

    async fn update_status(
        &self,
        id: &ContentId,
        status: ContentStatus,
    ) -> Result<CurriculumContent, GatewayError> {
        self.record(GatewayCall::UpdateStatus(*id, status))?;
        let mut state = self.state.lock();
        let item = state.items.get_mut(id).ok_or(GatewayError::NotFound(*id))?;
        item.metadata.status = status;
        item.metadata.updated_at = Some(Utc::now());
        Ok(item.clone())
    }
}
