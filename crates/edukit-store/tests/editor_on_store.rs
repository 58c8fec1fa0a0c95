//! Editor sessions against the repository-backed gateway

use edukit_content::{ContentEditor, EditorConfig, PersistenceGateway};
use edukit_model::{ContentStatus, CurriculumContent, LearningStyle};
use edukit_store::{AuditAction, AuditLog, InMemoryRepository, Repository, StoreGateway};
use edukit_test_utils::{auditory_only, fractions_draft};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn setup() -> (
    Arc<InMemoryRepository<CurriculumContent>>,
    Arc<StoreGateway>,
    Arc<AuditLog>,
) {
    let repo = Arc::new(InMemoryRepository::<CurriculumContent>::new());
    let audit = Arc::new(AuditLog::new());
    let gateway = Arc::new(StoreGateway::new(repo.clone()).with_audit(audit.clone()));
    (repo, gateway, audit)
}

#[tokio::test]
async fn draft_then_submit_lands_in_review() {
    let (repo, gateway, audit) = setup();
    let mut editor = ContentEditor::from_draft(
        gateway.clone(),
        EditorConfig::default(),
        fractions_draft(),
        auditory_only(),
    );

    let draft = editor.save_draft().await.unwrap();
    let id = draft.id().unwrap();
    assert_eq!(draft.status(), ContentStatus::Draft);

    editor.submit_for_review().await.unwrap();

    let stored = repo.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), ContentStatus::Review);
    assert_eq!(stored.styles(), vec![LearningStyle::Auditory]);
    assert_eq!(stored.metadata.created_at, draft.metadata.created_at);
    assert_eq!(repo.len(), 1);

    let actions: Vec<_> = audit.events().into_iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::Create, AuditAction::Update, AuditAction::UpdateStatus]
    );
    audit.verify_integrity().unwrap();
}

#[tokio::test]
async fn last_write_wins_between_sessions() {
    let (_, gateway, _) = setup();
    let mut first = ContentEditor::from_draft(
        gateway.clone(),
        EditorConfig::default(),
        fractions_draft(),
        auditory_only(),
    );
    let saved = first.save_draft().await.unwrap();
    let id = saved.id().unwrap();

    let mut second = ContentEditor::open(gateway.clone(), EditorConfig::default(), saved);
    second.set_title("Fractions (revised)");
    second.save_draft().await.unwrap();

    first.set_description("Older session wins last");
    first.save_draft().await.unwrap();

    let stored = gateway.load(&id).await.unwrap();
    assert_eq!(stored.metadata.title, "Fractions");
    assert_eq!(stored.metadata.description, "Older session wins last");
}

#[tokio::test]
async fn status_update_on_missing_content_fails() {
    let (_, gateway, audit) = setup();
    let id = edukit_model::ContentId::new();
    assert!(gateway.update_status(&id, ContentStatus::Review).await.is_err());
    assert!(audit.is_empty());
}
