//! Integration tests for editing sessions against the in-memory store

use pagecraft_editor::{locator, ContentNode, EditError, EditorAction, NodeKind, PageDocument, PageStyles, ROOT_ID};
use pagecraft_sync::{EditorSession, InMemorySiteStore, SaveStatus, SessionOptions, SyncError};
use std::sync::Arc;
use std::time::Duration;

fn paragraph(id: &str) -> ContentNode {
    ContentNode::new(id, NodeKind::Paragraph)
}

async fn open_session() -> (Arc<InMemorySiteStore>, EditorSession) {
    let store = Arc::new(InMemorySiteStore::new());
    store.insert_site(
        "site-1",
        "My Blog",
        PageDocument::new(vec![paragraph("p1"), paragraph("p2")], PageStyles::default()),
    );

    let session = EditorSession::open(store.clone(), "site-1", SessionOptions::default())
        .await
        .unwrap();
    (store, session)
}

#[tokio::test(start_paused = true)]
async fn test_open_hydrates_and_seeds_history() {
    let (store, session) = open_session().await;

    assert_eq!(session.title(), "My Blog");
    assert_eq!(session.document().content.len(), 2);
    assert_eq!(session.state().history().len(), 1);
    assert!(!session.state().can_undo());
    assert_eq!(session.status(), SaveStatus::Saved);

    // Hydration itself is not saved back
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(store.draft_saves(), 0);
}

#[tokio::test]
async fn test_open_unknown_site() {
    let store = Arc::new(InMemorySiteStore::new());
    let result = EditorSession::open(store, "missing", SessionOptions::default()).await;
    assert!(matches!(result, Err(SyncError::SiteNotFound(_))));
}

#[tokio::test(start_paused = true)]
async fn test_edits_autosave_after_debounce() {
    let (store, mut session) = open_session().await;

    session.dispatch(EditorAction::delete("p1")).unwrap();
    assert_eq!(session.status(), SaveStatus::Unsaved);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    session.dispatch(EditorAction::delete("p2")).unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.draft_saves(), 0);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(store.draft_saves(), 1);
    assert!(store.draft("site-1").unwrap().content.is_empty());
    assert_eq!(session.status(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_selection_does_not_trigger_save() {
    let (store, mut session) = open_session().await;

    session.dispatch(EditorAction::select(Some("p1"))).unwrap();
    assert_eq!(session.status(), SaveStatus::Saved);

    let outcome = session.try_dispatch(EditorAction::delete("ghost")).unwrap();
    assert_eq!(outcome, Err(EditError::NodeNotFound("ghost".into())));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(store.draft_saves(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_save_keeps_editing_available() {
    let (store, mut session) = open_session().await;
    store.set_failing(true);

    session.dispatch(EditorAction::delete("p1")).unwrap();
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert!(matches!(session.status(), SaveStatus::Error(_)));

    store.set_failing(false);
    session.dispatch(EditorAction::delete("p2")).unwrap();
    assert_eq!(session.status(), SaveStatus::Unsaved);

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(session.status(), SaveStatus::Saved);
    assert!(store.draft("site-1").unwrap().content.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_status_transitions_are_observable() {
    let (store, mut session) = open_session().await;
    store.set_latency(Duration::from_millis(500));
    let mut status = session.subscribe_status().unwrap();

    session.dispatch(EditorAction::delete("p1")).unwrap();
    status.changed().await.unwrap();
    assert_eq!(*status.borrow_and_update(), SaveStatus::Unsaved);

    status.changed().await.unwrap();
    assert_eq!(*status.borrow_and_update(), SaveStatus::Saving);

    status.changed().await.unwrap();
    assert_eq!(*status.borrow_and_update(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_save_version_and_revert() {
    let (store, mut session) = open_session().await;

    let version_id = session.save_version().await.unwrap();
    session.dispatch(EditorAction::delete("p1")).unwrap();
    session.dispatch(EditorAction::delete("p2")).unwrap();
    assert!(session.document().content.is_empty());

    let versions = session.versions().await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].id, version_id);

    session.revert_to_version(&version_id).await.unwrap();
    assert_eq!(session.document().content.len(), 2);
    assert_eq!(session.state().history().len(), 4);

    // Reverting is undoable
    session.dispatch(EditorAction::Undo).unwrap();
    assert!(session.document().content.is_empty());

    session.close().await.unwrap();
    assert!(store.draft("site-1").unwrap().content.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_revert_to_unknown_version() {
    let (_store, mut session) = open_session().await;
    let result = session.revert_to_version("version-404").await;
    assert!(matches!(result, Err(SyncError::VersionNotFound(ref id)) if id == "version-404"));
}

#[tokio::test(start_paused = true)]
async fn test_close_flushes_pending_edits() {
    let (store, mut session) = open_session().await;

    session
        .dispatch(EditorAction::add(vec![paragraph("p3")], ROOT_ID, 0))
        .unwrap();
    session.close().await.unwrap();

    assert_eq!(store.draft_saves(), 1);
    let draft = store.draft("site-1").unwrap();
    assert_eq!(draft.content[0].id, "p3");
    assert!(locator::find(&draft.content, "p2").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_publish_saves_then_goes_live() {
    let (store, mut session) = open_session().await;
    session.dispatch(EditorAction::delete("p2")).unwrap();
    session.publish().await.unwrap();

    assert_eq!(session.status(), SaveStatus::Saved);
    let site = store.site("site-1").unwrap();
    assert_eq!(site.status.as_deref(), Some("published"));
    assert_eq!(site.content.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_autosave_keeps_undecodable_columns_payload() {
    let raw = "{not json";
    let document = PageDocument::from_json(
        &serde_json::json!([
            { "id": "cols", "type": "columns", "content": raw, "styles": {} },
            { "id": "p1", "type": "paragraph", "styles": {} }
        ])
        .to_string(),
    )
    .unwrap();

    let store = Arc::new(InMemorySiteStore::new());
    store.insert_site("site-1", "My Blog", document);
    let mut session = EditorSession::open(store.clone(), "site-1", SessionOptions::default())
        .await
        .unwrap();

    session.dispatch(EditorAction::delete("p1")).unwrap();
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(store.draft_saves(), 1);

    let saved = serde_json::to_value(store.draft("site-1").unwrap()).unwrap();
    assert_eq!(saved["content"][0]["id"], "cols");
    assert_eq!(saved["content"][0]["content"], raw);
}
