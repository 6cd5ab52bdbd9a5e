//! Integration tests for Callouts
//!
//! These tests drive the pipeline through the public API, from a dataset on
//! disk to positioned diagrams and hover replies.

use callouts_core::{
    aggregate_links, Config, DiagramController, RecordStore, SessionId, SessionView, Summary,
};
use callouts_server::websocket::{handle_client_message, ClientMessage, ServerMessage};
use callouts_server::{CalloutsServer, ServerConfig};
use std::fs;
use tempfile::TempDir;

const DATASET: &str = r#"{
    "nodes": [
        { "id": "101", "name": "Herbert Kickl", "party": "FPÖ" },
        { "id": "102", "name": "August Wöginger", "party": "ÖVP" },
        { "id": "103", "name": "Sigrid Maurer", "party": "GRÜNE" },
        { "id": "104", "name": "Beate Meinl-Reisinger", "party": "NEOS" },
        { "id": "105", "name": "Präsident", "party": "" }
    ],
    "interruptions": [
        { "session": 190, "date": "2023-01-25", "caller": "101", "speaker": "102" },
        { "session": 190, "date": "2023-01-25", "caller": "101", "speaker": "102" },
        { "session": 190, "date": "2023-01-25", "caller": "103", "speaker": "101" },
        { "session": 190, "date": "2023-01-25", "caller": "104", "speaker": "" },
        { "session": 191, "date": "2023-01-26", "caller": "102", "speaker": "104" },
        { "session": 191, "date": "2023-01-26", "caller": "101", "speaker": "104" },
        { "session": 191, "date": "2023-01-26", "caller": "101", "speaker": "105" }
    ]
}"#;

fn write_dataset() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("callouts_structure.json");
    fs::write(&path, DATASET).unwrap();
    (dir, path)
}

#[test]
fn test_load_and_summarize() {
    let (_dir, path) = write_dataset();
    let store = RecordStore::load(&path).unwrap();

    assert_eq!(store.sessions(), vec![SessionId(190), SessionId(191)]);
    let summary = Summary::from_store(&store);
    assert_eq!(summary.total, 7);
    assert_eq!(summary.top_caller.unwrap().name, "Herbert Kickl");
    // Wöginger and Meinl-Reisinger both received two; Wöginger was counted first.
    assert_eq!(summary.top_receiver.unwrap().name, "August Wöginger");
}

#[test]
fn test_every_session_balances() {
    let (_dir, path) = write_dataset();
    let store = RecordStore::load(&path).unwrap();

    for session in store.sessions() {
        let view = SessionView::build(&store, session);
        let links = aggregate_links(&view);
        let total: u32 = links.iter().map(|l| l.value).sum();
        assert_eq!(total as usize, view.resolved_event_count(), "session {}", session);
    }
}

#[test]
fn test_config_file_changes_layout() {
    let (dir, path) = write_dataset();
    let config_path = dir.path().join("callouts.toml");
    fs::write(
        &config_path,
        "[layout]\nnode_thickness = 20.0\nextent = [[0.0, 0.0], [600.0, 400.0]]\n",
    )
    .unwrap();

    let store = RecordStore::load(&path).unwrap();
    let config = Config::load(&config_path).unwrap();
    let mut controller = DiagramController::new(
        std::sync::Arc::new(store),
        callouts_core::ColumnLayout,
        config.layout.params(),
    );

    let current = controller.on_session_selected("191").unwrap();
    for node in current.diagram.nodes() {
        assert_eq!(node.x1 - node.x0, 20.0);
        assert!(node.x0 >= 0.0 && node.x1 <= 600.0);
        assert!(node.y0 >= 0.0 && node.y1 <= 400.0);
    }
}

#[test]
fn test_websocket_conversation() {
    let (_dir, path) = write_dataset();
    let store = RecordStore::load(&path).unwrap();
    let server = CalloutsServer::new(store, Config::default(), ServerConfig::default());
    let state = server.state();
    let mut controller = state.controller();
    let palette = &state.config.palette;

    let generation = match handle_client_message(
        ClientMessage::SelectSession { session: "190".to_string() },
        &mut controller,
        palette,
    ) {
        Some(ServerMessage::Diagram { payload }) => {
            assert!(payload.headline.ends_with("am 25. Januar 2023"));
            assert_eq!(payload.diagram.nodes().len(), 4);
            payload.generation
        }
        other => panic!("expected diagram, got {:?}", other),
    };

    handle_client_message(
        ClientMessage::AnimationComplete { generation },
        &mut controller,
        palette,
    );

    match handle_client_message(
        ClientMessage::Focus { node: "101".into() },
        &mut controller,
        palette,
    ) {
        Some(ServerMessage::Highlight { highlight }) => {
            let texts: Vec<_> = highlight.labels.iter().map(|l| l.text.as_str()).collect();
            // Kickl 3, Wöginger 2, Maurer 1, Meinl-Reisinger 1 (no known speaker).
            assert_eq!(texts, vec!["3", "2", "1", ""]);
        }
        other => panic!("expected highlight, got {:?}", other),
    }

    assert!(matches!(
        handle_client_message(ClientMessage::Unfocus, &mut controller, palette),
        Some(ServerMessage::Cleared { .. })
    ));
}
