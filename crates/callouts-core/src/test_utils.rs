//! Test utilities for Callouts

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use crate::error::Result;
use crate::layout::{ColumnLayout, FlowLayout, LayoutInput, LayoutOutput};
use crate::store::RecordStore;

/// Participants A, B, C and the four interruptions from the two-session
/// example: A→B twice and B→A in session 1, A→C in session 2.
pub fn example_json() -> String {
    json!({
        "nodes": [
            { "id": "A", "name": "Anna Alt", "party": "ÖVP" },
            { "id": "B", "name": "Bernd Berger", "party": "SPÖ" },
            { "id": "C", "name": "Clara Czerny", "party": "" }
        ],
        "interruptions": [
            { "session": 1, "date": "2023-01-25", "caller": "A", "speaker": "B" },
            { "session": 1, "date": "2023-01-25", "caller": "A", "speaker": "B" },
            { "session": 1, "date": "2023-01-25", "caller": "B", "speaker": "A" },
            { "session": 2, "date": "2023-02-01", "caller": "A", "speaker": "C" }
        ]
    })
    .to_string()
}

pub fn example_store() -> RecordStore {
    RecordStore::from_json(&example_json()).unwrap()
}

/// Build a store from `(id, name, party)` nodes and
/// `(session, caller, speaker)` events. All events share one date.
pub fn store_with(nodes: &[(&str, &str, &str)], events: &[(u32, &str, Option<&str>)]) -> RecordStore {
    let nodes: Vec<_> = nodes
        .iter()
        .map(|(id, name, party)| json!({ "id": id, "name": name, "party": party }))
        .collect();
    let interruptions: Vec<_> = events
        .iter()
        .map(|(session, caller, speaker)| {
            json!({
                "session": session,
                "date": "2024-05-15",
                "caller": caller,
                "speaker": speaker,
            })
        })
        .collect();
    let document = json!({ "nodes": nodes, "interruptions": interruptions });
    RecordStore::from_json(&document.to_string()).unwrap()
}

/// Write `content` to a dataset file inside a fresh temp dir.
pub fn write_dataset(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("callouts_structure.json");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Column layout that counts how often it was invoked.
#[derive(Default)]
pub struct CountingLayout {
    pub calls: Cell<usize>,
}

impl FlowLayout for CountingLayout {
    fn layout(&self, input: LayoutInput) -> Result<LayoutOutput> {
        self.calls.set(self.calls.get() + 1);
        ColumnLayout.layout(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_dataset() {
        let (_dir, path) = write_dataset(&example_json());
        assert!(path.exists());
        assert_eq!(RecordStore::load(&path).unwrap().events().len(), 4);
    }
}
