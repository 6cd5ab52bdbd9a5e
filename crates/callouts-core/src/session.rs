//! Session filtering and per-session involvement aggregation

use std::collections::HashMap;

use serde::Serialize;

use crate::model::*;
use crate::store::RecordStore;

/// Events belonging to `session`, in dataset order. No match yields an empty
/// list, never an error.
pub fn filter_session(events: &[InterruptionEvent], session: SessionId) -> Vec<&InterruptionEvent> {
    events.iter().filter(|e| e.session == session).collect()
}

/// A participant as it appears in one session's diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionNode {
    pub id: ParticipantId,
    pub name: String,
    pub party: String,
    /// Appearances as caller plus appearances as speaker within the session.
    pub involvement: u32,
}

/// Everything derived from one session selection.
///
/// Rebuilt from scratch for every selection; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session: SessionId,
    /// Nodes ordered by involvement, descending. Ties keep catalog order.
    pub nodes: Vec<SessionNode>,
    /// Participant id -> position in `nodes`.
    #[serde(skip)]
    index: HashMap<ParticipantId, usize>,
    #[serde(skip)]
    events: Vec<InterruptionEvent>,
}

impl SessionView {
    /// Filter the store down to `session` and aggregate participant
    /// involvement.
    pub fn build(store: &RecordStore, session: SessionId) -> Self {
        let events: Vec<InterruptionEvent> = filter_session(store.events(), session)
            .into_iter()
            .cloned()
            .collect();

        let mut involvement: HashMap<&ParticipantId, u32> = HashMap::new();
        for event in &events {
            *involvement.entry(&event.caller).or_insert(0) += 1;
            if let Some(speaker) = &event.speaker {
                *involvement.entry(speaker).or_insert(0) += 1;
            }
        }

        for id in involvement.keys() {
            if store.participant(id).is_none() {
                tracing::warn!("Session {}: participant {} is not in the catalog", session, id);
            }
        }

        // Catalog order first, then a stable sort keeps it for equal counts.
        let mut nodes: Vec<SessionNode> = store
            .participants()
            .iter()
            .filter_map(|p| {
                involvement.get(&p.id).map(|&count| SessionNode {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    party: p.party.clone(),
                    involvement: count,
                })
            })
            .collect();
        nodes.sort_by(|a, b| b.involvement.cmp(&a.involvement));

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        tracing::debug!(
            "Session {}: {} interruptions, {} participants",
            session,
            events.len(),
            nodes.len()
        );

        SessionView {
            session,
            nodes,
            index,
            events,
        }
    }

    /// Compact index of a participant within this session.
    pub fn index_of(&self, id: &ParticipantId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The session's interruptions in dataset order.
    pub fn events(&self) -> &[InterruptionEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of events whose caller and speaker both map to a node.
    pub fn resolved_event_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                self.index_of(&e.caller).is_some()
                    && e.speaker.as_ref().is_some_and(|s| self.index_of(s).is_some())
            })
            .count()
    }
}
