//! Hover state and relationship counts

use serde::Serialize;

use crate::graph::FlowGraph;
use crate::model::{AggregatedLink, ParticipantId};
use crate::session::SessionView;

/// Visual weight of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Nothing focused.
    Rest,
    /// Touches the focused node.
    Highlighted,
    /// Focus is elsewhere.
    Dimmed,
}

/// Count text shown next to one node. Empty when there is nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLabel {
    pub index: usize,
    pub id: ParticipantId,
    pub text: String,
}

/// What to display while a node is focused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub focused: ParticipantId,
    pub labels: Vec<NodeLabel>,
    /// Emphasis per link, in link order.
    pub links: Vec<Emphasis>,
}

/// Labels for every node relative to the node at `focused`: its own
/// involvement for itself, the connecting link's value for neighbours, and
/// an empty string for everyone else.
pub fn relationship_labels(view: &SessionView, graph: &FlowGraph, focused: usize) -> Vec<NodeLabel> {
    view.nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let text = if index == focused {
                node.involvement.to_string()
            } else {
                graph
                    .link_between(focused, index)
                    .map(|edge| edge.value.to_string())
                    .unwrap_or_default()
            };
            NodeLabel {
                index,
                id: node.id.clone(),
                text,
            }
        })
        .collect()
}

/// Focus and readiness of the current diagram.
///
/// Hover handling stays off until the entrance animation reports completion.
/// Events arriving before that are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    ready: bool,
    focused: Option<usize>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Index of the focused node, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focus `id`. Returns `None` when interaction is not enabled yet or the
    /// participant is not part of this session.
    pub fn focus(
        &mut self,
        view: &SessionView,
        graph: &FlowGraph,
        links: &[AggregatedLink],
        id: &ParticipantId,
    ) -> Option<Highlight> {
        if !self.ready {
            tracing::debug!("Ignoring focus on {} before animation completed", id);
            return None;
        }
        let Some(index) = view.index_of(id) else {
            tracing::debug!("Ignoring focus on {}: not in session {}", id, view.session);
            return None;
        };
        self.focused = Some(index);

        let emphasis = links
            .iter()
            .map(|link| {
                if link.source == index || link.target == index {
                    Emphasis::Highlighted
                } else {
                    Emphasis::Dimmed
                }
            })
            .collect();

        Some(Highlight {
            focused: id.clone(),
            labels: relationship_labels(view, graph, index),
            links: emphasis,
        })
    }

    /// Clear the focus. Returns the resting emphasis for every link, or
    /// `None` when interaction is not enabled yet.
    pub fn unfocus(&mut self, link_count: usize) -> Option<Vec<Emphasis>> {
        if !self.ready {
            return None;
        }
        self.focused = None;
        Some(vec![Emphasis::Rest; link_count])
    }
}
