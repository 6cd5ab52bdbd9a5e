//! Per-client diagram context and its input handlers

use std::sync::Arc;

use crate::aggregation::aggregate_links;
use crate::diagram::{build_diagram, Diagram};
use crate::error::Result;
use crate::format::session_headline;
use crate::graph::FlowGraph;
use crate::interaction::{Emphasis, Highlight, InteractionState};
use crate::layout::{ColumnLayout, FlowLayout, LayoutParams};
use crate::model::{AggregatedLink, ParticipantId, SessionId};
use crate::session::SessionView;
use crate::store::RecordStore;

/// Everything belonging to the diagram currently on screen.
///
/// Replaced as a whole on every session selection.
#[derive(Debug)]
pub struct CurrentDiagram {
    /// Rebuild counter; animation signals for older generations are ignored.
    pub generation: u64,
    pub headline: String,
    pub view: SessionView,
    pub links: Vec<AggregatedLink>,
    pub diagram: Diagram,
    graph: FlowGraph,
    interaction: InteractionState,
}

impl CurrentDiagram {
    /// Run the full pipeline for `session`.
    pub fn build(
        store: &RecordStore,
        session: SessionId,
        layout: &dyn FlowLayout,
        params: LayoutParams,
        generation: u64,
    ) -> Result<Self> {
        let view = SessionView::build(store, session);
        let links = aggregate_links(&view);
        let graph = FlowGraph::new(view.node_count(), &links);
        let diagram = build_diagram(&view, &links, layout, params)?;
        let headline = session_headline(session, store.session_date(session));

        Ok(CurrentDiagram {
            generation,
            headline,
            view,
            links,
            diagram,
            graph,
            interaction: InteractionState::new(),
        })
    }

    pub fn session(&self) -> SessionId {
        self.view.session
    }

    pub fn is_ready(&self) -> bool {
        self.interaction.is_ready()
    }

    pub fn focused(&self) -> Option<usize> {
        self.interaction.focused()
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }
}

/// Owns the shared record store and the current diagram, and reacts to
/// selection, hover and animation events one at a time.
pub struct DiagramController<L: FlowLayout = ColumnLayout> {
    store: Arc<RecordStore>,
    layout: L,
    params: LayoutParams,
    generation: u64,
    current: Option<CurrentDiagram>,
}

impl<L: FlowLayout> DiagramController<L> {
    pub fn new(store: Arc<RecordStore>, layout: L, params: LayoutParams) -> Self {
        DiagramController {
            store,
            layout,
            params,
            generation: 0,
            current: None,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn current(&self) -> Option<&CurrentDiagram> {
        self.current.as_ref()
    }

    /// Rebuild for the selected session. An unparseable selector is an error
    /// and leaves the current diagram in place; an unknown session renders
    /// empty. The new diagram starts with interaction disabled.
    pub fn on_session_selected(&mut self, selector: &str) -> Result<&CurrentDiagram> {
        let session: SessionId = selector.parse()?;
        let generation = self.generation + 1;
        let next = CurrentDiagram::build(&self.store, session, &self.layout, self.params, generation)?;

        tracing::info!(
            "Session {} selected: {} nodes, {} links (generation {})",
            session,
            next.view.node_count(),
            next.links.len(),
            generation
        );

        self.generation = generation;
        Ok(self.current.insert(next))
    }

    /// Enable interaction once the entrance animation of `generation` has
    /// finished. Returns whether the signal was applied.
    pub fn on_animation_complete(&mut self, generation: u64) -> bool {
        match self.current.as_mut() {
            Some(current) if current.generation == generation => {
                current.interaction.mark_ready();
                true
            }
            _ => {
                tracing::debug!("Dropping stale animation signal for generation {}", generation);
                false
            }
        }
    }

    /// Hover over a node. `None` while interaction is disabled or when the
    /// node is not part of the current session.
    pub fn on_node_focused(&mut self, id: &ParticipantId) -> Option<Highlight> {
        let current = self.current.as_mut()?;
        current
            .interaction
            .focus(&current.view, &current.graph, &current.links, id)
    }

    /// Hover left the node. `None` while interaction is disabled.
    pub fn on_node_unfocused(&mut self) -> Option<Vec<Emphasis>> {
        let current = self.current.as_mut()?;
        current.interaction.unfocus(current.links.len())
    }
}
