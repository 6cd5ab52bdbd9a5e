//! Hands a session's aggregated graph to the layout

use serde::Serialize;

use crate::error::Result;
use crate::layout::{FlowLayout, LayoutInput, LayoutParams, PositionedLink, PositionedNode};
use crate::model::{AggregatedLink, SessionId};
use crate::session::SessionView;

/// Positioned geometry for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDiagram {
    pub session: SessionId,
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<PositionedLink>,
}

/// Result of building a session's diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagram {
    /// The session has no participants; the layout was not run.
    Empty { session: SessionId },
    Positioned(SessionDiagram),
}

impl Diagram {
    pub fn is_empty(&self) -> bool {
        matches!(self, Diagram::Empty { .. })
    }

    pub fn session(&self) -> SessionId {
        match self {
            Diagram::Empty { session } => *session,
            Diagram::Positioned(d) => d.session,
        }
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        match self {
            Diagram::Empty { .. } => &[],
            Diagram::Positioned(d) => &d.nodes,
        }
    }

    pub fn links(&self) -> &[PositionedLink] {
        match self {
            Diagram::Empty { .. } => &[],
            Diagram::Positioned(d) => &d.links,
        }
    }
}

/// Run `layout` over the session's nodes and links.
///
/// The layout receives its own copy of the nodes so nothing it does can leak
/// back into the view. An empty view short-circuits to [`Diagram::Empty`].
pub fn build_diagram(
    view: &SessionView,
    links: &[AggregatedLink],
    layout: &dyn FlowLayout,
    params: LayoutParams,
) -> Result<Diagram> {
    if view.is_empty() {
        tracing::debug!("Session {} is empty, skipping layout", view.session);
        return Ok(Diagram::Empty {
            session: view.session,
        });
    }

    let input = LayoutInput {
        nodes: view.nodes.clone(),
        links: links.to_vec(),
        params,
    };
    let output = layout.layout(input)?;

    Ok(Diagram::Positioned(SessionDiagram {
        session: view.session,
        nodes: output.nodes,
        links: output.links,
    }))
}
