//! Callouts Core — interruption data model, session aggregation and diagram building

pub mod model;
pub mod error;
pub mod store;
pub mod stats;
pub mod session;
pub mod aggregation;
pub mod graph;
pub mod layout;
pub mod diagram;
pub mod interaction;
pub mod controller;
pub mod format;
pub mod palette;
pub mod config;


#[cfg(test)]
pub mod test_utils;

pub use model::{ParticipantId, SessionId, Participant, InterruptionEvent, AggregatedLink};
pub use error::{Error, Result};
pub use store::RecordStore;
pub use stats::{CallTally, GlobalStats, Leader};
pub use session::{filter_session, SessionNode, SessionView};
pub use aggregation::aggregate_links;
pub use graph::FlowGraph;
pub use layout::{ColumnLayout, Extent, FlowLayout, LayoutInput, LayoutOutput, LayoutParams, LinkOrdering, NodeOrdering, PositionedLink, PositionedNode};
pub use diagram::{build_diagram, Diagram, SessionDiagram};
pub use interaction::{Emphasis, Highlight, InteractionState, NodeLabel};
pub use controller::{CurrentDiagram, DiagramController};
pub use format::{format_date_de, session_headline, NamedLeader, Summary};
pub use palette::PartyPalette;
pub use config::{Config, LayoutConfig, CONFIG_FILE};
