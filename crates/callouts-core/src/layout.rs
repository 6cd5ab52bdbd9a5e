//! Layout contract for Sankey-style diagrams and a default column layout

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::FlowGraph;
use crate::model::AggregatedLink;
use crate::session::SessionNode;

/// Drawing area as `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl From<[[f64; 2]; 2]> for Extent {
    fn from([[x0, y0], [x1, y1]]: [[f64; 2]; 2]) -> Self {
        Extent { x0, y0, x1, y1 }
    }
}

impl From<Extent> for [[f64; 2]; 2] {
    fn from(e: Extent) -> Self {
        [[e.x0, e.y0], [e.x1, e.y1]]
    }
}

/// How the layout may reorder nodes within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOrdering {
    /// Keep the order the nodes were handed over in.
    None,
}

/// How links are stacked where they leave and enter a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOrdering {
    /// Larger flows first (on top).
    DescendingByValue,
    /// Aggregation order.
    Input,
}

/// Visual parameters handed to the layout together with the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub node_thickness: f64,
    pub node_padding: f64,
    pub extent: Extent,
    pub node_ordering: NodeOrdering,
    pub link_ordering: LinkOrdering,
}

/// Graph handed to a layout. The nodes are copies owned by the layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInput {
    pub nodes: Vec<SessionNode>,
    pub links: Vec<AggregatedLink>,
    pub params: LayoutParams,
}

/// A node with its rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub index: usize,
    #[serde(flatten)]
    pub node: SessionNode,
    pub column: usize,
    /// Larger of incoming and outgoing flow.
    pub value: u32,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A link with its endpoints and stroke width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedLink {
    pub index: usize,
    /// Index of the source node in the positioned node list.
    pub source: usize,
    /// Index of the target node in the positioned node list.
    pub target: usize,
    pub value: u32,
    pub width: f64,
    /// Vertical center of the link where it leaves the source.
    pub y0: f64,
    /// Vertical center of the link where it enters the target.
    pub y1: f64,
}

/// Positioned geometry returned by a layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOutput {
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<PositionedLink>,
}

/// Anything that can turn a `{nodes, links}` graph into geometry.
pub trait FlowLayout {
    fn layout(&self, input: LayoutInput) -> Result<LayoutOutput>;
}

/// Places nodes in columns by caller depth and sizes them by flow.
///
/// Pure callers sit in the first column, participants that are only
/// interrupted in the last one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnLayout;

impl ColumnLayout {
    fn validate(input: &LayoutInput) -> Result<()> {
        let params = &input.params;
        let extent = params.extent;
        if extent.width() <= 0.0 || extent.height() <= 0.0 {
            return Err(Error::Layout(format!("empty extent {:?}", extent)));
        }
        if params.node_thickness <= 0.0 || params.node_thickness > extent.width() {
            return Err(Error::Layout(format!(
                "node thickness {} does not fit width {}",
                params.node_thickness,
                extent.width()
            )));
        }
        if params.node_padding < 0.0 {
            return Err(Error::Layout("negative node padding".to_string()));
        }
        let count = input.nodes.len();
        if let Some(link) = input
            .links
            .iter()
            .find(|l| l.source >= count || l.target >= count)
        {
            return Err(Error::Layout(format!(
                "link {} -> {} points outside {} nodes",
                link.source, link.target, count
            )));
        }
        Ok(())
    }
}

impl FlowLayout for ColumnLayout {
    fn layout(&self, input: LayoutInput) -> Result<LayoutOutput> {
        Self::validate(&input)?;
        let LayoutInput {
            nodes,
            links,
            params,
        } = input;

        let graph = FlowGraph::new(nodes.len(), &links);
        let columns = graph.columns();
        let column_count = columns.iter().copied().max().map_or(0, |c| c + 1);
        let values: Vec<u32> = (0..nodes.len())
            .map(|i| graph.flow_in(i).max(graph.flow_out(i)))
            .collect();

        let extent = params.extent;

        // One scale for all columns so equal values get equal heights.
        let mut ky = f64::INFINITY;
        for column in 0..column_count {
            let members: Vec<usize> = (0..nodes.len()).filter(|&i| columns[i] == column).collect();
            let total: u32 = members.iter().map(|&i| values[i]).sum();
            if total == 0 {
                continue;
            }
            let room = extent.height() - members.len().saturating_sub(1) as f64 * params.node_padding;
            ky = ky.min(room / f64::from(total));
        }
        let ky = if ky.is_finite() { ky.max(0.0) } else { 0.0 };

        let step = if column_count > 1 {
            (extent.width() - params.node_thickness) / (column_count - 1) as f64
        } else {
            0.0
        };

        let mut cursors = vec![extent.y0; column_count];
        let positioned: Vec<PositionedNode> = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let column = columns[index];
                let x0 = extent.x0 + column as f64 * step;
                let y0 = cursors[column];
                let y1 = y0 + f64::from(values[index]) * ky;
                cursors[column] = y1 + params.node_padding;
                PositionedNode {
                    index,
                    node,
                    column,
                    value: values[index],
                    x0,
                    y0,
                    x1: x0 + params.node_thickness,
                    y1,
                }
            })
            .collect();

        let order = |edges: &mut Vec<(usize, crate::graph::FlowEdge)>| match params.link_ordering {
            LinkOrdering::DescendingByValue => edges.sort_by(|a, b| {
                b.1.value
                    .cmp(&a.1.value)
                    .then(a.1.position.cmp(&b.1.position))
            }),
            LinkOrdering::Input => edges.sort_by_key(|e| e.1.position),
        };

        let mut source_y = vec![0.0; links.len()];
        let mut target_y = vec![0.0; links.len()];
        for node in &positioned {
            let mut outgoing = graph.outgoing(node.index);
            order(&mut outgoing);
            let mut cursor = node.y0;
            for (_, edge) in outgoing {
                let width = f64::from(edge.value) * ky;
                source_y[edge.position] = cursor + width / 2.0;
                cursor += width;
            }

            let mut incoming = graph.incoming(node.index);
            order(&mut incoming);
            let mut cursor = node.y0;
            for (_, edge) in incoming {
                let width = f64::from(edge.value) * ky;
                target_y[edge.position] = cursor + width / 2.0;
                cursor += width;
            }
        }

        let positioned_links = links
            .iter()
            .enumerate()
            .map(|(index, link)| PositionedLink {
                index,
                source: link.source,
                target: link.target,
                value: link.value,
                width: f64::from(link.value) * ky,
                y0: source_y[index],
                y1: target_y[index],
            })
            .collect();

        Ok(LayoutOutput {
            nodes: positioned,
            links: positioned_links,
        })
    }
}
