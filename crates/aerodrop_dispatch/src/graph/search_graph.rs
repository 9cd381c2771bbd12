use crate::problem::location::Location;

use super::{graph_edge::GraphEdge, node_id::NodeId};

pub trait SearchGraph {
    fn node_count(&self) -> usize;

    /// Outgoing edges of `node`. Unknown nodes have none.
    fn node_edges(&self, node: NodeId) -> impl Iterator<Item = &GraphEdge>;

    fn node_location(&self, node: NodeId) -> Option<&Location>;
}
