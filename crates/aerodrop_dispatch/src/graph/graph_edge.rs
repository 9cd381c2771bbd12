use crate::problem::meters::Meters;

use super::node_id::NodeId;

/// Directed view of an undirected connection, as seen from the node it is iterated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphEdge {
    to: NodeId,
    distance: Meters,
}

impl GraphEdge {
    pub fn new(to: NodeId, distance: Meters) -> Self {
        GraphEdge { to, distance }
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }
}
