use jiff::Timestamp;
use serde::Serialize;

use crate::graph::node_id::NodeId;
use crate::problem::meters::Meters;

use super::weighting::Cost;

/// Result of a single path search: the visited nodes from start to end, the accumulated
/// (possibly penalized) cost, the geometric length and the timing of the flight.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoutingPath {
    nodes: Vec<NodeId>,
    cost: Cost,
    distance: Meters,
    departure: Timestamp,
    arrival: Timestamp,
}

impl RoutingPath {
    pub fn new(
        nodes: Vec<NodeId>,
        cost: Cost,
        distance: Meters,
        departure: Timestamp,
        arrival: Timestamp,
    ) -> RoutingPath {
        RoutingPath {
            nodes,
            cost,
            distance,
            departure,
            arrival,
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn departure(&self) -> Timestamp {
        self.departure
    }

    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }
}
