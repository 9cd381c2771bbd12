use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use jiff::Timestamp;
use tracing::{debug, trace};

use crate::graph::{node_id::NodeId, search_graph::SearchGraph};
use crate::problem::{meters::Meters, meters_per_second::MetersPerSecond};

use super::{
    astar_heuristic::{AStarHeuristic, EuclideanHeuristic},
    routing_path::RoutingPath,
    weighting::{Cost, Weighting},
};

// https://en.wikipedia.org/wiki/A*_search_algorithm

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node: NodeId,

    /// Cheapest known cost from the start to `node` when the item was pushed
    g_cost: Cost,

    /// g_cost + estimated cost from `node` to the end
    f_cost: Cost,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipped to make this a min-heap: lowest f, then lowest g, then lowest node
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.g_cost.total_cmp(&self.g_cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

struct NodeData {
    cost: Cost,
    distance: Meters,
    arrival: Timestamp,
    parent: Option<NodeId>,
}

/// Time-dependent A*: the cost of an edge depends on the instant the drone leaves its origin,
/// which is the arrival time at that origin along the current best path. Nodes are re-opened
/// whenever a strictly cheaper path to them is found.
pub struct AStar<H: AStarHeuristic> {
    heap: BinaryHeap<HeapItem>,
    data: FxHashMap<NodeId, NodeData>,
    heuristic: H,
}

impl Default for AStar<EuclideanHeuristic> {
    fn default() -> Self {
        Self::with_heuristic(EuclideanHeuristic)
    }
}

impl<H: AStarHeuristic> AStar<H> {
    pub fn with_heuristic(heuristic: H) -> AStar<H> {
        AStar {
            heap: BinaryHeap::with_capacity(64),
            data: FxHashMap::default(),
            heuristic,
        }
    }

    fn reset(&mut self) {
        self.heap.clear();
        self.data.clear();
    }

    fn build_path(&self, start: NodeId, end: NodeId, departure: Timestamp) -> Option<RoutingPath> {
        let end_data = self.data.get(&end)?;
        let mut nodes = vec![end];

        let mut parent = end_data.parent;
        while let Some(node) = parent {
            nodes.push(node);
            parent = self.data.get(&node)?.parent;
        }

        nodes.reverse();
        debug_assert_eq!(nodes.first(), Some(&start));

        Some(RoutingPath::new(
            nodes,
            end_data.cost,
            end_data.distance,
            departure,
            end_data.arrival,
        ))
    }

    /// Cheapest path from `start` to `end` for a drone flying at `speed` and leaving `start` at
    /// `departure`. Returns `None` when `end` cannot be reached or either node is not part of
    /// the graph.
    pub fn find_path(
        &mut self,
        graph: &impl SearchGraph,
        weighting: &impl Weighting,
        start: NodeId,
        end: NodeId,
        speed: MetersPerSecond,
        departure: Timestamp,
    ) -> Option<RoutingPath> {
        let end_location = graph.node_location(end)?;
        let start_location = graph.node_location(start)?;

        self.reset();
        self.data.insert(
            start,
            NodeData {
                cost: 0.0,
                distance: Meters::ZERO,
                arrival: departure,
                parent: None,
            },
        );
        self.heap.push(HeapItem {
            node: start,
            g_cost: 0.0,
            f_cost: self.heuristic.estimate(start_location, end_location),
        });

        let mut iterations = 0;

        while let Some(HeapItem { node, g_cost, .. }) = self.heap.pop() {
            let Some(current) = self.data.get(&node) else {
                continue;
            };

            // A cheaper path to this node was found after this item was pushed
            if g_cost > current.cost {
                continue;
            }

            iterations += 1;

            if node == end {
                debug!(%start, %end, iterations, cost = current.cost, "path found");
                return self.build_path(start, end, departure);
            }

            let Some(node_location) = graph.node_location(node) else {
                continue;
            };
            let current_arrival = current.arrival;
            let current_distance = current.distance;

            for edge in graph.node_edges(node) {
                let adjacent = edge.to();
                let Some(adjacent_location) = graph.node_location(adjacent) else {
                    continue;
                };

                let next_cost = g_cost
                    + weighting.edge_cost(
                        node_location,
                        adjacent_location,
                        edge.distance(),
                        current_arrival,
                    );

                let improves = self
                    .data
                    .get(&adjacent)
                    .is_none_or(|data| next_cost < data.cost);
                if !improves {
                    continue;
                }

                // Legs whose arrival cannot be represented are not flyable
                let Some(arrival) = edge
                    .distance()
                    .flight_time(speed)
                    .and_then(|flight_time| current_arrival.checked_add(flight_time).ok())
                else {
                    trace!(from = %node, to = %adjacent, "arrival out of range");
                    continue;
                };
                let h_cost = self.heuristic.estimate(adjacent_location, end_location);

                trace!(
                    from = %node,
                    to = %adjacent,
                    cost = next_cost,
                    %arrival,
                    remaining = ?self.heuristic.estimate_duration(adjacent_location, end_location, speed),
                    "relaxed edge"
                );

                self.data.insert(
                    adjacent,
                    NodeData {
                        cost: next_cost,
                        distance: current_distance + edge.distance(),
                        arrival,
                        parent: Some(node),
                    },
                );
                self.heap.push(HeapItem {
                    node: adjacent,
                    g_cost: next_cost,
                    f_cost: next_cost + h_cost,
                });
            }
        }

        debug!(%start, %end, iterations, "no route");
        None
    }
}
