use fxhash::FxHashMap;

use crate::problem::{drone::DroneIdx, location::Location, package::PackageIdx};

use super::{
    graph_edge::GraphEdge, node_id::NodeId, package_graph::PackageGraph,
    search_graph::SearchGraph,
};

/// A drone's view of the shared package graph: one virtual depot node at the drone's start
/// position, linked in both directions to its nearest packages. The package graph itself is
/// never copied or modified.
pub struct DroneGraph<'a> {
    package_graph: &'a PackageGraph,

    depot: DroneIdx,
    depot_location: Location,
    depot_edges: Vec<GraphEdge>,

    // Reverse depot edges, attached to existing package nodes
    virtual_edges_existing_nodes: FxHashMap<PackageIdx, GraphEdge>,
}

impl<'a> DroneGraph<'a> {
    pub fn new(
        package_graph: &'a PackageGraph,
        depot: DroneIdx,
        depot_location: Location,
    ) -> DroneGraph<'a> {
        let mut depot_edges = vec![];
        let mut virtual_edges_existing_nodes = FxHashMap::default();

        for package_id in package_graph.nearest_packages(&depot_location) {
            let Some(location) = package_graph.package_location(package_id) else {
                continue;
            };

            let distance = depot_location.euclidean_distance(location);
            depot_edges.push(GraphEdge::new(NodeId::Package(package_id), distance));
            virtual_edges_existing_nodes
                .insert(package_id, GraphEdge::new(NodeId::Depot(depot), distance));
        }

        DroneGraph {
            package_graph,
            depot,
            depot_location,
            depot_edges,
            virtual_edges_existing_nodes,
        }
    }

    pub fn depot(&self) -> NodeId {
        NodeId::Depot(self.depot)
    }

    fn is_own_depot(&self, node: NodeId) -> bool {
        node == NodeId::Depot(self.depot)
    }
}

impl SearchGraph for DroneGraph<'_> {
    fn node_count(&self) -> usize {
        self.package_graph.node_count() + 1
    }

    fn node_edges(&self, node: NodeId) -> impl Iterator<Item = &GraphEdge> {
        let (base_edges, virtual_edge): (&[GraphEdge], Option<&GraphEdge>) = match node {
            NodeId::Depot(_) if self.is_own_depot(node) => (self.depot_edges.as_slice(), None),
            NodeId::Depot(_) => (&[][..], None),
            NodeId::Package(package_id) => (
                self.package_graph.package_edges(package_id),
                self.virtual_edges_existing_nodes.get(&package_id),
            ),
        };

        base_edges.iter().chain(virtual_edge)
    }

    fn node_location(&self, node: NodeId) -> Option<&Location> {
        match node {
            NodeId::Depot(_) if self.is_own_depot(node) => Some(&self.depot_location),
            NodeId::Depot(_) => None,
            NodeId::Package(package_id) => self.package_graph.package_location(package_id),
        }
    }
}
