use fxhash::FxHashSet;
use tracing::debug;

use crate::problem::{
    location::Location,
    package::{Package, PackageIdx},
};

use super::{
    graph_edge::GraphEdge, node_id::NodeId, package_location_index::PackageLocationIndex,
    search_graph::SearchGraph,
};

/// Sparse undirected graph over package positions: every package is linked to its
/// `nearest_neighbors` closest packages, and each link is usable in both directions.
pub struct PackageGraph {
    locations: Vec<Location>,
    adjacency_list: Vec<Vec<GraphEdge>>,
    location_index: PackageLocationIndex,
    nearest_neighbors: usize,
    edge_count: usize,
}

impl PackageGraph {
    pub fn new(packages: &[Package], nearest_neighbors: usize) -> PackageGraph {
        let location_index = PackageLocationIndex::new(packages);
        let locations = packages
            .iter()
            .map(|package| *package.location())
            .collect::<Vec<_>>();

        let mut adjacency_list: Vec<Vec<GraphEdge>> = vec![vec![]; packages.len()];
        let mut linked: FxHashSet<(PackageIdx, PackageIdx)> = FxHashSet::default();

        for from in PackageIdx::range(packages.len()) {
            let location = &locations[from.get()];
            for to in location_index.k_nearest(location, nearest_neighbors, Some(from)) {
                let pair = if from < to { (from, to) } else { (to, from) };
                if !linked.insert(pair) {
                    continue;
                }

                let distance = location.euclidean_distance(&locations[to.get()]);
                adjacency_list[from.get()].push(GraphEdge::new(NodeId::Package(to), distance));
                adjacency_list[to.get()].push(GraphEdge::new(NodeId::Package(from), distance));
            }
        }

        debug!(
            packages = packages.len(),
            edges = linked.len(),
            nearest_neighbors,
            "built package graph"
        );

        PackageGraph {
            locations,
            adjacency_list,
            location_index,
            nearest_neighbors,
            edge_count: linked.len(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn package_edges(&self, package_id: PackageIdx) -> &[GraphEdge] {
        self.adjacency_list
            .get(package_id.get())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn package_location(&self, package_id: PackageIdx) -> Option<&Location> {
        self.locations.get(package_id.get())
    }

    /// Packages a virtual node placed at `location` should be linked to.
    pub fn nearest_packages(&self, location: &Location) -> Vec<PackageIdx> {
        self.location_index
            .k_nearest(location, self.nearest_neighbors, None)
    }
}

impl SearchGraph for PackageGraph {
    fn node_count(&self) -> usize {
        self.locations.len()
    }

    fn node_edges(&self, node: NodeId) -> impl Iterator<Item = &GraphEdge> {
        let edges: &[GraphEdge] = match node {
            NodeId::Package(package_id) => self.package_edges(package_id),
            NodeId::Depot(_) => &[][..],
        };
        edges.iter()
    }

    fn node_location(&self, node: NodeId) -> Option<&Location> {
        node.package()
            .and_then(|package_id| self.package_location(package_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{problem::meters::Meters, test_utils::create_package};

    fn packages(positions: &[(f64, f64)]) -> Vec<Package> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &position)| create_package(i + 1, position, 1.0, 1, (0, 60)))
            .collect()
    }

    fn neighbors(graph: &PackageGraph, package: usize) -> Vec<NodeId> {
        let mut nodes = graph
            .node_edges(NodeId::Package(PackageIdx::new(package)))
            .map(GraphEdge::to)
            .collect::<Vec<_>>();
        nodes.sort();
        nodes
    }

    #[test]
    fn test_empty_graph() {
        let graph = PackageGraph::new(&[], 4);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(
            graph
                .node_edges(NodeId::Package(PackageIdx::new(0)))
                .count(),
            0
        );
    }

    #[test]
    fn test_edges_are_symmetric() {
        let packages = packages(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (50.0, 0.0),
            (51.0, 0.0),
        ]);
        let graph = PackageGraph::new(&packages, 2);

        for from in PackageIdx::range(packages.len()) {
            for edge in graph.package_edges(from) {
                let to = edge.to().package().unwrap();
                let back = graph
                    .package_edges(to)
                    .iter()
                    .find(|edge| edge.to() == NodeId::Package(from))
                    .unwrap();
                assert_eq!(back.distance(), edge.distance());
            }
        }
    }

    #[test]
    fn test_far_package_is_linked_through_its_own_neighbors() {
        let packages = packages(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (100.0, 0.0)]);
        let graph = PackageGraph::new(&packages, 1);

        // Package 3 is nobody's nearest neighbor, but its own nearest neighbor links it back.
        assert_eq!(neighbors(&graph, 3), vec![NodeId::Package(PackageIdx::new(2))]);
        assert_eq!(
            neighbors(&graph, 2),
            vec![
                NodeId::Package(PackageIdx::new(1)),
                NodeId::Package(PackageIdx::new(3))
            ]
        );
    }

    #[test]
    fn test_edge_distance_is_euclidean() {
        let packages = packages(&[(0.0, 0.0), (3.0, 4.0)]);
        let graph = PackageGraph::new(&packages, 4);

        let edges = graph.package_edges(PackageIdx::new(0));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].distance(), Meters::new(5.0));
        assert_eq!(graph.edge_count(), 1);
    }
}
