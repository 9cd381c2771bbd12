pub mod drone_graph;
pub mod graph_edge;
pub mod node_id;
pub mod package_graph;
pub mod package_location_index;
pub mod search_graph;
