pub mod a_star;
pub mod astar_heuristic;
pub mod routing_path;
pub mod weighting;
