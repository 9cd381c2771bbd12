pub mod drone_selection;
pub mod round_trip;
pub mod solution;
pub mod solution_summary;
pub mod solver;
pub mod solver_params;
