pub mod error;
pub mod generator;
pub mod graph;
pub mod json;
pub mod problem;
pub mod routing;
pub mod solver;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
