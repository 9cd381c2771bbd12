pub mod schema;
pub mod solution;
pub mod types;
