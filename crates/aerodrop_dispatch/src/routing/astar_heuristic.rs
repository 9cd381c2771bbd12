use jiff::SignedDuration;

use crate::problem::{location::Location, meters_per_second::MetersPerSecond};

use super::weighting::Cost;

pub trait AStarHeuristic {
    /// Lower bound of the cost from `from` to `to`.
    fn estimate(&self, from: &Location, to: &Location) -> Cost;

    /// Lower bound of the flight time from `from` to `to`, if it fits in a duration.
    fn estimate_duration(
        &self,
        from: &Location,
        to: &Location,
        speed: MetersPerSecond,
    ) -> Option<SignedDuration>;
}

/// Straight-line distance. Penalties only ever add to an edge's cost, so it never overestimates.
pub struct EuclideanHeuristic;

impl AStarHeuristic for EuclideanHeuristic {
    fn estimate(&self, from: &Location, to: &Location) -> Cost {
        from.euclidean_distance(to).value()
    }

    fn estimate_duration(
        &self,
        from: &Location,
        to: &Location,
        speed: MetersPerSecond,
    ) -> Option<SignedDuration> {
        from.euclidean_distance(to).flight_time(speed)
    }
}
