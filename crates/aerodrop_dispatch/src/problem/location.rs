use geo::{Distance, Euclidean};
use serde::Serialize;

use super::meters::Meters;

/// A position on the cartesian simulation plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            point: geo::Point::new(x, y),
        }
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    pub fn euclidean_distance(&self, to: &Location) -> Meters {
        let euclidean = Euclidean;
        Meters::new(euclidean.distance(&self.point, &to.point))
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.x(), self.y()]
    }
}

impl From<[f64; 2]> for Location {
    fn from(value: [f64; 2]) -> Self {
        Location::from_cartesian(value[0], value[1])
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}

impl From<&Location> for geo::Coord<f64> {
    fn from(val: &Location) -> Self {
        geo::Coord {
            x: val.x(),
            y: val.y(),
        }
    }
}
