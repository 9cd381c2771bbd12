use jiff::Timestamp;

use crate::problem::{
    location::Location,
    meters::Meters,
    no_fly_zone::{NoFlyZone, any_zone_conflict},
};

pub type Cost = f64;

pub const DEFAULT_NO_FLY_ZONE_PENALTY: Cost = 100_000_000.0;

/// Cost of flying one edge, given the instant the drone leaves its origin.
pub trait Weighting {
    fn edge_cost(
        &self,
        from: &Location,
        to: &Location,
        distance: Meters,
        departure: Timestamp,
    ) -> Cost;
}

/// Plain geometric distance.
pub struct DistanceWeighting;

impl Weighting for DistanceWeighting {
    fn edge_cost(
        &self,
        _from: &Location,
        _to: &Location,
        distance: Meters,
        _departure: Timestamp,
    ) -> Cost {
        distance.value()
    }
}

/// Geometric distance plus a flat penalty when the segment crosses a zone that is active at
/// departure time. Overlapping zones are penalized once.
pub struct NoFlyZoneWeighting<'a> {
    no_fly_zones: &'a [NoFlyZone],
    penalty: Cost,
}

impl<'a> NoFlyZoneWeighting<'a> {
    pub fn new(no_fly_zones: &'a [NoFlyZone], penalty: Cost) -> Self {
        NoFlyZoneWeighting {
            no_fly_zones,
            penalty,
        }
    }
}

impl Weighting for NoFlyZoneWeighting<'_> {
    fn edge_cost(
        &self,
        from: &Location,
        to: &Location,
        distance: Meters,
        departure: Timestamp,
    ) -> Cost {
        if any_zone_conflict(self.no_fly_zones, from, to, departure) {
            distance.value() + self.penalty
        } else {
            distance.value()
        }
    }
}
