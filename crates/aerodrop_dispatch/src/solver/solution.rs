use fxhash::FxHashMap;
use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::{
    problem::{
        delivery_case::DeliveryCase,
        drone::DroneIdx,
        energy::Energy,
        location::Location,
        meters::Meters,
        meters_per_second::MetersPerSecond,
        package::PackageIdx,
    },
    routing::{routing_path::RoutingPath, weighting::Cost},
};

use super::drone_selection::DroneAssignment;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegDirection {
    Outbound,
    Return,
}

/// One flown leg, with its node path resolved to coordinates.
#[derive(Serialize, Debug, Clone)]
pub struct DronePath {
    package: PackageIdx,
    points: Vec<Location>,
    direction: LegDirection,
    cost: Cost,
    distance: Meters,
    departure: Timestamp,
    arrival: Timestamp,
}

impl DronePath {
    fn from_routing_path(
        case: &DeliveryCase,
        package: PackageIdx,
        path: &RoutingPath,
        direction: LegDirection,
    ) -> Self {
        DronePath {
            package,
            points: path
                .nodes()
                .iter()
                .map(|&node| *case.node_location(node))
                .collect(),
            direction,
            cost: path.cost(),
            distance: path.distance(),
            departure: path.departure(),
            arrival: path.arrival(),
        }
    }

    pub fn package(&self) -> PackageIdx {
        self.package
    }

    pub fn points(&self) -> &[Location] {
        &self.points
    }

    pub fn direction(&self) -> LegDirection {
        self.direction
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn departure(&self) -> Timestamp {
        self.departure
    }

    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    /// Flight time of the geometric path at `speed`. Falls back to the scheduled leg time.
    pub fn estimated_duration(&self, speed: MetersPerSecond) -> SignedDuration {
        self.distance
            .flight_time(speed)
            .unwrap_or_else(|| self.arrival.duration_since(self.departure))
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct DeliveryRecord {
    pub package: PackageIdx,
    pub drone: DroneIdx,
    pub departure: Timestamp,
    pub delivered_at: Timestamp,
    pub returned_at: Timestamp,
    pub cost: Cost,
    pub energy: Energy,
}

#[derive(Serialize, Debug, Clone)]
pub struct Solution {
    solver_name: String,
    drone_paths: FxHashMap<DroneIdx, Vec<DronePath>>,
    deliveries: Vec<DeliveryRecord>,
    total_cost: Cost,
    total_distance: Meters,
    total_energy: Energy,
}

impl Solution {
    pub fn new(solver_name: impl Into<String>) -> Self {
        Solution {
            solver_name: solver_name.into(),
            drone_paths: FxHashMap::default(),
            deliveries: vec![],
            total_cost: 0.0,
            total_distance: Meters::ZERO,
            total_energy: 0.0,
        }
    }

    pub fn solver_name(&self) -> &str {
        &self.solver_name
    }

    pub fn drone_paths(&self, drone_id: DroneIdx) -> &[DronePath] {
        self.drone_paths
            .get(&drone_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drones that flew at least once, in fleet order.
    pub fn drones_iter(&self) -> impl Iterator<Item = (DroneIdx, &[DronePath])> {
        let mut drones = self.drone_paths.keys().copied().collect::<Vec<_>>();
        drones.sort();
        drones
            .into_iter()
            .map(|drone_id| (drone_id, self.drone_paths(drone_id)))
    }

    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn total_distance(&self) -> Meters {
        self.total_distance
    }

    pub fn total_energy(&self) -> Energy {
        self.total_energy
    }

    /// Records both legs of an assignment and adds them to the totals.
    pub(crate) fn add_assignment(
        &mut self,
        case: &DeliveryCase,
        package: PackageIdx,
        assignment: &DroneAssignment,
    ) {
        let round_trip = assignment.round_trip();
        let paths = self.drone_paths.entry(assignment.drone()).or_default();

        paths.push(DronePath::from_routing_path(
            case,
            package,
            round_trip.outbound(),
            LegDirection::Outbound,
        ));
        paths.push(DronePath::from_routing_path(
            case,
            package,
            round_trip.inbound(),
            LegDirection::Return,
        ));

        self.deliveries.push(DeliveryRecord {
            package,
            drone: assignment.drone(),
            departure: round_trip.departure(),
            delivered_at: round_trip.outbound().arrival(),
            returned_at: round_trip.arrival(),
            cost: round_trip.cost(),
            energy: assignment.energy(),
        });

        self.total_cost += round_trip.cost();
        self.total_distance += round_trip.distance();
        self.total_energy += assignment.energy();
    }
}
