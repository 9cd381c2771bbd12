use jiff::Timestamp;
use tracing::debug;

use crate::problem::{
    delivery_case::DeliveryCase,
    drone::DroneIdx,
    energy::{Energy, EnergyModel},
    package::PackageIdx,
};

use super::round_trip::{RoundTrip, RoundTripPlanner};

#[derive(Debug, Clone)]
pub struct DroneAssignment {
    drone: DroneIdx,
    round_trip: RoundTrip,
    energy: Energy,
}

impl DroneAssignment {
    pub fn drone(&self) -> DroneIdx {
        self.drone
    }

    pub fn round_trip(&self) -> &RoundTrip {
        &self.round_trip
    }

    pub fn energy(&self) -> Energy {
        self.energy
    }
}

/// Picks the drone with the cheapest feasible round trip to `package_id` at `time`. A drone
/// qualifies when it is idle, can lift the package, has enough battery for the whole trip and
/// is back at its depot before the package window closes. Equal costs keep the earlier drone
/// in fleet order.
pub fn select_best_drone(
    case: &DeliveryCase,
    planner: &mut RoundTripPlanner,
    energy_model: &EnergyModel,
    package_id: PackageIdx,
    time: Timestamp,
) -> Option<DroneAssignment> {
    let package = case.package(package_id);
    let mut best: Option<DroneAssignment> = None;

    for (drone_id, drone) in case.drones_iter() {
        if !drone.is_available(time) || !drone.can_carry(package.weight()) {
            continue;
        }

        let Some(round_trip) = planner.plan(drone_id, drone, package_id, time) else {
            debug!(
                drone = drone.external_id(),
                package = package.external_id(),
                "no route"
            );
            continue;
        };

        let energy = round_trip.energy(energy_model, package.weight());
        if energy > drone.battery() {
            debug!(
                drone = drone.external_id(),
                package = package.external_id(),
                energy,
                battery = drone.battery(),
                "not enough battery"
            );
            continue;
        }

        if !package.is_within_time_window(round_trip.arrival()) {
            debug!(
                drone = drone.external_id(),
                package = package.external_id(),
                arrival = %round_trip.arrival(),
                "returns outside of the delivery window"
            );
            continue;
        }

        let is_better = best
            .as_ref()
            .is_none_or(|assignment| round_trip.cost() < assignment.round_trip.cost());
        if is_better {
            best = Some(DroneAssignment {
                drone: drone_id,
                round_trip,
                energy,
            });
        }
    }

    best
}
