use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
    problem::{
        delivery_case::DeliveryCase, meters_per_second::MetersPerSecond, package::PackageStatus,
    },
    solver::solution::{DronePath, LegDirection, Solution},
};

/// Solution export consumed by plotting tools. Entities are referred to by their input ids.
#[derive(Serialize, JsonSchema, Debug)]
#[serde(rename = "Solution")]
pub struct JsonSolution {
    pub solver_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_cost: f64,
    pub total_distance: f64,
    pub total_energy: f64,
    pub delivery_percent: f64,
    pub drones: Vec<JsonDroneSolution>,
    pub packages: Vec<JsonPackageOutcome>,
}

#[derive(Serialize, JsonSchema, Debug)]
#[serde(rename = "DroneSolution")]
pub struct JsonDroneSolution {
    pub drone_id: usize,
    pub legs: Vec<JsonLeg>,
}

#[derive(Serialize, JsonSchema, Debug)]
#[serde(rename = "Leg")]
pub struct JsonLeg {
    pub package_id: usize,
    pub is_return: bool,
    pub points: Vec<[f64; 2]>,
    pub cost: f64,
    pub distance: f64,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    pub estimated_duration: SignedDuration,
}

#[derive(Serialize, JsonSchema, Debug)]
#[serde(rename = "PackageOutcome")]
pub struct JsonPackageOutcome {
    pub package_id: usize,
    pub status: String,
}

impl JsonSolution {
    pub fn from_solution(start_time: Timestamp, case: &DeliveryCase, solution: &Solution) -> Self {
        let drones = solution
            .drones_iter()
            .map(|(drone_id, paths)| {
                let drone = case.drone(drone_id);
                JsonDroneSolution {
                    drone_id: drone.external_id(),
                    legs: paths
                        .iter()
                        .map(|path| JsonLeg::from_path(case, path, drone.speed()))
                        .collect(),
                }
            })
            .collect();

        let packages = case
            .packages()
            .iter()
            .map(|package| JsonPackageOutcome {
                package_id: package.external_id(),
                status: match package.status() {
                    PackageStatus::Pending => "pending".to_owned(),
                    PackageStatus::Delivered => "delivered".to_owned(),
                    PackageStatus::Undeliverable(reason) => {
                        format!("undeliverable ({reason:?})")
                    }
                },
            })
            .collect();

        JsonSolution {
            solver_name: solution.solver_name().to_owned(),
            start_time,
            end_time: case.clock(),
            total_cost: solution.total_cost(),
            total_distance: solution.total_distance().value(),
            total_energy: solution.total_energy(),
            delivery_percent: case.successful_delivery_percent(),
            drones,
            packages,
        }
    }
}

impl JsonLeg {
    fn from_path(
        case: &DeliveryCase,
        path: &DronePath,
        speed: MetersPerSecond,
    ) -> Self {
        JsonLeg {
            package_id: case.package(path.package()).external_id(),
            is_return: path.direction() == LegDirection::Return,
            points: path.points().iter().map(|point| point.as_array()).collect(),
            cost: path.cost(),
            distance: path.distance().value(),
            departure: path.departure(),
            arrival: path.arrival(),
            estimated_duration: path.estimated_duration(speed),
        }
    }
}
