use serde::Serialize;

use crate::{
    problem::{delivery_case::DeliveryCase, energy::Energy},
    routing::weighting::Cost,
};

use super::solution::Solution;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SolutionSummary {
    pub solver_name: String,
    pub drones: usize,
    pub drones_used: usize,
    pub packages: usize,
    pub delivered: usize,
    pub undeliverable: usize,
    pub delivery_percent: f64,
    pub total_cost: Cost,
    pub total_distance: f64,
    pub total_energy: Energy,
}

impl SolutionSummary {
    pub fn new(case: &DeliveryCase, solution: &Solution) -> Self {
        SolutionSummary {
            solver_name: solution.solver_name().to_owned(),
            drones: case.drones().len(),
            drones_used: solution.drones_iter().count(),
            packages: case.packages().len(),
            delivered: case.delivered_count(),
            undeliverable: case.undeliverable_count(),
            delivery_percent: case.successful_delivery_percent(),
            total_cost: solution.total_cost(),
            total_distance: solution.total_distance().value(),
            total_energy: solution.total_energy(),
        }
    }
}
