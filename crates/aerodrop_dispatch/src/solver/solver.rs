use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    graph::package_graph::PackageGraph,
    problem::{delivery_case::DeliveryCase, package::UndeliverableReason},
};

use super::{
    drone_selection::select_best_drone, round_trip::RoundTripPlanner, solution::Solution,
    solver_params::SolverParams,
};

pub const SOLVER_NAME: &str = "A* Solver";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

/// Greedy dispatcher: repeatedly hands the most urgent deliverable package to the drone with
/// the cheapest feasible round trip, and moves the clock forward when nothing can be done at
/// the current instant.
pub struct Solver {
    params: SolverParams,
    status: SolverStatus,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(SolverParams::default())
    }
}

impl Solver {
    pub fn new(params: SolverParams) -> Self {
        Solver {
            params,
            status: SolverStatus::Pending,
        }
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// Runs the dispatch simulation to completion. On return every package is either
    /// delivered or undeliverable, and the case clock is the last simulated instant.
    #[instrument(
        skip_all,
        level = "info",
        fields(drones = case.drones().len(), packages = case.packages().len())
    )]
    pub fn solve(&mut self, case: &mut DeliveryCase) -> Solution {
        self.status = SolverStatus::Running;
        info!(start = %case.clock(), "dispatch started");

        let package_graph = PackageGraph::new(case.packages(), self.params.nearest_neighbors);
        let energy_model = self.params.energy_model();
        let mut solution = Solution::new(SOLVER_NAME);

        loop {
            let now = case.clock();
            let available = case.sort_packages_by_priority(case.available_packages(now));

            let Some(&package_id) = available.first() else {
                match case.next_eligible_package(now) {
                    Some(next) => {
                        let opens_at = case.package(next).time_window().start();
                        debug!(from = %now, to = %opens_at, "waiting for the next delivery window");
                        case.advance_clock_to(opens_at);
                        continue;
                    }
                    None => break,
                }
            };

            let assignment = {
                let mut planner =
                    RoundTripPlanner::new(&package_graph, case.no_fly_zones(), &self.params);
                select_best_drone(case, &mut planner, &energy_model, package_id, now)
            };

            let Some(assignment) = assignment else {
                match case.next_drone_release_after(now) {
                    Some(released_at) => {
                        debug!(
                            package = case.package(package_id).external_id(),
                            to = %released_at,
                            "no drone available, waiting for the next release"
                        );
                        case.advance_clock_to(released_at);
                    }
                    None => {
                        info!(
                            package = case.package(package_id).external_id(),
                            "no drone can ever deliver package"
                        );
                        case.package_mut(package_id)
                            .set_undeliverable(UndeliverableReason::NoDroneAvailable);
                    }
                }
                continue;
            };

            let drone_id = assignment.drone();
            info!(
                package = case.package(package_id).external_id(),
                drone = case.drone(drone_id).external_id(),
                cost = assignment.round_trip().cost(),
                returns_at = %assignment.round_trip().arrival(),
                "package assigned"
            );

            solution.add_assignment(case, package_id, &assignment);
            case.package_mut(package_id).set_delivered();
            case.drone_mut(drone_id)
                .set_busy(assignment.round_trip().arrival());
        }

        let expired = case.expire_pending_packages();
        if expired > 0 {
            info!(expired, "packages left pending when the dispatch ended");
        }

        info!(
            delivered = case.delivered_count(),
            undeliverable = case.undeliverable_count(),
            total_cost = solution.total_cost(),
            "dispatch completed"
        );

        self.status = SolverStatus::Completed;
        solution
    }
}
