use jiff::Timestamp;
use tracing::trace;

use crate::{
    graph::{drone_graph::DroneGraph, node_id::NodeId, package_graph::PackageGraph},
    problem::{
        drone::{Drone, DroneIdx},
        energy::{Energy, EnergyModel},
        meters::Meters,
        no_fly_zone::NoFlyZone,
        package::PackageIdx,
    },
    routing::{
        a_star::AStar,
        astar_heuristic::EuclideanHeuristic,
        routing_path::RoutingPath,
        weighting::{Cost, NoFlyZoneWeighting},
    },
};

use super::solver_params::SolverParams;

/// Depot to package and back. The return leg leaves the package the instant the outbound leg
/// arrives.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    outbound: RoutingPath,
    inbound: RoutingPath,
}

impl RoundTrip {
    pub fn new(outbound: RoutingPath, inbound: RoutingPath) -> Self {
        RoundTrip { outbound, inbound }
    }

    pub fn outbound(&self) -> &RoutingPath {
        &self.outbound
    }

    pub fn inbound(&self) -> &RoutingPath {
        &self.inbound
    }

    pub fn cost(&self) -> Cost {
        self.outbound.cost() + self.inbound.cost()
    }

    pub fn distance(&self) -> Meters {
        self.outbound.distance() + self.inbound.distance()
    }

    pub fn departure(&self) -> Timestamp {
        self.outbound.departure()
    }

    /// Time at which the drone is back at its depot.
    pub fn arrival(&self) -> Timestamp {
        self.inbound.arrival()
    }

    /// Battery drained by the trip: the outbound leg carries the package, the return leg is
    /// flown empty. Consumption is computed on the leg costs.
    pub fn energy(&self, energy_model: &EnergyModel, weight: f64) -> Energy {
        energy_model.consumption(self.outbound.cost(), weight)
            + energy_model.consumption(self.inbound.cost(), 0.0)
    }
}

pub struct RoundTripPlanner<'a> {
    package_graph: &'a PackageGraph,
    weighting: NoFlyZoneWeighting<'a>,
    a_star: AStar<EuclideanHeuristic>,
}

impl<'a> RoundTripPlanner<'a> {
    pub fn new(
        package_graph: &'a PackageGraph,
        no_fly_zones: &'a [NoFlyZone],
        params: &SolverParams,
    ) -> Self {
        RoundTripPlanner {
            package_graph,
            weighting: NoFlyZoneWeighting::new(no_fly_zones, params.no_fly_zone_penalty),
            a_star: AStar::default(),
        }
    }

    /// Plans the round trip of `drone` to `package_id`, leaving at `departure`. `None` when
    /// either leg has no route.
    pub fn plan(
        &mut self,
        drone_id: DroneIdx,
        drone: &Drone,
        package_id: PackageIdx,
        departure: Timestamp,
    ) -> Option<RoundTrip> {
        let graph = DroneGraph::new(self.package_graph, drone_id, *drone.start_location());
        let depot = graph.depot();
        let package = NodeId::Package(package_id);

        let outbound = self.a_star.find_path(
            &graph,
            &self.weighting,
            depot,
            package,
            drone.speed(),
            departure,
        )?;

        let inbound = self.a_star.find_path(
            &graph,
            &self.weighting,
            package,
            depot,
            drone.speed(),
            outbound.arrival(),
        )?;

        trace!(
            drone = drone.external_id(),
            outbound = outbound.cost(),
            inbound = inbound.cost(),
            arrival = %inbound.arrival(),
            "planned round trip"
        );

        Some(RoundTrip::new(outbound, inbound))
    }
}
