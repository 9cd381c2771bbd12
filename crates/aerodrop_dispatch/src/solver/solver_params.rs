use crate::{
    problem::energy::{DEFAULT_BASE_CONSUMPTION, EnergyModel},
    routing::weighting::{Cost, DEFAULT_NO_FLY_ZONE_PENALTY},
};

pub const DEFAULT_NEAREST_NEIGHBORS: usize = 4;

#[derive(Clone, Debug)]
pub struct SolverParams {
    /// Number of closest packages each package (and each depot) is linked to
    pub nearest_neighbors: usize,

    /// Added to the cost of an edge crossing an active no-fly zone
    pub no_fly_zone_penalty: Cost,

    pub energy_base_consumption: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            nearest_neighbors: DEFAULT_NEAREST_NEIGHBORS,
            no_fly_zone_penalty: DEFAULT_NO_FLY_ZONE_PENALTY,
            energy_base_consumption: DEFAULT_BASE_CONSUMPTION,
        }
    }
}

impl SolverParams {
    pub fn energy_model(&self) -> EnergyModel {
        EnergyModel::new(self.energy_base_consumption)
    }
}
