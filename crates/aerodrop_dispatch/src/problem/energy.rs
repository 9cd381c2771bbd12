use serde::Serialize;

/// Energy units drained from a drone battery.
pub type Energy = f64;

pub const DEFAULT_BASE_CONSUMPTION: f64 = 35.0;

/// `energy = distance * base_consumption * (1 + weight / 10)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyModel {
    base_consumption: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        EnergyModel {
            base_consumption: DEFAULT_BASE_CONSUMPTION,
        }
    }
}

impl EnergyModel {
    pub fn new(base_consumption: f64) -> Self {
        EnergyModel { base_consumption }
    }

    pub fn consumption(&self, distance: f64, weight: f64) -> Energy {
        let weight_factor = 1.0 + weight / 10.0;
        distance * self.base_consumption * weight_factor
    }
}
