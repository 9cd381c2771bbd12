use jiff::Timestamp;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::json::types::{JsonDeliveryCase, JsonDrone, JsonNoFlyZone, JsonPackage};

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Produces random scenarios on a 100 x 100 grid. Ids are 1-based and windows are minute
/// offsets from the start time.
pub struct RandomCaseGenerator<R: Rng> {
    rng: R,
}

impl RandomCaseGenerator<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomCaseGenerator::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomCaseGenerator<R> {
    pub fn new(rng: R) -> Self {
        RandomCaseGenerator { rng }
    }

    fn random_window(&mut self) -> [i64; 2] {
        let start = self.rng.random_range(0..=60);
        let end = self.rng.random_range(start + 1..=start + 60);
        [start, end]
    }

    fn random_position(&mut self, max: i64) -> [f64; 2] {
        [
            self.rng.random_range(0..=max) as f64,
            self.rng.random_range(0..=max) as f64,
        ]
    }

    pub fn random_drone(&mut self, id: usize) -> JsonDrone {
        JsonDrone {
            id,
            max_weight: round_to_tenth(self.rng.random_range(2.0..=6.0)),
            battery: self.rng.random_range(8000..=20000) as f64,
            speed: round_to_tenth(self.rng.random_range(5.0..=12.0)),
            start_pos: self.random_position(100),
        }
    }

    pub fn random_package(&mut self, id: usize) -> JsonPackage {
        JsonPackage {
            id,
            pos: self.random_position(100),
            weight: round_to_tenth(self.rng.random_range(0.5..=4.5)),
            priority: self.rng.random_range(1..=5),
            time_window: self.random_window(),
        }
    }

    /// Axis-aligned rectangle with sides of 10 to 20.
    pub fn random_no_fly_zone(&mut self, id: usize) -> JsonNoFlyZone {
        let [x1, y1] = self.random_position(80);
        let x2 = x1 + self.rng.random_range(10..=20) as f64;
        let y2 = y1 + self.rng.random_range(10..=20) as f64;

        JsonNoFlyZone {
            id,
            coordinates: vec![[x1, y1], [x2, y1], [x2, y2], [x1, y2]],
            active_time: self.random_window(),
        }
    }

    pub fn generate(
        &mut self,
        start_time: Timestamp,
        drones: usize,
        packages: usize,
        no_fly_zones: usize,
    ) -> JsonDeliveryCase {
        JsonDeliveryCase {
            start_time,
            drones: (1..=drones).map(|id| self.random_drone(id)).collect(),
            packages: (1..=packages).map(|id| self.random_package(id)).collect(),
            no_fly_zones: (1..=no_fly_zones)
                .map(|id| self.random_no_fly_zone(id))
                .collect(),
        }
    }
}
