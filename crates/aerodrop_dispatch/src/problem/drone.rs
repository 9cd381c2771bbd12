use jiff::Timestamp;
use serde::Serialize;
use tracing::debug;

use crate::{define_index_newtype, error::ProblemError};

use super::{location::Location, meters_per_second::MetersPerSecond};

define_index_newtype!(DroneIdx, Drone);

#[derive(Serialize, Debug, Clone)]
pub struct Drone {
    external_id: usize,
    max_weight: f64,
    battery: f64,
    speed: MetersPerSecond,
    start_location: Location,
    busy_until: Option<Timestamp>,
}

impl Drone {
    pub fn external_id(&self) -> usize {
        self.external_id
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn battery(&self) -> f64 {
        self.battery
    }

    pub fn speed(&self) -> MetersPerSecond {
        self.speed
    }

    pub fn start_location(&self) -> &Location {
        &self.start_location
    }

    pub fn busy_until(&self) -> Option<Timestamp> {
        self.busy_until
    }

    pub fn can_carry(&self, weight: f64) -> bool {
        weight <= self.max_weight
    }

    pub fn is_available(&self, time: Timestamp) -> bool {
        match self.busy_until {
            Some(busy_until) => time >= busy_until,
            None => true,
        }
    }

    /// Never moves `busy_until` backwards.
    pub fn set_busy(&mut self, until: Timestamp) {
        let busy_until = match self.busy_until {
            Some(current) => current.max(until),
            None => until,
        };

        debug!(drone = self.external_id, %busy_until, "drone busy");
        self.busy_until = Some(busy_until);
    }
}

#[derive(Default)]
pub struct DroneBuilder {
    external_id: Option<usize>,
    max_weight: Option<f64>,
    battery: Option<f64>,
    speed: Option<f64>,
    start_location: Option<Location>,
    busy_until: Option<Timestamp>,
}

impl DroneBuilder {
    pub fn set_external_id(&mut self, external_id: usize) -> &mut DroneBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_max_weight(&mut self, max_weight: f64) -> &mut DroneBuilder {
        self.max_weight = Some(max_weight);
        self
    }

    pub fn set_battery(&mut self, battery: f64) -> &mut DroneBuilder {
        self.battery = Some(battery);
        self
    }

    pub fn set_speed(&mut self, speed: f64) -> &mut DroneBuilder {
        self.speed = Some(speed);
        self
    }

    pub fn set_start_location(&mut self, start_location: Location) -> &mut DroneBuilder {
        self.start_location = Some(start_location);
        self
    }

    pub fn set_busy_until(&mut self, busy_until: Timestamp) -> &mut DroneBuilder {
        self.busy_until = Some(busy_until);
        self
    }

    pub fn build(self) -> Result<Drone, ProblemError> {
        let missing = |field| ProblemError::MissingField {
            entity: "drone",
            field,
        };

        let external_id = self.external_id.ok_or_else(|| missing("id"))?;
        let max_weight = self.max_weight.ok_or_else(|| missing("max_weight"))?;
        let battery = self.battery.ok_or_else(|| missing("battery"))?;
        let speed = MetersPerSecond::new(self.speed.ok_or_else(|| missing("speed"))?);
        let start_location = self.start_location.ok_or_else(|| missing("start_pos"))?;

        if !speed.is_valid() {
            return Err(ProblemError::InvalidSpeed {
                id: external_id,
                speed: speed.value(),
            });
        }

        for (field, value) in [("max_weight", max_weight), ("battery", battery)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ProblemError::InvalidAmount {
                    entity: "drone",
                    id: external_id,
                    field,
                    value,
                });
            }
        }

        if !start_location.is_finite() {
            return Err(ProblemError::NonFiniteCoordinate {
                entity: "drone",
                id: external_id,
            });
        }

        Ok(Drone {
            external_id,
            max_weight,
            battery,
            speed,
            start_location,
            busy_until: self.busy_until,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_drone, timestamp};

    #[test]
    fn test_can_carry_up_to_max_weight() {
        let drone = create_drone(1, (0.0, 0.0));
        assert!(drone.can_carry(drone.max_weight()));
        assert!(!drone.can_carry(drone.max_weight() + 0.1));
    }

    #[test]
    fn test_available_without_busy_until() {
        let drone = create_drone(1, (0.0, 0.0));
        assert!(drone.is_available(timestamp("2025-01-01T00:00:00Z")));
    }

    #[test]
    fn test_busy_until_is_never_moved_backwards() {
        let mut drone = create_drone(1, (0.0, 0.0));
        drone.set_busy(timestamp("2025-01-01T10:00:00Z"));
        drone.set_busy(timestamp("2025-01-01T09:00:00Z"));

        assert_eq!(drone.busy_until(), Some(timestamp("2025-01-01T10:00:00Z")));
        assert!(!drone.is_available(timestamp("2025-01-01T09:59:59Z")));
        assert!(drone.is_available(timestamp("2025-01-01T10:00:00Z")));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let mut builder = DroneBuilder::default();
        builder
            .set_external_id(7)
            .set_max_weight(2.0)
            .set_battery(1000.0)
            .set_speed(-1.0)
            .set_start_location(Location::from_cartesian(0.0, 0.0));

        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::InvalidSpeed { id: 7, speed: -1.0 }
        );
    }

    #[test]
    fn test_rejects_missing_field() {
        let mut builder = DroneBuilder::default();
        builder.set_external_id(7);

        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::MissingField {
                entity: "drone",
                field: "max_weight"
            }
        );
    }

    #[test]
    fn test_rejects_negative_battery() {
        let mut builder = DroneBuilder::default();
        builder
            .set_external_id(3)
            .set_max_weight(2.0)
            .set_battery(-5.0)
            .set_speed(10.0)
            .set_start_location(Location::from_cartesian(0.0, 0.0));

        assert!(matches!(
            builder.build(),
            Err(ProblemError::InvalidAmount {
                field: "battery",
                ..
            })
        ));
    }
}
