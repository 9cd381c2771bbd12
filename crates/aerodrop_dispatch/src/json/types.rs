use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::ProblemError,
    problem::{
        delivery_case::{DeliveryCase, DeliveryCaseBuilder},
        drone::{Drone, DroneBuilder},
        location::Location,
        no_fly_zone::NoFlyZone,
        package::{Package, PackageBuilder},
        time_window::{TimeWindow, TimeWindowBuilder},
    },
};

/// A delivery scenario. Time windows are minute offsets from `start_time`.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "DeliveryCase")]
pub struct JsonDeliveryCase {
    pub start_time: Timestamp,
    pub drones: Vec<JsonDrone>,
    pub packages: Vec<JsonPackage>,
    #[serde(default)]
    pub no_fly_zones: Vec<JsonNoFlyZone>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Drone")]
pub struct JsonDrone {
    pub id: usize,
    pub max_weight: f64,
    pub battery: f64,
    /// Meters per second
    pub speed: f64,
    pub start_pos: [f64; 2],
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Package")]
pub struct JsonPackage {
    pub id: usize,
    pub pos: [f64; 2],
    pub weight: f64,
    /// Higher is more urgent
    #[serde(default)]
    pub priority: i32,
    /// `[start, end]` in minutes from the case start time
    pub time_window: [i64; 2],
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "NoFlyZone")]
pub struct JsonNoFlyZone {
    pub id: usize,
    pub coordinates: Vec<[f64; 2]>,
    /// `[start, end]` in minutes from the case start time
    pub active_time: [i64; 2],
}

fn minutes_window(
    origin: Timestamp,
    [start, end]: [i64; 2],
    entity: &'static str,
    id: usize,
) -> Result<TimeWindow, ProblemError> {
    TimeWindowBuilder::default()
        .with_minute_offsets(origin, start, end)
        .and_then(TimeWindowBuilder::build)
        .ok_or(ProblemError::TimeOutOfRange { entity, id })
}

impl JsonDrone {
    fn build(&self, start_time: Timestamp) -> Result<Drone, ProblemError> {
        let mut builder = DroneBuilder::default();
        builder
            .set_external_id(self.id)
            .set_max_weight(self.max_weight)
            .set_battery(self.battery)
            .set_speed(self.speed)
            .set_start_location(Location::from(self.start_pos))
            .set_busy_until(start_time);

        builder.build()
    }
}

impl JsonPackage {
    fn build(&self, start_time: Timestamp) -> Result<Package, ProblemError> {
        let mut builder = PackageBuilder::default();
        builder
            .set_external_id(self.id)
            .set_location(Location::from(self.pos))
            .set_weight(self.weight)
            .set_priority(self.priority)
            .set_time_window(minutes_window(
                start_time,
                self.time_window,
                "package",
                self.id,
            )?);

        builder.build()
    }
}

impl JsonNoFlyZone {
    fn build(&self, start_time: Timestamp) -> Result<NoFlyZone, ProblemError> {
        let active_time = minutes_window(start_time, self.active_time, "no-fly zone", self.id)?;

        NoFlyZone::new(
            self.id,
            self.coordinates.iter().copied().map(Location::from).collect(),
            active_time,
        )
    }
}

impl JsonDeliveryCase {
    #[instrument(skip_all, level = "debug")]
    pub fn build_case(&self) -> Result<DeliveryCase, ProblemError> {
        let drones = self
            .drones
            .iter()
            .map(|drone| drone.build(self.start_time))
            .collect::<Result<Vec<_>, _>>()?;

        let packages = self
            .packages
            .iter()
            .map(|package| package.build(self.start_time))
            .collect::<Result<Vec<_>, _>>()?;

        let no_fly_zones = self
            .no_fly_zones
            .iter()
            .map(|zone| zone.build(self.start_time))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = DeliveryCaseBuilder::default();
        builder
            .set_clock(self.start_time)
            .set_drones(drones)
            .set_packages(packages)
            .set_no_fly_zones(no_fly_zones);

        builder.build()
    }
}
