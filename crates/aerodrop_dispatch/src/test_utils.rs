use jiff::Timestamp;

use crate::problem::{
    delivery_case::{DeliveryCase, DeliveryCaseBuilder},
    drone::{Drone, DroneBuilder},
    location::Location,
    no_fly_zone::NoFlyZone,
    package::{Package, PackageBuilder},
    time_window::{TimeWindow, TimeWindowBuilder},
};

pub const CASE_START: &str = "2025-01-01T08:00:00Z";

pub const TEST_MAX_WEIGHT: f64 = 5.0;
pub const TEST_BATTERY: f64 = 100_000.0;
pub const TEST_SPEED: f64 = 10.0;

pub fn timestamp(value: &str) -> Timestamp {
    value.parse().unwrap()
}

pub fn case_start() -> Timestamp {
    timestamp(CASE_START)
}

pub fn minutes_window(start: i64, end: i64) -> TimeWindow {
    TimeWindowBuilder::default()
        .with_minute_offsets(case_start(), start, end)
        .and_then(TimeWindowBuilder::build)
        .unwrap()
}

pub fn create_drone(id: usize, position: (f64, f64)) -> Drone {
    create_drone_with(id, position, TEST_MAX_WEIGHT, TEST_BATTERY, TEST_SPEED)
}

pub fn create_drone_with(
    id: usize,
    position: (f64, f64),
    max_weight: f64,
    battery: f64,
    speed: f64,
) -> Drone {
    let mut builder = DroneBuilder::default();
    builder
        .set_external_id(id)
        .set_max_weight(max_weight)
        .set_battery(battery)
        .set_speed(speed)
        .set_start_location(Location::from_cartesian(position.0, position.1));
    builder.build().unwrap()
}

pub fn create_package(
    id: usize,
    position: (f64, f64),
    weight: f64,
    priority: i32,
    window: (i64, i64),
) -> Package {
    let mut builder = PackageBuilder::default();
    builder
        .set_external_id(id)
        .set_location(Location::from_cartesian(position.0, position.1))
        .set_weight(weight)
        .set_priority(priority)
        .set_time_window(minutes_window(window.0, window.1));
    builder.build().unwrap()
}

pub fn create_square_zone(
    id: usize,
    corner: (f64, f64),
    side: f64,
    window: (i64, i64),
) -> NoFlyZone {
    let (x, y) = corner;
    NoFlyZone::new(
        id,
        vec![
            Location::from_cartesian(x, y),
            Location::from_cartesian(x + side, y),
            Location::from_cartesian(x + side, y + side),
            Location::from_cartesian(x, y + side),
        ],
        minutes_window(window.0, window.1),
    )
    .unwrap()
}

pub fn create_case(
    drones: Vec<Drone>,
    packages: Vec<Package>,
    no_fly_zones: Vec<NoFlyZone>,
) -> DeliveryCase {
    let mut builder = DeliveryCaseBuilder::default();
    builder
        .set_clock(case_start())
        .set_drones(drones)
        .set_packages(packages)
        .set_no_fly_zones(no_fly_zones);
    builder.build().unwrap()
}
