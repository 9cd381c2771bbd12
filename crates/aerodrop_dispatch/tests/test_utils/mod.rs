#![allow(dead_code)]

use std::{fs::File, io::BufReader, path::PathBuf};

use aerodrop_dispatch::{
    json::types::JsonDeliveryCase,
    problem::{
        delivery_case::{DeliveryCase, DeliveryCaseBuilder},
        drone::{Drone, DroneBuilder},
        location::Location,
        no_fly_zone::NoFlyZone,
        package::{Package, PackageBuilder},
        time_window::{TimeWindow, TimeWindowBuilder},
    },
};
use jiff::Timestamp;

pub const CASE_START: &str = "2025-01-01T08:00:00Z";

pub fn timestamp(value: &str) -> Timestamp {
    value.parse().unwrap()
}

pub fn window(start_minutes: i64, end_minutes: i64) -> TimeWindow {
    TimeWindowBuilder::default()
        .with_minute_offsets(timestamp(CASE_START), start_minutes, end_minutes)
        .and_then(TimeWindowBuilder::build)
        .unwrap()
}

pub fn drone(id: usize, position: (f64, f64), max_weight: f64, battery: f64) -> Drone {
    let mut builder = DroneBuilder::default();
    builder
        .set_external_id(id)
        .set_max_weight(max_weight)
        .set_battery(battery)
        .set_speed(10.0)
        .set_start_location(Location::from_cartesian(position.0, position.1))
        .set_busy_until(timestamp(CASE_START));
    builder.build().unwrap()
}

pub fn package(id: usize, position: (f64, f64), weight: f64, priority: i32) -> Package {
    package_with_window(id, position, weight, priority, (0, 60))
}

pub fn package_with_window(
    id: usize,
    position: (f64, f64),
    weight: f64,
    priority: i32,
    (start, end): (i64, i64),
) -> Package {
    let mut builder = PackageBuilder::default();
    builder
        .set_external_id(id)
        .set_location(Location::from_cartesian(position.0, position.1))
        .set_weight(weight)
        .set_priority(priority)
        .set_time_window(window(start, end));
    builder.build().unwrap()
}

//
//  (x, y + height) +------+ (x + width, y + height)
//                  |      |
//           (x, y) +------+ (x + width, y)
//
pub fn rectangle_zone(
    id: usize,
    corner: (f64, f64),
    size: (f64, f64),
    active: (i64, i64),
) -> NoFlyZone {
    let (x, y) = corner;
    let (width, height) = size;
    NoFlyZone::new(
        id,
        vec![
            Location::from_cartesian(x, y),
            Location::from_cartesian(x + width, y),
            Location::from_cartesian(x + width, y + height),
            Location::from_cartesian(x, y + height),
        ],
        window(active.0, active.1),
    )
    .unwrap()
}

pub fn case(drones: Vec<Drone>, packages: Vec<Package>, zones: Vec<NoFlyZone>) -> DeliveryCase {
    let mut builder = DeliveryCaseBuilder::default();
    builder
        .set_clock(timestamp(CASE_START))
        .set_drones(drones)
        .set_packages(packages)
        .set_no_fly_zones(zones);
    builder.build().unwrap()
}

pub fn fixture_path(fixture: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture)
}

pub fn load_fixture(fixture: &str) -> JsonDeliveryCase {
    let file = File::open(fixture_path(fixture)).unwrap();
    serde_json::from_reader(BufReader::new(file)).unwrap()
}
