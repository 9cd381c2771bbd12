use fxhash::FxHashSet;
use jiff::Timestamp;
use tracing::debug;

use crate::{error::ProblemError, graph::node_id::NodeId};

use super::{
    drone::{Drone, DroneIdx},
    location::Location,
    no_fly_zone::{NoFlyZone, any_zone_conflict},
    package::{Package, PackageIdx, UndeliverableReason},
};

/// The simulated world: clock, fleet, backlog and restricted airspace.
#[derive(Debug)]
pub struct DeliveryCase {
    clock: Timestamp,
    drones: Vec<Drone>,
    packages: Vec<Package>,
    no_fly_zones: Vec<NoFlyZone>,
}

impl DeliveryCase {
    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    /// Moves the clock forward to `time`. Earlier instants are ignored.
    pub fn advance_clock_to(&mut self, time: Timestamp) {
        if time > self.clock {
            debug!(from = %self.clock, to = %time, "advancing clock");
            self.clock = time;
        }
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn drone(&self, drone_id: DroneIdx) -> &Drone {
        &self.drones[drone_id]
    }

    pub(crate) fn drone_mut(&mut self, drone_id: DroneIdx) -> &mut Drone {
        &mut self.drones[drone_id]
    }

    pub fn drones_iter(&self) -> impl Iterator<Item = (DroneIdx, &Drone)> {
        DroneIdx::range(self.drones.len()).zip(self.drones.iter())
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, package_id: PackageIdx) -> &Package {
        &self.packages[package_id]
    }

    pub(crate) fn package_mut(&mut self, package_id: PackageIdx) -> &mut Package {
        &mut self.packages[package_id]
    }

    pub fn packages_iter(&self) -> impl Iterator<Item = (PackageIdx, &Package)> {
        PackageIdx::range(self.packages.len()).zip(self.packages.iter())
    }

    pub fn no_fly_zones(&self) -> &[NoFlyZone] {
        &self.no_fly_zones
    }

    pub fn node_location(&self, node: NodeId) -> &Location {
        match node {
            NodeId::Depot(drone_id) => self.drone(drone_id).start_location(),
            NodeId::Package(package_id) => self.package(package_id).location(),
        }
    }

    /// Pending packages whose delivery window contains `time`, in storage order.
    pub fn available_packages(&self, time: Timestamp) -> Vec<PackageIdx> {
        self.packages_iter()
            .filter(|(_, package)| package.is_pending() && package.is_within_time_window(time))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Highest priority first; equal priorities keep their relative order.
    pub fn sort_packages_by_priority(&self, mut packages: Vec<PackageIdx>) -> Vec<PackageIdx> {
        packages.sort_by(|&a, &b| {
            self.package(b)
                .priority()
                .cmp(&self.package(a).priority())
        });
        packages
    }

    /// The pending package whose window opens soonest strictly after `time`.
    pub fn next_eligible_package(&self, time: Timestamp) -> Option<PackageIdx> {
        self.packages_iter()
            .filter(|(_, package)| {
                package.is_pending() && package.time_window().starts_after(time)
            })
            .min_by_key(|(_, package)| package.time_window().start())
            .map(|(idx, _)| idx)
    }

    /// Drones ordered by the moment they are released. Drones that were never dispatched
    /// come last.
    pub fn next_available_drones(&self) -> Vec<DroneIdx> {
        let mut drones = DroneIdx::range(self.drones.len()).collect::<Vec<_>>();
        drones.sort_by_key(|&drone_id| {
            let busy_until = self.drone(drone_id).busy_until();
            (busy_until.is_none(), busy_until)
        });
        drones
    }

    /// Earliest instant strictly after `time` at which a busy drone is released.
    pub fn next_drone_release_after(&self, time: Timestamp) -> Option<Timestamp> {
        self.next_available_drones()
            .into_iter()
            .filter_map(|drone_id| self.drone(drone_id).busy_until())
            .find(|&busy_until| busy_until > time)
    }

    /// Every package reached `Delivered` or `Undeliverable`.
    pub fn is_complete(&self) -> bool {
        self.packages
            .iter()
            .all(|package| package.status().is_terminal())
    }

    pub fn conflicts_with_no_fly_zone(&self, from: &Location, to: &Location, time: Timestamp) -> bool {
        any_zone_conflict(&self.no_fly_zones, from, to, time)
    }

    pub fn delivered_count(&self) -> usize {
        self.packages.iter().filter(|p| p.is_delivered()).count()
    }

    pub fn undeliverable_count(&self) -> usize {
        self.packages
            .iter()
            .filter(|p| p.status().is_terminal() && !p.is_delivered())
            .count()
    }

    pub fn successful_delivery_percent(&self) -> f64 {
        if self.packages.is_empty() {
            return 0.0;
        }

        self.delivered_count() as f64 / self.packages.len() as f64 * 100.0
    }

    /// Marks every package that is still pending as undeliverable. Returns how many changed.
    pub(crate) fn expire_pending_packages(&mut self) -> usize {
        self.packages
            .iter_mut()
            .filter(|package| package.is_pending())
            .map(|package| package.set_undeliverable(UndeliverableReason::WindowExpired))
            .filter(|changed| *changed)
            .count()
    }
}

#[derive(Default)]
pub struct DeliveryCaseBuilder {
    clock: Option<Timestamp>,
    drones: Vec<Drone>,
    packages: Vec<Package>,
    no_fly_zones: Vec<NoFlyZone>,
}

impl DeliveryCaseBuilder {
    pub fn set_clock(&mut self, clock: Timestamp) -> &mut DeliveryCaseBuilder {
        self.clock = Some(clock);
        self
    }

    pub fn set_drones(&mut self, drones: Vec<Drone>) -> &mut DeliveryCaseBuilder {
        self.drones = drones;
        self
    }

    pub fn add_drone(&mut self, drone: Drone) -> &mut DeliveryCaseBuilder {
        self.drones.push(drone);
        self
    }

    pub fn set_packages(&mut self, packages: Vec<Package>) -> &mut DeliveryCaseBuilder {
        self.packages = packages;
        self
    }

    pub fn set_no_fly_zones(&mut self, no_fly_zones: Vec<NoFlyZone>) -> &mut DeliveryCaseBuilder {
        self.no_fly_zones = no_fly_zones;
        self
    }

    pub fn build(self) -> Result<DeliveryCase, ProblemError> {
        let clock = self.clock.ok_or(ProblemError::MissingField {
            entity: "case",
            field: "start_time",
        })?;

        ensure_unique("drone", self.drones.iter().map(Drone::external_id))?;
        ensure_unique("package", self.packages.iter().map(Package::external_id))?;
        ensure_unique(
            "no-fly zone",
            self.no_fly_zones.iter().map(NoFlyZone::external_id),
        )?;

        Ok(DeliveryCase {
            clock,
            drones: self.drones,
            packages: self.packages,
            no_fly_zones: self.no_fly_zones,
        })
    }
}

fn ensure_unique(
    entity: &'static str,
    ids: impl Iterator<Item = usize>,
) -> Result<(), ProblemError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(ProblemError::DuplicateId { entity, id });
        }
    }
    Ok(())
}
