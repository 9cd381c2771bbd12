use jiff::Timestamp;
use serde::Serialize;

use crate::{define_index_newtype, error::ProblemError};

use super::{location::Location, time_window::TimeWindow};

define_index_newtype!(PackageIdx, Package);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndeliverableReason {
    /// No drone qualified and the clock could not be advanced any further.
    NoDroneAvailable,
    /// The run ended while the package was still waiting.
    WindowExpired,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageStatus {
    #[default]
    Pending,
    Delivered,
    Undeliverable(UndeliverableReason),
}

impl PackageStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PackageStatus::Pending)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Package {
    external_id: usize,
    location: Location,
    weight: f64,
    priority: i32,
    time_window: TimeWindow,
    status: PackageStatus,
}

impl Package {
    pub fn external_id(&self) -> usize {
        self.external_id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn status(&self) -> PackageStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == PackageStatus::Pending
    }

    pub fn is_delivered(&self) -> bool {
        self.status == PackageStatus::Delivered
    }

    pub fn is_within_time_window(&self, time: Timestamp) -> bool {
        self.time_window.contains(time)
    }

    /// Terminal states are sticky: returns `false` when the package already left `Pending`.
    pub fn set_delivered(&mut self) -> bool {
        self.transition(PackageStatus::Delivered)
    }

    pub fn set_undeliverable(&mut self, reason: UndeliverableReason) -> bool {
        self.transition(PackageStatus::Undeliverable(reason))
    }

    fn transition(&mut self, status: PackageStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        self.status = status;
        true
    }
}

#[derive(Default)]
pub struct PackageBuilder {
    external_id: Option<usize>,
    location: Option<Location>,
    weight: Option<f64>,
    priority: Option<i32>,
    time_window: Option<TimeWindow>,
}

impl PackageBuilder {
    pub fn set_external_id(&mut self, external_id: usize) -> &mut PackageBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_location(&mut self, location: Location) -> &mut PackageBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_weight(&mut self, weight: f64) -> &mut PackageBuilder {
        self.weight = Some(weight);
        self
    }

    pub fn set_priority(&mut self, priority: i32) -> &mut PackageBuilder {
        self.priority = Some(priority);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut PackageBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn build(self) -> Result<Package, ProblemError> {
        let missing = |field| ProblemError::MissingField {
            entity: "package",
            field,
        };

        let external_id = self.external_id.ok_or_else(|| missing("id"))?;
        let location = self.location.ok_or_else(|| missing("pos"))?;
        let weight = self.weight.ok_or_else(|| missing("weight"))?;
        let time_window = self.time_window.ok_or_else(|| missing("time_window"))?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(ProblemError::InvalidAmount {
                entity: "package",
                id: external_id,
                field: "weight",
                value: weight,
            });
        }

        if !location.is_finite() {
            return Err(ProblemError::NonFiniteCoordinate {
                entity: "package",
                id: external_id,
            });
        }

        if !time_window.is_valid() {
            return Err(ProblemError::InvalidTimeWindow {
                entity: "package",
                id: external_id,
            });
        }

        Ok(Package {
            external_id,
            location,
            weight,
            priority: self.priority.unwrap_or(0),
            time_window,
            status: PackageStatus::Pending,
        })
    }
}
