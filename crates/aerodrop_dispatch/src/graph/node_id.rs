use serde::Serialize;

use crate::problem::{drone::DroneIdx, package::PackageIdx};

/// A vertex of a drone's search graph. Depots order before packages.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Depot(DroneIdx),
    Package(PackageIdx),
}

impl NodeId {
    pub fn package(&self) -> Option<PackageIdx> {
        match self {
            NodeId::Package(package_id) => Some(*package_id),
            NodeId::Depot(_) => None,
        }
    }

    pub fn is_depot(&self) -> bool {
        matches!(self, NodeId::Depot(_))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Depot(drone_id) => write!(f, "depot({drone_id})"),
            NodeId::Package(package_id) => write!(f, "package({package_id})"),
        }
    }
}
