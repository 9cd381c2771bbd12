use thiserror::Error;

/// Validation failures raised while building a [`DeliveryCase`](crate::problem::delivery_case::DeliveryCase).
///
/// The search and dispatch code assumes entities that passed these checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("{entity}: missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("drone {id}: speed must be a positive finite number, got {speed}")]
    InvalidSpeed { id: usize, speed: f64 },
    #[error("{entity} {id}: `{field}` must be a non-negative finite number, got {value}")]
    InvalidAmount {
        entity: &'static str,
        id: usize,
        field: &'static str,
        value: f64,
    },
    #[error("{entity} {id}: time window falls outside the supported time range")]
    TimeOutOfRange { entity: &'static str, id: usize },
    #[error("{entity} {id}: time window ends before it starts")]
    InvalidTimeWindow { entity: &'static str, id: usize },
    #[error("no-fly zone {id}: polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon { id: usize, vertices: usize },
    #[error("{entity} {id}: coordinates must be finite")]
    NonFiniteCoordinate { entity: &'static str, id: usize },
    #[error("duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: usize },
}
