use geo::{
    BoundingRect, Intersects, Line, LineString, Polygon, Rect, Relate,
    coordinate_position::CoordPos, dimensions::Dimensions,
};
use jiff::Timestamp;
use serde::Serialize;

use crate::error::ProblemError;

use super::{location::Location, time_window::TimeWindow};

#[derive(Serialize, Debug, Clone)]
pub struct NoFlyZone {
    external_id: usize,
    polygon: Polygon,
    #[serde(skip)]
    bounding_rect: Rect,
    active_time: TimeWindow,
}

impl NoFlyZone {
    pub fn new(
        external_id: usize,
        coordinates: Vec<Location>,
        active_time: TimeWindow,
    ) -> Result<Self, ProblemError> {
        if coordinates.iter().any(|location| !location.is_finite()) {
            return Err(ProblemError::NonFiniteCoordinate {
                entity: "no-fly zone",
                id: external_id,
            });
        }

        if !active_time.is_valid() {
            return Err(ProblemError::InvalidTimeWindow {
                entity: "no-fly zone",
                id: external_id,
            });
        }

        let exterior = LineString::from(
            coordinates
                .iter()
                .map(geo::Coord::from)
                .collect::<Vec<_>>(),
        );
        let polygon = Polygon::new(exterior, vec![]);

        // The exterior ring is closed by `Polygon::new`, so a triangle has 4 coordinates.
        let vertices = polygon.exterior().0.len().saturating_sub(1);
        let bounding_rect = match polygon.bounding_rect() {
            Some(rect) if vertices >= 3 => rect,
            _ => {
                return Err(ProblemError::DegeneratePolygon {
                    id: external_id,
                    vertices,
                });
            }
        };

        Ok(NoFlyZone {
            external_id,
            polygon,
            bounding_rect,
            active_time,
        })
    }

    pub fn external_id(&self) -> usize {
        self.external_id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn active_time(&self) -> &TimeWindow {
        &self.active_time
    }

    pub fn is_active(&self, time: Timestamp) -> bool {
        self.active_time.contains(time)
    }

    /// True when the straight segment `from`-`to` shares a stretch of positive length with the
    /// zone: crossing its interior or running along one of its edges. Touching a vertex or
    /// grazing the boundary at a single point is allowed.
    pub fn conflicts_with_segment(&self, from: &Location, to: &Location) -> bool {
        if from == to {
            return false;
        }

        let line = Line::new(geo::Coord::from(from), geo::Coord::from(to));
        if !self.bounding_rect.intersects(&line) {
            return false;
        }

        let matrix = line.relate(&self.polygon);

        matrix.get(CoordPos::Inside, CoordPos::Inside) == Dimensions::OneDimensional
            || matrix.get(CoordPos::Inside, CoordPos::OnBoundary) == Dimensions::OneDimensional
    }
}

/// True when the segment conflicts with any zone active at `time`.
pub fn any_zone_conflict(
    zones: &[NoFlyZone],
    from: &Location,
    to: &Location,
    time: Timestamp,
) -> bool {
    zones
        .iter()
        .any(|zone| zone.is_active(time) && zone.conflicts_with_segment(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_square_zone, timestamp};

    fn loc(x: f64, y: f64) -> Location {
        Location::from_cartesian(x, y)
    }

    #[test]
    fn test_segment_crossing_interior_conflicts() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (0, 60));

        assert!(zone.conflicts_with_segment(&loc(0.0, 15.0), &loc(30.0, 15.0)));
        assert!(zone.conflicts_with_segment(&loc(0.0, 0.0), &loc(30.0, 30.0)));
    }

    #[test]
    fn test_segment_ending_inside_conflicts() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (0, 60));

        assert!(zone.conflicts_with_segment(&loc(0.0, 15.0), &loc(15.0, 15.0)));
    }

    #[test]
    fn test_segment_outside_does_not_conflict() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (0, 60));

        assert!(!zone.conflicts_with_segment(&loc(0.0, 0.0), &loc(30.0, 0.0)));
        assert!(!zone.conflicts_with_segment(&loc(0.0, 25.0), &loc(5.0, 0.0)));
    }

    #[test]
    fn test_touching_a_vertex_does_not_conflict() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (0, 60));

        assert!(!zone.conflicts_with_segment(&loc(0.0, 20.0), &loc(20.0, 0.0)));
        assert!(!zone.conflicts_with_segment(&loc(0.0, 0.0), &loc(10.0, 10.0)));
        assert!(!zone.conflicts_with_segment(&loc(0.0, 30.0), &loc(10.0, 20.0)));
    }

    #[test]
    fn test_running_along_an_edge_conflicts() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (0, 60));

        assert!(zone.conflicts_with_segment(&loc(5.0, 10.0), &loc(25.0, 10.0)));
    }

    #[test]
    fn test_zero_length_segment() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (0, 60));

        assert!(!zone.conflicts_with_segment(&loc(15.0, 15.0), &loc(15.0, 15.0)));
    }

    #[test]
    fn test_activity_is_inclusive() {
        let zone = create_square_zone(1, (10.0, 10.0), 10.0, (10, 20));

        assert!(!zone.is_active(timestamp("2025-01-01T08:09:59Z")));
        assert!(zone.is_active(timestamp("2025-01-01T08:10:00Z")));
        assert!(zone.is_active(timestamp("2025-01-01T08:20:00Z")));
        assert!(!zone.is_active(timestamp("2025-01-01T08:20:01Z")));
    }

    #[test]
    fn test_any_zone_conflict_ignores_inactive_zones() {
        let zones = vec![create_square_zone(1, (10.0, 10.0), 10.0, (10, 20))];
        let from = loc(0.0, 15.0);
        let to = loc(30.0, 15.0);

        assert!(!any_zone_conflict(&zones, &from, &to, timestamp("2025-01-01T08:00:00Z")));
        assert!(any_zone_conflict(&zones, &from, &to, timestamp("2025-01-01T08:15:00Z")));
    }

    #[test]
    fn test_rejects_degenerate_polygon() {
        let window = TimeWindow::new(
            timestamp("2025-01-01T08:00:00Z"),
            timestamp("2025-01-01T09:00:00Z"),
        );

        let result = NoFlyZone::new(9, vec![loc(0.0, 0.0), loc(1.0, 1.0)], window);
        assert_eq!(
            result.unwrap_err(),
            ProblemError::DegeneratePolygon { id: 9, vertices: 2 }
        );
    }
}
