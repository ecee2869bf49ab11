//! Map viewport: a center point plus a zoom level, translated into
//! longitude/latitude bounds for the canvas and back from terminal
//! cells to coordinates for mouse clicks.

use ratatui::layout::Rect;
use waymark_lib::GeoPoint;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 13;
pub const INITIAL_ZOOM: u8 = 5;

// Fraction of the visible span moved per pan step.
pub const PAN_STEP: f64 = 0.125;

#[derive(Debug, Clone, Copy)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl MapView {
    #[must_use]
    pub fn new(center: GeoPoint) -> Self {
        MapView {
            center,
            zoom: INITIAL_ZOOM,
        }
    }

    /// Viewport bounds as ([west, east], [south, north]). Zoom 1 shows
    /// the full 360 degrees of longitude; each level halves the span.
    /// Latitude spans half the longitude range to roughly match the 2:1
    /// cell aspect of terminal fonts.
    #[must_use]
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let lng_span = 360.0 / f64::from(1u32 << (self.zoom - MIN_ZOOM));
        let lat_span = lng_span / 2.0;
        (
            [
                self.center.longitude - lng_span / 2.0,
                self.center.longitude + lng_span / 2.0,
            ],
            [
                self.center.latitude - lat_span / 2.0,
                self.center.latitude + lat_span / 2.0,
            ],
        )
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Moves the center by fractions of the visible span. Positive `dx`
    /// pans east, positive `dy` pans north.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let ([west, east], [south, north]) = self.bounds();
        self.center.longitude += (east - west) * dx;
        self.center.latitude = (self.center.latitude + (north - south) * dy).clamp(-90.0, 90.0);
    }

    /// Converts a terminal cell inside `area` to map coordinates, using
    /// the cell's midpoint. Returns None for cells outside the area.
    #[must_use]
    pub fn point_at(&self, area: Rect, column: u16, row: u16) -> Option<GeoPoint> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let ([west, east], [south, north]) = self.bounds();
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(GeoPoint {
            latitude: north - fy * (north - south),
            longitude: west + fx * (east - west),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> MapView {
        MapView::new(GeoPoint {
            latitude: 40.0,
            longitude: 2.0,
        })
    }

    #[test]
    fn bounds_are_centered_on_the_view_center() {
        let ([west, east], [south, north]) = view().bounds();
        assert!(((west + east) / 2.0 - 2.0).abs() < 1e-9);
        assert!(((south + north) / 2.0 - 40.0).abs() < 1e-9);
        assert!((east - west - 22.5).abs() < 1e-9); // 360 / 2^4 at zoom 5
        assert!((north - south - 11.25).abs() < 1e-9);
    }

    #[test]
    fn zooming_in_halves_the_span_and_stays_bounded() {
        let mut v = view();
        let ([west, east], _) = v.bounds();
        v.zoom_in();
        let ([west2, east2], _) = v.bounds();
        assert!(((east2 - west2) * 2.0 - (east - west)).abs() < 1e-9);

        v.zoom = MAX_ZOOM;
        v.zoom_in();
        assert_eq!(v.zoom, MAX_ZOOM);
        v.zoom = MIN_ZOOM;
        v.zoom_out();
        assert_eq!(v.zoom, MIN_ZOOM);
    }

    #[test]
    fn click_in_the_middle_of_the_area_maps_to_the_center() {
        let v = view();
        let area = Rect::new(10, 5, 40, 20);
        let point = v.point_at(area, 30, 15).unwrap();
        // Half a cell off at most from the exact center.
        let ([west, east], [south, north]) = v.bounds();
        assert!((point.longitude - 2.0).abs() <= (east - west) / 40.0);
        assert!((point.latitude - 40.0).abs() <= (north - south) / 20.0);
    }

    #[test]
    fn click_corners_map_to_viewport_corners() {
        let v = view();
        let area = Rect::new(0, 0, 40, 20);
        let ([west, east], [south, north]) = v.bounds();

        let top_left = v.point_at(area, 0, 0).unwrap();
        assert!(top_left.longitude - west < (east - west) / 40.0);
        assert!(north - top_left.latitude < (north - south) / 20.0);

        let bottom_right = v.point_at(area, 39, 19).unwrap();
        assert!(east - bottom_right.longitude < (east - west) / 40.0);
        assert!(bottom_right.latitude - south < (north - south) / 20.0);
    }

    #[test]
    fn clicks_outside_the_area_are_ignored() {
        let v = view();
        let area = Rect::new(10, 5, 40, 20);
        assert!(v.point_at(area, 9, 10).is_none());
        assert!(v.point_at(area, 50, 10).is_none());
        assert!(v.point_at(area, 30, 25).is_none());
        assert!(v.point_at(Rect::new(0, 0, 0, 0), 0, 0).is_none());
    }

    #[test]
    fn panning_moves_the_center_by_a_span_fraction() {
        let mut v = view();
        let ([west, east], _) = v.bounds();
        let span = east - west;
        v.pan(PAN_STEP, 0.0);
        assert!((v.center.longitude - (2.0 + span * PAN_STEP)).abs() < 1e-9);

        v.center.latitude = 89.0;
        v.pan(0.0, 1.0);
        assert!(v.center.latitude <= 90.0);
    }
}
