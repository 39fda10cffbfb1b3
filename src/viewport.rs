//! Per-click session state for the marking panel: where the user last
//! clicked the displayed image, and which region of the original image the
//! square panel is showing. Recomputed on every click and window resize,
//! never persisted.

use crate::geometry::{Point, Size};
use crate::mapper::CoordinateMapper;

/// Outcome of a click on the displayed image, ready for the host to apply:
/// the panel shows the original image shifted by `background_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOutcome {
    /// Click position in displayed-image pixels, rounded.
    pub click: Point,
    /// Panel top-left corner in original-image pixels.
    pub panel_origin: Point,
    /// Background position the host applies to the panel (the negative of
    /// `panel_origin`).
    pub background_offset: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSession {
    last_click: Point,
    panel_origin: Point,
    panel_side: f64,
}

impl ViewportSession {
    pub const fn new(panel_side: f64) -> Self {
        Self {
            last_click: Point::new(0.0, 0.0),
            panel_origin: Point::new(0.0, 0.0),
            panel_side,
        }
    }

    /// Convert a raw pointer event into displayed-image pixel space using
    /// the displayed image's on-page offset and the current scroll position,
    /// then center the panel on the clicked point of the original image.
    pub fn record_click(
        &mut self,
        client: Point,
        image_offset: Point,
        scroll: Point,
        mapper: &CoordinateMapper,
    ) -> ClickOutcome {
        let click = Point::new(
            (client.x - (image_offset.x - scroll.x)).round(),
            (client.y - (image_offset.y - scroll.y)).round(),
        );
        self.last_click = click;

        let original = mapper.display_to_original(click);
        let half = self.panel_side / 2.0;
        self.panel_origin = Point::new(original.x - half, original.y - half);
        tracing::trace!(?click, panel_origin = ?self.panel_origin, "image click recorded");

        ClickOutcome {
            click,
            panel_origin: self.panel_origin,
            background_offset: Point::new(-self.panel_origin.x, -self.panel_origin.y),
        }
    }

    /// Pin the panel to a square whose side is its own rendered width.
    pub fn resize_panel(&mut self, panel_client_width: f64) {
        self.panel_side = panel_client_width;
    }

    pub const fn last_click(&self) -> Point {
        self.last_click
    }

    pub const fn panel_origin(&self) -> Point {
        self.panel_origin
    }

    pub const fn panel_side(&self) -> f64 {
        self.panel_side
    }

    pub const fn panel_size(&self) -> Size {
        Size::new(self.panel_side, self.panel_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(Size::new(1000.0, 800.0), Size::new(500.0, 400.0))
            .expect("sizes are non-empty")
    }

    #[test]
    fn click_centers_the_panel_on_the_original_image_point() {
        let mut session = ViewportSession::new(300.0);
        let outcome = session.record_click(
            Point::new(250.0, 150.0),
            Point::new(50.0, 50.0),
            Point::new(0.0, 0.0),
            &mapper(),
        );

        assert_eq!(outcome.click, Point::new(200.0, 100.0));
        assert_eq!(outcome.panel_origin, Point::new(250.0, 50.0));
        assert_eq!(outcome.background_offset, Point::new(-250.0, -50.0));
        assert_eq!(session.last_click(), outcome.click);
        assert_eq!(session.panel_origin(), outcome.panel_origin);
    }

    #[test]
    fn click_subtracts_scroll_from_the_image_offset() {
        let mut session = ViewportSession::new(200.0);
        let outcome = session.record_click(
            Point::new(100.0, 100.0),
            Point::new(80.0, 60.0),
            Point::new(30.0, 20.0),
            &mapper(),
        );
        assert_eq!(outcome.click, Point::new(50.0, 60.0));
    }

    #[test]
    fn click_coordinates_are_rounded_to_whole_display_pixels() {
        let mut session = ViewportSession::new(200.0);
        let outcome = session.record_click(
            Point::new(100.6, 99.2),
            Point::new(0.25, 0.75),
            Point::new(0.0, 0.0),
            &mapper(),
        );
        assert_eq!(outcome.click, Point::new(100.0, 98.0));
    }

    #[test]
    fn resize_pins_the_panel_square() {
        let mut session = ViewportSession::new(300.0);
        session.resize_panel(420.0);
        assert_eq!(session.panel_side(), 420.0);
        assert_eq!(session.panel_size(), Size::new(420.0, 420.0));
    }
}
