//! Rendering projections. A marking has two on-screen representations: a
//! full-size overlay on the displayed image (positioned in percentages, so
//! the overlay survives CSS-level resizes between recomputes) and a
//! rectangle in the zoomed marking panel (positioned in panel pixels,
//! relative to the panel origin). Both are derived here on demand; neither
//! is ever stored — the registry is the single source of truth.

use crate::geometry::{Point, Rect};
use crate::mapper::{Axis, CoordinateMapper};
use crate::marking::{Marking, MarkingId};

/// Placement of a marking's overlay rectangle, as percentages of the
/// displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub id: MarkingId,
    pub left_percent: f64,
    pub top_percent: f64,
    pub width_percent: f64,
    pub height_percent: f64,
    pub css_class: &'static str,
}

pub fn overlay_placement(marking: &Marking, mapper: &CoordinateMapper) -> OverlayPlacement {
    let display = mapper.original_rect_to_display(Rect::new(
        marking.position.x,
        marking.position.y,
        marking.size.width,
        marking.size.height,
    ));
    OverlayPlacement {
        id: marking.id,
        left_percent: mapper.pixel_to_percent(Axis::Horizontal, display.x),
        top_percent: mapper.pixel_to_percent(Axis::Vertical, display.y),
        width_percent: mapper.pixel_to_percent(Axis::Horizontal, display.width),
        height_percent: mapper.pixel_to_percent(Axis::Vertical, display.height),
        css_class: marking.class.css_class(),
    }
}

/// Placement of a marking's rectangle in the marking panel, in panel pixels
/// relative to the panel's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub id: MarkingId,
    pub rect: Rect,
    pub css_class: &'static str,
    pub selected: bool,
}

pub fn panel_placement(marking: &Marking, panel_origin: Point) -> PanelPlacement {
    PanelPlacement {
        id: marking.id,
        rect: Rect::new(
            marking.position.x - panel_origin.x,
            marking.position.y - panel_origin.y,
            marking.size.width,
            marking.size.height,
        ),
        css_class: marking.class.css_class(),
        selected: marking.selected,
    }
}
