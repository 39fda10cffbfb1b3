//! Conversions between the three coordinate spaces the widget works in:
//! original-image pixels (the single source of truth for marking geometry),
//! displayed-image pixels, and percentages of the displayed image.
//!
//! A mapper only exists once both image sizes are known and non-empty, so a
//! constructed mapper is always safe to convert through. Re-measure with
//! [`CoordinateMapper::rescale`] whenever the displayed image changes size;
//! conversions performed against a mapper that was not rescaled after a
//! resize are consistent but describe the old layout.

use crate::geometry::{Delta, Point, Rect, Size};
use thiserror::Error;

pub type MapperResult<T> = std::result::Result<T, MapperError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapperError {
    #[error("the {axis:?} dimension of the {image} image is empty or not finite: {value}")]
    EmptyDimension {
        image: &'static str,
        axis: Axis,
        value: f64,
    },
}

/// Cached scale ratios between the original and the displayed image.
///
/// `ratio = original / displayed` per axis; an original wider than its
/// on-page rendering has a horizontal ratio above 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    original: Size,
    displayed: Size,
    horizontal_ratio: f64,
    vertical_ratio: f64,
}

impl CoordinateMapper {
    pub fn new(original: Size, displayed: Size) -> MapperResult<Self> {
        validate_size("original", original)?;
        validate_size("displayed", displayed)?;
        Ok(Self {
            original,
            displayed,
            horizontal_ratio: original.width / displayed.width,
            vertical_ratio: original.height / displayed.height,
        })
    }

    /// Resize hook: recompute the ratios for a new displayed size. The
    /// original image never changes within a session. On error the mapper
    /// keeps its previous state.
    pub fn rescale(&mut self, displayed: Size) -> MapperResult<()> {
        validate_size("displayed", displayed)?;
        self.displayed = displayed;
        self.horizontal_ratio = self.original.width / displayed.width;
        self.vertical_ratio = self.original.height / displayed.height;
        Ok(())
    }

    pub const fn original(&self) -> Size {
        self.original
    }

    pub const fn displayed(&self) -> Size {
        self.displayed
    }

    pub const fn horizontal_ratio(&self) -> f64 {
        self.horizontal_ratio
    }

    pub const fn vertical_ratio(&self) -> f64 {
        self.vertical_ratio
    }

    const fn ratio(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_ratio,
            Axis::Vertical => self.vertical_ratio,
        }
    }

    const fn displayed_dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.displayed.width,
            Axis::Vertical => self.displayed.height,
        }
    }

    /// Displayed-image pixels to percentage of the displayed image.
    pub fn pixel_to_percent(&self, axis: Axis, pixel: f64) -> f64 {
        pixel / self.displayed_dimension(axis) * 100.0
    }

    /// Percentage of the displayed image to displayed-image pixels.
    pub fn percent_to_pixel(&self, axis: Axis, percent: f64) -> f64 {
        percent * self.displayed_dimension(axis) / 100.0
    }

    pub fn display_to_original(&self, point: Point) -> Point {
        Point::new(
            point.x * self.horizontal_ratio,
            point.y * self.vertical_ratio,
        )
    }

    pub fn original_to_display(&self, point: Point) -> Point {
        Point::new(
            point.x / self.horizontal_ratio,
            point.y / self.vertical_ratio,
        )
    }

    pub fn display_delta_to_original(&self, delta: Delta) -> Delta {
        Delta::new(
            delta.x * self.horizontal_ratio,
            delta.y * self.vertical_ratio,
        )
    }

    pub fn display_size_to_original(&self, size: Size) -> Size {
        Size::new(
            size.width * self.horizontal_ratio,
            size.height * self.vertical_ratio,
        )
    }

    pub fn original_size_to_display(&self, size: Size) -> Size {
        Size::new(
            size.width / self.horizontal_ratio,
            size.height / self.vertical_ratio,
        )
    }

    pub fn original_rect_to_display(&self, rect: Rect) -> Rect {
        let position = self.original_to_display(rect.position());
        let size = self.original_size_to_display(rect.size());
        Rect::new(position.x, position.y, size.width, size.height)
    }
}

fn validate_size(image: &'static str, size: Size) -> MapperResult<()> {
    validate_dimension(image, Axis::Horizontal, size.width)?;
    validate_dimension(image, Axis::Vertical, size.height)
}

fn validate_dimension(image: &'static str, axis: Axis, value: f64) -> MapperResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MapperError::EmptyDimension { image, axis, value });
    }
    Ok(())
}
