//! The marking registry: the ordered collection of user-drawn rectangles and
//! the operations the widget performs on it. All stored geometry is in
//! original-image pixels; displayed pixels and percentages are derived by the
//! mapper and projection layers, never stored here.

mod operations;
mod query;
mod selection;

use crate::geometry::{Delta, Point, Size};
use thiserror::Error;

/// How far apart two markings must be. The absolute difference between two
/// markings' position and size must reach `TOLERANCE` on at least one axis,
/// otherwise the newer one is rejected as a duplicate.
pub const TOLERANCE: f64 = 0.001;

pub type MarkingId = u64;

/// Classification chosen by the toggle control at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    Type1,
    Type2,
}

impl ObjectClass {
    /// Style class the host applies to this marking's rendered elements.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Type1 => "type1-object",
            Self::Type2 => "type2-object",
        }
    }
}

/// One user-drawn rectangle over the original image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marking {
    pub id: MarkingId,
    /// Top-left corner, original-image pixels.
    pub position: Point,
    /// Original-image pixels.
    pub size: Size,
    pub class: ObjectClass,
    /// True only while the marking is offered in the panel and the user has
    /// clicked it (or edit mode selected it).
    pub selected: bool,
}

/// One entry of a commit batch: the cumulative drag delta and final size the
/// interaction provider recorded for a marking, in displayed-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkingEdit {
    pub id: MarkingId,
    pub delta: Delta,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkingError {
    #[error("there is another marking at the same position; no marking will be added")]
    DuplicatePosition,
    #[error("there is no object marking to act on")]
    NothingToActOn,
    #[error("the marking rectangle is hidden; show it before adding a new marking")]
    RectangleHidden,
    #[error("no marking with id {0} exists")]
    UnknownMarking(MarkingId),
}

#[derive(Debug, Clone, Default)]
pub struct MarkingRegistry {
    markings: Vec<Marking>,
    id_sequence: MarkingId,
}

impl MarkingRegistry {
    pub fn new() -> Self {
        Self {
            markings: Vec::new(),
            id_sequence: 0,
        }
    }

    fn allocate_id(&mut self) -> MarkingId {
        let id = self.id_sequence;
        self.id_sequence = self.id_sequence.saturating_add(1);
        id
    }

    fn find_mut(&mut self, id: MarkingId) -> Option<&mut Marking> {
        self.markings.iter_mut().find(|marking| marking.id == id)
    }

    pub fn get(&self, id: MarkingId) -> Option<&Marking> {
        self.markings.iter().find(|marking| marking.id == id)
    }

    /// All markings, in insertion order. The most recently added marking is
    /// last and renders foremost.
    pub fn markings(&self) -> &[Marking] {
        &self.markings
    }

    pub fn len(&self) -> usize {
        self.markings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markings.is_empty()
    }
}
