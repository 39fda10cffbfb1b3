use super::model::EditorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// The user asked to edit the markings offered in the panel.
    BeginEdit,
    /// The user committed the drag/resize changes back to the registry.
    CommitUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: Option<EditorMode>,
    pub event: ModeEvent,
    pub to: EditorMode,
}

impl ModeTransition {
    pub const fn new(from: Option<EditorMode>, event: ModeEvent, to: EditorMode) -> Self {
        Self { from, event, to }
    }
}
