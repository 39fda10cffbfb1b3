use super::error::{ModeError, ModeResult};
use super::event::{ModeEvent, ModeTransition};
use super::model::EditorMode;

#[derive(Debug)]
pub struct ModeMachine {
    mode: EditorMode,
    transition_history: Vec<ModeTransition>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn can_transition(&self, event: ModeEvent) -> bool {
        self.next_mode(event).is_some()
    }

    pub fn next_mode(&self, event: ModeEvent) -> Option<EditorMode> {
        use ModeEvent::*;
        match (self.mode, event) {
            (EditorMode::Browsing, BeginEdit) => Some(EditorMode::Editing),
            (EditorMode::Editing, CommitUpdate) => Some(EditorMode::Browsing),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: ModeEvent) -> ModeResult<EditorMode> {
        tracing::debug!(from = ?self.mode, event = ?event, "request mode transition");
        let next = self.next_mode(event).ok_or_else(|| {
            let from = self.mode;
            tracing::warn!(from = ?from, event = ?event, "invalid mode transition requested");
            ModeError::InvalidTransition { from, event }
        })?;

        let record = ModeTransition::new(Some(self.mode), event, next);
        self.mode = next;
        self.transition_history.push(record);

        Ok(self.mode)
    }
}

#[cfg(test)]
impl ModeMachine {
    fn history(&self) -> &[ModeTransition] {
        &self.transition_history
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModeMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EditorMode::{:?}", self.mode)
    }
}
