use super::event::ModeEvent;
use super::model::EditorMode;
use thiserror::Error;

pub type ModeResult<T> = std::result::Result<T, ModeError>;

#[derive(Debug, Error)]
pub enum ModeError {
    #[error("invalid mode transition: from {from:?} using event {event:?}")]
    InvalidTransition { from: EditorMode, event: ModeEvent },
}
