use crate::mapper::MapperError;
use crate::marking::MarkingError;
use crate::mode::ModeError;
use crate::source::SourceError;
use thiserror::Error;

pub type WidgetResult<T> = std::result::Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("the widget is not initialized; the original image size is still unknown")]
    NotInitialized,

    #[error("this action is not allowed in the current editor mode")]
    WrongMode,

    #[error(transparent)]
    Marking(#[from] MarkingError),

    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    #[error(transparent)]
    Source(#[from] SourceError),
}
