//! The original-image collaborator: something that can report the image's
//! natural (intrinsic) size. Probed exactly once, when the widget
//! initializes; until then every coordinate conversion is refused.

use std::path::{Path, PathBuf};

use crate::geometry::Size;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to probe image dimensions for {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

pub trait ImageSource {
    fn natural_size(&self) -> SourceResult<Size>;
}

/// Reads the natural size from an image file header without decoding pixel
/// data.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileImageSource {
    fn natural_size(&self) -> SourceResult<Size> {
        let (width, height) =
            image::image_dimensions(&self.path).map_err(|source| SourceError::Probe {
                path: self.path.clone(),
                source,
            })?;
        Ok(Size::new(f64::from(width), f64::from(height)))
    }
}
