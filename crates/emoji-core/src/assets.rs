//! Read-only access to stored icons.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::types::{AssetKey, SourceMarkup};

const ASSETS_DIR: &str = "assets";
const SVG_EXTENSION: &str = "svg";

/// Resolves [`AssetKey`]s to files under `<root>/assets/` and reads them.
///
/// Never writes. Holds no handles between calls.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// `root` is the public directory; icons live in `<root>/assets/<key>.svg`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &AssetKey) -> PathBuf {
        self.root
            .join(ASSETS_DIR)
            .join(format!("{}.{}", key.as_str(), SVG_EXTENSION))
    }

    /// Read the markup stored for `key`.
    ///
    /// Any read failure is reported as [`PipelineError::AssetNotFound`] carrying
    /// only the key; the resolved path is logged but never returned.
    pub async fn read(&self, key: &AssetKey) -> Result<SourceMarkup, PipelineError> {
        let path = self.path_for(key);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                log::info!("Read SVG file: {}", path.display());
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(e) => {
                log::error!("Error reading SVG file {}: {}", path.display(), e);
                Err(PipelineError::AssetNotFound {
                    svg_key: key.clone(),
                })
            }
        }
    }
}
