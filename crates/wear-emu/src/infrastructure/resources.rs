//! App-info manifest and media resource resolution.
//!
//! Host applications ship an `appinfo.json` describing, among other things,
//! their media resources. The wire refers to media by 1-based position in
//! that manifest's `media` array; `resolve_icon` turns such an id back into
//! the packaged file path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or parsing the app-info manifest.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A file system I/O error occurred.
    #[error("I/O error reading app info at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest JSON could not be parsed.
    #[error("failed to parse app info JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry of the manifest's `media` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Path of the packaged file, relative to the app's `resources/` root.
    pub file: String,
    /// Symbolic resource name used in host source code.
    #[serde(default)]
    pub name: Option<String>,
    /// Resource type tag (`png`, `png-trans`, `font`, …).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// The subset of `appinfo.json` the emulator consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub version_label: Option<String>,
    #[serde(default)]
    pub resources: Resources,
}

/// The `resources` section of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub media: Vec<MediaEntry>,
}

/// Media lookup table built from an app-info manifest.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    app_info: AppInfo,
}

impl ResourceTable {
    /// Builds the table from a parsed manifest.
    pub fn new(app_info: AppInfo) -> Self {
        Self { app_info }
    }

    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Parse`] when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ResourceError> {
        let app_info: AppInfo = serde_json::from_str(json)?;
        Ok(Self::new(app_info))
    }

    /// Loads a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] for file-system failures and
    /// [`ResourceError::Parse`] for malformed JSON.
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// The parsed manifest.
    pub fn app_info(&self) -> &AppInfo {
        &self.app_info
    }

    /// Returns the media entry for a 1-based wire media id.
    pub fn get_media(&self, media_id: i64) -> Option<&MediaEntry> {
        let index = usize::try_from(media_id.checked_sub(1)?).ok()?;
        self.app_info.resources.media.get(index)
    }

    /// Resolves a media id to its packaged icon path.
    pub fn resolve_icon(&self, media_id: i64) -> Option<String> {
        self.get_media(media_id)
            .map(|entry| format!("resources/{}", entry.file))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
