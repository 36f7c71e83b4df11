//! Camera enumeration input
//!
//! The enumerator hands over a JSON document listing each camera with its
//! labelled resolution groups. Capture types are assigned here, once.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::RenderError;
use crate::types::{Camera, CaptureGroup};

/// On-disk layout of the enumeration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enumeration {
    #[serde(default)]
    pub cameras: Vec<CameraEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraEntry {
    pub label: String,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub label: String,
    #[serde(default)]
    pub resolutions: Vec<String>,
}

impl Enumeration {
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let contents = fs::read_to_string(path).map_err(|source| RenderError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        let enumeration = Self::from_json(&contents).map_err(|source| RenderError::InputDecode {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), cameras = enumeration.cameras.len(), "Loaded camera enumeration");
        Ok(enumeration)
    }

    /// Convert into the data model, tagging every group with its capture type
    pub fn into_cameras(self) -> Vec<Camera> {
        self.cameras
            .into_iter()
            .map(|camera| {
                let groups = camera
                    .groups
                    .into_iter()
                    .map(|group| CaptureGroup::new(group.label, group.resolutions))
                    .collect();
                Camera::new(camera.label, camera.index, groups)
            })
            .collect()
    }
}
