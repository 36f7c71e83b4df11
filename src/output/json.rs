//! JSON description of the supported capture modes
//!
//! ```json
//! {
//!   "primary": {
//!     "image": [
//!       { "resolution": "3264x2448", "viewFinder": "1440x1080", "aspectRatio": "4:3" }
//!     ]
//!   }
//! }
//! ```
//!
//! Keys keep the order in which cameras and groups were enumerated so the
//! same input always renders the same bytes.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::aspect::AspectClass;
use crate::error::RenderError;
use crate::resolution::parse_resolution;
use crate::types::{Camera, CaptureType, ScreenGeometry};
use crate::viewfinder::find_best_viewfinder;

/// One supported mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeRecord {
    pub resolution: String,
    /// Empty when no viewfinder mode fits the screen
    pub view_finder: String,
    pub aspect_ratio: String,
}

/// Modes of one capture type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureModes {
    pub key: String,
    pub modes: Vec<ModeRecord>,
}

/// Capture types of one camera; serializes as a map keyed by capture type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraModes {
    pub key: String,
    pub captures: Vec<CaptureModes>,
}

/// Whole document; serializes as a map keyed by camera
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonDocument {
    pub cameras: Vec<CameraModes>,
}

impl Serialize for CameraModes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.captures.len()))?;
        for capture in &self.captures {
            map.serialize_entry(&capture.key, &capture.modes)?;
        }
        map.end()
    }
}

impl Serialize for JsonDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cameras.len()))?;
        for camera in &self.cameras {
            map.serialize_entry(&camera.key, camera)?;
        }
        map.end()
    }
}

impl JsonDocument {
    /// Entry for `key`, created at the end if not seen yet
    fn camera_mut(&mut self, key: String) -> &mut CameraModes {
        let index = match self.cameras.iter().position(|c| c.key == key) {
            Some(index) => index,
            None => {
                self.cameras.push(CameraModes {
                    key,
                    captures: Vec::new(),
                });
                self.cameras.len() - 1
            }
        };
        &mut self.cameras[index]
    }

    /// Pretty-printed document with a trailing newline
    pub fn to_json_string(&self) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

impl CameraModes {
    fn capture_mut(&mut self, key: String) -> &mut CaptureModes {
        let index = match self.captures.iter().position(|c| c.key == key) {
            Some(index) => index,
            None => {
                self.captures.push(CaptureModes {
                    key,
                    modes: Vec::new(),
                });
                self.captures.len() - 1
            }
        };
        &mut self.captures[index]
    }
}

/// Build the JSON document for all cameras
///
/// Cameras sharing a key are merged into one entry, as are groups of the same
/// capture type. Viewfinder and unknown groups are left out. Frame rate
/// variants of one resolution are listed once.
pub fn render_json(cameras: &[Camera], screen: ScreenGeometry) -> JsonDocument {
    let mut document = JsonDocument::default();

    for camera in cameras {
        if camera.groups.is_empty() {
            warn!(camera = %camera.label, index = camera.index, "No resolutions found: configuration not set");
            continue;
        }

        let entry = document.camera_mut(camera.json_key());

        for group in &camera.groups {
            match group.capture_type {
                CaptureType::Viewfinder => continue,
                CaptureType::Unknown => {
                    debug!(camera = %camera.label, group = %group.label, "Skipping unknown resolution type");
                    continue;
                }
                CaptureType::Image | CaptureType::Video => {}
            }
            if group.resolutions.is_empty() {
                warn!(camera = %camera.label, group = %group.label, "No resolutions in group: configuration gap");
                continue;
            }

            let capture = entry.capture_mut(group.type_key());
            for token in &group.resolutions {
                let resolution = match parse_resolution(token) {
                    Ok(resolution) => resolution.base(),
                    Err(e) => {
                        warn!(camera = %camera.label, group = %group.label, error = %e, "Dropping resolution token");
                        continue;
                    }
                };

                let key = resolution.to_string();
                if capture.modes.iter().any(|m| m.resolution == key) {
                    continue;
                }

                let view_finder = match find_best_viewfinder(&resolution, &camera.groups, screen) {
                    Some(vf) => vf.to_string(),
                    None => {
                        warn!(camera = %camera.label, resolution = %key, screen = %screen, "No viewfinder resolution fits the screen");
                        String::new()
                    }
                };

                capture.modes.push(ModeRecord {
                    aspect_ratio: AspectClass::of(&resolution).to_string(),
                    resolution: key,
                    view_finder,
                });
            }
        }
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CaptureGroup;

    fn group(label: &str, resolutions: &[&str]) -> CaptureGroup {
        CaptureGroup::new(label, resolutions.iter().map(|s| s.to_string()).collect())
    }

    fn sample_cameras() -> Vec<Camera> {
        vec![
            Camera::new(
                "Primary camera",
                0,
                vec![
                    group("viewfinder-resolutions", &["1440x1080", "1280x720", "2560x1440"]),
                    group("image-resolutions", &["3264x2448", "1920x1080"]),
                    group(
                        "video-resolutions",
                        &["1920x1080@30/1", "1920x1080@15/1", "1280x720@15/1-30/1"],
                    ),
                ],
            ),
            Camera::new("Broken camera", 1, Vec::new()),
            Camera::new(
                "Secondary camera",
                2,
                vec![
                    group("viewfinder-resolutions", &["640x480"]),
                    group("image-resolutions", &["1280x960", "1600x1200@x/1"]),
                ],
            ),
        ]
    }

    const SCREEN: ScreenGeometry = ScreenGeometry { width: 1080, height: 1920 };

    #[test]
    fn test_structure_and_order() {
        let document = render_json(&sample_cameras(), SCREEN);

        let keys: Vec<&str> = document.cameras.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["primary", "secondary"]);

        let primary = &document.cameras[0];
        let captures: Vec<&str> = primary.captures.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(captures, vec!["image", "video"]);

        let image = &primary.captures[0].modes;
        assert_eq!(
            image[0],
            ModeRecord {
                resolution: "3264x2448".to_string(),
                view_finder: "1440x1080".to_string(),
                aspect_ratio: "4:3".to_string(),
            }
        );
        assert_eq!(image[1].view_finder, "1280x720");
        assert_eq!(image[1].aspect_ratio, "16:9");
    }

    #[test]
    fn test_frame_rate_variants_listed_once() {
        let document = render_json(&sample_cameras(), SCREEN);
        let video = &document.cameras[0].captures[1].modes;
        let resolutions: Vec<&str> = video.iter().map(|m| m.resolution.as_str()).collect();
        assert_eq!(resolutions, vec!["1920x1080", "1280x720"]);
    }

    #[test]
    fn test_malformed_token_dropped() {
        let document = render_json(&sample_cameras(), SCREEN);
        let image = &document.cameras[1].captures[0].modes;
        assert_eq!(image.len(), 1);
        assert_eq!(image[0].resolution, "1280x960");
        assert_eq!(image[0].view_finder, "640x480");
    }

    #[test]
    fn test_missing_viewfinder_is_empty() {
        let cameras = vec![Camera::new(
            "Front camera",
            1,
            vec![
                group("viewfinder-resolutions", &["2560x1440"]),
                group("image-resolutions", &["1920x1080"]),
            ],
        )];
        let document = render_json(&cameras, SCREEN);
        assert_eq!(document.cameras[0].captures[0].modes[0].view_finder, "");
    }

    #[test]
    fn test_serialized_layout() {
        let cameras = vec![Camera::new(
            "Front camera",
            1,
            vec![
                group("viewfinder-resolutions", &["640x480"]),
                group("image-resolutions", &["640x480"]),
            ],
        )];
        let json = render_json(&cameras, SCREEN).to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "front": {
                    "image": [
                        { "resolution": "640x480", "viewFinder": "640x480", "aspectRatio": "4:3" }
                    ]
                }
            })
        );
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_key_order_follows_input_not_alphabet() {
        let cameras = vec![
            Camera::new("Zoom camera", 0, vec![group("video-resolutions", &["1280x720@30/1"])]),
            Camera::new("Alpha camera", 1, vec![group("image-resolutions", &["640x480"])]),
        ];
        let json = render_json(&cameras, SCREEN).to_json_string().unwrap();
        let zoom = json.find("\"zoom\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zoom < alpha);
    }

    #[test]
    fn test_render_is_idempotent() {
        let cameras = sample_cameras();
        let first = render_json(&cameras, SCREEN).to_json_string().unwrap();
        let second = render_json(&cameras, SCREEN).to_json_string().unwrap();
        assert_eq!(first, second);
    }
}
