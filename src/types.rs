//! Core data model: cameras, capture groups and screen geometry

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::capture::{IMAGE_PREFIX, VIDEO_PREFIX, VIEWFINDER_PREFIX};

/// Screen size in pixels, as reported by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Larger of the two dimensions
    pub fn long_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Smaller of the two dimensions
    pub fn short_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Whether a `width x height` mode fits the screen in either orientation
    pub fn fits(&self, width: u32, height: u32) -> bool {
        width.max(height) <= self.long_side() && width.min(height) <= self.short_side()
    }

    /// Parse `WIDTHxHEIGHT` (used by the `--screen` flag)
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        let width = w.trim().parse().ok()?;
        let height = h.trim().parse().ok()?;
        (width > 0 && height > 0).then_some(Self { width, height })
    }
}

impl fmt::Display for ScreenGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What a capture group's resolutions are used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureType {
    Viewfinder,
    Image,
    Video,
    Unknown,
}

impl CaptureType {
    /// Classify a raw group label by its (case-sensitive) prefix
    pub fn from_label(label: &str) -> Self {
        if label.starts_with(VIEWFINDER_PREFIX) {
            Self::Viewfinder
        } else if label.starts_with(IMAGE_PREFIX) {
            Self::Image
        } else if label.starts_with(VIDEO_PREFIX) {
            Self::Video
        } else {
            Self::Unknown
        }
    }
}

/// Resolutions a camera offers for one purpose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureGroup {
    /// Raw label as enumerated, e.g. `image-resolutions`
    pub label: String,
    pub capture_type: CaptureType,
    /// Resolution tokens in enumeration order
    pub resolutions: Vec<String>,
}

impl CaptureGroup {
    pub fn new(label: impl Into<String>, resolutions: Vec<String>) -> Self {
        let label = label.into();
        Self {
            capture_type: CaptureType::from_label(&label),
            label,
            resolutions,
        }
    }

    /// Lowercased label text before the first `-`
    pub fn type_key(&self) -> String {
        self.label
            .split('-')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// One camera and everything it can capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    pub label: String,
    pub index: i32,
    pub groups: Vec<CaptureGroup>,
}

impl Camera {
    pub fn new(label: impl Into<String>, index: i32, groups: Vec<CaptureGroup>) -> Self {
        Self {
            label: label.into(),
            index,
            groups,
        }
    }

    /// JSON key: lowercased first space-delimited word of the label
    pub fn json_key(&self) -> String {
        self.label
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Placeholder key part: first three characters of the label, uppercased
    pub fn placeholder_key(&self) -> String {
        self.label
            .chars()
            .take(crate::constants::placeholder::CAMERA_KEY_LEN)
            .collect::<String>()
            .to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_type_from_label() {
        assert_eq!(CaptureType::from_label("viewfinder-resolutions"), CaptureType::Viewfinder);
        assert_eq!(CaptureType::from_label("image-resolutions"), CaptureType::Image);
        assert_eq!(CaptureType::from_label("video-resolutions"), CaptureType::Video);
        assert_eq!(CaptureType::from_label("Video-resolutions"), CaptureType::Unknown);
        assert_eq!(CaptureType::from_label("thumbnail"), CaptureType::Unknown);
    }

    #[test]
    fn test_camera_keys() {
        let camera = Camera::new("Primary camera", 0, Vec::new());
        assert_eq!(camera.json_key(), "primary");
        assert_eq!(camera.placeholder_key(), "PRI");

        let short = Camera::new("ab", 1, Vec::new());
        assert_eq!(short.json_key(), "ab");
        assert_eq!(short.placeholder_key(), "AB");
    }

    #[test]
    fn test_group_type_key() {
        let group = CaptureGroup::new("Image-resolutions", Vec::new());
        assert_eq!(group.type_key(), "image");
        assert_eq!(group.capture_type, CaptureType::Unknown);
    }

    #[test]
    fn test_screen_fits_either_orientation() {
        let screen = ScreenGeometry::new(1080, 1920);
        assert!(screen.fits(1920, 1080));
        assert!(screen.fits(1080, 1920));
        assert!(screen.fits(640, 480));
        assert!(!screen.fits(2560, 1440));
        assert!(!screen.fits(1200, 1200));
    }

    #[test]
    fn test_screen_parse() {
        assert_eq!(ScreenGeometry::parse("1080x1920"), Some(ScreenGeometry::new(1080, 1920)));
        assert_eq!(ScreenGeometry::parse(" 720X1280 "), Some(ScreenGeometry::new(720, 1280)));
        assert_eq!(ScreenGeometry::parse("0x1280"), None);
        assert_eq!(ScreenGeometry::parse("1080"), None);
        assert_eq!(ScreenGeometry::parse("ax1"), None);
    }
}
