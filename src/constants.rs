//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Capture group label prefixes (case-sensitive)
pub mod capture {
    /// Prefix of viewfinder (preview) group labels
    pub const VIEWFINDER_PREFIX: &str = "viewfinder";

    /// Prefix of still image group labels
    pub const IMAGE_PREFIX: &str = "image";

    /// Prefix of video recording group labels
    pub const VIDEO_PREFIX: &str = "video";
}

/// Resolution token grammar: `WIDTHxHEIGHT[@NUM/DEN[-NUM2/DEN2]]`
pub mod token {
    /// Separates width from height
    pub const DIMENSION_SEPARATOR: char = 'x';

    /// Separates the base resolution from the frame rate
    pub const RATE_SEPARATOR: char = '@';

    /// Separates the low and high end of a frame rate range
    pub const RANGE_SEPARATOR: char = '-';

    /// Separates numerator and denominator of a frame rate
    pub const FRACTION_SEPARATOR: char = '/';
}

/// Hardware template placeholder grammar
pub mod placeholder {
    /// Opens and closes every placeholder key
    pub const DELIMITER: char = '@';

    /// Number of camera label characters used in a key
    pub const CAMERA_KEY_LEN: usize = 3;

    /// Capture type tags
    pub const VIEWFINDER_TAG: &str = "VF";
    pub const IMAGE_TAG: &str = "IMAGE";
    pub const VIDEO_TAG: &str = "VIDEO";

    /// Aspect suffixes for image and viewfinder buckets
    pub const ASPECT_4_3_SUFFIX: &str = "43";
    pub const ASPECT_16_9_SUFFIX: &str = "169";

    /// Trailing part of resolution and frame rate keys
    pub const RESOLUTION_TAIL: &str = "RES@";
    pub const FRAME_RATE_TAIL: &str = "FPS@";
}

/// Default file locations
pub mod paths {
    /// Hardware configuration template shipped with the package
    pub const DEFAULT_TEMPLATE: &str = "/usr/share/droid-camres/jolla-camera-hw-template.txt";

    /// Default JSON output file
    pub const DEFAULT_JSON_OUTPUT: &str = "camera-resolutions.json";

    /// Default hardware configuration output file
    pub const DEFAULT_CAMHW_OUTPUT: &str = "jolla-camera-hw.txt";
}

/// Config file location
pub mod config {
    /// Directory under the user config dir
    pub const APP_DIR: &str = "camres";

    /// Config file name
    pub const FILENAME: &str = "camres.toml";
}

/// Config validation bounds
pub mod validation {
    /// Smallest accepted screen dimension in pixels
    pub const MIN_SCREEN_DIMENSION: u32 = 1;

    /// Largest accepted screen dimension in pixels
    pub const MAX_SCREEN_DIMENSION: u32 = 16384;
}
