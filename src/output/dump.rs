//! Human-readable enumeration dump through the log

use tracing::{error, info};

use crate::aspect::AspectClass;
use crate::resolution::parse_resolution;
use crate::types::Camera;

/// Report lines for every camera, group and resolution
pub fn dump_lines(cameras: &[Camera]) -> Vec<String> {
    let mut lines = Vec::new();

    for camera in cameras {
        if camera.groups.is_empty() {
            continue;
        }
        lines.push(format!("Resolutions for {}:", camera.label));

        for group in &camera.groups {
            let type_name = group.label.split('-').next().unwrap_or_default();
            lines.push(format!("{type_name} resolutions:"));
            for token in &group.resolutions {
                let aspect = parse_resolution(token)
                    .map(|res| AspectClass::of(&res).to_string())
                    .unwrap_or_else(|e| format!("invalid: {e}"));
                lines.push(format!("{token} ({aspect})"));
            }
        }
    }

    lines
}

/// Log the enumeration in human-readable form
pub fn dump(cameras: &[Camera]) {
    for camera in cameras.iter().filter(|c| c.groups.is_empty()) {
        error!(camera = %camera.label, index = camera.index, "No resolutions found");
    }
    for line in dump_lines(cameras) {
        info!("{line}");
    }
}
