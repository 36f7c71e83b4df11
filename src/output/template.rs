//! Hardware configuration template substitution
//!
//! The template carries placeholders such as `@PRIIMAGE43RES@` or
//! `@PRIVIDEOFPS@`. Each camera's selected modes provide their values.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::constants::placeholder::{DELIMITER, FRAME_RATE_TAIL, RESOLUTION_TAIL};
use crate::error::RenderError;
use crate::selector::select_best_modes;
use crate::types::{Camera, ScreenGeometry};

/// Placeholder values plus the keys that could not be filled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pub values: BTreeMap<String, String>,
    pub unresolved: Vec<String>,
}

/// Select every camera's best modes and turn them into placeholder values
///
/// Cameras share one placeholder namespace. A camera whose three-letter key
/// repeats an earlier camera's overrides the values it selects; keys it
/// leaves unresolved keep the earlier camera's values.
pub fn render_template_substitutions(cameras: &[Camera], screen: ScreenGeometry) -> Substitutions {
    let mut substitutions = Substitutions::default();
    let mut seen_keys: Vec<String> = Vec::new();
    let mut missing: Vec<(String, &str)> = Vec::new();

    for camera in cameras {
        if camera.groups.is_empty() {
            warn!(
                camera = %camera.label,
                index = camera.index,
                "No resolutions found: configuration not set"
            );
            continue;
        }

        let camera_key = camera.placeholder_key();
        if seen_keys.contains(&camera_key) {
            warn!(
                camera = %camera.label,
                key = %camera_key,
                "Camera key already used by an earlier camera, its values are overridden"
            );
        } else {
            seen_keys.push(camera_key);
        }

        let selection = select_best_modes(camera, screen);
        for bucket in &selection.buckets {
            let resolution_key = bucket.key.resolution_placeholder();
            let frame_rate_key = bucket.key.frame_rate_placeholder();

            match &bucket.best {
                Some(best) => {
                    substitutions
                        .values
                        .insert(resolution_key, best.resolution.to_string());
                    if let Some(frame_rate_key) = frame_rate_key {
                        substitutions
                            .values
                            .insert(frame_rate_key, best.frame_rate.to_string());
                    }
                }
                None => {
                    missing.push((resolution_key, camera.label.as_str()));
                    missing.extend(frame_rate_key.map(|k| (k, camera.label.as_str())));
                }
            }
        }
    }

    for (key, camera) in missing {
        if substitutions.values.contains_key(&key) || substitutions.unresolved.contains(&key) {
            continue;
        }
        if !key.ends_with(FRAME_RATE_TAIL) {
            error!(key = %key, camera = %camera, "No suitable resolution found, check output");
        }
        substitutions.unresolved.push(key);
    }

    substitutions
}

/// Replace every occurrence of every placeholder in every line
pub fn apply_substitutions(lines: &[String], substitutions: &Substitutions) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            substitutions
                .values
                .iter()
                .fold(line.clone(), |line, (key, value)| line.replace(key.as_str(), value))
        })
        .collect()
}

/// Placeholders still present in a line, e.g. `@BACVF43RES@`
pub fn find_placeholders(line: &str) -> Vec<String> {
    let segments: Vec<&str> = line.split(DELIMITER).collect();
    if segments.len() < 3 {
        return Vec::new();
    }

    let resolution_tail = RESOLUTION_TAIL.trim_end_matches(DELIMITER);
    let frame_rate_tail = FRAME_RATE_TAIL.trim_end_matches(DELIMITER);

    segments[1..segments.len() - 1]
        .iter()
        .filter(|s| {
            !s.is_empty()
                && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
                && (s.ends_with(resolution_tail) || s.ends_with(frame_rate_tail))
        })
        .map(|s| format!("{DELIMITER}{s}{DELIMITER}"))
        .collect()
}

/// Read the template line by line
pub fn load_template(path: &Path) -> Result<Vec<String>, RenderError> {
    let contents = fs::read_to_string(path).map_err(|source| RenderError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Substitute the template and report placeholders left behind
pub fn render_template(lines: &[String], substitutions: &Substitutions) -> String {
    let rendered = apply_substitutions(lines, substitutions);

    for (number, line) in rendered.iter().enumerate() {
        for placeholder in find_placeholders(line) {
            warn!(
                line = number + 1,
                placeholder = %placeholder,
                "Placeholder left unresolved in template"
            );
        }
    }
    info!(
        substituted = substitutions.values.len(),
        unresolved = substitutions.unresolved.len(),
        "Rendered hardware template"
    );

    let mut output = rendered.join("\n");
    output.push('\n');
    output
}
