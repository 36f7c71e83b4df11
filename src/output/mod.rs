//! Renderers for the generated artifacts
//!
//! - **dump**: human-readable enumeration through the log
//! - **json**: supported modes per camera with matching viewfinders
//! - **template**: placeholder substitution for the hardware config template

pub mod dump;
pub mod json;
pub mod template;

use std::fs;
use std::path::Path;

use crate::error::RenderError;

pub use dump::dump;
pub use json::render_json;
pub use template::render_template_substitutions;

/// Truncate `path` and write `contents` in one go
pub fn write_output(path: &Path, contents: &str) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|source| RenderError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
