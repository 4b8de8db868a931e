//! CLI command implementations

pub mod distort;
pub mod generate;
pub mod voices;

use anyhow::{Context, Result};
use std::path::Path;
use voxcaptcha::CaptchaConfig;

/// Loads settings from `path`, or the defaults when none is given.
pub(crate) fn load_config(path: Option<&str>) -> Result<CaptchaConfig> {
    match path {
        Some(path) => CaptchaConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(CaptchaConfig::default()),
    }
}
