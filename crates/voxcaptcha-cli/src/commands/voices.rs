//! Voices command implementation
//!
//! Lists the espeak voices a captcha may be spoken with.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use voxcaptcha::{EspeakEngine, SpeechSynthesizer};

use super::load_config;

/// Run the voices command
///
/// # Arguments
/// * `config_path` - Optional JSON settings file (engine path and language)
/// * `json_output` - Print the voice list as JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let language = config.engine.language.clone();

    let mut engine = EspeakEngine::new(config.engine).context("Failed to start speech engine")?;
    let voices = engine.voices().context("Failed to list voices")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&voices)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} ({})",
        "Voices:".cyan().bold(),
        engine.executable().display(),
        language
    );
    if voices.is_empty() {
        println!("  {} no voices for this language", "!".yellow());
    }
    for voice in &voices {
        println!("  {} {}", voice.id.green(), voice.name.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}
