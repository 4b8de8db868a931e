//! espeak-ng subprocess engine.
//!
//! Each request spawns `espeak-ng -w <out.wav>` with the phrase on stdin.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::config::EspeakConfig;
use crate::error::{SpeechError, SpeechResult};

use super::{SpeechRequest, SpeechSynthesizer, Voice};

/// Environment variable overriding the engine executable.
pub const ESPEAK_PATH_ENV: &str = "VOXCAPTCHA_ESPEAK_PATH";

/// espeak amplitude for volume 1.0.
const FULL_AMPLITUDE: f64 = 100.0;

/// Locates the espeak executable.
///
/// Checks the configured path, then `VOXCAPTCHA_ESPEAK_PATH`, then
/// `espeak-ng` and `espeak` on `PATH`.
pub fn find_espeak(config: &EspeakConfig) -> SpeechResult<PathBuf> {
    if let Some(ref path) = config.executable {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    if let Ok(path) = std::env::var(ESPEAK_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
    }

    for name in ["espeak-ng", "espeak"] {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    Err(SpeechError::EngineNotFound)
}

/// Parses `espeak-ng --voices` output, keeping voices for `language`.
///
/// A voice matches when its language is `language` or a regional variant of
/// it (`en` matches `en-us`).
pub fn parse_voice_list(output: &str, language: &str) -> Vec<Voice> {
    let variant_prefix = format!("{}-", language);

    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            let _priority = columns.next()?;
            let lang = columns.next()?;
            let _age_gender = columns.next()?;
            let name = columns.next()?;
            Some((lang, name))
        })
        .filter(|(lang, _)| *lang == language || lang.starts_with(&variant_prefix))
        .map(|(lang, name)| Voice::new(lang, name.replace('_', " ")))
        .collect()
}

/// The espeak-ng subprocess engine.
pub struct EspeakEngine {
    config: EspeakConfig,
    executable: PathBuf,
    voices: Option<Vec<Voice>>,
}

impl EspeakEngine {
    /// Locates the executable and creates an engine.
    pub fn new(config: EspeakConfig) -> SpeechResult<Self> {
        let executable = find_espeak(&config)?;
        log::info!("using speech engine at {}", executable.display());
        Ok(Self {
            config,
            executable,
            voices: None,
        })
    }

    /// Path of the executable in use.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn list_voices(&self) -> SpeechResult<Vec<Voice>> {
        let output = Command::new(&self.executable)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .map_err(SpeechError::SpawnFailed)?;

        if !output.status.success() {
            return Err(SpeechError::process_failed(
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let voices = parse_voice_list(&stdout, &self.config.language);
        log::debug!(
            "{} voices for language '{}'",
            voices.len(),
            self.config.language
        );
        Ok(voices)
    }
}

impl SpeechSynthesizer for EspeakEngine {
    fn voices(&mut self) -> SpeechResult<Vec<Voice>> {
        if let Some(ref voices) = self.voices {
            return Ok(voices.clone());
        }
        let voices = self.list_voices()?;
        self.voices = Some(voices.clone());
        Ok(voices)
    }

    fn synthesize_to_file(&mut self, request: &SpeechRequest, path: &Path) -> SpeechResult<()> {
        let amplitude = (request.volume.clamp(0.0, 1.0) * FULL_AMPLITUDE).round() as u32;

        // espeak-ng -w <path> -s <rate> -a <amplitude> [-v <voice>] --stdin
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-w")
            .arg(path)
            .arg("-s")
            .arg(request.rate.to_string())
            .arg("-a")
            .arg(amplitude.to_string());
        if let Some(ref voice) = request.voice {
            cmd.arg("-v").arg(&voice.id);
        }
        cmd.arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(SpeechError::SpawnFailed)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A broken pipe means the engine already exited; its status says why.
            if let Err(e) = stdin.write_all(request.text.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SpeechError::Io(e));
                }
            }
        }

        let (status, stderr) = wait_with_timeout(child, self.config.timeout())?;
        if !status.success() {
            return Err(SpeechError::process_failed(status.code().unwrap_or(-1), stderr));
        }

        Ok(())
    }
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> SpeechResult<(ExitStatus, String)> {
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SpeechError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(e) => return Err(SpeechError::SpawnFailed(e)),
        }
    };

    let mut stderr = String::new();
    if let Some(mut err) = child.stderr.take() {
        let _ = err.read_to_string(&mut stderr);
    }

    Ok((status, stderr))
}
