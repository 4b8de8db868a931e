//! Speech-synthesis collaborator.
//!
//! The engine turns a phrase into a WAV file. Engines are assumed not to be
//! reentrant, so the pipeline only reaches one through a [`SpeechGate`].

mod espeak;
mod gate;

use std::ops::RangeInclusive;
use std::path::Path;

use serde::Serialize;

use crate::error::SpeechResult;

pub use espeak::{find_espeak, parse_voice_list, EspeakEngine, ESPEAK_PATH_ENV};
pub use gate::SpeechGate;

/// A voice the engine can speak with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Identifier passed back to the engine.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Voice {
    /// Creates a voice.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One synthesis invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    /// Phrase to speak.
    pub text: String,
    /// Words per minute.
    pub rate: u32,
    /// Volume in [0, 1].
    pub volume: f64,
    /// Voice to use, or the engine default.
    pub voice: Option<Voice>,
}

/// Parameters the gate randomizes per request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechSettings {
    /// Speech rates drawn uniformly.
    pub rates: RangeInclusive<u32>,
    /// Fixed volume.
    pub volume: f64,
}

/// A blocking text-to-speech engine.
pub trait SpeechSynthesizer: Send {
    /// Lists available voices.
    fn voices(&mut self) -> SpeechResult<Vec<Voice>>;

    /// Speaks `request` into a WAV file at `path`.
    fn synthesize_to_file(&mut self, request: &SpeechRequest, path: &Path) -> SpeechResult<()>;
}

impl<S: SpeechSynthesizer + ?Sized> SpeechSynthesizer for Box<S> {
    fn voices(&mut self) -> SpeechResult<Vec<Voice>> {
        (**self).voices()
    }

    fn synthesize_to_file(&mut self, request: &SpeechRequest, path: &Path) -> SpeechResult<()> {
        (**self).synthesize_to_file(request, path)
    }
}
