// src/utils/sound.rs

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Feedback sounds the front-end knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundEffect {
    Click,
    Correct,
    Incorrect,
    Start,
    End,
    Generate,
    Success,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::Click,
        SoundEffect::Correct,
        SoundEffect::Incorrect,
        SoundEffect::Start,
        SoundEffect::End,
        SoundEffect::Generate,
        SoundEffect::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Click => "click",
            SoundEffect::Correct => "correct",
            SoundEffect::Incorrect => "incorrect",
            SoundEffect::Start => "start",
            SoundEffect::End => "end",
            SoundEffect::Generate => "generate",
            SoundEffect::Success => "success",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.as_str() == name)
    }

    /// The tone sequence the browser synthesizes for this effect.
    pub fn tones(&self) -> Vec<Tone> {
        use Waveform::*;

        match self {
            SoundEffect::Click => vec![Tone::new(880.0, 0.0, 0.1, Square, 0.2)],
            // Rising swell
            SoundEffect::Generate => (0..5)
                .map(|i| {
                    let i = i as f32;
                    Tone::new(200.0 + i * 100.0, i * 0.05, 0.5, Sawtooth, 0.1)
                })
                .collect(),
            SoundEffect::Success => vec![
                Tone::new(523.25, 0.0, 0.6, Sine, 0.3),
                Tone::new(659.25, 0.1, 0.6, Sine, 0.3),
                Tone::new(783.99, 0.2, 0.6, Sine, 0.3),
                Tone::new(1046.50, 0.3, 0.8, Sine, 0.2),
            ],
            SoundEffect::Correct => vec![
                Tone::new(523.25, 0.0, 0.2, Sine, 0.5),
                Tone::new(659.25, 0.1, 0.3, Sine, 0.5),
            ],
            SoundEffect::Incorrect => vec![Tone::new(220.0, 0.0, 0.4, Sawtooth, 0.5)],
            SoundEffect::Start => vec![
                Tone::new(261.63, 0.0, 0.1, Sine, 0.5),
                Tone::new(329.63, 0.05, 0.1, Sine, 0.5),
                Tone::new(392.00, 0.1, 0.1, Sine, 0.5),
                Tone::new(523.25, 0.15, 0.3, Sine, 0.5),
            ],
            SoundEffect::End => vec![
                Tone::new(392.00, 0.0, 0.2, Sine, 0.5),
                Tone::new(523.25, 0.2, 0.2, Sine, 0.5),
                Tone::new(659.25, 0.4, 0.6, Sine, 0.5),
            ],
        }
    }
}

/// Signals for a generation that succeeded: the request, then the result.
pub const GENERATION_SUCCEEDED: [SoundEffect; 2] = [SoundEffect::Generate, SoundEffect::Success];

/// Signals for a generation that failed.
pub const GENERATION_FAILED: [SoundEffect; 2] = [SoundEffect::Generate, SoundEffect::Incorrect];

/// Gain applied on top of every tone.
pub const MASTER_GAIN: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// A single oscillator note: attack to `gain` over 50 ms, then exponential
/// decay until `start + duration` (seconds, relative to the effect start).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub frequency: f32,
    pub start: f32,
    pub duration: f32,
    pub waveform: Waveform,
    pub gain: f32,
}

impl Tone {
    const fn new(frequency: f32, start: f32, duration: f32, waveform: Waveform, gain: f32) -> Self {
        Self {
            frequency,
            start,
            duration,
            waveform,
            gain,
        }
    }
}

/// Receiver of fire-and-forget feedback signals.
/// Implementations must never fail or block for long.
pub trait FeedbackSink: Send + Sync {
    fn emit(&self, effect: SoundEffect);
}

/// Queues signals until a client collects them.
#[derive(Debug, Default)]
pub struct SignalQueue {
    pending: Mutex<Vec<SoundEffect>>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every signal queued so far, oldest first.
    pub fn drain(&self) -> Vec<SoundEffect> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl FeedbackSink for SignalQueue {
    fn emit(&self, effect: SoundEffect) {
        tracing::debug!(effect = effect.as_str(), "queued feedback signal");
        match self.pending.lock() {
            Ok(mut pending) => pending.push(effect),
            Err(poisoned) => poisoned.into_inner().push(effect),
        }
    }
}
