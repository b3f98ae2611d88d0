//! # ASR Frontend
//!
//! Audio pre-processing ahead of a speech-recognition encoder:
//!
//! - Decode an audio source (file or open stream) into a normalized `f32`
//!   waveform at the encoder sampling rate
//! - Split stereo channels or downmix to mono
//! - Pad or truncate a feature tensor to the fixed frame length the
//!   encoder expects
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use asr_frontend::{AudioDecoder, pad_or_trim, N_FRAMES, SAMPLE_RATE};
//! use candle_core::D;
//!
//! let waveform = AudioDecoder::decode("speech.wav", SAMPLE_RATE)?;
//! // ... compute encoder features from the waveform ...
//! let features = pad_or_trim(&features, N_FRAMES, D::Minus1)?;
//! ```

#![warn(missing_docs)]

pub mod audio;

// Re-exports for convenience
pub use audio::{pad_or_trim, AudioDecoder, Resampler};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default sampling rate expected by the encoder (16 kHz)
pub const SAMPLE_RATE: u32 = 16_000;

/// Number of feature frames expected by the encoder
pub const N_FRAMES: usize = 3000;
