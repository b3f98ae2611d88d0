//! Audio processing modules
//!
//! - Audio decoding (WAV, MP3, FLAC, OGG, ...) via symphonia
//! - Sample rate conversion to the encoder rate
//! - Fixed-length frame shaping for encoder feature tensors

mod decoder;
mod frame;
mod resampler;

pub use decoder::AudioDecoder;
pub use frame::pad_or_trim;
pub use resampler::Resampler;
