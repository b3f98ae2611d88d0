//! Audio resampling using rubato

use anyhow::Result;
use rubato::{
    Resampler as RubatoResampler, SincFixedIn, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};

/// Audio resampler
pub struct Resampler;

impl Resampler {
    /// Resample a mono waveform from one sample rate to another
    pub fn resample(samples: &[f32], from_sr: u32, to_sr: u32) -> Result<Vec<f32>> {
        if from_sr == to_sr {
            return Ok(samples.to_vec());
        }

        let mut channels = Self::resample_channels(&[samples.to_vec()], from_sr, to_sr)?;
        Ok(channels.pop().unwrap_or_default())
    }

    /// Resample every channel independently, preserving the channel count
    ///
    /// All channels must have the same length.
    pub fn resample_channels(
        channels: &[Vec<f32>],
        from_sr: u32,
        to_sr: u32,
    ) -> Result<Vec<Vec<f32>>> {
        if from_sr == to_sr || channels.is_empty() || channels[0].is_empty() {
            return Ok(channels.to_vec());
        }

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let mut resampler = SincFixedIn::<f32>::new(
            to_sr as f64 / from_sr as f64,
            2.0,
            params,
            channels[0].len(),
            channels.len(),
        )?;

        let output = resampler.process(channels, None)?;

        Ok(output)
    }
}
