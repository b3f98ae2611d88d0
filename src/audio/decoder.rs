//! Audio decoding using symphonia

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, ReadOnlySource};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use super::Resampler;

/// Audio decoder that accepts any container/codec supported by symphonia
///
/// All entry points return waveforms at the requested sampling rate:
/// sources at a different native rate are resampled per channel before
/// any channel handling takes place.
pub struct AudioDecoder;

impl AudioDecoder {
    /// Decode an audio file into a mono waveform at `target_sr`.
    ///
    /// Multi-channel input is downmixed by averaging across channels.
    pub fn decode<P: AsRef<Path>>(path: P, target_sr: u32) -> Result<Vec<f32>> {
        let (mss, hint) = Self::open_path(path.as_ref())?;
        let channels = Self::decode_at_rate(mss, hint, target_sr)?;
        Ok(Self::downmix(channels))
    }

    /// Decode an open binary stream into a mono waveform at `target_sr`.
    pub fn decode_reader<R>(reader: R, target_sr: u32) -> Result<Vec<f32>>
    where
        R: Read + Send + Sync + 'static,
    {
        let mss = Self::open_reader(reader);
        let channels = Self::decode_at_rate(mss, Hint::new(), target_sr)?;
        Ok(Self::downmix(channels))
    }

    /// Decode an audio file into separate (left, right) waveforms at `target_sr`.
    ///
    /// Mono input is returned in both slots; more than two channels is an
    /// error.
    pub fn decode_stereo<P: AsRef<Path>>(
        path: P,
        target_sr: u32,
    ) -> Result<(Vec<f32>, Vec<f32>)> {
        let (mss, hint) = Self::open_path(path.as_ref())?;
        let channels = Self::decode_at_rate(mss, hint, target_sr)?;
        Self::split_stereo(channels)
    }

    /// Decode an open binary stream into separate (left, right) waveforms
    /// at `target_sr`.
    pub fn decode_stereo_reader<R>(reader: R, target_sr: u32) -> Result<(Vec<f32>, Vec<f32>)>
    where
        R: Read + Send + Sync + 'static,
    {
        let mss = Self::open_reader(reader);
        let channels = Self::decode_at_rate(mss, Hint::new(), target_sr)?;
        Self::split_stereo(channels)
    }

    fn open_path(path: &Path) -> Result<(MediaSourceStream, Hint)> {
        let file = File::open(path)
            .with_context(|| format!("failed to open audio file: {}", path.display()))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        Ok((mss, hint))
    }

    fn open_reader<R>(reader: R) -> MediaSourceStream
    where
        R: Read + Send + Sync + 'static,
    {
        MediaSourceStream::new(Box::new(ReadOnlySource::new(reader)), Default::default())
    }

    /// Decode all packets and resample every channel to `target_sr`.
    fn decode_at_rate(
        mss: MediaSourceStream,
        hint: Hint,
        target_sr: u32,
    ) -> Result<Vec<Vec<f32>>> {
        let (channels, native_sr) = Self::decode_native(mss, hint)?;

        if native_sr == target_sr {
            return Ok(channels);
        }

        debug!(native_sr, target_sr, "resampling decoded audio");
        Resampler::resample_channels(&channels, native_sr, target_sr)
    }

    /// Decode the source into planar per-channel samples at its native rate.
    fn decode_native(mss: MediaSourceStream, hint: Hint) -> Result<(Vec<Vec<f32>>, u32)> {
        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .context("failed to parse audio source")?;
        let mut format = probed.format;

        let track = format.default_track().context("no audio track found")?;
        let track_id = track.id;
        let native_sr = track
            .codec_params
            .sample_rate
            .context("unknown sample rate")?;
        let channel_count = track
            .codec_params
            .channels
            .map(|c| c.count())
            .context("unknown channel count")?;
        if channel_count == 0 {
            bail!("audio track has no channels");
        }

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .context("unsupported audio codec")?;

        let mut interleaved: Vec<f32> = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(e).context("failed to read audio packet"),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("skipping undecodable packet: {e}");
                    continue;
                }
                Err(e) => return Err(e).context("failed to decode audio packet"),
            };

            let spec = *decoded.spec();
            let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            buf.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(buf.samples());
        }

        if interleaved.is_empty() {
            bail!("no audio samples decoded");
        }

        let frames = interleaved.len() / channel_count;
        let mut channels: Vec<Vec<f32>> = (0..channel_count)
            .map(|_| Vec::with_capacity(frames))
            .collect();
        for frame in interleaved.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Ok((channels, native_sr))
    }

    /// Average across channels; a single channel passes through untouched.
    fn downmix(mut channels: Vec<Vec<f32>>) -> Vec<f32> {
        if channels.len() == 1 {
            return channels.pop().unwrap_or_default();
        }

        let scale = 1.0 / channels.len() as f32;
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        (0..frames)
            .map(|i| channels.iter().map(|ch| ch[i]).sum::<f32>() * scale)
            .collect()
    }

    fn split_stereo(mut channels: Vec<Vec<f32>>) -> Result<(Vec<f32>, Vec<f32>)> {
        match channels.len() {
            2 => {
                let right = channels.pop().unwrap_or_default();
                let left = channels.pop().unwrap_or_default();
                Ok((left, right))
            }
            1 => {
                warn!("stereo split requested but audio is mono, duplicating the channel");
                let mono = channels.pop().unwrap_or_default();
                Ok((mono.clone(), mono))
            }
            n => bail!("cannot split {n}-channel audio into a stereo pair"),
        }
    }
}
