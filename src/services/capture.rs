//! Attachment producers: file loading and microphone capture.
//!
//! Both feed the same `Attachment` model; neither touches the model call.
//! Recording is a two-state toggle (idle or recording) with no pause and
//! no time limit; stopping yields one in-memory WAV clip.

use std::path::Path;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::Attachment;

const VOICE_MESSAGE_NAME: &str = "voice-message.wav";

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Device access failed: {0}")]
    DeviceAccess(String),

    #[error("Failed to encode recorded audio: {0}")]
    Encode(String),
}

/// Load a local file as an attachment, deriving the MIME type from the
/// extension. Read failures (missing file, permissions) map to
/// `DeviceAccess`.
pub fn read_attachment(path: &Path) -> Result<Attachment, CaptureError> {
    let data = std::fs::read(path)
        .map_err(|e| CaptureError::DeviceAccess(format!("cannot read {}: {}", path.display(), e)))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();

    Ok(Attachment::new(name, mime_from_extension(path), data))
}

/// Determine a MIME type from the file extension. Used only to pick a
/// rendering mode, so the octet-stream fallback is always safe.
pub fn mime_from_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

struct RecordingSession {
    stream: cpal::Stream,
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

/// Microphone recorder toggling between idle and recording. Samples are
/// captured at the device's native rate, mixed down to mono, and encoded
/// as 16-bit WAV when the recording stops.
#[derive(Default)]
pub struct VoiceRecorder {
    session: Option<RecordingSession>,
}

impl VoiceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Open the default input device and start capturing. A no-op when
    /// already recording.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.session.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host.default_input_device().ok_or_else(|| {
            CaptureError::DeviceAccess("microphone access needed for voice messages".into())
        })?;

        let default_config = device.default_input_config().map_err(|e| {
            CaptureError::DeviceAccess(format!("no default input config: {}", e))
        })?;

        let native_rate = default_config.sample_rate();
        let native_channels = default_config.channels();
        let rate_hz = native_rate;
        let stream_config = StreamConfig {
            channels: native_channels,
            sample_rate: native_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let samples: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = samples.clone();

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _info: &cpal::InputCallbackInfo| {
                    let mono = if native_channels > 1 {
                        to_mono(data, native_channels)
                    } else {
                        data.to_vec()
                    };
                    match sink.lock() {
                        Ok(mut buf) => buf.extend_from_slice(&mono),
                        Err(_) => debug!("sample buffer poisoned, dropping chunk"),
                    }
                },
                move |err| {
                    error!("audio input stream error: {}", err);
                },
                None,
            )
            .map_err(|e| {
                CaptureError::DeviceAccess(format!("failed to build input stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            CaptureError::DeviceAccess(format!("failed to start input stream: {}", e))
        })?;

        info!("voice recording started at {}Hz", rate_hz);
        self.session = Some(RecordingSession {
            stream,
            samples,
            sample_rate: rate_hz,
        });
        Ok(())
    }

    /// Stop capturing and return the recorded clip as an attachment.
    /// Returns `Ok(None)` when no recording is in progress.
    pub fn stop(&mut self) -> Result<Option<Attachment>, CaptureError> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };

        drop(session.stream);
        let samples = session
            .samples
            .lock()
            .map_err(|_| CaptureError::Encode("sample buffer poisoned".into()))?;
        info!("voice recording stopped: {} samples", samples.len());

        let data = encode_wav(&samples, session.sample_rate)?;
        Ok(Some(Attachment::new(VOICE_MESSAGE_NAME, "audio/wav", data)))
    }
}

/// Encode mono f32 samples as an in-memory 16-bit WAV file.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, CaptureError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        for &sample in samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer
                .write_sample((clamped * i16::MAX as f32) as i16)
                .map_err(|e| CaptureError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}

/// Mix interleaved multi-channel audio down to mono by averaging channels.
fn to_mono(data: &[f32], channels: u16) -> Vec<f32> {
    let ch = channels as usize;
    data.chunks_exact(ch)
        .map(|frame| frame.iter().sum::<f32>() / ch as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::models::RenderMode;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a.png")), "image/png");
        assert_eq!(mime_from_extension(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("a.wav")), "audio/wav");
        assert_eq!(mime_from_extension(Path::new("a.pdf")), "application/pdf");
        assert_eq!(
            mime_from_extension(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_read_attachment_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"fake-png-bytes").unwrap();

        let att = read_attachment(&path).unwrap();
        assert_eq!(att.name, "shot.png");
        assert_eq!(att.mime_type, "image/png");
        assert_eq!(att.data, b"fake-png-bytes");
        assert_eq!(att.render_mode(), RenderMode::Image);
    }

    #[test]
    fn test_read_attachment_missing_file() {
        let err = read_attachment(&PathBuf::from("/no/such/file.txt")).unwrap_err();
        assert!(matches!(err, CaptureError::DeviceAccess(_)));
    }

    #[test]
    fn test_encode_wav_header() {
        let samples = vec![0.0f32, 0.5, -0.5, 1.5, -1.5];
        let data = encode_wav(&samples, 16_000).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WAVE");
        // 44-byte header plus two bytes per sample.
        assert_eq!(data.len(), 44 + samples.len() * 2);
    }

    #[test]
    fn test_to_mono_averages_channels() {
        let interleaved = [0.0f32, 1.0, 0.5, 0.5];
        assert_eq!(to_mono(&interleaved, 2), vec![0.5, 0.5]);
    }

    #[test]
    fn test_stop_while_idle_is_none() {
        let mut recorder = VoiceRecorder::new();
        assert!(!recorder.is_recording());
        assert!(recorder.stop().unwrap().is_none());
    }
}
