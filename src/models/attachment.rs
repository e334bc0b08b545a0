use base64::Engine;
use serde::{Deserialize, Serialize};

/// How an attachment should be presented alongside its message. Decided
/// from the MIME type alone, never from the payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Image,
    Audio,
    Download,
}

/// A binary payload carried with a message for local rendering. Lives only
/// in memory for the duration of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.mime_type.starts_with("image/") {
            RenderMode::Image
        } else if self.mime_type.starts_with("audio/") {
            RenderMode::Audio
        } else {
            RenderMode::Download
        }
    }

    /// Resolvable URL for the payload, valid as long as the attachment is.
    pub fn data_url(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime_type, b64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_image() {
        let att = Attachment::new("shot.png", "image/png", vec![1, 2, 3]);
        assert_eq!(att.render_mode(), RenderMode::Image);
    }

    #[test]
    fn test_render_mode_audio() {
        let att = Attachment::new("voice-message.wav", "audio/wav", vec![0]);
        assert_eq!(att.render_mode(), RenderMode::Audio);
    }

    #[test]
    fn test_render_mode_download_fallback() {
        let att = Attachment::new("report.pdf", "application/pdf", vec![0]);
        assert_eq!(att.render_mode(), RenderMode::Download);
        let att = Attachment::new("blob", "application/octet-stream", vec![]);
        assert_eq!(att.render_mode(), RenderMode::Download);
    }

    #[test]
    fn test_data_url() {
        let att = Attachment::new("a.txt", "text/plain", b"hi".to_vec());
        assert_eq!(att.data_url(), "data:text/plain;base64,aGk=");
    }
}
