use crate::error::{Error, Result};
use crate::frame::FrameExtractor;
use crate::inference::{InferenceClient, ResponseRequest};
use crate::prompt::{system_instruction, user_instruction};
use crate::response::extract_output_text;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::path::Path;

const FRAME_MIME_TYPE: &str = "image/jpeg";

/// Asks the model for a file name for each video.
pub struct SuggestionGenerator<E, C> {
    extractor: E,
    client: C,
    model: String,
    max_output_tokens: u32,
}

impl<E: FrameExtractor, C: InferenceClient> SuggestionGenerator<E, C> {
    pub fn new(extractor: E, client: C, model: impl Into<String>) -> Self {
        Self {
            extractor,
            client,
            model: model.into(),
            max_output_tokens: 100,
        }
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract the first frame of `video` into a temporary directory and ask
    /// the model for a name. The temporary frame is removed on return.
    pub fn generate(&self, video: &Path) -> Result<String> {
        let stem = video
            .file_stem()
            .map_or_else(|| "video".into(), |s| s.to_string_lossy());
        let tmp_dir = tempfile::Builder::new()
            .prefix(&format!("rename-movies-{stem}-"))
            .tempdir()?;
        let frame = tmp_dir.path().join(format!("{stem}_frame0.jpg"));

        let frame = self.extractor.extract_first_frame(video, &frame)?;
        tracing::debug!(frame = %frame.display(), "extracted frame");

        let image = fs::read(&frame)?;
        let request = ResponseRequest {
            model: self.model.clone(),
            system: system_instruction(),
            user: user_instruction(video, &frame),
            image_data_url: format!("data:{FRAME_MIME_TYPE};base64,{}", STANDARD.encode(image)),
            max_output_tokens: self.max_output_tokens,
        };

        let response = self.client.respond(&request)?;
        let message = extract_output_text(response.as_ref());
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyResponse);
        }

        Ok(message.to_string())
    }
}
