use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Produces a still image from a video file.
pub trait FrameExtractor {
    /// Write the first frame of `video` as a JPEG at `output` and return `output`.
    fn extract_first_frame(&self, video: &Path, output: &Path) -> Result<PathBuf>;
}

/// Frame extraction through an `ffmpeg` subprocess.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    program: PathBuf,
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegFrameExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, video: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(video)
            .args(["-frames:v", "1", "-q:v", "2"])
            .arg(output);
        cmd
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract_first_frame(&self, video: &Path, output: &Path) -> Result<PathBuf> {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::debug!(
            program = %self.program.display(),
            video = %video.display(),
            output = %output.display(),
            "extracting first frame"
        );

        let result = self.command(video, output).output();
        let out = match result {
            Ok(out) => out,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::FfmpegNotFound(self.program.display().to_string()));
            },
            Err(e) => return Err(Error::Io(e)),
        };

        if !out.status.success() {
            return Err(Error::FfmpegFailed {
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        Ok(output.to_path_buf())
    }
}
