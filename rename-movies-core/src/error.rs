use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that abort a rename batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no video files given")]
    NoVideos,

    #[error("video not found or not a regular file: {}", .0.display())]
    VideoNotFound(PathBuf),

    #[error("video given more than once: {}", .0.display())]
    DuplicateVideo(PathBuf),

    #[error("ffmpeg not found ({0}); install it and add it to PATH")]
    FfmpegNotFound(String),

    #[error("ffmpeg failed ({status}): {stderr}")]
    FfmpegFailed { status: ExitStatus, stderr: String },

    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("inference API call failed: {0}")]
    Api(String),

    #[error("inference API returned no text output")]
    EmptyResponse,

    #[error("suggested file name is empty after sanitizing: {0:?}")]
    EmptySuggestion(String),

    #[error("no free name for {} within {limit} suffixes", .desired.display())]
    SuffixExhausted { desired: PathBuf, limit: u32 },

    #[error("target already exists: {}", .0.display())]
    TargetExists(PathBuf),

    #[error("duplicate target in plan: {}", .0.display())]
    DuplicateTarget(PathBuf),

    #[error("source no longer exists: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("failed to rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by colliding target paths.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::TargetExists(_) | Self::DuplicateTarget(_) | Self::SuffixExhausted { .. }
        )
    }

    /// True for errors the user fixes by changing input or environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NoVideos
                | Self::VideoNotFound(_)
                | Self::DuplicateVideo(_)
                | Self::FfmpegNotFound(_)
                | Self::MissingApiKey(_)
                | Self::Config { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
