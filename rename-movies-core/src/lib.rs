#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod error;
pub mod frame;
pub mod inference;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod prompt;
pub mod response;
pub mod sanitize;
pub mod suggest;
pub mod unique;

pub use apply::{apply_plan, ApplyOutcome, AssumeYes, Confirm};
pub use config::{Config, DefaultsConfig};
pub use error::{Error, Result};
pub use frame::{FfmpegFrameExtractor, FrameExtractor};
pub use inference::{InferenceClient, OpenAiClient, ResponseRequest};
pub use operations::{rename_operation, RenameOptions};
pub use output::{OutputFormat, OutputFormatter, RenameResult, VersionResult};
pub use plan::{PlanEntry, PlannedTargets, RenamePlan};
pub use preview::{render_plan, Preview};
pub use response::{extract_output_text, ContentBlock, OutputItem, ResponseBody, ResponseNode};
pub use sanitize::sanitize_suggestion;
pub use suggest::SuggestionGenerator;
pub use unique::{resolve_unique_target, resolve_unique_target_with, DEFAULT_MAX_SUFFIX};

/// Default model used when neither the CLI nor the config names one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Environment variable holding the inference API credential.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY_FOR_RENAME_MOVIE";
