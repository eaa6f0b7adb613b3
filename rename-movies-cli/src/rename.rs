use anyhow::{Context, Result};
use rename_movies_core::{
    rename_operation, AssumeYes, Config, Confirm, FfmpegFrameExtractor, OpenAiClient,
    OutputFormatter, Preview, RenameOptions, SuggestionGenerator,
};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{OutputFormat, PreviewArg};
use crate::confirm::PromptConfirm;

#[allow(clippy::too_many_arguments)]
pub fn handle_rename(
    config: &Config,
    videos: &[PathBuf],
    model: Option<String>,
    dry_run: bool,
    preview: Option<PreviewArg>,
    output: OutputFormat,
    auto_approve: bool,
    use_color: Option<bool>,
) -> Result<()> {
    let defaults = &config.defaults;

    // Credential first, so a missing key never costs an ffmpeg run
    let client = OpenAiClient::from_env(
        &defaults.api_key_env,
        &defaults.api_base_url,
        Duration::from_secs(defaults.request_timeout_secs),
    )?;
    let extractor = FfmpegFrameExtractor::new(defaults.ffmpeg_path.clone());
    let model = model.unwrap_or_else(|| defaults.model.clone());
    let generator = SuggestionGenerator::new(extractor, client, model)
        .with_max_output_tokens(defaults.max_output_tokens);
    tracing::debug!(
        model = %generator.model(),
        videos = videos.len(),
        dry_run,
        "starting rename batch"
    );

    // JSON output keeps stdout machine-readable
    let json = output == OutputFormat::Json;
    let preview = if json {
        Preview::None
    } else {
        preview
            .unwrap_or_else(|| PreviewArg::from_config(&defaults.preview_format))
            .into()
    };
    let options = RenameOptions {
        preview,
        use_color,
        dry_run,
        quiet: json,
        max_suffix: defaults.max_suffix,
    };

    let mut confirm: Box<dyn Confirm> = if auto_approve {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::stdin())
    };

    let result = rename_operation(videos, &generator, confirm.as_mut(), &options)
        .context("Rename failed")?;

    print!("{}", result.format(output.into()));
    if json {
        println!();
    }
    Ok(())
}
