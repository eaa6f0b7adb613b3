use crate::apply::{apply_plan, ApplyOutcome, Confirm};
use crate::error::{Error, Result};
use crate::frame::FrameExtractor;
use crate::inference::InferenceClient;
use crate::output::RenameResult;
use crate::plan::RenamePlan;
use crate::preview::{render_plan, Preview};
use crate::suggest::SuggestionGenerator;
use crate::unique::DEFAULT_MAX_SUFFIX;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub preview: Preview,
    pub use_color: Option<bool>,
    /// Plan and preview only
    pub dry_run: bool,
    /// Suppress progress lines on stdout
    pub quiet: bool,
    pub max_suffix: u32,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            preview: Preview::List,
            use_color: None,
            dry_run: false,
            quiet: false,
            max_suffix: DEFAULT_MAX_SUFFIX,
        }
    }
}

/// Suggest, plan, confirm and apply renames for `videos`, one at a time.
///
/// Any error aborts the batch before a single file is renamed.
pub fn rename_operation<E, C>(
    videos: &[PathBuf],
    generator: &SuggestionGenerator<E, C>,
    confirm: &mut dyn Confirm,
    options: &RenameOptions,
) -> Result<RenameResult>
where
    E: FrameExtractor,
    C: InferenceClient,
{
    if videos.is_empty() {
        return Err(Error::NoVideos);
    }
    if let Some(missing) = videos.iter().find(|v| !v.is_file()) {
        return Err(Error::VideoNotFound(missing.clone()));
    }
    let mut seen = HashSet::new();
    for video in videos {
        if !seen.insert(fs::canonicalize(video)?) {
            return Err(Error::DuplicateVideo(video.clone()));
        }
    }

    let say = |line: &str| {
        if !options.quiet {
            println!("{line}");
        }
    };

    let mut plan = RenamePlan::with_max_suffix(options.max_suffix);
    for video in videos {
        say(&format!("Video: {}", video.display()));
        let suggestion = generator.generate(video)?;
        say("Suggested name:");
        say(&suggestion);

        if plan.push(video, &suggestion)?.is_none() {
            say("Already named as suggested, skipping.");
        }
        say(&"-".repeat(40));
    }

    let mut result = RenameResult {
        model: generator.model().to_string(),
        videos: videos.len(),
        planned: plan.len(),
        renamed: 0,
        dry_run: options.dry_run,
        cancelled: false,
        entries: plan.entries().to_vec(),
    };

    if plan.is_empty() {
        return Ok(result);
    }

    if !options.quiet && options.preview != Preview::None {
        println!("Rename preview:");
        print!("{}", render_plan(&plan, options.preview, options.use_color));
    }

    if options.dry_run {
        return Ok(result);
    }

    match apply_plan(&plan, confirm)? {
        ApplyOutcome::Applied { renamed } => result.renamed = renamed,
        ApplyOutcome::Cancelled => result.cancelled = true,
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::AssumeYes;
    use crate::inference::ResponseRequest;
    use crate::response::ResponseNode;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    struct TouchExtractor;

    impl FrameExtractor for TouchExtractor {
        fn extract_first_frame(&self, _video: &Path, output: &Path) -> Result<PathBuf> {
            fs::write(output, b"jpeg")?;
            Ok(output.to_path_buf())
        }
    }

    struct FixedClient(&'static str);

    impl InferenceClient for FixedClient {
        fn respond(&self, _request: &ResponseRequest) -> Result<Box<dyn ResponseNode>> {
            Ok(Box::new(json!({
                "output": [{"content": [{"type": "output_text", "text": self.0}]}]
            })))
        }
    }

    fn quiet() -> RenameOptions {
        RenameOptions {
            quiet: true,
            ..RenameOptions::default()
        }
    }

    #[test]
    fn test_empty_video_list_is_rejected() {
        let generator = SuggestionGenerator::new(TouchExtractor, FixedClient("x"), "m");
        let err = rename_operation(&[], &generator, &mut AssumeYes, &quiet()).unwrap_err();
        assert!(matches!(err, Error::NoVideos));
    }

    #[test]
    fn test_missing_video_is_rejected_before_any_request() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("a.mp4");
        fs::write(&present, "").unwrap();
        let missing = temp_dir.path().join("missing.mp4");
        let generator = SuggestionGenerator::new(TouchExtractor, FixedClient("x"), "m");

        let err = rename_operation(
            &[present.clone(), missing.clone()],
            &generator,
            &mut AssumeYes,
            &quiet(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::VideoNotFound(ref p) if p == &missing));
        assert!(present.exists());
    }

    #[test]
    fn test_same_video_twice_is_rejected_before_any_request() {
        struct NoCalls;
        impl InferenceClient for NoCalls {
            fn respond(&self, _request: &ResponseRequest) -> Result<Box<dyn ResponseNode>> {
                panic!("no request expected");
            }
        }

        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("a.mp4");
        fs::write(&video, "").unwrap();
        let alias = temp_dir.path().join(".").join("a.mp4");
        let generator = SuggestionGenerator::new(TouchExtractor, NoCalls, "m");

        let err = rename_operation(&[video.clone(), alias], &generator, &mut AssumeYes, &quiet())
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateVideo(_)));
        assert!(video.exists());
    }

    #[test]
    fn test_dry_run_plans_without_renaming() {
        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("a.mp4");
        fs::write(&video, "").unwrap();
        let generator =
            SuggestionGenerator::new(TouchExtractor, FixedClient("Rainy Street.mp4"), "m");
        let options = RenameOptions {
            dry_run: true,
            ..quiet()
        };

        let result =
            rename_operation(&[video.clone()], &generator, &mut AssumeYes, &options).unwrap();

        assert!(result.dry_run);
        assert_eq!(result.planned, 1);
        assert_eq!(result.renamed, 0);
        assert_eq!(result.entries[0].target, temp_dir.path().join("Rainy Street.mp4"));
        assert!(video.exists());
    }

    #[test]
    fn test_already_named_video_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let video = temp_dir.path().join("Rainy Street.mp4");
        fs::write(&video, "").unwrap();
        let generator =
            SuggestionGenerator::new(TouchExtractor, FixedClient("Rainy Street.mp4"), "m");

        let result =
            rename_operation(&[video.clone()], &generator, &mut AssumeYes, &quiet()).unwrap();

        assert_eq!(result.planned, 0);
        assert_eq!(result.renamed, 0);
        assert!(video.exists());
    }
}
