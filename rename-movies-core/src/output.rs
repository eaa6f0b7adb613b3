use crate::plan::PlanEntry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a rename batch
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RenameResult {
    pub model: String,
    /// Videos that were processed
    pub videos: usize,
    /// Entries in the plan
    pub planned: usize,
    /// Renames applied on disk
    pub renamed: usize,
    pub dry_run: bool,
    pub cancelled: bool,
    pub entries: Vec<PlanEntry>,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.cancelled,
            "operation": "rename",
            "model": self.model,
            "summary": {
                "videos": self.videos,
                "planned": self.planned,
                "renamed": self.renamed,
            },
            "dry_run": self.dry_run,
            "cancelled": self.cancelled,
            "renames": self.entries,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.cancelled {
            return "Renames cancelled.\n".to_string();
        }
        if self.dry_run {
            return format!("Dry run: {} renames planned, nothing changed\n", self.planned);
        }
        if self.planned == 0 {
            return "Nothing to rename\n".to_string();
        }

        let mut output = String::new();
        for entry in &self.entries {
            let _ = writeln!(output, "Renamed: {}", entry.target.display());
        }
        let _ = writeln!(output, "✓ Renamed {} of {} videos", self.renamed, self.videos);
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn applied() -> RenameResult {
        RenameResult {
            model: "gpt-4o".to_string(),
            videos: 2,
            planned: 1,
            renamed: 1,
            dry_run: false,
            cancelled: false,
            entries: vec![PlanEntry {
                source: PathBuf::from("/v/IMG_1.mp4"),
                target: PathBuf::from("/v/Cat Nap.mp4"),
                suggestion: "Cat Nap.mp4".to_string(),
            }],
        }
    }

    #[test]
    fn test_rename_result_json_format() {
        let json: serde_json::Value = serde_json::from_str(&applied().format_json()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["operation"], "rename");
        assert_eq!(json["summary"]["renamed"], 1);
        assert_eq!(json["renames"][0]["target"], "/v/Cat Nap.mp4");
        assert_eq!(json["renames"][0]["suggestion"], "Cat Nap.mp4");
    }

    #[test]
    fn test_rename_result_summary_format() {
        let summary = applied().format(OutputFormat::Summary);
        assert!(summary.contains("Renamed: /v/Cat Nap.mp4"));
        assert!(summary.contains("✓ Renamed 1 of 2 videos"));
    }

    #[test]
    fn test_cancelled_and_dry_run_summaries() {
        let mut result = applied();
        result.renamed = 0;
        result.dry_run = true;
        assert_eq!(
            result.format_summary(),
            "Dry run: 1 renames planned, nothing changed\n"
        );

        result.dry_run = false;
        result.cancelled = true;
        assert_eq!(result.format_summary(), "Renames cancelled.\n");
        let json: serde_json::Value = serde_json::from_str(&result.format_json()).unwrap();
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_version_result_formats() {
        let result = VersionResult {
            name: "rename-movies".to_string(),
            version: "0.1.0".to_string(),
        };
        assert_eq!(result.format_summary(), "rename-movies 0.1.0");
        assert_eq!(
            result.format_json(),
            r#"{"name":"rename-movies","version":"0.1.0"}"#
        );
    }
}
