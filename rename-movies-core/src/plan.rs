use crate::error::{Error, Result};
use crate::sanitize::sanitize_suggestion;
use crate::unique::{occupied, resolve_unique_target_with, DEFAULT_MAX_SUFFIX};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Targets already chosen earlier in the current batch.
#[derive(Debug, Clone, Default)]
pub struct PlannedTargets {
    targets: HashSet<PathBuf>,
}

impl PlannedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the target was already planned.
    pub fn insert(&mut self, target: PathBuf) -> bool {
        self.targets.insert(target)
    }

    pub fn contains(&self, target: &Path) -> bool {
        self.targets.contains(target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Model output before sanitizing and conflict resolution
    pub suggestion: String,
}

/// Ordered renames for one batch.
///
/// Targets are resolved as entries are pushed, so they are pairwise distinct
/// and were free on disk at the time each entry was added.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    entries: Vec<PlanEntry>,
    planned: PlannedTargets,
    max_suffix: u32,
}

impl Default for RenamePlan {
    fn default() -> Self {
        Self::new()
    }
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::with_max_suffix(DEFAULT_MAX_SUFFIX)
    }

    pub fn with_max_suffix(max_suffix: u32) -> Self {
        Self {
            entries: Vec::new(),
            planned: PlannedTargets::new(),
            max_suffix,
        }
    }

    /// Sanitize `suggestion`, resolve it next to `source` and record the rename.
    ///
    /// Returns `None` when the source already carries the suggested name.
    pub fn push(&mut self, source: &Path, suggestion: &str) -> Result<Option<&PlanEntry>> {
        let name = sanitize_suggestion(suggestion, source)?;
        let desired = source.with_file_name(&name);

        if desired == source {
            tracing::info!(source = %source.display(), "already has the suggested name");
            return Ok(None);
        }

        let target =
            resolve_unique_target_with(&desired, &self.planned, self.max_suffix, occupied)?;
        self.planned.insert(target.clone());
        self.entries.push(PlanEntry {
            source: source.to_path_buf(),
            target,
            suggestion: suggestion.to_string(),
        });

        Ok(self.entries.last())
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn planned(&self) -> &PlannedTargets {
        &self.planned
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commit-time check: sources are distinct and still exist, targets are
    /// distinct and free.
    pub fn validate(&self) -> Result<()> {
        let mut sources = HashSet::new();
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !sources.insert(entry.source.as_path()) {
                return Err(Error::DuplicateVideo(entry.source.clone()));
            }
            if !occupied(&entry.source) {
                return Err(Error::SourceMissing(entry.source.clone()));
            }
            if !seen.insert(entry.target.as_path()) {
                return Err(Error::DuplicateTarget(entry.target.clone()));
            }
            if occupied(&entry.target) {
                return Err(Error::TargetExists(entry.target.clone()));
            }
        }
        Ok(())
    }
}
