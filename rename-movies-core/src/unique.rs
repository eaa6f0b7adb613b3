use crate::error::{Error, Result};
use crate::plan::PlannedTargets;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Highest numeric suffix tried before giving up on a target.
pub const DEFAULT_MAX_SUFFIX: u32 = 10_000;

/// Return `desired` if it is free, otherwise the first free `stem-N.ext`.
///
/// A path is free when it does not exist on disk and is not already in
/// `planned`. Numbering starts at 1 and stops at [`DEFAULT_MAX_SUFFIX`].
pub fn resolve_unique_target(desired: &Path, planned: &PlannedTargets) -> Result<PathBuf> {
    resolve_unique_target_with(desired, planned, DEFAULT_MAX_SUFFIX, occupied)
}

/// True when anything, including a dangling symlink, sits at `path`.
pub(crate) fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Same as [`resolve_unique_target`] with an explicit suffix limit and
/// existence check.
pub fn resolve_unique_target_with<F>(
    desired: &Path,
    planned: &PlannedTargets,
    max_suffix: u32,
    exists: F,
) -> Result<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let is_free = |path: &Path| !planned.contains(path) && !exists(path);

    if is_free(desired) {
        return Ok(desired.to_path_buf());
    }

    for counter in 1..=max_suffix {
        let candidate = numbered_candidate(desired, counter);
        if is_free(&candidate) {
            tracing::debug!(
                desired = %desired.display(),
                resolved = %candidate.display(),
                "target taken, using numbered name"
            );
            return Ok(candidate);
        }
    }

    Err(Error::SuffixExhausted {
        desired: desired.to_path_buf(),
        limit: max_suffix,
    })
}

/// `dir/stem.ext` -> `dir/stem-N.ext`. Only the last extension is split off.
fn numbered_candidate(desired: &Path, counter: u32) -> PathBuf {
    let stem = desired.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    name.push(format!("-{counter}"));
    if let Some(ext) = desired.extension() {
        name.push(".");
        name.push(ext);
    }
    desired.with_file_name(name)
}
