use crate::error::{Error, Result};
use crate::plan::RenamePlan;
use std::fs;
use std::path::PathBuf;

/// Source of the yes/no decision before a plan is applied.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Approves every prompt (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { renamed: usize },
    Cancelled,
}

pub const CONFIRM_PROMPT: &str = "Apply the renames above?";

/// Validate, confirm and apply `plan`.
///
/// Nothing on disk changes unless validation passes and `confirm` approves.
/// If a rename fails midway, renames already performed are reverted.
pub fn apply_plan(plan: &RenamePlan, confirm: &mut dyn Confirm) -> Result<ApplyOutcome> {
    if plan.is_empty() {
        return Ok(ApplyOutcome::Applied { renamed: 0 });
    }

    plan.validate()?;

    if !confirm.confirm(CONFIRM_PROMPT)? {
        tracing::info!("renames cancelled at confirmation");
        return Ok(ApplyOutcome::Cancelled);
    }

    let mut performed: Vec<(PathBuf, PathBuf)> = Vec::new();
    for entry in plan.entries() {
        if let Err(source) = fs::rename(&entry.source, &entry.target) {
            let err = Error::Rename {
                from: entry.source.clone(),
                to: entry.target.clone(),
                source,
            };
            tracing::warn!(
                error = %err,
                "rename failed, reverting {} completed renames",
                performed.len()
            );
            rollback(&performed);
            return Err(err);
        }
        tracing::info!(
            from = %entry.source.display(),
            to = %entry.target.display(),
            "renamed"
        );
        performed.push((entry.source.clone(), entry.target.clone()));
    }

    Ok(ApplyOutcome::Applied {
        renamed: performed.len(),
    })
}

/// Revert renames in reverse order. Failures are logged, not returned, so
/// the original rename error reaches the caller.
fn rollback(performed: &[(PathBuf, PathBuf)]) {
    for (from, to) in performed.iter().rev() {
        if let Err(e) = fs::rename(to, from) {
            tracing::warn!(
                from = %to.display(),
                to = %from.display(),
                error = %e,
                "failed to revert rename"
            );
        }
    }
}
