//! Install plan: configured dependency installers rooted at a theme checkout.

use std::path::{Path, PathBuf};

use crate::config::{InstallConfig, InstallStep};
use crate::error::InvocationError;
use crate::runner::{Invocation, RunOptions};

/// Invocations for every configured install step, resolved against one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    root: PathBuf,
    invocations: Vec<Invocation>,
}

impl InstallPlan {
    /// Resolve every step of `install` against `root`.
    pub fn new(install: &InstallConfig, root: &Path) -> Result<Self, InvocationError> {
        let invocations = install
            .steps
            .iter()
            .map(|step| step_invocation(step, root))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            root: root.to_path_buf(),
            invocations,
        })
    }

    /// Theme checkout the plan runs in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn into_invocations(self) -> Vec<Invocation> {
        self.invocations
    }
}

fn step_invocation(step: &InstallStep, root: &Path) -> Result<Invocation, InvocationError> {
    let working_dir = match &step.cwd {
        Some(cwd) => root.join(cwd),
        None => root.to_path_buf(),
    };
    let options = RunOptions {
        working_dir: Some(working_dir),
        env: step.env.clone(),
        ..RunOptions::default()
    };
    Invocation::new(step.command.as_str(), options)
}

/// Pick the theme root: `--dir`, then configured `theme_dir`, then `cwd`.
///
/// Relative paths are resolved against `cwd`.
pub fn resolve_theme_root(cli_dir: Option<&Path>, install: &InstallConfig, cwd: &Path) -> PathBuf {
    match cli_dir.or(install.theme_dir.as_deref()) {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    }
}
