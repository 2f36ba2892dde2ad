use super::GitCommand;
use crate::error::Result;
use std::path::Path;

impl GitCommand {
    /// Check if a branch exists locally.
    pub fn branch_exists(&self, branch: &str, cwd: &Path) -> Result<bool> {
        let ref_name = format!("refs/heads/{branch}");
        let output = self.run(&["rev-parse", "--verify", "--quiet", &ref_name], cwd, false)?;
        Ok(output.success())
    }

    /// Check if `<remote>/<branch>` exists as a remote-tracking ref.
    pub fn remote_branch_exists(&self, branch: &str, remote: &str, cwd: &Path) -> Result<bool> {
        let ref_name = format!("refs/remotes/{remote}/{branch}");
        let output = self.run(&["rev-parse", "--verify", "--quiet", &ref_name], cwd, false)?;
        Ok(output.success())
    }

    pub fn branch_delete(&self, branch: &str, force: bool, cwd: &Path) -> Result<()> {
        let flag = if force { "-D" } else { "-d" };
        self.run(&["branch", flag, branch], cwd, true)?;
        Ok(())
    }

    /// Upstream of a local branch in `remote/branch` form, if one is
    /// configured and its ref resolves.
    pub fn upstream_branch(&self, branch: &str, cwd: &Path) -> Result<Option<String>> {
        let revspec = format!("{branch}@{{upstream}}");
        let output = self.run(&["rev-parse", "--abbrev-ref", &revspec], cwd, false)?;
        if !output.success() {
            return Ok(None);
        }
        let upstream = output.trimmed();
        Ok((!upstream.is_empty()).then(|| upstream.to_string()))
    }

    /// Upstream configured for `branch` (`remote/branch`), even when the
    /// remote-tracking ref no longer exists.
    pub fn configured_upstream(&self, branch: &str, cwd: &Path) -> Result<Option<String>> {
        let ref_name = format!("refs/heads/{branch}");
        let upstream = self.output_of(
            &["for-each-ref", "--format=%(upstream:short)", &ref_name],
            cwd,
        )?;
        Ok((!upstream.is_empty()).then_some(upstream))
    }

    pub fn set_upstream(
        &self,
        branch: &str,
        remote: &str,
        remote_branch: &str,
        cwd: &Path,
    ) -> Result<()> {
        let upstream = format!("--set-upstream-to={remote}/{remote_branch}");
        self.run(&["branch", &upstream, branch], cwd, true)?;
        Ok(())
    }

    /// Configure where `branch` pushes even though the remote branch does not
    /// exist yet, so a plain `git push` works without `-u`.
    pub fn configure_push_remote(
        &self,
        branch: &str,
        remote: &str,
        remote_branch: &str,
        cwd: &Path,
    ) -> Result<()> {
        self.config_set(&format!("branch.{branch}.remote"), remote, cwd)?;
        self.config_set(
            &format!("branch.{branch}.merge"),
            &format!("refs/heads/{remote_branch}"),
            cwd,
        )
    }

    /// Detect the repository's default branch.
    ///
    /// Tries `refs/remotes/<remote>/HEAD` first, then the first of `main` and
    /// `master` that exists locally, and finally falls back to `main`.
    pub fn default_branch(&self, remote: &str, cwd: &Path) -> Result<String> {
        let head_ref = format!("refs/remotes/{remote}/HEAD");
        let output = self.run(&["symbolic-ref", "--quiet", &head_ref], cwd, false)?;
        if output.success() {
            let prefix = format!("refs/remotes/{remote}/");
            if let Some(branch) = output.trimmed().strip_prefix(&prefix) {
                if !branch.is_empty() {
                    return Ok(branch.to_string());
                }
            }
        }

        for candidate in ["main", "master"] {
            if self.branch_exists(candidate, cwd)? {
                return Ok(candidate.to_string());
            }
        }

        Ok("main".to_string())
    }
}
