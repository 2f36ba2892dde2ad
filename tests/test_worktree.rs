//! Worktree directory and sync engine against real repositories.

mod common;

use anyhow::Result;
use common::{commit_file, git, Fixture};
use std::fs;
use std::path::PathBuf;
use wt::core::worktree::CleanReason;
use wt::core::NullSink;
use wt::WtError;

#[test]
fn test_create_then_find_by_name() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;

    let path = manager.create("foo", None, false, &mut NullSink)?;
    assert_eq!(path, fx.root().join("repo-foo"));
    assert!(path.is_dir());

    let found = manager.find_by_name("foo")?.expect("worktree should exist");
    assert_eq!(found.path, path);
    assert_eq!(found.branch.as_deref(), Some("feature/foo"));
    assert_eq!(found.commit_message, "Initial commit");

    // Lookup by raw branch name also works.
    let by_branch = manager.find_by_name("feature/foo")?.expect("found by branch");
    assert_eq!(by_branch.path, path);
    Ok(())
}

#[test]
fn test_create_twice_is_already_exists() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    manager.create("foo", None, false, &mut NullSink)?;
    let before = manager.list()?;

    let err = manager
        .create("foo", None, false, &mut NullSink)
        .unwrap_err();
    assert!(matches!(err, WtError::AlreadyExists { ref name, .. } if name == "foo"));
    assert_eq!(manager.list()?, before);
    Ok(())
}

#[test]
fn test_create_uses_existing_branch() -> Result<()> {
    let fx = Fixture::new()?;
    git(&fx.repo, &["branch", "feature/old"])?;
    let manager = fx.manager()?;

    manager.create("old", None, false, &mut NullSink)?;
    let found = manager.find_by_name("old")?.expect("worktree should exist");
    assert_eq!(found.branch.as_deref(), Some("feature/old"));
    Ok(())
}

#[test]
fn test_create_wires_push_target_for_new_branch() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    manager.create("foo", None, false, &mut NullSink)?;

    assert_eq!(
        git(&fx.repo, &["config", "branch.feature/foo.remote"])?,
        "origin"
    );
    assert_eq!(
        git(&fx.repo, &["config", "branch.feature/foo.merge"])?,
        "refs/heads/feature/foo"
    );
    Ok(())
}

#[test]
fn test_path_exists_is_rejected() -> Result<()> {
    let fx = Fixture::new()?;
    fs::create_dir_all(fx.root().join("repo-taken"))?;
    let manager = fx.manager()?;

    let err = manager
        .create("taken", None, false, &mut NullSink)
        .unwrap_err();
    assert!(matches!(err, WtError::PathExists { .. }));
    assert!(!manager.git().branch_exists("feature/taken", &fx.repo)?);
    Ok(())
}

#[test]
fn test_delete_removes_worktree_and_branch() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;

    assert!(manager.delete("foo", true, false, &mut NullSink)?);
    assert!(manager.find_by_name("foo")?.is_none());
    assert!(!path.exists());
    assert!(!manager.git().branch_exists("feature/foo", &fx.repo)?);
    Ok(())
}

#[test]
fn test_delete_keep_branch() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    manager.create("foo", None, false, &mut NullSink)?;

    assert!(manager.delete("foo", false, true, &mut NullSink)?);
    assert!(manager.find_by_name("foo")?.is_none());
    assert!(manager.git().branch_exists("feature/foo", &fx.repo)?);
    Ok(())
}

#[test]
fn test_delete_missing_is_not_found() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let err = manager
        .delete("nope", false, false, &mut NullSink)
        .unwrap_err();
    assert!(matches!(err, WtError::NotFound { ref name } if name == "nope"));
    Ok(())
}

#[test]
fn test_delete_with_uncommitted_changes_needs_force() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    fs::write(path.join("scratch.txt"), "wip\n")?;

    let err = manager
        .delete("foo", false, false, &mut NullSink)
        .unwrap_err();
    assert!(matches!(err, WtError::UncommittedChanges { ref name, .. } if name == "foo"));
    assert!(path.exists());

    assert!(manager.delete("foo", true, false, &mut NullSink)?);
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_delete_current_worktree_is_refused() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;

    let inside = manager.with_cwd(&path);
    let err = inside.delete("foo", true, false, &mut NullSink).unwrap_err();
    assert!(matches!(err, WtError::CannotDeleteCurrent));
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_delete_with_unpushed_commits_declined_by_default() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    git(&path, &["push", "-q", "-u", "origin", "feature/foo"])?;
    commit_file(&path, "work.txt", "work\n", "Local work")?;

    assert!(!manager.delete("foo", false, false, &mut NullSink)?);
    assert!(manager.find_by_name("foo")?.is_some());
    Ok(())
}

#[test]
fn test_detached_round_trip() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("exp", None, true, &mut NullSink)?;

    let matching: Vec<_> = manager
        .list()?
        .into_iter()
        .filter(|w| w.name == "exp")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].path, path);
    assert!(matching[0].is_detached());
    assert_eq!(matching[0].reference(), matching[0].commit);

    let err = manager.create("exp", None, true, &mut NullSink).unwrap_err();
    assert!(matches!(err, WtError::AlreadyExists { .. }));

    assert!(manager.delete("exp", false, false, &mut NullSink)?);
    assert!(manager.find_by_name("exp")?.is_none());
    Ok(())
}

#[test]
fn test_current_from_subdirectory() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    let sub = path.join("src").join("deep");
    fs::create_dir_all(&sub)?;

    let current = manager.clone().with_cwd(&sub).current()?;
    assert_eq!(current.map(|w| w.name), Some("foo".to_string()));

    let main = manager.current()?.expect("repo root is a worktree");
    assert_eq!(main.branch.as_deref(), Some("main"));

    let outside = manager.with_cwd(&fx.config_dir).current()?;
    assert!(outside.is_none());
    Ok(())
}

#[test]
fn test_default_worktree_detection_and_override() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    manager.create("foo", None, false, &mut NullSink)?;

    let default = manager.default_worktree()?.expect("default worktree");
    assert_eq!(default.path, fx.repo);

    fx.write_config("default_worktree = \"foo\"\n")?;
    let manager = fx.manager()?;
    let default = manager.default_worktree()?.expect("configured default");
    assert_eq!(default.name, "foo");

    fx.write_config("default_worktree = \"missing\"\n")?;
    assert!(fx.manager()?.default_worktree()?.is_none());
    Ok(())
}

#[test]
fn test_status_counts_changes_and_ahead() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    git(&path, &["push", "-q", "-u", "origin", "feature/foo"])?;
    commit_file(&path, "work.txt", "work\n", "Local work")?;
    fs::write(path.join("scratch.txt"), "wip\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let status = manager.status(&worktree)?;
    assert_eq!(status.uncommitted_count, 1);
    assert!(status.uncommitted_files.contains("scratch.txt"));
    assert!(!status.is_clean());
    assert_eq!(status.upstream.as_deref(), Some("origin/feature/foo"));
    assert_eq!((status.ahead, status.behind), (1, 0));
    Ok(())
}

#[test]
fn test_sync_without_upstream_fails_without_stashing() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    fs::write(path.join("scratch.txt"), "wip\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("no upstream branch"));
    assert!(!result.stashed);
    assert_eq!(manager.git().stash_count(&path)?, 0);
    assert!(path.join("scratch.txt").exists());
    Ok(())
}

#[test]
fn test_sync_detached_is_skipped() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    manager.create("exp", None, true, &mut NullSink)?;

    let worktree = manager.find_by_name("exp")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("detached HEAD, skipping"));
    Ok(())
}

/// Push `feature/foo` from the fixture, then add one commit to it from a
/// second clone so the local branch is behind.
fn advance_upstream(fx: &Fixture, path: &std::path::Path, contents: &str) -> Result<()> {
    git(path, &["push", "-q", "-u", "origin", "feature/foo"])?;
    let other = fx.other_clone()?;
    git(&other, &["fetch", "-q", "origin"])?;
    git(&other, &["checkout", "-q", "-b", "feature/foo", "origin/feature/foo"])?;
    commit_file(&other, "README.md", contents, "Upstream change")?;
    git(&other, &["push", "-q", "origin", "feature/foo"])?;
    Ok(())
}

#[test]
fn test_sync_fast_forward() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    advance_upstream(&fx, &path, "upstream\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(result.success, "sync failed: {:?}", result.error);
    assert!(result.message.contains("✓ Fast-forward: 1 commits"));
    assert_eq!(fs::read_to_string(path.join("README.md"))?, "upstream\n");

    // A second sync has nothing to do.
    let again = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(again.success);
    assert!(again.message.contains("✓ Already up to date"));
    Ok(())
}

#[test]
fn test_sync_restores_stashed_changes() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    advance_upstream(&fx, &path, "upstream\n")?;
    fs::write(path.join("notes.txt"), "local notes\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(result.success, "sync failed: {:?}", result.error);
    assert!(result.stashed);
    assert!(result.message.contains("✓ Stash applied"));
    assert_eq!(fs::read_to_string(path.join("notes.txt"))?, "local notes\n");
    assert_eq!(manager.git().stash_count(&path)?, 0);
    Ok(())
}

#[test]
fn test_sync_stash_conflict_keeps_stash() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    advance_upstream(&fx, &path, "upstream\n")?;
    fs::write(path.join("README.md"), "local\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(!result.success);
    assert!(result.stashed);
    assert_eq!(result.error.as_deref(), Some("stash conflict"));
    assert_eq!(manager.git().stash_count(&path)?, 1);
    Ok(())
}

#[test]
fn test_sync_many_reports_each_worktree() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    advance_upstream(&fx, &path, "upstream\n")?;
    manager.create("bar", None, false, &mut NullSink)?;

    let names = vec!["foo".to_string(), "bar".to_string(), "nope".to_string()];
    let report = manager.sync_many(&names, false, &mut NullSink)?;
    assert!(!report.all_succeeded());
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].name, "foo");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "bar");
    assert_eq!(report.failed[0].error, "no upstream branch");
    Ok(())
}

#[test]
fn test_sync_many_defaults_to_current_worktree() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    advance_upstream(&fx, &path, "upstream\n")?;

    let report = manager.with_cwd(&path).sync_many(&[], false, &mut NullSink)?;
    assert!(report.all_succeeded());
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].name, "foo");
    Ok(())
}

#[test]
fn test_sync_many_unknown_names_is_not_found() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;

    let err = manager
        .sync_many(&["nope".to_string()], false, &mut NullSink)
        .unwrap_err();
    assert!(matches!(err, WtError::NotFound { ref name } if name == "nope"));
    Ok(())
}

#[test]
fn test_clean_dry_run_lists_merged_without_removing() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;

    let first = manager.clean_merged(true, false, &mut NullSink)?;
    let second = manager.clean_merged(true, false, &mut NullSink)?;
    assert_eq!(first, vec!["foo".to_string()]);
    assert_eq!(first, second);
    assert!(path.exists());

    let candidates = manager.clean_candidates()?;
    assert_eq!(
        candidates[0].reason,
        CleanReason::Merged {
            into: "main".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_clean_declined_prompt_removes_nothing() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;

    assert!(manager.clean_merged(false, false, &mut NullSink)?.is_empty());
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_clean_force_removes_merged_and_keeps_unmerged() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let merged = manager.create("foo", None, false, &mut NullSink)?;
    let unmerged = manager.create("bar", None, false, &mut NullSink)?;
    commit_file(&unmerged, "bar.txt", "bar\n", "Unpushed work")?;
    // Local-only branch: no upstream configured at all.
    git(&unmerged, &["branch", "--unset-upstream", "feature/bar"])?;

    let removed = manager.clean_merged(false, true, &mut NullSink)?;
    assert_eq!(removed, vec!["foo".to_string()]);
    assert!(!merged.exists());
    assert!(!manager.git().branch_exists("feature/foo", &fx.repo)?);
    assert!(unmerged.exists());
    assert!(manager.find_by_name("bar")?.is_some());
    Ok(())
}

#[test]
fn test_clean_detects_deleted_remote_branch() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("gone", None, false, &mut NullSink)?;
    commit_file(&path, "gone.txt", "gone\n", "Reviewed work")?;
    git(&path, &["push", "-q", "-u", "origin", "feature/gone"])?;
    // Keep the commits on the remote under another name, then delete the
    // branch the worktree tracks.
    git(&path, &["push", "-q", "origin", "feature/gone:archive/gone"])?;
    git(&path, &["push", "-q", "origin", "--delete", "feature/gone"])?;

    let candidates = manager.clean_candidates()?;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].worktree.name, "gone");
    assert_eq!(
        candidates[0].reason,
        CleanReason::RemoteDeleted {
            upstream: "origin/feature/gone".to_string()
        }
    );
    assert_eq!(candidates[0].reason.to_string(), "remote branch deleted");
    Ok(())
}

#[test]
fn test_clean_detects_squash_merged_branch_after_remote_delete() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("gone", None, false, &mut NullSink)?;
    commit_file(&path, "gone.txt", "gone\n", "Pushed work")?;
    git(&path, &["push", "-q", "-u", "origin", "feature/gone"])?;
    // The pushed commits were squashed into main elsewhere and the remote
    // branch deleted, so no remote ref holds them any more.
    git(&path, &["push", "-q", "origin", "--delete", "feature/gone"])?;

    let names = manager.clean_merged(true, false, &mut NullSink)?;
    assert_eq!(names, vec!["gone".to_string()]);

    let candidates = manager.clean_candidates()?;
    assert_eq!(
        candidates[0].reason,
        CleanReason::RemoteDeleted {
            upstream: "origin/feature/gone".to_string()
        }
    );
    Ok(())
}

/// Add a worktree for the unprefixed branch `branch` directly with git, so
/// its derived name is the branch name itself.
fn add_plain_worktree(fx: &Fixture, branch: &str) -> Result<PathBuf> {
    let path = fx.root().join(format!("aaa-{branch}"));
    git(
        &fx.repo,
        &["worktree", "add", "-q", "-b", branch, &path.to_string_lossy()],
    )?;
    Ok(path)
}

#[test]
fn test_clean_force_removes_candidate_not_same_named_worktree() -> Result<()> {
    let fx = Fixture::new()?;
    let plain = add_plain_worktree(&fx, "foo")?;
    commit_file(&plain, "precious.txt", "precious\n", "Precious work")?;
    fs::write(plain.join("dirty.txt"), "uncommitted\n")?;

    let manager = fx.manager()?;
    let merged = manager.create("foo", None, false, &mut NullSink)?;

    let removed = manager.clean_merged(false, true, &mut NullSink)?;
    assert_eq!(removed, vec!["foo".to_string()]);
    assert!(!merged.exists());
    assert!(!manager.git().branch_exists("feature/foo", &fx.repo)?);

    assert!(plain.join("precious.txt").exists());
    assert!(plain.join("dirty.txt").exists());
    assert!(manager.git().branch_exists("foo", &fx.repo)?);
    Ok(())
}

#[test]
fn test_sync_all_keeps_worktrees_sharing_a_name() -> Result<()> {
    let fx = Fixture::new()?;
    add_plain_worktree(&fx, "foo")?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    git(&path, &["push", "-q", "-u", "origin", "feature/foo"])?;

    let report = manager.sync_all(false, &mut NullSink)?;
    let mut succeeded: Vec<&str> = report.succeeded.iter().map(|s| s.name.as_str()).collect();
    succeeded.sort_unstable();
    assert_eq!(succeeded, vec!["foo", "main"]);

    // The unprefixed `foo` has no upstream and is reported on its own.
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "foo");
    assert_eq!(report.failed[0].error, "no upstream branch");
    Ok(())
}

#[test]
fn test_sync_pull_conflict_reports_reason_and_restores_stash() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    advance_upstream(&fx, &path, "upstream\n")?;
    commit_file(&path, "README.md", "local\n", "Local change")?;
    fs::write(path.join("notes.txt"), "local notes\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, false, &mut NullSink);
    assert!(!result.success);
    let error = result.error.expect("error message");
    assert!(error.starts_with("pull failed: CONFLICT"), "got: {error}");
    assert!(error.contains("README.md"));

    // The merge was aborted and the stash restored on a clean tree.
    let git_dir = manager.git().worktree_git_dir(&path)?;
    assert!(!git_dir.join("MERGE_HEAD").exists());
    assert_eq!(fs::read_to_string(path.join("README.md"))?, "local\n");
    assert!(result.stashed);
    assert!(result.message.contains("✓ Stash applied"));
    assert_eq!(fs::read_to_string(path.join("notes.txt"))?, "local notes\n");
    assert_eq!(manager.git().stash_count(&path)?, 0);
    Ok(())
}

/// Add one commit to `main` on the remote from a second clone and fetch it
/// into the fixture repository.
fn advance_main(fx: &Fixture, contents: &str) -> Result<()> {
    let other = fx.other_clone()?;
    git(&other, &["checkout", "-q", "main"])?;
    git(&other, &["pull", "-q", "origin", "main"])?;
    commit_file(&other, "README.md", contents, "Main change")?;
    git(&other, &["push", "-q", "origin", "main"])?;
    git(&fx.repo, &["fetch", "-q", "origin"])?;
    Ok(())
}

#[test]
fn test_sync_rebase_already_based() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    git(&path, &["push", "-q", "-u", "origin", "feature/foo"])?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, true, &mut NullSink);
    assert!(result.success, "sync failed: {:?}", result.error);
    assert_eq!(
        result.message,
        "✓ Already up to date\n✓ Already based on origin/main"
    );
    Ok(())
}

#[test]
fn test_sync_rebase_onto_advanced_base() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    commit_file(&path, "work.txt", "work\n", "Local work")?;
    git(&path, &["push", "-q", "-u", "origin", "feature/foo"])?;
    advance_main(&fx, "main change\n")?;
    fs::write(path.join("notes.txt"), "local notes\n")?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, true, &mut NullSink);
    assert!(result.success, "sync failed: {:?}", result.error);
    assert!(result.message.contains("✓ Rebased, 1 commits ahead"));
    assert!(result.message.contains("✓ Stash applied"));
    assert!(manager.git().is_ancestor("origin/main", "feature/foo", &fx.repo)?);
    assert_eq!(fs::read_to_string(path.join("README.md"))?, "main change\n");
    assert_eq!(fs::read_to_string(path.join("notes.txt"))?, "local notes\n");
    Ok(())
}

#[test]
fn test_sync_rebase_conflict_aborts_and_restores_stash() -> Result<()> {
    let fx = Fixture::new()?;
    let manager = fx.manager()?;
    let path = manager.create("foo", None, false, &mut NullSink)?;
    commit_file(&path, "README.md", "local\n", "Local change")?;
    git(&path, &["push", "-q", "-u", "origin", "feature/foo"])?;
    advance_main(&fx, "main change\n")?;
    fs::write(path.join("notes.txt"), "local notes\n")?;
    let before = git(&path, &["rev-parse", "HEAD"])?;

    let worktree = manager.find_by_name("foo")?.expect("worktree");
    let result = manager.sync_worktree(&worktree, true, &mut NullSink);
    assert!(!result.success);
    let error = result.error.expect("error message");
    assert!(error.starts_with("rebase failed:"), "got: {error}");

    // No rebase left in progress, branch untouched, changes back in place.
    let git_dir = manager.git().worktree_git_dir(&path)?;
    assert!(!git_dir.join("rebase-merge").exists());
    assert!(!git_dir.join("rebase-apply").exists());
    assert_eq!(git(&path, &["rev-parse", "HEAD"])?, before);
    assert!(result.stashed);
    assert_eq!(fs::read_to_string(path.join("notes.txt"))?, "local notes\n");
    assert_eq!(manager.git().stash_count(&path)?, 0);
    Ok(())
}
