#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use kodegen_release_notes::changelog::ReleaseCategory;
    use kodegen_release_notes::state::{PullRequest, ResolutionState, StateManager};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn cli() -> Command {
        let mut cmd = Command::cargo_bin("kodegen_release_notes").expect("binary should build");
        cmd.env_remove("GH_TOKEN")
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    fn write_checkpoint(path: &Path) {
        let mut state = ResolutionState::new(vec!["deadbeef".to_string()]);
        state.pull_requests.insert(
            10,
            PullRequest {
                release_note: "fix X".to_string(),
                release_label: ReleaseCategory::Bug,
                author_name: "alice".to_string(),
                labels: vec!["release-note/bug".to_string()],
                backport_branches: Vec::new(),
            },
        );
        StateManager::new(path)
            .save_state(&mut state)
            .expect("checkpoint should be written");
    }

    #[test]
    fn test_invalid_repo_fails_before_any_network_call() {
        cli()
            .args([
                "generate",
                "--repo",
                "not-a-repo",
                "--base",
                "v1.0.0",
                "--head",
                "v1.0.1",
                "--github-token",
                "secret",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid repo name 'not-a-repo'"));
    }

    #[test]
    fn test_invalid_last_stable_fails() {
        cli()
            .args([
                "generate",
                "--repo",
                "cilium/cilium",
                "--base",
                "v1.0.0",
                "--head",
                "v1.0.1",
                "--last-stable",
                "v1.5",
                "--github-token",
                "secret",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("should be of the format 'x.y'"));
    }

    #[test]
    fn test_missing_token_fails() {
        cli()
            .args([
                "generate",
                "--repo",
                "cilium/cilium",
                "--base",
                "v1.0.0",
                "--head",
                "v1.0.1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("GitHub token not provided"));
    }

    #[test]
    fn test_blank_last_stable_passes_validation() {
        cli()
            .args([
                "generate",
                "--repo",
                "cilium/cilium",
                "--base",
                "v1.0.0",
                "--head",
                "v1.0.1",
                "--last-stable",
                "",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("GitHub token not provided"))
            .stderr(predicate::str::contains("last stable").not());
    }

    #[test]
    fn test_missing_range_is_a_usage_error() {
        cli()
            .args(["generate", "--repo", "cilium/cilium"])
            .assert()
            .failure();
    }

    #[test]
    fn test_status_without_checkpoint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("release-state.json");

        cli()
            .arg("status")
            .arg("--state-file")
            .arg(&path)
            .assert()
            .success()
            .stderr(predicate::str::contains("No checkpoint found"));
    }

    #[test]
    fn test_status_summarises_checkpoint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("release-state.json");
        write_checkpoint(&path);

        cli()
            .arg("status")
            .arg("--detailed")
            .arg("--state-file")
            .arg(&path)
            .assert()
            .success()
            .stderr(predicate::str::contains("1 PR(s)"))
            .stderr(predicate::str::contains("1 commit(s) left to resolve"))
            .stderr(predicate::str::contains("deadbeef"));
    }

    #[test]
    fn test_status_json_prints_checkpoint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("release-state.json");
        write_checkpoint(&path);

        cli()
            .arg("status")
            .arg("--json")
            .arg("--state-file")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"format_version\": 1"))
            .stdout(predicate::str::contains("\"release_label\": \"release-note/bug\""));
    }

    #[test]
    fn test_status_rejects_corrupted_checkpoint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("release-state.json");
        std::fs::write(&path, "not json").expect("write");

        cli()
            .arg("status")
            .arg("--state-file")
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("State file corrupted"));
    }

    #[test]
    fn test_cleanup_removes_checkpoint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("release-state.json");
        write_checkpoint(&path);

        cli()
            .arg("cleanup")
            .arg("--yes")
            .arg("--state-file")
            .arg(&path)
            .assert()
            .success();
        assert!(!path.exists());
    }

    #[test]
    fn test_cleanup_can_be_declined() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("release-state.json");
        write_checkpoint(&path);

        cli()
            .arg("cleanup")
            .arg("--state-file")
            .arg(&path)
            .write_stdin("n\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("Cleanup cancelled"));
        assert!(path.exists());
    }
}
