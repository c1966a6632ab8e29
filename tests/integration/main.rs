//! Integration tests for Larder

mod cli_tests {
    use assert_cmd::Command;
    use larder::config::{CONFIG_PROG, CONFIG_SITE};
    use larder::feeds::escape;
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// A larder command with its cache and config roots redirected into
    /// temp directories, so tests never see the real user state.
    fn larder(cache_root: &TempDir, config_root: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("larder").unwrap();
        cmd.env("XDG_CACHE_HOME", cache_root.path());
        cmd.env("XDG_CONFIG_HOME", config_root.path());
        cmd
    }

    fn roots() -> (TempDir, TempDir) {
        (TempDir::new().unwrap(), TempDir::new().unwrap())
    }

    #[test]
    fn help_displays() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("dependency resolver"));
    }

    #[test]
    fn version_displays() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("larder"));
    }

    #[test]
    fn config_path() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn feeds_empty() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .arg("feeds")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached feeds"));
    }

    #[test]
    fn feeds_lists_cached_entries() {
        let (cache, config) = roots();
        let uri = "https://example.com/tool.xml";
        let dir = cache
            .path()
            .join(CONFIG_SITE)
            .join(CONFIG_PROG)
            .join("interfaces");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(escape(uri)), "<feed/>").unwrap();

        larder(&cache, &config)
            .arg("feeds")
            .assert()
            .success()
            .stdout(predicate::str::contains(uri));
    }

    #[test]
    fn feeds_json_output() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args(["feeds", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn local_feed_is_fresh() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args(["stale", "/var/feeds/tool.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("fresh"));
    }

    #[test]
    fn distribution_feed_is_fresh() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args(["stale", "distribution:https://example.com/tool.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("fresh"));
    }

    #[test]
    fn uncached_remote_feed_is_stale() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args(["stale", "https://example.com/uncached.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("stale"));
    }

    #[test]
    fn installed_quick_test_missing_file() {
        let (cache, config) = roots();
        larder(&cache, &config)
            .args([
                "installed",
                "package:deb:foo:1.0:amd64",
                "--quick-test-file",
                cache.path().join("absent").to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("not installed"));
    }

    #[test]
    fn installed_quick_test_present_file() {
        let (cache, config) = roots();
        let proof = cache.path().join("proof");
        std::fs::write(&proof, "x").unwrap();

        larder(&cache, &config)
            .args([
                "installed",
                "package:deb:foo:1.0:amd64",
                "--quick-test-file",
                proof.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("installed"));
    }

    #[test]
    fn bad_config_file_reports_error() {
        let (cache, config) = roots();
        let path = config.path().join("broken.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        larder(&cache, &config)
            .args(["feeds", "--config", path.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
