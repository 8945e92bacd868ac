//! Integration tests for swenv

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn swenv() -> Command {
        cargo_bin_cmd!("swenv")
    }

    #[test]
    fn help_displays() {
        swenv()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Swift toolchain developer environments"));
    }

    #[test]
    fn version_displays() {
        swenv()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("swenv"));
    }

    #[test]
    fn bootstrap_help_lists_options() {
        swenv()
            .args(["bootstrap", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--toolchain-version"))
            .stdout(predicate::str::contains("--arch"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        swenv()
            .args(["config", "path", "--config"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();
        swenv()
            .args(["config", "show", "--config"])
            .arg(temp.path().join("missing.toml"))
            .assert()
            .success()
            .stdout(predicate::str::contains("[cmake]"))
            .stdout(predicate::str::contains("bootstrap_version = \"6.1.2\""));
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[cmake]\npatch = \"two\"\n").unwrap();
        swenv()
            .args(["config", "show", "--config"])
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn invalid_shell_rejected() {
        swenv()
            .args(["build", "src", "--shell", "fish"])
            .assert()
            .failure();
    }

    #[cfg(not(windows))]
    #[test]
    fn environment_commands_require_windows() {
        let temp = TempDir::new().unwrap();
        swenv()
            .args(["build", "src", "--config"])
            .arg(temp.path().join("missing.toml"))
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Unsupported platform"));
    }
}
