//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wordquiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("wordquiz").unwrap();
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("WORDQUIZ_OPENAI_KEY")
        .env("RUST_LOG", "off");
    cmd
}

/// Write a config that only knows the offline mock provider.
fn offline_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("wordquiz.toml");
    std::fs::write(
        &path,
        r#"
default_provider = "offline"
default_model = "mock-model"

[providers.offline]
type = "mock"
"#,
    )
    .unwrap();
    path
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    wordquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created wordquiz.toml"));

    assert!(dir.path().join("wordquiz.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    wordquiz().current_dir(dir.path()).arg("init").assert().success();

    wordquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn check_valid_payload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.json");
    std::fs::write(
        &path,
        r#"```json
[{"word": "candid", "meaning": "率直な", "explanation": "", "options": ["率直な", "慎重な", "曖昧な", "冷淡な"]}]
```"#,
    )
    .unwrap();

    wordquiz()
        .arg("check")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 words OK"));
}

#[test]
fn check_rejects_missing_meaning_option() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.json");
    std::fs::write(
        &path,
        r#"[{"word": "candid", "meaning": "率直な", "explanation": "", "options": ["a", "b", "c", "d"]}]"#,
    )
    .unwrap();

    wordquiz()
        .arg("check")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("invalid word list"));
}

#[test]
fn check_nonexistent_file() {
    wordquiz()
        .arg("check")
        .arg("--file")
        .arg("no_such_file.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn words_with_offline_provider() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path());

    wordquiz()
        .arg("words")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("ubiquitous"))
        .stdout(predicate::str::contains("dichotomy"));
}

#[test]
fn unknown_provider_fails() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path());

    wordquiz()
        .arg("words")
        .arg("--config")
        .arg(&config)
        .arg("--provider")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider 'nope' is not configured"));
}

#[test]
fn quiz_test_mode_from_stdin() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path());

    wordquiz()
        .arg("quiz")
        .arg("--config")
        .arg(&config)
        .args(["--name", "Aki", "--level", "中級", "--goal", "TOEIC 800"])
        .args(["--mode", "test"])
        .write_stdin("1\n2\n3\n4\n1\n1\n2\n3\n4\n1\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q10: dichotomy"))
        .stdout(predicate::str::contains("結果: 10問中 10問正解 (100.00%)"))
        .stdout(predicate::str::contains("記録が完了しました！"));
}

#[test]
fn quiz_rejects_unknown_mode() {
    wordquiz()
        .arg("quiz")
        .args(["--mode", "exam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exam"));
}

#[test]
fn list_models_offline() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path());

    wordquiz()
        .arg("list-models")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: offline"))
        .stdout(predicate::str::contains("mock-model"));
}

#[test]
fn help_output() {
    wordquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LLM-backed English vocabulary quiz"));
}

#[test]
fn version_output() {
    wordquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordquiz"));
}
