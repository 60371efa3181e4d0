//! Binary exit codes

use assert_cmd::Command;
use tempfile::TempDir;

fn logged_text(output: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_missing_api_key_fails_before_any_request() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.xlsx");

    let result = Command::cargo_bin("channel-harvester")
        .unwrap()
        .env_remove("YOUTUBE_API_KEY")
        .env_remove("RUST_LOG")
        .env_remove("LOG_FORMAT")
        .args([
            "@GoogleDevelopers",
            "--output",
            output.to_str().unwrap(),
            "--api-base-url",
            "http://127.0.0.1:9/youtube/v3",
        ])
        .timeout(std::time::Duration::from_secs(5))
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    let logs = logged_text(&result);
    assert!(logs.contains("no API key provided"), "unexpected output: {logs}");
    assert!(!logs.contains("Harvesting channel"));
    assert!(!output.exists());
}

#[test]
fn test_blank_api_key_is_rejected() {
    let result = Command::cargo_bin("channel-harvester")
        .unwrap()
        .env("YOUTUBE_API_KEY", "   ")
        .env_remove("RUST_LOG")
        .env_remove("LOG_FORMAT")
        .args(["@GoogleDevelopers"])
        .timeout(std::time::Duration::from_secs(5))
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(logged_text(&result).contains("no API key provided"));
}

#[test]
fn test_zero_rate_is_a_usage_error() {
    Command::cargo_bin("channel-harvester")
        .unwrap()
        .args(["@GoogleDevelopers", "--requests-per-minute", "0"])
        .assert()
        .failure();
}

#[test]
fn test_help_lists_options() {
    let output = Command::cargo_bin("channel-harvester")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("--max-comments"));
    assert!(text.contains("--api-key"));
}
