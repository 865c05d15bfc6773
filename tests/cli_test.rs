//! バイナリ起動テスト
//!
//! - APIキー未設定時は、入力に触れず出力も作らずに終了すること
//! - 候補モデルの失敗はコンソールに1回だけ表示されること

mod common;

use common::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_missing_api_key_aborts_without_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.xlsx");
    let reference = dir.path().join("reference.xlsx");
    let output = dir.path().join("output.xlsx");
    write_fixture(&input_table(), &input);
    write_fixture(&reference_table(), &reference);

    let result = Command::new(env!("CARGO_BIN_EXE_boq-match"))
        .current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        // 設定ファイルも見つからないホーム
        .env("HOME", dir.path())
        .args(["match", "--input"])
        .arg(&input)
        .arg("--reference")
        .arg(&reference)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run binary");

    assert!(!result.status.success());
    assert!(!output.exists(), "出力ファイルが作成されている");

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("MissingApiKey"), "stderr: {}", stderr);
}

#[test]
fn test_help() {
    let result = Command::new(env!("CARGO_BIN_EXE_boq-match"))
        .arg("--help")
        .output()
        .expect("failed to run binary");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("match"));
    assert!(stdout.contains("config"));
}

/// 接続できないエンドポイントを指す設定をホーム配下に書く
fn write_unreachable_config(home: &std::path::Path) {
    // 一度bindして閉じたポートは接続拒否になる
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        listener.local_addr().expect("no local addr").port()
    };

    let config_dir = home.join(".config").join("boq-matcher");
    std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    let config = serde_json::json!({
        "base_url": format!("http://127.0.0.1:{}", port),
        "models": ["a"],
        "timeout_seconds": 5,
    });
    std::fs::write(config_dir.join("config.json"), config.to_string())
        .expect("Failed to write config");
}

#[test]
fn test_failed_candidate_reported_once() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.xlsx");
    let reference = dir.path().join("reference.xlsx");
    let output = dir.path().join("output.xlsx");
    write_fixture(&input_table(), &input);
    write_fixture(&reference_table(), &reference);
    write_unreachable_config(dir.path());

    let result = Command::new(env!("CARGO_BIN_EXE_boq-match"))
        .current_dir(dir.path())
        .env("OPENAI_API_KEY", "test-key")
        .env("HOME", dir.path())
        .args(["match", "--input"])
        .arg(&input)
        .arg("--reference")
        .arg(&reference)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);

    // 全候補失敗でも未一致版を書いて正常終了する
    assert!(result.status.success(), "stderr: {}", stderr);
    assert!(output.exists());

    let attempt_failures = stdout
        .lines()
        .chain(stderr.lines())
        .filter(|l| l.contains("Failed with a") || l.contains("model a failed"))
        .count();
    assert_eq!(attempt_failures, 1, "stdout: {}\nstderr: {}", stdout, stderr);

    // 失敗の詳細は --verbose 時のみ
    assert!(
        !stderr.to_lowercase().contains("failed"),
        "stderr: {}",
        stderr
    );
    assert_eq!(stdout.matches("All models failed").count(), 1, "stdout: {}", stdout);
}

#[test]
fn test_verbose_shows_full_error_without_ansi() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.xlsx");
    let reference = dir.path().join("reference.xlsx");
    let output = dir.path().join("output.xlsx");
    write_fixture(&input_table(), &input);
    write_fixture(&reference_table(), &reference);
    write_unreachable_config(dir.path());

    let result = Command::new(env!("CARGO_BIN_EXE_boq-match"))
        .current_dir(dir.path())
        .env("OPENAI_API_KEY", "test-key")
        .env("HOME", dir.path())
        .args(["--verbose", "match", "--input"])
        .arg(&input)
        .arg("--reference")
        .arg(&reference)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run binary");

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(result.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("model a failed"), "stderr: {}", stderr);
    // パイプ出力には色付けしない
    assert!(!stderr.contains('\u{1b}'), "stderr: {:?}", stderr);
}
