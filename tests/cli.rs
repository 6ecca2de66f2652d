//! Integration tests for top-level CLI behavior.
//!
//! Every invocation here fails (or succeeds) before the first network call:
//! argument parsing, file validation, and credential unsealing all happen
//! client-side.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use aes::Aes128;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ccm::aead::generic_array::GenericArray;
use ccm::aead::{Aead, KeyInit};
use ccm::consts::{U13, U8};
use ccm::Ccm;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

fn run_picpush(args: &[&str], envs: &[(&str, &str)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_picpush");
    let mut command = Command::new(bin);
    command
        .args(args)
        .stdin(Stdio::null())
        .env_remove("PICPUSH_PASSPHRASE")
        .env_remove("PICPUSH_CREDENTIAL");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("failed to run picpush binary")
}

fn write_temp_file(dir_name: &str, file_name: &str, bytes: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(dir_name);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Seals a token the same way the embedded descriptor was produced.
fn sealed_descriptor(passphrase: &str, token: &str) -> String {
    let iv = [0x42u8; 16];
    let salt = b"cli-test";
    let iter = 1_000;

    let mut key = [0u8; 16];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iter, &mut key);
    let ct = Ccm::<Aes128, U8, U13>::new(GenericArray::from_slice(&key))
        .encrypt(GenericArray::from_slice(&iv[..13]), token.as_bytes())
        .unwrap();

    format!(
        r#"{{"iv":"{}","v":1,"iter":{iter},"ks":128,"ts":64,"mode":"ccm","adata":"","cipher":"aes","salt":"{}","ct":"{}"}}"#,
        BASE64.encode(iv),
        BASE64.encode(salt),
        BASE64.encode(ct)
    )
}

#[test]
fn help_lists_subcommands() {
    let output = run_picpush(&["--help"], &[]);
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(combined.contains("push"));
    assert!(combined.contains("unlock"));
}

#[test]
fn push_help_shows_overrides() {
    let output = run_picpush(&["push", "--help"], &[]);
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(combined.contains("--path"));
    assert!(combined.contains("--message"));
    assert!(combined.contains("--branch"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_picpush(&["nonsense"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn push_without_image_argument_shows_usage() {
    let output = run_picpush(&["push"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("IMAGE"));
}

#[test]
fn push_with_missing_file_fails() {
    let output = run_picpush(&["push", "/definitely/missing/picture.jpg"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Failed to read image"));
}

#[test]
fn push_rejects_oversized_image_before_prompting() {
    let path = write_temp_file("picpush_cli_oversized", "big.jpg", &vec![0u8; 1_048_577]);

    let output = run_picpush(&["push", path.to_str().unwrap()], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("upload ceiling"));
    assert!(!stderr.contains("Passphrase"));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn push_rejects_wrong_passphrase_before_any_upload() {
    let path = write_temp_file("picpush_cli_passphrase", "small.jpg", b"jpeg-bytes");

    let output = run_picpush(
        &["push", path.to_str().unwrap()],
        &[("PICPUSH_PASSPHRASE", "definitely wrong")],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Passphrase rejected"));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn unlock_rejects_wrong_passphrase() {
    let output = run_picpush(&["unlock"], &[("PICPUSH_PASSPHRASE", "definitely wrong")]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Passphrase rejected"));
}

#[test]
fn unlock_accepts_correct_passphrase_for_injected_credential() {
    let descriptor = sealed_descriptor("open sesame", "ghp_cli_token");
    let output = run_picpush(
        &["unlock"],
        &[
            ("PICPUSH_CREDENTIAL", descriptor.as_str()),
            ("PICPUSH_PASSPHRASE", "open sesame"),
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Credential unlocked"));
}

#[test]
fn malformed_injected_credential_is_reported() {
    let output = run_picpush(
        &["unlock"],
        &[("PICPUSH_CREDENTIAL", "not json"), ("PICPUSH_PASSPHRASE", "x")],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Failed to load sealed credential"));
}
