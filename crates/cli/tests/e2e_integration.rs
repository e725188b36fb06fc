//! End-to-end tests for the `parlor` binary.
//!
//! These run the compiled CLI against a temporary config file and check the
//! JSON it prints, covering config loading, preview and transcript assembly.

use std::path::Path;
use std::process::{Command, Output};

// ── Helpers ──────────────────────────────────────────────────────────────

const CONFIG: &str = r#"
[prompt]
condense_prompt_entries = false

[[prompt.entries]]
id = "main"
name = "Main Prompt"
content = "You are Aria, a ship's navigator."
isSystemPrompt = true

[[prompt.entries]]
id = "note"
role = "user"
content = "[Keep it short.]"
injectionPosition = "inChat"
injectionDepth = 1

[[prompt.entries]]
id = "finale"
content = "Start wrapping up the story."
injectionPosition = "conditional"
conditionalMinMessages = 40

[preview]
turn_pairs = 2
"#;

fn parlor(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_parlor"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("PARLOR_CONDENSE_PROMPT_ENTRIES")
        .env_remove("PARLOR_PREVIEW_TURNS")
        .env_remove("PARLOR_CONFIG")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run parlor binary")
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn message_ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────

#[test]
fn preview_json_shows_structure() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let value = stdout_json(&parlor(&config, &["preview", "--json"]));
    assert_eq!(
        message_ids(&value["messages"]),
        vec![
            "main",
            "mock_user_1",
            "mock_assistant_1",
            "mock_user_2",
            "note",
            "mock_assistant_2"
        ]
    );
    assert_eq!(value["report"]["turnCount"], 4);
    assert_eq!(value["report"]["skipped"][0]["entryId"], "finale");
    assert_eq!(value["report"]["skipped"][0]["reason"], "trigger_not_met");
}

#[test]
fn preview_condense_flag_merges_entries() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let value = stdout_json(&parlor(&config, &["preview", "--json", "--condense", "--pairs", "1"]));
    let messages = value["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["id"], "entry_condensed_system");
    assert_eq!(
        messages[0]["content"],
        "You are Aria, a ship's navigator.\n\n[Keep it short.]\n\nStart wrapping up the story."
    );
}

#[test]
fn assemble_real_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    let transcript = dir.path().join("chat.json");
    std::fs::write(
        &transcript,
        r#"[
            {"id": "t1", "role": "user", "content": "Where are we?"},
            {"id": "t2", "role": "assistant", "content": "Two days from port.", "name": "Aria"},
            {"id": "t3", "role": "user", "content": "Any storms?"}
        ]"#,
    )
    .unwrap();

    let value = stdout_json(&parlor(&config, &["assemble", transcript.to_str().unwrap()]));
    assert_eq!(message_ids(&value), vec!["main", "t1", "t2", "note", "t3"]);
    assert_eq!(value[2]["name"], "Aria");
    assert_eq!(value[3]["isInjected"], true);
    assert_eq!(value[3]["injectionInfo"], "in-chat (depth 1)");
}

#[test]
fn assemble_chat_payload_has_no_provenance() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    let transcript = dir.path().join("chat.json");
    std::fs::write(&transcript, r#"[{"id": "t1", "role": "user", "content": "Hi"}]"#).unwrap();

    let value = stdout_json(&parlor(
        &config,
        &["assemble", transcript.to_str().unwrap(), "--chat"],
    ));
    let messages = value.as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1], serde_json::json!({"role": "user", "content": "[Keep it short.]"}));
    assert!(messages.iter().all(|m| m.get("isInjected").is_none()));
}

#[test]
fn invalid_transcript_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    let transcript = dir.path().join("chat.json");
    std::fs::write(&transcript, r#"{"not": "an array"}"#).unwrap();

    let output = parlor(&config, &["assemble", transcript.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Transcript"));
}

#[test]
fn validate_rejects_duplicate_ids() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[[prompt.entries]]\nid = \"a\"\ncontent = \"A\"\n\n[[prompt.entries]]\nid = \"a\"\ncontent = \"B\"\n",
    );

    let output = parlor(&config, &["config", "validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("duplicate prompt entry id"));
}

#[test]
fn init_then_show_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fresh").join("config.toml");

    assert!(parlor(&config, &["init"]).status.success());
    assert!(config.exists());

    let output = parlor(&config, &["config", "show"]);
    assert!(output.status.success());
    let shown = String::from_utf8_lossy(&output.stdout);
    assert!(shown.contains("main_prompt"));
    assert!(shown.contains("turn_pairs = 3"));
}

#[test]
fn oversized_pairs_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    for command in ["preview", "entries"] {
        let output = parlor(&config, &[command, "--pairs", "1000000000"]);
        assert!(!output.status.success(), "{command} accepted an oversized --pairs");
        assert!(String::from_utf8_lossy(&output.stderr).contains("must be at most 500"));
    }
}

#[test]
fn negative_depth_entry_still_previews() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[[prompt.entries]]\nid = \"note\"\ncontent = \"N\"\ninjectionPosition = \"inChat\"\ninjectionDepth = -1\n",
    );

    let value = stdout_json(&parlor(&config, &["preview", "--json", "--pairs", "1"]));
    assert_eq!(
        message_ids(&value["messages"]),
        vec!["mock_user_1", "mock_assistant_1", "note"]
    );
}

#[test]
fn show_keeps_unrecognized_position() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[[prompt.entries]]\nid = \"odd\"\ncontent = \"x\"\ninjectionPosition = \"afterCharacter\"\n",
    );

    let output = parlor(&config, &["config", "show"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(r#"injectionPosition = "afterCharacter""#));
}
