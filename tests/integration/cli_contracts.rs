use syllabus::error::ApiError;
use syllabus::tooling::cli::{CliContext, Commands, ConfigCommands};
use syllabus::types::NodeKey;
use tempfile::TempDir;

use crate::support::{context, test_config};

fn tree(subject: &str, all: bool, format: &str) -> Commands {
    Commands::Tree {
        subject: subject.to_string(),
        all,
        format: format.to_string(),
    }
}

#[test]
fn subjects_json_contract_has_progress_fields() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let output = cli
        .execute(&Commands::Subjects {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let subjects = parsed["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0]["name"], "Physics");
    assert_eq!(subjects[0]["total"], 3);
    assert_eq!(subjects[0]["checked"], 0);
    assert_eq!(subjects[1]["resources"], 0);
}

#[test]
fn check_topic_then_uncheck_leaf() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);

    let output = cli
        .execute(&Commands::Check {
            key: "1:2".to_string(),
        })
        .unwrap();
    assert_eq!(output, "1:2 Mechanics: checked, collapsed");

    let output = cli
        .execute(&Commands::Check {
            key: "1:2:3".to_string(),
        })
        .unwrap();
    assert_eq!(output, "1:2:3 Kinematics: unchecked");

    let state = cli.session().state();
    assert!(!state.is_checked(&NodeKey::from("1:2:3")));
    assert!(state.is_checked(&NodeKey::from("1:2:4")));
}

#[test]
fn state_survives_new_context() {
    let temp = TempDir::new().unwrap();
    {
        let mut cli = context(&temp);
        cli.execute(&Commands::Check {
            key: "1:5".to_string(),
        })
        .unwrap();
        cli.execute(&Commands::Expand {
            key: "1:5".to_string(),
        })
        .unwrap();
    }

    // Fresh data dir holding only the cookie jar: state must come from the
    // secondary store.
    let mut config = test_config(temp.path());
    let cookies = temp.path().join("data").join("cookies.json");
    let fresh = temp.path().join("fresh");
    std::fs::create_dir_all(&fresh).unwrap();
    std::fs::copy(&cookies, fresh.join("cookies.json")).unwrap();
    config.storage.data_dir = Some(fresh);

    let cli = CliContext::new(config).unwrap();
    let state = cli.session().state();
    assert!(state.is_checked(&NodeKey::from("1:5:6:7")));
    assert!(state.is_open(&NodeKey::from("1:5")));
}

#[test]
fn tree_text_respects_open_nodes() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);

    let collapsed = cli.execute(&tree("Physics", false, "text")).unwrap();
    assert!(collapsed.contains("[ ] Mechanics ▸"));
    assert!(!collapsed.contains("Kinematics"));

    cli.execute(&Commands::Expand {
        key: "1:2".to_string(),
    })
    .unwrap();
    let expanded = cli.execute(&tree("1", false, "text")).unwrap();
    assert!(expanded.contains("[ ] Mechanics ▾"));
    assert!(expanded.contains("  [ ] Kinematics"));

    let all = cli.execute(&tree("1", true, "text")).unwrap();
    assert!(all.contains("Doppler effect"));
}

#[test]
fn tree_json_contract() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let output = cli.execute(&tree("1", true, "json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
    let first = &rows[0];
    assert_eq!(first["key"], "1:2");
    assert_eq!(first["checked"], false);
    assert_eq!(first["has_children"], true);
    assert_eq!(first["children"][1]["key"], "1:2:4");
}

#[test]
fn resources_and_unknown_subject() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let output = cli
        .execute(&Commands::Resources {
            subject: "physics".to_string(),
        })
        .unwrap();
    assert!(output.contains("Lecture notes"));

    let err = cli
        .execute(&Commands::Resources {
            subject: "Biology".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::SubjectNotFound(_)));
}

#[test]
fn expand_leaf_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let err = cli
        .execute(&Commands::Expand {
            key: "8:1".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[test]
fn normalize_emits_canonical_children() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let output = cli.execute(&Commands::Normalize).unwrap();
    assert!(!output.contains("subtopics"));
    assert!(!output.contains("\"items\""));
    let forest: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        forest[0]["topics"][1]["children"][0]["children"][0]["name"],
        "Doppler effect"
    );
}

#[test]
fn countdown_formats() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path());
    config.countdown.target = "2000-01-01T00:00:00".to_string();
    let mut cli = CliContext::new(config).unwrap();

    let segmented = cli
        .execute(&Commands::Countdown {
            days: false,
            watch: false,
            ticks: None,
        })
        .unwrap();
    assert_eq!(segmented, "00 : 00 : 00 : 00 : 00 : 00");

    let days = cli
        .execute(&Commands::Countdown {
            days: true,
            watch: false,
            ticks: None,
        })
        .unwrap();
    assert_eq!(days, "0 days");
}

#[test]
fn config_show_is_toml() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let output = cli
        .execute(&Commands::Config {
            command: ConfigCommands::Show,
        })
        .unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(parsed["storage"]["schema_version"].as_str(), Some("v1"));
    assert_eq!(
        parsed["countdown"]["target"].as_str(),
        Some("2027-02-01T00:00:00")
    );
}

#[test]
fn unknown_format_is_invalid_argument() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    let err = cli
        .execute(&Commands::Subjects {
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[test]
fn locked_primary_store_falls_back_to_cookie_jar() {
    let temp = TempDir::new().unwrap();
    let mut holder = context(&temp);
    holder
        .execute(&Commands::Check {
            key: "1:2".to_string(),
        })
        .unwrap();

    // The first context still holds the sled lock.
    let mut second = CliContext::new(test_config(temp.path())).unwrap();
    assert!(second.session().state().is_checked(&NodeKey::from("1:2:3")));
    let output = second
        .execute(&Commands::Check {
            key: "1:5".to_string(),
        })
        .unwrap();
    assert_eq!(output, "1:5 Waves: checked, collapsed");
}

#[test]
fn unopenable_primary_store_starts_empty() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    let data = temp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("store"), "not a database").unwrap();

    let mut cli = CliContext::new(config).unwrap();
    assert!(cli.session().state().checked_leaves().is_empty());
    let output = cli.execute(&tree("1", false, "text")).unwrap();
    assert!(output.contains("[ ] Mechanics"));
}

#[test]
fn string_ids_are_addressable_by_key() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path());
    let document = temp.path().join("string-ids.json");
    std::fs::write(
        &document,
        r#"[{
            "id": "1",
            "name": "Physics",
            "topics": [{
                "id": "2",
                "name": "Mechanics",
                "subtopics": [{ "id": "3", "name": "Kinematics" }]
            }]
        }]"#,
    )
    .unwrap();
    config.document.path = Some(document);
    let mut cli = CliContext::new(config).unwrap();

    let rows = cli.execute(&tree("Physics", true, "json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&rows).unwrap();
    assert_eq!(rows[0]["children"][0]["key"], "1:2:3");

    let output = cli
        .execute(&Commands::Check {
            key: "1:2:3".to_string(),
        })
        .unwrap();
    assert_eq!(output, "1:2:3 Kinematics: checked");
    assert!(cli.session().state().is_checked(&NodeKey::from("1:2:3")));
}

#[test]
fn countdown_watch_stops_after_ticks() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path());
    config.countdown.target = "2000-01-01T00:00:00".to_string();
    let mut cli = CliContext::new(config).unwrap();
    let output = cli
        .execute(&Commands::Countdown {
            days: true,
            watch: true,
            ticks: Some(1),
        })
        .unwrap();
    assert_eq!(output, "0 days");
}
