use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn spades() -> Command {
    let mut cmd = Command::cargo_bin("spades").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn spectated_game_runs_to_a_result() {
    spades()
        .args(["--spectate", "--seed", "7", "--target", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Cutthroat Spades ==="))
        .stdout(predicate::str::contains("Bidding phase:"))
        .stdout(predicate::str::contains("Trick 13"))
        .stdout(predicate::str::contains("Scoreboard:"))
        .stdout(predicate::str::contains("Winner:").or(predicate::str::contains("Tie between")));
}

#[test]
fn same_seed_replays_the_same_game() {
    let run = || {
        spades()
            .args(["--spectate", "--seed", "31", "--target", "80"])
            .output()
            .expect("run spades")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn out_of_range_seat_is_rejected() {
    spades()
        .arg("4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("human_seat"));
}

#[test]
fn non_positive_target_is_rejected() {
    spades()
        .args(["--spectate", "--target", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target score must be positive"));
}

#[test]
fn validate_only_skips_the_game() {
    spades()
        .args(["2", "--nil", "--validate-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("nil on"))
        .stdout(predicate::str::contains("human seat South"))
        .stdout(predicate::str::contains("Bidding phase:").not());
}

#[test]
fn yaml_config_supplies_names_and_rules() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("table.yaml");
    fs::write(
        &path,
        r#"
rules:
  target_score: 50
spectate: true
seed: 3
names: ["Ada", "Brook", "Cato", "Dell"]
"#,
    )
    .expect("write config");

    spades()
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("First to 50 points wins."))
        .stdout(predicate::str::contains("- Brook bids"));
}

#[test]
fn malformed_yaml_reports_the_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "rules: [not, a, map]\n").expect("write config");

    spades()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn closed_stdin_aborts_the_game() {
    spades()
        .args(["0", "--seed", "1"])
        .write_stdin("")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Enter your bid (1-13): "))
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn human_seat_plays_through_piped_input() {
    // Cycle through every hand index so each prompt eventually gets a legal card.
    let mut input = String::new();
    for _ in 0..400 {
        for index in 0..13 {
            input.push_str(&format!("{index}\n"));
        }
    }

    spades()
        .args(["1", "--seed", "5", "--target", "10"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter your bid (1-13): "))
        .stdout(predicate::str::contains("Choose card index to play: "))
        .stdout(predicate::str::contains("- You bids"));
}

#[test]
fn log_file_receives_json_events() {
    let dir = tempdir().expect("temp dir");
    let log = dir.path().join("spades.jsonl");

    spades()
        .args(["--spectate", "--seed", "2", "--target", "40", "--log-level", "info"])
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).expect("log written");
    assert!(contents.contains("spades_bot::bid"));
    assert!(contents.lines().all(|line| line.starts_with('{')));
}
