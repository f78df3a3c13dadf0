use assert_cmd::prelude::*;
use std::process::Command;

fn boxworld() -> Command {
    Command::cargo_bin("boxworld").unwrap()
}

#[test]
fn solve_one_push() {
    let output = r"Solving levels/custom/00-one-push.txt...
R
Moves: 1
Pushes: 1
Score: 50500

States created total: 2
Unique visited total: 2
Reached duplicates total: 0
Created but not reached total: 0

#####
#@$.#
#####

#####
# @*#
#####

";

    boxworld()
        .arg("solve")
        .arg("levels/custom/00-one-push.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn solve_scores_by_index() {
    let output = boxworld()
        .args(&["solve", "--index", "1", "levels/custom/00-one-push.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Score: 15500\n"));
}

#[test]
fn solve_with_steps() {
    let output = boxworld()
        .args(&["solve", "--steps", "levels/custom/01-one-box.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let moves_line = stdout.lines().nth(1).unwrap();
    let move_cnt = stdout
        .lines()
        .find(|line| line.starts_with("Moves: "))
        .map(|line| line["Moves: ".len()..].parse::<usize>().unwrap())
        .unwrap();
    assert_eq!(moves_line.len(), move_cnt);
    // initial state and one per move, each followed by an empty line
    assert_eq!(stdout.matches("######\n\n").count(), move_cnt + 1);
}

#[test]
fn solve_unsolvable() {
    let output = boxworld()
        .args(&["solve", "levels/custom/02-dead-corner.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Solving levels/custom/02-dead-corner.txt...\nNo solution\n"));
}

#[test]
fn solve_missing_file() {
    let output = boxworld()
        .args(&["solve", "levels/custom/nope.txt"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Can't load level levels/custom/nope.txt"));
}

#[test]
fn generate() {
    let output = boxworld()
        .args(&["generate", "1", "--seed", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(
        "Level 1: Generated Sector 1\n\
         Difficulty: Beginner\n\
         Procedurally generated challenge (S30 B3)\n\n"
    ));
    // 7x7 room
    assert_eq!(stdout.lines().count(), 4 + 7);

    let again = boxworld()
        .args(&["generate", "1", "--seed", "3"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(again.stdout).unwrap(), stdout);
}

#[test]
fn generate_zero() {
    boxworld()
        .args(&["generate", "0"])
        .assert()
        .failure()
        .stdout("Level index must be at least 1\n");
}

#[test]
fn verify_files() {
    let output = boxworld()
        .args(&[
            "verify",
            "levels/custom/00-one-push.txt",
            "levels/custom/01-one-box.txt",
            "levels/custom/03-two-boxes.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("solvable"));
    assert!(!stdout.contains("unsolvable"));
    assert!(stdout.ends_with("All levels OK\n"));
}

#[test]
fn verify_fails_on_unsolvable() {
    let output = boxworld()
        .args(&[
            "verify",
            "levels/custom/00-one-push.txt",
            "levels/custom/02-dead-corner.txt",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("unsolvable"));
    assert!(stdout.ends_with("1 unsolvable\n"));
}

#[test]
fn verify_generated() {
    boxworld()
        .args(&["verify", "--generated", "1..5", "--seed", "11", "--cap", "2000"])
        .assert()
        .success();
}

#[test]
fn bad_args() {
    // clap's message goes to stderr
    boxworld().arg("solve").assert().failure().stdout("");
    boxworld()
        .args(&["verify", "--generated", "5..1"])
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn numbers_out_of_range() {
    // 2^32 + 1 would wrap to 1 if truncated
    boxworld()
        .args(&["generate", "4294967297"])
        .assert()
        .failure()
        .stdout("");
    boxworld()
        .args(&["solve", "--index", "4294967297", "levels/custom/00-one-push.txt"])
        .assert()
        .failure()
        .stdout("");
}
