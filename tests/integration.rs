//! Integration tests for the rolo command line

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Temp dir holding a config file for one test
struct TestEnv {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    fn new(config: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, config).unwrap();
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn empty() -> Self {
        Self::new("log_level = \"warn\"\n")
    }

    fn cmd(&self) -> AssertCommand {
        let mut cmd = rolo_cmd();
        cmd.args(["--config", self.config_path.to_str().unwrap()]);
        cmd
    }

    fn add(&self, name: &str, phone: &str, email: &str, address: &str, tags: &str) -> AssertCommand {
        let mut cmd = self.cmd();
        cmd.args([
            "add", "--name", name, "--phone", phone, "--email", email, "--address", address,
            "--tags", tags,
        ]);
        cmd
    }
}

fn rolo_cmd() -> AssertCommand {
    AssertCommand::cargo_bin("rolo").unwrap()
}

const SEEDED: &str = r#"
log_level = "warn"

[[contacts]]
name = "John Doe"
phone = "98765432"
email = "john@example.com"
address = "123 Clementi Rd"
tags = "friend"

[[contacts]]
name = "Jane Roe"
phone = "91234567"
email = "jane@example.com"
address = "9 Kent Ridge"
"#;

// =============================================================================
// add
// =============================================================================

#[test]
fn test_add_success() {
    let env = TestEnv::empty();
    env.add(
        "John Doe",
        "98765432",
        "john@example.com",
        "123 Clementi Rd",
        "friend,colleague",
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("AddressBook Add Command"))
    .stdout(predicate::str::contains("Add Successful"))
    .stdout(predicate::str::contains("Person added successfully"));
}

#[test]
fn test_add_duplicate_tags_fails() {
    let env = TestEnv::empty();
    env.add(
        "John Doe",
        "98765432",
        "john@example.com",
        "123 Clementi Rd",
        "friend,Friend",
    )
    .assert()
    .failure()
    .stdout(predicate::str::contains("Error"))
    .stdout(predicate::str::contains(
        "Duplicate Tags found. Remove Duplicate Tags and try again.",
    ));
}

#[test]
fn test_add_existing_person_fails() {
    let env = TestEnv::new(SEEDED);
    env.add(
        "John Doe",
        "98765432",
        "john@example.com",
        "123 Clementi Rd",
        "",
    )
    .assert()
    .failure()
    .stdout(predicate::str::contains("Add Unsuccessful"))
    .stdout(predicate::str::contains(
        "This person already exists in the address book",
    ));
}

#[test]
fn test_add_invalid_fields_lists_every_failure() {
    let env = TestEnv::empty();
    env.add("", "12", "john@example.com", "123 Clementi Rd", "")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid Fields"))
        .stdout(predicate::str::contains("Please correct invalid fields"))
        .stdout(predicate::str::contains("Person names should only contain"))
        .stdout(predicate::str::contains("Phone numbers can only contain numbers"));
}

#[test]
fn test_add_bad_tag_list() {
    let env = TestEnv::empty();
    env.add(
        "John Doe",
        "98765432",
        "john@example.com",
        "123 Clementi Rd",
        "best friend",
    )
    .assert()
    .failure()
    .stdout(predicate::str::contains(
        "Tags should be alphanumeric and separated by commas",
    ));
}

// =============================================================================
// list
// =============================================================================

#[test]
fn test_list_empty() {
    let env = TestEnv::empty();
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts"));
}

#[test]
fn test_list_seeded_contacts() {
    let env = TestEnv::new(SEEDED);
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "John Doe Phone: 98765432 Email: john@example.com Address: 123 Clementi Rd Tags: [friend]",
        ))
        .stdout(predicate::str::contains("Jane Roe"));
}

#[test]
fn test_invalid_seed_is_skipped() {
    let env = TestEnv::new(
        r#"
log_level = "warn"

[[contacts]]
name = "Bad^Name"
phone = "98765432"
email = "bad@example.com"
address = "Somewhere"
"#,
    );
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts"))
        .stderr(predicate::str::contains("skipping configured contact"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    rolo_cmd()
        .args(["--config", missing.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_malformed_config_fails() {
    let env = TestEnv::new("log_level = \"loud\"\n");
    env.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log_level"));
}

#[test]
fn test_unknown_key_warns() {
    let env = TestEnv::new("log_level = \"warn\"\nmystery = 1\n");
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown configuration key `mystery`"));
}
