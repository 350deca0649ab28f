use predicates::prelude::predicate;

use crate::util::TestEnv;

#[test]
fn help_lists_commands() {
    let env = TestEnv::new();
    env.new_cmd("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version() {
    let env = TestEnv::new();
    env.new_cmd("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "account-switch {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn completion() {
    let env = TestEnv::new();
    env.new_cmd("completion")
        .args(["--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("account-switch"));
    env.new_cmd("completion")
        .args(["--shell", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c account-switch"));
}

#[test]
fn completion_help_shows_setup() {
    let env = TestEnv::new();
    env.new_cmd("completion")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("completions/account-switch.fish"));
}

#[test]
fn invalid_names_are_rejected_before_touching_files() {
    let env = TestEnv::new();
    let too_long = "a".repeat(65);
    for name in ["bad/name", "dots.not.allowed", "spa ce", too_long.as_str()] {
        env.new_cmd("add").arg(name).assert().failure();
        env.new_cmd("login").arg(name).assert().failure();
        env.new_cmd("delete").arg(name).assert().failure();
    }
    assert!(!env.config_dir().exists());
}

#[test]
fn unknown_filter_directive_fails() {
    let env = TestEnv::new();
    env.new_cmd("status")
        .args(["--filter-logs", "account_switch=loudest"])
        .assert()
        .failure();
}
