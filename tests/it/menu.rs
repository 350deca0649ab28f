use predicates::prelude::predicate;

use crate::util::{AssertExt, TestEnv};

#[test]
fn exits_on_seven_and_end_of_input() {
    let env = TestEnv::new();
    env.bare_cmd().write_stdin("7\n").assert().success();
    env.bare_cmd().write_stdin("").assert().success();
}

#[test]
fn add_list_and_login_from_menu() {
    let env = TestEnv::new();
    env.sign_in("first");
    env.bare_cmd()
        .write_stdin("1\nfirst\nFirst account\n7\n")
        .assert()
        .success();
    env.sign_in("second");
    env.bare_cmd()
        .write_stdin("1\nsecond\n\n7\n")
        .assert()
        .success();

    let out = env.bare_cmd().write_stdin("4\n7\n").assert().success().stdout_as_str();
    assert!(out.contains("first"), "{out}");
    assert!(out.contains("* second"), "{out}");

    env.bare_cmd().write_stdin("2\n1\n7\n").assert().success();
    assert_eq!(env.keychain().as_deref(), Some("first"));
    assert_eq!(env.current().as_deref(), Some("first"));
}

#[test]
fn errors_do_not_end_the_menu() {
    let env = TestEnv::new();
    env.bare_cmd()
        .write_stdin("9\n2\n6\n7\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid option"))
        .stderr(predicate::str::contains("no profiles saved"))
        .stdout(predicate::str::contains("Active profile:"));
}

#[test]
fn delete_from_menu() {
    let env = TestEnv::new();
    env.sign_in("secret");
    env.bare_cmd()
        .write_stdin("1\nwork\n\n5\n1\nDELETE\n7\n")
        .assert()
        .success();
    assert!(!env.config_dir().join("profiles").join("work.cred").exists());
    assert_eq!(env.current().as_deref(), Some(""));
}

#[test]
fn add_from_menu_asks_before_overwriting() {
    let env = TestEnv::new();
    env.sign_in("old");
    env.bare_cmd().write_stdin("1\nwork\n\n7\n").assert().success();
    let cred = env.config_dir().join("profiles").join("work.cred");

    env.sign_in("new");
    env.bare_cmd()
        .write_stdin("1\nwork\nn\n7\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Kept the existing profile"));
    assert_eq!(std::fs::read_to_string(&cred).unwrap(), "old");

    env.bare_cmd()
        .write_stdin("1\nwork\ny\nReplaced\n7\n")
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&cred).unwrap(), "new");
}
