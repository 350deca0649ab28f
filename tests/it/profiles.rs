use predicates::prelude::predicate;

use crate::util::{AssertExt, TestEnv};

const WORK: &str = r#"{"claudeAiOauth":{"accessToken":"work-token","refreshToken":"r1"}}"#;
const PERSONAL: &str = r#"{"claudeAiOauth":{"accessToken":"personal-token","refreshToken":"r2"}}"#;

fn credential_file(env: &TestEnv, name: &str) -> std::path::PathBuf {
    env.config_dir().join("profiles").join(format!("{name}.cred"))
}

fn add(env: &TestEnv, name: &str, secret: &str) {
    env.sign_in(secret);
    env.new_cmd("add").arg(name).assert().success();
}

#[test]
fn add_then_login_restores_identical_credentials() {
    let env = TestEnv::new();
    env.sign_in(WORK);
    env.new_cmd("add")
        .args(["work", "Work account"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved profile work"));
    assert_eq!(std::fs::read_to_string(credential_file(&env, "work")).unwrap(), WORK);
    assert_eq!(env.current().as_deref(), Some("work"));

    add(&env, "personal", PERSONAL);
    assert_eq!(env.current().as_deref(), Some("personal"));

    env.new_cmd("login").arg("work").assert().success();
    assert_eq!(env.keychain().as_deref(), Some(WORK));
    assert_eq!(env.current().as_deref(), Some("work"));

    env.new_cmd("login").arg("personal").assert().success();
    assert_eq!(env.keychain().as_deref(), Some(PERSONAL));
}

#[test]
fn multiline_credentials_round_trip() {
    let env = TestEnv::new();
    let pretty = "{\n  \"claudeAiOauth\": {\n    \"accessToken\": \"t\"\n  }\n}\n";
    add(&env, "pretty", pretty);
    assert_eq!(std::fs::read_to_string(credential_file(&env, "pretty")).unwrap(), pretty);

    add(&env, "other", WORK);
    env.new_cmd("login").arg("pretty").assert().success();
    assert_eq!(env.keychain().as_deref(), Some(pretty));
}

#[test]
fn files_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnv::new();
    add(&env, "work", WORK);
    let mode = |path: std::path::PathBuf| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(env.config_dir()), 0o700);
    assert_eq!(mode(env.config_dir().join("profiles")), 0o700);
    assert_eq!(mode(credential_file(&env, "work")), 0o600);
    assert_eq!(mode(env.config_dir().join("profiles.json")), 0o600);
    assert_eq!(mode(env.config_dir().join("current")), 0o600);
}

#[test]
fn add_without_credentials_fails() {
    let env = TestEnv::new();
    env.new_cmd("add")
        .arg("work")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: no credentials"));
    assert!(!env.config_dir().exists());
}

#[test]
fn add_existing_requires_force() {
    let env = TestEnv::new();
    add(&env, "work", WORK);
    env.sign_in(PERSONAL);
    env.new_cmd("add")
        .arg("work")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(std::fs::read_to_string(credential_file(&env, "work")).unwrap(), WORK);

    env.new_cmd("add").args(["work", "--force"]).assert().success();
    assert_eq!(std::fs::read_to_string(credential_file(&env, "work")).unwrap(), PERSONAL);
}

#[test]
fn login_unknown_profile_fails() {
    let env = TestEnv::new();
    env.sign_in(WORK);
    env.new_cmd("login")
        .arg("ghost")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("profile not found: ghost"));
    assert_eq!(env.keychain().as_deref(), Some(WORK));
}

#[test]
fn login_chooses_from_list_when_name_omitted() {
    let env = TestEnv::new();
    add(&env, "alpha", WORK);
    add(&env, "beta", PERSONAL);

    env.new_cmd("login").write_stdin("1\n").assert().success();
    assert_eq!(env.current().as_deref(), Some("alpha"));
    assert_eq!(env.keychain().as_deref(), Some(WORK));

    env.new_cmd("login").write_stdin("beta\n").assert().success();
    assert_eq!(env.current().as_deref(), Some("beta"));
}

#[test]
fn list_reflects_credential_files() {
    let env = TestEnv::new();
    env.new_cmd("list")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No profiles saved"));

    add(&env, "work", WORK);
    add(&env, "personal", PERSONAL);
    let out = env.new_cmd("ls").assert().success().stdout_as_str();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("* personal"), "{out}");
    assert!(lines[1].starts_with("  work"), "{out}");

    std::fs::remove_file(credential_file(&env, "work")).unwrap();
    let out = env.new_cmd("list").assert().success().stdout_as_str();
    assert_eq!(out.lines().count(), 1);
    assert!(!out.contains("work"));
}

#[test]
fn deleting_active_profile_clears_pointer() {
    let env = TestEnv::new();
    add(&env, "work", WORK);
    env.new_cmd("delete")
        .arg("work")
        .write_stdin("DELETE\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Deleted profile work"));
    assert!(!credential_file(&env, "work").exists());
    assert_eq!(env.current().as_deref(), Some(""));
    // The credential store is left alone.
    assert_eq!(env.keychain().as_deref(), Some(WORK));
}

#[test]
fn delete_requires_confirmation_token() {
    let env = TestEnv::new();
    add(&env, "work", WORK);
    for input in ["delete\n", "yes\n", ""] {
        env.new_cmd("rm")
            .arg("work")
            .write_stdin(input)
            .assert()
            .success()
            .stderr(predicate::str::contains("Deletion cancelled"));
    }
    assert!(credential_file(&env, "work").exists());
    assert_eq!(env.current().as_deref(), Some("work"));
}

#[test]
fn delete_unknown_profile_fails() {
    let env = TestEnv::new();
    env.new_cmd("delete")
        .arg("ghost")
        .write_stdin("DELETE\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile not found: ghost"));
}

#[test]
fn logout_clears_store_and_pointer() {
    let env = TestEnv::new();
    add(&env, "work", WORK);
    env.new_cmd("logout")
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged out of profile work"));
    assert_eq!(env.keychain(), None);
    assert_eq!(env.current().as_deref(), Some(""));
    assert!(credential_file(&env, "work").exists());
}

#[test]
fn status_shows_active_profile() {
    let env = TestEnv::new();
    env.new_cmd("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("none"))
        .stdout(predicate::str::contains("no credentials set"));

    env.sign_in(WORK);
    env.new_cmd("add")
        .args(["work", "Work account"])
        .assert()
        .success();
    let out = env.new_cmd("status").assert().success().stdout_as_str();
    assert!(out.contains("Active profile:   work"), "{out}");
    assert!(out.contains("Work account"), "{out}");
    assert!(out.contains("Saved profiles:   1"), "{out}");
    assert!(out.contains("[credentials set]"), "{out}");
}

#[test]
fn status_warns_about_dangling_pointer() {
    let env = TestEnv::new();
    add(&env, "work", WORK);
    std::fs::remove_file(credential_file(&env, "work")).unwrap();
    env.new_cmd("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("has no saved credentials"));
}

#[test]
fn quiet_suppresses_messages() {
    let env = TestEnv::new();
    env.sign_in(WORK);
    env.new_cmd("add")
        .args(["work", "--quiet"])
        .assert()
        .success()
        .stderr("");
}
