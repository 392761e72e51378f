use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn base_cmd(tmp: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("erp"));
    // Keep the real config dir and terminal theme out of the picture.
    cmd.env("ERP_PREFS_PATH", tmp.join("prefs.json"));
    cmd.env("ERP_COLOR_SCHEME", "light");
    cmd.env_remove("COLORFGBG");
    cmd.env_remove("ERP_LOG");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("valid json on stdout")
}

#[test]
fn help_lists_subcommands() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("jump"))
        .stdout(contains("palette"))
        .stdout(contains("keys"))
        .stdout(contains("prefs"));
}

#[test]
fn jump_by_employee_code() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["jump", "apl"])
        .assert()
        .success()
        .stdout(contains("employees/detail/APL"))
        .stdout(contains("Andreas"));
}

#[test]
fn jump_json_contact() {
    let tmp = TempDir::new().unwrap();
    let v = json_stdout(base_cmd(tmp.path()).args(["--json", "jump", "c002"]));
    assert_eq!(v["outcome"], "navigate");
    assert_eq!(v["route"]["module"], "contacts");
    assert_eq!(v["route"]["view"], "detail");
    assert_eq!(v["route"]["id"], "C002");
}

#[test]
fn jump_miss_opens_search() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["jump", "zzz"])
        .assert()
        .success()
        .stdout(contains("open search"))
        .stdout(contains("> zzz"));

    let v = json_stdout(base_cmd(tmp.path()).args(["jump", "  ", "--json"]));
    assert_eq!(v["outcome"], "open_search");
    assert!(v.get("route").is_none());
}

#[test]
fn keys_goto_contacts() {
    let tmp = TempDir::new().unwrap();
    let v = json_stdout(base_cmd(tmp.path()).args(["--json", "keys", "g", "c"]));
    assert_eq!(v["route"]["module"], "contacts");
    assert_eq!(v["route"]["view"], "list");
    assert!(v["route"]["id"].is_null());
    assert_eq!(v["palette"]["open"], false);
    assert_eq!(v["pending"], false);
}

#[test]
fn keys_open_palette_and_type() {
    let tmp = TempDir::new().unwrap();
    let v = json_stdout(base_cmd(tmp.path()).args(["--json", "keys", "ctrl+k", "g", "c"]));
    assert_eq!(v["palette"]["open"], true);
    assert_eq!(v["palette"]["query"], "gc");
    assert_eq!(v["route"]["module"], "dashboard");
}

#[test]
fn keys_palette_commit() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["keys", "/", "a", "b", "a", "x", "enter"])
        .assert()
        .success()
        .stdout(contains("contacts/detail/C002"))
        .stdout(contains("Diegem"));
}

#[test]
fn bad_key_fails_with_usage_code() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["keys", "hyper+k"])
        .assert()
        .code(2)
        .stderr(contains("hyper"));

    let out = base_cmd(tmp.path())
        .args(["--json", "keys", "hyper+k"])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();
    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["error"]["kind"], "key");
    assert_eq!(v["error"]["code"], 2);
}

#[test]
fn index_dump_has_modules_then_records() {
    let tmp = TempDir::new().unwrap();
    let v = json_stdout(base_cmd(tmp.path()).args(["--json", "index"]));
    let entries = v.as_array().unwrap();
    assert_eq!(entries.len(), 13);
    assert_eq!(entries[0]["type"], "module");
    assert_eq!(entries[0]["module"], "contacts");
    assert_eq!(entries[5]["type"], "contact");
    assert_eq!(entries[12]["type"], "opportunity");
}

#[test]
fn palette_query_groups_results() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["palette", "ab"])
        .assert()
        .success()
        .stdout(contains("Datensätze"))
        .stdout(contains("ABAX"));

    let v = json_stdout(base_cmd(tmp.path()).args(["--json", "palette", "lease"]));
    let hits = v.as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["entry"]["id"], "C003");
    assert_eq!(hits[1]["route"]["view"], "board");
}

#[test]
fn prefs_round_trip_through_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom").join("prefs.json");
    let path_arg = path.to_str().unwrap();

    base_cmd(tmp.path())
        .args(["--prefs", path_arg, "prefs", "theme", "dark"])
        .assert()
        .success();
    base_cmd(tmp.path())
        .args(["--prefs", path_arg, "prefs", "sidebar", "9999"])
        .assert()
        .success();

    let v = json_stdout(base_cmd(tmp.path()).args(["--prefs", path_arg, "--json", "prefs"]));
    assert_eq!(v["theme"], "dark");
    assert_eq!(v["theme_stored"], true);
    assert_eq!(v["sidebar_width"], 480);
    assert_eq!(v["contacts_width"], 420);

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["sidebar-width"], "480");
    assert_eq!(raw["theme-pref"], "dark");
}

#[test]
fn prefs_system_theme_follows_environment() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .args(["prefs", "theme", "system"])
        .assert()
        .success();
    let v = json_stdout(
        base_cmd(tmp.path())
            .env("ERP_COLOR_SCHEME", "dark")
            .args(["--json", "prefs", "show"]),
    );
    assert_eq!(v["theme"], "dark");
    assert_eq!(v["theme_stored"], false);
}

#[test]
fn corrupt_prefs_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("prefs.json"), "{ nope").unwrap();
    let v = json_stdout(base_cmd(tmp.path()).args(["--json", "prefs", "show"]));
    assert_eq!(v["theme"], "light");
    assert_eq!(v["sidebar_width"], 260);
}

#[test]
fn shell_session_over_stdin() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("shell")
        .write_stdin("jump apl\nkey g o\nquit\n")
        .assert()
        .success()
        .stdout(contains("employees/detail/APL"))
        .stdout(contains("opps/board"));
}

#[test]
fn shell_theme_change_persists() {
    let tmp = TempDir::new().unwrap();
    base_cmd(tmp.path())
        .arg("shell")
        .write_stdin("theme dark\nsidebar collapse\n")
        .assert()
        .success()
        .stdout(contains("theme=dark"))
        .stdout(contains("sidebar=collapsed"));

    let raw: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("prefs.json")).unwrap()).unwrap();
    assert_eq!(raw["theme-pref"], "dark");
    assert!(raw.get("sidebar-width").is_none());
}
