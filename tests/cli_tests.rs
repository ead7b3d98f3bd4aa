//! End-to-end CLI tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn appbundlegen() -> Command {
    match Command::cargo_bin("appbundlegen") {
        Ok(cmd) => cmd,
        Err(e) => panic!("binary not built: {e}"),
    }
}

#[test]
fn missing_arguments_exit_with_one() {
    appbundlegen()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_exits_zero() {
    appbundlegen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("application bundle"));
}

#[test]
fn builds_demo_bundle_end_to_end() {
    let dest = tempfile::tempdir().unwrap();

    appbundlegen()
        .args(["Demo", dest.path().to_str().unwrap(), "/bin/true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo.app"));

    let bundle = dest.path().join("Demo.app");
    let launcher = bundle.join("Contents/MacOS/Demo");
    assert!(launcher.is_file());
    let script = std::fs::read_to_string(&launcher).unwrap();
    assert!(script.contains("/bin/true"));

    assert_eq!(
        std::fs::read(bundle.join("Contents/PkgInfo")).unwrap(),
        b"APPL????"
    );

    let value = plist::Value::from_file(bundle.join("Contents/Info.plist")).unwrap();
    let dict = value.as_dictionary().unwrap();
    assert_eq!(
        dict.get("CFBundleIdentifier")
            .and_then(plist::Value::as_string),
        Some("com.appbundlegenerator.demo")
    );
}

#[test]
fn identifier_flag_overrides_synthesis() {
    let dest = tempfile::tempdir().unwrap();

    appbundlegen()
        .args([
            "Demo",
            dest.path().to_str().unwrap(),
            "/bin/true",
            "--identifier",
            "org.example.custom",
        ])
        .assert()
        .success();

    let value =
        plist::Value::from_file(dest.path().join("Demo.app/Contents/Info.plist")).unwrap();
    let dict = value.as_dictionary().unwrap();
    assert_eq!(
        dict.get("CFBundleIdentifier")
            .and_then(plist::Value::as_string),
        Some("org.example.custom")
    );
}

#[test]
fn missing_entitlements_file_is_an_argument_error() {
    let dest = tempfile::tempdir().unwrap();

    appbundlegen()
        .args([
            "Demo",
            dest.path().to_str().unwrap(),
            "/bin/true",
            "--sign",
            "Developer ID Application: Nobody",
            "--entitlements",
            "/nonexistent/entitlements.plist",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ERROR: invalid arguments"));
}
