//! Tests for the `translate` command.

use std::io::Write;

use predicates::prelude::*;
use tempfile::NamedTempFile;

use super::edgebroker;

/// Operation metrics are translated.
#[test]
fn test_translate_metrics() {
    edgebroker()
        .args(["translate", "--app-id", "DEPLOY", "--app-version", "V2", "--code", "200"])
        .args(["--metric", "job.id=1001", "--metric", "dp.download.status=ALREADY DONE"])
        .args(["--metric", "dp.download.progress=100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation_id\": \"1001\""))
        .stdout(predicate::str::contains("\"operation_status\": \"COMPLETED\""))
        .stdout(predicate::str::contains("\"operation_progress\": 100"))
        .stdout(predicate::str::contains("\"app_name\": \"PACKAGE\""));
}

/// A package list body is re-encoded as a canonical document.
#[test]
fn test_translate_package_body() {
    let mut body = NamedTempFile::new().unwrap();
    write!(
        body,
        "<packages><package><name>org.example.app</name><version>1.0</version>\
         <bundles><bundle><name>org.example.app.core</name><version>1.0</version></bundle></bundles>\
         </package></packages>"
    )
    .unwrap();

    edgebroker()
        .args(["translate", "--app-id", "DEPLOY", "--app-version", "V2", "--code", "200"])
        .arg("--body-file")
        .arg(body.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation_status\": \"NONE\""))
        .stdout(predicate::str::contains("<devicePackages>"))
        .stdout(predicate::str::contains("<bundleInfo><name>org.example.app.core</name>"));
}

/// Internal errors only carry the body text.
#[test]
fn test_translate_internal_error() {
    let mut body = NamedTempFile::new().unwrap();
    write!(body, "download aborted").unwrap();

    edgebroker()
        .args(["translate", "--app-id", "DEPLOY", "--app-version", "V2", "--code", "500"])
        .arg("--body-file")
        .arg(body.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error_message\": \"download aborted\""))
        .stdout(predicate::str::contains("\"response_code\": \"INTERNAL_ERROR\""));
}

/// Responses of other applications are rejected.
#[test]
fn test_translate_wrong_application() {
    edgebroker()
        .args(["translate", "--app-id", "CONF", "--app-version", "V2", "--code", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid channel CONF/V2"));
}

/// Unknown status tokens are rejected.
#[test]
fn test_translate_unknown_status() {
    edgebroker()
        .args(["translate", "--app-id", "DEPLOY", "--app-version", "V2", "--code", "200"])
        .args(["--metric", "job.id=1", "--metric", "dp.download.status=BOGUS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown download status: BOGUS"));
}

/// Unknown response codes are rejected by argument parsing.
#[test]
fn test_translate_unknown_code() {
    edgebroker()
        .args(["translate", "--app-id", "DEPLOY", "--app-version", "V2", "--code", "418"])
        .assert()
        .failure()
        .code(2);
}
