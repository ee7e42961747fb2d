//! Tests for the `descriptors` command.

use std::io::Write;

use predicates::prelude::*;
use tempfile::NamedTempFile;

use super::edgebroker;

const CONNECTORS: &str = "\
transports=mqtt
mqtt.transport_protocol=MQTT
mqtt.device.APP=edgebroker.device.ResponseMessage
mqtt.kapua.APP=edgebroker.domain.PackageResponseMessage
";

fn settings_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn connectors_file(document: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(document.as_bytes()).unwrap();
    file
}

/// Without a configuration URI only the default descriptor exists.
#[test]
fn test_descriptors_without_configuration() {
    edgebroker()
        .arg("descriptors")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"connectors\": {}"))
        .stdout(predicate::str::contains("\"transport_protocol\": \"NONE\""));
}

/// Configured connectors are listed with their message types.
#[test]
fn test_descriptors_from_file() {
    let connectors = connectors_file(CONNECTORS);
    let settings = settings_file(&[format!(
        "CONFIGURATION_URI={}",
        connectors.path().display()
    )]);

    edgebroker()
        .arg("--settings")
        .arg(settings.path())
        .arg("descriptors")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mqtt\""))
        .stdout(predicate::str::contains("\"transport_protocol\": \"MQTT\""))
        .stdout(predicate::str::contains("edgebroker.domain.PackageResponseMessage"));
}

/// A single connector is resolved, unknown names fall back to the default.
#[test]
fn test_descriptors_single_connector() {
    let connectors = connectors_file(CONNECTORS);
    let settings = settings_file(&[format!(
        "CONFIGURATION_URI={}",
        connectors.path().display()
    )]);

    edgebroker()
        .arg("--settings")
        .arg(settings.path())
        .arg("descriptors")
        .arg("--connector")
        .arg("amqp")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"transport_protocol\": \"NONE\""));
}

/// With the default disabled, unknown connectors are an error.
#[test]
fn test_descriptors_default_disabled() {
    let settings = settings_file(&["DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR=true".to_string()]);

    edgebroker()
        .arg("--settings")
        .arg(settings.path())
        .arg("descriptors")
        .arg("--connector")
        .arg("amqp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No descriptor for connector 'amqp'"));
}

/// An unresolvable type reference fails the command.
#[test]
fn test_descriptors_invalid_type() {
    let connectors = connectors_file("transports=mqtt\nmqtt.device.APP=com.example.Missing\n");

    edgebroker()
        .env("EDGEBROKER_CONFIGURATION_URI", connectors.path())
        .arg("descriptors")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load connector descriptors"));
}
