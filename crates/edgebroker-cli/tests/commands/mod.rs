//! Command-specific CLI tests.

mod descriptors_test;
mod translate_test;

use assert_cmd::Command;

/// The binary with every `EDGEBROKER_*` setting override removed.
pub fn edgebroker() -> Command {
    let mut cmd = Command::cargo_bin("edgebroker").unwrap();
    for key in [
        "EDGEBROKER_CONFIGURATION_URI",
        "EDGEBROKER_DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR",
        "EDGEBROKER_CHAR_ENCODING",
        "EDGEBROKER_LOG_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}
