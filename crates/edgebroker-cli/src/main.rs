//! Command-line interface for the edge broker connector layer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edgebroker_connector::{DescriptorInfo, DescriptorRegistry, MessageTypeCatalog};
use edgebroker_core::{
    BrokerSettings, DeviceManagementSettings, DeviceResponseChannel, DeviceResponseCode,
    DeviceResponseMessage, DeviceResponsePayload, MetricValue, PackageResponseMessage, Settings,
};
use edgebroker_translator::{Charset, PackageResponseTranslator, Translator};
use serde::Serialize;

/// Environment variable switching log output to JSON.
const LOG_JSON_ENV: &str = "EDGEBROKER_LOG_JSON";

/// Edge broker - inspect connector descriptors and translate device responses.
#[derive(Parser, Debug)]
#[command(name = "edgebroker")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Settings properties file.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load connector descriptors and print them as JSON.
    Descriptors {
        /// Resolve a single connector by name.
        #[arg(short, long)]
        connector: Option<String>,
    },
    /// Translate a package application response and print it as JSON.
    Translate {
        /// Device application id.
        #[arg(long)]
        app_id: String,
        /// Device application version.
        #[arg(long)]
        app_version: String,
        /// Device response code (200, 400, 404, 500).
        #[arg(long, value_parser = parse_response_code)]
        code: DeviceResponseCode,
        /// Metric as NAME=VALUE; integers, longs and booleans are typed, anything else is a string.
        #[arg(short, long = "metric", value_parser = parse_metric)]
        metrics: Vec<(String, MetricValue)>,
        /// File holding the response body.
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Account scope of the device.
        #[arg(long, default_value = "")]
        scope: String,
        /// Client id of the device.
        #[arg(long, default_value = "")]
        client_id: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings::load(args.settings.as_deref())
        .with_context(|| format!("Failed to load settings from {:?}", args.settings))?;

    match args.command {
        Command::Descriptors { connector } => run_descriptors(&settings, connector.as_deref()),
        Command::Translate {
            app_id,
            app_version,
            code,
            metrics,
            body_file,
            scope,
            client_id,
        } => {
            let channel = DeviceResponseChannel {
                scope,
                client_id,
                app_id,
                app_version,
                ..Default::default()
            };
            run_translate(&settings, channel, code, metrics, body_file.as_deref())
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Check if JSON logging is requested (for production/container environments)
    let json_logging = std::env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::default().add_directive(log_level.into()));

    // Logs go to stderr, stdout carries the JSON result
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Output of the `descriptors` command.
#[derive(Debug, Serialize)]
struct DescriptorsOutput {
    connectors: BTreeMap<String, DescriptorInfo>,
    default: Option<DescriptorInfo>,
}

fn run_descriptors(settings: &Settings, connector: Option<&str>) -> Result<()> {
    let broker = BrokerSettings::from_settings(settings);
    let registry = DescriptorRegistry::load(&broker, &MessageTypeCatalog::builtin())
        .context("Failed to load connector descriptors")?;

    if let Some(name) = connector {
        let descriptor = registry
            .resolve(name)
            .with_context(|| format!("No descriptor for connector '{}'", name))?;
        return print_json(&descriptor.info());
    }

    let connectors = registry
        .connector_names()
        .into_iter()
        .filter_map(|name| {
            let info = registry.resolve(&name)?.info();
            Some((name, info))
        })
        .collect();
    print_json(&DescriptorsOutput {
        connectors,
        default: registry.default_descriptor().map(|d| d.info()),
    })
}

/// Output of the `translate` command: the canonical message with its body as text.
#[derive(Debug, Serialize)]
struct TranslateOutput {
    #[serde(flatten)]
    message: serde_json::Value,
    body_text: Option<String>,
}

fn run_translate(
    settings: &Settings,
    channel: DeviceResponseChannel,
    code: DeviceResponseCode,
    metrics: Vec<(String, MetricValue)>,
    body_file: Option<&Path>,
) -> Result<()> {
    let device_settings = DeviceManagementSettings::from_settings(settings);

    let mut payload = metrics
        .into_iter()
        .fold(DeviceResponsePayload::new(code), |payload, (name, value)| {
            payload.with_metric(name, value)
        });
    if let Some(path) = body_file {
        let body = std::fs::read(path)
            .with_context(|| format!("Failed to read body from {}", path.display()))?;
        payload = payload.with_body(body);
    }

    let message = DeviceResponseMessage::new(channel, payload);
    let translator = PackageResponseTranslator::new(device_settings.clone());
    let translated = translator
        .translate(&message)
        .context("Failed to translate response")?;

    tracing::info!("Translated response {}", translated.id);
    print_json(&TranslateOutput {
        body_text: body_text(&translated, &device_settings),
        message: strip_body(serde_json::to_value(&translated)?),
    })
}

/// Body of the canonical message as text, in the configured charset.
fn body_text(message: &PackageResponseMessage, settings: &DeviceManagementSettings) -> Option<String> {
    let body = message.payload.body.as_deref()?;
    Charset::for_label(&settings.char_encoding)
        .and_then(|charset| charset.decode(body))
        .or_else(|| Some(String::from_utf8_lossy(body).into_owned()))
}

fn strip_body(mut message: serde_json::Value) -> serde_json::Value {
    if let Some(payload) = message.get_mut("payload").and_then(|p| p.as_object_mut()) {
        payload.remove("body");
    }
    message
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_response_code(s: &str) -> std::result::Result<DeviceResponseCode, String> {
    let code: u16 = s.parse().map_err(|_| format!("'{}' is not a response code", s))?;
    DeviceResponseCode::from_code(code).ok_or_else(|| format!("unknown response code {}", code))
}

fn parse_metric(s: &str) -> std::result::Result<(String, MetricValue), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing metric name in '{}'", s));
    }

    let value = if let Ok(v) = value.parse::<i32>() {
        MetricValue::Integer(v)
    } else if let Ok(v) = value.parse::<i64>() {
        MetricValue::Long(v)
    } else if let Ok(v) = value.parse::<bool>() {
        MetricValue::Boolean(v)
    } else {
        MetricValue::String(value.to_string())
    };
    Ok((name.to_string(), value))
}
