//! Device command handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use edgeos_core::{
    DeviceAttributes, DeviceData, DeviceRegistry, DeviceSnapshot, DeviceType, EntityKey,
    EntityKind, IntegrationSettings, Platform, SensorFormat, Unit, catalog,
};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum DeviceView {
    Full(DeviceSnapshot),
    Simple(DeviceAttributes),
}

#[derive(Debug, Serialize)]
struct DeviceReport {
    #[serde(flatten)]
    view: DeviceView,
    last_activity: DateTime<Utc>,
    last_activity_age: u64,
    is_home: bool,
    monitored: bool,
}

impl DeviceReport {
    fn attributes(&self) -> &DeviceAttributes {
        match &self.view {
            DeviceView::Full(snapshot) => &snapshot.attributes,
            DeviceView::Simple(attributes) => attributes,
        }
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Sent")]
    sent: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct DeviceAttributesRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Leased")]
    leased: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Display rules for the device traffic sensors under the configured unit.
struct TrafficFormats {
    received: Option<SensorFormat>,
    sent: Option<SensorFormat>,
}

impl TrafficFormats {
    fn new(unit: Unit) -> Self {
        Self {
            received: sensor_format(EntityKey::DeviceReceivedTraffic, unit),
            sent: sensor_format(EntityKey::DeviceSentTraffic, unit),
        }
    }
}

fn sensor_format(key: EntityKey, unit: Unit) -> Option<SensorFormat> {
    let descriptor = catalog().find(key, Platform::Sensor)?;
    match &descriptor.kind {
        EntityKind::Sensor(hints) => Some(SensorFormat::for_sensor(hints, unit)),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn render_total(format: Option<&SensorFormat>, total: u64) -> String {
    format.map_or_else(|| total.to_string(), |f| f.render(total as f64))
}

fn device_row(report: &DeviceReport, formats: &TrafficFormats, color: bool) -> DeviceRow {
    let attributes = report.attributes();
    let (received, sent) = match &report.view {
        DeviceView::Full(snapshot) => (
            render_total(formats.received.as_ref(), snapshot.received.total),
            render_total(formats.sent.as_ref(), snapshot.sent.total),
        ),
        DeviceView::Simple(_) => ("-".into(), "-".into()),
    };
    DeviceRow {
        hostname: attributes.hostname.clone(),
        ip: attributes.ip.to_string(),
        mac: attributes.mac.to_string(),
        received,
        sent,
        age: format!("{}s", report.last_activity_age),
        status: output::presence(report.is_home, color),
    }
}

fn attributes_row(report: &DeviceReport, color: bool) -> DeviceAttributesRow {
    let attributes = report.attributes();
    DeviceAttributesRow {
        hostname: attributes.hostname.clone(),
        ip: attributes.ip.to_string(),
        mac: attributes.mac.to_string(),
        domain: attributes.domain.clone().unwrap_or_else(|| "-".into()),
        leased: attributes.is_leased.to_string(),
        age: format!("{}s", report.last_activity_age),
        status: output::presence(report.is_home, color),
    }
}

fn build_reports(
    registry: &DeviceRegistry,
    settings: &IntegrationSettings,
    now: DateTime<Utc>,
    simple: bool,
) -> Vec<DeviceReport> {
    registry
        .iter()
        .map(|device: &DeviceData| DeviceReport {
            view: if simple {
                DeviceView::Simple(device.attributes())
            } else {
                DeviceView::Full(device.snapshot())
            },
            last_activity: device.last_activity(),
            last_activity_age: device.last_activity_age_at(now),
            is_home: registry.is_home(device.unique_id(), settings.consider_away(), now),
            monitored: settings.is_monitored(DeviceType::Device, Some(device.mac.as_str())),
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::Inspect {
            file,
            simple,
            leased_only,
            at,
        } => {
            let snapshots: Vec<DeviceSnapshot> = util::read_json_file(&file)?;
            let mut registry: DeviceRegistry =
                snapshots.into_iter().map(DeviceData::from).collect();

            if leased_only {
                let evicted = registry.retain_leased();
                debug!(evicted = evicted.len(), "dropped devices without lease");
            }

            let config = util::load_config(global)?;
            let settings = &config.integration;
            let now = util::parse_timestamp(at.as_deref())?;
            let reports = build_reports(&registry, settings, now, simple);

            let color = output::should_color(&global.color);
            let out = if simple {
                output::render_list(
                    &global.output,
                    &reports,
                    |r| attributes_row(r, color),
                    |r| r.attributes().mac.to_string(),
                )?
            } else {
                let formats = TrafficFormats::new(settings.unit);
                output::render_list(
                    &global.output,
                    &reports,
                    |r| device_row(r, &formats, color),
                    |r| r.attributes().mac.to_string(),
                )?
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
