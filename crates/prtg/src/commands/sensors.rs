//! `prtg sensors`: list a device's sensors.

use tabled::Tabled;

use prtg_core::{Monitor, Sensor};

use crate::cli::{DeviceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Value")]
    last_value: String,
    #[tabled(rename = "Type")]
    sensor_type: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn row(s: &Sensor, color: bool) -> SensorRow {
    let status = if s.status.is_empty() {
        s.bucket().label().to_owned()
    } else {
        s.status.clone()
    };
    SensorRow {
        id: s.id,
        name: s.name.clone(),
        status: output::paint(s.bucket(), &status, color),
        last_value: s.last_value.clone(),
        sensor_type: s.sensor_type.clone(),
        message: s.message.clone(),
    }
}

pub async fn handle(
    monitor: &Monitor,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resolved = super::resolve(monitor, &args).await?;
    let sensors = monitor.sensors(resolved.device.id).await;

    if sensors.is_empty() && !global.quiet {
        eprintln!("No sensors for device {}", resolved.device.id);
    }

    let color = output::should_color(&global.color);
    let out = output::render_list(&global.output, &sensors, |s| row(s, color))?;
    output::print_output(&out, global.quiet);
    Ok(())
}
