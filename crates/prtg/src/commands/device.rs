//! `prtg device`: resolve one device and summarise its sensors.

use serde::Serialize;

use prtg_core::{Monitor, ResolvedDevice, StatusSummary};

use crate::cli::{DeviceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::summary::breakdown;

#[derive(Serialize)]
struct DeviceView {
    #[serde(flatten)]
    resolved: ResolvedDevice,
    device_url: String,
    summary: StatusSummary,
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn detail(v: &DeviceView, color: bool) -> String {
    let d = &v.resolved.device;
    let mut lines = vec![
        format!("Name:    {}", d.name),
        format!("ID:      {}", d.id),
        format!("Host:    {}", or_dash(&d.host)),
        format!("Status:  {}", or_dash(&d.status)),
        format!("Group:   {}", or_dash(&d.group)),
        format!("URL:     {}", v.device_url),
        format!("Sensors: {}", breakdown(&v.summary, color)),
    ];
    if !d.message.is_empty() {
        lines.push(format!("Message: {}", d.message));
    }
    if v.resolved.from_cache {
        lines.push("(cached)".into());
    }
    lines.join("\n")
}

pub async fn handle(
    monitor: &Monitor,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resolved = super::resolve(monitor, &args).await?;
    let device_id = resolved.device.id;
    let view = DeviceView {
        device_url: monitor.device_url(device_id),
        summary: monitor.device_summary(device_id).await,
        resolved,
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(&global.output, &view, |v| detail(v, color))?;
    output::print_output(&out, global.quiet);
    Ok(())
}
