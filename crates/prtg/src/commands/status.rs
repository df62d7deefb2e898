//! `prtg status`: connection test.

use serde::Serialize;

use prtg_core::{Monitor, ServerStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct StatusView<'a> {
    url: &'a str,
    #[serde(flatten)]
    status: ServerStatus,
}

fn detail(v: &StatusView<'_>) -> String {
    [
        v.status.message.clone(),
        format!("Server:  {}", v.url),
        format!("Version: {}", v.status.version),
    ]
    .join("\n")
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let status = monitor.test_connection().await?;
    let view = StatusView {
        url: monitor.base_url(),
        status,
    };
    let out = output::render_single(&global.output, &view, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
