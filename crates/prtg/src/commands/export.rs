//! `prtg export`: create a device in PRTG.

use prtg_core::{ExportOutcome, Monitor};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::Created {
            device_id,
            device_url,
            message,
        } => format!("{message}\nID:  {device_id}\nURL: {device_url}"),
        ExportOutcome::CreatedUnconfirmed { message } => message.clone(),
    }
}

pub async fn handle(
    monitor: &Monitor,
    args: ExportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let outcome = monitor.export_device(&args.name, &args.host).await?;
    let out = output::render_single(&global.output, &outcome, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
