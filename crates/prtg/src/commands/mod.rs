//! Command dispatch: bridges CLI args -> `Monitor` operations -> output.

pub mod config_cmd;
pub mod device;
pub mod export;
pub mod sensors;
pub mod status;
pub mod summary;

use prtg_core::{Monitor, ResolvedDevice};

use crate::cli::{DeviceArgs, GlobalOpts, ServerCommand};
use crate::error::CliError;

/// Dispatch a server-bound command to its handler.
pub async fn dispatch(
    cmd: ServerCommand,
    monitor: &Monitor,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ServerCommand::Status => status::handle(monitor, global).await,
        ServerCommand::Device(args) => device::handle(monitor, args, global).await,
        ServerCommand::Sensors(args) => sensors::handle(monitor, args, global).await,
        ServerCommand::Summary(args) => summary::handle(monitor, args, global).await,
        ServerCommand::Export(args) => export::handle(monitor, args, global).await,
    }
}

/// Use `--id` when given, otherwise resolve the name.
pub(crate) async fn resolve(
    monitor: &Monitor,
    args: &DeviceArgs,
) -> Result<ResolvedDevice, CliError> {
    if let Some(id) = args.id {
        return Ok(monitor.device_by_id(id, &args.name));
    }
    monitor
        .find_device(&args.name)
        .await
        .ok_or_else(|| CliError::NotFound {
            name: args.name.clone(),
        })
}
