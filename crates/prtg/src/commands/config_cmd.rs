//! Config subcommand handlers.

use prtg_config::Settings;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, InitArgs, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let shown = config::effective_settings(global)?.redacted();
            let out = match global.output {
                OutputFormat::Table => prtg_config::render_toml(&shown)?,
                _ => output::render_single(&global.output, &shown, |_| String::new())?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &config::settings_path(global).display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Init(init) => init_config(&init, global),
    }
}

fn init_config(init: &InitArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::settings_path(global);
    if path.exists() && !init.force {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!("{} already exists (use --force to overwrite)", path.display()),
        });
    }

    let url = global.url.clone().ok_or_else(|| CliError::Validation {
        field: "url".into(),
        reason: "pass the server with --url".into(),
    })?;
    if init.token_env.is_none() && global.api_token.is_none() {
        return Err(CliError::Validation {
            field: "api_token".into(),
            reason: "pass --api-token or --token-env".into(),
        });
    }

    let settings = Settings {
        url: Some(url),
        api_token: global.api_token.clone(),
        api_token_env: init.token_env.clone(),
        verify_tls: !global.insecure,
        timeout: global.timeout.unwrap_or(Settings::default().timeout),
        ..Settings::default()
    };
    settings.validate()?;
    prtg_config::save_settings(&settings, &path)?;

    if !global.quiet {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
