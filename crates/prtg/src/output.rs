//! Output formatting: table or JSON.
//!
//! Table uses `tabled`; the JSON formats serialize the core types directly
//! so scripts see the same field names the library uses.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use prtg_core::StatusBucket;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Paint `text` in the bucket's dashboard color.
pub fn paint(bucket: StatusBucket, text: &str, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match bucket {
        StatusBucket::Up => text.green().to_string(),
        StatusBucket::Warning => text.yellow().to_string(),
        StatusBucket::Down => text.red().bold().to_string(),
        StatusBucket::Paused => text.blue().to_string(),
        StatusBucket::Unusual => text.magenta().to_string(),
        StatusBucket::Unknown => text.dimmed().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
    }
}

/// Render a single item; `detail_fn` builds the human-readable view.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, Tabled)]
    struct Row {
        name: String,
    }

    #[test]
    fn compact_json_is_one_line() {
        let rows = [Row { name: "a".into() }, Row { name: "b".into() }];
        let out = render_list(&OutputFormat::JsonCompact, &rows, |r| Row {
            name: r.name.clone(),
        });
        assert_eq!(out.ok().as_deref(), Some(r#"[{"name":"a"},{"name":"b"}]"#));
    }

    #[test]
    fn uncolored_paint_is_identity() {
        assert_eq!(paint(StatusBucket::Down, "3", false), "3");
        assert_ne!(paint(StatusBucket::Down, "3", true), "3");
    }
}
