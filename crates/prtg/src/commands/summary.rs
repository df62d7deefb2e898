//! `prtg summary`: system-wide sensor status counts.

use strum::IntoEnumIterator;
use tabled::Tabled;

use prtg_core::{AggregateSummary, Monitor, StatusBucket, StatusSummary};

use crate::cli::{GlobalOpts, SummaryArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sensors")]
    count: u32,
}

/// Rows shown in the summary table. Unusual and unknown only appear when
/// they have sensors in them.
fn visible_buckets(summary: &StatusSummary) -> impl Iterator<Item = StatusBucket> + '_ {
    StatusBucket::iter().filter(|b| {
        !matches!(b, StatusBucket::Unusual | StatusBucket::Unknown) || summary.count(*b) > 0
    })
}

/// One-line breakdown, e.g. `12 sensors: 10 up, 1 warning, 1 down`.
/// Empty buckets are left out.
pub(crate) fn breakdown(summary: &StatusSummary, color: bool) -> String {
    let parts: Vec<String> = StatusBucket::iter()
        .filter(|b| summary.count(*b) > 0)
        .map(|b| output::paint(b, &format!("{} {b}", summary.count(b)), color))
        .collect();
    if parts.is_empty() {
        format!("{} sensors", summary.total)
    } else {
        format!("{} sensors: {}", summary.total, parts.join(", "))
    }
}

fn table(aggregate: &AggregateSummary, color: bool) -> String {
    let summary = &aggregate.summary;
    let mut rows: Vec<BucketRow> = visible_buckets(summary)
        .map(|b| BucketRow {
            status: output::paint(b, b.label(), color),
            count: summary.count(b),
        })
        .collect();
    rows.push(BucketRow {
        status: "Total".into(),
        count: summary.total,
    });

    let mut out = output::render_table(&rows);
    if aggregate.from_cache {
        out.push_str("\n(cached)");
    }
    out
}

pub async fn handle(
    monitor: &Monitor,
    args: SummaryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let aggregate = match args.cache_ttl {
        Some(secs) => {
            let ttl = prtg_config::clamp_aggregate_ttl(secs);
            if ttl != secs {
                tracing::info!(requested = secs, ttl, "clamped aggregate cache TTL");
            }
            monitor
                .aggregate_summary_with_ttl(std::time::Duration::from_secs(ttl))
                .await?
        }
        None => monitor.aggregate_summary().await?,
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(&global.output, &aggregate, |a| table(a, color))?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rare_buckets_hidden_when_empty() {
        let summary = StatusSummary {
            up: 3,
            down: 1,
            total: 4,
            ..StatusSummary::default()
        };
        let shown: Vec<StatusBucket> = visible_buckets(&summary).collect();
        assert_eq!(
            shown,
            [
                StatusBucket::Up,
                StatusBucket::Warning,
                StatusBucket::Down,
                StatusBucket::Paused
            ]
        );

        let with_unknown = StatusSummary {
            unknown: 2,
            total: 2,
            ..StatusSummary::default()
        };
        assert!(visible_buckets(&with_unknown).any(|b| b == StatusBucket::Unknown));
        assert!(!visible_buckets(&with_unknown).any(|b| b == StatusBucket::Unusual));
    }

    #[test]
    fn breakdown_skips_empty_buckets() {
        let summary = StatusSummary {
            up: 10,
            warning: 1,
            down: 1,
            total: 12,
            ..StatusSummary::default()
        };
        assert_eq!(
            breakdown(&summary, false),
            "12 sensors: 10 up, 1 warning, 1 down"
        );
        assert_eq!(breakdown(&StatusSummary::default(), false), "0 sensors");
    }
}
