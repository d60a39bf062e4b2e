//! Report command: aggregate the on-disk documents and print the result.

use aruma_collect::SnapshotStore;
use aruma_signals::{aggregate, ScoreReport};

/// Build the score report from whatever documents are on disk and print it.
///
/// Missing documents are not an error; their sources show as unavailable and
/// the affected sub-scores sit at the neutral 5.0.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or JSON output fails
/// to serialize.
pub(crate) fn run_report(as_json: bool) -> anyhow::Result<()> {
    let config = aruma_core::load_app_config()?;
    let store = SnapshotStore::new(config.data_dir.clone());
    let report = aggregate(&store.load_bundle());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ScoreReport) {
    println!(
        "aruma score report — generated {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    println!("SCORES (0-10)");
    println!("  {:<10}{}", "overall", report.scores.overall);
    println!("  {:<10}{}", "search", report.scores.search);
    println!("  {:<10}{}", "trend", report.scores.trend);
    println!("  {:<10}{}", "intent", report.scores.intent);
    println!("  {:<10}{}", "emotion", report.scores.emotion);
    println!();

    println!("{:<12}{:<12}{:<10}DETAIL", "SOURCE", "STATUS", "RECORDS");
    for status in &report.sources {
        let state = if status.available { "ok" } else { "missing" };
        let detail = status
            .error
            .as_deref()
            .or(status.timestamp.as_deref())
            .unwrap_or("-");
        println!(
            "{:<12}{:<12}{:<10}{detail}",
            status.source.slug(),
            state,
            status.records
        );
    }

    if report.insights.is_empty() {
        println!();
        println!("no insights yet; run `collect` first");
        return;
    }

    println!();
    println!("INSIGHTS");
    for insight in &report.insights {
        println!("  [{}] {}", insight.source, insight.highlight);
        println!("      -> {}", insight.action);
    }
}
