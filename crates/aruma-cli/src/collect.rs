//! Collection command handler for the CLI.
//!
//! Runs the requested producers against the configured data directory.
//! Per-source failures are reported in the summary rather than aborting the
//! run, matching how the server's scheduled collection behaves.

use aruma_collect::SnapshotStore;
use aruma_core::SourceKind;

/// Run a collection cycle, or preview the documents with `dry_run`.
///
/// # Errors
///
/// Returns an error if configuration or the watchlist cannot be loaded, if
/// `source_filter` names an unknown source, or if any requested source fails
/// to collect (after the remaining sources have been attempted).
pub(crate) async fn run_collect(source_filter: Option<&str>, dry_run: bool) -> anyhow::Result<()> {
    let config = aruma_core::load_app_config()?;
    let watchlist = aruma_core::load_watchlist(&config.watchlist_path)?;

    let sources: Vec<SourceKind> = match source_filter {
        Some(slug) => vec![slug.parse().map_err(|e: String| anyhow::anyhow!(e))?],
        None => SourceKind::ALL.to_vec(),
    };

    if dry_run {
        for source in &sources {
            let preview = aruma_collect::preview_document(&config, &watchlist, *source).await?;
            println!("--- {source} ---");
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        println!("dry run: no files were written");
        return Ok(());
    }

    let store = SnapshotStore::new(config.data_dir.clone());
    let summary = aruma_collect::collect_all(&config, &watchlist, &store, &sources).await;

    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(path) => println!(
                "{:<10} ok   {:>3} records  {}",
                outcome.source.slug(),
                outcome.records,
                path.display()
            ),
            Err(e) => println!("{:<10} FAILED  {e}", outcome.source.slug()),
        }
    }
    println!(
        "collected {}/{} sources",
        summary.succeeded(),
        summary.outcomes.len()
    );

    if !summary.all_ok() {
        anyhow::bail!("{} source(s) failed to collect", summary.failed());
    }
    Ok(())
}
