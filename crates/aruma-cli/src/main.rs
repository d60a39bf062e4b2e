mod collect;
mod report;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aruma-cli")]
#[command(about = "Aruma signal pipeline command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the source producers and write fresh documents to the data directory
    Collect {
        /// Restrict the run to one source (trends, tiktok, meta, analytics)
        #[arg(long)]
        source: Option<String>,

        /// Print the documents that would be written, without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Aggregate the on-disk documents and print the score report
    Report {
        /// Emit the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Collect { source, dry_run }) => {
            collect::run_collect(source.as_deref(), dry_run).await
        }
        Some(Commands::Report { json }) => report::run_report(json),
        None => {
            println!("aruma-cli: run `collect` or `report` (see --help)");
            Ok(())
        }
    }
}
