use std::path::PathBuf;
use std::process;

use clap::Parser;

use pagefreeze::core::{
    create_static_snapshot, print_error_message, print_info_message, SnapshotOptions,
};

#[derive(Parser)]
#[command(
    name = "pagefreeze",
    version,
    about = "Save a live web page as a statically servable snapshot"
)]
struct Cli {
    /// URL or local file path of the document to snapshot
    target: String,

    /// Directory the snapshot is written into
    #[arg(short = 'o', long, default_value = "snapshot")]
    output: PathBuf,

    /// Base URL for resolving relative references (defaults to the
    /// target's origin; required for file targets)
    #[arg(short = 'b', long)]
    base_url: Option<String>,

    /// Name of the asset subdirectory inside the output directory
    #[arg(long, default_value = "resources")]
    resources_dir: String,

    /// Network timeout in seconds (0 disables the timeout)
    #[arg(short = 't', long, default_value_t = 0)]
    timeout: u64,

    /// Custom User-Agent header for all requests
    #[arg(short = 'u', long)]
    user_agent: Option<String>,

    /// Allow invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Exclude the provenance comment from the saved markup
    #[arg(long)]
    no_metadata: bool,

    /// Suppress informational output
    #[arg(short = 's', long)]
    silent: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = SnapshotOptions {
        base_url: cli.base_url.clone(),
        insecure: cli.insecure,
        no_metadata: cli.no_metadata,
        resources_dir: Some(cli.resources_dir.clone()),
        silent: cli.silent,
        timeout: cli.timeout,
        user_agent: cli.user_agent.clone(),
    };

    match create_static_snapshot(options, &cli.target, &cli.output) {
        Ok(template_path) => {
            if !cli.silent {
                print_info_message(&format!("Saved snapshot to {}", template_path.display()));
            }
        }
        Err(error) => {
            print_error_message(&format!("Error: {error}"));
            process::exit(1);
        }
    }
}
