use clap::Parser;
use follow_checker_backend::services::{comparator, usernames};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compare a followers export against a following export offline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Followers list (.json export or one-username-per-row CSV)
    #[arg(long)]
    followers: PathBuf,

    /// Following list (.json export or one-username-per-row CSV)
    #[arg(long)]
    following: PathBuf,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

fn load(path: &Path) -> anyhow::Result<HashSet<String>> {
    let list = usernames::read_username_list(path)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    Ok(list.into_iter().collect())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compare=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let followers = load(&args.followers)?;
    let following = load(&args.following)?;
    info!(
        "🔍 Comparing {} followers against {} following",
        followers.len(),
        following.len()
    );

    let comparison = comparator::compare(&followers, &following);
    let output = if args.pretty {
        serde_json::to_string_pretty(&comparison)?
    } else {
        serde_json::to_string(&comparison)?
    };
    println!("{}", output);

    Ok(())
}
