use anyhow::Result;
use std::{env, path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use volume_pricing::convert_and_write;

const DEFAULT_INPUT: &str = "data/test_data.txt";
const DEFAULT_OUTPUT: &str = "output/output.csv";
const USAGE: &str = "Usage: volume-pricing [INPUT] [OUTPUT]\n\
    \n  INPUT   pricing feed, one product per line (default: data/test_data.txt)\
    \n  OUTPUT  importer CSV to write (default: output/output.csv)";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    // ─── 2) resolve paths ────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let first = args.next();
    if matches!(first.as_deref(), Some("-h") | Some("--help")) {
        println!("{}", USAGE);
        return Ok(());
    }
    let input = PathBuf::from(first.unwrap_or_else(|| DEFAULT_INPUT.into()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.into()));
    if args.next().is_some() {
        anyhow::bail!("too many arguments\n{}", USAGE);
    }

    // ─── 3) convert ──────────────────────────────────────────────────
    let start = Instant::now();
    convert_and_write(&input, &output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        elapsed = ?start.elapsed(),
        "done"
    );
    Ok(())
}
