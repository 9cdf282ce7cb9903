use std::path::Path;

use anyhow::{Context, Result};
use bench_loader::{load_dir, render_pretty, LoaderConfig};

const USAGE: &str = "usage: bench-loader <results-dir> [--json]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().context(USAGE)?;
    let as_json = args.any(|a| a == "--json");

    let config = match std::env::var_os("BENCH_LOADER_CONFIG") {
        Some(path) => LoaderConfig::from_json_file(Path::new(&path))?,
        None => LoaderConfig::default(),
    };
    log::debug!("loader config: {config:?}");

    let data = load_dir(Path::new(&dir), &config)
        .with_context(|| format!("loading benchmark results from {dir}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&data).context("encoding JSON")?);
    } else {
        print!("{}", render_pretty(&data).context("rendering tables")?);
    }
    Ok(())
}
