use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// (table, distinct cells) – sizes loosely follow the real corpora
const TABLES: [(&str, u64); 3] = [("open_ai", 120_000), ("webtables", 450_000), ("gittables", 80_000)];

/// (algorithm, bytes per cell, retrieval ns)
const ALGORITHMS: [(&str, f64, f64); 4] = [
    ("baseline", 48.0, 95.0),
    ("dedup_hash", 31.0, 110.0),
    ("ns", 12.5, 240.0),
    ("pfor", 9.0, 310.0),
];

const RETRIEVALS: usize = 2000;

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_results"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);
    let size_noise = Normal::new(1.0, 0.02)?;
    let insert_ns_per_cell = Normal::new(850.0, 40.0)?;
    let mut files = 0;

    for (size, &(table, cells)) in TABLES.iter().enumerate() {
        for &(algorithm, bytes_per_cell, retrieval_ns) in &ALGORITHMS {
            let stem = format!("{size}-{table}-{algorithm}");

            // Primary file: one row per insertion run, as the measuring tool writes it.
            let mem_path = out_dir.join(format!("{stem}-mem.csv"));
            let mut mem = writer(&mem_path)?;
            mem.write_record(["cells", "bytes", "insert_duration_nanosec"])?;
            let bytes = (cells as f64 * bytes_per_cell * size_noise.sample(&mut rng)) as u64;
            let insert_ns = (cells as f64 * insert_ns_per_cell.sample(&mut rng)) as u64;
            mem.write_record([cells.to_string(), bytes.to_string(), insert_ns.to_string()])?;
            mem.flush()?;

            let retr_path = out_dir.join(format!("{stem}-retr.csv"));
            let mut retr = writer(&retr_path)?;
            retr.write_record(["retrieval_duration_nanosec"])?;
            let lookup = Normal::new(retrieval_ns, retrieval_ns * 0.1)?;
            for _ in 0..RETRIEVALS {
                let ns = lookup.sample(&mut rng).max(1.0) as u64;
                retr.write_record([ns.to_string()])?;
            }
            retr.flush()?;

            log::debug!("wrote {} and {}", mem_path.display(), retr_path.display());
            files += 2;
        }
    }

    println!("Wrote {files} benchmark files to {}", out_dir.display());
    Ok(())
}
