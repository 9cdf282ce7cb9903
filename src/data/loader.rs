use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::filename::{parse_name, BenchmarkName};
use super::model::{AlgorithmData, Column, Frame, Value};
use crate::config::LoaderConfig;
use crate::error::{LoadError, NameError};

// ---------------------------------------------------------------------------
// Directory loader
// ---------------------------------------------------------------------------

/// Load every benchmark file in `dir` and group the results per algorithm.
///
/// Files are visited in file-name order. Primary measurements are collected
/// first; retrieval files are folded in afterwards, so a `retr` file does not
/// have to sort after its primary. Within an algorithm, frames keep the order
/// in which their table first appeared. Each primary frame gains:
/// * `config.retrieval_column` – mean of the matching retrieval file, if any
/// * `config.source_column`    – the table name it was measured on
///
/// The first error aborts the scan; no partial result is returned.
pub fn load_dir(dir: &Path, config: &LoaderConfig) -> Result<AlgorithmData, LoadError> {
    let paths = list_sorted(dir)?;

    let mut primaries: BTreeMap<(String, String), Frame> = BTreeMap::new();
    // first-seen order of primary keys
    let mut order: Vec<(String, String)> = Vec::new();
    let mut retrievals: Vec<(BenchmarkName, PathBuf, Frame)> = Vec::new();

    for path in paths {
        let name = parse_path(&path)?;
        let frame = load_frame(&path, config)?;
        debug!(
            "loaded {} ({} rows x {} columns) from {}",
            name,
            frame.num_rows(),
            frame.num_columns(),
            path.display()
        );

        if name.is_retrieval(&config.retrieval_kind) {
            retrievals.push((name, path, frame));
        } else if primaries.insert(name.key(), frame).is_some() {
            warn!("{} replaces earlier primary data for {name}", path.display());
        } else {
            order.push(name.key());
        }
    }

    for (name, path, frame) in retrievals {
        let mean = frame.mean().map_err(|source| LoadError::Frame {
            path: path.clone(),
            source,
        })?;
        let primary = primaries
            .get_mut(&name.key())
            .ok_or_else(|| LoadError::MissingPrimary {
                table: name.table.clone(),
                algorithm: name.algorithm.clone(),
                path: path.clone(),
            })?;
        primary.set_scalar(&config.retrieval_column, Value::Float(mean));
    }

    let mut per_algorithm = AlgorithmData::new();
    for key in order {
        let Some(mut frame) = primaries.remove(&key) else {
            continue;
        };
        let (table, algorithm) = key;
        frame.set_scalar(&config.source_column, Value::String(table));
        per_algorithm.entry(algorithm).or_default().push(frame);
    }

    info!(
        "loaded {} algorithms ({} tables) from {}",
        per_algorithm.len(),
        per_algorithm.values().map(Vec::len).sum::<usize>(),
        dir.display()
    );
    Ok(per_algorithm)
}

/// Regular files in `dir`, sorted by name. Subdirectories are skipped.
fn list_sorted(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| LoadError::io(&path, e))?;
        if file_type.is_dir() {
            debug!("skipping directory {}", path.display());
            continue;
        }
        paths.push(path);
    }

    paths.sort();
    Ok(paths)
}

fn parse_path(path: &Path) -> Result<BenchmarkName, NameError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| NameError::NoFileName {
            path: path.to_path_buf(),
        })?;
    parse_name(file_name)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one sample per row.
///
/// The benchmark tool writes `;`-separated files such as
/// `cells;bytes;insert_duration_nanosec`; see [`Delimiter`](crate::config::Delimiter)
/// for how the separator is picked. Cell types are guessed per cell.
pub fn load_frame(path: &Path, config: &LoaderConfig) -> Result<Frame, LoadError> {
    // bytes, not a String: invalid UTF-8 is reported by the CSV reader
    let raw = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let header = raw.split(|&b| b == b'\n').next().unwrap_or_default();
    let delimiter = config.delimiter.resolve(header);

    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(raw.as_slice());

    let mut columns: Vec<Column> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| Column::new(h, Vec::new()))
        .collect();

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        for (col, field) in columns.iter_mut().zip(record.iter()) {
            col.values.push(Value::guess(field));
        }
    }

    Frame::from_columns(columns).map_err(|source| LoadError::Frame {
        path: path.to_path_buf(),
        source,
    })
}
