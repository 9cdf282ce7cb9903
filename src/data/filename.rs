use std::fmt;

use crate::error::NameError;

/// Semantic fields encoded in a benchmark file name.
///
/// `0-open_ai-ns-retr.csv` → table `open_ai`, algorithm `ns`, kind `retr`.
/// The leading size segment is deprecated and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BenchmarkName {
    pub table: String,
    pub algorithm: String,
    pub kind: String,
}

impl BenchmarkName {
    /// Whether this file holds retrieval measurements rather than primary data.
    pub fn is_retrieval(&self, retrieval_kind: &str) -> bool {
        self.kind == retrieval_kind
    }

    /// The `(table, algorithm)` pair this file contributes to.
    pub fn key(&self) -> (String, String) {
        (self.table.clone(), self.algorithm.clone())
    }
}

impl fmt::Display for BenchmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.table, self.algorithm, self.kind)
    }
}

/// Parse `<size>-<table>-<algo>-<kind>.csv` out of a path.
///
/// Only the last `/`-separated segment is looked at. Table and algorithm
/// are not validated beyond their position. Every `.csv` in the kind
/// segment is removed, not just a trailing one.
pub fn parse_name(path: &str) -> Result<BenchmarkName, NameError> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let too_few = || NameError::TooFewSegments {
        name: file_name.to_string(),
    };

    let (_size, rest) = file_name.split_once('-').ok_or_else(too_few)?;
    let (table_algo, kind) = rest.rsplit_once('-').ok_or_else(too_few)?;
    let (table, algorithm) = table_algo.rsplit_once('-').ok_or_else(too_few)?;

    Ok(BenchmarkName {
        table: table.to_string(),
        algorithm: algorithm.to_string(),
        kind: kind.replace(".csv", ""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &BenchmarkName) -> (&str, &str, &str) {
        (&name.table, &name.algorithm, &name.kind)
    }

    #[test]
    fn parses_retrieval_name() {
        let name = parse_name("0-open_ai-ns-retr.csv").unwrap();
        assert_eq!(fields(&name), ("open_ai", "ns", "retr"));
        assert!(name.is_retrieval("retr"));
    }

    #[test]
    fn strips_leading_directories() {
        let name = parse_name("results/run-3/1024-webtables-dedup_hash-mem.csv").unwrap();
        assert_eq!(fields(&name), ("webtables", "dedup_hash", "mem"));
        assert!(!name.is_retrieval("retr"));
    }

    #[test]
    fn kind_without_extension_is_kept() {
        let name = parse_name("7-gittables-pfor-retr").unwrap();
        assert_eq!(name.kind, "retr");
    }

    #[test]
    fn csv_is_removed_anywhere_in_kind() {
        let name = parse_name("0-t-a-retr.csv.bak").unwrap();
        assert_eq!(name.kind, "retr.bak");
        assert!(!name.is_retrieval("retr"));
    }

    #[test]
    fn too_few_segments_fail() {
        for bad in ["open_ai.csv", "0-open_ai.csv", "0-ns-retr.csv", "dir/0-retr.csv"] {
            let err = parse_name(bad).unwrap_err();
            assert!(matches!(err, NameError::TooFewSegments { .. }), "{bad}");
        }
    }

    #[test]
    fn extra_hyphens_land_in_table() {
        // only the last split separates algorithm from table
        let name = parse_name("0-open-ai-ns-mem.csv").unwrap();
        assert_eq!(fields(&name), ("open-ai", "ns", "mem"));
    }
}
