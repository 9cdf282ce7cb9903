/// Data layer: file names, tables, loading and export.
///
/// Architecture:
/// ```text
///  <size>-<table>-<algo>-<kind>.csv  (one directory)
///        │
///        ▼
///   ┌──────────┐
///   │ filename  │  name → (table, algorithm, kind)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  csv → Frame, fold retr means, group per algorithm
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ AlgorithmData │  algorithm → Vec<Frame>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Frame → Arrow RecordBatch / text tables
///   └──────────┘
/// ```

pub mod export;
pub mod filename;
pub mod loader;
pub mod model;
