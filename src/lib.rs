//! Loads inverted-index benchmark results from a directory of CSV files and
//! groups them per algorithm for graph rendering.

pub mod config;
pub mod data;
pub mod error;

pub use config::{Delimiter, LoaderConfig};
pub use data::export::render_pretty;
pub use data::filename::{parse_name, BenchmarkName};
pub use data::loader::{load_dir, load_frame};
pub use data::model::{AlgorithmData, Column, Frame, Value};
pub use error::{FrameError, LoadError, NameError};
