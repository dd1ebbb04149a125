//! threshclust-io: Point sources and result sinks for threshclust.
//!
//! This crate reads points from the parenthesized text format used by the
//! desktop front end, generates random point sets, and writes clustering
//! results as CSV or JSON.
//!

mod error;
pub mod generator;
pub mod parser;
mod report;
mod writer;

pub use error::{Error, Result};
pub use generator::{generate_uniform, generate_uniform_in};
pub use parser::{parse_points, read_points};
pub use report::ClusteringReport;
pub use writer::LabelingWriter;
