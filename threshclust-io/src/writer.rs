//! File writers for clustering results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use threshclust_core::{Error as CoreError, Labeling, PointSet};

use crate::report::ClusteringReport;
use crate::Result;

/// Writer for clustering output.
///
/// Writes per-point labels as CSV or a full report as JSON.
pub struct LabelingWriter<W: Write = BufWriter<File>> {
    writer: W,
}

impl LabelingWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LabelingWriter<W> {
    /// Wraps an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one row per point: coordinates followed by the label.
    ///
    /// Header is `x0,x1,...,label`.
    ///
    /// # Errors
    /// Returns an error if the labeling does not cover `points` or writing fails.
    pub fn write_csv(&mut self, points: &PointSet, labeling: &Labeling) -> Result<()> {
        if points.len() != labeling.len() {
            return Err(CoreError::LengthMismatch {
                points: points.len(),
                labels: labeling.len(),
            }
            .into());
        }

        for d in 0..points.dim() {
            write!(self.writer, "x{d},")?;
        }
        writeln!(self.writer, "label")?;

        for (point, label) in points.iter().zip(labeling.labels()) {
            for value in point {
                write!(self.writer, "{value},")?;
            }
            writeln!(self.writer, "{label}")?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Writes a report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_json(&mut self, report: &ClusteringReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the inner sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use threshclust_core::ClusteringConfig;

    fn sample() -> (PointSet, Labeling) {
        let points = PointSet::from_rows(&[[1.5, 2.0], [10.25, -3.0]]).unwrap();
        (points, Labeling::new(vec![1, 2]))
    }

    #[test]
    fn test_write_csv() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = LabelingWriter::create(file.path()).unwrap();
        let (points, labeling) = sample();

        writer.write_csv(&points, &labeling).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "x0,x1,label\n1.5,2,1\n10.25,-3,2\n");
    }

    #[test]
    fn test_write_csv_length_mismatch() {
        let (points, _) = sample();
        let mut writer = LabelingWriter::new(Vec::new());
        let err = writer
            .write_csv(&points, &Labeling::new(vec![1]))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::CoreError(CoreError::LengthMismatch { points: 2, labels: 1 })
        ));
    }

    #[test]
    fn test_write_json() {
        let (points, labeling) = sample();
        let report = ClusteringReport::new(ClusteringConfig::default(), &points, labeling).unwrap();

        let mut writer = LabelingWriter::new(Vec::new());
        writer.write_json(&report).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["statistics"]["num_clusters"], 2);
        assert_eq!(value["config"]["order"], "forward");
        assert_eq!(value["labels"][1], 2);
    }
}
