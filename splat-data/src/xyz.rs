//! Streaming XYZ point cloud writer.
//!
//! Each point becomes one `X Y Z R G B` line with a fixed number of decimals
//! for the position and integer color channels. There is no header.

use crate::types::XyzPoint;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Position decimals used unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 3;

/// Line-by-line XYZ writer over any byte sink.
pub struct XyzWriter<W: Write> {
    inner: BufWriter<W>,
    precision: usize,
    written: usize,
}

impl<W: Write> XyzWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            precision: DEFAULT_PRECISION,
            written: 0,
        }
    }

    /// Set the number of decimals written for each coordinate.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn write_point(&mut self, point: &XyzPoint) -> io::Result<()> {
        let p = self.precision;
        let [r, g, b] = point.color;
        writeln!(
            self.inner,
            "{:.*} {:.*} {:.*} {} {} {}",
            p, point.position.x, p, point.position.y, p, point.position.z, r, g, b
        )?;
        self.written += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn points_written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines and hand back the sink.
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

impl XyzWriter<File> {
    /// Create (or truncate) an XYZ file.
    pub fn create(path: &Path) -> io::Result<Self> {
        File::create(path).map(Self::new)
    }
}
