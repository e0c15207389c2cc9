//! File-backed fact sink

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use filmfact_domain::FactSink;

use crate::IoError;

/// Buffered fact writer that truncates its target file on creation
///
/// One sink per run. Call [`flush`](FileFactSink::flush) when the run
/// finishes; dropping the sink flushes too but cannot report failures.
pub struct FileFactSink {
    writer: BufWriter<File>,
}

impl FileFactSink {
    /// Create the output file, truncating any previous content
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filmfact_io::FileFactSink;
    ///
    /// let sink = FileFactSink::create("facts.pl").unwrap();
    /// ```
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffered facts to disk
    pub fn flush(&mut self) -> Result<(), IoError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl FactSink for FileFactSink {
    type Error = IoError;

    fn append(&mut self, lines: &str) -> Result<(), Self::Error> {
        self.writer.write_all(lines.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_appends_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("facts.pl");
        let mut sink = FileFactSink::create(&path).unwrap();
        sink.append("work(t1).\n").unwrap();
        sink.append("year(t1, 1976).\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "work(t1).\nyear(t1, 1976).\n"
        );
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("facts.pl");
        fs::write(&path, "stale(t1).\n").unwrap();
        let mut sink = FileFactSink::create(&path).unwrap();
        sink.append("work(t2).\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "work(t2).\n");
    }
}
