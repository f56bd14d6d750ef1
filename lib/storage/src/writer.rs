use semvec_core::{Error, Result, Vector};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::codec::{VectorOutput, MAX_DIMENSION};

/// Marker string that opens every vector file
pub const DIMENSIONS_MARKER: &str = "-dimensions";

/// Streams a document vector file to disk
///
/// Records go to a sibling `*.tmp` file which only replaces the target on
/// [`finish`](DocVectorWriter::finish). If the writer is dropped first, the
/// temporary file is removed, so a partial run never leaves a file that
/// looks complete.
pub struct DocVectorWriter {
    out: Option<BufWriter<File>>,
    path: PathBuf,
    temp_path: PathBuf,
    dimension: Option<usize>,
    records: usize,
}

impl DocVectorWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let temp_path = temp_path_for(&path)?;

        let file = File::create(&temp_path).map_err(|e| Error::output(&path, e))?;

        Ok(Self {
            out: Some(BufWriter::with_capacity(64 * 1024, file)),
            path,
            temp_path,
            dimension: None,
            records: 0,
        })
    }

    /// Write the `-dimensions` header. Must come first, exactly once.
    pub fn write_header(&mut self, dimension: usize) -> Result<()> {
        if self.dimension.is_some() {
            return Err(Error::Format("header already written".to_string()));
        }
        let encoded = i32::try_from(dimension)
            .ok()
            .filter(|&d| d > 0 && dimension <= MAX_DIMENSION)
            .ok_or_else(|| Error::InvalidConfig(format!("unsupported dimension {}", dimension)))?;

        let path = &self.path;
        let out = self.out.as_mut().ok_or_else(|| closed(path))?;
        out.write_string(DIMENSIONS_MARKER)
            .and_then(|_| out.write_int32(encoded))
            .map_err(|e| Error::output(path, e))?;

        self.dimension = Some(dimension);
        Ok(())
    }

    pub fn write_record(&mut self, doc_id: &str, vector: &Vector) -> Result<()> {
        let dimension = self
            .dimension
            .ok_or_else(|| Error::Format("record written before header".to_string()))?;
        if vector.dim() != dimension {
            return Err(Error::InvalidDimension {
                expected: dimension,
                actual: vector.dim(),
            });
        }

        let path = &self.path;
        let out = self.out.as_mut().ok_or_else(|| closed(path))?;
        out.write_string(doc_id)
            .and_then(|_| out.write_float32_array(vector.as_slice()))
            .map_err(|e| Error::output(path, e))?;

        self.records += 1;
        Ok(())
    }

    /// Records written so far
    #[inline]
    pub fn records(&self) -> usize {
        self.records
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush, sync and move the file into place
    pub fn finish(mut self) -> Result<usize> {
        if self.dimension.is_none() {
            return Err(Error::Format("no header written".to_string()));
        }
        let out = self.out.take().ok_or_else(|| closed(&self.path))?;
        if let Err(e) = commit(out, &self.temp_path, &self.path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(e);
        }
        Ok(self.records)
    }
}

impl Drop for DocVectorWriter {
    fn drop(&mut self) {
        // Still holding the stream means finish() never completed
        if let Some(out) = self.out.take() {
            drop(out);
            if let Err(e) = fs::remove_file(&self.temp_path) {
                tracing::warn!("Failed to remove incomplete {:?}: {}", self.temp_path, e);
            } else {
                tracing::warn!(
                    "Discarded incomplete vector file {:?} after {} records",
                    self.path,
                    self.records
                );
            }
        }
    }
}

fn commit(out: BufWriter<File>, temp_path: &Path, path: &Path) -> Result<()> {
    let file = out
        .into_inner()
        .map_err(|e| Error::output(path, e.into_error()))?;
    file.sync_all().map_err(|e| Error::output(path, e))?;
    drop(file);
    fs::rename(temp_path, path).map_err(|e| Error::output(path, e))
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidConfig(format!("output path {:?} has no file name", path)))?;
    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn closed(path: &Path) -> Error {
    Error::output(
        path,
        std::io::Error::new(std::io::ErrorKind::BrokenPipe, "writer already closed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_moves_file_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docvectors.bin");

        let mut writer = DocVectorWriter::create(&path).unwrap();
        writer.write_header(2).unwrap();
        writer.write_record("d1", &Vector::new(vec![1.0, 0.0])).unwrap();
        assert!(!path.exists());
        assert!(dir.path().join("docvectors.bin.tmp").exists());

        assert_eq!(writer.finish().unwrap(), 1);
        assert!(path.exists());
        assert!(!dir.path().join("docvectors.bin.tmp").exists());

        // 4+11 marker, 4 dim, 4+2 id, 2*4 floats
        assert_eq!(fs::metadata(&path).unwrap().len(), 15 + 4 + 6 + 8);
    }

    #[test]
    fn test_drop_without_finish_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.bin");
        {
            let mut writer = DocVectorWriter::create(&path).unwrap();
            writer.write_header(2).unwrap();
            writer.write_record("d1", &Vector::zeros(2)).unwrap();
        }
        assert!(!path.exists());
        assert!(!dir.path().join("partial.bin.tmp").exists());
    }

    #[test]
    fn test_abandoned_write_leaves_existing_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docvectors.bin");
        fs::write(&path, b"old vectors").unwrap();
        {
            let mut writer = DocVectorWriter::create(&path).unwrap();
            writer.write_header(2).unwrap();
            writer.write_record("d1", &Vector::zeros(2)).unwrap();
            assert_eq!(fs::read(&path).unwrap(), b"old vectors");
        }
        assert_eq!(fs::read(&path).unwrap(), b"old vectors");
        assert!(!dir.path().join("docvectors.bin.tmp").exists());
    }

    #[test]
    fn test_record_dimension_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DocVectorWriter::create(dir.path().join("v.bin")).unwrap();
        writer.write_header(3).unwrap();

        let err = writer.write_record("x", &Vector::zeros(2)).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 3, actual: 2 }));
        assert_eq!(writer.records(), 0);
    }

    #[test]
    fn test_header_rules() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DocVectorWriter::create(dir.path().join("v.bin")).unwrap();
        assert!(writer.write_record("x", &Vector::zeros(2)).is_err());
        assert!(writer.write_header(0).is_err());
        assert!(writer.write_header(MAX_DIMENSION + 1).is_err());
        writer.write_header(2).unwrap();
        assert!(writer.write_header(2).is_err());
    }

    #[test]
    fn test_unwritable_path_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("v.bin");
        let err = DocVectorWriter::create(&path).err().unwrap();
        assert!(matches!(err, Error::Output { .. }));
    }
}
