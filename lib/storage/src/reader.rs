use semvec_core::{Error, Result, Vector};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::codec::{VectorInput, MAX_DIMENSION};
use crate::writer::DIMENSIONS_MARKER;

/// Sequential reader for files produced by [`DocVectorWriter`](crate::DocVectorWriter)
///
/// Yields `(id, vector)` records in file order.
pub struct DocVectorReader<R = BufReader<File>> {
    input: R,
    dimension: usize,
}

impl DocVectorReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read> DocVectorReader<R> {
    /// Wrap a stream and consume its header
    pub fn from_reader(mut input: R) -> Result<Self> {
        let marker = input.read_string().map_err(format_error)?;
        if marker != DIMENSIONS_MARKER {
            return Err(Error::Format(format!(
                "expected {:?} header, found {:?}",
                DIMENSIONS_MARKER, marker
            )));
        }
        let dimension = input.read_int32().map_err(format_error)?;
        if dimension <= 0 || dimension as usize > MAX_DIMENSION {
            return Err(Error::Format(format!("invalid dimension {}", dimension)));
        }

        Ok(Self {
            input,
            dimension: dimension as usize,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Next record, `None` at a clean end of file
    pub fn read_record(&mut self) -> Result<Option<(String, Vector)>> {
        let Some(id) = self.input.read_string_or_eof().map_err(format_error)? else {
            return Ok(None);
        };
        let data = self
            .input
            .read_float32_array(self.dimension)
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => {
                    Error::Format(format!("truncated vector for record {:?}", id))
                }
                _ => Error::Io(e),
            })?;
        Ok(Some((id, Vector::new(data))))
    }
}

impl<R: Read> Iterator for DocVectorReader<R> {
    type Item = Result<(String, Vector)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

fn format_error(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => Error::Format(e.to_string()),
        _ => Error::Io(e),
    }
}
