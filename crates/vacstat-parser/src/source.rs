use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::errors::SourceError;
use crate::model::{HeaderIndex, RawRecord};

/// Streams structurally valid rows out of a delimited input. Rows with
/// the wrong field count or any empty field are skipped, not surfaced;
/// `skipped_rows` reports how many were dropped.
pub struct RecordSource<R: Read> {
    reader: csv::Reader<R>,
    header: HeaderIndex,
    buffer: StringRecord,
    skipped: usize,
}

impl RecordSource<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }
}

impl<R: Read> RecordSource<R> {
    pub fn from_reader(input: R) -> Result<Self, SourceError> {
        // flexible: rows with a deviating field count must reach the
        // arity check instead of erroring inside the csv reader. The
        // reader strips a leading UTF-8 BOM on its own.
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);

        let header_record = reader.headers()?.clone();
        if header_record.is_empty() {
            return Err(SourceError::EmptyInput);
        }
        let header = HeaderIndex::from_header(&header_record)?;

        Ok(Self {
            reader,
            header,
            buffer: StringRecord::new(),
            skipped: 0,
        })
    }

    /// Structurally malformed rows dropped so far.
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }
}

impl<R: Read> Iterator for RecordSource<R> {
    type Item = Result<RawRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.buffer) {
                Ok(false) => return None,
                Ok(true) => match self.header.extract(&self.buffer) {
                    Some(record) => return Some(Ok(record)),
                    None => {
                        self.skipped += 1;
                    }
                },
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}
