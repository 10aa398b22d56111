// ABOUTME: Destinations for scraped records
// ABOUTME: RecordSink trait and an append-only JSONL writer with one file per record type

use crate::model::Record;
use crate::Result;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives records as scrapers produce them
pub trait RecordSink {
    fn emit(&mut self, record: Record) -> Result<()>;
}

impl RecordSink for Vec<Record> {
    fn emit(&mut self, record: Record) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Appends records as JSON lines to `<dir>/<type>.jsonl`
#[derive(Debug)]
pub struct JsonlSink {
    dir: PathBuf,
    writers: HashMap<&'static str, BufWriter<File>>,
    written: usize,
}

impl JsonlSink {
    /// Create the output directory if needed
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            writers: HashMap::new(),
            written: 0,
        })
    }

    /// Path records of type `kind` are written to
    pub fn path_for(&self, kind: &str) -> PathBuf {
        self.dir.join(format!("{kind}.jsonl"))
    }

    /// Flush every open file, returning the number of records written
    pub fn finish(mut self) -> Result<usize> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(self.written)
    }
}

impl RecordSink for JsonlSink {
    fn emit(&mut self, record: Record) -> Result<()> {
        let kind = record.kind();
        let writer = match self.writers.entry(kind) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(self.dir.join(format!("{kind}.jsonl")))?;
                entry.insert(BufWriter::new(file))
            }
        };
        serde_json::to_writer(&mut *writer, &record)?;
        writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}
