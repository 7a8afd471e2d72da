// src/export/mod.rs

mod csv;
mod model;

pub use self::csv::write_csv;
pub use model::{EntryExport, HEADERS};
pub(crate) use model::entry_to_row;

use crate::errors::AppResult;
use crate::models::TimeEntry;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// A byte sink that is only ever appended to. The export needs to know
/// whether anything was written before so the header lands exactly once.
pub trait AppendSink: Write {
    fn is_empty(&mut self) -> io::Result<bool>;
}

impl AppendSink for File {
    fn is_empty(&mut self) -> io::Result<bool> {
        Ok(self.metadata()?.len() == 0)
    }
}

impl AppendSink for Vec<u8> {
    fn is_empty(&mut self) -> io::Result<bool> {
        Ok(self.as_slice().is_empty())
    }
}

impl<S: AppendSink + ?Sized> AppendSink for &mut S {
    fn is_empty(&mut self) -> io::Result<bool> {
        (**self).is_empty()
    }
}

/// Opens `path` for create+append and writes the entries as CSV.
/// Returns the number of data rows written.
pub fn append_csv_file(path: &Path, entries: &[TimeEntry]) -> AppResult<usize> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write_csv(&mut file, entries)
}
