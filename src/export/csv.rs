use crate::errors::AppResult;
use crate::export::AppendSink;
use crate::export::model::{EntryExport, HEADERS};
use crate::models::TimeEntry;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Appends every entry to `sink` as one CSV row, preceded by the header
/// only when the sink was empty before the call.
///
/// Fields are quoted only when they contain a delimiter, quote or newline,
/// so plain task names come out verbatim.
pub fn write_csv<S: AppendSink + ?Sized>(sink: &mut S, entries: &[TimeEntry]) -> AppResult<usize> {
    let write_header = sink.is_empty()?;

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink);

    if write_header {
        wtr.write_record(HEADERS)?;
    }

    for e in entries {
        wtr.serialize(EntryExport::from(e))?;
    }

    wtr.flush()?;
    Ok(entries.len())
}
