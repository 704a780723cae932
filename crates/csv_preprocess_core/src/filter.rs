use csv::{StringRecord, Terminator, WriterBuilder};
use csv_core::{ReadRecordResult, Reader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("object is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write CSV output: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
}

impl FilterSummary {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No header row, so nothing should be written.
    Empty,
    Filtered {
        body: Vec<u8>,
        summary: FilterSummary,
    },
}

/// A row survives only if none of its fields is the empty string.
///
/// Whitespace-only fields are content. A row shorter than the header is judged on the
/// fields it has, and a blank line (no fields at all) is kept.
pub fn row_is_complete(record: &StringRecord) -> bool {
    record.iter().all(|field| !field.is_empty())
}

/// Drops every data row with an empty field and re-encodes header plus survivors.
///
/// Parsing uses comma separation with doubled-quote escaping and permits records of
/// differing width. Blank lines are records with no fields, and a leading byte-order
/// mark stays part of the first header field. Output uses minimal quoting and CRLF
/// terminators.
pub fn filter_csv(bytes: &[u8]) -> Result<FilterOutcome, FilterError> {
    let text = std::str::from_utf8(bytes)?;
    let mut records = parse_records(text)?.into_iter();

    let header = match records.next() {
        Some(record) => record,
        None => return Ok(FilterOutcome::Empty),
    };

    let mut body = Vec::with_capacity(bytes.len());
    write_record(&mut body, &header)?;

    let mut summary = FilterSummary::default();
    for record in records {
        summary.rows_read += 1;
        if row_is_complete(&record) {
            write_record(&mut body, &record)?;
            summary.rows_kept += 1;
        }
    }

    Ok(FilterOutcome::Filtered { body, summary })
}

fn write_record(body: &mut Vec<u8>, record: &StringRecord) -> Result<(), FilterError> {
    // csv writes a zero-field record as `""`; a blank line has to stay blank.
    if record.is_empty() {
        body.extend_from_slice(b"\r\n");
        return Ok(());
    }

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(body);
    writer.write_record(record)?;
    writer.flush()?;
    Ok(())
}

fn parse_records(text: &str) -> Result<Vec<StringRecord>, FilterError> {
    let mut records = Vec::new();
    for line in split_lines(text) {
        if line.is_empty() {
            records.push(StringRecord::new());
        } else {
            parse_line(line, &mut records)?;
        }
    }
    Ok(records)
}

#[derive(Clone, Copy)]
enum LineState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Splits text on newlines that sit outside quoted fields, dropping one `\r` before
/// each. A final newline does not open another line.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut state = LineState::FieldStart;
    let mut start = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        state = match (state, byte) {
            (LineState::Quoted, b'"') => LineState::QuoteInQuoted,
            (LineState::Quoted, _) => LineState::Quoted,
            (LineState::FieldStart, b'"') | (LineState::QuoteInQuoted, b'"') => {
                LineState::Quoted
            }
            (_, b',') => LineState::FieldStart,
            (_, b'\n') => {
                lines.push(strip_carriage_return(&text[start..index]));
                start = index + 1;
                LineState::FieldStart
            }
            _ => LineState::Unquoted,
        };
    }

    if start < bytes.len() {
        lines.push(strip_carriage_return(&text[start..]));
    }
    lines
}

fn strip_carriage_return(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn parse_line(line: &str, records: &mut Vec<StringRecord>) -> Result<(), FilterError> {
    let mut reader = Reader::new();
    let mut input = line.as_bytes();
    let mut output = vec![0u8; line.len().max(1)];
    let mut ends = vec![0usize; line.len() + 1];
    let (mut output_len, mut ends_len) = (0, 0);

    loop {
        let (result, nin, nout, nend) =
            reader.read_record(input, &mut output[output_len..], &mut ends[ends_len..]);
        input = &input[nin..];
        output_len += nout;
        ends_len += nend;

        match result {
            ReadRecordResult::InputEmpty => {}
            ReadRecordResult::OutputFull => output.resize(output.len() * 2, 0),
            ReadRecordResult::OutputEndsFull => ends.resize(ends.len() * 2, 0),
            ReadRecordResult::Record => {
                let mut record = StringRecord::new();
                let mut field_start = 0;
                for &field_end in &ends[..ends_len] {
                    record.push_field(std::str::from_utf8(&output[field_start..field_end])?);
                    field_start = field_end;
                }
                records.push(record);
                output_len = 0;
                ends_len = 0;
            }
            ReadRecordResult::End => return Ok(()),
        }
    }
}
