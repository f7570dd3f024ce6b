//! Tolerant row/cell scanning over HTML-like table markup.
//!
//! The scanner only knows about `<tr>` and `<td>`. Everything else is
//! treated as transparent markup whose text belongs to the enclosing cell.
//! Missing or mismatched end tags are accepted the way browsers accept
//! them: a new `<td>` closes the open cell and a new `<tr>` closes the open
//! row. A `<table>` nested inside a cell is transparent as well, so its rows
//! and cells contribute text to the enclosing cell.

use quick_xml::Reader;
use quick_xml::errors::Error;
use quick_xml::events::Event;
use tracing::{debug, warn};

/// One table row with the visible text of each of its cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based position of the row among all `<tr>` elements.
    pub index: usize,
    pub cells: Vec<String>,
}

/// Result of scanning a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableScan {
    pub rows: Vec<TableRow>,
    /// Byte offset of a syntax error that ended the scan early.
    pub truncated_at: Option<u64>,
}

#[derive(Default)]
struct RowBuilder {
    rows: Vec<TableRow>,
    row: Option<TableRow>,
    cell: Option<String>,
    pending: String,
    seen: usize,
    /// Number of currently open `<table>` elements.
    tables: usize,
    /// Table depth at which the open row was started.
    row_level: usize,
}

impl RowBuilder {
    /// Move the pending text fragment into the open cell.
    fn flush_text(&mut self) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_str(self.pending.trim());
        }
        self.pending.clear();
    }

    fn close_cell(&mut self) {
        self.flush_text();
        if let Some(cell) = self.cell.take()
            && let Some(row) = self.row.as_mut()
        {
            row.cells.push(cell);
        }
    }

    fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.row.take() {
            self.rows.push(row);
        }
    }

    fn open_row(&mut self) {
        self.close_row();
        self.seen += 1;
        self.row_level = self.tables;
        self.row = Some(TableRow {
            index: self.seen,
            cells: Vec::new(),
        });
    }

    fn open_cell(&mut self) {
        self.close_cell();
        if self.row.is_some() {
            self.cell = Some(String::new());
        }
    }

    /// Inside a table that was opened within the current cell.
    fn nested(&self) -> bool {
        self.cell.is_some() && self.tables > self.row_level
    }

    fn start(&mut self, name: &[u8]) {
        if name.eq_ignore_ascii_case(b"table") {
            self.flush_text();
            self.tables += 1;
        } else if self.nested() {
            self.flush_text();
        } else if name.eq_ignore_ascii_case(b"tr") {
            self.open_row();
        } else if name.eq_ignore_ascii_case(b"td") {
            self.open_cell();
        } else {
            self.flush_text();
        }
    }

    fn empty(&mut self, name: &[u8]) {
        if name.eq_ignore_ascii_case(b"table") {
            self.flush_text();
        } else {
            self.start(name);
        }
    }

    fn end(&mut self, name: &[u8]) {
        if name.eq_ignore_ascii_case(b"table") {
            if self.nested() {
                self.flush_text();
            } else {
                self.close_row();
            }
            self.tables = self.tables.saturating_sub(1);
        } else if self.nested() {
            self.flush_text();
        } else if name.eq_ignore_ascii_case(b"tr") {
            self.close_row();
        } else if name.eq_ignore_ascii_case(b"td") {
            self.close_cell();
        } else {
            self.flush_text();
        }
    }

    fn text(&mut self, raw: &[u8]) {
        if self.cell.is_some() {
            self.pending.push_str(&String::from_utf8_lossy(raw));
        }
    }

    fn reference(&mut self, name: &str) {
        if self.cell.is_none() {
            return;
        }
        match resolve_reference(name) {
            Some(ch) => self.pending.push(ch),
            None => {
                self.pending.push('&');
                self.pending.push_str(name);
                self.pending.push(';');
            }
        }
    }

    fn finish(mut self) -> Vec<TableRow> {
        self.close_row();
        self.rows
    }
}

/// Resolve a character or entity reference (the part between `&` and `;`).
fn resolve_reference(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "shy" => Some('\u{ad}'),
        "copy" => Some('\u{a9}'),
        "reg" => Some('\u{ae}'),
        "trade" => Some('\u{2122}'),
        "sect" => Some('\u{a7}'),
        "para" => Some('\u{b6}'),
        "deg" => Some('\u{b0}'),
        "middot" => Some('\u{b7}'),
        "bull" => Some('\u{2022}'),
        "hellip" => Some('\u{2026}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        "laquo" => Some('\u{ab}'),
        "raquo" => Some('\u{bb}'),
        "times" => Some('\u{d7}'),
        "divide" => Some('\u{f7}'),
        "plusmn" => Some('\u{b1}'),
        "euro" => Some('\u{20ac}'),
        _ => None,
    }
}

/// Split `markup` into table rows.
///
/// Never fails. A lone `&` is kept as text and other ill-formed constructs
/// are skipped. A syntax error the reader cannot get past ends the scan and
/// is reported through [`TableScan::truncated_at`].
pub fn scan_rows(markup: &str) -> TableScan {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;

    let mut builder = RowBuilder::default();
    let mut truncated_at = None;
    let mut last_skipped = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => builder.start(tag.local_name().into_inner()),
            Ok(Event::Empty(tag)) => builder.empty(tag.local_name().into_inner()),
            Ok(Event::End(tag)) => builder.end(tag.local_name().into_inner()),
            Ok(Event::Text(text)) => builder.text(&text),
            Ok(Event::CData(text)) => builder.text(&text),
            Ok(Event::GeneralRef(reference)) => {
                builder.reference(&String::from_utf8_lossy(&reference));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(Error::IllFormed(error))
                if reader.buffer_position() > reader.error_position()
                    && last_skipped != Some(reader.error_position()) =>
            {
                let position = reader.error_position();
                debug!(position, %error, "skipping ill-formed markup");
                last_skipped = Some(position);
            }
            Err(error) => {
                let position = reader.error_position();
                warn!(position, %error, "markup error, keeping rows scanned so far");
                truncated_at = Some(position);
                break;
            }
        }
    }
    let rows = builder.finish();
    debug!(rows = rows.len(), "scanned table rows");
    TableScan { rows, truncated_at }
}
