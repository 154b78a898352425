//! Row packing for the 12-column form grid.
//!
//! Entries flow left to right in document order. An entry whose width
//! would push the running row total past `GRID_COLUMNS` starts a new row,
//! unless the row is still empty. Row boundaries are always recomputed
//! from the start of the document; nothing is cached between edits.

use crate::model::Schema;
use std::ops::Range;

/// Width of one visual row, in grid units.
pub const GRID_COLUMNS: u32 = 12;

/// Column widths of the schema entries, in document order.
pub fn spans(schema: &Schema) -> Vec<u8> {
    schema.iter().map(|(_, entry)| entry.column_span()).collect()
}

/// Index of the last entry in the row that contains `target`.
///
/// First pass: scan from the start up to `target` to find where its row
/// begins. Second pass: scan from that row start until the next entry
/// would overflow the row.
pub fn last_index_of_row(spans: &[u8], target: usize) -> usize {
    let mut running = 0u32;
    let mut row_start = 0usize;

    for (i, &span) in spans.iter().enumerate().take(target.saturating_add(1)) {
        let span = u32::from(span);
        if running + span > GRID_COLUMNS && running > 0 {
            row_start = i;
            running = span;
        } else {
            running += span;
        }
    }

    let mut last = target;
    running = 0;
    for (i, &span) in spans.iter().enumerate().skip(row_start) {
        let span = u32::from(span);
        if running + span > GRID_COLUMNS && running > 0 {
            break;
        }
        running += span;
        last = i;
    }

    log::trace!("row of #{target} starts at #{row_start}, ends at #{last}");
    last
}

/// Every row as a half-open index range, in document order.
pub fn rows(spans: &[u8]) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0usize;
    let mut running = 0u32;

    for (i, &span) in spans.iter().enumerate() {
        let span = u32::from(span);
        if running + span > GRID_COLUMNS && running > 0 {
            rows.push(start..i);
            start = i;
            running = span;
        } else {
            running += span;
        }
    }
    if start < spans.len() {
        rows.push(start..spans.len());
    }
    rows
}
