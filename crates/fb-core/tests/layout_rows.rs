//! Integration tests: row packing over real schemas (fb-core).

use fb_core::catalog::FieldKind;
use fb_core::id::FieldId;
use fb_core::layout::{GRID_COLUMNS, last_index_of_row, rows, spans};
use fb_core::model::Schema;
use fb_core::transport;

fn schema_with_widths(widths: &[u8]) -> Schema {
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let key = FieldId::intern(&format!("row_field_{i}"));
            let mut entry = FieldKind::Text.default_entry(key, key.as_str());
            entry.set_column_span(*width);
            (key, entry)
        })
        .collect()
}

#[test]
fn defaults_are_full_width_rows() {
    let schema = schema_with_widths(&[12, 12, 12]);
    let spans = spans(&schema);
    assert_eq!(rows(&spans).len(), 3);
    assert_eq!(last_index_of_row(&spans, 1), 1);
}

#[test]
fn split_row_packs_together() {
    let schema = schema_with_widths(&[6, 6, 4, 4, 4, 12]);
    let spans = spans(&schema);
    assert_eq!(last_index_of_row(&spans, 0), 1);
    assert_eq!(last_index_of_row(&spans, 3), 4);
    assert_eq!(last_index_of_row(&spans, 5), 5);
    for row in rows(&spans) {
        let total: u32 = row.map(|i| u32::from(spans[i])).sum();
        assert!(total <= GRID_COLUMNS);
    }
}

#[test]
fn missing_columns_count_as_full_width() {
    let state = transport::from_json_str(
        r#"{"schema":{"a":{"type":"text","columns":{"container":6}},"b":{"type":"text"},"c":{"type":"text","columns":{"container":6}}}}"#,
    )
    .unwrap()
    .unwrap();
    let spans = spans(&state.schema);
    assert_eq!(last_index_of_row(&spans, 0), 0);
    assert_eq!(last_index_of_row(&spans, 1), 1);
    assert_eq!(last_index_of_row(&spans, 2), 2);
}
