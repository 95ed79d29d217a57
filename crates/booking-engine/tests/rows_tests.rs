//! Tests for sheet row ingestion.

use booking_engine::rows::{parse_cell_time, read_rows, Row};
use booking_engine::BookingError;
use chrono::NaiveTime;

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn reads_positional_fields() {
    let row = Row::from_fields(
        3,
        &["9:00 AM", "10:00 AM", "CHEM 110", "Chem", "24", "CWNG_C110 Lecture Hall", "Laptop Cart"],
    )
    .unwrap();
    assert_eq!(row.line, 3);
    assert_eq!(row.start, Some(hm(9, 0)));
    assert_eq!(row.end, Some(hm(10, 0)));
    assert_eq!(row.space.as_deref(), Some("CWNG_C110 Lecture Hall"));
    assert_eq!(row.resource.as_deref(), Some("Laptop Cart"));
}

#[test]
fn short_rows_read_missing_fields_as_empty() {
    let row = Row::from_fields(1, &["", "", "", "", "", ""]).unwrap();
    assert_eq!(row, Row { line: 1, ..Row::default() });
}

#[test]
fn blank_cells_are_none() {
    let row = Row::from_fields(1, &["  ", "", "", "", "", " ", "Clicker Set"]).unwrap();
    assert!(row.start.is_none());
    assert!(row.space.is_none());
    assert_eq!(row.resource.as_deref(), Some("Clicker Set"));
}

#[test]
fn accepts_native_time_exports() {
    assert_eq!(parse_cell_time("14:05:00").unwrap(), hm(14, 5));
    assert_eq!(parse_cell_time("08:30").unwrap(), hm(8, 30));
    assert_eq!(parse_cell_time("2:05 PM").unwrap(), hm(14, 5));
}

#[test]
fn malformed_time_reports_line() {
    let err = Row::from_fields(7, &["9:00 AM", "ten o'clock", "", "", "", "A210", ""]).unwrap_err();
    match err {
        BookingError::Row { line, message } => {
            assert_eq!(line, 7);
            assert!(message.contains("ten o'clock"), "message: {}", message);
        }
        other => panic!("expected Row error, got {:?}", other),
    }
}

#[test]
fn read_rows_skips_header_and_numbers_lines() {
    let csv = "Start,End,Event,Org,Count,Space,Resource\n\
               9:00 AM,10:00 AM,CHEM,Chem,24,CWNG_C110,Laptop Cart\n\
               ,,,,,,Clicker Set\n";
    let rows = read_rows(csv.as_bytes(), 1).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[1].line, 3);
    assert_eq!(rows[1].resource.as_deref(), Some("Clicker Set"));
}

#[test]
fn read_rows_accepts_ragged_records() {
    let csv = "9:00 AM,10:00 AM,CHEM,Chem,24,CWNG_C110\n,,\n";
    let rows = read_rows(csv.as_bytes(), 0).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].resource.is_none());
    assert!(rows[1].start.is_none());
}

#[test]
fn one_bad_row_aborts_the_read() {
    let csv = "9:00 AM,10:00 AM,,,,A210,Laptop Cart\n\
               nine,10:00 AM,,,,A210,Laptop Cart\n\
               11:00 AM,12:00 PM,,,,A210,Laptop Cart\n";
    let err = read_rows(csv.as_bytes(), 0).unwrap_err();
    assert!(matches!(err, BookingError::Row { line: 2, .. }));
}

#[test]
fn header_text_fails_when_not_skipped() {
    let csv = "Start,End,Event,Org,Count,Space,Resource\n";
    assert!(read_rows(csv.as_bytes(), 0).is_err());
}

#[test]
fn read_rows_tolerates_legacy_encoded_cells() {
    // Windows-1252 non-breaking space (0xA0) is not valid UTF-8.
    let mut csv = b"9:00".to_vec();
    csv.push(0xA0);
    csv.extend_from_slice(b"AM,10:00 AM,CHEM,Chem,24,CWNG_C110");
    csv.push(0xA0);
    csv.extend_from_slice(b"Hall,Laptop Cart\n");
    let rows = read_rows(csv.as_slice(), 0).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].start, Some(hm(9, 0)));
    assert_eq!(rows[0].end, Some(hm(10, 0)));
    assert_eq!(rows[0].space.as_deref(), Some("CWNG_C110Hall"));
}
