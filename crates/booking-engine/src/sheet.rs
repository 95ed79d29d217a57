//! Output sinks for laid-out sheet cells.
//!
//! - [`CsvSheet`] renders a fixed A–O grid. CSV has no styling, so
//!   highlight styles are dropped.
//! - [`JsonSheet`] keeps every cell write, style included.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::layout::{CellStyle, CellWrite, FIRST_COLUMN, LAST_COLUMN};

/// Receives cell writes and persists them on `finish`.
pub trait SheetSink {
    fn write_cell(&mut self, cell: &CellWrite) -> Result<()>;

    /// Flush everything to the underlying writer. Must be called once.
    fn finish(&mut self) -> Result<()>;
}

/// Write every cell and finish the sink.
pub fn write_sheet(sink: &mut dyn SheetSink, cells: &[CellWrite]) -> Result<()> {
    for cell in cells {
        sink.write_cell(cell)?;
    }
    sink.finish()
}

pub struct CsvSheet<W: Write> {
    writer: csv::Writer<W>,
    grid: BTreeMap<u32, BTreeMap<char, String>>,
    highlighted: usize,
}

impl<W: Write> CsvSheet<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            grid: BTreeMap::new(),
            highlighted: 0,
        }
    }
}

impl<W: Write> SheetSink for CsvSheet<W> {
    fn write_cell(&mut self, cell: &CellWrite) -> Result<()> {
        if cell.style == CellStyle::Highlight {
            self.highlighted += 1;
        }
        self.grid
            .entry(cell.row)
            .or_default()
            .insert(cell.column, cell.value.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let last_row = self.grid.keys().next_back().copied().unwrap_or(0);
        for row in 1..=last_row {
            let cells = self.grid.get(&row);
            let record: Vec<&str> = (FIRST_COLUMN..=LAST_COLUMN)
                .map(|col| {
                    cells
                        .and_then(|c| c.get(&col))
                        .map_or("", String::as_str)
                })
                .collect();
            self.writer.write_record(&record)?;
        }
        self.writer.flush()?;
        tracing::debug!(
            rows = last_row,
            dropped_styles = self.highlighted,
            "wrote csv sheet"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    cells: &'a [CellWrite],
}

pub struct JsonSheet<W: Write> {
    inner: W,
    cells: Vec<CellWrite>,
}

impl<W: Write> JsonSheet<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            cells: Vec::new(),
        }
    }
}

impl<W: Write> SheetSink for JsonSheet<W> {
    fn write_cell(&mut self, cell: &CellWrite) -> Result<()> {
        self.cells.push(cell.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(
            &mut self.inner,
            &JsonDocument {
                cells: &self.cells,
            },
        )?;
        self.inner.flush()?;
        Ok(())
    }
}
