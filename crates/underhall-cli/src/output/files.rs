use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::io::Write;
use std::path::Path;
use underhall_core::error::UnderhallError;
use underhall_core::model::{Grid, ProcessedDocument};

/// Persist a processed document as `<stem>.txt`, `<stem>.json`,
/// `<stem>_table_<n>.csv` (1-based), `<stem>.xlsx` (one `Table_<n>` sheet per
/// table, only when there are tables) and `<stem>_maintenance.json`.
///
/// Returns the number of files written.
pub fn write_document(
    dir: &Path,
    stem: &str,
    doc: &ProcessedDocument,
) -> Result<usize, UnderhallError> {
    let mut written = 0;

    std::fs::write(dir.join(format!("{stem}.txt")), &doc.text)?;
    std::fs::write(
        dir.join(format!("{stem}.json")),
        serde_json::to_string_pretty(doc)?,
    )?;
    written += 2;

    for (i, grid) in doc.tables.iter().enumerate() {
        let file = std::fs::File::create(dir.join(format!("{stem}_table_{}.csv", i + 1)))?;
        write_csv(grid, file)?;
        written += 1;
    }

    if doc.tables.is_empty() {
        log::warn!("no tables in '{}', skipping workbook", stem);
    } else {
        write_xlsx(&doc.tables, &dir.join(format!("{stem}.xlsx")))?;
        written += 1;
    }

    std::fs::write(
        dir.join(format!("{stem}_maintenance.json")),
        serde_json::to_string_pretty(&doc.maintenance)?,
    )?;
    written += 1;

    log::debug!("wrote {} table(s) for '{}'", doc.tables.len(), stem);
    Ok(written)
}

/// Write a grid as CSV, one record per row.
pub fn write_csv<W: Write>(grid: &Grid, writer: W) -> Result<(), UnderhallError> {
    let mut wtr = csv::WriterBuilder::new().flexible(false).from_writer(writer);
    for row in grid.rows() {
        wtr.write_record(row).map_err(std::io::Error::from)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write grids to one workbook, sheet `Table_<n>` per grid. The first row of
/// a multi-row grid is set in bold as its header.
pub fn write_xlsx(grids: &[Grid], path: &Path) -> Result<(), UnderhallError> {
    build_workbook(grids, path).map_err(|e| {
        UnderhallError::Io(std::io::Error::other(format!(
            "failed to write {}: {e}",
            path.display()
        )))
    })
}

fn build_workbook(grids: &[Grid], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for (i, grid) in grids.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(format!("Table_{}", i + 1))?;

        let has_header = grid.row_count() > 1;
        for (r, row) in grid.rows().iter().enumerate() {
            let r = u32::try_from(r).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (c, text) in row.iter().enumerate() {
                let c = u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)?;
                if r == 0 && has_header {
                    sheet.write_string_with_format(r, c, text, &header)?;
                } else {
                    sheet.write_string(r, c, text)?;
                }
            }
        }
    }

    workbook.save(path)
}
