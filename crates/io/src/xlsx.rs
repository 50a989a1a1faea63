// Excel report export

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

use dossierdiff_recon::ChangeRecord;

use crate::csv::{sorted_rows, HEADER};

const COLUMN_WIDTHS: [f64; 6] = [15.0, 40.0, 15.0, 40.0, 50.0, 10.0];

/// Write the report as a single-sheet workbook: formatted header row, fixed
/// column widths, wrapped impact column, rows sorted by new code.
pub fn export_xlsx(rows: &[ChangeRecord], path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9D9D9))
        .set_border(FormatBorder::Thin);
    let wrap_format = Format::new().set_text_wrap();

    for (col, title) in HEADER.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| e.to_string())?;
        worksheet
            .set_column_width(col as u16, COLUMN_WIDTHS[col])
            .map_err(|e| e.to_string())?;
    }

    for (i, row) in sorted_rows(rows).iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet
            .write_string(r, 0, row.old_code.as_str())
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string(r, 1, row.old_name.as_str())
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string(r, 2, row.new_code.as_str())
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string(r, 3, row.new_name.as_str())
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string_with_format(r, 4, row.impact.as_str(), &wrap_format)
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string(r, 5, row.page.as_str())
            .map_err(|e| e.to_string())?;
    }

    workbook.save(path).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossierdiff_recon::model::ChangeKind;

    #[test]
    fn export_writes_workbook() {
        let rows = vec![ChangeRecord {
            kind: ChangeKind::Unchanged,
            old_code: "B1-K1-W1".into(),
            old_name: "Voert risicoanalyse uit".into(),
            new_code: "B1-K1-W1".into(),
            new_name: "Voert risicoanalyse uit".into(),
            impact: "No change in name or code".into(),
            page: "7-14".into(),
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        export_xlsx(&rows, &path).unwrap();

        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn export_accepts_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        export_xlsx(&[], &path).unwrap();
        assert!(path.exists());
    }
}
