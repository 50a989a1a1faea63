// CSV report export

use std::path::Path;

use dossierdiff_recon::ChangeRecord;

pub(crate) const HEADER: [&str; 6] = [
    "Old code",
    "Old name",
    "New code",
    "New name",
    "Impact",
    "Page",
];

/// Order rows the way the report is read: lexicographically by new code.
/// The `-` placeholder sorts ahead of alphanumeric codes, so unmatched
/// entries group at the top; the sort is stable, so insertion order
/// survives within equal keys.
pub(crate) fn sorted_rows(rows: &[ChangeRecord]) -> Vec<&ChangeRecord> {
    let mut sorted: Vec<&ChangeRecord> = rows.iter().collect();
    sorted.sort_by(|a, b| a.new_code.cmp(&b.new_code));
    sorted
}

/// Write the report rows as `;`-separated CSV.
pub fn export_csv(rows: &[ChangeRecord], path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| e.to_string())?;

    writer.write_record(HEADER).map_err(|e| e.to_string())?;

    for row in sorted_rows(rows) {
        writer
            .write_record([
                row.old_code.as_str(),
                row.old_name.as_str(),
                row.new_code.as_str(),
                row.new_name.as_str(),
                row.impact.as_str(),
                row.page.as_str(),
            ])
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}
