// Document record loading

use std::io::Read;
use std::path::Path;

use dossierdiff_recon::{load_document, DocumentRecord};

/// Read a parsed document record from a JSON file.
pub fn read_document(path: &Path) -> Result<DocumentRecord, String> {
    let content = read_file_as_utf8(path)?;
    load_document(&content).map_err(|e| e.to_string())
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for legacy extraction tooling)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_utf8_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(
            &path,
            r#"{"core_tasks": [{"code": "B1-K1", "name": "Bewaakt objecten"}]}"#,
        )
        .unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.core_tasks.len(), 1);
        assert_eq!(doc.core_tasks[0].name, "Bewaakt objecten");
    }

    #[test]
    fn windows_1252_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        // 0xE9 is é in Windows-1252 but invalid UTF-8 on its own
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{\"core_tasks\": [{\"code\": \"B1-K1\", \"name\": \"Surveill\xE9ren\"}]}")
            .unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.core_tasks[0].name, "Surveill\u{e9}ren");
    }

    #[test]
    fn missing_file_reports_error() {
        let err = read_document(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn malformed_json_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{broken").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(err.contains("document parse error"));
    }
}
