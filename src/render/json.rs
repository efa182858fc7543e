//! JSON rendering for bundles and ranking results.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any output value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a value and write it to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(value, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentBundle, HeadingLevel, OutlineEntry};

    #[test]
    fn test_to_json_pretty() {
        let mut bundle = DocumentBundle::new();
        bundle
            .outline
            .push(OutlineEntry::new(HeadingLevel::H1, "Coastal Adventures Guide", 1));

        let json = to_json(&bundle, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&DocumentBundle::new(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"outline":[],"text_by_page":{}}"#);
    }

    #[test]
    fn test_write_json_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("output.json");
        write_json(&DocumentBundle::new(), &path, JsonFormat::Compact).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("outline"));
    }
}
