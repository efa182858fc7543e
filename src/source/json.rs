//! JSON span dumps.
//!
//! The format mirrors [`SourcePage`] directly:
//!
//! ```json
//! {"pages": [{"number": 1, "blocks": [{"lines": [{"spans": [
//!     {"text": "Chapter One", "size": 18.0, "font": "Arial-BoldMT"}
//! ]}]}]}]}
//! ```
//!
//! `number` may be omitted, in which case pages are numbered by position.

use std::path::Path;

use serde::Deserialize;

use super::DocumentSource;
use crate::error::Result;
use crate::model::SourcePage;

#[derive(Debug, Deserialize)]
struct SpanDump {
    #[serde(default)]
    pages: Vec<SourcePage>,
}

/// Reads pre-extracted spans from JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonSource {
    _private: (),
}

impl JsonSource {
    /// Create a new JSON source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentSource for JsonSource {
    fn name(&self) -> &str {
        "json"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&self, path: &Path) -> Result<Vec<SourcePage>> {
        let data = std::fs::read(path)?;
        self.load_bytes(&data)
    }

    fn load_bytes(&self, data: &[u8]) -> Result<Vec<SourcePage>> {
        let dump: SpanDump = serde_json::from_slice(data)?;
        let pages = dump
            .pages
            .into_iter()
            .enumerate()
            .map(|(idx, mut page)| {
                if page.number == 0 {
                    page.number = idx as u32 + 1;
                }
                page
            })
            .collect();
        Ok(pages)
    }
}
