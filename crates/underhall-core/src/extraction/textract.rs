use crate::error::UnderhallError;
use crate::extraction::OcrBackend;
use crate::model::OcrResponse;
use serde::Deserialize;
use std::path::Path;

/// Backend that reads recognition responses saved as JSON.
///
/// Accepts either one `AnalyzeDocument`-style response (`{"Blocks": [...]}`)
/// or an array of them, as collected from the paginated results of an
/// asynchronous analysis job.
pub struct TextractJsonBackend;

impl TextractJsonBackend {
    pub fn new() -> Self {
        TextractJsonBackend
    }
}

impl Default for TextractJsonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TextractJsonBackend {
    fn recognize(&self, document: &[u8]) -> Result<Vec<OcrResponse>, UnderhallError> {
        parse_responses(document)
    }

    fn backend_name(&self) -> &str {
        "textract-json"
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SavedResponses {
    Many(Vec<OcrResponse>),
    One(OcrResponse),
}

/// Parse saved recognition JSON into one response per page.
pub fn parse_responses(bytes: &[u8]) -> Result<Vec<OcrResponse>, UnderhallError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    // A bare object without "Blocks" is almost certainly the wrong file.
    if let Some(obj) = value.as_object() {
        if !obj.contains_key("Blocks") {
            return Err(UnderhallError::InvalidResponse(
                "expected a \"Blocks\" array at the top level".into(),
            ));
        }
    }

    let saved: SavedResponses = serde_json::from_value(value)
        .map_err(|e| UnderhallError::InvalidResponse(e.to_string()))?;

    let responses = match saved {
        SavedResponses::Many(pages) => pages,
        SavedResponses::One(page) => vec![page],
    };
    log::debug!(
        "parsed {} response page(s) with {} block(s)",
        responses.len(),
        responses.iter().map(|r| r.blocks.len()).sum::<usize>()
    );
    Ok(responses)
}

/// Load saved recognition JSON from a file.
pub fn load_responses(path: &Path) -> Result<Vec<OcrResponse>, UnderhallError> {
    let bytes = std::fs::read(path).map_err(|e| UnderhallError::ResponseLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_responses(&bytes).map_err(|e| UnderhallError::ResponseLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
