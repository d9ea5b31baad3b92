pub mod graph;
pub mod table;
pub mod text;
pub mod textract;

use crate::error::UnderhallError;
use crate::model::OcrResponse;

pub use graph::BlockGraph;
pub use table::extract_tables;
pub use text::extract_text;

/// Trait for recognition backends.
///
/// A backend turns a document into one recognition response per page (or per
/// result page of an asynchronous job). Rasterization, uploads, polling and
/// retries all live behind this trait.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, document: &[u8]) -> Result<Vec<OcrResponse>, UnderhallError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
