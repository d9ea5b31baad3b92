pub mod error;
pub mod extraction;
pub mod maintenance;
pub mod model;
pub mod parsing;
pub mod profiles;

use error::UnderhallError;
use extraction::{BlockGraph, OcrBackend};
use model::{Grid, OcrResponse, ProcessedDocument};
use profiles::schema::KeywordProfile;
use rayon::prelude::*;

/// Text and tables recovered from a single recognition response.
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    pub text: String,
    pub tables: Vec<Grid>,
}

/// Rebuild the text and tables of one page.
pub fn extract_page(response: &OcrResponse) -> PageExtract {
    let graph = BlockGraph::new(&response.blocks);
    PageExtract {
        text: extraction::extract_text(&graph),
        tables: extraction::extract_tables(&graph),
    }
}

/// Process a single recognition response into a document.
pub fn process_response(response: &OcrResponse, profile: &KeywordProfile) -> ProcessedDocument {
    process_pages(std::slice::from_ref(response), profile)
}

/// Process a document's pages.
///
/// Pages are rebuilt independently and in parallel; tables keep page order
/// and the maintenance record is aggregated once over all of them.
pub fn process_pages(pages: &[OcrResponse], profile: &KeywordProfile) -> ProcessedDocument {
    let extracts: Vec<PageExtract> = pages.par_iter().map(extract_page).collect();

    let text = extracts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let tables: Vec<Grid> = extracts.into_iter().flat_map(|p| p.tables).collect();
    log::info!(
        "reconstructed {} table(s) from {} page(s)",
        tables.len(),
        pages.len()
    );

    let (maintenance, skipped_rows) = maintenance::aggregate_with_diagnostics(&tables, profile);
    log::info!(
        "maintenance plan: {} item(s) over {} year(s), total {}",
        maintenance.item_count(),
        maintenance.yearly.len(),
        maintenance.total_cost
    );

    ProcessedDocument {
        page_count: pages.len(),
        text,
        tables,
        maintenance,
        skipped_rows,
    }
}

/// Main API entry point: run a document through a recognition backend and
/// derive its tables and maintenance plan.
pub fn process_document(
    document: &[u8],
    backend: &dyn OcrBackend,
    profile: &KeywordProfile,
) -> Result<ProcessedDocument, UnderhallError> {
    let pages = backend.recognize(document)?;
    log::debug!(
        "backend '{}' returned {} page(s)",
        backend.backend_name(),
        pages.len()
    );

    if pages.is_empty() {
        return Err(UnderhallError::EmptyDocument);
    }

    Ok(process_pages(&pages, profile))
}
