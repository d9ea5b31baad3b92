use std::path::{Path, PathBuf};
use underhall_core::error::UnderhallError;
use underhall_core::extraction::textract::load_responses;
use underhall_core::parsing::normalize;
use underhall_core::PageExtract;

use crate::output;

fn extract_all(input: &Path) -> Result<Vec<PageExtract>, UnderhallError> {
    let pages = load_responses(input)?;
    if pages.is_empty() {
        return Err(UnderhallError::EmptyDocument);
    }
    Ok(pages.iter().map(underhall_core::extract_page).collect())
}

pub fn tables(inputs: &[PathBuf]) -> Result<(), UnderhallError> {
    for input in inputs {
        let pages = extract_all(input)?;
        let mut n = 0;
        for (page_index, page) in pages.iter().enumerate() {
            for grid in &page.tables {
                n += 1;
                println!(
                    "--- {} table {} (page {}) ---",
                    input.display(),
                    n,
                    page_index + 1
                );
                output::table::print_grid(grid);
                println!();
            }
        }
        if n == 0 {
            eprintln!("{}: no tables found", input.display());
        }
    }
    Ok(())
}

pub fn text(inputs: &[PathBuf]) -> Result<(), UnderhallError> {
    for input in inputs {
        let pages = extract_all(input)?;
        let text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        print!("{text}");
    }
    Ok(())
}

pub fn fix(text: &str) -> Result<(), UnderhallError> {
    println!("{}", normalize(text));
    Ok(())
}
